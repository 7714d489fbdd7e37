use thiserror::Error;

/// Errors produced while driving the browser, capturing slides or assembling documents
#[derive(Debug, Error)]
pub enum DeckError {
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    #[error("Failed to connect to browser: {0}")]
    ConnectionFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Tab operation failed: {0}")]
    TabOperationFailed(String),

    #[error("JavaScript evaluation failed: {0}")]
    EvaluationFailed(String),

    #[error("Failed to decode DOM data: {0}")]
    DomParseFailed(String),

    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Capture failed: {0}")]
    CaptureFailed(String),

    #[error("Unsupported site: {0}")]
    UnsupportedSite(String),

    /// The page shows a paywall; nothing is captured
    #[error("Premium content detected. Full access may be required.")]
    PremiumContent,

    /// Every capture path came back empty
    #[error("No slides captured")]
    NoSlidesCaptured,

    #[error("Unknown output format '{0}'")]
    UnknownFormat(String),

    #[error("Failed to assemble {format}: {reason}")]
    AssemblyFailed { format: &'static str, reason: String },

    #[error("Preferences error: {0}")]
    Preferences(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, DeckError>;
