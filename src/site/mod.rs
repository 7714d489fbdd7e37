//! Site-specific knowledge: which host a page belongs to, how its DOM is laid
//! out, where the slides live and how to tell a slide from decoration.

pub mod collector;
pub mod filter;
pub mod layout;
pub mod metadata;
pub mod scribd;
pub mod slideshare;

pub use collector::collect_candidates;
pub use filter::{is_slide_image, DECORATIVE_KEYWORDS, MIN_SLIDE_HEIGHT, MIN_SLIDE_WIDTH};
pub use layout::{detect_layout, LayoutVariant};
pub use metadata::{read_metadata, DeckMetadata};
pub use slideshare::wait_for_slides;

use crate::capture::CaptureConfig;
use serde::{Deserialize, Serialize};

/// Document pages on Scribd, most specific first
pub const SCRIBD_PAGE_SELECTORS: &[&str] =
    &[".text_layer", ".page", ".document_page", "[data-testid=\"page\"]", ".scribd_page"];

/// The hosting sites we know how to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteProfile {
    Slideshare,
    Scribd,
}

impl SiteProfile {
    /// Classify a URL by host. Scheme-less input such as `slideshare.net/x` is accepted.
    pub fn from_url(url: &str) -> Option<Self> {
        let parsed = url::Url::parse(&normalize_url(url)).ok()?;
        let host = parsed.host_str()?;

        if host.contains("slideshare.net") {
            Some(Self::Slideshare)
        } else if host.contains("scribd.com") {
            Some(Self::Scribd)
        } else {
            None
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Slideshare => "slideshare",
            Self::Scribd => "scribd",
        }
    }

    pub fn default_title(&self) -> &'static str {
        match self {
            Self::Slideshare => "slideshare-presentation",
            Self::Scribd => "scribd-document",
        }
    }

    pub fn title_selectors(&self) -> &'static [&'static str] {
        match self {
            Self::Slideshare => &[
                "h1.slideshow-title",
                ".slideshow-title h1",
                "h1[data-cy=\"slideshow-title\"]",
                ".j-title-breadcrumb",
                "h1",
            ],
            Self::Scribd => &["h1[data-testid=\"document_title\"]", ".document_title h1", "h1.title", ".doc_title", "h1"],
        }
    }

    pub fn author_selectors(&self) -> &'static [&'static str] {
        match self {
            Self::Slideshare => &[".slideshow-author a", ".user-name", "[data-cy=\"slideshow-author\"]", ".author-name"],
            Self::Scribd => &["[data-testid=\"document_author\"] a", ".document_author", ".author_name", ".doc_author a"],
        }
    }

    /// Elements whose text holds the declared slide/page total
    pub fn counter_selectors(&self) -> &'static [&'static str] {
        match self {
            Self::Slideshare => &[".slideshow-pagination .total", ".slide-counter", "[data-cy=\"slide-counter\"]"],
            Self::Scribd => &["[data-testid=\"page_count\"]", ".page_count", ".total_pages", ".page-counter"],
        }
    }

    /// Settings for capturing one structured slide or page
    pub fn capture_config(&self) -> CaptureConfig {
        match self {
            Self::Slideshare => CaptureConfig::new(2.0),
            Self::Scribd => CaptureConfig::new(2.0).background([255, 255, 255]),
        }
    }

    /// Settings for the whole-page fallback
    pub fn fallback_config(&self) -> CaptureConfig {
        match self {
            Self::Slideshare => CaptureConfig::new(2.0),
            Self::Scribd => CaptureConfig::new(1.5).background([255, 255, 255]),
        }
    }
}

impl std::fmt::Display for SiteProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Whether the URL points at a supported host
pub fn is_supported_url(url: &str) -> bool {
    SiteProfile::from_url(url).is_some()
}

/// Normalize an incomplete URL by adding a missing protocol
pub fn normalize_url(url: &str) -> String {
    let trimmed = url.trim();

    if trimmed.starts_with("http://")
        || trimmed.starts_with("https://")
        || trimmed.starts_with("file://")
        || trimmed.starts_with("data:")
        || trimmed.starts_with("about:")
    {
        return trimmed.to_string();
    }

    if trimmed.starts_with("localhost") || trimmed.starts_with("127.0.0.1") {
        return format!("http://{}", trimmed);
    }

    format!("https://{}", trimmed)
}
