//! # deckgrab
//!
//! Save slide decks and documents from Slideshare and Scribd as PDF or PPTX by
//! capturing what a Chrome tab renders, driven over the Chrome DevTools Protocol (CDP).
//!
//! ## Features
//!
//! - **Site detection**: Slideshare layouts (new, legacy, embedded) and Scribd documents
//! - **Slide capture**: per-slide renders with a whole-page screenshot as a last resort
//! - **Document assembly**: PDF pages sized to each capture, or 16:9 PPTX slides
//! - **Progress events**: `DOWNLOAD_PROGRESS` / `DOWNLOAD_COMPLETE` / `DOWNLOAD_ERROR`
//!
//! ## Command line
//!
//! ```bash
//! # Save a deck as PDF into the current directory
//! deckgrab https://www.slideshare.net/someone/some-deck
//!
//! # PPTX, with a visible browser
//! deckgrab --format pptx --headed https://www.slideshare.net/someone/some-deck
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use deckgrab::{BrowserSession, ChromeRenderer, Extractor, JobOutcome, LaunchOptions, LogSink, OutputFormat};
//!
//! # fn main() -> deckgrab::Result<()> {
//! let session = BrowserSession::launch(LaunchOptions::default())?;
//! let page = session.open_page("https://www.slideshare.net/someone/some-deck")?;
//! let renderer = ChromeRenderer::new(page.tab().clone());
//!
//! let extractor = Extractor::new(&page, &renderer, &LogSink);
//! if let JobOutcome::Completed(report) = extractor.run(OutputFormat::Pdf)? {
//!     report.document.write_to(std::path::Path::new("."))?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`browser`]: Browser session management and the CDP-backed [`Page`]
//! - [`dom`]: The [`Page`] abstraction and element snapshots
//! - [`site`]: Site profiles, layout detection, candidate collection and filtering
//! - [`capture`]: Rendering elements or the whole page to images
//! - [`assemble`]: PDF and PPTX generators
//! - [`job`]: The extraction state machine and its progress events
//! - [`prefs`]: Settings remembered between runs
//! - [`error`]: Error types and result aliases

pub mod assemble;
pub mod browser;
pub mod capture;
pub mod dom;
pub mod error;
pub mod job;
pub mod prefs;
pub mod site;

pub use assemble::{DocumentGenerator, DocumentInfo, OutputDocument, OutputFormat, PdfGenerator, PptxGenerator};
pub use browser::{BrowserSession, ChromePage, ConnectionOptions, LaunchOptions};
pub use capture::{CaptureConfig, CaptureTarget, CapturedImage, ChromeRenderer, Renderer};
pub use dom::{DocumentMetrics, ElementHandle, ElementNode, Page};
pub use error::{DeckError, Result};
pub use job::{EventSink, ExtractionEvent, Extractor, JobOutcome, JobReport, JobState, JsonLinesSink, LogSink};
pub use prefs::Preferences;
pub use site::SiteProfile;
