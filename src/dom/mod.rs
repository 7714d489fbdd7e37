//! Read-only view of the host page
//!
//! The extraction heuristics only talk to the page through the [`Page`] trait so
//! they can run against a live Chrome tab or an in-memory fake:
//! - [`ElementNode`]: snapshot of one element returned by a selector query
//! - [`ElementHandle`]: how to find that element again for clicks, scrolls and captures
//! - [`DocumentMetrics`]: box-model heights and viewport size

pub mod element;

#[cfg(test)]
pub(crate) mod fake;

pub use element::{ElementHandle, ElementNode};

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Height and viewport properties of the current document
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct DocumentMetrics {
    pub body_scroll_height: f64,
    pub body_offset_height: f64,
    pub html_client_height: f64,
    pub html_scroll_height: f64,
    pub html_offset_height: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl DocumentMetrics {
    /// Full document height; layouts disagree on which property is right, so take the largest
    pub fn full_height(&self) -> f64 {
        [
            self.body_scroll_height,
            self.body_offset_height,
            self.html_client_height,
            self.html_scroll_height,
            self.html_offset_height,
        ]
        .into_iter()
        .fold(0.0, f64::max)
    }
}

/// The host page as the extractor sees it
pub trait Page {
    /// Current page URL
    fn url(&self) -> Result<String>;

    /// All elements matching `selector`, in document order
    fn query_all(&self, selector: &str) -> Result<Vec<ElementNode>>;

    /// Dispatch a click on the element
    fn click(&self, handle: &ElementHandle) -> Result<()>;

    /// Current vertical scroll offset
    fn scroll_offset(&self) -> Result<f64>;

    /// Scroll the window to vertical offset `y`
    fn scroll_to(&self, y: f64) -> Result<()>;

    /// Scroll the element to the centre of the viewport
    fn scroll_into_view(&self, handle: &ElementHandle) -> Result<()>;

    /// Box-model heights of the document and the viewport size
    fn metrics(&self) -> Result<DocumentMetrics>;

    /// Give the page time to render lazy content
    fn settle(&self, duration: Duration);

    /// First element matching `selector`
    fn query_first(&self, selector: &str) -> Result<Option<ElementNode>> {
        Ok(self.query_all(selector)?.into_iter().next())
    }

    /// Whether anything matches `selector`
    fn exists(&self, selector: &str) -> Result<bool> {
        Ok(!self.query_all(selector)?.is_empty())
    }
}
