use crate::{dom::Page, error::Result};
use serde::{Deserialize, Serialize};

/// Which generation of the Slideshare player the page is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutVariant {
    New,
    Legacy,
    Embedded,
    Unknown,
}

/// Marker elements checked in order; the first one present decides the layout
const LAYOUT_MARKERS: &[(&str, LayoutVariant)] = &[
    (".slideshow-container", LayoutVariant::New),
    (".slide_container", LayoutVariant::Legacy),
    (".normal-slide", LayoutVariant::Embedded),
];

impl LayoutVariant {
    /// Slide image selectors for this layout, tried in order
    pub fn slide_selectors(&self) -> &'static [&'static str] {
        match self {
            Self::New => &[".slide img", ".slideshow-slide img", ".slide-image img", "img[data-slide]"],
            Self::Legacy => &[".slide_container .slide img", ".slide-container img"],
            Self::Embedded => &[".normal-slide img", ".slide img"],
            Self::Unknown => &[
                ".slide img",
                ".slide-image img",
                ".normal-slide img",
                "img[data-slide]",
                ".slide-container img",
                ".slideshow-slide img",
            ],
        }
    }
}

/// Classify the page by looking for the layout markers in order
pub fn detect_layout(page: &dyn Page) -> Result<LayoutVariant> {
    for (marker, variant) in LAYOUT_MARKERS {
        if page.exists(marker)? {
            log::debug!("Layout marker '{}' found: {:?}", marker, variant);
            return Ok(*variant);
        }
    }

    Ok(LayoutVariant::Unknown)
}
