use super::SiteProfile;
use crate::{dom::Page, error::Result};
use serde::Serialize;

/// Descriptive data about the deck, read before capturing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeckMetadata {
    pub title: String,
    pub author: String,
    /// Total announced by the page's own counter, if it shows one
    pub declared_count: Option<u32>,
}

/// Read title, author and declared slide/page count
pub fn read_metadata(page: &dyn Page, profile: SiteProfile) -> Result<DeckMetadata> {
    let title = first_text(page, profile.title_selectors())?.unwrap_or_else(|| profile.default_title().to_string());
    let author = first_text(page, profile.author_selectors())?.unwrap_or_else(|| "Unknown".to_string());

    let mut declared_count = None;
    for selector in profile.counter_selectors() {
        if let Some(count) = page.query_first(selector)?.and_then(|e| e.text_content.as_deref().and_then(first_integer))
        {
            declared_count = Some(count);
            break;
        }
    }

    Ok(DeckMetadata { title, author, declared_count })
}

/// Text of the first selector whose first match has non-blank text
pub fn first_text(page: &dyn Page, selectors: &[&str]) -> Result<Option<String>> {
    for selector in selectors {
        if let Some(element) = page.query_first(selector)? {
            if let Some(text) = element.non_empty_text() {
                return Ok(Some(text.to_string()));
            }
        }
    }

    Ok(None)
}

/// First run of ASCII digits in `text`
fn first_integer(text: &str) -> Option<u32> {
    text.split(|c: char| !c.is_ascii_digit()).find(|s| !s.is_empty()).and_then(|digits| digits.parse().ok())
}
