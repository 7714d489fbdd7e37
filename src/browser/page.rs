use crate::{dom::{DocumentMetrics, ElementHandle, ElementNode, Page},
            error::{DeckError, Result}};
use headless_chrome::Tab;
use serde::de::DeserializeOwned;
use std::{borrow::Cow, sync::Arc, time::Duration};

const REPLACEMENT_ESCAPE: &str = "\\ufffd";

/// Decode script output. Lone UTF-16 surrogate escapes, which `JSON.stringify`
/// emits for text cut inside a surrogate pair, become U+FFFD first.
fn decode_json<T: DeserializeOwned>(json: &str) -> Result<T> {
    serde_json::from_str(&repair_surrogate_escapes(json))
        .map_err(|e| DeckError::DomParseFailed(format!("Failed to parse JSON: {}", e)))
}

/// The UTF-16 code unit of a `\uXXXX` escape starting at byte `at`
fn escaped_unit(json: &str, at: usize) -> Option<u16> {
    if json.get(at..at + 2)? != "\\u" {
        return None;
    }
    u16::from_str_radix(json.get(at + 2..at + 6)?, 16).ok()
}

fn repair_surrogate_escapes(json: &str) -> Cow<'_, str> {
    const HIGH: std::ops::Range<u16> = 0xD800..0xDC00;
    const LOW: std::ops::Range<u16> = 0xDC00..0xE000;

    let bytes = json.as_bytes();
    let mut repaired = String::new();
    let mut copied = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'\\' {
            i += 1;
            continue;
        }
        let Some(unit) = escaped_unit(json, i) else {
            // any other escape, including an escaped backslash
            i += 2;
            continue;
        };

        if HIGH.contains(&unit) && escaped_unit(json, i + 6).is_some_and(|next| LOW.contains(&next)) {
            i += 12;
        } else if HIGH.contains(&unit) || LOW.contains(&unit) {
            repaired.push_str(&json[copied..i]);
            repaired.push_str(REPLACEMENT_ESCAPE);
            i += 6;
            copied = i;
        } else {
            i += 6;
        }
    }

    if copied == 0 {
        return Cow::Borrowed(json);
    }
    repaired.push_str(&json[copied..]);
    Cow::Owned(repaired)
}

/// [`Page`] backed by a live Chrome tab
#[derive(Clone)]
pub struct ChromePage {
    tab: Arc<Tab>,
}

impl ChromePage {
    pub fn new(tab: Arc<Tab>) -> Self {
        Self { tab }
    }

    /// The underlying tab
    pub fn tab(&self) -> &Arc<Tab> {
        &self.tab
    }

    /// Evaluate a script that returns a JSON string and decode it
    fn evaluate_json<T: DeserializeOwned>(&self, js: &str) -> Result<T> {
        let result = self.tab.evaluate(js, false).map_err(|e| DeckError::EvaluationFailed(e.to_string()))?;

        let json_value =
            result.value.ok_or_else(|| DeckError::DomParseFailed("No value returned from script".to_string()))?;

        // The scripts return a JSON string, so unwrap the string first
        let json_str: String = serde_json::from_value(json_value)
            .map_err(|e| DeckError::DomParseFailed(format!("Failed to get JSON string: {}", e)))?;

        decode_json(&json_str)
    }

    /// Evaluate a script for its side effect, returning the raw value
    fn evaluate_value(&self, js: &str) -> Result<Option<serde_json::Value>> {
        self.tab
            .evaluate(js, false)
            .map(|remote_object| remote_object.value)
            .map_err(|e| DeckError::EvaluationFailed(e.to_string()))
    }

    fn quote(value: &str) -> Result<String> {
        serde_json::to_string(value).map_err(|e| DeckError::EvaluationFailed(e.to_string()))
    }
}

impl Page for ChromePage {
    fn url(&self) -> Result<String> {
        Ok(self.tab.get_url())
    }

    fn query_all(&self, selector: &str) -> Result<Vec<ElementNode>> {
        let js = format!("({})({})", include_str!("query_elements.js"), Self::quote(selector)?);
        let nodes: Vec<ElementNode> = self.evaluate_json(&js)?;

        Ok(nodes
            .into_iter()
            .enumerate()
            .map(|(index, node)| node.with_handle(ElementHandle::new(selector, index)))
            .collect())
    }

    fn click(&self, handle: &ElementHandle) -> Result<()> {
        let elements = self
            .tab
            .find_elements(&handle.selector)
            .map_err(|e| DeckError::ElementNotFound(format!("Element '{}' not found: {}", handle.selector, e)))?;

        let element = elements.get(handle.index).ok_or_else(|| {
            DeckError::ElementNotFound(format!("No element #{} for '{}'", handle.index, handle.selector))
        })?;

        element.click().map_err(|e| DeckError::EvaluationFailed(format!("Click failed: {}", e)))?;
        Ok(())
    }

    fn scroll_offset(&self) -> Result<f64> {
        Ok(self.evaluate_value("window.scrollY")?.and_then(|v| v.as_f64()).unwrap_or(0.0))
    }

    fn scroll_to(&self, y: f64) -> Result<()> {
        self.evaluate_value(&format!("window.scrollTo(0, {})", y))?;
        Ok(())
    }

    fn scroll_into_view(&self, handle: &ElementHandle) -> Result<()> {
        let js = format!(
            r#"(function(sel, i) {{
                const el = document.querySelectorAll(sel)[i];
                if (!el) return false;
                el.scrollIntoView({{ block: 'center' }});
                return true;
            }})({}, {})"#,
            Self::quote(&handle.selector)?,
            handle.index
        );

        match self.evaluate_value(&js)?.and_then(|v| v.as_bool()) {
            Some(true) => Ok(()),
            _ => Err(DeckError::ElementNotFound(format!("No element #{} for '{}'", handle.index, handle.selector))),
        }
    }

    fn metrics(&self) -> Result<DocumentMetrics> {
        self.evaluate_json(include_str!("document_metrics.js"))
    }

    fn settle(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
