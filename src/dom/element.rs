use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Locates an element again after it has been queried: the selector that found
/// it and its position among that selector's matches
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ElementHandle {
    pub selector: String,
    pub index: usize,
}

impl ElementHandle {
    pub fn new(selector: impl Into<String>, index: usize) -> Self {
        Self { selector: selector.into(), index }
    }
}

/// Snapshot of one DOM element as seen by a selector query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementNode {
    /// Lowercase tag name (e.g., "img", "div")
    pub tag_name: String,

    /// Attributes relevant to slide detection (src, class, alt)
    #[serde(default)]
    pub attributes: HashMap<String, String>,

    /// Trimmed text content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,

    /// Intrinsic pixel width: `naturalWidth` for images, layout width otherwise
    #[serde(default)]
    pub natural_width: u32,

    /// Intrinsic pixel height: `naturalHeight` for images, layout height otherwise
    #[serde(default)]
    pub natural_height: u32,

    /// How to find this element again
    #[serde(default)]
    pub handle: ElementHandle,
}

impl ElementNode {
    /// Create a new ElementNode
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attributes: HashMap::new(),
            text_content: None,
            natural_width: 0,
            natural_height: 0,
            handle: ElementHandle::default(),
        }
    }

    /// Builder method: set a single attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_attribute(key, value);
        self
    }

    /// Builder method: set text content
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_content = Some(text.into());
        self
    }

    /// Builder method: set intrinsic size
    pub fn with_natural_size(mut self, width: u32, height: u32) -> Self {
        self.natural_width = width;
        self.natural_height = height;
        self
    }

    /// Builder method: set handle
    pub fn with_handle(mut self, handle: ElementHandle) -> Self {
        self.handle = handle;
        self
    }

    /// Add a single attribute
    pub fn add_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Get attribute value by key
    pub fn get_attribute(&self, key: &str) -> Option<&String> {
        self.attributes.get(key)
    }

    /// Resolved image source, empty when absent
    pub fn src(&self) -> &str {
        self.get_attribute("src").map_or("", String::as_str)
    }

    /// Raw class attribute, empty when absent
    pub fn class_name(&self) -> &str {
        self.get_attribute("class").map_or("", String::as_str)
    }

    /// Alt text, empty when absent
    pub fn alt(&self) -> &str {
        self.get_attribute("alt").map_or("", String::as_str)
    }

    /// Trimmed text content if there is any
    pub fn non_empty_text(&self) -> Option<&str> {
        self.text_content.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_node_creation() {
        let element = ElementNode::new("img")
            .with_attribute("src", "https://cdn.example.com/slide-1.jpg")
            .with_attribute("class", "slide-image lazy")
            .with_natural_size(1024, 768)
            .with_handle(ElementHandle::new(".slide img", 3));

        assert_eq!(element.tag_name, "img");
        assert_eq!(element.src(), "https://cdn.example.com/slide-1.jpg");
        assert_eq!(element.class_name(), "slide-image lazy");
        assert_eq!(element.alt(), "");
        assert_eq!(element.handle.index, 3);
    }

    #[test]
    fn test_non_empty_text() {
        assert_eq!(ElementNode::new("h1").with_text("  Deck  ").non_empty_text(), Some("Deck"));
        assert_eq!(ElementNode::new("h1").with_text("   ").non_empty_text(), None);
        assert_eq!(ElementNode::new("h1").non_empty_text(), None);
    }

    #[test]
    fn test_deserialize_from_page_json() {
        let json = r#"{
            "tag_name": "img",
            "attributes": {"src": "a.png", "alt": "Slide 1"},
            "text_content": "",
            "natural_width": 960,
            "natural_height": 540
        }"#;

        let element: ElementNode = serde_json::from_str(json).unwrap();
        assert_eq!(element.natural_width, 960);
        assert_eq!(element.alt(), "Slide 1");
        assert_eq!(element.handle, ElementHandle::default());
    }
}
