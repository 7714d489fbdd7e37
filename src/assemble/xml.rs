//! Small wrapper over `quick_xml::Writer` for the generated OOXML parts

use crate::error::{DeckError, Result};
use quick_xml::{events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
                Writer};
use std::borrow::Cow;

/// Characters XML 1.0 allows in text: tab, newline, carriage return and everything from U+0020
/// except the non-characters U+FFFE and U+FFFF
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r') || (c >= '\u{20}' && c != '\u{FFFE}' && c != '\u{FFFF}')
}

/// Drop characters that cannot appear in an XML document at all
pub(crate) fn xml_safe(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.chars().filter(|c| is_xml_char(*c)).collect())
    }
}

/// One standalone XML part being written
pub(crate) struct XmlPart {
    writer: Writer<Vec<u8>>,
    format: &'static str,
}

impl XmlPart {
    /// Start a part with the standalone UTF-8 declaration
    pub fn new(format: &'static str) -> Result<Self> {
        let mut part = Self { writer: Writer::new(Vec::new()), format };
        part.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(part)
    }

    fn write(&mut self, event: Event<'_>) -> Result<()> {
        let format = self.format;
        self.writer
            .write_event(event)
            .map_err(|e| DeckError::AssemblyFailed { format, reason: e.to_string() })
    }

    pub fn open(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        self.write(Event::Start(BytesStart::new(name).with_attributes(attributes.iter().copied())))
    }

    pub fn empty(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
        self.write(Event::Empty(BytesStart::new(name).with_attributes(attributes.iter().copied())))
    }

    pub fn close(&mut self, name: &str) -> Result<()> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    /// `<name>text</name>` with the text escaped and stripped of invalid characters
    pub fn text_element(&mut self, name: &str, text: &str) -> Result<()> {
        self.open(name, &[])?;
        self.write(Event::Text(BytesText::new(&xml_safe(text))))?;
        self.close(name)
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.writer.into_inner()
    }
}
