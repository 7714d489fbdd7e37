//! Turning captured images into a downloadable document
//!
//! - [`PdfGenerator`]: one page per image, each page sized to its image
//! - [`PptxGenerator`]: one slide per image, stretched over the whole slide

pub mod pdf;
pub mod pptx;
pub(crate) mod xml;

pub use pdf::PdfGenerator;
pub use pptx::PptxGenerator;

use crate::{capture::CapturedImage,
            error::{DeckError, Result}};
use serde::{Deserialize, Serialize};
use std::{fmt,
          path::{Path, PathBuf},
          str::FromStr};

/// JPEG quality used when embedding captures
pub const JPEG_QUALITY: u8 = 95;

/// Longest file stem produced by [`sanitize_file_name`]
pub const MAX_FILE_STEM: usize = 50;

/// Output container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pdf,
    Pptx,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Pptx => "pptx",
        }
    }

    /// Upper-case label for messages
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Pptx => "PPTX",
        }
    }

    /// The generator that writes this format
    pub fn generator(&self) -> Box<dyn DocumentGenerator> {
        match self {
            Self::Pdf => Box::new(PdfGenerator),
            Self::Pptx => Box::new(PptxGenerator),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "ppt" | "pptx" => Ok(Self::Pptx),
            other => Err(DeckError::UnknownFormat(other.to_string())),
        }
    }
}

/// Page orientation, taken from the first capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Landscape,
    Portrait,
}

impl Orientation {
    pub fn of(image: &CapturedImage) -> Self {
        if image.width() > image.height() { Self::Landscape } else { Self::Portrait }
    }
}

/// Document-level properties
#[derive(Debug, Clone, Copy)]
pub struct DocumentInfo<'a> {
    pub title: &'a str,
    pub author: &'a str,
}

/// Writes a non-empty sequence of captures into one document
pub trait DocumentGenerator {
    fn format(&self) -> OutputFormat;

    fn generate(&self, images: &[CapturedImage], info: &DocumentInfo<'_>) -> Result<Vec<u8>>;
}

/// A finished document ready to be saved
#[derive(Debug, Clone)]
pub struct OutputDocument {
    pub format: OutputFormat,
    pub file_name: String,
    pub orientation: Orientation,
    pub page_count: usize,
    pub bytes: Vec<u8>,
}

impl OutputDocument {
    /// Write into `dir` under [`OutputDocument::file_name`]
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Build the output document. An empty capture list is an error, never an empty file.
pub fn assemble(
    images: &[CapturedImage],
    info: &DocumentInfo<'_>,
    generator: &dyn DocumentGenerator,
) -> Result<OutputDocument> {
    let first = images.first().ok_or(DeckError::NoSlidesCaptured)?;
    let format = generator.format();
    let orientation = Orientation::of(first);

    log::info!("Assembling {} {} page(s) ({:?})", images.len(), format.label(), orientation);
    let bytes = generator.generate(images, info)?;

    Ok(OutputDocument {
        format,
        file_name: format!("{}.{}", sanitize_file_name(info.title), format.extension()),
        orientation,
        page_count: images.len(),
        bytes,
    })
}

/// Lowercase, replace everything except ASCII letters and digits with `_`, cut to 50 characters
pub fn sanitize_file_name(title: &str) -> String {
    title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .take(MAX_FILE_STEM)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    struct CountingGenerator;

    impl DocumentGenerator for CountingGenerator {
        fn format(&self) -> OutputFormat {
            OutputFormat::Pdf
        }

        fn generate(&self, images: &[CapturedImage], _info: &DocumentInfo<'_>) -> Result<Vec<u8>> {
            Ok(vec![images.len() as u8])
        }
    }

    const INFO: DocumentInfo<'static> = DocumentInfo { title: "My / Cool: Deck!", author: "Unknown" };

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("My / Cool: Deck!"), "my___cool__deck_");
        assert_eq!(sanitize_file_name("Q3-Results_2024"), "q3_results_2024");
        assert_eq!(sanitize_file_name("Übersicht"), "_bersicht");
        assert_eq!(sanitize_file_name(&"A".repeat(80)), "a".repeat(50));
    }

    #[test]
    fn test_assemble_rejects_empty() {
        let result = assemble(&[], &INFO, &CountingGenerator);
        assert!(matches!(result, Err(DeckError::NoSlidesCaptured)));
    }

    #[test]
    fn test_assemble_names_file_and_orientation() {
        let images = vec![
            CapturedImage::new(RgbaImage::new(400, 900)),
            CapturedImage::new(RgbaImage::new(1600, 900)),
        ];

        let document = assemble(&images, &INFO, &CountingGenerator).unwrap();

        assert_eq!(document.file_name, "my___cool__deck_.pdf");
        assert_eq!(document.orientation, Orientation::Portrait);
        assert_eq!(document.page_count, 2);
        assert_eq!(document.bytes, vec![2]);
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("PDF".parse::<OutputFormat>().unwrap(), OutputFormat::Pdf);
        assert_eq!("ppt".parse::<OutputFormat>().unwrap(), OutputFormat::Pptx);
        assert!("docx".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_write_to_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let document = assemble(&[CapturedImage::new(RgbaImage::new(10, 10))], &INFO, &CountingGenerator).unwrap();

        let path = document.write_to(&dir.path().join("out")).unwrap();

        assert_eq!(std::fs::read(path).unwrap(), vec![1]);
    }
}
