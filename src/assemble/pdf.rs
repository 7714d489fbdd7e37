use super::{DocumentGenerator, DocumentInfo, JPEG_QUALITY, OutputFormat};
use crate::{capture::CapturedImage,
            error::{DeckError, Result}};
use lopdf::{content::{Content, Operation},
            dictionary, Document, Object, ObjectId, Stream, StringFormat};

/// PDF with one page per capture; each page's MediaBox equals its image's pixel size
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfGenerator;

fn assembly_error(e: impl std::fmt::Display) -> DeckError {
    DeckError::AssemblyFailed { format: "PDF", reason: e.to_string() }
}

/// PDF text string: literal for ASCII, UTF-16BE with BOM otherwise
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }

    let mut bytes = vec![0xFE, 0xFF];
    bytes.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
    Object::String(bytes, StringFormat::Hexadecimal)
}

impl PdfGenerator {
    fn add_page(doc: &mut Document, pages_id: ObjectId, image: &CapturedImage) -> Result<ObjectId> {
        let width = i64::from(image.width());
        let height = i64::from(image.height());

        let image_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width,
                "Height" => height,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8_i64,
                "Filter" => "DCTDecode",
            },
            image.to_jpeg(JPEG_QUALITY)?,
        ));

        // Draw the image over the whole page
        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        Object::Integer(width),
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Integer(height),
                        Object::Integer(0),
                        Object::Integer(0),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().map_err(assembly_error)?));

        Ok(doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![Object::Integer(0), Object::Integer(0), Object::Integer(width), Object::Integer(height)],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "XObject" => dictionary! { "Im0" => image_id },
            },
        }))
    }
}

impl DocumentGenerator for PdfGenerator {
    fn format(&self) -> OutputFormat {
        OutputFormat::Pdf
    }

    fn generate(&self, images: &[CapturedImage], info: &DocumentInfo<'_>) -> Result<Vec<u8>> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut kids: Vec<Object> = Vec::with_capacity(images.len());
        for image in images {
            kids.push(Self::add_page(&mut doc, pages_id, image)?.into());
        }

        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => images.len() as i64,
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => text_string(info.title),
            "Author" => text_string(info.author),
            "Creator" => Object::string_literal(concat!("deckgrab ", env!("CARGO_PKG_VERSION"))),
        });

        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).map_err(assembly_error)?;
        Ok(bytes)
    }
}
