use super::{xml::XmlPart, DocumentGenerator, DocumentInfo, JPEG_QUALITY, OutputFormat};
use crate::{capture::CapturedImage,
            error::{DeckError, Result}};
use std::io::{Cursor, Write};
use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

/// 16:9 slide canvas, 10in x 5.625in in EMU
pub const SLIDE_WIDTH_EMU: u64 = 9_144_000;
pub const SLIDE_HEIGHT_EMU: u64 = 5_143_500;

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const NS_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const CT_BASE: &str = "application/vnd.openxmlformats-officedocument";

const PRESENTATION_NS: [(&str, &str); 3] = [("xmlns:a", NS_A), ("xmlns:r", NS_R), ("xmlns:p", NS_P)];

/// PowerPoint package with one slide per capture, each image stretched over the full slide
#[derive(Debug, Default, Clone, Copy)]
pub struct PptxGenerator;

fn assembly_error(e: impl std::fmt::Display) -> DeckError {
    DeckError::AssemblyFailed { format: "PPTX", reason: e.to_string() }
}

fn content_types(slide_count: usize) -> Result<Vec<u8>> {
    let mut xml = XmlPart::new("PPTX")?;
    xml.open("Types", &[("xmlns", "http://schemas.openxmlformats.org/package/2006/content-types")])?;
    xml.empty("Default", &[("Extension", "rels"), ("ContentType", "application/vnd.openxmlformats-package.relationships+xml")])?;
    xml.empty("Default", &[("Extension", "xml"), ("ContentType", "application/xml")])?;
    xml.empty("Default", &[("Extension", "jpeg"), ("ContentType", "image/jpeg")])?;

    let overrides = [
        ("/ppt/presentation.xml", format!("{CT_BASE}.presentationml.presentation.main+xml")),
        ("/ppt/slideMasters/slideMaster1.xml", format!("{CT_BASE}.presentationml.slideMaster+xml")),
        ("/ppt/slideLayouts/slideLayout1.xml", format!("{CT_BASE}.presentationml.slideLayout+xml")),
        ("/ppt/theme/theme1.xml", format!("{CT_BASE}.theme+xml")),
        ("/docProps/core.xml", "application/vnd.openxmlformats-package.core-properties+xml".to_string()),
        ("/docProps/app.xml", format!("{CT_BASE}.extended-properties+xml")),
    ];
    for (part, content_type) in &overrides {
        xml.empty("Override", &[("PartName", part), ("ContentType", content_type)])?;
    }

    let slide_type = format!("{CT_BASE}.presentationml.slide+xml");
    for n in 1..=slide_count {
        let part = format!("/ppt/slides/slide{n}.xml");
        xml.empty("Override", &[("PartName", &part), ("ContentType", &slide_type)])?;
    }

    xml.close("Types")?;
    Ok(xml.into_bytes())
}

fn presentation(slide_count: usize) -> Result<Vec<u8>> {
    let mut xml = XmlPart::new("PPTX")?;
    xml.open("p:presentation", &PRESENTATION_NS)?;

    xml.open("p:sldMasterIdLst", &[])?;
    xml.empty("p:sldMasterId", &[("id", "2147483648"), ("r:id", "rId1")])?;
    xml.close("p:sldMasterIdLst")?;

    xml.open("p:sldIdLst", &[])?;
    for n in 1..=slide_count {
        let id = (255 + n).to_string();
        let rel = format!("rId{}", n + 1);
        xml.empty("p:sldId", &[("id", &id), ("r:id", &rel)])?;
    }
    xml.close("p:sldIdLst")?;

    let (cx, cy) = (SLIDE_WIDTH_EMU.to_string(), SLIDE_HEIGHT_EMU.to_string());
    xml.empty("p:sldSz", &[("cx", &cx), ("cy", &cy)])?;
    xml.empty("p:notesSz", &[("cx", "6858000"), ("cy", "9144000")])?;

    xml.close("p:presentation")?;
    Ok(xml.into_bytes())
}

/// A relationships part; each entry is (id, type suffix, target)
fn relationships(entries: &[(String, &str, String)]) -> Result<Vec<u8>> {
    let mut xml = XmlPart::new("PPTX")?;
    xml.open("Relationships", &[("xmlns", NS_RELS)])?;
    for (id, kind, target) in entries {
        let kind = format!("{REL_BASE}/{kind}");
        xml.empty("Relationship", &[("Id", id), ("Type", &kind), ("Target", target)])?;
    }
    xml.close("Relationships")?;
    Ok(xml.into_bytes())
}

fn presentation_rels(slide_count: usize) -> Result<Vec<u8>> {
    let mut entries = vec![("rId1".to_string(), "slideMaster", "slideMasters/slideMaster1.xml".to_string())];
    entries.extend((1..=slide_count).map(|n| (format!("rId{}", n + 1), "slide", format!("slides/slide{n}.xml"))));
    entries.push((format!("rId{}", slide_count + 2), "theme", "theme/theme1.xml".to_string()));
    relationships(&entries)
}

fn slide_rels(n: usize) -> Result<Vec<u8>> {
    relationships(&[
        ("rId1".to_string(), "slideLayout", "../slideLayouts/slideLayout1.xml".to_string()),
        ("rId2".to_string(), "image", format!("../media/image{n}.jpeg")),
    ])
}

fn slide(n: usize) -> Result<Vec<u8>> {
    let mut xml = XmlPart::new("PPTX")?;
    xml.open("p:sld", &PRESENTATION_NS)?;
    xml.open("p:cSld", &[])?;
    xml.open("p:spTree", &[])?;

    xml.open("p:nvGrpSpPr", &[])?;
    xml.empty("p:cNvPr", &[("id", "1"), ("name", "")])?;
    xml.empty("p:cNvGrpSpPr", &[])?;
    xml.empty("p:nvPr", &[])?;
    xml.close("p:nvGrpSpPr")?;
    xml.empty("p:grpSpPr", &[])?;

    xml.open("p:pic", &[])?;
    xml.open("p:nvPicPr", &[])?;
    let name = format!("Slide Image {n}");
    xml.empty("p:cNvPr", &[("id", "2"), ("name", &name)])?;
    xml.empty("p:cNvPicPr", &[])?;
    xml.empty("p:nvPr", &[])?;
    xml.close("p:nvPicPr")?;

    xml.open("p:blipFill", &[])?;
    xml.empty("a:blip", &[("r:embed", "rId2")])?;
    xml.open("a:stretch", &[])?;
    xml.empty("a:fillRect", &[])?;
    xml.close("a:stretch")?;
    xml.close("p:blipFill")?;

    // Full bleed: the picture covers the whole canvas whatever its aspect ratio
    let (cx, cy) = (SLIDE_WIDTH_EMU.to_string(), SLIDE_HEIGHT_EMU.to_string());
    xml.open("p:spPr", &[])?;
    xml.open("a:xfrm", &[])?;
    xml.empty("a:off", &[("x", "0"), ("y", "0")])?;
    xml.empty("a:ext", &[("cx", &cx), ("cy", &cy)])?;
    xml.close("a:xfrm")?;
    xml.open("a:prstGeom", &[("prst", "rect")])?;
    xml.empty("a:avLst", &[])?;
    xml.close("a:prstGeom")?;
    xml.close("p:spPr")?;
    xml.close("p:pic")?;

    xml.close("p:spTree")?;
    xml.close("p:cSld")?;
    xml.open("p:clrMapOvr", &[])?;
    xml.empty("a:masterClrMapping", &[])?;
    xml.close("p:clrMapOvr")?;
    xml.close("p:sld")?;
    Ok(xml.into_bytes())
}

fn core_properties(info: &DocumentInfo<'_>) -> Result<Vec<u8>> {
    let mut xml = XmlPart::new("PPTX")?;
    xml.open(
        "cp:coreProperties",
        &[
            ("xmlns:cp", "http://schemas.openxmlformats.org/package/2006/metadata/core-properties"),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    xml.text_element("dc:title", info.title)?;
    xml.text_element("dc:creator", info.author)?;
    xml.close("cp:coreProperties")?;
    Ok(xml.into_bytes())
}

fn app_properties(slide_count: usize) -> Result<Vec<u8>> {
    let mut xml = XmlPart::new("PPTX")?;
    xml.open("Properties", &[("xmlns", "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties")])?;
    xml.text_element("Application", "deckgrab")?;
    xml.text_element("Slides", &slide_count.to_string())?;
    xml.close("Properties")?;
    Ok(xml.into_bytes())
}

fn add_file(zip: &mut ZipWriter<Cursor<Vec<u8>>>, name: &str, data: &[u8]) -> Result<()> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    zip.start_file(name, options).map_err(assembly_error)?;
    zip.write_all(data).map_err(assembly_error)
}

impl DocumentGenerator for PptxGenerator {
    fn format(&self) -> OutputFormat {
        OutputFormat::Pptx
    }

    fn generate(&self, images: &[CapturedImage], info: &DocumentInfo<'_>) -> Result<Vec<u8>> {
        let count = images.len();
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

        add_file(&mut zip, "[Content_Types].xml", &content_types(count)?)?;
        add_file(&mut zip, "_rels/.rels", include_bytes!("pptx_parts/root.rels"))?;
        add_file(&mut zip, "docProps/core.xml", &core_properties(info)?)?;
        add_file(&mut zip, "docProps/app.xml", &app_properties(count)?)?;
        add_file(&mut zip, "ppt/presentation.xml", &presentation(count)?)?;
        add_file(&mut zip, "ppt/_rels/presentation.xml.rels", &presentation_rels(count)?)?;
        add_file(&mut zip, "ppt/slideMasters/slideMaster1.xml", include_bytes!("pptx_parts/slideMaster1.xml"))?;
        add_file(&mut zip, "ppt/slideMasters/_rels/slideMaster1.xml.rels", include_bytes!("pptx_parts/slideMaster1.xml.rels"))?;
        add_file(&mut zip, "ppt/slideLayouts/slideLayout1.xml", include_bytes!("pptx_parts/slideLayout1.xml"))?;
        add_file(&mut zip, "ppt/slideLayouts/_rels/slideLayout1.xml.rels", include_bytes!("pptx_parts/slideLayout1.xml.rels"))?;
        add_file(&mut zip, "ppt/theme/theme1.xml", include_bytes!("pptx_parts/theme1.xml"))?;

        for (i, image) in images.iter().enumerate() {
            let n = i + 1;
            add_file(&mut zip, &format!("ppt/media/image{n}.jpeg"), &image.to_jpeg(JPEG_QUALITY)?)?;
            add_file(&mut zip, &format!("ppt/slides/slide{n}.xml"), &slide(n)?)?;
            add_file(&mut zip, &format!("ppt/slides/_rels/slide{n}.xml.rels"), &slide_rels(n)?)?;
        }

        let cursor = zip.finish().map_err(assembly_error)?;
        Ok(cursor.into_inner())
    }
}
