//! Turning DOM elements into bitmaps
//!
//! Rendering itself is delegated to a [`Renderer`]; this module sequences the
//! captures, tolerates individual failures and provides the whole-page
//! [`fallback`].

pub mod chrome;
pub mod fallback;

pub use chrome::ChromeRenderer;
pub use fallback::screenshot_fallback;

use crate::{dom::{ElementHandle, ElementNode, Page},
            error::Result};
use image::{codecs::jpeg::JpegEncoder, ColorType, ImageFormat, Rgba, RgbaImage};
use std::time::Duration;

/// A rendered bitmap with its pixel dimensions
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedImage {
    pixels: RgbaImage,
}

impl CapturedImage {
    pub fn new(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    /// Decode a PNG screenshot
    pub fn from_png(bytes: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory_with_format(bytes, ImageFormat::Png)?;
        Ok(Self::new(decoded.to_rgba8()))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_pixels(self) -> RgbaImage {
        self.pixels
    }

    /// Encode as baseline JPEG; alpha is dropped
    pub fn to_jpeg(&self, quality: u8) -> Result<Vec<u8>> {
        let rgb = image::DynamicImage::ImageRgba8(self.pixels.clone()).to_rgb8();
        let mut out = Vec::new();
        JpegEncoder::new_with_quality(&mut out, quality).encode(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            ColorType::Rgb8,
        )?;
        Ok(out)
    }
}

/// How a capture is rendered
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureConfig {
    /// Device pixel ratio used for rendering
    pub scale: f64,

    /// Colour composited under transparent pixels; `None` keeps transparency
    pub background: Option<[u8; 3]>,

    /// Re-read `<img>` pixels through an anonymous-CORS canvas before falling back to a screenshot
    pub use_cors: bool,

    /// Log every render call
    pub logging: bool,
}

impl CaptureConfig {
    pub fn new(scale: f64) -> Self {
        Self { scale, background: None, use_cors: true, logging: false }
    }

    pub fn background(mut self, rgb: [u8; 3]) -> Self {
        self.background = Some(rgb);
        self
    }

    pub fn use_cors(mut self, use_cors: bool) -> Self {
        self.use_cors = use_cors;
        self
    }

    pub fn logging(mut self, logging: bool) -> Self {
        self.logging = logging;
        self
    }
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// What to render
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureTarget {
    /// A single element
    Element(ElementHandle),
    /// The document from its top-left corner, `width` x `height` CSS pixels
    FullPage { width: u32, height: u32 },
}

/// Renders a target to a bitmap
pub trait Renderer {
    fn render(&self, target: &CaptureTarget, config: &CaptureConfig) -> Result<CapturedImage>;
}

/// Captures gathered from a list of candidates
#[derive(Debug, Default)]
pub struct CaptureReport {
    /// Successful captures, in candidate order
    pub images: Vec<CapturedImage>,
    /// Candidates that could not be rendered
    pub failures: usize,
}

/// Capture candidates one at a time in document order.
///
/// A candidate that fails to render is logged and skipped. With `scroll_settle`
/// set, each candidate is scrolled into view and given that long to paint.
/// `on_progress(done, total)` runs after every candidate.
pub fn capture_sequence(
    page: &dyn Page,
    renderer: &dyn Renderer,
    candidates: &[ElementNode],
    config: &CaptureConfig,
    scroll_settle: Option<Duration>,
    mut on_progress: impl FnMut(usize, usize),
) -> CaptureReport {
    let mut report = CaptureReport::default();
    let total = candidates.len();

    for (i, candidate) in candidates.iter().enumerate() {
        match capture_one(page, renderer, candidate, config, scroll_settle) {
            Ok(image) => report.images.push(image),
            Err(e) => {
                log::warn!("Failed to capture slide {} of {}: {}", i + 1, total, e);
                report.failures += 1;
            }
        }
        on_progress(i + 1, total);
    }

    report
}

fn capture_one(
    page: &dyn Page,
    renderer: &dyn Renderer,
    candidate: &ElementNode,
    config: &CaptureConfig,
    scroll_settle: Option<Duration>,
) -> Result<CapturedImage> {
    if let Some(settle) = scroll_settle {
        page.scroll_into_view(&candidate.handle)?;
        page.settle(settle);
    }

    renderer.render(&CaptureTarget::Element(candidate.handle.clone()), config)
}

/// Composite `image` onto an opaque background colour
pub fn flatten_onto(image: &mut RgbaImage, background: [u8; 3]) {
    for pixel in image.pixels_mut() {
        let Rgba([r, g, b, a]) = *pixel;
        let alpha = u16::from(a);
        let blend = |fg: u8, bg: u8| ((u16::from(fg) * alpha + u16::from(bg) * (255 - alpha) + 127) / 255) as u8;
        *pixel = Rgba([blend(r, background[0]), blend(g, background[1]), blend(b, background[2]), 255]);
    }
}
