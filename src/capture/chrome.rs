use super::{flatten_onto, CaptureConfig, CaptureTarget, CapturedImage, Renderer};
use crate::{dom::ElementHandle,
            error::{DeckError, Result}};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use headless_chrome::{protocol::cdp::Page::{CaptureScreenshotFormatOption, Viewport},
                      Tab};
use std::sync::Arc;

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// [`Renderer`] built on CDP screenshots of a live tab
pub struct ChromeRenderer {
    tab: Arc<Tab>,
}

impl ChromeRenderer {
    pub fn new(tab: Arc<Tab>) -> Self {
        Self { tab }
    }

    /// Screenshot of the element's border box
    fn screenshot_element(&self, handle: &ElementHandle, config: &CaptureConfig) -> Result<Vec<u8>> {
        let elements = self
            .tab
            .find_elements(&handle.selector)
            .map_err(|e| DeckError::ElementNotFound(format!("Element '{}' not found: {}", handle.selector, e)))?;

        let element = elements.get(handle.index).ok_or_else(|| {
            DeckError::ElementNotFound(format!("No element #{} for '{}'", handle.index, handle.selector))
        })?;

        element.scroll_into_view().map_err(|e| DeckError::CaptureFailed(e.to_string()))?;

        let mut viewport =
            element.get_box_model().map_err(|e| DeckError::CaptureFailed(e.to_string()))?.border_viewport();
        viewport.scale = config.scale;

        self.screenshot(viewport)
    }

    fn screenshot(&self, clip: Viewport) -> Result<Vec<u8>> {
        self.tab
            .capture_screenshot(CaptureScreenshotFormatOption::Png, None, Some(clip), true)
            .map_err(|e| DeckError::CaptureFailed(e.to_string()))
    }

    /// Pixels of an `<img>` re-read through an anonymous-CORS canvas.
    ///
    /// `None` when the element is not an image or the canvas came back tainted.
    fn read_image(&self, handle: &ElementHandle, config: &CaptureConfig) -> Result<Option<Vec<u8>>> {
        let selector = serde_json::to_string(&handle.selector).map_err(|e| DeckError::EvaluationFailed(e.to_string()))?;
        let js = format!("({})({}, {}, {})", include_str!("read_image.js"), selector, handle.index, config.scale);

        let result = self.tab.evaluate(&js, true).map_err(|e| DeckError::EvaluationFailed(e.to_string()))?;

        let Some(data_url) = result.value.as_ref().and_then(|v| v.as_str()) else {
            return Ok(None);
        };

        let Some(encoded) = data_url.strip_prefix(PNG_DATA_URL_PREFIX) else {
            return Ok(None);
        };

        STANDARD.decode(encoded).map(Some).map_err(|e| DeckError::CaptureFailed(format!("Bad data URL: {}", e)))
    }

    fn render_element(&self, handle: &ElementHandle, config: &CaptureConfig) -> Result<Vec<u8>> {
        if config.use_cors {
            match self.read_image(handle, config) {
                Ok(Some(png)) => return Ok(png),
                Ok(None) => log::debug!("Canvas read unavailable for {:?}, taking a screenshot", handle),
                Err(e) => log::debug!("Canvas read failed for {:?}: {}", handle, e),
            }
        }

        self.screenshot_element(handle, config)
    }
}

impl Renderer for ChromeRenderer {
    fn render(&self, target: &CaptureTarget, config: &CaptureConfig) -> Result<CapturedImage> {
        let png = match target {
            CaptureTarget::Element(handle) => self.render_element(handle, config)?,
            CaptureTarget::FullPage { width, height } => self.screenshot(Viewport {
                x: 0.0,
                y: 0.0,
                width: f64::from(*width),
                height: f64::from(*height),
                scale: config.scale,
            })?,
        };

        let mut pixels = CapturedImage::from_png(&png)?.into_pixels();
        if let Some(background) = config.background {
            flatten_onto(&mut pixels, background);
        }
        let captured = CapturedImage::new(pixels);

        if config.logging {
            log::debug!("Rendered {:?} to {}x{}", target, captured.width(), captured.height());
        }

        Ok(captured)
    }
}
