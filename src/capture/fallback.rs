use super::{CaptureConfig, CaptureTarget, CapturedImage, Renderer};
use crate::{dom::Page, error::Result};
use std::time::Duration;

/// Time given to lazy images after jumping to the top of the document
pub const FALLBACK_SETTLE: Duration = Duration::from_millis(1000);

/// Capture the whole document as one image.
///
/// Scrolls to the top, waits for rendering, renders viewport width x full
/// document height, and restores the previous scroll offset whether or not
/// the render succeeded. `on_settled` runs once the page has had time to paint.
pub fn screenshot_fallback(
    page: &dyn Page,
    renderer: &dyn Renderer,
    config: &CaptureConfig,
    on_settled: impl FnOnce(),
) -> Result<CapturedImage> {
    let original_offset = page.scroll_offset()?;

    page.scroll_to(0.0)?;
    page.settle(FALLBACK_SETTLE);
    on_settled();

    let result = page.metrics().and_then(|metrics| {
        let target = CaptureTarget::FullPage {
            width: metrics.viewport_width.round().max(1.0) as u32,
            height: metrics.full_height().round().max(1.0) as u32,
        };
        log::debug!("Full-page capture {:?} at scale {}", target, config.scale);
        renderer.render(&target, config)
    });

    if let Err(e) = page.scroll_to(original_offset) {
        log::warn!("Could not restore scroll position: {}", e);
    }

    result
}
