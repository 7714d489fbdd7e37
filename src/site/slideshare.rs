//! Waiting for a Slideshare player to finish loading its slide images

use super::{collect_candidates, filter::is_slide_image, LayoutVariant};
use crate::{dom::{ElementNode, Page},
            error::Result};
use std::time::Duration;

/// Extra looks taken when no loaded slide image is found
pub const SLIDE_POLL_ATTEMPTS: usize = 20;
pub const SLIDE_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Collect and filter the layout's slide images, looking again every
/// [`SLIDE_POLL_INTERVAL`] while none pass the filter.
///
/// Images that have not loaded yet report a zero intrinsic size and are
/// rejected, so an early look can come back empty. After
/// [`SLIDE_POLL_ATTEMPTS`] waits the last (empty) result is returned and the
/// caller falls back to a whole-page capture.
pub fn wait_for_slides(page: &dyn Page, layout: LayoutVariant) -> Result<Vec<ElementNode>> {
    let mut attempt = 0;
    loop {
        let found = collect_candidates(page, layout.slide_selectors())?;
        let total = found.len();
        let slides: Vec<ElementNode> = found.into_iter().filter(is_slide_image).collect();
        log::debug!("Layout {:?}: kept {} of {} image(s)", layout, slides.len(), total);

        if !slides.is_empty() || attempt >= SLIDE_POLL_ATTEMPTS {
            return Ok(slides);
        }

        attempt += 1;
        page.settle(SLIDE_POLL_INTERVAL);
    }
}
