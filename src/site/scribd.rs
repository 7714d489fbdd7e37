//! Page preparation for Scribd documents: paywall check, expanding collapsed
//! documents and scrolling through lazily loaded pages

use crate::{dom::Page,
            error::{DeckError, Result}};
use std::time::Duration;

/// Any of these means the document is behind a paywall
pub const PREMIUM_SELECTORS: &[&str] =
    &[".premium_banner", ".paywall", ".subscription_required", "[data-testid=\"premium_content\"]"];

/// "Read more" style controls that reveal the rest of the document
pub const EXPAND_SELECTOR: &str =
    ".expand_document, .read_more, .show_full_document, [data-testid=\"expand_content\"]";

const EXPAND_SETTLE: Duration = Duration::from_millis(1000);
const SCROLL_STEP_SETTLE: Duration = Duration::from_millis(300);
const SCROLL_RESET_SETTLE: Duration = Duration::from_millis(500);

/// Fail with [`DeckError::PremiumContent`] when a paywall marker is present
pub fn ensure_not_premium(page: &dyn Page) -> Result<()> {
    for selector in PREMIUM_SELECTORS {
        if page.exists(selector)? {
            log::warn!("Paywall marker '{}' present", selector);
            return Err(DeckError::PremiumContent);
        }
    }
    Ok(())
}

/// Click every expand control, waiting after each. Returns how many clicks landed.
pub fn expand_content(page: &dyn Page) -> Result<usize> {
    let mut expanded = 0;

    for button in page.query_all(EXPAND_SELECTOR)? {
        match page.click(&button.handle) {
            Ok(()) => {
                expanded += 1;
                page.settle(EXPAND_SETTLE);
            }
            Err(e) => log::warn!("Could not expand content: {}", e),
        }
    }

    Ok(expanded)
}

/// Walk down the document in steps of 80% of the viewport so lazy pages load,
/// then return to the top
pub fn auto_scroll(page: &dyn Page) -> Result<()> {
    let metrics = page.metrics()?;
    let total_height = metrics.body_scroll_height;
    let step = metrics.viewport_height * 0.8;

    if step > 0.0 {
        let mut position = 0.0;
        while position < total_height {
            page.scroll_to(position)?;
            page.settle(SCROLL_STEP_SETTLE);
            position += step;
        }
    }

    page.scroll_to(0.0)?;
    page.settle(SCROLL_RESET_SETTLE);
    Ok(())
}
