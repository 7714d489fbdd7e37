use crate::{dom::{ElementNode, Page},
            error::Result};

/// Return the matches of the first selector that finds anything.
///
/// Later selectors are never consulted once one matches, so results are never
/// merged. An empty result means no selector matched.
pub fn collect_candidates(page: &dyn Page, selectors: &[&str]) -> Result<Vec<ElementNode>> {
    for selector in selectors {
        let found = page.query_all(selector)?;
        log::debug!("Selector '{}' matched {} element(s)", selector, found.len());

        if !found.is_empty() {
            return Ok(found);
        }
    }

    Ok(Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::fake::FakePage;

    #[test]
    fn test_first_non_empty_selector_wins() {
        let page = FakePage::new().with_elements(".b img", 3).with_elements(".c img", 5);

        let found = collect_candidates(&page, &[".a img", ".b img", ".c img"]).unwrap();

        assert_eq!(found.len(), 3);
        assert!(found.iter().all(|e| e.handle.selector == ".b img"));
        assert_eq!(found.iter().map(|e| e.handle.index).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_nothing_matches() {
        let page = FakePage::new().with_elements(".unrelated", 2);
        assert!(collect_candidates(&page, &[".a", ".b"]).unwrap().is_empty());
    }
}
