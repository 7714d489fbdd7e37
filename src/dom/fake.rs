//! In-memory [`Page`] for unit tests

use super::{DocumentMetrics, ElementHandle, ElementNode, Page};
use crate::error::{DeckError, Result};
use std::{cell::{Cell, RefCell},
          collections::HashMap,
          time::Duration};

#[derive(Default)]
pub struct FakePage {
    pub url: String,
    pub elements: HashMap<String, Vec<ElementNode>>,
    pub metrics: DocumentMetrics,
    pub scroll: Cell<f64>,
    pub clicks: RefCell<Vec<ElementHandle>>,
    pub scrolls: RefCell<Vec<f64>>,
    pub waits: RefCell<Vec<Duration>>,
    /// Elements report a zero size until this many settles have happened
    pub sized_after: usize,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = url.to_string();
        self
    }

    /// `count` generic elements for `selector`
    pub fn with_elements(self, selector: &str, count: usize) -> Self {
        let nodes = (0..count).map(|_| ElementNode::new("div").with_natural_size(800, 600)).collect();
        self.with_nodes(selector, nodes)
    }

    pub fn with_nodes(mut self, selector: &str, nodes: Vec<ElementNode>) -> Self {
        self.elements.insert(selector.to_string(), nodes);
        self
    }

    pub fn with_metrics(mut self, metrics: DocumentMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_scroll(self, y: f64) -> Self {
        self.scroll.set(y);
        self
    }

    pub fn with_sizes_after(mut self, settles: usize) -> Self {
        self.sized_after = settles;
        self
    }
}

impl Page for FakePage {
    fn url(&self) -> Result<String> {
        Ok(self.url.clone())
    }

    fn query_all(&self, selector: &str) -> Result<Vec<ElementNode>> {
        let loading = self.waits.borrow().len() < self.sized_after;
        Ok(self
            .elements
            .get(selector)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, node)| {
                let node = if loading { node.with_natural_size(0, 0) } else { node };
                node.with_handle(ElementHandle::new(selector, index))
            })
            .collect())
    }

    fn click(&self, handle: &ElementHandle) -> Result<()> {
        if handle.selector.contains("broken") {
            return Err(DeckError::EvaluationFailed("detached node".to_string()));
        }
        self.clicks.borrow_mut().push(handle.clone());
        Ok(())
    }

    fn scroll_offset(&self) -> Result<f64> {
        Ok(self.scroll.get())
    }

    fn scroll_to(&self, y: f64) -> Result<()> {
        self.scroll.set(y);
        self.scrolls.borrow_mut().push(y);
        Ok(())
    }

    fn scroll_into_view(&self, _handle: &ElementHandle) -> Result<()> {
        Ok(())
    }

    fn metrics(&self) -> Result<DocumentMetrics> {
        Ok(self.metrics)
    }

    fn settle(&self, duration: Duration) {
        self.waits.borrow_mut().push(duration);
    }
}
