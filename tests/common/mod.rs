//! In-memory collaborators for driving the extractor without a browser

#![allow(dead_code)]

use deckgrab::{CaptureConfig, CaptureTarget, CapturedImage, DeckError, DocumentGenerator, DocumentInfo,
               DocumentMetrics, ElementHandle, ElementNode, EventSink, ExtractionEvent, OutputFormat, Page, Renderer,
               Result};
use image::{Rgba, RgbaImage};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::{cell::{Cell, RefCell},
          collections::{HashMap, HashSet},
          sync::Mutex,
          thread::{self, ThreadId},
          time::Duration};

pub const SLIDESHARE_URL: &str = "https://www.slideshare.net/jdoe/quarterly-review";
pub const SCRIBD_URL: &str = "https://www.scribd.com/document/123456/annual-report";

/// Page whose DOM is a fixed selector -> elements table
#[derive(Default)]
pub struct StaticPage {
    url: String,
    elements: HashMap<String, Vec<ElementNode>>,
    metrics: DocumentMetrics,
    scroll: Cell<f64>,
    pub clicks: RefCell<Vec<ElementHandle>>,
    pub waits: RefCell<Vec<Duration>>,
    sized_after: usize,
}

impl StaticPage {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            metrics: DocumentMetrics {
                body_scroll_height: 3000.0,
                html_scroll_height: 3200.0,
                viewport_width: 1280.0,
                viewport_height: 800.0,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn with(mut self, selector: &str, nodes: Vec<ElementNode>) -> Self {
        self.elements.insert(selector.to_string(), nodes);
        self
    }

    pub fn with_text(self, selector: &str, text: &str) -> Self {
        self.with(selector, vec![ElementNode::new("span").with_text(text)])
    }

    pub fn with_scroll(self, y: f64) -> Self {
        self.scroll.set(y);
        self
    }

    /// Images report a zero size, as while still loading, until `settles` waits have passed
    pub fn loading_for(mut self, settles: usize) -> Self {
        self.sized_after = settles;
        self
    }

    pub fn scroll(&self) -> f64 {
        self.scroll.get()
    }
}

impl Page for StaticPage {
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
            .map(|node| if loading && node.tag_name == "img" { node.with_natural_size(0, 0) } else { node })
            .enumerate()
            .map(|(index, node)| node.with_handle(ElementHandle::new(selector, index)))
            .collect())
    }

    fn click(&self, handle: &ElementHandle) -> Result<()> {
        self.clicks.borrow_mut().push(handle.clone());
        Ok(())
    }

    fn scroll_offset(&self) -> Result<f64> {
        Ok(self.scroll.get())
    }

    fn scroll_to(&self, y: f64) -> Result<()> {
        self.scroll.set(y);
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

/// A slide-sized image element
pub fn slide(n: usize) -> ElementNode {
    ElementNode::new("img")
        .with_attribute("src", format!("https://image.slidesharecdn.com/deck/95/slide-{}-1024.jpg", n))
        .with_attribute("class", "slide-image")
        .with_attribute("alt", format!("Slide {}", n))
        .with_natural_size(1024, 768)
}

pub fn slides(count: usize) -> Vec<ElementNode> {
    (1..=count).map(slide).collect()
}

/// Renders solid images; elements whose index is listed fail
#[derive(Default)]
pub struct SolidRenderer {
    failing: HashSet<usize>,
    fail_full_page: bool,
    pub rendered: RefCell<Vec<CaptureTarget>>,
}

impl SolidRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_at(mut self, indices: &[usize]) -> Self {
        self.failing.extend(indices.iter().copied());
        self
    }

    pub fn failing_full_page(mut self) -> Self {
        self.fail_full_page = true;
        self
    }
}

impl Renderer for SolidRenderer {
    fn render(&self, target: &CaptureTarget, _config: &CaptureConfig) -> Result<CapturedImage> {
        self.rendered.borrow_mut().push(target.clone());

        let (width, height) = match target {
            CaptureTarget::Element(handle) if self.failing.contains(&handle.index) => {
                return Err(DeckError::CaptureFailed(format!("slide {} did not render", handle.index)));
            }
            CaptureTarget::Element(_) => (64, 48),
            CaptureTarget::FullPage { .. } if self.fail_full_page => {
                return Err(DeckError::CaptureFailed("screenshot timed out".to_string()));
            }
            CaptureTarget::FullPage { width, height } => (*width / 20, *height / 20),
        };

        Ok(CapturedImage::new(RgbaImage::from_pixel(width, height, Rgba([20, 40, 80, 255]))))
    }
}

/// Collects every event
#[derive(Default)]
pub struct RecordingSink {
    pub events: RefCell<Vec<ExtractionEvent>>,
}

impl RecordingSink {
    pub fn progress(&self) -> Vec<u8> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                ExtractionEvent::DownloadProgress { progress } => Some(*progress),
                _ => None,
            })
            .collect()
    }

    pub fn last(&self) -> Option<ExtractionEvent> {
        self.events.borrow().last().cloned()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: ExtractionEvent) {
        self.events.borrow_mut().push(event);
    }
}

/// Generator that always fails
pub struct BrokenGenerator;

impl DocumentGenerator for BrokenGenerator {
    fn format(&self) -> OutputFormat {
        OutputFormat::Pdf
    }

    fn generate(&self, _images: &[CapturedImage], _info: &DocumentInfo<'_>) -> Result<Vec<u8>> {
        Err(DeckError::AssemblyFailed { format: "PDF", reason: "disk full".to_string() })
    }
}

/// Logger keeping every record, tagged with the thread that logged it
struct CaptureLogger {
    records: Mutex<Vec<(ThreadId, Level, String)>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        let entry = (thread::current().id(), record.level(), record.args().to_string());
        self.records.lock().unwrap().push(entry);
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger { records: Mutex::new(Vec::new()) };

/// Route `log` output to the in-memory logger. Safe to call from every test.
pub fn capture_logs() {
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(LevelFilter::Debug);
}

/// Messages logged at `level` by the calling test's thread
pub fn logged(level: Level) -> Vec<String> {
    let current = thread::current().id();
    LOGGER
        .records
        .lock()
        .unwrap()
        .iter()
        .filter(|(thread, lvl, _)| *thread == current && *lvl == level)
        .map(|(_, _, message)| message.clone())
        .collect()
}
