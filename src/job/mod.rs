//! Extraction orchestration
//!
//! [`Extractor`] runs one job at a time against a page: identify the site,
//! prepare the page, collect slide candidates, capture them (or fall back to a
//! whole-page screenshot) and assemble the result, reporting progress through
//! an [`EventSink`] as it goes.

pub mod events;
pub mod progress;

pub use events::{ChannelSink, EventSink, ExtractionEvent, JsonLinesSink, LogSink};
pub use progress::{interpolate, ProgressTracker};

use crate::{assemble::{assemble, DocumentGenerator, DocumentInfo, OutputDocument, OutputFormat},
            capture::{capture_sequence, screenshot_fallback, CapturedImage, Renderer},
            dom::{ElementNode, Page},
            error::{DeckError, Result},
            site::{collect_candidates, detect_layout, read_metadata, scribd, wait_for_slides, DeckMetadata,
                   SiteProfile, SCRIBD_PAGE_SELECTORS}};
use std::{cell::Cell, time::Duration};

/// Time a Scribd page gets to paint after being scrolled into view
const PAGE_SETTLE: Duration = Duration::from_millis(500);

/// Where a job is in its life
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Idle,
    Initializing,
    CollectingCandidates,
    Capturing,
    Assembling,
    Complete,
    Failed,
}

/// Working state of one extraction run
#[derive(Debug)]
pub struct ExtractionJob {
    pub format: OutputFormat,
    pub progress: ProgressTracker,
    /// Captures so far, in document order
    pub images: Vec<CapturedImage>,
    /// Candidates that failed to render
    pub failures: usize,
    pub used_fallback: bool,
}

impl ExtractionJob {
    pub fn new(format: OutputFormat) -> Self {
        Self { format, progress: ProgressTracker::new(), images: Vec::new(), failures: 0, used_fallback: false }
    }
}

/// Summary of a successful run
#[derive(Debug)]
pub struct JobReport {
    pub profile: SiteProfile,
    pub metadata: DeckMetadata,
    pub document: OutputDocument,
    pub failures: usize,
    pub used_fallback: bool,
}

/// What [`Extractor::run`] did
#[derive(Debug)]
pub enum JobOutcome {
    Completed(JobReport),
    /// Another job was already running on this page; nothing happened
    Busy,
}

/// Marks the page as busy for as long as it lives and returns it to idle when dropped
struct InFlightGuard<'a> {
    state: &'a Cell<JobState>,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(state: &'a Cell<JobState>) -> Option<Self> {
        if state.get() != JobState::Idle {
            return None;
        }
        state.set(JobState::Initializing);
        Some(Self { state })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.state.set(JobState::Idle);
    }
}

/// Runs extraction jobs against one page
pub struct Extractor<'a> {
    page: &'a dyn Page,
    renderer: &'a dyn Renderer,
    events: &'a dyn EventSink,
    generator: Option<&'a dyn DocumentGenerator>,
    state: Cell<JobState>,
    last_finished: Cell<Option<JobState>>,
}

impl<'a> Extractor<'a> {
    pub fn new(page: &'a dyn Page, renderer: &'a dyn Renderer, events: &'a dyn EventSink) -> Self {
        Self {
            page,
            renderer,
            events,
            generator: None,
            state: Cell::new(JobState::Idle),
            last_finished: Cell::new(None),
        }
    }

    /// Use `generator` instead of the one matching the requested format
    pub fn with_generator(mut self, generator: &'a dyn DocumentGenerator) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Current state; [`JobState::Idle`] between jobs
    pub fn state(&self) -> JobState {
        self.state.get()
    }

    /// How the most recent job ended ([`JobState::Complete`] or [`JobState::Failed`])
    pub fn last_finished(&self) -> Option<JobState> {
        self.last_finished.get()
    }

    /// Run one extraction. Returns [`JobOutcome::Busy`] without doing anything if
    /// a job is already in flight on this page.
    pub fn run(&self, format: OutputFormat) -> Result<JobOutcome> {
        let Some(_guard) = InFlightGuard::acquire(&self.state) else {
            log::info!("Extraction already in progress, ignoring request");
            return Ok(JobOutcome::Busy);
        };

        let mut job = ExtractionJob::new(format);

        match self.execute(&mut job) {
            Ok(report) => {
                self.finish(JobState::Complete);
                log::info!(
                    "Successfully downloaded {} page(s) as {}: {}",
                    report.document.page_count,
                    format.label(),
                    report.document.file_name
                );
                self.events.emit(ExtractionEvent::DownloadComplete { filename: report.document.file_name.clone() });
                Ok(JobOutcome::Completed(report))
            }
            Err(e) => {
                self.finish(JobState::Failed);
                log::error!("Extraction failed: {}", e);
                self.events.emit(ExtractionEvent::DownloadError { error: e.to_string() });
                Err(e)
            }
        }
    }

    fn execute(&self, job: &mut ExtractionJob) -> Result<JobReport> {
        self.report(job, 10);

        let url = self.page.url()?;
        let profile = SiteProfile::from_url(&url).ok_or_else(|| DeckError::UnsupportedSite(url.clone()))?;
        log::info!("Starting {} extraction from {} ({})", job.format.label(), profile, url);

        self.transition(JobState::CollectingCandidates);
        self.report(job, 20);

        if profile == SiteProfile::Scribd {
            scribd::ensure_not_premium(self.page)?;
            let expanded = scribd::expand_content(self.page)?;
            log::debug!("Expanded {} collapsed section(s)", expanded);
            scribd::auto_scroll(self.page)?;
        }

        let mut metadata = read_metadata(self.page, profile)?;
        self.report(job, 30);

        let candidates = self.candidates(profile)?;
        if profile == SiteProfile::Slideshare && metadata.declared_count.is_none() {
            metadata.declared_count = u32::try_from(candidates.len()).ok();
        }
        log::info!(
            "\"{}\" by {}: {} candidate(s), page reports {:?}",
            metadata.title,
            metadata.author,
            candidates.len(),
            metadata.declared_count
        );

        self.transition(JobState::Capturing);
        self.report(job, 40);

        if candidates.is_empty() {
            log::info!("No structured slides found, capturing the whole page");
            let image = screenshot_fallback(self.page, self.renderer, &profile.fallback_config(), || {
                self.report(job, 60)
            })
            .map_err(|e| {
                log::warn!("Full-page capture failed: {}", e);
                DeckError::NoSlidesCaptured
            })?;
            job.images.push(image);
            job.used_fallback = true;
        } else {
            let settle = (profile == SiteProfile::Scribd).then_some(PAGE_SETTLE);
            let captured =
                capture_sequence(self.page, self.renderer, &candidates, &profile.capture_config(), settle, |done, total| {
                    self.report(job, interpolate(40, 80, done, total))
                });
            job.images = captured.images;
            job.failures = captured.failures;
        }

        self.report(job, 80);

        self.transition(JobState::Assembling);
        let info = DocumentInfo { title: &metadata.title, author: &metadata.author };
        let document = match self.generator {
            Some(generator) => assemble(&job.images, &info, generator)?,
            None => assemble(&job.images, &info, job.format.generator().as_ref())?,
        };

        self.report(job, 100);

        Ok(JobReport { profile, metadata, document, failures: job.failures, used_fallback: job.used_fallback })
    }

    /// Slide candidates for the page, empty when the whole-page fallback should run
    fn candidates(&self, profile: SiteProfile) -> Result<Vec<ElementNode>> {
        match profile {
            SiteProfile::Slideshare => {
                let layout = detect_layout(self.page)?;
                wait_for_slides(self.page, layout)
            }
            SiteProfile::Scribd => collect_candidates(self.page, SCRIBD_PAGE_SELECTORS),
        }
    }

    fn report(&self, job: &mut ExtractionJob, percent: u8) {
        if let Some(progress) = job.progress.advance(percent) {
            self.events.emit(ExtractionEvent::DownloadProgress { progress });
        }
    }

    fn transition(&self, next: JobState) {
        log::debug!("Job state {:?} -> {:?}", self.state.get(), next);
        self.state.set(next);
    }

    fn finish(&self, terminal: JobState) {
        self.transition(terminal);
        self.last_finished.set(Some(terminal));
    }
}
