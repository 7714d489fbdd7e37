//! deckgrab command line
//!
//! Opens a Slideshare or Scribd URL in Chrome, captures its slides or pages and
//! writes them out as a PDF or PPTX.

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use deckgrab::{site::{is_supported_url, normalize_url},
               BrowserSession, ChromeRenderer, ConnectionOptions, EventSink, Extractor, JobOutcome,
               JsonLinesSink, LaunchOptions, LogSink, OutputFormat, Preferences};
use std::{io::stdout, path::PathBuf};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Pdf,
    Pptx,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Pdf => OutputFormat::Pdf,
            Format::Pptx => OutputFormat::Pptx,
        }
    }
}

#[derive(Parser)]
#[command(name = "deckgrab")]
#[command(version)]
#[command(about = "Save Slideshare and Scribd documents as PDF or PPTX", long_about = None)]
struct Cli {
    /// Slideshare or Scribd URL (default: the last URL used)
    url: Option<String>,

    /// Output format (default: the saved preference, else pdf)
    #[arg(long, short = 'f', value_enum)]
    format: Option<Format>,

    /// Directory the document is written to
    #[arg(long, short = 'o', value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Launch browser in headed mode (default: headless)
    #[arg(long, short = 'H')]
    headed: bool,

    /// Path to custom browser executable
    #[arg(long, value_name = "PATH")]
    chrome_path: Option<PathBuf>,

    /// WebSocket endpoint URL of an already running browser
    #[arg(long, value_name = "URL")]
    ws_endpoint: Option<String>,

    /// Preferences file (default: deckgrab/deckgrab.json in the user config directory)
    #[arg(long, value_name = "PATH")]
    prefs: Option<PathBuf>,

    /// Print progress events to stdout as JSON lines
    #[arg(long)]
    events: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let prefs_path = cli.prefs.clone().unwrap_or_else(Preferences::default_path);
    let mut prefs = Preferences::load(&prefs_path)?;

    let Some(url) = cli.url.clone().or_else(|| prefs.last_url.clone()) else {
        bail!("No URL given and no previous URL saved");
    };
    let url = normalize_url(&url);
    if !is_supported_url(&url) {
        bail!("Please open a Slideshare or Scribd document ({})", url);
    }

    let format = cli.format.map(OutputFormat::from).unwrap_or(prefs.default_format);

    prefs.remember_job(&url, format);
    if let Err(e) = prefs.save(&prefs_path) {
        log::warn!("Could not save preferences: {}", e);
    }

    let session = match &cli.ws_endpoint {
        Some(ws_url) => BrowserSession::connect(ConnectionOptions::new(ws_url.clone()))?,
        None => {
            let mut options = LaunchOptions::new().headless(!cli.headed);
            if let Some(path) = &cli.chrome_path {
                options = options.chrome_path(path.clone());
            }
            BrowserSession::launch(options)?
        }
    };

    log::info!("Opening {}", url);
    let page = session.open_page(&url)?;
    let renderer = ChromeRenderer::new(page.tab().clone());

    let json_sink;
    let events: &dyn EventSink = if cli.events {
        json_sink = JsonLinesSink::new(stdout());
        &json_sink
    } else {
        &LogSink
    };

    let extractor = Extractor::new(&page, &renderer, events);
    let outcome = extractor.run(format);

    if cli.ws_endpoint.is_none() {
        if let Err(e) = session.close() {
            log::debug!("Closing tabs failed: {}", e);
        }
    }

    match outcome? {
        JobOutcome::Completed(report) => {
            let path = report
                .document
                .write_to(&cli.output_dir)
                .with_context(|| format!("Failed to write into {}", cli.output_dir.display()))?;
            log::info!("Saved {} ({} page(s))", path.display(), report.document.page_count);
            if report.failures > 0 {
                log::warn!("{} slide(s) could not be captured and were skipped", report.failures);
            }
        }
        JobOutcome::Busy => log::info!("An extraction is already running"),
    }

    Ok(())
}
