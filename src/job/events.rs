use serde::{Deserialize, Serialize};
use std::{io::Write,
          sync::{mpsc::Sender, Mutex}};

/// Status messages sent from the extraction to whoever is watching.
///
/// Serialized as `{"type": "DOWNLOAD_PROGRESS", "progress": 40}` and so on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExtractionEvent {
    DownloadProgress { progress: u8 },
    DownloadComplete { filename: String },
    DownloadError { error: String },
}

/// One-way event delivery. Emitting never fails and nothing is acknowledged.
pub trait EventSink {
    fn emit(&self, event: ExtractionEvent);
}

/// Writes events to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&self, event: ExtractionEvent) {
        match event {
            ExtractionEvent::DownloadProgress { progress } => log::info!("Progress: {}%", progress),
            ExtractionEvent::DownloadComplete { filename } => log::info!("Successfully downloaded: {}", filename),
            ExtractionEvent::DownloadError { error } => log::error!("Download failed: {}", error),
        }
    }
}

/// Forwards events over a channel; a dropped receiver is ignored
pub struct ChannelSink {
    sender: Sender<ExtractionEvent>,
}

impl ChannelSink {
    pub fn new(sender: Sender<ExtractionEvent>) -> Self {
        Self { sender }
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, event: ExtractionEvent) {
        let _ = self.sender.send(event);
    }
}

/// Writes one JSON object per line
pub struct JsonLinesSink<W: Write> {
    writer: Mutex<W>,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer: Mutex::new(writer) }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write> EventSink for JsonLinesSink<W> {
    fn emit(&self, event: ExtractionEvent) {
        let Ok(mut writer) = self.writer.lock() else {
            return;
        };

        let written = serde_json::to_writer(&mut *writer, &event)
            .map_err(std::io::Error::from)
            .and_then(|()| writeln!(writer))
            .and_then(|()| writer.flush());

        if let Err(e) = written {
            log::debug!("Dropped event {:?}: {}", event, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_event_wire_shape() {
        let progress = serde_json::to_value(ExtractionEvent::DownloadProgress { progress: 40 }).unwrap();
        assert_eq!(progress, serde_json::json!({"type": "DOWNLOAD_PROGRESS", "progress": 40}));

        let error: ExtractionEvent =
            serde_json::from_str(r#"{"type": "DOWNLOAD_ERROR", "error": "No slides captured"}"#).unwrap();
        assert_eq!(error, ExtractionEvent::DownloadError { error: "No slides captured".to_string() });
    }

    #[test]
    fn test_channel_sink_ignores_closed_receiver() {
        let (tx, rx) = mpsc::channel();
        let sink = ChannelSink::new(tx);

        sink.emit(ExtractionEvent::DownloadProgress { progress: 10 });
        assert_eq!(rx.recv().unwrap(), ExtractionEvent::DownloadProgress { progress: 10 });

        drop(rx);
        sink.emit(ExtractionEvent::DownloadProgress { progress: 20 });
    }

    #[test]
    fn test_json_lines_sink() {
        let sink = JsonLinesSink::new(Vec::new());
        sink.emit(ExtractionEvent::DownloadProgress { progress: 100 });
        sink.emit(ExtractionEvent::DownloadComplete { filename: "deck.pdf".to_string() });

        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            output,
            "{\"type\":\"DOWNLOAD_PROGRESS\",\"progress\":100}\n{\"type\":\"DOWNLOAD_COMPLETE\",\"filename\":\"deck.pdf\"}\n"
        );
    }
}
