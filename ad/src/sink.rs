//! Delivery capability
//!
//! A sink performs the actual emission for one action loop: the "preparing"
//! signal shown before a message, then the message itself. Executors do not
//! catch or retry sink failures; they propagate to whoever spawned the loop.

use async_trait::async_trait;
use colored::Colorize;
use thiserror::Error;
use tracing::debug;

/// Errors surfaced by a sink
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("preparing signal failed: {0}")]
    Preparing(String),

    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Per-loop delivery capability
#[async_trait]
pub trait Sink: Send + Sync {
    /// Signal that a message is about to be emitted
    async fn begin_preparing(&self) -> Result<(), SinkError>;

    /// Emit the payload
    async fn deliver(&self, payload: &str) -> Result<(), SinkError>;
}

/// Sink that renders messages to stdout, one line per configured channel
pub struct ConsoleSink {
    channels: Vec<String>,
}

impl ConsoleSink {
    pub fn new(channels: Vec<String>) -> Self {
        Self { channels }
    }

    fn lines(&self, body: &str) -> Vec<String> {
        if self.channels.is_empty() {
            return vec![body.to_string()];
        }
        self.channels
            .iter()
            .map(|channel| format!("{} {}", format!("#{channel}").cyan().bold(), body))
            .collect()
    }
}

#[async_trait]
impl Sink for ConsoleSink {
    async fn begin_preparing(&self) -> Result<(), SinkError> {
        debug!(channels = ?self.channels, "ConsoleSink::begin_preparing");
        for line in self.lines(&"typing...".dimmed().italic().to_string()) {
            println!("{line}");
        }
        Ok(())
    }

    async fn deliver(&self, payload: &str) -> Result<(), SinkError> {
        debug!(channels = ?self.channels, payload, "ConsoleSink::deliver");
        for line in self.lines(payload) {
            println!("{line}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_console_sink_accepts_delivery() {
        let sink = ConsoleSink::new(vec!["general".to_string()]);
        sink.begin_preparing().await.unwrap();
        sink.deliver("hi").await.unwrap();
    }

    #[test]
    fn test_console_sink_renders_one_line_per_channel() {
        let sink = ConsoleSink::new(vec!["general".to_string(), "random".to_string()]);
        let lines = sink.lines("hi");
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("#general"));
        assert!(lines[1].contains("#random"));
    }

    #[test]
    fn test_console_sink_without_channels_renders_bare_payload() {
        let sink = ConsoleSink::new(vec![]);
        assert_eq!(sink.lines("hi"), vec!["hi".to_string()]);
    }
}
