//! Best-effort activity journal
//!
//! Executors write one journal line when an iteration's timeline is planned
//! and one after each successful delivery. Journal failures never affect loop
//! progress; executors log them at debug level and move on.

use async_trait::async_trait;
use eyre::Result;
use tracing::info;

/// Per-loop journal capability
#[async_trait]
pub trait Journal: Send + Sync {
    /// Record one journal line
    async fn record(&self, message: &str) -> Result<()>;
}

/// Journal that forwards lines to the tracing subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingJournal;

#[async_trait]
impl Journal for TracingJournal {
    async fn record(&self, message: &str) -> Result<()> {
        info!(target: "actiond::journal", "{}", message);
        Ok(())
    }
}
