//! Per-action run loop
//!
//! One executor owns the runtime flags of a single action and drives its
//! unbounded plan/execute loop under cooperative pause/stop control. Stop is
//! observed at the top of each iteration and never interrupts a sleep in
//! progress; pause is observed between iterations and on each step's
//! emission guard.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::debug;

use crate::journal::Journal;
use crate::random::Randomness;
use crate::sink::{Sink, SinkError};

use super::{ActionDefinition, plan_iteration, render_timeline};

/// Idle sleep between pause checks while a loop is suspended
const PAUSE_TICK: Duration = Duration::from_secs(1);

/// Runtime flags shared between a run loop and its control handle
///
/// Single-writer discipline: control calls write `stopped` and `paused`, the
/// run loop only reads them.
#[derive(Debug, Default)]
struct ControlFlags {
    stopped: AtomicBool,
    paused: AtomicBool,
}

/// Cheap-clone control handle over a running executor
#[derive(Debug, Clone)]
pub struct ActionControls {
    run_always: bool,
    flags: Arc<ControlFlags>,
}

impl ActionControls {
    /// Suspend the loop; a non-forced pause leaves run-always actions alone
    pub fn pause(&self, force: bool) {
        if !self.run_always || force {
            self.flags.paused.store(true, Ordering::Relaxed);
        }
    }

    /// Lift a pause; a non-forced resume leaves run-always actions alone
    pub fn resume(&self, force: bool) {
        if !self.run_always || force {
            self.flags.paused.store(false, Ordering::Relaxed);
        }
    }

    /// Request termination, observed at the loop's next top-of-iteration
    /// check. An in-flight sleep or delivery is never interrupted.
    pub fn stop(&self) {
        self.flags.stopped.store(true, Ordering::Relaxed);
    }

    pub fn is_paused(&self) -> bool {
        self.flags.paused.load(Ordering::Relaxed)
    }

    pub fn is_stopped(&self) -> bool {
        self.flags.stopped.load(Ordering::Relaxed)
    }
}

/// Drives one action's unbounded emission loop
pub struct ActionExecutor {
    definition: Arc<ActionDefinition>,
    flags: Arc<ControlFlags>,
    rng: Box<dyn Randomness>,
}

impl ActionExecutor {
    pub fn new(definition: ActionDefinition, rng: Box<dyn Randomness>) -> Self {
        Self {
            definition: Arc::new(definition),
            flags: Arc::new(ControlFlags::default()),
            rng,
        }
    }

    /// Control handle usable while the run loop owns the executor
    pub fn controls(&self) -> ActionControls {
        ActionControls {
            run_always: self.definition.run_always,
            flags: Arc::clone(&self.flags),
        }
    }

    /// Drive the loop until stopped
    ///
    /// While paused the loop idles one tick at a time and keeps the
    /// first-iteration window armed, so the next real iteration kicks in on
    /// the start range again. Sink failures propagate to the caller; journal
    /// failures are logged and dropped.
    pub async fn run<S: Sink, J: Journal>(mut self, sink: S, journal: J) -> Result<(), SinkError> {
        let trigger = self.definition.trigger.clone();
        let mut first = true;

        loop {
            if self.flags.stopped.load(Ordering::Relaxed) {
                debug!(%trigger, "run: stop observed, exiting");
                return Ok(());
            }

            if self.flags.paused.load(Ordering::Relaxed) {
                first = true;
                tokio::time::sleep(PAUSE_TICK).await;
                continue;
            }

            let steps = plan_iteration(&self.definition, first, self.rng.as_mut());

            if let Err(error) = journal
                .record(&format!("planned iteration for '{}': {}", trigger, render_timeline(&steps)))
                .await
            {
                debug!(%trigger, %error, "run: journal write failed");
            }

            for step in &steps {
                // Negative waits happen when preparation time exceeds the
                // drawn window; they collapse to an immediate act.
                sleep_secs(step.wait_secs).await;

                if !step.payload.is_empty() && !self.flags.paused.load(Ordering::Relaxed) {
                    sink.begin_preparing().await?;
                    sleep_secs(step.prep_secs).await;
                    sink.deliver(&step.payload).await?;

                    if let Err(error) = journal
                        .record(&format!("delivered message {:?} for '{}'", step.payload, trigger))
                        .await
                    {
                        debug!(%trigger, %error, "run: journal write failed");
                    }
                }
            }

            first = false;
        }
    }
}

async fn sleep_secs(secs: i64) {
    if secs > 0 {
        tokio::time::sleep(Duration::from_secs(secs as u64)).await;
    }
}
