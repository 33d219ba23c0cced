//! Iteration timeline planning
//!
//! Converts an action definition into the ordered wait/act steps of one loop
//! iteration. Planning is pure apart from the injected randomness: no I/O, no
//! clock reads, and a fresh step list on every call.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::random::Randomness;

use super::ActionDefinition;

/// Wait window, in seconds, for every step after the first
const FOLLOWUP_WINDOW: (i64, i64) = (2, 4);

/// One wait-then-optionally-emit instruction of an iteration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimedStep {
    /// Seconds to sleep before acting. May be negative when the preparation
    /// time exceeds the drawn window; executors clamp to zero.
    pub wait_secs: i64,

    /// Seconds spent in the preparing state before emission; 0 for pure waits
    pub prep_secs: i64,

    /// Payload text; empty means a pure wait
    pub payload: String,
}

impl TimedStep {
    fn pure_wait(secs: i64) -> Self {
        Self {
            wait_secs: secs,
            prep_secs: 0,
            payload: String::new(),
        }
    }
}

impl fmt::Display for TimedStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(sleep:{}s, prep:{}s, msg:{:?})", self.wait_secs, self.prep_secs, self.payload)
    }
}

/// Render a planned timeline as a single journal-friendly line
pub fn render_timeline(steps: &[TimedStep]) -> String {
    let rendered: Vec<String> = steps.iter().map(ToString::to_string).collect();
    format!("[{}]", rendered.join(", "))
}

/// Seconds of preparing state for a payload, proportional to its length
fn preparation_secs(message: &str) -> i64 {
    message.chars().count() as i64 / 10 + 1
}

/// Plan the timeline of one loop iteration
///
/// The iteration as a whole fires with the definition's execution
/// probability; a skipped iteration degrades to a single pure wait covering
/// the nominal loop time. When it fires, each sequence step rolls its own
/// probability, the first step's wait is drawn from the start window
/// (`is_first`) or the steady-state window, and later steps use the fixed
/// follow-up window. Preparation time is subtracted from each drawn wait and
/// does not count toward the loop time.
///
/// Steps are padded with a trailing pure wait up to the nominal loop time.
/// An iteration whose steps already meet or exceed it gets no pad and simply
/// runs long.
pub fn plan_iteration(
    definition: &ActionDefinition,
    is_first: bool,
    rng: &mut dyn Randomness,
) -> Vec<TimedStep> {
    if !rng.bernoulli(definition.execution_probability) {
        debug!(trigger = %definition.trigger, "plan_iteration: iteration skipped");
        return vec![TimedStep::pure_wait(definition.loop_time_secs)];
    }

    let (range_min, range_max) = if is_first {
        definition.start_range_secs
    } else {
        definition.loop_range_secs
    };

    let mut steps = Vec::new();
    let mut total_secs = 0;

    for (idx, item) in definition.sequence.iter().enumerate() {
        if !rng.bernoulli(item.execution_probability) {
            continue;
        }

        let prep_secs = preparation_secs(&item.message);
        let wait_secs = if idx == 0 {
            rng.uniform_int(range_min, range_max) - prep_secs
        } else {
            rng.uniform_int(FOLLOWUP_WINDOW.0, FOLLOWUP_WINDOW.1) - prep_secs
        };

        total_secs += wait_secs;
        steps.push(TimedStep {
            wait_secs,
            prep_secs,
            payload: item.message.clone(),
        });
    }

    let remaining_secs = definition.loop_time_secs - total_secs;
    if remaining_secs > 0 {
        steps.push(TimedStep::pure_wait(remaining_secs));
    }

    debug!(
        trigger = %definition.trigger,
        is_first,
        steps = steps.len(),
        "plan_iteration: timeline planned"
    );
    steps
}
