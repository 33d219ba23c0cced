//! Declarative action definitions
//!
//! The typed shape of one action: its trigger word, delivery channels, timing
//! ranges, and the weighted message sequence executed each iteration.
//! Definitions are parsed once from configuration and never mutated.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors found when validating an action definition
///
/// A loop must not start with an invalid definition, so these are surfaced
/// before the executor is spawned.
#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("action '{trigger}': {which} range {min}..{max} is inverted")]
    InvertedRange {
        trigger: String,
        which: &'static str,
        min: i64,
        max: i64,
    },

    #[error("action '{trigger}': loop-time must be positive, got {secs}")]
    NonPositiveLoopTime { trigger: String, secs: i64 },

    #[error("action '{trigger}': {which} probability {value} is outside [0, 1]")]
    InvalidProbability {
        trigger: String,
        which: String,
        value: f64,
    },
}

/// One weighted message within an action's sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceStep {
    /// Payload text emitted when the step fires
    pub message: String,

    /// Independent probability that this step fires in a given iteration
    #[serde(rename = "execution-probability", default = "default_probability")]
    pub execution_probability: f64,
}

/// Declarative definition of one action loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDefinition {
    /// Word that activates this action
    pub trigger: String,

    /// Channels the messages are delivered to
    #[serde(default)]
    pub channels: Vec<String>,

    /// Exempt from non-forced pause/resume broadcasts
    #[serde(rename = "run-always", default)]
    pub run_always: bool,

    /// Target duration of one full loop iteration, in seconds
    #[serde(rename = "loop-time", default = "default_loop_time")]
    pub loop_time_secs: i64,

    /// Wait window for the first step on steady-state iterations
    #[serde(rename = "loop-range-time", default = "default_loop_range")]
    pub loop_range_secs: (i64, i64),

    /// Wait window for the first step on the very first iteration, so a fresh
    /// loop kicks in faster than its steady-state cadence
    #[serde(rename = "start-range-time", default = "default_start_range")]
    pub start_range_secs: (i64, i64),

    /// Probability that an iteration emits anything at all
    #[serde(rename = "execution-probability", default = "default_probability")]
    pub execution_probability: f64,

    /// Sub-steps executed in order within one iteration
    #[serde(default)]
    pub sequence: Vec<SequenceStep>,
}

fn default_loop_time() -> i64 {
    1800
}

fn default_loop_range() -> (i64, i64) {
    (120, 600)
}

fn default_start_range() -> (i64, i64) {
    (20, 60)
}

fn default_probability() -> f64 {
    1.0
}

impl ActionDefinition {
    /// Validate the definition before a loop may start
    ///
    /// Degenerate ranges (`min == max`) are accepted and draw
    /// deterministically; inverted ranges, non-positive loop times, and
    /// probabilities outside `[0, 1]` are rejected.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        if self.loop_time_secs <= 0 {
            return Err(DefinitionError::NonPositiveLoopTime {
                trigger: self.trigger.clone(),
                secs: self.loop_time_secs,
            });
        }

        for (which, (min, max)) in [
            ("loop-range-time", self.loop_range_secs),
            ("start-range-time", self.start_range_secs),
        ] {
            if min > max {
                return Err(DefinitionError::InvertedRange {
                    trigger: self.trigger.clone(),
                    which,
                    min,
                    max,
                });
            }
        }

        self.check_probability("execution-probability", self.execution_probability)?;
        for (idx, step) in self.sequence.iter().enumerate() {
            self.check_probability(&format!("sequence[{idx}] execution-probability"), step.execution_probability)?;
        }

        Ok(())
    }

    fn check_probability(&self, which: &str, value: f64) -> Result<(), DefinitionError> {
        if !(0.0..=1.0).contains(&value) {
            return Err(DefinitionError::InvalidProbability {
                trigger: self.trigger.clone(),
                which: which.to_string(),
                value,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> ActionDefinition {
        serde_yaml::from_str(yaml).expect("definition should parse")
    }

    #[test]
    fn test_defaults_applied() {
        let definition = parse("trigger: greet\nsequence:\n  - message: hi\n");

        assert_eq!(definition.trigger, "greet");
        assert!(definition.channels.is_empty());
        assert!(!definition.run_always);
        assert_eq!(definition.loop_time_secs, 1800);
        assert_eq!(definition.loop_range_secs, (120, 600));
        assert_eq!(definition.start_range_secs, (20, 60));
        assert_eq!(definition.execution_probability, 1.0);
        assert_eq!(definition.sequence.len(), 1);
        assert_eq!(definition.sequence[0].message, "hi");
        assert_eq!(definition.sequence[0].execution_probability, 1.0);
    }

    #[test]
    fn test_full_definition_parses() {
        let definition = parse(
            "\
trigger: lurk
channels: [general, random]
run-always: true
loop-time: 600
loop-range-time: [30, 90]
start-range-time: [5, 10]
execution-probability: 0.5
sequence:
  - message: hello there
    execution-probability: 0.25
",
        );

        assert_eq!(definition.channels, vec!["general", "random"]);
        assert!(definition.run_always);
        assert_eq!(definition.loop_time_secs, 600);
        assert_eq!(definition.loop_range_secs, (30, 90));
        assert_eq!(definition.start_range_secs, (5, 10));
        assert_eq!(definition.execution_probability, 0.5);
        assert_eq!(definition.sequence[0].execution_probability, 0.25);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let yaml = "trigger: greet\nloop-time: 300\nsequence:\n  - message: hi\n";
        assert_eq!(parse(yaml), parse(yaml));
    }

    #[test]
    fn test_valid_definition_passes_validation() {
        let definition = parse("trigger: greet\nsequence:\n  - message: hi\n");
        definition.validate().expect("defaults should be valid");
    }

    #[test]
    fn test_degenerate_range_accepted() {
        let definition = parse("trigger: greet\nstart-range-time: [10, 10]\n");
        definition.validate().expect("degenerate range should be valid");
    }

    #[test]
    fn test_inverted_range_rejected() {
        let definition = parse("trigger: greet\nloop-range-time: [600, 120]\n");
        let error = definition.validate().unwrap_err();
        assert!(matches!(error, DefinitionError::InvertedRange { which: "loop-range-time", .. }));
    }

    #[test]
    fn test_non_positive_loop_time_rejected() {
        let definition = parse("trigger: greet\nloop-time: 0\n");
        let error = definition.validate().unwrap_err();
        assert!(matches!(error, DefinitionError::NonPositiveLoopTime { secs: 0, .. }));
    }

    #[test]
    fn test_out_of_range_probability_rejected() {
        let definition = parse("trigger: greet\nexecution-probability: 1.5\n");
        assert!(matches!(
            definition.validate().unwrap_err(),
            DefinitionError::InvalidProbability { .. }
        ));

        let definition = parse(
            "trigger: greet\nsequence:\n  - message: hi\n    execution-probability: -0.1\n",
        );
        assert!(matches!(
            definition.validate().unwrap_err(),
            DefinitionError::InvalidProbability { .. }
        ));
    }
}
