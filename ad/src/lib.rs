//! actiond - scripted action loop daemon
//!
//! Drives a collection of independent, long-running action loops. Each loop
//! periodically emits a randomized sequence of timed messages and honors
//! runtime pause/resume/stop control without losing its internal phase.
//!
//! # Core Concepts
//!
//! - **Declarative actions**: each loop is described by a definition with a
//!   trigger word, timing ranges, and a weighted message sequence
//! - **Planned iterations**: every pass through a loop re-plans a fresh
//!   timeline of wait/act steps from the definition and the randomness source
//! - **Cooperative control**: pause, resume, and stop are flags observed at
//!   well-defined checkpoints, never preemptive interrupts
//! - **Isolated loops**: loops share no state; one loop's delivery failure
//!   leaves every other loop running
//!
//! # Modules
//!
//! - [`action`] - definitions, timeline planning, executors, and the manager
//! - [`cli`] - command-line interface
//! - [`config`] - configuration types and loading
//! - [`journal`] - best-effort activity journal
//! - [`random`] - injectable randomness capability
//! - [`sink`] - delivery capability

pub mod action;
pub mod cli;
pub mod config;
pub mod journal;
pub mod random;
pub mod sink;

// Re-export commonly used types
pub use action::{
    ActionControls, ActionDefinition, ActionExecutor, ActionHandle, ActionManager, DefinitionError, SequenceStep,
    TimedStep, plan_iteration, render_timeline,
};
pub use config::Config;
pub use journal::{Journal, TracingJournal};
pub use random::{Randomness, ThreadRandomness};
pub use sink::{ConsoleSink, Sink, SinkError};
