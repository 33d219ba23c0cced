//! Action loop module
//!
//! An action is one independently scheduled emission loop derived from a
//! declarative definition. The planner turns a definition into the timed
//! steps of one iteration, the executor sleeps and emits its way through
//! them under pause/stop control, and the manager spawns and broadcasts over
//! the whole collection.

mod definition;
mod executor;
mod manager;
mod timeline;

pub use definition::{ActionDefinition, DefinitionError, SequenceStep};
pub use executor::{ActionControls, ActionExecutor};
pub use manager::{ActionHandle, ActionManager};
pub use timeline::{TimedStep, plan_iteration, render_timeline};
