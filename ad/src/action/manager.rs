//! Action manager - spawns action loops and broadcasts control over them
//!
//! The manager validates definitions, spawns each executor as a tokio task,
//! and records a control handle per loop. Handles are never evicted, matching
//! the lifetime of the process; `shutdown` exists for the daemon's exit path
//! and aborts loops that are still sleeping out their waits.

use tokio::task::JoinHandle;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::journal::Journal;
use crate::random::ThreadRandomness;
use crate::sink::Sink;

use super::{ActionControls, ActionDefinition, ActionExecutor, DefinitionError};

/// One spawned action loop
pub struct ActionHandle {
    id: Uuid,
    trigger: String,
    controls: ActionControls,
    task: JoinHandle<()>,
}

impl ActionHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    pub fn controls(&self) -> &ActionControls {
        &self.controls
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Tracks every spawned action loop and broadcasts control calls
#[derive(Default)]
pub struct ActionManager {
    actions: Vec<ActionHandle>,
}

impl ActionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a definition, spawn its loop, and record the handle
    ///
    /// A sink failure terminates that one loop: the spawn wrapper logs the
    /// error and lets the task end, leaving every other loop untouched.
    pub fn create<S, J>(&mut self, definition: ActionDefinition, sink: S, journal: J) -> Result<Uuid, DefinitionError>
    where
        S: Sink + 'static,
        J: Journal + 'static,
    {
        definition.validate()?;

        let id = Uuid::now_v7();
        let trigger = definition.trigger.clone();
        debug!(%id, %trigger, "create: spawning action loop");

        let executor = ActionExecutor::new(definition, Box::new(ThreadRandomness));
        let controls = executor.controls();

        let task_trigger = trigger.clone();
        let task = tokio::spawn(async move {
            match executor.run(sink, journal).await {
                Ok(()) => info!(%id, trigger = %task_trigger, "action loop stopped"),
                Err(error) => {
                    error!(%id, trigger = %task_trigger, %error, "action loop terminated on delivery failure")
                }
            }
        });

        self.actions.push(ActionHandle {
            id,
            trigger,
            controls,
            task,
        });
        Ok(id)
    }

    /// Broadcast a pause to every loop; run-always loops ignore it unless forced
    pub fn pause_all(&self, force: bool) {
        info!(force, actions = self.actions.len(), "pausing all action loops");
        for handle in &self.actions {
            handle.controls.pause(force);
        }
    }

    /// Broadcast a resume to every loop; run-always loops ignore it unless forced
    pub fn resume_all(&self, force: bool) {
        info!(force, actions = self.actions.len(), "resuming all action loops");
        for handle in &self.actions {
            handle.controls.resume(force);
        }
    }

    /// Signal stop to every loop; each exits at its next top-of-iteration check
    pub fn stop_all(&self) {
        info!(actions = self.actions.len(), "stopping all action loops");
        for handle in &self.actions {
            handle.controls.stop();
        }
    }

    /// Stop every loop and abort tasks still sleeping out their waits
    pub async fn shutdown(self) {
        self.stop_all();
        for handle in &self.actions {
            handle.task.abort();
        }
        futures::future::join_all(self.actions.into_iter().map(|handle| handle.task)).await;
        debug!("shutdown: all action loop tasks finished");
    }

    pub fn handles(&self) -> &[ActionHandle] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
