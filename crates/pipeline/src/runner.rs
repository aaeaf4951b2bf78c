//! Pace-limited batch runner over a project's scene queue.
//!
//! Drives at most one in-flight dispatch at a time: item N completes
//! (and its scene is marked) before the pacing wait for item N+1 even
//! starts. Cancellation is checked both before each item and during
//! the pacing wait, so once the token fires no further dispatch can
//! begin — a matured pacing timer never slips one extra item through.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use sceneflow_core::character::Character;
use sceneflow_core::project::Project;
use sceneflow_core::prompt::build_prompt;
use sceneflow_core::scene::GenerationStatus;
use sceneflow_core::session::SessionState;

use crate::config::PipelineConfig;
use crate::dispatch::{DispatchOutcome, Dispatcher, PromptSource};
use crate::error::PipelineError;

// ---------------------------------------------------------------------------
// Queue items and state
// ---------------------------------------------------------------------------

/// One queued dispatch: a scene id plus the prompt snapshotted for it
/// when the batch was created.
#[derive(Debug, Clone)]
pub struct BatchItem {
    pub scene_id: Uuid,
    pub prompt: String,
}

/// Where the runner sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    /// Not started, or reopened after a previous run.
    Idle,
    /// Auto mode is working through the queue.
    Running { current: usize },
    /// Ran off the end of the queue.
    Completed,
    /// Cancelled by the user or halted by quota exhaustion. The queue
    /// stays inspectable with `current` frozen where it stopped.
    Stopped { current: usize },
}

// ---------------------------------------------------------------------------
// Runner
// ---------------------------------------------------------------------------

/// Sequential auto-production queue.
pub struct BatchRunner {
    queue: Vec<BatchItem>,
    state: RunnerState,
    pacing: Duration,
}

impl BatchRunner {
    /// Snapshot a queue from the project's current scenes, pacing per
    /// the configuration. Prompts are built once, here; later edits to
    /// the project do not affect a running batch.
    pub fn from_project(
        project: &Project,
        characters: &[Character],
        config: &PipelineConfig,
    ) -> Self {
        let queue = project
            .scenes
            .iter()
            .map(|scene| {
                let character = scene
                    .character_id
                    .and_then(|id| Character::find_by_id(characters, id));
                BatchItem {
                    scene_id: scene.id,
                    prompt: build_prompt(scene, project, character),
                }
            })
            .collect();
        Self {
            queue,
            state: RunnerState::Idle,
            pacing: config.pacing,
        }
    }

    pub fn state(&self) -> RunnerState {
        self.state
    }

    pub fn queue(&self) -> &[BatchItem] {
        &self.queue
    }

    /// Reopen a finished or stopped queue, returning it to idle.
    pub fn reopen(&mut self) {
        self.state = RunnerState::Idle;
    }

    /// Run the whole queue in auto mode, pausing `pacing` between
    /// items.
    ///
    /// Stops immediately, without advancing, when a dispatch reports
    /// quota exhaustion or when `cancel` fires. After cancellation is
    /// observed no further item starts; a pacing wait in progress is
    /// abandoned rather than allowed to mature into another dispatch.
    pub async fn run(
        &mut self,
        dispatcher: &mut Dispatcher,
        session: &mut SessionState,
        project: &mut Project,
        cancel: &CancellationToken,
    ) -> Result<RunnerState, PipelineError> {
        let len = self.queue.len();

        for index in 0..len {
            if cancel.is_cancelled() {
                tracing::info!(index, "Batch cancelled before item started");
                self.state = RunnerState::Stopped { current: index };
                return Ok(self.state);
            }
            self.state = RunnerState::Running { current: index };

            match self.run_item(index, dispatcher, session, project).await? {
                DispatchOutcome::Dispatched { slot } => {
                    tracing::info!(index, slot, "Batch item dispatched");
                }
                DispatchOutcome::QuotaExhausted => {
                    tracing::warn!(index, "Batch halted: all account quotas exhausted");
                    self.state = RunnerState::Stopped { current: index };
                    return Ok(self.state);
                }
            }

            if index + 1 < len {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        tracing::info!(index, "Batch cancelled during pacing wait");
                        self.state = RunnerState::Stopped { current: index };
                        return Ok(self.state);
                    }
                    _ = tokio::time::sleep(self.pacing) => {}
                }
            }
        }

        self.state = RunnerState::Completed;
        tracing::info!(items = len, "Batch completed");
        Ok(self.state)
    }

    /// Run a single queue item once, regardless of auto-run state and
    /// with no follow-up scheduling. Used for "Launch" / "Re-Run" of
    /// an individual scene.
    pub async fn launch_one(
        &mut self,
        index: usize,
        dispatcher: &mut Dispatcher,
        session: &mut SessionState,
        project: &mut Project,
    ) -> Result<DispatchOutcome, PipelineError> {
        if index >= self.queue.len() {
            return Err(PipelineError::ItemOutOfRange {
                index,
                len: self.queue.len(),
            });
        }
        self.run_item(index, dispatcher, session, project).await
    }

    /// Dispatch item `index` and update its scene's status: marked
    /// `Generating` while in flight, `Completed` on success, restored
    /// to `Idle` when the ledger is exhausted, `Error` when the
    /// dispatch itself fails.
    async fn run_item(
        &mut self,
        index: usize,
        dispatcher: &mut Dispatcher,
        session: &mut SessionState,
        project: &mut Project,
    ) -> Result<DispatchOutcome, PipelineError> {
        let item = self.queue[index].clone();

        if let Some(scene) = project.scene_mut(item.scene_id) {
            scene.generation_status = GenerationStatus::Generating;
        }

        let outcome = match dispatcher
            .dispatch(session, PromptSource::Prebuilt(&item.prompt))
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                if let Some(scene) = project.scene_mut(item.scene_id) {
                    scene.generation_status = GenerationStatus::Error;
                }
                return Err(e);
            }
        };

        if let Some(scene) = project.scene_mut(item.scene_id) {
            scene.generation_status = match outcome {
                DispatchOutcome::Dispatched { .. } => GenerationStatus::Completed,
                DispatchOutcome::QuotaExhausted => GenerationStatus::Idle,
            };
        }
        Ok(outcome)
    }
}
