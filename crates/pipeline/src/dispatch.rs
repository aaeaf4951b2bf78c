//! The dispatch function: consume one unit of quota, hand the prompt
//! to the external generation surface.
//!
//! One successful dispatch performs, in order: slot selection, ledger
//! increment, prompt resolution, best-effort clipboard copy, window
//! open against the slot's auth session, history append, session
//! persistence. Quota exhaustion is an outcome, not an error — nothing
//! is mutated on that path.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use sceneflow_core::character::Character;
use sceneflow_core::history::HistoryEntry;
use sceneflow_core::ledger::QuotaLedger;
use sceneflow_core::project::Project;
use sceneflow_core::prompt::build_prompt;
use sceneflow_core::scene::Scene;
use sceneflow_core::selector::select_slot;
use sceneflow_core::session::SessionState;
use sceneflow_core::SlotIndex;
use sceneflow_store::{session as stored_session, Store};

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::surface::{
    account_url, Clipboard, GenerationSurface, WindowGeometry, GENERATION_WINDOW_NAME,
};

// ---------------------------------------------------------------------------
// Prompt source
// ---------------------------------------------------------------------------

/// What to dispatch: a pre-built prompt string (ad-hoc single-prompt
/// generation) or structured scene data to run through the prompt
/// builder.
pub enum PromptSource<'a> {
    Prebuilt(&'a str),
    Scene {
        scene: &'a Scene,
        project: &'a Project,
        character: Option<&'a Character>,
    },
}

impl PromptSource<'_> {
    /// Resolve to `(original, final)` prompt text.
    fn resolve(&self) -> (String, String) {
        match self {
            Self::Prebuilt(text) => (text.to_string(), text.to_string()),
            Self::Scene {
                scene,
                project,
                character,
            } => (
                scene.action.clone(),
                build_prompt(scene, project, *character),
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Result of one dispatch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// One unit of quota was consumed on `slot`.
    Dispatched { slot: SlotIndex },
    /// Every active slot is at the daily cap; nothing was mutated.
    QuotaExhausted,
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Owns the dispatch side-effect collaborators and the random source
/// used for slot rotation.
pub struct Dispatcher {
    config: PipelineConfig,
    clipboard: Arc<dyn Clipboard>,
    surface: Arc<dyn GenerationSurface>,
    store: Arc<dyn Store>,
    geometry: WindowGeometry,
    rng: StdRng,
}

impl Dispatcher {
    pub fn new(
        config: PipelineConfig,
        clipboard: Arc<dyn Clipboard>,
        surface: Arc<dyn GenerationSurface>,
        store: Arc<dyn Store>,
        geometry: WindowGeometry,
    ) -> Self {
        Self {
            config,
            clipboard,
            surface,
            store,
            geometry,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Replace the random source with a seeded one (tests).
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Fresh session shaped by this dispatcher's configuration:
    /// `active_slots` slots, `daily_cap` per slot, empty history.
    pub fn new_session(&self) -> Result<SessionState, PipelineError> {
        let ledger = QuotaLedger::new(self.config.active_slots, self.config.daily_cap)?;
        Ok(SessionState::new(ledger))
    }

    /// Restore the persisted session through the configured store.
    ///
    /// The configured `daily_cap` applies to the restored ledger;
    /// `active_slots` is only the fallback when no slot count has
    /// been stored yet.
    pub async fn restore_session(&self) -> Result<SessionState, PipelineError> {
        let session = stored_session::load_session(
            self.store.as_ref(),
            self.config.active_slots,
            self.config.daily_cap,
        )
        .await?;
        Ok(session)
    }

    /// Attempt one generation dispatch.
    ///
    /// Exactly one successful call increments exactly one slot's usage
    /// by exactly 1; a [`DispatchOutcome::QuotaExhausted`] call
    /// increments none.
    pub async fn dispatch(
        &mut self,
        session: &mut SessionState,
        source: PromptSource<'_>,
    ) -> Result<DispatchOutcome, PipelineError> {
        let slot = match select_slot(&session.ledger, session.current_slot, &mut self.rng) {
            Some(slot) => slot,
            None => {
                tracing::warn!(
                    active_slots = session.ledger.active_slots(),
                    daily_cap = session.ledger.daily_cap(),
                    "All account quotas exhausted; try again tomorrow or reset a slot",
                );
                return Ok(DispatchOutcome::QuotaExhausted);
            }
        };

        session.current_slot = slot;
        session.ledger.increment(slot);

        let (original, final_prompt) = source.resolve();

        if self.config.clipboard_enabled {
            if let Err(e) = self.clipboard.write_text(&final_prompt).await {
                // Copying is a convenience, not a guarantee.
                tracing::warn!(error = %e, "Clipboard write failed; continuing");
            }
        }

        let url = account_url(&self.config.surface_url, slot);
        if let Err(e) = self
            .surface
            .open(&url, GENERATION_WINDOW_NAME, self.geometry)
        {
            tracing::warn!(error = %e, slot, "Generation window did not open");
        }

        session.record(HistoryEntry::new(original, final_prompt, slot));

        if let Err(e) = stored_session::save_session(self.store.as_ref(), session).await {
            tracing::warn!(error = %e, "Failed to persist session state");
        }

        tracing::info!(
            slot,
            usage = session.ledger.usage(slot),
            daily_cap = session.ledger.daily_cap(),
            "Generation dispatched",
        );
        Ok(DispatchOutcome::Dispatched { slot })
    }
}
