//! Typed persistence of the production session.
//!
//! Persists the quota ledger counts, the active-slot count, and the
//! dispatch history under fixed keys. The current slot is deliberately
//! never written: it resets to slot 0 on every new session while the
//! ledger survives, and that asymmetry is part of the contract.

use std::collections::BTreeMap;

use sceneflow_core::history::HistoryEntry;
use sceneflow_core::ledger::QuotaLedger;
use sceneflow_core::session::SessionState;
use sceneflow_core::SlotIndex;

use crate::{Store, StoreError};

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// Storage keys for session state.
pub mod keys {
    /// Slot-indexed usage counts, `{"0": n, ...}`.
    pub const QUOTA_LEDGER: &str = "quota_ledger";
    /// Configured number of active account slots.
    pub const ACTIVE_SLOTS: &str = "active_slots";
    /// Dispatch history, newest first.
    pub const HISTORY: &str = "generation_history";
}

// ---------------------------------------------------------------------------
// Load / save
// ---------------------------------------------------------------------------

/// Restore a session from the store.
///
/// Missing keys fall back to an empty ledger with
/// `default_active_slots` slots and an empty history. A stored slot
/// count always wins over the default. The current slot always starts
/// at 0.
pub async fn load_session(
    store: &dyn Store,
    default_active_slots: usize,
    daily_cap: u32,
) -> Result<SessionState, StoreError> {
    let active_slots = match store.load(keys::ACTIVE_SLOTS).await? {
        Some(value) => serde_json::from_value::<usize>(value)?,
        None => default_active_slots,
    };

    let counts: BTreeMap<SlotIndex, u32> = match store.load(keys::QUOTA_LEDGER).await? {
        Some(value) => serde_json::from_value(value)?,
        None => BTreeMap::new(),
    };

    let ledger = QuotaLedger::from_counts(counts, active_slots, daily_cap)
        .map_err(|e| StoreError::InvalidState(e.to_string()))?;

    let history: Vec<HistoryEntry> = match store.load(keys::HISTORY).await? {
        Some(value) => serde_json::from_value(value)?,
        None => Vec::new(),
    };

    let mut session = SessionState::new(ledger);
    session.history = history;
    tracing::debug!(
        active_slots,
        entries = session.history.len(),
        "Session state restored",
    );
    Ok(session)
}

/// Persist a session's durable parts: ledger counts, active-slot
/// count, and history. `current_slot` is not written.
pub async fn save_session(store: &dyn Store, session: &SessionState) -> Result<(), StoreError> {
    store
        .save(keys::QUOTA_LEDGER, &serde_json::to_value(session.ledger.counts())?)
        .await?;
    store
        .save(
            keys::ACTIVE_SLOTS,
            &serde_json::to_value(session.ledger.active_slots())?,
        )
        .await?;
    store
        .save(keys::HISTORY, &serde_json::to_value(&session.history)?)
        .await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
