//! Explicit session state.
//!
//! The source of truth the dispatch layer reads and writes: the quota
//! ledger, the currently highlighted account slot, and the dispatch
//! history. Held as one owned struct (never ambient globals) so every
//! mutation path is visible in a function signature and tests can
//! construct isolated sessions freely.
//!
//! The current slot intentionally resets each session while the ledger
//! and history persist; the store layer preserves that asymmetry.

use serde::{Deserialize, Serialize};

use crate::history::HistoryEntry;
use crate::ledger::QuotaLedger;
use crate::SlotIndex;

/// Mutable per-session production state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub ledger: QuotaLedger,
    /// The slot the UI currently highlights. Not persisted.
    pub current_slot: SlotIndex,
    /// Most recent dispatch first.
    pub history: Vec<HistoryEntry>,
}

impl SessionState {
    /// Fresh session starting on slot 0 with an empty history.
    pub fn new(ledger: QuotaLedger) -> Self {
        Self {
            ledger,
            current_slot: 0,
            history: Vec::new(),
        }
    }

    /// Prepend a history entry, keeping newest-first order.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.history.insert(0, entry);
    }
}
