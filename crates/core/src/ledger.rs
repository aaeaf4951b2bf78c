//! Per-account daily usage ledger.
//!
//! Tracks how many generations each logical account slot has consumed
//! today against a uniform daily cap. There is no automatic calendar
//! rollover: a count only ever goes back to zero through an explicit
//! [`QuotaLedger::reset`], which mirrors the manual "clear" action in
//! the account panel.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::SlotIndex;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Hard ceiling on configurable account slots.
pub const MAX_ACCOUNT_SLOTS: usize = 5;

/// Daily generation cap applied uniformly to every slot.
pub const DEFAULT_DAILY_CAP: u32 = 2;

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// Slot-indexed usage counters for the current day.
///
/// Counts are stored sparsely; a missing slot reads as zero. The cap is
/// deliberately not enforced by [`increment`](QuotaLedger::increment) —
/// the selector checks headroom before any increment happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaLedger {
    counts: BTreeMap<SlotIndex, u32>,
    active_slots: usize,
    daily_cap: u32,
}

impl QuotaLedger {
    /// Create an empty ledger.
    ///
    /// `active_slots` must be `1..=MAX_ACCOUNT_SLOTS` and `daily_cap`
    /// at least 1.
    pub fn new(active_slots: usize, daily_cap: u32) -> Result<Self, CoreError> {
        validate_active_slots(active_slots)?;
        if daily_cap == 0 {
            return Err(CoreError::Validation(
                "Daily cap must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            counts: BTreeMap::new(),
            active_slots,
            daily_cap,
        })
    }

    /// Rebuild a ledger from persisted counts.
    pub fn from_counts(
        counts: BTreeMap<SlotIndex, u32>,
        active_slots: usize,
        daily_cap: u32,
    ) -> Result<Self, CoreError> {
        let mut ledger = Self::new(active_slots, daily_cap)?;
        ledger.counts = counts;
        Ok(ledger)
    }

    /// Usage count for a slot; zero when the slot has never dispatched.
    pub fn usage(&self, slot: SlotIndex) -> u32 {
        self.counts.get(&slot).copied().unwrap_or(0)
    }

    /// Consume one unit of quota on a slot.
    pub fn increment(&mut self, slot: SlotIndex) {
        *self.counts.entry(slot).or_insert(0) += 1;
    }

    /// Reset one slot's count to exactly zero.
    pub fn reset(&mut self, slot: SlotIndex) {
        self.counts.insert(slot, 0);
    }

    /// Slots with remaining headroom, in ascending index order.
    pub fn available_slots(&self) -> Vec<SlotIndex> {
        (0..self.active_slots)
            .filter(|&slot| self.usage(slot) < self.daily_cap)
            .collect()
    }

    /// True when every active slot has reached the cap.
    pub fn is_exhausted(&self) -> bool {
        self.available_slots().is_empty()
    }

    pub fn active_slots(&self) -> usize {
        self.active_slots
    }

    pub fn daily_cap(&self) -> u32 {
        self.daily_cap
    }

    /// The raw counts map, as persisted by the store layer.
    pub fn counts(&self) -> &BTreeMap<SlotIndex, u32> {
        &self.counts
    }
}

/// Validate an active-slot count: `1..=MAX_ACCOUNT_SLOTS`.
pub fn validate_active_slots(active_slots: usize) -> Result<(), CoreError> {
    if active_slots == 0 || active_slots > MAX_ACCOUNT_SLOTS {
        return Err(CoreError::Validation(format!(
            "Active slot count must be 1..={MAX_ACCOUNT_SLOTS}, got {active_slots}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
