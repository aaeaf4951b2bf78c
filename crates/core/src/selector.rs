//! Account selection policy.
//!
//! Decides which slot handles the next generation request. Sticky on
//! the current slot while it has headroom; otherwise a uniformly
//! random pick over the remaining slots. Randomness (rather than
//! round-robin) is a deliberate policy so no single fallback slot is
//! drained predictably; the random source is injected so tests can
//! force deterministic outcomes.

use rand::Rng;

use crate::ledger::QuotaLedger;
use crate::SlotIndex;

/// Pick the slot for the next dispatch.
///
/// Returns `None` when every active slot has reached the daily cap.
/// Pure with respect to the ledger: the caller updates the current
/// slot and increments usage.
pub fn select_slot<R: Rng + ?Sized>(
    ledger: &QuotaLedger,
    current: SlotIndex,
    rng: &mut R,
) -> Option<SlotIndex> {
    let available = ledger.available_slots();
    if available.is_empty() {
        return None;
    }
    if available.contains(&current) {
        return Some(current);
    }
    Some(available[rng.random_range(0..available.len())])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
