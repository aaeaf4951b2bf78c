//! Dispatch history log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::SlotIndex;

/// One successful dispatch, recorded append-only.
///
/// Entries are never mutated or removed; the session prepends each new
/// entry so the most recent dispatch reads first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    /// The user-entered or scene-derived source text.
    pub original_prompt: String,
    /// The fully constructed prompt that went to the clipboard/window.
    pub final_prompt: String,
    pub created_at: DateTime<Utc>,
    /// Which account slot consumed the quota unit.
    pub slot: SlotIndex,
}

impl HistoryEntry {
    pub fn new(
        original_prompt: impl Into<String>,
        final_prompt: impl Into<String>,
        slot: SlotIndex,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            original_prompt: original_prompt.into(),
            final_prompt: final_prompt.into(),
            created_at: Utc::now(),
            slot,
        }
    }
}
