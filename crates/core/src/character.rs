//! Character entity.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recurring character available to the prompt builder.
///
/// Only the `visual_description` participates in prompt construction;
/// the CRUD surface that edits characters lives outside this core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: Uuid,
    pub name: String,
    /// Appearance text embedded verbatim into generated prompts.
    pub visual_description: String,
}

impl Character {
    pub fn new(name: impl Into<String>, visual_description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            visual_description: visual_description.into(),
        }
    }

    /// Find a character by id in a slice, as the dispatch layer does when
    /// resolving a scene's `character_id`.
    pub fn find_by_id(characters: &[Character], id: Uuid) -> Option<&Character> {
        characters.iter().find(|c| c.id == id)
    }
}
