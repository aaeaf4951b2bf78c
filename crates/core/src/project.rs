//! Project aggregate, mood settings, and validation.
//!
//! A [`Project`] owns its ordered scene sequence outright; deleting a
//! project deletes its scenes with it. [`ProjectSettings`] carries the
//! global mood knobs the prompt builder folds into every scene prompt.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::scene::Scene;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Upper bound of the mood intensity scale.
pub const MAX_INTENSITY: u8 = 100;

/// Intensity tier labels, least to most intense. The prompt builder
/// embeds only the first word of the selected label.
pub const INTENSITY_TIERS: &[&str] = &["Normal", "Serious", "Intense", "Extreme Fury"];

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Global mood and style settings applied to every scene in a project.
///
/// All fields are free-form option strings chosen in the settings UI;
/// several carry a bilingual parenthetical suffix that
/// [`strip_annotation`](crate::prompt::strip_annotation) removes before
/// the value reaches a prompt. There is no cross-field invariant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectSettings {
    pub aspect_ratio: String,
    pub weather: String,
    pub atmosphere: String,
    pub lighting: String,
    /// Mood intensity, `0..=100`.
    pub intensity: u8,
    pub dialect: String,
    pub tone: String,
    pub style: String,
}

impl ProjectSettings {
    /// Label for an intensity value: `<30` Normal, `<60` Serious,
    /// `<90` Intense, otherwise Extreme Fury.
    pub fn intensity_label(&self) -> &'static str {
        match self.intensity {
            0..=29 => INTENSITY_TIERS[0],
            30..=59 => INTENSITY_TIERS[1],
            60..=89 => INTENSITY_TIERS[2],
            _ => INTENSITY_TIERS[3],
        }
    }
}

/// Social-posting metadata produced by a later pipeline stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: String,
    pub description: String,
    pub hashtags: Vec<String>,
}

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

/// Aggregate root: plot, settings, and the ordered scene sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub plot: String,
    pub settings: ProjectSettings,
    pub scenes: Vec<Scene>,
    /// Characters selected for AI scene authoring.
    pub selected_character_ids: Vec<Uuid>,
    pub max_characters_per_scene: u32,
    /// How many scenes to request from the scene author.
    pub number_of_scenes: u32,
    pub video_metadata: Option<VideoMetadata>,
}

impl Project {
    /// Create an empty project with default settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            plot: String::new(),
            settings: ProjectSettings::default(),
            scenes: Vec::new(),
            selected_character_ids: Vec::new(),
            max_characters_per_scene: 1,
            number_of_scenes: 1,
            video_metadata: None,
        }
    }

    /// Mutable lookup of a scene by id.
    pub fn scene_mut(&mut self, id: Uuid) -> Option<&mut Scene> {
        self.scenes.iter_mut().find(|s| s.id == id)
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a mood intensity value: must be within `0..=MAX_INTENSITY`.
pub fn validate_intensity(intensity: u8) -> Result<(), CoreError> {
    if intensity > MAX_INTENSITY {
        return Err(CoreError::Validation(format!(
            "Intensity must be <= {MAX_INTENSITY}, got {intensity}"
        )));
    }
    Ok(())
}

/// Validate a scene-generation request size: at least one scene.
pub fn validate_scene_count(count: u32) -> Result<(), CoreError> {
    if count == 0 {
        return Err(CoreError::Validation(
            "Number of scenes must be at least 1".to_string(),
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
