//! Scene entity and its lifecycle status.
//!
//! A [`Scene`] is owned by its parent [`Project`](crate::project::Project)
//! and carries everything the prompt builder needs: free-text action and
//! setting, an optional character reference, environment elements, shot
//! type, and target clip duration.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Status and duration enums
// ---------------------------------------------------------------------------

/// Where a scene sits in its generation lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationStatus {
    /// Not yet dispatched.
    Idle,
    /// A dispatch for this scene is in flight.
    Generating,
    /// Dispatched successfully.
    Completed,
    /// The last dispatch attempt errored.
    Error,
}

impl GenerationStatus {
    /// Human-readable label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Generating => "Generating",
            Self::Completed => "Completed",
            Self::Error => "Error",
        }
    }
}

/// Target clip length. The external generation surface only accepts
/// these two values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneDuration {
    #[serde(rename = "5s")]
    FiveSeconds,
    #[serde(rename = "8s")]
    EightSeconds,
}

impl SceneDuration {
    /// Duration in whole seconds.
    pub fn secs(self) -> u32 {
        match self {
            Self::FiveSeconds => 5,
            Self::EightSeconds => 8,
        }
    }
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// One video scene inside a project's ordered sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub id: Uuid,
    /// Reference to a character, or `None` for a character-less scene.
    pub character_id: Option<Uuid>,
    /// What happens in the scene (free text).
    pub action: String,
    /// Where the scene takes place. May be empty.
    pub setting: String,
    /// Spoken line, quoted verbatim into the prompt when present.
    pub dialogue: Option<String>,
    /// Environment props and details, rendered in insertion order.
    pub environment_elements: Vec<String>,
    /// Shot framing label, e.g. `"Wide Shot (มุมกว้าง)"`.
    pub shot_type: String,
    pub duration: SceneDuration,
    pub generation_status: GenerationStatus,
}

impl Scene {
    /// Create a fresh idle scene with the given action text.
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            character_id: None,
            action: action.into(),
            setting: String::new(),
            dialogue: None,
            environment_elements: Vec::new(),
            shot_type: String::new(),
            duration: SceneDuration::EightSeconds,
            generation_status: GenerationStatus::Idle,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
