//! AI scene-authoring collaborator.
//!
//! Populates a project's scene list from a plot before a batch ever
//! starts. The runner never calls this trait itself: authoring errors
//! surface to the caller up front and are not part of the batch state
//! machine.

use async_trait::async_trait;

use sceneflow_core::character::Character;
use sceneflow_core::project::ProjectSettings;
use sceneflow_core::scene::Scene;

use crate::error::PipelineError;

/// Generates structured scenes from a free-text plot.
#[async_trait]
pub trait SceneAuthor: Send + Sync {
    /// Author `scene_count` scenes for `plot`, using at most
    /// `max_per_scene` of the given characters per scene and folding
    /// the project's mood settings into the result.
    async fn generate_scenes(
        &self,
        plot: &str,
        characters: &[Character],
        max_per_scene: u32,
        scene_count: u32,
        mood: &ProjectSettings,
    ) -> Result<Vec<Scene>, PipelineError>;
}

/// Deterministic author for tests: returns a fixed scene list or a
/// fixed error, ignoring its inputs.
pub struct ScriptedSceneAuthor {
    result: Result<Vec<Scene>, String>,
}

impl ScriptedSceneAuthor {
    pub fn returning(scenes: Vec<Scene>) -> Self {
        Self { result: Ok(scenes) }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            result: Err(message.into()),
        }
    }
}

#[async_trait]
impl SceneAuthor for ScriptedSceneAuthor {
    async fn generate_scenes(
        &self,
        _plot: &str,
        _characters: &[Character],
        _max_per_scene: u32,
        _scene_count: u32,
        _mood: &ProjectSettings,
    ) -> Result<Vec<Scene>, PipelineError> {
        match &self.result {
            Ok(scenes) => Ok(scenes.clone()),
            Err(message) => Err(PipelineError::SceneAuthor(message.clone())),
        }
    }
}
