//! Shared fixtures for pipeline integration tests: recording fakes
//! for the dispatch collaborators, plus project/session builders.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::SeedableRng;

use sceneflow_core::project::Project;
use sceneflow_core::scene::Scene;
use sceneflow_pipeline::surface::{Clipboard, GenerationSurface, WindowGeometry};
use sceneflow_pipeline::{Dispatcher, PipelineConfig, PipelineError};
use sceneflow_store::MemoryStore;

// ---------------------------------------------------------------------------
// Recording fakes
// ---------------------------------------------------------------------------

/// Clipboard fake that records every written prompt.
#[derive(Default)]
pub struct RecordingClipboard {
    pub writes: Mutex<Vec<String>>,
}

#[async_trait]
impl Clipboard for RecordingClipboard {
    async fn write_text(&self, text: &str) -> Result<(), PipelineError> {
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Clipboard fake that always fails, for the swallow path.
pub struct FailingClipboard;

#[async_trait]
impl Clipboard for FailingClipboard {
    async fn write_text(&self, _text: &str) -> Result<(), PipelineError> {
        Err(PipelineError::Clipboard("permission denied".to_string()))
    }
}

/// Surface fake that records every opened `(url, window_name)` pair.
#[derive(Default)]
pub struct RecordingSurface {
    pub opens: Mutex<Vec<(String, String)>>,
}

impl GenerationSurface for RecordingSurface {
    fn open(
        &self,
        url: &str,
        window_name: &str,
        _geometry: WindowGeometry,
    ) -> Result<(), PipelineError> {
        self.opens
            .lock()
            .unwrap()
            .push((url.to_string(), window_name.to_string()));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Config with the given ledger shape and defaults elsewhere.
pub fn config(active_slots: usize, daily_cap: u32) -> PipelineConfig {
    PipelineConfig {
        active_slots,
        daily_cap,
        ..PipelineConfig::default()
    }
}

/// Project with `n` idle scenes, each with a distinct action.
pub fn project_with_scenes(n: usize) -> Project {
    let mut project = Project::new("Test Production");
    for i in 0..n {
        project.scenes.push(Scene::new(format!("performs action {i}")));
    }
    project
}

/// Dispatcher wired to the given fakes with a seeded random source and
/// a fresh in-memory store.
pub fn dispatcher(
    config: &PipelineConfig,
    clipboard: Arc<dyn Clipboard>,
    surface: Arc<dyn GenerationSurface>,
) -> Dispatcher {
    dispatcher_with_store(config, clipboard, surface, Arc::new(MemoryStore::new()))
}

/// Dispatcher over a caller-supplied store, for persistence tests.
pub fn dispatcher_with_store(
    config: &PipelineConfig,
    clipboard: Arc<dyn Clipboard>,
    surface: Arc<dyn GenerationSurface>,
    store: Arc<MemoryStore>,
) -> Dispatcher {
    Dispatcher::new(
        config.clone(),
        clipboard,
        surface,
        store,
        WindowGeometry::centered(1920, 1080),
    )
    .with_rng(StdRng::seed_from_u64(42))
}
