//! Collaborator traits for dispatch side effects.
//!
//! The dispatch function touches the outside world through two seams:
//! a clipboard and the external generation web app ("surface"). Both
//! are traits so tests substitute recording fakes and embeddings plug
//! in whatever the host environment provides.

use async_trait::async_trait;

use sceneflow_core::SlotIndex;

use crate::error::PipelineError;

// ---------------------------------------------------------------------------
// Window constants
// ---------------------------------------------------------------------------

/// Fixed width of the generation window.
pub const GENERATION_WINDOW_WIDTH: u32 = 1280;

/// Fixed height of the generation window.
pub const GENERATION_WINDOW_HEIGHT: u32 = 800;

/// Window name passed to the surface, reused so repeated dispatches
/// target the same window.
pub const GENERATION_WINDOW_NAME: &str = "sceneflow-generation";

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Pixel geometry for the generation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowGeometry {
    pub width: u32,
    pub height: u32,
    pub left: u32,
    pub top: u32,
}

impl WindowGeometry {
    /// Fixed-size window centered on a screen. The window is clamped
    /// to the top-left corner when the screen is smaller than it.
    pub fn centered(screen_width: u32, screen_height: u32) -> Self {
        Self {
            width: GENERATION_WINDOW_WIDTH,
            height: GENERATION_WINDOW_HEIGHT,
            left: screen_width.saturating_sub(GENERATION_WINDOW_WIDTH) / 2,
            top: screen_height.saturating_sub(GENERATION_WINDOW_HEIGHT) / 2,
        }
    }
}

/// URL of the generation app bound to one account slot's auth session.
pub fn account_url(base: &str, slot: SlotIndex) -> String {
    format!("{base}?authuser={slot}")
}

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// System clipboard. Failures are non-fatal to dispatch.
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), PipelineError>;
}

/// The external generation web app.
///
/// `open` is fire-and-forget: no response channel exists, and an error
/// (for example a blocked popup) is surfaced as a warning but never
/// fails the dispatch.
pub trait GenerationSurface: Send + Sync {
    fn open(
        &self,
        url: &str,
        window_name: &str,
        geometry: WindowGeometry,
    ) -> Result<(), PipelineError>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
