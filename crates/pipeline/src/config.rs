//! Pipeline configuration loaded from environment variables.

use std::time::Duration;

use sceneflow_core::ledger::{DEFAULT_DAILY_CAP, MAX_ACCOUNT_SLOTS};

/// Default pause between auto-mode batch items, in seconds.
///
/// Pacing is a load-shedding policy against the external surface's
/// anti-automation detection, not a correctness requirement.
pub const DEFAULT_PACING_SECS: u64 = 4;

/// Default base URL of the external generation web app.
pub const DEFAULT_SURFACE_URL: &str = "https://video-gen.example.com/app";

/// Runtime configuration for dispatch and the batch runner.
///
/// All fields have defaults suitable for a single-account local
/// session; override via environment variables.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Pause between auto-mode batch items.
    pub pacing: Duration,
    /// Number of active account slots, `1..=5`.
    pub active_slots: usize,
    /// Daily generation cap per slot.
    pub daily_cap: u32,
    /// Base URL of the generation web app; the slot's session index is
    /// appended as a query parameter.
    pub surface_url: String,
    /// Whether clipboard copying is available in this embedding.
    /// An explicit capability flag, set once at startup.
    pub clipboard_enabled: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            pacing: Duration::from_secs(DEFAULT_PACING_SECS),
            active_slots: 1,
            daily_cap: DEFAULT_DAILY_CAP,
            surface_url: DEFAULT_SURFACE_URL.to_string(),
            clipboard_enabled: true,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                             |
    /// |---------------------------|-------------------------------------|
    /// | `SCENEFLOW_PACING_SECS`   | `4`                                 |
    /// | `SCENEFLOW_ACTIVE_SLOTS`  | `1` (clamped to `1..=5`)            |
    /// | `SCENEFLOW_DAILY_CAP`     | `2`                                 |
    /// | `SCENEFLOW_SURFACE_URL`   | `https://video-gen.example.com/app` |
    /// | `SCENEFLOW_CLIPBOARD`     | `true`                              |
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let pacing_secs: u64 = std::env::var("SCENEFLOW_PACING_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PACING_SECS);

        let active_slots: usize = std::env::var("SCENEFLOW_ACTIVE_SLOTS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.active_slots)
            .clamp(1, MAX_ACCOUNT_SLOTS);

        let daily_cap: u32 = std::env::var("SCENEFLOW_DAILY_CAP")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&cap| cap >= 1)
            .unwrap_or(defaults.daily_cap);

        let surface_url =
            std::env::var("SCENEFLOW_SURFACE_URL").unwrap_or(defaults.surface_url);

        let clipboard_enabled = std::env::var("SCENEFLOW_CLIPBOARD")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(true);

        Self {
            pacing: Duration::from_secs(pacing_secs),
            active_slots,
            daily_cap,
            surface_url,
            clipboard_enabled,
        }
    }
}
