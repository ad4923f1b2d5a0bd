use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inclusive-exclusive millisecond window a spawn delay is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DelayWindow {
    pub min_ms: f64,
    pub max_ms: f64,
}

impl DelayWindow {
    pub const fn new(min_ms: f64, max_ms: f64) -> Self {
        Self { min_ms, max_ms }
    }

    fn is_valid(&self) -> bool {
        self.min_ms.is_finite() && self.max_ms.is_finite() && self.min_ms >= 0.0 && self.min_ms <= self.max_ms
    }
}

/// Spawn timing for one transient kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnWindows {
    /// Delay before the first spawn after mount.
    pub initial: DelayWindow,
    /// Delay re-rolled after every spawn.
    pub interval: DelayWindow,
}

/// Engine configuration, provided by the host. Every field has a default,
/// so a partial JSON object overrides only what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// RNG seed for populations and spawn timing.
    pub seed: u64,
    /// Fraction of the remaining gap the global opacity closes each frame.
    pub fade_rate: f32,
    /// Gap below which opacity snaps exactly onto its target.
    pub fade_snap: f32,
    /// Opacity below which update and render are skipped.
    pub skip_threshold: f32,
    /// Quiet period before a resize regenerates populations.
    pub resize_debounce_ms: f64,
    /// Upper bound on the device pixel ratio used for the backing store.
    pub max_pixel_ratio: f32,
    pub meteors: SpawnWindows,
    pub comets: SpawnWindows,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            fade_rate: 0.025,
            fade_snap: 0.005,
            skip_threshold: 0.01,
            resize_debounce_ms: 200.0,
            max_pixel_ratio: 2.0,
            meteors: SpawnWindows {
                initial: DelayWindow::new(3_000.0, 8_000.0),
                interval: DelayWindow::new(4_000.0, 12_000.0),
            },
            comets: SpawnWindows {
                initial: DelayWindow::new(15_000.0, 35_000.0),
                interval: DelayWindow::new(20_000.0, 45_000.0),
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse engine config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid engine config: {0}")]
    Invalid(String),
}

impl EngineConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fade_rate > 0.0 && self.fade_rate <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "fade_rate must be in (0, 1], got {}",
                self.fade_rate
            )));
        }
        // Without a snap band f32 easing stalls one ulp short of the target.
        if !(self.fade_snap > 0.0 && self.fade_snap < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "fade_snap must be in (0, 1), got {}",
                self.fade_snap
            )));
        }
        if !(0.0..1.0).contains(&self.skip_threshold) {
            return Err(ConfigError::Invalid(format!(
                "skip_threshold must be in [0, 1), got {}",
                self.skip_threshold
            )));
        }
        if !(self.resize_debounce_ms >= 0.0) {
            return Err(ConfigError::Invalid("resize_debounce_ms must be non-negative".into()));
        }
        if !(self.max_pixel_ratio >= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "max_pixel_ratio must be at least 1, got {}",
                self.max_pixel_ratio
            )));
        }
        for (name, windows) in [("meteors", &self.meteors), ("comets", &self.comets)] {
            if !windows.initial.is_valid() || !windows.interval.is_valid() {
                return Err(ConfigError::Invalid(format!(
                    "{} spawn windows need 0 <= min_ms <= max_ms",
                    name
                )));
            }
        }
        Ok(())
    }
}
