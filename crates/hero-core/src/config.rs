//! Tuning constants and the runtime configuration built from them.
//!
//! The constants on [`Params`] are the defaults; page code may override any
//! subset of them by handing a JSON object to the web front-end, which is
//! deserialized into [`ScannerConfig`] / [`CardStreamConfig`] and validated.

use crate::error::{ConfigError, ConfigResult};
use serde::Deserialize;

/// Default tuning parameters for the scanner and the card stream.
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Surface
    pub const SURFACE_HEIGHT: f32 = 250.0;
    pub const LIGHT_BAR_WIDTH: f32 = 3.0;
    pub const OVERSCAN: f32 = 10.0;

    // Idle profile
    pub const BASE_INTENSITY: f32 = 0.8;
    pub const BASE_MAX_PARTICLES: u32 = 800;
    pub const BASE_FADE_ZONE: f32 = 60.0;
    pub const BASE_GLOW: f32 = 1.0;

    // Scanning profile
    pub const SCAN_INTENSITY: f32 = 1.8;
    pub const SCAN_MAX_PARTICLES: u32 = 2500;
    pub const SCAN_FADE_ZONE: f32 = 35.0;
    pub const SCAN_GLOW: f32 = 3.5;

    // Easing: fraction of the remaining distance covered per frame
    pub const TRANSITION_SPEED: f32 = 0.05;

    // Pruning
    pub const PRUNE_SLACK: u32 = 200;
    pub const PRUNE_BATCH: u32 = 15;

    // Card stream
    pub const CARD_WIDTH: f32 = 400.0;
    pub const CARD_GAP: f32 = 60.0;
    pub const CARD_COUNT: u32 = 8;
    pub const CRUISE_VELOCITY: f32 = 40.0;
    pub const MIN_VELOCITY: f32 = 20.0;
    pub const FRICTION: f32 = 0.95;
    pub const DRAG_VELOCITY_SCALE: f32 = 60.0;
    pub const SCANNER_WIDTH: f32 = 8.0;
    pub const CODE_COLS: u32 = 40;
    pub const CODE_ROWS: u32 = 20;
    pub const CODE_REFRESH_CHANCE: f32 = 0.15;
    pub const MAX_DT: f32 = 0.1;

    // Ambient field
    pub const AMBIENT_COUNT: u32 = 150;
    pub const AMBIENT_DRIFT: f32 = 0.3;
    pub const AMBIENT_POINT_SIZE: f32 = 2.0;
    pub const AMBIENT_OPACITY: f32 = 0.4;
}

/// Particle scanner configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScannerConfig {
    pub surface_height: f32,
    pub light_bar_width: f32,
    pub overscan: f32,
    pub base_intensity: f32,
    pub scan_intensity: f32,
    pub base_max_particles: u32,
    pub scan_max_particles: u32,
    pub base_fade_zone: f32,
    pub scan_fade_zone: f32,
    pub base_glow: f32,
    pub scan_glow: f32,
    pub transition_speed: f32,
    pub prune_slack: u32,
    pub prune_batch: u32,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            surface_height: Params::SURFACE_HEIGHT,
            light_bar_width: Params::LIGHT_BAR_WIDTH,
            overscan: Params::OVERSCAN,
            base_intensity: Params::BASE_INTENSITY,
            scan_intensity: Params::SCAN_INTENSITY,
            base_max_particles: Params::BASE_MAX_PARTICLES,
            scan_max_particles: Params::SCAN_MAX_PARTICLES,
            base_fade_zone: Params::BASE_FADE_ZONE,
            scan_fade_zone: Params::SCAN_FADE_ZONE,
            base_glow: Params::BASE_GLOW,
            scan_glow: Params::SCAN_GLOW,
            transition_speed: Params::TRANSITION_SPEED,
            prune_slack: Params::PRUNE_SLACK,
            prune_batch: Params::PRUNE_BATCH,
        }
    }
}

impl ScannerConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        positive("surfaceHeight", self.surface_height)?;
        positive("lightBarWidth", self.light_bar_width)?;
        finite("overscan", self.overscan)?;
        positive("baseIntensity", self.base_intensity)?;
        positive("scanIntensity", self.scan_intensity)?;
        positive("baseFadeZone", self.base_fade_zone)?;
        positive("scanFadeZone", self.scan_fade_zone)?;
        positive("baseGlow", self.base_glow)?;
        positive("scanGlow", self.scan_glow)?;
        finite("transitionSpeed", self.transition_speed)?;
        if self.transition_speed <= 0.0 || self.transition_speed > 1.0 {
            return Err(ConfigError::TransitionSpeed(self.transition_speed));
        }
        if self.base_max_particles == 0 {
            return Err(ConfigError::Empty {
                field: "baseMaxParticles",
            });
        }
        if self.scan_max_particles < self.base_max_particles {
            return Err(ConfigError::ScanBelowBase {
                base: self.base_max_particles,
                scan: self.scan_max_particles,
            });
        }
        if self.prune_batch == 0 {
            return Err(ConfigError::Empty {
                field: "pruneBatch",
            });
        }
        Ok(())
    }

    /// Upper bound on the pool size: the largest target plus the pruning
    /// slack, plus the two spawns a single frame may add on top of that.
    pub fn pool_capacity(&self) -> usize {
        let top = self.base_max_particles.max(self.scan_max_particles);
        (top + self.prune_slack + self.prune_batch) as usize + 2
    }
}

/// Card stream (carousel) configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardStreamConfig {
    pub card_width: f32,
    pub card_gap: f32,
    pub card_count: u32,
    pub cruise_velocity: f32,
    pub min_velocity: f32,
    pub friction: f32,
    pub drag_velocity_scale: f32,
    pub scanner_width: f32,
    pub code_cols: u32,
    pub code_rows: u32,
    pub code_refresh_chance: f32,
}

impl Default for CardStreamConfig {
    fn default() -> Self {
        Self {
            card_width: Params::CARD_WIDTH,
            card_gap: Params::CARD_GAP,
            card_count: Params::CARD_COUNT,
            cruise_velocity: Params::CRUISE_VELOCITY,
            min_velocity: Params::MIN_VELOCITY,
            friction: Params::FRICTION,
            drag_velocity_scale: Params::DRAG_VELOCITY_SCALE,
            scanner_width: Params::SCANNER_WIDTH,
            code_cols: Params::CODE_COLS,
            code_rows: Params::CODE_ROWS,
            code_refresh_chance: Params::CODE_REFRESH_CHANCE,
        }
    }
}

impl CardStreamConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        positive("cardWidth", self.card_width)?;
        finite("cardGap", self.card_gap)?;
        positive("cruiseVelocity", self.cruise_velocity)?;
        positive("minVelocity", self.min_velocity)?;
        positive("dragVelocityScale", self.drag_velocity_scale)?;
        positive("scannerWidth", self.scanner_width)?;
        unit("friction", self.friction)?;
        unit("codeRefreshChance", self.code_refresh_chance)?;
        if self.card_count == 0 {
            return Err(ConfigError::Empty { field: "cardCount" });
        }
        if self.code_cols == 0 {
            return Err(ConfigError::Empty { field: "codeCols" });
        }
        if self.code_rows == 0 {
            return Err(ConfigError::Empty { field: "codeRows" });
        }
        Ok(())
    }

    /// Total width of the card line: every card plus its trailing gap.
    pub fn line_width(&self) -> f32 {
        (self.card_width + self.card_gap) * self.card_count as f32
    }
}

/// Background drift layer configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AmbientConfig {
    pub count: u32,
    /// Rightward drift in px per frame.
    pub drift: f32,
    pub point_size: f32,
    pub opacity: f32,
}

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            count: Params::AMBIENT_COUNT,
            drift: Params::AMBIENT_DRIFT,
            point_size: Params::AMBIENT_POINT_SIZE,
            opacity: Params::AMBIENT_OPACITY,
        }
    }
}

impl AmbientConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        finite("drift", self.drift)?;
        positive("pointSize", self.point_size)?;
        unit("opacity", self.opacity)?;
        if self.count == 0 {
            return Err(ConfigError::Empty { field: "count" });
        }
        Ok(())
    }
}

fn finite(field: &'static str, value: f32) -> ConfigResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

fn positive(field: &'static str, value: f32) -> ConfigResult<()> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn unit(field: &'static str, value: f32) -> ConfigResult<()> {
    finite(field, value)?;
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::NotUnit { field, value })
    }
}
