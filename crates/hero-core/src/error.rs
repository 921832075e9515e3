use thiserror::Error;

/// Reasons a [`ScannerConfig`](crate::ScannerConfig),
/// [`CardStreamConfig`](crate::CardStreamConfig) or
/// [`AmbientConfig`](crate::AmbientConfig) is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("`{field}` must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("`{field}` must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("`transitionSpeed` must lie in (0, 1], got {0}")]
    TransitionSpeed(f32),

    #[error("`scanMaxParticles` ({scan}) is below `baseMaxParticles` ({base})")]
    ScanBelowBase { base: u32, scan: u32 },

    #[error("`{field}` must be at least 1")]
    Empty { field: &'static str },

    #[error("`{field}` must lie in [0, 1], got {value}")]
    NotUnit { field: &'static str, value: f32 },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
