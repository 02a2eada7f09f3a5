//! Animation configuration and validation.

use crate::EasingCurve;

/// Default animation duration in milliseconds.
pub const DEFAULT_DURATION_MS: f64 = 1000.0;

/// Timing configuration for a single animation run.
///
/// All fields are plain data and immutable for the animation's lifetime;
/// the lifecycle callbacks live separately in
/// [`AnimationCallbacks`](crate::AnimationCallbacks).
///
/// ## Example
///
/// ```rust
/// use tween_driver::{AnimationConfig, EasingCurve};
///
/// let config = AnimationConfig {
///     duration_ms: 250.0,
///     easing: EasingCurve::EASE_OUT,
///     ..AnimationConfig::default()
/// };
/// assert_eq!(config.delay_ms, 0.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct AnimationConfig {
    /// Total animation duration in milliseconds. `0` completes immediately.
    pub duration_ms: f64,
    /// Milliseconds to wait before the first step callback. Frames are
    /// still scheduled during the delay so the clock keeps advancing.
    pub delay_ms: f64,
    /// Easing curve applied to linear progress.
    pub easing: EasingCurve,
    /// Fast-forward to completion when the platform reports an active
    /// reduced-motion preference.
    pub respect_reduced_motion: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            delay_ms: 0.0,
            easing: EasingCurve::LINEAR,
            respect_reduced_motion: true,
        }
    }
}

impl AnimationConfig {
    /// Check the configuration for values the animator cannot drive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.duration_ms.is_finite() || self.duration_ms < 0.0 {
            return Err(ConfigError::InvalidDuration {
                duration_ms: self.duration_ms,
            });
        }
        if !self.delay_ms.is_finite() || self.delay_ms < 0.0 {
            return Err(ConfigError::InvalidDelay {
                delay_ms: self.delay_ms,
            });
        }
        if !self.easing.is_well_formed() {
            return Err(ConfigError::InvalidCurve {
                x1: self.easing.x1,
                x2: self.easing.x2,
            });
        }
        Ok(())
    }

    /// Parse an `AnimationConfig` from a TOML string.
    ///
    /// Missing fields fall back to their defaults, so a snippet like
    /// `duration_ms = 250.0` is a complete configuration.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}

/// Error type for configuration validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Duration is negative or non-finite
    InvalidDuration { duration_ms: f64 },
    /// Delay is negative or non-finite
    InvalidDelay { delay_ms: f64 },
    /// Easing x coordinates leave [0, 1] or are non-finite
    InvalidCurve { x1: f64, x2: f64 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidDuration { duration_ms } => {
                write!(
                    f,
                    "Duration must be finite and non-negative, got {}",
                    duration_ms
                )
            }
            ConfigError::InvalidDelay { delay_ms } => {
                write!(f, "Delay must be finite and non-negative, got {}", delay_ms)
            }
            ConfigError::InvalidCurve { x1, x2 } => {
                write!(
                    f,
                    "Easing x coordinates must be finite and within [0, 1], got x1={} x2={}",
                    x1, x2
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
