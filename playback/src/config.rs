use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("minimum speed must be positive")]
    ZeroMinimum,
    #[error("speed range is empty ({min}ms > {max}ms)")]
    EmptyRange { min: u64, max: u64 },
    #[error("default speed {default}ms lies outside {min}..={max}ms")]
    DefaultOutOfRange { default: u64, min: u64, max: u64 },
}

/// Bounds on the delay between automatic steps, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackConfig {
    min_speed_ms: u64,
    max_speed_ms: u64,
    default_speed_ms: u64,
}

impl PlaybackConfig {
    pub const MIN_SPEED_MS: u64 = 100;
    pub const MAX_SPEED_MS: u64 = 2000;
    pub const DEFAULT_SPEED_MS: u64 = 500;

    pub fn new(
        min_speed_ms: u64,
        max_speed_ms: u64,
        default_speed_ms: u64,
    ) -> Result<Self, ConfigError> {
        if min_speed_ms == 0 {
            return Err(ConfigError::ZeroMinimum);
        }
        if min_speed_ms > max_speed_ms {
            return Err(ConfigError::EmptyRange {
                min: min_speed_ms,
                max: max_speed_ms,
            });
        }
        if !(min_speed_ms..=max_speed_ms).contains(&default_speed_ms) {
            return Err(ConfigError::DefaultOutOfRange {
                default: default_speed_ms,
                min: min_speed_ms,
                max: max_speed_ms,
            });
        }
        Ok(Self {
            min_speed_ms,
            max_speed_ms,
            default_speed_ms,
        })
    }

    pub fn min_speed_ms(&self) -> u64 {
        self.min_speed_ms
    }

    pub fn max_speed_ms(&self) -> u64 {
        self.max_speed_ms
    }

    pub fn default_speed_ms(&self) -> u64 {
        self.default_speed_ms
    }

    pub fn clamp(&self, speed_ms: u64) -> u64 {
        speed_ms.clamp(self.min_speed_ms, self.max_speed_ms)
    }

    pub(crate) fn delay(speed_ms: u64) -> Duration {
        Duration::from_millis(speed_ms)
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            min_speed_ms: Self::MIN_SPEED_MS,
            max_speed_ms: Self::MAX_SPEED_MS,
            default_speed_ms: Self::DEFAULT_SPEED_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bounds() {
        let config = PlaybackConfig::default();
        assert_eq!(config.clamp(50), 100);
        assert_eq!(config.clamp(700), 700);
        assert_eq!(config.clamp(5000), 2000);
        assert_eq!(config.default_speed_ms(), 500);
    }

    #[test]
    fn rejects_bad_ranges() {
        assert_eq!(PlaybackConfig::new(0, 10, 5), Err(ConfigError::ZeroMinimum));
        assert_eq!(
            PlaybackConfig::new(20, 10, 15),
            Err(ConfigError::EmptyRange { min: 20, max: 10 })
        );
        let err = PlaybackConfig::new(10, 20, 30).unwrap_err();
        assert_eq!(err.to_string(), "default speed 30ms lies outside 10..=20ms");
        assert!(PlaybackConfig::new(10, 10, 10).is_ok());
    }
}
