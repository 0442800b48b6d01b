//! Environment-driven configuration
//!
//! | Variable                      | Default      |
//! |-------------------------------|--------------|
//! | `RIDEGUIDE_TYPING_MS`         | 1000         |
//! | `RIDEGUIDE_SEARCH_MS`         | 1500         |
//! | `RIDEGUIDE_OPTION_STAGGER_MS` | 300          |
//! | `RIDEGUIDE_PROMPT_MS`         | 500          |
//! | `RIDEGUIDE_SEED`              | OS entropy   |
//! | `RIDEGUIDE_PEAK_HOURS`        | `8-10,17-20` |

use crate::fares::PeakWindows;
use crate::state_machine::Pacing;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },
    #[error("Invalid peak hours {0:?}, expected ranges like 8-10,17-20")]
    InvalidPeakHours(String),
}

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RideGuideConfig {
    pub pacing: Pacing,
    /// Fixed RNG seed for reproducible fares
    pub seed: Option<u64>,
    pub peak_windows: PeakWindows,
}

impl Default for RideGuideConfig {
    fn default() -> Self {
        Self {
            pacing: Pacing::default(),
            seed: None,
            peak_windows: PeakWindows::default(),
        }
    }
}

impl RideGuideConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from any variable lookup; unset variables take their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Pacing::default();
        let millis = |var: &'static str, default: Duration| -> Result<Duration, ConfigError> {
            match lookup(var) {
                Some(value) => parse_number(var, &value).map(Duration::from_millis),
                None => Ok(default),
            }
        };

        let pacing = Pacing {
            typing: millis("RIDEGUIDE_TYPING_MS", defaults.typing)?,
            search: millis("RIDEGUIDE_SEARCH_MS", defaults.search)?,
            option_stagger: millis("RIDEGUIDE_OPTION_STAGGER_MS", defaults.option_stagger)?,
            prompt: millis("RIDEGUIDE_PROMPT_MS", defaults.prompt)?,
        };

        let seed = lookup("RIDEGUIDE_SEED")
            .map(|value| parse_number("RIDEGUIDE_SEED", &value))
            .transpose()?;

        let peak_windows = match lookup("RIDEGUIDE_PEAK_HOURS") {
            Some(value) => value.parse()?,
            None => PeakWindows::default(),
        };

        Ok(Self {
            pacing,
            seed,
            peak_windows,
        })
    }
}

fn parse_number(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidNumber {
            var,
            value: value.to_string(),
        })
}
