//! Caller-supplied defaults for settings a script leaves unset.

use serde::{Deserialize, Serialize};

use crate::ast::Waveform;
use crate::error::BzsError;

pub const DEFAULT_TEMPO: f64 = 120.0;
pub const DEFAULT_VOLUME: f64 = 0.2;

/// Player defaults.
///
/// Used whenever neither the track nor a top-level directive sets a value.
/// Missing fields in YAML take the defaults:
///
/// ```rust
/// use bzs::{PlayerOptions, Waveform};
///
/// let options = PlayerOptions::from_yaml("tempo: 90\nwaveform: sine\n").unwrap();
/// assert_eq!(options.tempo, 90.0);
/// assert_eq!(options.waveform, Waveform::Sine);
/// assert_eq!(options.volume, 0.2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlayerOptions {
    /// Beats per minute
    pub tempo: f64,
    pub waveform: Waveform,
    /// Output gain in [0, 1]
    pub volume: f64,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            tempo: DEFAULT_TEMPO,
            waveform: Waveform::default(),
            volume: DEFAULT_VOLUME,
        }
    }
}

impl PlayerOptions {
    /// Load options from YAML, then validate them
    pub fn from_yaml(content: &str) -> Result<Self, BzsError> {
        let options: PlayerOptions =
            serde_yaml::from_str(content).map_err(|e| BzsError::ConfigError(e.to_string()))?;
        options.validated()
    }

    /// Reject a non-positive tempo and clamp volume into [0, 1]
    pub fn validated(self) -> Result<Self, BzsError> {
        if !(self.tempo.is_finite() && self.tempo > 0.0) {
            return Err(BzsError::ConfigError(format!(
                "tempo must be greater than 0, got {}",
                self.tempo
            )));
        }
        if !self.volume.is_finite() {
            return Err(BzsError::ConfigError(format!(
                "volume must be a number between 0 and 1, got {}",
                self.volume
            )));
        }
        Ok(Self {
            volume: self.volume.clamp(0.0, 1.0),
            ..self
        })
    }
}
