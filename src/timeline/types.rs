//! Sound event type definitions

use serde::{Deserialize, Serialize};

use crate::ast::Waveform;

/// One resolved, timed unit of sound or silence.
///
/// # Fields
/// - `start_seconds`: Offset from the timeline origin
/// - `duration_seconds`: Always > 0
/// - `frequency_hz`: Pitch in Hz, `None` for a rest
/// - `waveform` / `volume`: Effective settings of the owning track
///
/// Rests are kept in the lowered timeline so tooling can see the silence,
/// but a renderer must skip them. Use [`audible`](super::audible) at the
/// renderer boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoundEvent {
    pub start_seconds: f64,
    pub duration_seconds: f64,
    pub frequency_hz: Option<f64>,
    pub waveform: Waveform,
    pub volume: f64,
}

impl SoundEvent {
    pub fn is_rest(&self) -> bool {
        self.frequency_hz.is_none()
    }

    pub fn end_seconds(&self) -> f64 {
        self.start_seconds + self.duration_seconds
    }
}
