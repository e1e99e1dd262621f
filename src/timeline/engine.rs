//! Timeline generation engine
//!
//! Converts a parsed script into sound events with absolute start times in
//! seconds.

use crate::ast::*;
use crate::options::PlayerOptions;
use super::types::SoundEvent;

/// Settings after falling back through track → script → caller defaults
struct Resolved {
    tempo: f64,
    waveform: Waveform,
    volume: f64,
}

impl Resolved {
    fn for_track(track: &Track, globals: Settings, defaults: &PlayerOptions) -> Self {
        let settings = track.settings.or(globals);
        Self {
            tempo: settings.tempo.unwrap_or(defaults.tempo),
            waveform: settings.waveform.unwrap_or(defaults.waveform),
            volume: settings.volume.unwrap_or(defaults.volume),
        }
    }

    fn beat_seconds(&self) -> f64 {
        60.0 / self.tempo
    }
}

/// Lower one track, in token order
fn lower_track(track: &Track, globals: Settings, defaults: &PlayerOptions) -> Vec<SoundEvent> {
    let resolved = Resolved::for_track(track, globals, defaults);
    let beat_seconds = resolved.beat_seconds();
    let offset = track.delay_beats * beat_seconds;

    let mut cursor = 0.0;
    track
        .tokens
        .iter()
        .map(|token| {
            let duration_seconds = token.beats() * beat_seconds;
            let event = SoundEvent {
                start_seconds: offset + cursor,
                duration_seconds,
                frequency_hz: match token.sound {
                    Sound::Rest => None,
                    Sound::Note(pitch) => Some(pitch.frequency()),
                },
                waveform: resolved.waveform,
                volume: resolved.volume,
            };
            cursor += duration_seconds;
            event
        })
        .collect()
}

/// Lower a script into a time-ordered list of sound events.
///
/// Every track starts at time 0 plus its delay; events from different
/// tracks may overlap. The result is sorted by `start_seconds` with a stable
/// sort, so simultaneous events keep track order, then token order.
///
/// Rests are included. Pass the result through [`audible`] before scheduling.
///
/// # Example
/// ```rust
/// use bzs::{parse_script, timeline::lower, PlayerOptions};
///
/// let script = parse_script("@track a delay=1\nC4 4\n@track b\nE4 4\n").unwrap();
/// let events = lower(&script, &PlayerOptions::default());
///
/// // 120 BPM: one beat of delay is half a second
/// assert_eq!(events[0].start_seconds, 0.0);
/// assert_eq!(events[1].start_seconds, 0.5);
/// ```
pub fn lower(script: &Script, defaults: &PlayerOptions) -> Vec<SoundEvent> {
    let mut events: Vec<SoundEvent> = script
        .tracks
        .iter()
        .flat_map(|track| lower_track(track, script.globals, defaults))
        .collect();

    events.sort_by(|a, b| a.start_seconds.total_cmp(&b.start_seconds));
    events
}

/// Events that produce sound, i.e. everything except rests
pub fn audible(events: &[SoundEvent]) -> impl Iterator<Item = &SoundEvent> {
    events.iter().filter(|event| !event.is_rest())
}

/// Time at which the last event stops sounding, 0 for an empty timeline
pub fn end_seconds(events: &[SoundEvent]) -> f64 {
    events
        .iter()
        .map(SoundEvent::end_seconds)
        .fold(0.0, f64::max)
}
