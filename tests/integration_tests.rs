//! Integration tests for the BZS compiler
//!
//! Tests the full pipeline from script text to sound events.

use assert_approx_eq::assert_approx_eq;
use bzs::{compile, compile_audible, compile_with_options, BzsError, PlayerOptions, Waveform};

#[test]
fn test_tempo_60_quarter_note() {
    let events = compile("tempo = 60\nC4 4\n").unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].start_seconds, 0.0);
    assert_eq!(events[0].duration_seconds, 1.0);
    assert_approx_eq!(events[0].frequency_hz.unwrap(), 261.6256, 1e-3);
}

#[test]
fn test_delayed_track_sorted_after_undelayed() {
    let events = compile("@track a delay=1\nC4 4\n@track b\nE4 4\n").unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].start_seconds, 0.0);
    assert_approx_eq!(events[0].frequency_hz.unwrap(), 329.6276, 1e-3);
    assert_eq!(events[1].start_seconds, 0.5);
    assert_approx_eq!(events[1].frequency_hz.unwrap(), 261.6256, 1e-3);
}

#[test]
fn test_unknown_symbol_skipped() {
    let events = compile("C4 8 Z 4").unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].duration_seconds, 0.25);
}

#[test]
fn test_barline_transparency() {
    assert_eq!(compile("C4 4 D4 4").unwrap(), compile("C4 4 | D4 4").unwrap());
}

#[test]
fn test_a4_reference() {
    let events = compile("A4 4").unwrap();
    assert_approx_eq!(events[0].frequency_hz.unwrap(), 440.0, 1e-6);
}

#[test]
fn test_octave_law_through_pipeline() {
    let events = compile("C#2 4 C#3 4 C#4 4 C#5 4 C#6 4").unwrap();
    for pair in events.windows(2) {
        assert_approx_eq!(
            pair[1].frequency_hz.unwrap(),
            2.0 * pair[0].frequency_hz.unwrap(),
            1e-9
        );
    }
}

#[test]
fn test_full_script() {
    let source = r#"# Twinkle, two voices
tempo = 90
waveform = sine
volume = 0.3

@track melody
C4 4 C4 4 G4 4 G4 4 | A4 4 A4 4 G4 2 ||
F4 4 F4 4 E4 4 E4 4 | D4 4 D4 4 C4 2 ||

@track bass delay=4 waveform=square volume=0.15
C3 1 | F3 2 C3 2
"#;
    let events = compile(source).unwrap();
    assert_eq!(events.len(), 14 + 3);

    let beat = 60.0 / 90.0;
    let bass: Vec<_> = events.iter().filter(|e| e.waveform == Waveform::Square).collect();
    assert_eq!(bass.len(), 3);
    assert_approx_eq!(bass[0].start_seconds, 4.0 * beat, 1e-9);
    assert_approx_eq!(bass[0].duration_seconds, 4.0 * beat, 1e-9);
    assert!(bass.iter().all(|e| e.volume == 0.15));

    let melody: Vec<_> = events.iter().filter(|e| e.waveform == Waveform::Sine).collect();
    assert_eq!(melody.len(), 14);
    assert!(melody.iter().all(|e| e.volume == 0.3));
    assert_approx_eq!(melody[13].start_seconds, 14.0 * beat, 1e-9);

    assert!(events.windows(2).all(|w| w[0].start_seconds <= w[1].start_seconds));
}

#[test]
fn test_audible_events_have_frequencies() {
    let events = compile_audible("R 8 C4 8 R 4 | E4 2 R 1", &PlayerOptions::default()).unwrap();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e.frequency_hz.is_some()));
    assert_eq!(events[0].start_seconds, 0.25);
    assert_eq!(events[1].start_seconds, 1.0);
}

#[test]
fn test_options_from_yaml() {
    let options = PlayerOptions::from_yaml("tempo: 240\nwaveform: sawtooth\n").unwrap();
    let events = compile_with_options("C4 4 D4 4", &options).unwrap();
    assert_eq!(events[1].start_seconds, 0.25);
    assert_eq!(events[1].waveform, Waveform::Sawtooth);
    assert_eq!(events[1].volume, 0.2);
}

#[test]
fn test_directive_after_notes_fails_without_events() {
    let result = compile("C4 4\nD4 4\nwaveform = sine\n");
    match result {
        Err(BzsError::ParseError { line, column, .. }) => assert_eq!((line, column), (3, 1)),
        other => panic!("Expected ParseError, got {:?}", other),
    }
}

#[test]
fn test_lex_error() {
    assert!(matches!(compile("C4 4 ; D4 4"), Err(BzsError::LexError { line: 1, column: 6, .. })));
}

#[test]
fn test_empty_input() {
    assert!(compile("").unwrap().is_empty());
    assert!(compile("\n\n# nothing here\n").unwrap().is_empty());
}

#[test]
fn test_events_serialize_camel_case() {
    let events = compile("C4 4 R 4").unwrap();
    let yaml = serde_yaml::to_string(&events).unwrap();
    assert!(yaml.contains("startSeconds: 0.0"));
    assert!(yaml.contains("durationSeconds: 0.5"));
    assert!(yaml.contains("frequencyHz: null"));
    assert!(yaml.contains("waveform: square"));
}

#[test]
fn test_caller_tempo_must_be_positive() {
    for tempo in [0.0, -60.0, f64::NAN] {
        let options = PlayerOptions { tempo, ..PlayerOptions::default() };
        assert!(matches!(
            compile_with_options("C4 4 D4 4", &options),
            Err(BzsError::ConfigError(_))
        ));
        assert!(compile_audible("C4 4", &options).is_err());
    }
}

#[test]
fn test_caller_volume_clamped() {
    let options = PlayerOptions { volume: 3.0, ..PlayerOptions::default() };
    let events = compile_with_options("C4 4", &options).unwrap();
    assert_eq!(events[0].volume, 1.0);
}

#[test]
fn test_huge_numbers_rejected() {
    let digits = "9".repeat(400);
    assert!(matches!(
        compile(&format!("tempo = {}\nC4 4\n", digits)),
        Err(BzsError::LexError { .. })
    ));
    assert!(matches!(
        compile(&format!("@track a delay={}\nC4 4\n", digits)),
        Err(BzsError::LexError { .. })
    ));
}

#[test]
fn test_all_durations_positive_and_starts_non_negative() {
    let events = compile("tempo = 0.5\n@track a delay=3\nC4 64 R 1\n@track b tempo=1000\nD4 2\n").unwrap();
    assert!(events.iter().all(|e| e.duration_seconds > 0.0 && e.start_seconds >= 0.0));
}
