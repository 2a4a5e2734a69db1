//! Playback event type definitions

use serde::Serialize;

/// Fraction of a note's nominal duration that actually sounds
pub const NOTE_GATE: f64 = 0.9;
/// Default amplitude for single notes
pub const NOTE_AMPLITUDE: f64 = 0.1;
/// Amplitude for each chord voice
pub const CHORD_AMPLITUDE: f64 = 0.05;

/// One voice to be triggered on the synthesizer
///
/// # Fields
/// - `start_time`: Seconds from the start of the sequence
/// - `duration`: Seconds the voice sounds (already gated)
/// - `frequency`: Fundamental frequency in Hz
/// - `amplitude`: Linear amplitude, 0.0 to 1.0
/// - `midi_note`: MIDI number of the pitch (A4 = 69), for display
/// - `note`: Spelled note name, for display
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackEvent {
    pub start_time: f64,
    pub duration: f64,
    pub frequency: f64,
    pub amplitude: f64,
    pub midi_note: i32,
    pub note: String,
}

impl PlaybackEvent {
    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration
    }
}
