//! Sequence builder
//!
//! Collects playback events in insertion order while tracking where the
//! passage ends.

use serde::Serialize;
use tracing::trace;

use super::types::{PlaybackEvent, CHORD_AMPLITUDE, NOTE_GATE};
use crate::chord::Chord;
use crate::error::{Result, TheoryError};
use crate::note::Note;

/// An ordered list of playback events
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Sequence {
    events: Vec<PlaybackEvent>,
    end_time: f64,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a gated note at `time`; returns `time + duration`
    pub fn play_note(&mut self, time: f64, note: &Note, duration: f64, amplitude: f64) -> Result<f64> {
        self.push(time, note, duration, amplitude, NOTE_GATE)
    }

    /// Like [`Sequence::play_note`] but the note sounds for its whole duration
    pub fn play_note_full(&mut self, time: f64, note: &Note, duration: f64, amplitude: f64) -> Result<f64> {
        self.push(time, note, duration, amplitude, 1.0)
    }

    /// Schedule every voice of `chord`, voice `i` delayed by `i * roll`; returns `time + duration`
    pub fn play_chord(&mut self, time: f64, chord: &Chord, duration: f64, roll: f64) -> Result<f64> {
        check_time("roll", roll)?;
        check_time("time", time)?;
        check_time("duration", duration)?;
        // The last voice starts latest; if it fits, every voice does
        let last_voice = chord.len().saturating_sub(1) as f64;
        check_time("last voice start", time + last_voice * roll)?;
        for (i, note) in chord.notes().iter().enumerate() {
            self.push(time + i as f64 * roll, note, duration, CHORD_AMPLITUDE, NOTE_GATE)?;
        }
        Ok(time + duration)
    }

    /// Silence; only moves the end of the sequence
    pub fn rest(&mut self, time: f64, duration: f64) -> Result<f64> {
        check_time("time", time)?;
        check_time("duration", duration)?;
        self.end_time = self.end_time.max(time + duration);
        Ok(time + duration)
    }

    pub fn events(&self) -> &[PlaybackEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<PlaybackEvent> {
        self.events
    }

    /// Latest nominal end of any note, chord or rest
    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn push(&mut self, time: f64, note: &Note, duration: f64, amplitude: f64, gate: f64) -> Result<f64> {
        check_time("time", time)?;
        check_time("duration", duration)?;
        if !(0.0..=1.0).contains(&amplitude) {
            return Err(TheoryError::RangeError(format!(
                "amplitude must be between 0 and 1, got {}",
                amplitude
            )));
        }

        let event = PlaybackEvent {
            start_time: time,
            duration: duration * gate,
            frequency: note.frequency(),
            amplitude,
            midi_note: note.midi(),
            note: note.to_string(),
        };
        trace!(note = %note, start = time, duration = event.duration, "scheduled note");
        self.events.push(event);
        self.end_time = self.end_time.max(time + duration);
        Ok(time + duration)
    }
}

fn check_time(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TheoryError::RangeError(format!(
            "{} must be a non-negative number of seconds, got {}",
            name, value
        )))
    }
}
