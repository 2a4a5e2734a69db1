//! # Playback Module
//!
//! Turn notes and chords into timed playback events for an external synthesizer.
//!
//! ## Purpose
//! The theory engine decides *what* to play; a synthesizer needs *when*, *how
//! long*, *which frequency* and *how loud*. This module produces exactly those
//! tuples and nothing more: no audio, no clocks, no threads.
//!
//! ## Sub-modules
//! - `types` - PlaybackEvent definition and default playback constants
//! - `sequence` - Sequence builder (`play_note`, `play_chord`, `rest`)
//!
//! ## Timing Conventions
//! - Times and durations are in seconds, starting at 0.0
//! - Every `play_*` call returns the time at which the next event should start,
//!   so calls chain: `time = seq.play_note(time, &note, quarter, 0.1)?`
//! - Notes sound for 90% of their nominal duration (the gate) so repeated
//!   notes stay separate; `play_note_full` keeps the whole duration
//! - Chords can be rolled: voice `i` starts `i * roll` seconds after the first
//!
//! ## Example
//! ```rust
//! use theory::playback::{Sequence, NOTE_AMPLITUDE};
//! use theory::{Chord, Note, NoteValue, Tempo};
//!
//! let tempo = Tempo::with_signature(120.0, 4, 4)?;
//! let quarter = tempo.duration(NoteValue::Quarter, false);
//!
//! let mut seq = Sequence::new();
//! let mut time = 0.0;
//! time = seq.play_note(time, &Note::parse("A4")?, quarter, NOTE_AMPLITUDE)?;
//! time = seq.play_chord(time, &Chord::parse("Dm")?, quarter, 0.0)?;
//!
//! assert_eq!(time, 1.0);
//! assert_eq!(seq.len(), 4);
//! assert_eq!(seq.events()[0].frequency, 440.0);
//! # Ok::<(), theory::TheoryError>(())
//! ```

mod sequence;
mod types;


pub use sequence::Sequence;
pub use types::{PlaybackEvent, CHORD_AMPLITUDE, NOTE_AMPLITUDE, NOTE_GATE};
