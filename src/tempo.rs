//! # Tempo Model
//!
//! Converts symbolic note values into seconds for a given tempo and time
//! signature.
//!
//! ## Duration Calculation
//! - One beat lasts `60 / bpm` seconds
//! - The beat is the time signature's beat type (`4` = quarter, `8` = eighth)
//! - A whole note therefore lasts `60 / bpm * beat_type` seconds
//! - A note value lasts its fraction of that; dotted values are × 1.5
//!
//! Example: at 90 bpm in 3/4 a dotted eighth is `60/90 * 4 * 1/8 * 1.5 = 0.5` s.
//!
//! ```rust
//! use theory::{NoteValue, Tempo};
//!
//! let tempo = Tempo::with_signature(60.0, 4, 4)?;
//! assert_eq!(tempo.duration(NoteValue::Quarter, false), 1.0);
//! assert_eq!(tempo.duration(NoteValue::Half, true), 3.0);
//! # Ok::<(), theory::TheoryError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TheoryError};

/// Time signature (e.g., 4/4, 3/4, 6/8)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeSignature {
    pub beats: u8,
    pub beat_type: u8,
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self {
            beats: 4,
            beat_type: 4,
        }
    }
}

impl TimeSignature {
    /// Validated constructor: `beats >= 1`, `beat_type` a power of two
    pub fn new(beats: u8, beat_type: u8) -> Result<Self> {
        if beats == 0 {
            return Err(TheoryError::RangeError(
                "time signature needs at least one beat per measure".to_string(),
            ));
        }
        if !beat_type.is_power_of_two() {
            return Err(TheoryError::RangeError(format!(
                "time signature beat type must be a power of two, got {}",
                beat_type
            )));
        }
        Ok(Self { beats, beat_type })
    }

    /// Parse `"N/D"`, e.g. `"3/4"` or `"6/8"`
    pub fn parse(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.trim().split('/').collect();
        if parts.len() != 2 {
            return Err(TheoryError::parse(s, "time signature must be in format N/D"));
        }

        let beats = parts[0]
            .trim()
            .parse()
            .map_err(|_| TheoryError::parse(s, "invalid time signature beats"))?;
        let beat_type = parts[1]
            .trim()
            .parse()
            .map_err(|_| TheoryError::parse(s, "invalid time signature beat type"))?;

        Self::new(beats, beat_type)
    }
}

impl FromStr for TimeSignature {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        TimeSignature::parse(s)
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.beats, self.beat_type)
    }
}

/// Note values from whole note down to sixty-fourth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteValue {
    Whole,
    Half,
    Quarter,
    Eighth,
    Sixteenth,
    ThirtySecond,
    SixtyFourth,
}

impl NoteValue {
    /// Returns the value as a fraction of a whole note
    pub fn as_fraction(&self) -> f64 {
        match self {
            NoteValue::Whole => 1.0,
            NoteValue::Half => 0.5,
            NoteValue::Quarter => 0.25,
            NoteValue::Eighth => 0.125,
            NoteValue::Sixteenth => 0.0625,
            NoteValue::ThirtySecond => 0.03125,
            NoteValue::SixtyFourth => 0.015625,
        }
    }
}

impl FromStr for NoteValue {
    type Err = TheoryError;

    /// Full names or one-letter abbreviations (`w h q e s t`)
    fn from_str(s: &str) -> Result<Self> {
        let value = match s.trim().to_ascii_lowercase().as_str() {
            "whole" | "w" => NoteValue::Whole,
            "half" | "h" => NoteValue::Half,
            "quarter" | "q" => NoteValue::Quarter,
            "eighth" | "e" => NoteValue::Eighth,
            "sixteenth" | "s" => NoteValue::Sixteenth,
            "thirty-second" | "thirtysecond" | "t" => NoteValue::ThirtySecond,
            "sixty-fourth" | "sixtyfourth" => NoteValue::SixtyFourth,
            _ => return Err(TheoryError::parse(s, "unknown note value")),
        };
        Ok(value)
    }
}

/// Beats per minute plus a time signature
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tempo {
    bpm: f64,
    time_signature: TimeSignature,
}

impl Tempo {
    pub fn new(bpm: f64, time_signature: TimeSignature) -> Result<Self> {
        if !bpm.is_finite() || bpm <= 0.0 {
            return Err(TheoryError::RangeError(format!(
                "bpm must be positive, got {}",
                bpm
            )));
        }
        let time_signature = TimeSignature::new(time_signature.beats, time_signature.beat_type)?;
        Ok(Self {
            bpm,
            time_signature,
        })
    }

    /// `Tempo::with_signature(80.0, 3, 4)` for 80 bpm in 3/4
    pub fn with_signature(bpm: f64, beats: u8, beat_type: u8) -> Result<Self> {
        Self::new(bpm, TimeSignature { beats, beat_type })
    }

    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    pub fn time_signature(&self) -> TimeSignature {
        self.time_signature
    }

    pub fn seconds_per_beat(&self) -> f64 {
        60.0 / self.bpm
    }

    /// Length in seconds of a note value, × 1.5 when dotted
    pub fn duration(&self, value: NoteValue, dotted: bool) -> f64 {
        let whole = self.seconds_per_beat() * self.time_signature.beat_type as f64;
        let base = whole * value.as_fraction();
        if dotted {
            base * 1.5
        } else {
            base
        }
    }

    /// Length of one full measure in seconds
    pub fn measure_duration(&self) -> f64 {
        self.beats_to_seconds(self.time_signature.beats as f64)
    }

    pub fn beats_to_seconds(&self, beats: f64) -> f64 {
        beats * self.seconds_per_beat()
    }
}
