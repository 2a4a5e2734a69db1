//! # Passage Files
//!
//! A passage is a YAML document describing tempo, time signature and a list
//! of steps (chords, notes, rests). It renders into a playback [`Sequence`].
//!
//! ## Format
//! ```yaml
//! title: Minor eleventh progression   # optional
//! tempo: 80                           # bpm, required
//! time-signature: 4/4                 # optional, default 4/4
//! roll: s                             # optional default chord roll (a note value)
//! steps:
//!   - chord: Dmin11
//!     value: h
//!     dotted: true
//!   - rest: q
//!   - chord: C#dim7
//!     value: h
//!     raise: true
//!     match: true                     # align with the previous chord
//!   - note: A5
//!     value: q
//!     amplitude: 0.2
//! ```
//!
//! ## Chord Step Options
//! Applied in this order: `invert: n`, then `raise` / `lower`, then `match`
//! (voice-match against the chord of the previous chord step).
//!
//! ## Errors
//! - YAML syntax errors and malformed steps → `ConfigError`
//! - Bad chord symbols, notes or note values → `ParseError`
//! - Bad tempo, inversions or amplitudes → `RangeError`

use serde::Deserialize;
use tracing::debug;

use crate::chord::Chord;
use crate::error::{Result, TheoryError};
use crate::note::Note;
use crate::playback::{Sequence, NOTE_AMPLITUDE};
use crate::tempo::{NoteValue, Tempo, TimeSignature};

/// Raw passage for YAML deserialization
#[derive(Deserialize, Debug)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawPassage {
    title: Option<String>,
    tempo: f64,
    time_signature: Option<String>,
    roll: Option<String>,
    #[serde(default)]
    steps: Vec<RawStep>,
}

/// Raw step for YAML deserialization
#[derive(Deserialize, Debug)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawStep {
    chord: Option<String>,
    note: Option<String>,
    rest: Option<String>,
    value: Option<String>,
    #[serde(default)]
    dotted: bool,
    #[serde(default)]
    raise: bool,
    #[serde(default)]
    lower: bool,
    invert: Option<usize>,
    #[serde(rename = "match", default)]
    match_previous: bool,
    roll: Option<String>,
    amplitude: Option<f64>,
}

/// One step of a passage
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Chord {
        chord: Chord,
        value: NoteValue,
        dotted: bool,
        roll: Option<NoteValue>,
    },
    Note {
        note: Note,
        value: NoteValue,
        dotted: bool,
        amplitude: f64,
    },
    Rest {
        value: NoteValue,
        dotted: bool,
    },
}

/// A parsed, validated passage
#[derive(Debug, Clone, PartialEq)]
pub struct Passage {
    pub title: Option<String>,
    pub tempo: Tempo,
    pub roll: Option<NoteValue>,
    pub steps: Vec<Step>,
}

impl Passage {
    /// Parse a passage YAML document
    pub fn from_yaml(source: &str) -> Result<Self> {
        let raw: RawPassage =
            serde_yaml::from_str(source).map_err(|e| TheoryError::ConfigError(e.to_string()))?;

        let time_signature = match &raw.time_signature {
            Some(ts) => TimeSignature::parse(ts)?,
            None => TimeSignature::default(),
        };
        let tempo = Tempo::new(raw.tempo, time_signature)?;
        let roll = raw.roll.as_deref().map(str::parse).transpose()?;

        let mut steps = Vec::with_capacity(raw.steps.len());
        let mut previous_chord: Option<Chord> = None;
        for (index, raw_step) in raw.steps.into_iter().enumerate() {
            let step = parse_step(index + 1, raw_step, previous_chord.as_ref())?;
            if let Step::Chord { chord, .. } = &step {
                previous_chord = Some(chord.clone());
            }
            steps.push(step);
        }

        debug!(title = ?raw.title, steps = steps.len(), "loaded passage");
        Ok(Self {
            title: raw.title,
            tempo,
            roll,
            steps,
        })
    }

    /// Schedule every step back to back
    pub fn render(&self) -> Result<Sequence> {
        let mut sequence = Sequence::new();
        let mut time = 0.0;
        for step in &self.steps {
            time = match step {
                Step::Chord {
                    chord,
                    value,
                    dotted,
                    roll,
                } => {
                    let roll = roll
                        .or(self.roll)
                        .map(|r| self.tempo.duration(r, false))
                        .unwrap_or(0.0);
                    sequence.play_chord(time, chord, self.tempo.duration(*value, *dotted), roll)?
                }
                Step::Note {
                    note,
                    value,
                    dotted,
                    amplitude,
                } => sequence.play_note(time, note, self.tempo.duration(*value, *dotted), *amplitude)?,
                Step::Rest { value, dotted } => {
                    sequence.rest(time, self.tempo.duration(*value, *dotted))?
                }
            };
        }
        Ok(sequence)
    }
}

fn parse_step(number: usize, raw: RawStep, previous_chord: Option<&Chord>) -> Result<Step> {
    let kinds = [raw.chord.is_some(), raw.note.is_some(), raw.rest.is_some()];
    if kinds.iter().filter(|&&present| present).count() != 1 {
        return Err(TheoryError::ConfigError(format!(
            "step {} must have exactly one of chord, note or rest",
            number
        )));
    }

    if let Some(rest) = raw.rest {
        return Ok(Step::Rest {
            value: rest.parse()?,
            dotted: raw.dotted,
        });
    }

    let value: NoteValue = raw
        .value
        .as_deref()
        .ok_or_else(|| TheoryError::ConfigError(format!("step {} is missing a value", number)))?
        .parse()?;

    if let Some(note) = raw.note {
        return Ok(Step::Note {
            note: Note::parse(&note)?,
            value,
            dotted: raw.dotted,
            amplitude: raw.amplitude.unwrap_or(NOTE_AMPLITUDE),
        });
    }

    let symbol = raw.chord.unwrap_or_default();
    let mut chord = Chord::parse(&symbol)?;
    if let Some(count) = raw.invert {
        chord.invert(count)?;
    }
    if raw.raise {
        chord.raise();
    }
    if raw.lower {
        chord.lower();
    }
    if raw.match_previous {
        let reference = previous_chord.ok_or_else(|| {
            TheoryError::ConfigError(format!(
                "step {} asks to match but no chord comes before it",
                number
            ))
        })?;
        chord.match_voicing(reference);
    }

    Ok(Step::Chord {
        chord,
        value,
        dotted: raw.dotted,
        roll: raw.roll.as_deref().map(str::parse).transpose()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROGRESSION: &str = r#"
title: Minor eleventh progression
tempo: 80
time-signature: 4/4
steps:
  - chord: Dmin11
    value: h
    dotted: true
  - rest: q
  - chord: Gmin7
    value: h
    dotted: true
  - rest: q
  - chord: C#dim7
    value: h
    raise: true
"#;

    #[test]
    fn test_parse_progression() {
        let passage = Passage::from_yaml(PROGRESSION).unwrap();
        assert_eq!(passage.title.as_deref(), Some("Minor eleventh progression"));
        assert_eq!(passage.tempo.bpm(), 80.0);
        assert_eq!(passage.steps.len(), 5);
        match &passage.steps[4] {
            Step::Chord { chord, .. } => assert_eq!(chord.to_string(), "C#5 E5 G5 Bb5"),
            other => panic!("expected chord, got {:?}", other),
        }
    }

    #[test]
    fn test_render_progression() {
        let sequence = Passage::from_yaml(PROGRESSION).unwrap().render().unwrap();
        // 6 + 4 + 4 voices
        assert_eq!(sequence.len(), 14);
        // dotted half (2.25) + quarter rest (0.75), twice, then a half (1.5)
        assert!((sequence.end_time() - 7.5).abs() < 1e-9);
        assert!((sequence.events()[6].start_time - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_defaults() {
        let passage = Passage::from_yaml("tempo: 120\nsteps:\n  - note: A4\n    value: q\n").unwrap();
        assert_eq!(passage.tempo.time_signature(), TimeSignature::default());
        assert_eq!(passage.roll, None);
        let sequence = passage.render().unwrap();
        assert_eq!(sequence.events()[0].amplitude, NOTE_AMPLITUDE);
        assert_eq!(sequence.end_time(), 0.5);
    }

    #[test]
    fn test_match_and_roll() {
        let source = r#"
tempo: 60
roll: s
steps:
  - chord: Cmaj
    value: w
  - chord: G7
    value: w
    match: true
    roll: e
"#;
        let passage = Passage::from_yaml(source).unwrap();
        match &passage.steps[1] {
            Step::Chord { chord, roll, .. } => {
                assert_eq!(chord.to_string(), "G3 B3 D4 F4");
                assert_eq!(*roll, Some(NoteValue::Eighth));
            }
            other => panic!("expected chord, got {:?}", other),
        }

        let sequence = passage.render().unwrap();
        // First chord rolls by sixteenths (0.25 s), second by eighths (0.5 s)
        assert_eq!(sequence.events()[1].start_time, 0.25);
        assert_eq!(sequence.events()[4].start_time, 4.5);
    }

    #[test]
    fn test_invert_step() {
        let source = "tempo: 60\nsteps:\n  - chord: F\n    value: h\n    invert: 2\n";
        let passage = Passage::from_yaml(source).unwrap();
        match &passage.steps[0] {
            Step::Chord { chord, .. } => assert_eq!(chord.to_string(), "C5 F5 A5"),
            other => panic!("expected chord, got {:?}", other),
        }
    }

    #[test]
    fn test_config_errors() {
        assert!(matches!(
            Passage::from_yaml("tempo: [oops"),
            Err(TheoryError::ConfigError(_))
        ));
        assert!(matches!(
            Passage::from_yaml("steps: []"),
            Err(TheoryError::ConfigError(_))
        ));
        assert!(matches!(
            Passage::from_yaml("tempo: 60\nsteps:\n  - chord: C\n    note: C4\n    value: q\n"),
            Err(TheoryError::ConfigError(_))
        ));
        assert!(matches!(
            Passage::from_yaml("tempo: 60\nsteps:\n  - chord: C\n"),
            Err(TheoryError::ConfigError(_))
        ));
        assert!(matches!(
            Passage::from_yaml("tempo: 60\nsteps:\n  - chord: C\n    value: q\n    match: true\n"),
            Err(TheoryError::ConfigError(_))
        ));
        assert!(matches!(
            Passage::from_yaml("tempo: 60\nsteps:\n  - chord: C\n    value: q\n    colour: red\n"),
            Err(TheoryError::ConfigError(_))
        ));
    }

    #[test]
    fn test_unknown_top_level_keys_are_rejected() {
        for source in [
            "tempo: 60\ntime_signature: 3/4\n",
            "tempo: 60\nrol: s\n",
        ] {
            assert!(
                matches!(Passage::from_yaml(source), Err(TheoryError::ConfigError(_))),
                "{:?} should not be accepted",
                source
            );
        }
    }

    #[test]
    fn test_engine_errors_propagate() {
        assert!(matches!(
            Passage::from_yaml("tempo: 0\nsteps: []\n"),
            Err(TheoryError::RangeError(_))
        ));
        assert!(matches!(
            Passage::from_yaml("tempo: 60\ntime-signature: 4/5\n"),
            Err(TheoryError::RangeError(_))
        ));
        assert!(matches!(
            Passage::from_yaml("tempo: 60\nsteps:\n  - chord: Xmaj\n    value: q\n"),
            Err(TheoryError::ParseError { .. })
        ));
        assert!(matches!(
            Passage::from_yaml("tempo: 60\nsteps:\n  - chord: C\n    value: q\n    invert: 3\n"),
            Err(TheoryError::RangeError(_))
        ));
        assert!(matches!(
            Passage::from_yaml("tempo: 60\nsteps:\n  - rest: forever\n"),
            Err(TheoryError::ParseError { .. })
        ));
        assert!(matches!(
            Passage::from_yaml("tempo: 60\nsteps:\n  - note: A999999999\n    value: q\n"),
            Err(TheoryError::RangeError(_))
        ));
        let loud = Passage::from_yaml("tempo: 60\nsteps:\n  - note: C4\n    value: q\n    amplitude: 2.0\n")
            .unwrap();
        assert!(matches!(loud.render(), Err(TheoryError::RangeError(_))));
    }
}
