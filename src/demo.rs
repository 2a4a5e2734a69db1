//! Built-in demo schedules
//!
//! Each demo renders straight into a [`Sequence`] using the same engine calls a
//! passage file would make.
//!
//! ```rust
//! use theory::demo::Demo;
//!
//! let sequence = Demo::parse("progression")?.render()?;
//! assert_eq!(sequence.len(), 26);
//! # Ok::<(), theory::TheoryError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::chord::Chord;
use crate::error::{Result, TheoryError};
use crate::interval::Interval;
use crate::note::Note;
use crate::playback::{Sequence, NOTE_AMPLITUDE};
use crate::scale::{Degree, Scale, ScaleType};
use crate::tempo::{NoteValue, Tempo};

/// Available demos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Demo {
    Birthday,
    Progression,
    Tour,
}

impl Demo {
    pub const ALL: [Demo; 3] = [Demo::Birthday, Demo::Progression, Demo::Tour];

    pub fn name(self) -> &'static str {
        match self {
            Demo::Birthday => "birthday",
            Demo::Progression => "progression",
            Demo::Tour => "tour",
        }
    }

    pub fn parse(name: &str) -> Result<Self> {
        let wanted = name.trim().to_ascii_lowercase();
        Demo::ALL
            .into_iter()
            .find(|demo| demo.name() == wanted)
            .ok_or_else(|| TheoryError::parse(name, "unknown demo (birthday, progression, tour)"))
    }

    /// Render with default settings (birthday in C4 at 90 bpm)
    pub fn render(self) -> Result<Sequence> {
        debug!(demo = self.name(), "rendering demo");
        match self {
            Demo::Birthday => happy_birthday(Note::parse("C4")?, 90.0),
            Demo::Progression => progression(),
            Demo::Tour => tour(),
        }
    }
}

impl FromStr for Demo {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        Demo::parse(s)
    }
}

impl fmt::Display for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// "Happy Birthday" in 3/4, melody over `root`, harmonized in the key a
/// fourth above.
///
/// The melody uses major-scale degrees I through VIII plus the minor seventh
/// above `root`. The accompaniment is IV (an octave down), I7, bVII (an
/// octave down) and IV in second inversion, each voice-matched to the first.
pub fn happy_birthday(root: Note, bpm: f64) -> Result<Sequence> {
    let tempo = Tempo::with_signature(bpm, 3, 4)?;
    let scale = Scale::new(root, ScaleType::Major);
    let second = scale.degree(Degree::Supertonic)?;
    let third = scale.degree(Degree::Mediant)?;
    let fourth = scale.degree(Degree::Subdominant)?;
    let fifth = scale.degree(Degree::Dominant)?;
    let sixth = scale.degree(Degree::Submediant)?;
    let octave = scale.degree(Degree::Octave)?;
    let flat_seventh = root.interval(Interval::MinorSeventh);

    let home = fourth.octave_down().chord("maj")?;
    let mut dominant = root.chord("7")?;
    let mut subtonic = flat_seventh.octave_down().chord("maj")?;
    let mut cadential = fourth.octave_down().chord("maj")?;
    cadential.invert(2)?;
    for chord in [&mut dominant, &mut subtonic, &mut cadential] {
        chord.match_voicing(&home);
    }

    let (h, q, e, s) = (
        NoteValue::Half,
        NoteValue::Quarter,
        NoteValue::Eighth,
        NoteValue::Sixteenth,
    );
    let melody = [
        (root, e, true),
        (root, s, false),
        (second, q, false),
        (root, q, false),
        (fourth, q, false),
        (third, h, false),
        (root, e, true),
        (root, s, false),
        (second, q, false),
        (root, q, false),
        (fifth, q, false),
        (fourth, h, false),
        (root, e, true),
        (root, s, false),
        (octave, q, false),
        (sixth, q, false),
        (fourth, q, false),
        (third, q, false),
        (second, q, false),
        (flat_seventh, e, true),
        (flat_seventh, s, false),
        (sixth, q, false),
        (fourth, q, false),
        (fifth, q, false),
        (fourth, h, false),
    ];
    // (melody index, chord, length)
    let accompaniment = [
        (2, &home, h),
        (5, &dominant, h),
        (11, &home, h),
        (17, &subtonic, h),
        (21, &cadential, h),
        (23, &dominant, q),
        (24, &home, h),
    ];

    let mut sequence = Sequence::new();
    let mut time = 0.0;
    for (index, (note, value, dotted)) in melody.iter().enumerate() {
        for (_, chord, length) in accompaniment.iter().filter(|(at, _, _)| *at == index) {
            sequence.play_chord(time, chord, tempo.duration(*length, false), 0.0)?;
        }
        time = sequence.play_note(time, note, tempo.duration(*value, *dotted), NOTE_AMPLITUDE)?;
    }
    Ok(sequence)
}

/// Dmin11, Gmin7, Dmin11, then Ebmin11 sliding to a raised C#dim7, at 80 bpm
pub fn progression() -> Result<Sequence> {
    let tempo = Tempo::with_signature(80.0, 4, 4)?;
    let dotted_half = tempo.duration(NoteValue::Half, true);
    let quarter = tempo.duration(NoteValue::Quarter, false);

    let d_minor = Chord::parse("Dmin11")?;
    let g_minor = Chord::parse("Gmin7")?;
    let e_flat_minor = Chord::parse("Ebmin11")?;
    let mut diminished = Chord::parse("C#dim7")?;
    diminished.raise();

    let mut sequence = Sequence::new();
    let mut time = 0.0;
    for chord in [&d_minor, &g_minor, &d_minor] {
        time = sequence.play_chord(time, chord, dotted_half, 0.0)?;
        time = sequence.rest(time, quarter)?;
    }
    time = sequence.play_chord(time, &e_flat_minor, dotted_half / 2.0, 0.0)?;
    time = sequence.play_chord(time, &diminished, dotted_half / 2.0, 0.0)?;
    sequence.rest(time, quarter)?;
    Ok(sequence)
}

/// A walk through the engine at 80 bpm, sections played back to back:
/// a single note, its pentatonic scale, the scale up a fourth and down an
/// octave, three rolled chords, a chord before and after voice matching, an
/// inversion and a figured-bass chord.
pub fn tour() -> Result<Sequence> {
    let tempo = Tempo::with_signature(80.0, 4, 4)?;
    let quarter = tempo.duration(NoteValue::Quarter, false);
    let half = tempo.duration(NoteValue::Half, false);
    let dotted_half = tempo.duration(NoteValue::Half, true);
    let sixteenth = tempo.duration(NoteValue::Sixteenth, false);

    let mut sequence = Sequence::new();
    let note = Note::parse("A5")?;
    let mut time = sequence.play_note(0.0, &note, quarter, NOTE_AMPLITUDE)?;

    let scale = Scale::new(note, ScaleType::PentMajor);
    let passes: [fn(&Note) -> Note; 3] = [
        |n| *n,
        |n| n.interval(Interval::PerfectFourth),
        |n| n.octave_down(),
    ];
    for pass in passes {
        for n in scale.notes() {
            time = sequence.play_note(time, &pass(n), quarter, NOTE_AMPLITUDE)?;
        }
    }

    let major = note.chord("maj")?;
    let tonic = scale.chord(Degree::Tonic, 3)?;
    let half_diminished = Chord::parse("Bbm7b5")?;
    for chord in [&major, &tonic, &half_diminished] {
        time = sequence.play_chord(time, chord, dotted_half, sixteenth)?;
        time = sequence.rest(time, quarter)?;
    }

    let mut matched = tonic.clone();
    matched.match_voicing(&major);
    time = sequence.play_chord(time, &major, half, 0.0)?;
    time = sequence.play_chord(time, &tonic, half, 0.0)?;
    time = sequence.rest(time, quarter)?;
    time = sequence.play_chord(time, &major, half, 0.0)?;
    time = sequence.play_chord(time, &matched, half, 0.0)?;

    let mut inverted = Chord::parse("F")?;
    inverted.invert(2)?;
    time = sequence.play_chord(time, &inverted, half, 0.0)?;
    sequence.play_chord(time, &Chord::parse("F/C")?, half, 0.0)?;
    Ok(sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::CHORD_AMPLITUDE;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_parse_demo_names() {
        assert_eq!(Demo::parse("birthday").unwrap(), Demo::Birthday);
        assert_eq!(" Progression ".parse::<Demo>().unwrap(), Demo::Progression);
        assert_eq!(Demo::Tour.to_string(), "tour");
        assert!(matches!(
            Demo::parse("symphony"),
            Err(TheoryError::ParseError { .. })
        ));
    }

    #[test]
    fn test_happy_birthday_schedule() {
        let sequence = happy_birthday(Note::parse("C4").unwrap(), 90.0).unwrap();
        // 25 melody notes, three 3-voice IV chords, two C7, one bVII, one IV 6/4
        assert_eq!(sequence.len(), 48);
        assert!(approx(sequence.end_time(), 16.0));

        let events = sequence.events();
        assert_eq!(events[0].note, "C4");
        assert!(approx(events[0].duration, 0.5 * 0.9));
        assert!(approx(events[1].start_time, 0.5));

        // The first chord enters on the downbeat after the pickup
        assert_eq!(events[2].note, "F3");
        assert_eq!(events[2].amplitude, CHORD_AMPLITUDE);
        assert!(approx(events[2].start_time, 2.0 / 3.0));
        assert_eq!(events[5].note, "D4");
    }

    #[test]
    fn test_happy_birthday_follows_root() {
        let sequence = happy_birthday(Note::parse("G4").unwrap(), 120.0).unwrap();
        assert_eq!(sequence.len(), 48);
        assert!(approx(sequence.end_time(), 12.0));
        assert_eq!(sequence.events()[0].note, "G4");
        assert!(happy_birthday(Note::parse("C4").unwrap(), 0.0).is_err());
    }

    #[test]
    fn test_progression_schedule() {
        let sequence = progression().unwrap();
        assert_eq!(sequence.len(), 26);
        assert!(approx(sequence.end_time(), 12.0));

        let last: Vec<&str> = sequence.events()[22..].iter().map(|e| e.note.as_str()).collect();
        assert_eq!(last, vec!["C#5", "E5", "G5", "Bb5"]);
        assert!(approx(sequence.events()[22].start_time, 10.125));
    }

    #[test]
    fn test_tour_schedule() {
        let sequence = tour().unwrap();
        assert_eq!(sequence.len(), 44);
        assert!(approx(sequence.end_time(), 30.75));

        // Rolled chords step by a sixteenth (0.1875 s at 80 bpm)
        let first_chord = &sequence.events()[16..19];
        assert!(approx(first_chord[1].start_time - first_chord[0].start_time, 0.1875));

        // F/C closes the tour with C in the bass
        assert_eq!(sequence.events()[41].note, "C4");
    }

    #[test]
    fn test_every_demo_renders() {
        for demo in Demo::ALL {
            assert!(!demo.render().unwrap().is_empty(), "{} rendered nothing", demo);
        }
    }
}
