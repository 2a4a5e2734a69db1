//! # Scale Model
//!
//! A [`Scale`] is the fixed sequence of notes produced by applying a
//! [`ScaleType`] pattern to a root note.
//!
//! ## Spelling
//! Every scale type stores, per degree, the distance from the root in
//! semitones *and* in letter names. Heptatonic scales use each letter once,
//! so C major never contains a B# and F major spells its fourth as Bb.
//! Pentatonic and blues scales skip letters the way they are written on paper
//! (A major pentatonic = A B C# E F#).
//!
//! ## Degrees
//! Degrees are 1-based (`I` .. `VIII`). `VIII` always means the root one
//! octave up, whatever the scale length.
//!
//! ## Diatonic Chords
//! [`Scale::chord`] stacks every other scale tone starting at a degree, so the
//! chord quality falls out of the scale itself:
//! ```rust
//! use theory::{Degree, Note, Scale, ScaleType};
//!
//! let c_major = Scale::new(Note::parse("C4")?, ScaleType::Major);
//! let v7 = c_major.chord(Degree::Dominant, 4)?;
//! assert_eq!(v7.to_string(), "G4 B4 D5 F5");
//! assert_eq!(v7.symbol().as_deref(), Some("G7"));
//! # Ok::<(), theory::TheoryError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use crate::chord::Chord;
use crate::error::{Result, TheoryError};
use crate::note::Note;

/// Scale types, each a closed (semitones, letter steps) table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScaleType {
    Major,
    /// Natural minor
    Minor,
    HarmonicMinor,
    /// Ascending melodic minor
    MelodicMinor,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Locrian,
    PentMajor,
    PentMinor,
    Blues,
    WholeTone,
}

impl ScaleType {
    pub const ALL: [ScaleType; 13] = [
        ScaleType::Major,
        ScaleType::Minor,
        ScaleType::HarmonicMinor,
        ScaleType::MelodicMinor,
        ScaleType::Dorian,
        ScaleType::Phrygian,
        ScaleType::Lydian,
        ScaleType::Mixolydian,
        ScaleType::Locrian,
        ScaleType::PentMajor,
        ScaleType::PentMinor,
        ScaleType::Blues,
        ScaleType::WholeTone,
    ];

    /// `(semitones, letter steps)` above the root for every degree
    pub fn pattern(self) -> &'static [(i32, i32)] {
        match self {
            ScaleType::Major => &[(0, 0), (2, 1), (4, 2), (5, 3), (7, 4), (9, 5), (11, 6)],
            ScaleType::Minor => &[(0, 0), (2, 1), (3, 2), (5, 3), (7, 4), (8, 5), (10, 6)],
            ScaleType::HarmonicMinor => &[(0, 0), (2, 1), (3, 2), (5, 3), (7, 4), (8, 5), (11, 6)],
            ScaleType::MelodicMinor => &[(0, 0), (2, 1), (3, 2), (5, 3), (7, 4), (9, 5), (11, 6)],
            ScaleType::Dorian => &[(0, 0), (2, 1), (3, 2), (5, 3), (7, 4), (9, 5), (10, 6)],
            ScaleType::Phrygian => &[(0, 0), (1, 1), (3, 2), (5, 3), (7, 4), (8, 5), (10, 6)],
            ScaleType::Lydian => &[(0, 0), (2, 1), (4, 2), (6, 3), (7, 4), (9, 5), (11, 6)],
            ScaleType::Mixolydian => &[(0, 0), (2, 1), (4, 2), (5, 3), (7, 4), (9, 5), (10, 6)],
            ScaleType::Locrian => &[(0, 0), (1, 1), (3, 2), (5, 3), (6, 4), (8, 5), (10, 6)],
            ScaleType::PentMajor => &[(0, 0), (2, 1), (4, 2), (7, 4), (9, 5)],
            ScaleType::PentMinor => &[(0, 0), (3, 2), (5, 3), (7, 4), (10, 6)],
            ScaleType::Blues => &[(0, 0), (3, 2), (5, 3), (6, 3), (7, 4), (10, 6)],
            ScaleType::WholeTone => &[(0, 0), (2, 1), (4, 2), (6, 3), (8, 4), (10, 5)],
        }
    }

    /// Number of notes before the octave
    pub fn degree_count(self) -> usize {
        self.pattern().len()
    }

    pub fn name(self) -> &'static str {
        match self {
            ScaleType::Major => "major",
            ScaleType::Minor => "minor",
            ScaleType::HarmonicMinor => "harmonic-minor",
            ScaleType::MelodicMinor => "melodic-minor",
            ScaleType::Dorian => "dorian",
            ScaleType::Phrygian => "phrygian",
            ScaleType::Lydian => "lydian",
            ScaleType::Mixolydian => "mixolydian",
            ScaleType::Locrian => "locrian",
            ScaleType::PentMajor => "pent-major",
            ScaleType::PentMinor => "pent-minor",
            ScaleType::Blues => "blues",
            ScaleType::WholeTone => "whole-tone",
        }
    }
}

impl FromStr for ScaleType {
    type Err = TheoryError;

    /// Case-insensitive; `-`, `_` and spaces are ignored (`"PentMajor"`, `"pent-major"`)
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let scale_type = match key.as_str() {
            "major" | "ionian" => ScaleType::Major,
            "minor" | "naturalminor" | "aeolian" => ScaleType::Minor,
            "harmonicminor" => ScaleType::HarmonicMinor,
            "melodicminor" => ScaleType::MelodicMinor,
            "dorian" => ScaleType::Dorian,
            "phrygian" => ScaleType::Phrygian,
            "lydian" => ScaleType::Lydian,
            "mixolydian" => ScaleType::Mixolydian,
            "locrian" => ScaleType::Locrian,
            "pentmajor" | "majorpentatonic" | "pentatonicmajor" => ScaleType::PentMajor,
            "pentminor" | "minorpentatonic" | "pentatonicminor" => ScaleType::PentMinor,
            "blues" => ScaleType::Blues,
            "wholetone" => ScaleType::WholeTone,
            _ => return Err(TheoryError::parse(s, "unknown scale type")),
        };
        Ok(scale_type)
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Scale degrees I through VIII
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Degree {
    Tonic,
    Supertonic,
    Mediant,
    Subdominant,
    Dominant,
    Submediant,
    Leading,
    /// The tonic one octave up (VIII)
    Octave,
}

impl Degree {
    pub const ALL: [Degree; 8] = [
        Degree::Tonic,
        Degree::Supertonic,
        Degree::Mediant,
        Degree::Subdominant,
        Degree::Dominant,
        Degree::Submediant,
        Degree::Leading,
        Degree::Octave,
    ];

    /// 1-based degree number
    pub fn number(self) -> usize {
        match self {
            Degree::Tonic => 1,
            Degree::Supertonic => 2,
            Degree::Mediant => 3,
            Degree::Subdominant => 4,
            Degree::Dominant => 5,
            Degree::Submediant => 6,
            Degree::Leading => 7,
            Degree::Octave => 8,
        }
    }

    pub fn from_number(number: usize) -> Option<Degree> {
        Degree::ALL.get(number.checked_sub(1)?).copied()
    }

    pub fn roman(self) -> &'static str {
        match self {
            Degree::Tonic => "I",
            Degree::Supertonic => "II",
            Degree::Mediant => "III",
            Degree::Subdominant => "IV",
            Degree::Dominant => "V",
            Degree::Submediant => "VI",
            Degree::Leading => "VII",
            Degree::Octave => "VIII",
        }
    }
}

impl FromStr for Degree {
    type Err = TheoryError;

    /// Roman numerals (`"IV"`, `"vii"`) or plain numbers (`"4"`)
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(number) = trimmed.parse::<usize>() {
            return Degree::from_number(number)
                .ok_or_else(|| TheoryError::parse(s, "degree must be between 1 and 8"));
        }
        let upper = trimmed.to_ascii_uppercase();
        Degree::ALL
            .iter()
            .copied()
            .find(|degree| degree.roman() == upper)
            .ok_or_else(|| TheoryError::parse(s, "unknown scale degree"))
    }
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.roman())
    }
}

/// A scale built on a root note
#[derive(Debug, Clone, PartialEq)]
pub struct Scale {
    root: Note,
    scale_type: ScaleType,
    notes: Vec<Note>,
}

impl Scale {
    pub fn new(root: Note, scale_type: ScaleType) -> Self {
        let notes = scale_type
            .pattern()
            .iter()
            .map(|&(semitones, steps)| {
                let (letter, carry) = root.letter.step(steps);
                Note::spelled(letter, root.octave + carry, root.semitone_index() + semitones)
            })
            .collect();
        Self {
            root,
            scale_type,
            notes,
        }
    }

    /// Build from text, e.g. `Scale::parse("A5", "pent-major")`
    pub fn parse(root: &str, scale_type: &str) -> Result<Self> {
        Ok(Self::new(Note::parse(root)?, scale_type.parse()?))
    }

    pub fn root(&self) -> Note {
        self.root
    }

    pub fn scale_type(&self) -> ScaleType {
        self.scale_type
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Look up a named degree; `Degree::Octave` is always the root an octave up
    pub fn degree(&self, degree: Degree) -> Result<Note> {
        match degree {
            Degree::Octave => Ok(self.root.octave_up()),
            other => self.degree_index(other.number()),
        }
    }

    /// 1-based lookup; `len + 1` is the root an octave up
    pub fn degree_index(&self, number: usize) -> Result<Note> {
        if number == self.notes.len() + 1 {
            return Ok(self.root.octave_up());
        }
        number
            .checked_sub(1)
            .and_then(|index| self.notes.get(index))
            .copied()
            .ok_or_else(|| {
                TheoryError::RangeError(format!(
                    "degree {} is outside the {}-note {} scale",
                    number,
                    self.notes.len(),
                    self.scale_type
                ))
            })
    }

    /// Stack `size` scale tones a third apart starting at `degree` (3 = triad, 4 = seventh)
    pub fn chord(&self, degree: Degree, size: usize) -> Result<Chord> {
        self.chord_at(degree.number(), size)
    }

    /// Same as [`Scale::chord`] with a 1-based degree number
    pub fn chord_at(&self, number: usize, size: usize) -> Result<Chord> {
        if !(3..=7).contains(&size) {
            return Err(TheoryError::RangeError(format!(
                "chord size must be between 3 and 7, got {}",
                size
            )));
        }
        if number == 0 || number > self.notes.len() + 1 {
            return Err(TheoryError::RangeError(format!(
                "degree {} is outside the {}-note {} scale",
                number,
                self.notes.len(),
                self.scale_type
            )));
        }

        let len = self.notes.len();
        let start = number - 1;
        let voices = (0..size)
            .map(|i| {
                let index = start + 2 * i;
                self.notes[index % len].shift_octaves((index / len) as i32)
            })
            .collect();
        Chord::from_notes(voices)
    }

    /// Pitch-class membership, ignoring octave and spelling
    pub fn contains(&self, note: &Note) -> bool {
        self.notes
            .iter()
            .any(|n| n.pitch_class() == note.pitch_class())
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.notes.iter().map(|n| n.to_string()).collect();
        write!(f, "{}", names.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::Quality;

    fn scale(root: &str, scale_type: ScaleType) -> Scale {
        Scale::new(Note::parse(root).unwrap(), scale_type)
    }

    #[test]
    fn test_major_scale_spelling() {
        assert_eq!(scale("C4", ScaleType::Major).to_string(), "C4 D4 E4 F4 G4 A4 B4");
        assert_eq!(scale("F4", ScaleType::Major).to_string(), "F4 G4 A4 Bb4 C5 D5 E5");
        assert_eq!(scale("D4", ScaleType::Major).to_string(), "D4 E4 F#4 G4 A4 B4 C#5");
        assert_eq!(scale("Bb3", ScaleType::Major).to_string(), "Bb3 C4 D4 Eb4 F4 G4 A4");
    }

    #[test]
    fn test_minor_and_modal_spelling() {
        assert_eq!(scale("C4", ScaleType::Minor).to_string(), "C4 D4 Eb4 F4 G4 Ab4 Bb4");
        assert_eq!(scale("A4", ScaleType::HarmonicMinor).to_string(), "A4 B4 C5 D5 E5 F5 G#5");
        assert_eq!(scale("D4", ScaleType::Dorian).to_string(), "D4 E4 F4 G4 A4 B4 C5");
        assert_eq!(scale("F4", ScaleType::Lydian).to_string(), "F4 G4 A4 B4 C5 D5 E5");
    }

    #[test]
    fn test_pentatonic_and_blues_spelling() {
        assert_eq!(scale("A5", ScaleType::PentMajor).to_string(), "A5 B5 C#6 E6 F#6");
        assert_eq!(scale("A4", ScaleType::PentMinor).to_string(), "A4 C5 D5 E5 G5");
        assert_eq!(scale("C4", ScaleType::Blues).to_string(), "C4 Eb4 F4 F#4 G4 Bb4");
    }

    #[test]
    fn test_length_matches_scale_type() {
        for scale_type in ScaleType::ALL {
            let s = scale("E4", scale_type);
            assert_eq!(s.len(), scale_type.degree_count());
            assert_eq!(s.notes()[0], s.root());
            // Notes rise strictly inside one octave
            for pair in s.notes().windows(2) {
                assert!(pair[0].semitone_index() < pair[1].semitone_index());
            }
            assert!(s.notes().last().unwrap().semitone_index() < s.root().semitone_index() + 12);
        }
    }

    #[test]
    fn test_degree_lookup() {
        let s = scale("C4", ScaleType::Major);
        assert_eq!(s.degree(Degree::Tonic).unwrap().to_string(), "C4");
        assert_eq!(s.degree(Degree::Dominant).unwrap().to_string(), "G4");
        assert_eq!(s.degree(Degree::Leading).unwrap().to_string(), "B4");
        let octave = s.degree(Degree::Octave).unwrap();
        assert_eq!(octave.semitone_index(), s.root().semitone_index() + 12);
        assert_eq!(s.degree_index(8).unwrap(), octave);
    }

    #[test]
    fn test_degree_out_of_range() {
        let pent = scale("C4", ScaleType::PentMajor);
        assert_eq!(pent.degree_index(6).unwrap().to_string(), "C5");
        assert_eq!(pent.degree(Degree::Octave).unwrap().to_string(), "C5");
        assert!(matches!(
            pent.degree(Degree::Leading),
            Err(TheoryError::RangeError(_))
        ));
        assert!(pent.degree_index(0).is_err());
        assert!(scale("C4", ScaleType::Major).degree_index(9).is_err());
    }

    #[test]
    fn test_diatonic_triads_have_expected_qualities() {
        let s = scale("C4", ScaleType::Major);
        let expected = [
            Quality::Major,
            Quality::Minor,
            Quality::Minor,
            Quality::Major,
            Quality::Major,
            Quality::Minor,
            Quality::Diminished,
        ];
        for (number, quality) in (1..=7).zip(expected) {
            let chord = s.chord_at(number, 3).unwrap();
            assert_eq!(chord.quality(), Some(quality), "degree {}", number);
        }
    }

    #[test]
    fn test_diatonic_sevenths_wrap_through_octave() {
        let s = scale("C4", ScaleType::Major);
        let vii = s.chord(Degree::Leading, 4).unwrap();
        assert_eq!(vii.to_string(), "B4 D5 F5 A5");
        assert_eq!(vii.quality(), Some(Quality::HalfDiminished7));

        let tonic = s.chord(Degree::Tonic, 4).unwrap();
        assert_eq!(tonic.quality(), Some(Quality::Major7));

        let minor = scale("A3", ScaleType::HarmonicMinor);
        assert_eq!(minor.chord(Degree::Dominant, 4).unwrap().symbol().as_deref(), Some("E7"));
    }

    #[test]
    fn test_chord_size_validation() {
        let s = scale("C4", ScaleType::Major);
        assert!(matches!(s.chord(Degree::Tonic, 2), Err(TheoryError::RangeError(_))));
        assert!(s.chord(Degree::Tonic, 8).is_err());
        assert_eq!(s.chord(Degree::Tonic, 5).unwrap().quality(), Some(Quality::Major9));
        assert_eq!(s.chord(Degree::Octave, 3).unwrap().to_string(), "C5 E5 G5");
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("PentMajor".parse::<ScaleType>().unwrap(), ScaleType::PentMajor);
        assert_eq!("harmonic minor".parse::<ScaleType>().unwrap(), ScaleType::HarmonicMinor);
        assert!("bebop".parse::<ScaleType>().is_err());
        assert_eq!("vii".parse::<Degree>().unwrap(), Degree::Leading);
        assert_eq!("8".parse::<Degree>().unwrap(), Degree::Octave);
        assert!("IX".parse::<Degree>().is_err());
        assert!("0".parse::<Degree>().is_err());
        assert_eq!(Scale::parse("A5", "pent-major").unwrap().len(), 5);
    }

    #[test]
    fn test_contains_ignores_octave() {
        let s = scale("G4", ScaleType::Major);
        assert!(s.contains(&Note::parse("F#2").unwrap()));
        assert!(s.contains(&Note::parse("Gb7").unwrap()));
        assert!(!s.contains(&Note::parse("F5").unwrap()));
    }
}
