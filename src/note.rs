//! # Pitch Model
//!
//! A [`Note`] is a spelled pitch: a letter, an accidental and an octave in
//! scientific pitch notation (octave 4 holds middle C and concert A).
//!
//! ## Semitone Index
//! Every note maps to a semitone index counted from C0:
//! `12 * octave + letter offset + accidental offset`.
//! - C4 = 48, A4 = 57, MIDI = index + 12 (so A4 = MIDI 69)
//! - Cb4 = 47 and B#3 = 48: spelling never changes the index arithmetic,
//!   only the printed name
//!
//! ## Frequency
//! Equal temperament around A4 = 440 Hz:
//! `440 * 2^((index - 57) / 12)`.
//!
//! ## Respelling
//! [`Note::interval`] moves by a named interval and lands on the letter the
//! interval names (a third is always two letters up), choosing whatever
//! accidental makes the semitone count right.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::chord::Chord;
use crate::error::{Result, TheoryError};
use crate::interval::Interval;

/// Frequency of the reference pitch A4.
pub const A4_FREQUENCY: f64 = 440.0;
/// Semitone index of A4 counted from C0.
pub const A4_INDEX: i32 = 57;
/// Octave used when note text omits one.
pub const DEFAULT_OCTAVE: i32 = 4;
/// Lowest octave accepted from text (C-1 is MIDI 0).
pub const MIN_OCTAVE: i32 = -1;
/// Highest octave accepted from text.
pub const MAX_OCTAVE: i32 = 9;

/// Diatonic letter names in C-to-B order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    pub const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    /// Position within the octave (C = 0 .. B = 6)
    pub fn position(self) -> i32 {
        match self {
            Letter::C => 0,
            Letter::D => 1,
            Letter::E => 2,
            Letter::F => 3,
            Letter::G => 4,
            Letter::A => 5,
            Letter::B => 6,
        }
    }

    /// Semitones above C of the natural note
    pub fn offset(self) -> i32 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    /// Case-insensitive letter lookup
    pub fn from_char(c: char) -> Option<Letter> {
        match c.to_ascii_uppercase() {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }

    /// The letter `steps` positions away, plus the number of C boundaries crossed.
    pub fn step(self, steps: i32) -> (Letter, i32) {
        let raw = self.position() + steps;
        (Letter::ALL[raw.rem_euclid(7) as usize], raw.div_euclid(7))
    }

    fn as_char(self) -> char {
        match self {
            Letter::C => 'C',
            Letter::D => 'D',
            Letter::E => 'E',
            Letter::F => 'F',
            Letter::G => 'G',
            Letter::A => 'A',
            Letter::B => 'B',
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Single accidentals: flat, natural or sharp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Accidental {
    Flat,
    #[default]
    Natural,
    Sharp,
}

impl Accidental {
    pub fn offset(self) -> i32 {
        match self {
            Accidental::Flat => -1,
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
        }
    }

    pub fn from_offset(offset: i32) -> Option<Accidental> {
        match offset {
            -1 => Some(Accidental::Flat),
            0 => Some(Accidental::Natural),
            1 => Some(Accidental::Sharp),
            _ => None,
        }
    }

    /// Accepts `#`, `b`, `n` and their Unicode symbols
    pub fn from_char(c: char) -> Option<Accidental> {
        match c {
            '#' | '♯' => Some(Accidental::Sharp),
            'b' | '♭' => Some(Accidental::Flat),
            'n' | '♮' => Some(Accidental::Natural),
            _ => None,
        }
    }

    /// Text form used by `Display` (natural prints nothing)
    pub fn symbol(self) -> &'static str {
        match self {
            Accidental::Flat => "b",
            Accidental::Natural => "",
            Accidental::Sharp => "#",
        }
    }
}

// Spellings for each pitch class, used when a semitone has no preferred letter.
const SHARP_SPELLINGS: [(Letter, Accidental); 12] = [
    (Letter::C, Accidental::Natural),
    (Letter::C, Accidental::Sharp),
    (Letter::D, Accidental::Natural),
    (Letter::D, Accidental::Sharp),
    (Letter::E, Accidental::Natural),
    (Letter::F, Accidental::Natural),
    (Letter::F, Accidental::Sharp),
    (Letter::G, Accidental::Natural),
    (Letter::G, Accidental::Sharp),
    (Letter::A, Accidental::Natural),
    (Letter::A, Accidental::Sharp),
    (Letter::B, Accidental::Natural),
];

const FLAT_SPELLINGS: [(Letter, Accidental); 12] = [
    (Letter::C, Accidental::Natural),
    (Letter::D, Accidental::Flat),
    (Letter::D, Accidental::Natural),
    (Letter::E, Accidental::Flat),
    (Letter::E, Accidental::Natural),
    (Letter::F, Accidental::Natural),
    (Letter::G, Accidental::Flat),
    (Letter::G, Accidental::Natural),
    (Letter::A, Accidental::Flat),
    (Letter::A, Accidental::Natural),
    (Letter::B, Accidental::Flat),
    (Letter::B, Accidental::Natural),
];

/// A spelled pitch
///
/// Equality compares spelling (`Db4 != C#4`); ordering follows the semitone
/// index first so sorting a chord gives its sounding order. Use
/// [`Note::is_enharmonic`] to compare pitches regardless of spelling.
///
/// # Examples
/// ```
/// use theory::Note;
///
/// let a = Note::parse("A4").unwrap();
/// assert_eq!(a.midi(), 69);
/// assert_eq!(a.frequency(), 440.0);
///
/// // Octave defaults to 4
/// assert_eq!(Note::parse("Bb").unwrap().to_string(), "Bb4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Note {
    pub letter: Letter,
    pub accidental: Accidental,
    pub octave: i32,
}

impl Note {
    pub const fn new(letter: Letter, accidental: Accidental, octave: i32) -> Self {
        Self {
            letter,
            accidental,
            octave,
        }
    }

    /// Build a note from a letter character, a sign character (`#`, `b` or `n`) and an octave
    ///
    /// # Examples
    /// ```
    /// use theory::Note;
    ///
    /// assert_eq!(Note::from_chars('A', 'n', 4).unwrap(), Note::parse("A4").unwrap());
    /// assert!(Note::from_chars('A', 'x', 4).is_err());
    /// ```
    pub fn from_chars(letter: char, sign: char, octave: i32) -> Result<Self> {
        let input = format!("{}{}{}", letter, sign, octave);
        let letter = Letter::from_char(letter)
            .ok_or_else(|| TheoryError::parse(&input, format!("unknown note letter '{}'", letter)))?;
        let accidental = Accidental::from_char(sign)
            .ok_or_else(|| TheoryError::parse(&input, format!("unknown accidental '{}'", sign)))?;
        Ok(Self::new(letter, accidental, check_octave(&input, octave)?))
    }

    /// Spell a raw semitone index (C0 = 0) with sharps, or flats when `prefer_flats` is set
    pub fn from_semitone_index(index: i32, prefer_flats: bool) -> Self {
        let table = if prefer_flats {
            &FLAT_SPELLINGS
        } else {
            &SHARP_SPELLINGS
        };
        let (letter, accidental) = table[index.rem_euclid(12) as usize];
        Self::new(letter, accidental, index.div_euclid(12))
    }

    /// Spell a MIDI note number (A4 = 69) with sharps
    pub fn from_midi(midi: u8) -> Self {
        Self::from_semitone_index(midi as i32 - 12, false)
    }

    /// Parse `<Letter>[Accidental][Octave]`, e.g. `"C4"`, `"Bb3"`, `"f#"`, `"A-1"`
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let mut chars = trimmed.chars().peekable();

        let first = chars
            .next()
            .ok_or_else(|| TheoryError::parse(text, "empty note"))?;
        let letter = Letter::from_char(first)
            .ok_or_else(|| TheoryError::parse(text, format!("unknown note letter '{}'", first)))?;

        let accidental = match chars.peek().copied().and_then(Accidental::from_char) {
            Some(acc) => {
                chars.next();
                acc
            }
            None => Accidental::Natural,
        };

        let rest: String = chars.collect();
        let octave = if rest.is_empty() {
            DEFAULT_OCTAVE
        } else if rest.starts_with('+') {
            return Err(TheoryError::parse(text, format!("invalid octave '{}'", rest)));
        } else {
            rest.parse::<i32>()
                .map_err(|_| TheoryError::parse(text, format!("invalid octave '{}'", rest)))?
        };

        Ok(Self::new(letter, accidental, check_octave(text, octave)?))
    }

    /// Semitones above C0
    ///
    /// Saturates instead of overflowing for octaves far outside
    /// `MIN_OCTAVE..=MAX_OCTAVE`, which only arise from repeated octave shifts.
    pub fn semitone_index(&self) -> i32 {
        self.octave
            .saturating_mul(12)
            .saturating_add(self.letter.offset() + self.accidental.offset())
    }

    /// MIDI note number (C4 = 60)
    pub fn midi(&self) -> i32 {
        self.semitone_index() + 12
    }

    /// Pitch class, 0 (C) through 11 (B)
    pub fn pitch_class(&self) -> u8 {
        self.semitone_index().rem_euclid(12) as u8
    }

    /// Fundamental frequency in Hz, equal temperament with A4 = 440 Hz
    pub fn frequency(&self) -> f64 {
        let distance = (self.semitone_index() - A4_INDEX) as f64;
        A4_FREQUENCY * 2f64.powf(distance / 12.0)
    }

    /// Same sounding pitch, possibly spelled differently
    pub fn is_enharmonic(&self, other: &Note) -> bool {
        self.semitone_index() == other.semitone_index()
    }

    /// Move up by a named interval, spelled on the letter the interval names
    ///
    /// # Examples
    /// ```
    /// use theory::{Interval, Note};
    ///
    /// let e = Note::parse("E4").unwrap();
    /// assert_eq!(e.interval(Interval::MajorThird).to_string(), "G#4");
    ///
    /// let c = Note::parse("C4").unwrap();
    /// assert_eq!(c.interval(Interval::MinorSeventh).to_string(), "Bb4");
    /// ```
    pub fn interval(&self, interval: Interval) -> Note {
        let (letter, carry) = self.letter.step(interval.letter_steps());
        Self::spelled(
            letter,
            self.octave.saturating_add(carry),
            self.semitone_index().saturating_add(interval.semitones()),
        )
    }

    /// Move down by a named interval
    pub fn interval_down(&self, interval: Interval) -> Note {
        let (letter, carry) = self.letter.step(-interval.letter_steps());
        Self::spelled(
            letter,
            self.octave.saturating_add(carry),
            self.semitone_index().saturating_sub(interval.semitones()),
        )
    }

    /// Raw semitone shift, spelled with sharps unless this note is flat
    pub fn transpose(&self, semitones: i32) -> Note {
        Self::from_semitone_index(
            self.semitone_index() + semitones,
            self.accidental == Accidental::Flat,
        )
    }

    pub fn octave_up(&self) -> Note {
        self.shift_octaves(1)
    }

    pub fn octave_down(&self) -> Note {
        self.shift_octaves(-1)
    }

    /// Same spelling, `octaves` octaves away (negative moves down)
    pub fn shift_octaves(&self, octaves: i32) -> Note {
        Note {
            octave: self.octave.saturating_add(octaves),
            ..*self
        }
    }

    /// Build a chord rooted on this note from a quality token such as `"maj"` or `"7"`
    ///
    /// # Examples
    /// ```
    /// use theory::Note;
    ///
    /// let chord = Note::parse("G3").unwrap().chord("7").unwrap();
    /// assert_eq!(chord.to_string(), "G3 B3 D4 F4");
    /// ```
    pub fn chord(&self, quality: &str) -> Result<Chord> {
        Chord::from_symbol(*self, quality)
    }

    // `letter` in `letter_octave` spelled to sound at `target`. Falls back to a
    // plain enharmonic spelling when that would take a double accidental.
    pub(crate) fn spelled(letter: Letter, letter_octave: i32, target: i32) -> Note {
        let natural = letter_octave.saturating_mul(12).saturating_add(letter.offset());
        let diff = target.saturating_sub(natural);
        match Accidental::from_offset(diff) {
            Some(accidental) => Note::new(letter, accidental, letter_octave),
            None => Note::from_semitone_index(target, diff < 0),
        }
    }
}

fn check_octave(input: &str, octave: i32) -> Result<i32> {
    if (MIN_OCTAVE..=MAX_OCTAVE).contains(&octave) {
        Ok(octave)
    } else {
        Err(TheoryError::RangeError(format!(
            "octave {} in '{}' is outside {}..={}",
            octave, input, MIN_OCTAVE, MAX_OCTAVE
        )))
    }
}

impl Ord for Note {
    fn cmp(&self, other: &Self) -> Ordering {
        self.semitone_index()
            .cmp(&other.semitone_index())
            .then(self.letter.cmp(&other.letter))
            .then(self.accidental.offset().cmp(&other.accidental.offset()))
    }
}

impl PartialOrd for Note {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Note {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        Note::parse(s)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.letter, self.accidental.symbol(), self.octave)
    }
}
