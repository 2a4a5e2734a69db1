//! # Chord Model
//!
//! A [`Chord`] is an ordered list of voices (notes). Chords come from
//! - a root and a [`Quality`] (`Chord::from_root`, `Note::chord("maj")`)
//! - a scale degree (`Scale::chord`)
//! - chord-symbol text (`"Bbm7b5"`, `"C#dim7"`, `"F/C"`)
//!
//! ## Symbol Grammar
//! ```text
//! <Letter>[#|b]<quality token>['/'<Letter>[#|b][octave]]
//! ```
//! The root sits in octave 4. The quality token must be one of the tokens in
//! the quality table below; there is no fallback quality.
//!
//! ## Figured Bass
//! `F/C` means "F major with C in the bass". The bass note is placed first at
//! its own octave (default 4), the chord tone of the same pitch class is
//! dropped, and the remaining tones follow in inversion order, each raised by
//! whole octaves until it sits above the previous voice:
//! - `F/C` → C4 F4 A4
//! - `C/E` → E4 G4 C5
//! - `C/Bb` → Bb4 C5 E5 G5 (bass not in the chord: it is added)
//!
//! ## Voicing Operations
//! `invert`, `raise`, `lower` and `match_voicing` move voices by whole
//! octaves only. The set of pitch classes never changes.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::{Result, TheoryError};
use crate::interval::Interval;
use crate::note::{Accidental, Letter, Note, DEFAULT_OCTAVE};

/// Chord qualities with their interval tables
///
/// # Supported Tokens
/// - **Triads**: `maj` / `M` / empty, `m` / `min` / `-`, `dim` / `°` / `o`, `aug` / `+`
/// - **Suspended / power**: `sus2`, `sus4` / `sus`, `5`
/// - **Sixths**: `6` / `maj6`, `m6` / `min6`
/// - **Sevenths**: `7`, `maj7` / `M7`, `m7` / `min7` / `-7`, `mMaj7`, `m7b5` / `ø`,
///   `dim7` / `°7`, `aug7` / `+7` / `7#5`, `7b5`
/// - **Extensions**: `add9`, `9`, `maj9`, `m9`, `7b9`, `7#9`, `11`, `m11`,
///   `13`, `maj13`, `m13`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quality {
    Major,
    Minor,
    Diminished,
    Augmented,
    Suspended2,
    Suspended4,
    Power,
    Major6,
    Minor6,
    Dominant7,
    Major7,
    Minor7,
    MinorMajor7,
    HalfDiminished7,
    Diminished7,
    Augmented7,
    Dominant7Flat5,
    Add9,
    Dominant9,
    Major9,
    Minor9,
    Dominant7Flat9,
    Dominant7Sharp9,
    Dominant11,
    Minor11,
    Dominant13,
    Major13,
    Minor13,
}

impl Quality {
    pub const ALL: [Quality; 28] = [
        Quality::Major,
        Quality::Minor,
        Quality::Diminished,
        Quality::Augmented,
        Quality::Suspended2,
        Quality::Suspended4,
        Quality::Power,
        Quality::Major6,
        Quality::Minor6,
        Quality::Dominant7,
        Quality::Major7,
        Quality::Minor7,
        Quality::MinorMajor7,
        Quality::HalfDiminished7,
        Quality::Diminished7,
        Quality::Augmented7,
        Quality::Dominant7Flat5,
        Quality::Add9,
        Quality::Dominant9,
        Quality::Major9,
        Quality::Minor9,
        Quality::Dominant7Flat9,
        Quality::Dominant7Sharp9,
        Quality::Dominant11,
        Quality::Minor11,
        Quality::Dominant13,
        Quality::Major13,
        Quality::Minor13,
    ];

    /// Accepted symbol tokens; the first one is canonical
    pub fn tokens(self) -> &'static [&'static str] {
        match self {
            Quality::Major => &["", "maj", "M"],
            Quality::Minor => &["m", "min", "-"],
            Quality::Diminished => &["dim", "°", "o"],
            Quality::Augmented => &["aug", "+"],
            Quality::Suspended2 => &["sus2"],
            Quality::Suspended4 => &["sus4", "sus"],
            Quality::Power => &["5"],
            Quality::Major6 => &["6", "maj6"],
            Quality::Minor6 => &["m6", "min6"],
            Quality::Dominant7 => &["7", "dom7"],
            Quality::Major7 => &["maj7", "M7"],
            Quality::Minor7 => &["m7", "min7", "-7"],
            Quality::MinorMajor7 => &["mMaj7", "minmaj7", "mM7"],
            Quality::HalfDiminished7 => &["m7b5", "min7b5", "ø", "ø7"],
            Quality::Diminished7 => &["dim7", "°7", "o7"],
            Quality::Augmented7 => &["aug7", "+7", "7#5"],
            Quality::Dominant7Flat5 => &["7b5"],
            Quality::Add9 => &["add9"],
            Quality::Dominant9 => &["9"],
            Quality::Major9 => &["maj9", "M9"],
            Quality::Minor9 => &["m9", "min9"],
            Quality::Dominant7Flat9 => &["7b9"],
            Quality::Dominant7Sharp9 => &["7#9"],
            Quality::Dominant11 => &["11"],
            Quality::Minor11 => &["m11", "min11"],
            Quality::Dominant13 => &["13"],
            Quality::Major13 => &["maj13", "M13"],
            Quality::Minor13 => &["m13", "min13"],
        }
    }

    /// Canonical token used when printing chord symbols
    pub fn token(self) -> &'static str {
        self.tokens()[0]
    }

    /// Chord tones above the root, root first
    pub fn intervals(self) -> &'static [Interval] {
        use Interval::*;
        match self {
            Quality::Major => &[PerfectUnison, MajorThird, PerfectFifth],
            Quality::Minor => &[PerfectUnison, MinorThird, PerfectFifth],
            Quality::Diminished => &[PerfectUnison, MinorThird, DiminishedFifth],
            Quality::Augmented => &[PerfectUnison, MajorThird, AugmentedFifth],
            Quality::Suspended2 => &[PerfectUnison, MajorSecond, PerfectFifth],
            Quality::Suspended4 => &[PerfectUnison, PerfectFourth, PerfectFifth],
            Quality::Power => &[PerfectUnison, PerfectFifth],
            Quality::Major6 => &[PerfectUnison, MajorThird, PerfectFifth, MajorSixth],
            Quality::Minor6 => &[PerfectUnison, MinorThird, PerfectFifth, MajorSixth],
            Quality::Dominant7 => &[PerfectUnison, MajorThird, PerfectFifth, MinorSeventh],
            Quality::Major7 => &[PerfectUnison, MajorThird, PerfectFifth, MajorSeventh],
            Quality::Minor7 => &[PerfectUnison, MinorThird, PerfectFifth, MinorSeventh],
            Quality::MinorMajor7 => &[PerfectUnison, MinorThird, PerfectFifth, MajorSeventh],
            Quality::HalfDiminished7 => &[PerfectUnison, MinorThird, DiminishedFifth, MinorSeventh],
            Quality::Diminished7 => &[PerfectUnison, MinorThird, DiminishedFifth, DiminishedSeventh],
            Quality::Augmented7 => &[PerfectUnison, MajorThird, AugmentedFifth, MinorSeventh],
            Quality::Dominant7Flat5 => &[PerfectUnison, MajorThird, DiminishedFifth, MinorSeventh],
            Quality::Add9 => &[PerfectUnison, MajorThird, PerfectFifth, MajorNinth],
            Quality::Dominant9 => &[PerfectUnison, MajorThird, PerfectFifth, MinorSeventh, MajorNinth],
            Quality::Major9 => &[PerfectUnison, MajorThird, PerfectFifth, MajorSeventh, MajorNinth],
            Quality::Minor9 => &[PerfectUnison, MinorThird, PerfectFifth, MinorSeventh, MajorNinth],
            Quality::Dominant7Flat9 => &[PerfectUnison, MajorThird, PerfectFifth, MinorSeventh, MinorNinth],
            Quality::Dominant7Sharp9 => &[PerfectUnison, MajorThird, PerfectFifth, MinorSeventh, AugmentedNinth],
            Quality::Dominant11 => &[
                PerfectUnison,
                MajorThird,
                PerfectFifth,
                MinorSeventh,
                MajorNinth,
                PerfectEleventh,
            ],
            Quality::Minor11 => &[
                PerfectUnison,
                MinorThird,
                PerfectFifth,
                MinorSeventh,
                MajorNinth,
                PerfectEleventh,
            ],
            Quality::Dominant13 => &[
                PerfectUnison,
                MajorThird,
                PerfectFifth,
                MinorSeventh,
                MajorNinth,
                MajorThirteenth,
            ],
            Quality::Major13 => &[
                PerfectUnison,
                MajorThird,
                PerfectFifth,
                MajorSeventh,
                MajorNinth,
                MajorThirteenth,
            ],
            Quality::Minor13 => &[
                PerfectUnison,
                MinorThird,
                PerfectFifth,
                MinorSeventh,
                MajorNinth,
                PerfectEleventh,
                MajorThirteenth,
            ],
        }
    }

    /// Exact, case-sensitive token lookup
    pub fn from_token(token: &str) -> Option<Quality> {
        Quality::ALL
            .iter()
            .copied()
            .find(|quality| quality.tokens().contains(&token))
    }

    /// Recognise a quality from semitone distances above the root (root first)
    pub fn from_semitones(offsets: &[i32]) -> Option<Quality> {
        Quality::ALL.iter().copied().find(|quality| {
            let intervals = quality.intervals();
            intervals.len() == offsets.len()
                && intervals
                    .iter()
                    .zip(offsets)
                    .all(|(interval, &offset)| interval.semitones() == offset)
        })
    }
}

impl FromStr for Quality {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        Quality::from_token(s).ok_or_else(|| TheoryError::parse(s, "unknown chord quality"))
    }
}

/// An ordered collection of voices
///
/// # Examples
/// ```
/// use theory::Chord;
///
/// let mut chord: Chord = "Cmaj".parse().unwrap();
/// assert_eq!(chord.to_string(), "C4 E4 G4");
///
/// chord.invert(1).unwrap();
/// assert_eq!(chord.to_string(), "E4 G4 C5");
///
/// let slash: Chord = "F/C".parse().unwrap();
/// assert_eq!(slash.to_string(), "C4 F4 A4");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Chord {
    root: Note,
    quality: Option<Quality>,
    bass: Option<Note>,
    notes: Vec<Note>,
}

impl Chord {
    /// Stack the quality's intervals on `root`
    pub fn from_root(root: Note, quality: Quality) -> Self {
        let notes = quality
            .intervals()
            .iter()
            .map(|&interval| root.interval(interval))
            .collect();
        Self {
            root,
            quality: Some(quality),
            bass: None,
            notes,
        }
    }

    /// Root plus a quality token such as `"min11"` or `"7"`
    pub fn from_symbol(root: Note, token: &str) -> Result<Self> {
        let quality = Quality::from_token(token)
            .ok_or_else(|| TheoryError::parse(token, "unknown chord quality"))?;
        Ok(Self::from_root(root, quality))
    }

    /// Wrap explicit voices; the first voice is taken as the root
    pub fn from_notes(notes: Vec<Note>) -> Result<Self> {
        let root = *notes
            .first()
            .ok_or_else(|| TheoryError::RangeError("a chord needs at least one voice".to_string()))?;
        let offsets: Vec<i32> = notes
            .iter()
            .map(|n| n.semitone_index() - root.semitone_index())
            .collect();
        Ok(Self {
            root,
            quality: Quality::from_semitones(&offsets),
            bass: None,
            notes,
        })
    }

    /// Parse a chord symbol such as `"Bbm7b5"`, `"C#dim7"` or `"F/C"`
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let (head, bass_text) = match trimmed.split_once('/') {
            Some((head, bass)) => (head, Some(bass)),
            None => (trimmed, None),
        };

        let first = head
            .chars()
            .next()
            .ok_or_else(|| TheoryError::parse(text, "missing root note"))?;
        let letter = Letter::from_char(first)
            .ok_or_else(|| TheoryError::parse(text, format!("unknown root letter '{}'", first)))?;

        let mut rest = &head[first.len_utf8()..];
        let mut accidental = Accidental::Natural;
        if let Some((c, acc)) = rest
            .chars()
            .next()
            .and_then(|c| Accidental::from_char(c).map(|acc| (c, acc)))
        {
            accidental = acc;
            rest = &rest[c.len_utf8()..];
        }

        let quality = Quality::from_token(rest).ok_or_else(|| {
            TheoryError::parse(text, format!("unknown chord quality '{}'", rest))
        })?;
        let root = Note::new(letter, accidental, DEFAULT_OCTAVE);
        let chord = Self::from_root(root, quality);

        let chord = match bass_text {
            Some(bass) => {
                if bass.trim().is_empty() {
                    return Err(TheoryError::parse(text, "missing bass note after '/'"));
                }
                let bass_note = Note::parse(bass).map_err(|_| {
                    TheoryError::parse(text, format!("invalid bass note '{}'", bass))
                })?;
                chord.with_bass(bass_note)
            }
            None => chord,
        };

        debug!(symbol = %trimmed, voices = %chord, "parsed chord symbol");
        Ok(chord)
    }

    /// Revoice so `bass` sounds lowest (figured bass)
    pub fn with_bass(mut self, bass: Note) -> Self {
        let position = self
            .notes
            .iter()
            .position(|n| n.pitch_class() == bass.pitch_class());
        let ordered: Vec<Note> = match position {
            Some(i) => self.notes[i + 1..]
                .iter()
                .chain(self.notes[..i].iter())
                .copied()
                .collect(),
            None => self.notes.clone(),
        };

        let mut voiced = Vec::with_capacity(ordered.len() + 1);
        voiced.push(bass);
        let mut previous = bass;
        for note in ordered {
            let placed = above(note, previous.semitone_index());
            voiced.push(placed);
            previous = placed;
        }

        self.notes = voiced;
        self.bass = Some(bass);
        self
    }

    pub fn root(&self) -> Note {
        self.root
    }

    /// `None` for voicings that match no entry of the quality table
    pub fn quality(&self) -> Option<Quality> {
        self.quality
    }

    /// Bass note given in slash notation, if any
    pub fn bass(&self) -> Option<Note> {
        self.bass
    }

    /// Voices in their current order
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn pitch_classes(&self) -> BTreeSet<u8> {
        self.notes.iter().map(|n| n.pitch_class()).collect()
    }

    /// Voices sorted from lowest to highest
    pub fn sounding(&self) -> Vec<Note> {
        let mut sorted = self.notes.clone();
        sorted.sort();
        sorted
    }

    /// Chord symbol text, e.g. `"Bbm7b5"` or `"F/C"`
    pub fn symbol(&self) -> Option<String> {
        let quality = self.quality?;
        let mut symbol = format!(
            "{}{}{}",
            self.root.letter,
            self.root.accidental.symbol(),
            quality.token()
        );
        if let Some(bass) = self.bass {
            symbol.push('/');
            symbol.push_str(&bass.letter.to_string());
            symbol.push_str(bass.accidental.symbol());
        }
        Some(symbol)
    }

    /// Move the lowest voice to the top, `count` times
    ///
    /// Each moved voice goes up an octave, and further if that is still not
    /// above the highest remaining voice.
    pub fn invert(&mut self, count: usize) -> Result<()> {
        if count >= self.notes.len() {
            return Err(TheoryError::RangeError(format!(
                "cannot invert a {}-voice chord {} times",
                self.notes.len(),
                count
            )));
        }

        for _ in 0..count {
            let lowest = self
                .notes
                .iter()
                .enumerate()
                .min_by_key(|(_, n)| n.semitone_index())
                .map(|(i, _)| i);
            let Some(index) = lowest else { break };

            let mut moved = self.notes.remove(index).octave_up();
            if let Some(top) = self.notes.iter().map(|n| n.semitone_index()).max() {
                moved = above(moved, top);
            }
            self.notes.push(moved);
        }

        debug!(count, voices = %self, "inverted chord");
        Ok(())
    }

    /// Every voice up one octave
    pub fn raise(&mut self) {
        for note in &mut self.notes {
            *note = note.octave_up();
        }
    }

    /// Every voice down one octave
    pub fn lower(&mut self) {
        for note in &mut self.notes {
            *note = note.octave_down();
        }
    }

    /// Align each voice's octave with a reference chord for smooth voice leading
    ///
    /// Voice `i` is paired with the reference's voice `i`; voices beyond the
    /// reference's length pair with the reference voice of nearest pitch
    /// class. Each voice then takes the octave closest to its partner,
    /// preferring to stay put on ties. Running it twice changes nothing.
    ///
    /// # Examples
    /// ```
    /// use theory::Chord;
    ///
    /// let c: Chord = "Cmaj".parse().unwrap();
    /// let mut g7: Chord = "G7".parse().unwrap();
    /// g7.match_voicing(&c);
    /// assert_eq!(g7.to_string(), "G3 B3 D4 F4");
    /// ```
    pub fn match_voicing(&mut self, reference: &Chord) {
        for (i, voice) in self.notes.iter_mut().enumerate() {
            let partner = match reference.notes.get(i) {
                Some(partner) => *partner,
                None => match nearest_pitch_class(voice, &reference.notes) {
                    Some(partner) => partner,
                    None => continue,
                },
            };
            let shift = best_octave_shift(voice.semitone_index(), partner.semitone_index());
            if shift != 0 {
                debug!(voice = %voice, partner = %partner, shift, "matching voice");
                *voice = voice.shift_octaves(shift);
            }
        }
    }
}

// `note` raised by whole octaves until it sits strictly above `floor`
fn above(note: Note, floor: i32) -> Note {
    let gap = floor.saturating_sub(note.semitone_index());
    if gap < 0 {
        note
    } else {
        note.shift_octaves(gap / 12 + 1)
    }
}

// Octave shift k minimising |voice + 12k - target|; ties prefer 0, then the
// smaller |k|, then the lower octave.
fn best_octave_shift(voice: i32, target: i32) -> i32 {
    let base = (target - voice).div_euclid(12);
    (base - 1..=base + 2)
        .chain(std::iter::once(0))
        .min_by_key(|&k| ((voice + 12 * k - target).abs(), k != 0, k.abs(), k))
        .unwrap_or(0)
}

fn nearest_pitch_class(voice: &Note, candidates: &[Note]) -> Option<Note> {
    let pitch_class = voice.pitch_class() as i32;
    candidates.iter().copied().min_by_key(|candidate| {
        let distance = (candidate.pitch_class() as i32 - pitch_class).rem_euclid(12);
        distance.min(12 - distance)
    })
}

impl FromStr for Chord {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        Chord::parse(s)
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.notes.iter().map(|n| n.to_string()).collect();
        write!(f, "{}", names.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chord(s: &str) -> Chord {
        Chord::parse(s).unwrap()
    }

    fn note(s: &str) -> Note {
        Note::parse(s).unwrap()
    }

    fn pcs(names: &[&str]) -> BTreeSet<u8> {
        names.iter().map(|n| note(n).pitch_class()).collect()
    }

    #[test]
    fn test_parse_triads() {
        assert_eq!(chord("Cmaj").to_string(), "C4 E4 G4");
        assert_eq!(chord("C").to_string(), "C4 E4 G4");
        assert_eq!(chord("Emaj").to_string(), "E4 G#4 B4");
        assert_eq!(chord("Bm").to_string(), "B4 D5 F#5");
        assert_eq!(chord("Ddim").to_string(), "D4 F4 Ab4");
        assert_eq!(chord("Caug").to_string(), "C4 E4 G#4");
        assert_eq!(chord("Gsus4").to_string(), "G4 C5 D5");
        // An explicit natural sign on the root
        assert_eq!(chord("Cnmaj").to_string(), "C4 E4 G4");
        assert_eq!(chord("Cn7").to_string(), "C4 E4 G4 Bb4");
        assert_eq!(chord("C♮m").to_string(), "C4 Eb4 G4");
    }

    #[test]
    fn test_parse_sevenths_and_extensions() {
        assert_eq!(chord("G7").to_string(), "G4 B4 D5 F5");
        assert_eq!(chord("Bbm7b5").to_string(), "Bb4 Db5 Fb5 Ab5");
        assert_eq!(chord("C#dim7").to_string(), "C#4 E4 G4 Bb4");
        assert_eq!(chord("Gmin7").to_string(), "G4 Bb4 D5 F5");
        assert_eq!(chord("Dmin11").to_string(), "D4 F4 A4 C5 E5 G5");
        assert_eq!(chord("Ebmin11").to_string(), "Eb4 Gb4 Bb4 Db5 F5 Ab5");
        assert_eq!(chord("Cmaj7").len(), 4);
        assert_eq!(chord("C13").len(), 6);
        assert_eq!(chord("Cm13").len(), 7);
    }

    #[test]
    fn test_quality_tokens_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for quality in Quality::ALL {
            for token in quality.tokens() {
                assert!(seen.insert(*token), "duplicate token {:?}", token);
            }
            assert_eq!(Quality::from_token(quality.token()), Some(quality));
        }
    }

    #[test]
    fn test_quality_layouts_are_recognised() {
        for quality in Quality::ALL {
            let c = Chord::from_root(note("C4"), quality);
            let rebuilt = Chord::from_notes(c.notes().to_vec()).unwrap();
            assert_eq!(rebuilt.quality(), Some(quality));
        }
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Chord::parse("Xmaj"),
            Err(TheoryError::ParseError { .. })
        ));
        assert!(Chord::parse("").is_err());
        assert!(Chord::parse("Cfoo").is_err());
        assert!(Chord::parse("Cmaj/").is_err());
        assert!(Chord::parse("Cmaj/H").is_err());
        assert!(Chord::from_symbol(note("C4"), "weird").is_err());
    }

    #[test]
    fn test_symbol_round_trip() {
        for text in ["Bbm7b5", "C#dim7", "G7", "Ebm11", "F/C", "C", "Dm"] {
            let parsed = chord(text);
            let symbol = parsed.symbol().unwrap();
            assert_eq!(chord(&symbol), parsed, "{}", text);
        }
        assert_eq!(chord("Dmin11").symbol().as_deref(), Some("Dm11"));
    }

    #[test]
    fn test_figured_bass_root_position_chord_tone() {
        let f_over_c = chord("F/C");
        assert_eq!(f_over_c.to_string(), "C4 F4 A4");
        let lowest = f_over_c.sounding()[0];
        assert_eq!(lowest, f_over_c.notes()[0]);
        assert_eq!(lowest.pitch_class(), note("C").pitch_class());
        assert_eq!(f_over_c.pitch_classes(), pcs(&["F", "A", "C"]));
        assert_eq!(f_over_c.bass(), Some(note("C4")));
    }

    #[test]
    fn test_figured_bass_inversion_order() {
        assert_eq!(chord("C/E").to_string(), "E4 G4 C5");
        assert_eq!(chord("C/G").to_string(), "G4 C5 E5");
        assert_eq!(chord("G7/F").to_string(), "F4 G4 B4 D5");
    }

    #[test]
    fn test_figured_bass_with_octave_and_foreign_bass() {
        assert_eq!(chord("F/C3").to_string(), "C3 F4 A4");
        let c_over_bb = chord("C/Bb");
        assert_eq!(c_over_bb.to_string(), "Bb4 C5 E5 G5");
        assert_eq!(c_over_bb.len(), 4);
    }

    #[test]
    fn test_far_octaves_resolve_without_looping() {
        assert!(Chord::parse("C/C999999999").is_err());

        let high_bass = Note::new(Letter::E, Accidental::Natural, 1_000_000);
        let voiced = chord("C").with_bass(high_bass);
        assert_eq!(voiced.notes()[0], high_bass);
        assert_eq!(voiced.notes()[1].octave, 1_000_000);
        assert_eq!(voiced.notes()[2].octave, 1_000_001);

        let mut spread = Chord::from_notes(vec![
            note("C4"),
            Note::new(Letter::E, Accidental::Natural, 500_000),
        ])
        .unwrap();
        spread.invert(1).unwrap();
        assert_eq!(spread.notes()[1].octave, 500_001);
    }

    #[test]
    fn test_invert() {
        let mut c = chord("Cmaj");
        c.invert(1).unwrap();
        assert_eq!(c.to_string(), "E4 G4 C5");
        assert_eq!(c.pitch_classes(), pcs(&["C", "E", "G"]));

        let mut f = chord("F");
        f.invert(2).unwrap();
        assert_eq!(f.to_string(), "C5 F5 A5");
    }

    #[test]
    fn test_invert_wide_chord_moves_above_top() {
        let mut nine = chord("C9");
        nine.invert(1).unwrap();
        assert_eq!(nine.to_string(), "E4 G4 Bb4 D5 C6");
    }

    #[test]
    fn test_invert_range_error() {
        let mut c = chord("Cmaj");
        assert!(matches!(c.invert(3), Err(TheoryError::RangeError(_))));
        assert_eq!(c.to_string(), "C4 E4 G4");
        assert!(c.invert(0).is_ok());
        assert_eq!(c.to_string(), "C4 E4 G4");
    }

    #[test]
    fn test_raise_and_lower() {
        let mut c = chord("C#dim7");
        c.raise();
        assert_eq!(c.to_string(), "C#5 E5 G5 Bb5");
        c.lower();
        c.lower();
        assert_eq!(c.to_string(), "C#3 E3 G3 Bb3");
    }

    #[test]
    fn test_best_octave_shift_ties() {
        assert_eq!(best_octave_shift(60, 60), 0);
        assert_eq!(best_octave_shift(55, 48), -1);
        assert_eq!(best_octave_shift(67, 48), -2);
        // Exactly a tritone away: stay put
        assert_eq!(best_octave_shift(54, 48), 0);
        assert_eq!(best_octave_shift(42, 48), 0);
        // Tritone plus an octave: the smaller move wins
        assert_eq!(best_octave_shift(66, 48), -1);
        assert_eq!(best_octave_shift(30, 48), 1);
        assert_eq!(best_octave_shift(20, 100), 7);
    }

    #[test]
    fn test_match_pairs_by_index() {
        let reference = chord("Cmaj");
        let mut e = chord("Emaj");
        e.match_voicing(&reference);
        for (voice, partner) in e.notes().iter().zip(reference.notes()) {
            let distance = (voice.semitone_index() - partner.semitone_index()).abs();
            for k in [-2, -1, 1, 2] {
                let other = (voice.semitone_index() + 12 * k - partner.semitone_index()).abs();
                assert!(distance <= other);
            }
        }
        assert_eq!(e.pitch_classes(), pcs(&["E", "G#", "B"]));
    }

    #[test]
    fn test_match_moves_high_chord_down() {
        let reference = chord("F/C3");
        let mut high = chord("Bb");
        high.raise();
        high.match_voicing(&reference);
        assert_eq!(high.to_string(), "Bb2 D4 F4");
    }

    #[test]
    fn test_match_extra_voices_use_nearest_pitch_class() {
        let reference = chord("Cmaj");
        let mut g7 = chord("G7");
        g7.match_voicing(&reference);
        // F pairs with E (one semitone away), the closest pitch class in C major
        assert_eq!(g7.to_string(), "G3 B3 D4 F4");
    }

    #[test]
    fn test_match_is_idempotent() {
        let reference = chord("Dmin11");
        for symbol in ["Gmin7", "C#dim7", "Emaj", "Bbm7b5", "F/C"] {
            let mut c = chord(symbol);
            c.match_voicing(&reference);
            let once = c.clone();
            c.match_voicing(&reference);
            assert_eq!(c, once, "{}", symbol);
        }
    }

    #[test]
    fn test_match_against_shorter_and_longer_reference() {
        let mut triad = chord("Am");
        triad.raise();
        triad.match_voicing(&chord("Dmin11"));
        assert_eq!(triad.to_string(), "A3 C4 E4");
        assert_eq!(triad.pitch_classes(), pcs(&["A", "C", "E"]));
    }
}
