//! Named intervals
//!
//! Each interval knows its size in semitones and in letter steps, so moving a
//! note by an interval can land on the right letter name (see [`crate::Note::interval`]).

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TheoryError};

/// Named intervals up to a thirteenth
///
/// Text symbols follow the usual shorthand: `P` perfect, `M` major, `m` minor,
/// `A` augmented, `d` diminished (`"P4"`, `"m7"`, `"A5"`, `"d7"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interval {
    PerfectUnison,
    MinorSecond,
    MajorSecond,
    AugmentedSecond,
    MinorThird,
    MajorThird,
    PerfectFourth,
    AugmentedFourth,
    DiminishedFifth,
    PerfectFifth,
    AugmentedFifth,
    MinorSixth,
    MajorSixth,
    DiminishedSeventh,
    MinorSeventh,
    MajorSeventh,
    PerfectOctave,
    MinorNinth,
    MajorNinth,
    AugmentedNinth,
    PerfectEleventh,
    AugmentedEleventh,
    MinorThirteenth,
    MajorThirteenth,
}

impl Interval {
    pub const ALL: [Interval; 24] = [
        Interval::PerfectUnison,
        Interval::MinorSecond,
        Interval::MajorSecond,
        Interval::AugmentedSecond,
        Interval::MinorThird,
        Interval::MajorThird,
        Interval::PerfectFourth,
        Interval::AugmentedFourth,
        Interval::DiminishedFifth,
        Interval::PerfectFifth,
        Interval::AugmentedFifth,
        Interval::MinorSixth,
        Interval::MajorSixth,
        Interval::DiminishedSeventh,
        Interval::MinorSeventh,
        Interval::MajorSeventh,
        Interval::PerfectOctave,
        Interval::MinorNinth,
        Interval::MajorNinth,
        Interval::AugmentedNinth,
        Interval::PerfectEleventh,
        Interval::AugmentedEleventh,
        Interval::MinorThirteenth,
        Interval::MajorThirteenth,
    ];

    /// Size in semitones
    pub fn semitones(self) -> i32 {
        match self {
            Interval::PerfectUnison => 0,
            Interval::MinorSecond => 1,
            Interval::MajorSecond => 2,
            Interval::AugmentedSecond => 3,
            Interval::MinorThird => 3,
            Interval::MajorThird => 4,
            Interval::PerfectFourth => 5,
            Interval::AugmentedFourth => 6,
            Interval::DiminishedFifth => 6,
            Interval::PerfectFifth => 7,
            Interval::AugmentedFifth => 8,
            Interval::MinorSixth => 8,
            Interval::MajorSixth => 9,
            Interval::DiminishedSeventh => 9,
            Interval::MinorSeventh => 10,
            Interval::MajorSeventh => 11,
            Interval::PerfectOctave => 12,
            Interval::MinorNinth => 13,
            Interval::MajorNinth => 14,
            Interval::AugmentedNinth => 15,
            Interval::PerfectEleventh => 17,
            Interval::AugmentedEleventh => 18,
            Interval::MinorThirteenth => 20,
            Interval::MajorThirteenth => 21,
        }
    }

    /// Distance in letter names (a third spans 2 letters, an octave 7)
    pub fn letter_steps(self) -> i32 {
        match self {
            Interval::PerfectUnison => 0,
            Interval::MinorSecond | Interval::MajorSecond | Interval::AugmentedSecond => 1,
            Interval::MinorThird | Interval::MajorThird => 2,
            Interval::PerfectFourth | Interval::AugmentedFourth => 3,
            Interval::DiminishedFifth | Interval::PerfectFifth | Interval::AugmentedFifth => 4,
            Interval::MinorSixth | Interval::MajorSixth => 5,
            Interval::DiminishedSeventh | Interval::MinorSeventh | Interval::MajorSeventh => 6,
            Interval::PerfectOctave => 7,
            Interval::MinorNinth | Interval::MajorNinth | Interval::AugmentedNinth => 8,
            Interval::PerfectEleventh | Interval::AugmentedEleventh => 10,
            Interval::MinorThirteenth | Interval::MajorThirteenth => 12,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Interval::PerfectUnison => "P1",
            Interval::MinorSecond => "m2",
            Interval::MajorSecond => "M2",
            Interval::AugmentedSecond => "A2",
            Interval::MinorThird => "m3",
            Interval::MajorThird => "M3",
            Interval::PerfectFourth => "P4",
            Interval::AugmentedFourth => "A4",
            Interval::DiminishedFifth => "d5",
            Interval::PerfectFifth => "P5",
            Interval::AugmentedFifth => "A5",
            Interval::MinorSixth => "m6",
            Interval::MajorSixth => "M6",
            Interval::DiminishedSeventh => "d7",
            Interval::MinorSeventh => "m7",
            Interval::MajorSeventh => "M7",
            Interval::PerfectOctave => "P8",
            Interval::MinorNinth => "m9",
            Interval::MajorNinth => "M9",
            Interval::AugmentedNinth => "A9",
            Interval::PerfectEleventh => "P11",
            Interval::AugmentedEleventh => "A11",
            Interval::MinorThirteenth => "m13",
            Interval::MajorThirteenth => "M13",
        }
    }
}

impl FromStr for Interval {
    type Err = TheoryError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed == "TT" {
            return Ok(Interval::AugmentedFourth);
        }
        Interval::ALL
            .iter()
            .copied()
            .find(|interval| interval.symbol() == trimmed)
            .ok_or_else(|| TheoryError::parse(s, "unknown interval"))
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
