//! # Pitch-Class Model
//!
//! The chromatic note table every other module computes with.
//!
//! ## Purpose
//! All note arithmetic in the crate happens on the twelve canonical, sharp-based pitch
//! classes (`C, C#, D, D#, E, F, F#, G, G#, A, A#, B`). Names coming from the UI or from
//! stored projects are normalised here before any arithmetic.
//!
//! ## Resolve-or-default
//! Two flavours of every lookup exist:
//! - [`PitchClass::from_name`] returns `Option`, so callers can tell whether a spelling
//!   was recognised.
//! - [`normalize`] and [`interval_name`] never fail. Unknown spellings pass through
//!   unchanged and unknown interval inputs yield the label `1`.
//!
//! ## Example
//! ```rust
//! use fretboard::pitch::{interval_name, normalize, transpose, PitchClass};
//!
//! assert_eq!(normalize("Db"), "C#");
//! assert_eq!(normalize("H"), "H"); // unknown, passed through
//! assert_eq!(transpose(PitchClass::A, 3), PitchClass::C);
//! assert_eq!(transpose(PitchClass::C, -1), PitchClass::B);
//! assert_eq!(interval_name("C", "Eb"), "b3");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the twelve equal-tempered note names, octave independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PitchClass {
    #[default]
    C,
    Cs,
    D,
    Ds,
    E,
    F,
    Fs,
    G,
    Gs,
    A,
    As,
    B,
}

impl PitchClass {
    /// The chromatic cycle in canonical order.
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::Cs,
        PitchClass::D,
        PitchClass::Ds,
        PitchClass::E,
        PitchClass::F,
        PitchClass::Fs,
        PitchClass::G,
        PitchClass::Gs,
        PitchClass::A,
        PitchClass::As,
        PitchClass::B,
    ];

    /// Canonical sharp-based name.
    pub fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::Cs => "C#",
            PitchClass::D => "D",
            PitchClass::Ds => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::Fs => "F#",
            PitchClass::G => "G",
            PitchClass::Gs => "G#",
            PitchClass::A => "A",
            PitchClass::As => "A#",
            PitchClass::B => "B",
        }
    }

    /// Position in the chromatic cycle, 0 (C) to 11 (B).
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Pitch class at a chromatic index; any integer wraps into the cycle.
    pub fn from_index(index: i32) -> Self {
        Self::ALL[index.rem_euclid(12) as usize]
    }

    /// Resolve any accepted spelling to its canonical pitch class.
    ///
    /// Accepts a letter `A`-`G` (any case) followed by any run of `#`, `♯`, `x` (double
    /// sharp), `b` or `♭`. Enharmonic edge spellings wrap: `E#` is `F`, `Cb` is `B`.
    pub fn from_name(name: &str) -> Option<Self> {
        let trimmed = name.trim();
        let mut chars = trimmed.chars();

        let base: i32 = match chars.next()?.to_ascii_uppercase() {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return None,
        };

        let mut offset = 0i32;
        for c in chars {
            offset += match c {
                '#' | '♯' => 1,
                'x' | 'X' => 2,
                'b' | '♭' => -1,
                _ => return None,
            };
        }

        Some(Self::from_index(base + offset))
    }

    /// Move by a signed number of semitones, wrapping around the octave.
    pub fn transpose(self, semitones: i32) -> Self {
        Self::from_index(self.index() as i32 + semitones)
    }

    /// Ascending distance in semitones from `root` up to `self`, in `0..12`.
    pub fn semitones_above(self, root: PitchClass) -> u8 {
        (self.index() as i32 - root.index() as i32).rem_euclid(12) as u8
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<PitchClass> for String {
    fn from(pitch: PitchClass) -> Self {
        pitch.name().to_string()
    }
}

impl TryFrom<String> for PitchClass {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        PitchClass::from_name(&value).ok_or_else(|| format!("unknown note name: {}", value))
    }
}

/// Map any accepted spelling to the canonical symbol.
///
/// Unrecognised input is returned unchanged; this function never fails.
pub fn normalize(note: &str) -> String {
    match PitchClass::from_name(note) {
        Some(pitch) => pitch.name().to_string(),
        None => note.to_string(),
    }
}

/// Add `semitones` (possibly negative) to a pitch class, modulo 12.
pub fn transpose(note: PitchClass, semitones: i32) -> PitchClass {
    note.transpose(semitones)
}

/// Transpose a spelled note name. Unrecognised names pass through unchanged.
pub fn transpose_name(note: &str, semitones: i32) -> String {
    match PitchClass::from_name(note) {
        Some(pitch) => pitch.transpose(semitones).name().to_string(),
        None => note.to_string(),
    }
}

/// Scale-degree label of a note relative to a root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum IntervalLabel {
    #[default]
    #[serde(rename = "1")]
    Unison,
    #[serde(rename = "b2")]
    MinorSecond,
    #[serde(rename = "2")]
    MajorSecond,
    #[serde(rename = "b3")]
    MinorThird,
    #[serde(rename = "3")]
    MajorThird,
    #[serde(rename = "4")]
    PerfectFourth,
    #[serde(rename = "b5")]
    Tritone,
    #[serde(rename = "5")]
    PerfectFifth,
    #[serde(rename = "b6")]
    MinorSixth,
    #[serde(rename = "6")]
    MajorSixth,
    #[serde(rename = "b7")]
    MinorSeventh,
    #[serde(rename = "7")]
    MajorSeventh,
}

impl IntervalLabel {
    const BY_SEMITONE: [IntervalLabel; 12] = [
        IntervalLabel::Unison,
        IntervalLabel::MinorSecond,
        IntervalLabel::MajorSecond,
        IntervalLabel::MinorThird,
        IntervalLabel::MajorThird,
        IntervalLabel::PerfectFourth,
        IntervalLabel::Tritone,
        IntervalLabel::PerfectFifth,
        IntervalLabel::MinorSixth,
        IntervalLabel::MajorSixth,
        IntervalLabel::MinorSeventh,
        IntervalLabel::MajorSeventh,
    ];

    /// Label for an ascending distance in semitones; wraps modulo 12.
    pub fn from_semitones(semitones: i32) -> Self {
        Self::BY_SEMITONE[semitones.rem_euclid(12) as usize]
    }

    /// Interval from `root` up to `note`.
    pub fn between(root: PitchClass, note: PitchClass) -> Self {
        Self::from_semitones(note.semitones_above(root) as i32)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IntervalLabel::Unison => "1",
            IntervalLabel::MinorSecond => "b2",
            IntervalLabel::MajorSecond => "2",
            IntervalLabel::MinorThird => "b3",
            IntervalLabel::MajorThird => "3",
            IntervalLabel::PerfectFourth => "4",
            IntervalLabel::Tritone => "b5",
            IntervalLabel::PerfectFifth => "5",
            IntervalLabel::MinorSixth => "b6",
            IntervalLabel::MajorSixth => "6",
            IntervalLabel::MinorSeventh => "b7",
            IntervalLabel::MajorSeventh => "7",
        }
    }
}

impl fmt::Display for IntervalLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interval label between two spelled notes.
///
/// Permissive: if either name is unrecognised the result is `"1"` rather than an error.
pub fn interval_name(root: &str, note: &str) -> &'static str {
    match (PitchClass::from_name(root), PitchClass::from_name(note)) {
        (Some(root), Some(note)) => IntervalLabel::between(root, note).as_str(),
        _ => IntervalLabel::Unison.as_str(),
    }
}
