//! # Scale Engine
//!
//! Named scale interval tables and root-relative note sets.
//!
//! Each [`ScaleDef`] lists strictly ascending semitone offsets starting at 0. A scale only
//! becomes a concrete note set together with a root, via [`scale_notes`]. Unknown scale
//! names produce an empty set.
//!
//! ## Example
//! ```rust
//! use fretboard::pitch::PitchClass::*;
//! use fretboard::scale::scale_notes;
//!
//! assert_eq!(scale_notes(A, "Pentatonic Minor"), vec![A, C, D, E, G]);
//! assert!(scale_notes(A, "Bebop Klingon").is_empty());
//! ```

use crate::pitch::{IntervalLabel, PitchClass};

/// A named scale: semitone offsets from the root plus a human-readable formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleDef {
    pub name: &'static str,
    pub intervals: &'static [u8],
    pub formula: &'static str,
}

impl ScaleDef {
    /// Concrete notes of this scale from `root`, in offset order.
    pub fn notes(&self, root: PitchClass) -> Vec<PitchClass> {
        self.intervals
            .iter()
            .map(|offset| root.transpose(*offset as i32))
            .collect()
    }

    /// Interval labels of the scale degrees.
    pub fn degree_labels(&self) -> Vec<IntervalLabel> {
        self.intervals
            .iter()
            .map(|offset| IntervalLabel::from_semitones(*offset as i32))
            .collect()
    }
}

pub const DEFAULT_SCALE: &str = "Major (Ionian)";

pub static SCALES: [ScaleDef; 12] = [
    ScaleDef { name: "Major (Ionian)", intervals: &[0, 2, 4, 5, 7, 9, 11], formula: "1 2 3 4 5 6 7" },
    ScaleDef { name: "Natural Minor (Aeolian)", intervals: &[0, 2, 3, 5, 7, 8, 10], formula: "1 2 b3 4 5 b6 b7" },
    ScaleDef { name: "Pentatonic Major", intervals: &[0, 2, 4, 7, 9], formula: "1 2 3 5 6" },
    ScaleDef { name: "Pentatonic Minor", intervals: &[0, 3, 5, 7, 10], formula: "1 b3 4 5 b7" },
    ScaleDef { name: "Blues", intervals: &[0, 3, 5, 6, 7, 10], formula: "1 b3 4 b5 5 b7" },
    ScaleDef { name: "Dorian", intervals: &[0, 2, 3, 5, 7, 9, 10], formula: "1 2 b3 4 5 6 b7" },
    ScaleDef { name: "Phrygian", intervals: &[0, 1, 3, 5, 7, 8, 10], formula: "1 b2 b3 4 5 b6 b7" },
    ScaleDef { name: "Lydian", intervals: &[0, 2, 4, 6, 7, 9, 11], formula: "1 2 3 #4 5 6 7" },
    ScaleDef { name: "Mixolydian", intervals: &[0, 2, 4, 5, 7, 9, 10], formula: "1 2 3 4 5 6 b7" },
    ScaleDef { name: "Locrian", intervals: &[0, 1, 3, 5, 6, 8, 10], formula: "1 b2 b3 4 b5 b6 b7" },
    ScaleDef { name: "Harmonic Minor", intervals: &[0, 2, 3, 5, 7, 8, 11], formula: "1 2 b3 4 5 b6 7" },
    ScaleDef { name: "Melodic Minor", intervals: &[0, 2, 3, 5, 7, 9, 11], formula: "1 2 b3 4 5 6 7" },
];

/// Look up a scale by exact name.
pub fn find_scale(name: &str) -> Option<&'static ScaleDef> {
    SCALES.iter().find(|scale| scale.name == name)
}

/// Notes of the named scale from `root`; empty when the name is unknown.
pub fn scale_notes(root: PitchClass, scale_name: &str) -> Vec<PitchClass> {
    find_scale(scale_name)
        .map(|scale| scale.notes(root))
        .unwrap_or_default()
}
