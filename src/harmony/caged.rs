//! CAGED shape geometry.
//!
//! Each shape is plain data: the strings it uses and the chord tone (semitones above the
//! shape root) found on each. [`caged_positions`] resolves every entry to its lowest fret
//! under a tuning; there is no octave-shield search because a shape is anchored to one
//! physical position. [`expand_caged`] copies the base positions up one and two octaves
//! and keeps those inside the visible range.

use crate::fretmap::{base_fret, Position};
use crate::pitch::PitchClass;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CagedShape {
    C,
    A,
    G,
    E,
    D,
}

/// One pattern entry: string index and semitone offset from the shape root.
pub type ShapeTone = (usize, u8);

pub const CAGED_PATTERNS: [(CagedShape, &[ShapeTone]); 5] = [
    (CagedShape::C, &[(4, 0), (3, 4), (2, 7), (1, 0), (0, 4)]),
    (CagedShape::A, &[(4, 0), (3, 7), (2, 0), (1, 4), (0, 7)]),
    (CagedShape::G, &[(5, 0), (4, 4), (3, 7), (2, 0), (1, 4), (0, 0)]),
    (CagedShape::E, &[(5, 0), (4, 7), (3, 0), (2, 4), (1, 7), (0, 0)]),
    (CagedShape::D, &[(3, 0), (2, 7), (1, 0), (0, 4)]),
];

/// Octave copies the consumer lays over the neck.
pub const CAGED_OCTAVES: [u8; 3] = [0, 12, 24];

impl CagedShape {
    pub const ALL: [CagedShape; 5] = [CagedShape::C, CagedShape::A, CagedShape::G, CagedShape::E, CagedShape::D];

    pub fn pattern(self) -> &'static [ShapeTone] {
        CAGED_PATTERNS
            .iter()
            .find(|(shape, _)| *shape == self)
            .map(|(_, pattern)| *pattern)
            .unwrap_or(&[])
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "C" => Some(CagedShape::C),
            "A" => Some(CagedShape::A),
            "G" => Some(CagedShape::G),
            "E" => Some(CagedShape::E),
            "D" => Some(CagedShape::D),
            _ => None,
        }
    }
}

/// Base (lowest-fret) positions of a shape built on `root`.
///
/// Pattern entries on strings the tuning does not have are skipped.
pub fn caged_positions(root: PitchClass, shape: CagedShape, tuning: &[PitchClass]) -> Vec<Position> {
    shape
        .pattern()
        .iter()
        .filter(|(string, _)| *string < tuning.len())
        .map(|(string, offset)| {
            let target = root.transpose(*offset as i32);
            Position::new(*string, base_fret(*string, target, tuning))
        })
        .collect()
}

/// Base positions copied at +0, +12 and +24 frets, limited to `start_fret..=end_fret`.
pub fn expand_caged(base: &[Position], start_fret: u8, end_fret: u8) -> Vec<Position> {
    base.iter()
        .flat_map(|position| {
            CAGED_OCTAVES.iter().filter_map(move |offset| {
                let fret = position.fret.checked_add(*offset)?;
                Some(Position::new(position.string, fret))
            })
        })
        .filter(|position| position.fret >= start_fret && position.fret <= end_fret)
        .collect()
}
