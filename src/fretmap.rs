//! # Fret/Note Mapping
//!
//! Maps between fretboard positions and pitch classes.
//!
//! ## Purpose
//! - [`note_at`] answers "which note sounds at this string and fret?"
//! - [`fret_for_note`] answers "where is this note on this string, closest to where I was?"
//!
//! ## Octave Shield
//! When a diagram is re-tuned or transposed, every marker must move to a fret that
//! produces its target note. Always snapping to the lowest fret would throw markers at
//! the 15th fret back to the nut. Instead the base fret (0-11) and its octaves (+12, +24)
//! are considered, clipped to `0..=MAX_SEARCH_FRET`, and the candidate nearest the
//! marker's previous fret wins. Ties go to the lower fret.
//!
//! ## Example
//! ```rust
//! use fretboard::fretmap::{fret_for_note, note_at};
//! use fretboard::pitch::PitchClass::*;
//!
//! let standard = [E, B, G, D, A, E];
//! assert_eq!(note_at(0, 3, &standard), G);
//! assert_eq!(fret_for_note(0, E, &standard, 12), 12);
//! assert_eq!(fret_for_note(0, E, &standard, 3), 0);
//! ```

use crate::pitch::PitchClass;
use serde::{Deserialize, Serialize};

/// Highest fret the octave shield and the chord brush consider.
pub const MAX_SEARCH_FRET: u8 = 24;

/// Highest fret a diagram may display.
pub const MAX_FRET: u8 = 36;

/// Open note assumed for a string missing from the tuning.
pub const FALLBACK_OPEN_NOTE: PitchClass = PitchClass::C;

/// A (string, fret) coordinate. String 0 is the highest-pitched string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub string: usize,
    pub fret: u8,
}

impl Position {
    pub fn new(string: usize, fret: u8) -> Self {
        Self { string, fret }
    }
}

/// Open-string note, or [`FALLBACK_OPEN_NOTE`] if the string is not in the tuning.
pub fn open_note(string: usize, tuning: &[PitchClass]) -> PitchClass {
    tuning.get(string).copied().unwrap_or(FALLBACK_OPEN_NOTE)
}

/// Note sounding at `fret` on `string`.
pub fn note_at(string: usize, fret: u8, tuning: &[PitchClass]) -> PitchClass {
    open_note(string, tuning).transpose(fret as i32)
}

/// Lowest fret (0-11) on `string` that produces `target`.
pub fn base_fret(string: usize, target: PitchClass, tuning: &[PitchClass]) -> u8 {
    target.semitones_above(open_note(string, tuning))
}

/// Fret on `string` producing `target` nearest to `reference_fret` (the octave shield).
pub fn fret_for_note(string: usize, target: PitchClass, tuning: &[PitchClass], reference_fret: u8) -> u8 {
    let base = base_fret(string, target, tuning);
    let mut best = base;
    for candidate in [base, base + 12, base + 24] {
        if candidate > MAX_SEARCH_FRET {
            break;
        }
        // Strict comparison keeps the lower fret on ties.
        if candidate.abs_diff(reference_fret) < best.abs_diff(reference_fret) {
            best = candidate;
        }
    }
    best
}

/// Every fret in `min_fret..=max_fret` on `string` that produces `target`.
pub fn frets_for_note(string: usize, target: PitchClass, tuning: &[PitchClass], min_fret: u8, max_fret: u8) -> Vec<u8> {
    let base = base_fret(string, target, tuning);
    (0..)
        .map(|octave| base as u16 + 12 * octave)
        .take_while(|fret| *fret <= max_fret as u16)
        .map(|fret| fret as u8)
        .filter(|fret| *fret >= min_fret)
        .collect()
}

/// Re-resolve a position after the tuning changes, keeping its note.
pub fn retune_position(position: Position, from: &[PitchClass], to: &[PitchClass]) -> Position {
    let target = note_at(position.string, position.fret, from);
    Position {
        string: position.string,
        fret: fret_for_note(position.string, target, to, position.fret),
    }
}

/// Move a position so its note is shifted by `semitones`, staying on the same string and
/// as close as possible to where it was.
pub fn transpose_position(position: Position, semitones: i32, tuning: &[PitchClass]) -> Position {
    let target = note_at(position.string, position.fret, tuning).transpose(semitones);
    Position {
        string: position.string,
        fret: fret_for_note(position.string, target, tuning, position.fret),
    }
}
