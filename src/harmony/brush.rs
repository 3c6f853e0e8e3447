//! Chord-brush path solver.
//!
//! A brush path plays one chord tone per string across adjacent strings in a single
//! sweep, from the bass string towards the treble. The solver is a bounded depth-first
//! search:
//!
//! 1. Rotate the chord by the inversion to fix the bass-to-top order.
//! 2. Collect every (string, fret) producing each note inside the visible range widened
//!    by 12 frets on each side (clipped to `0..=24`), scanning from the lowest-pitched
//!    string to the highest.
//! 3. Assign one position per note in order. Each next note sits on the string directly
//!    above the previous one (string index exactly one lower). A complete path whose fret
//!    span exceeds the hand-span ceiling is discarded.
//!
//! Depth is at most 4 and each level has at most 25 frets per string, so no memoisation
//! is needed.

use crate::fretmap::{frets_for_note, Position, MAX_SEARCH_FRET};
use crate::harmony::chord::{chord_notes, invert, ChordSpec, VoicingMode};
use crate::pitch::PitchClass;
use serde::{Deserialize, Serialize};

/// Frets added on each side of the visible range when searching.
pub const SEARCH_MARGIN: u8 = 12;

/// Classification of a solved path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PathKind {
    /// Pitch-correct and within the hand-span ceiling.
    Playable,
    /// Pitch-correct but outside ergonomic limits. The solver does not emit these yet.
    Theoretical,
}

/// One fingering: a position per chord tone, bass first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrushPath {
    pub positions: Vec<Position>,
    pub kind: PathKind,
}

impl BrushPath {
    /// Distance between the highest and lowest fret used.
    pub fn fret_span(&self) -> u8 {
        fret_span(&self.positions)
    }

    pub fn lowest_fret(&self) -> Option<u8> {
        self.positions.iter().map(|p| p.fret).min()
    }
}

/// Largest fret span a hand covers for a chord of `note_count` tones.
pub fn max_span(note_count: usize) -> u8 {
    if note_count >= 4 {
        7
    } else {
        5
    }
}

/// Every playable brush path for `notes` (root position) at `inversion`.
pub fn brush_paths(
    notes: &[PitchClass],
    inversion: usize,
    tuning: &[PitchClass],
    start_fret: u8,
    end_fret: u8,
) -> Vec<BrushPath> {
    let ordered = invert(notes, inversion);
    if ordered.is_empty() || tuning.is_empty() {
        return Vec::new();
    }

    let min_fret = start_fret.saturating_sub(SEARCH_MARGIN);
    let max_fret = end_fret.saturating_add(SEARCH_MARGIN).min(MAX_SEARCH_FRET);

    let candidates: Vec<Vec<Position>> = ordered
        .iter()
        .map(|note| {
            (0..tuning.len())
                .rev()
                .flat_map(|string| {
                    frets_for_note(string, *note, tuning, min_fret, max_fret)
                        .into_iter()
                        .map(move |fret| Position::new(string, fret))
                })
                .collect()
        })
        .collect();

    let mut paths = Vec::new();
    let mut current = Vec::with_capacity(ordered.len());
    search(&candidates, max_span(ordered.len()), &mut current, &mut paths);
    paths
}

/// Brush paths for a chord: the root-position chord taken to its inversion.
///
/// The voicing mode is not applied; the path order already fixes the voicing.
pub fn chord_brush(spec: &ChordSpec, tuning: &[PitchClass], start_fret: u8, end_fret: u8) -> Vec<BrushPath> {
    let root_position = ChordSpec {
        inversion: 0,
        voicing: VoicingMode::Close,
        ..spec.clone()
    };
    brush_paths(&chord_notes(&root_position), spec.inversion, tuning, start_fret, end_fret)
}

fn search(candidates: &[Vec<Position>], span: u8, current: &mut Vec<Position>, paths: &mut Vec<BrushPath>) {
    let depth = current.len();
    if depth == candidates.len() {
        if fret_span(current) <= span {
            paths.push(BrushPath {
                positions: current.clone(),
                kind: PathKind::Playable,
            });
        }
        return;
    }

    for position in &candidates[depth] {
        if let Some(previous) = current.last() {
            // Next string up, no skipping.
            if previous.string == 0 || position.string != previous.string - 1 {
                continue;
            }
        }
        current.push(*position);
        search(candidates, span, current, paths);
        current.pop();
    }
}

fn fret_span(positions: &[Position]) -> u8 {
    let min = positions.iter().map(|p| p.fret).min().unwrap_or(0);
    let max = positions.iter().map(|p| p.fret).max().unwrap_or(0);
    max - min
}
