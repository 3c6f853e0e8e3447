//! # Harmony Module
//!
//! Chord derivation, CAGED shape geometry and the chord-brush path solver.
//!
//! ## Purpose
//! Given a root, a scale and the diagram's harmony settings this module answers:
//! 1. **Which notes** make up the selected chord, in which order (`chord`)
//! 2. **Where a CAGED shape** sits on the neck for a tuning (`caged`)
//! 3. **How to brush** the chord across adjacent strings within one hand span (`brush`)
//!
//! ## Sub-modules
//! - `chord` - `ChordSpec`, qualities, inversion and drop-voicing reordering
//! - `caged` - Static shape tables and base-position resolution
//! - `brush` - Bounded depth-first search over playable fingerings
//!
//! ## Example
//! ```rust
//! use fretboard::harmony::{chord_notes, ChordSpec};
//! use fretboard::pitch::PitchClass::*;
//!
//! let spec = ChordSpec::triad(C, "Major (Ionian)", 0);
//! assert_eq!(chord_notes(&spec), vec![C, E, G]);
//! ```
//!
//! ## Pitch-class only
//! No function here models octaves. Inversions and drop voicings reorder the list; the
//! renderer decides what that order means on the neck.
//!
//! ## Related Modules
//! - `scale` - Supplies the note sets chords are built from
//! - `fretmap` - Resolves notes to frets for `caged` and `brush`
//! - `view` - Consumes chord notes and CAGED positions per redraw

mod brush;
mod caged;
mod chord;

pub use brush::{brush_paths, chord_brush, max_span, BrushPath, PathKind, SEARCH_MARGIN};
pub use caged::{caged_positions, expand_caged, CagedShape, ShapeTone, CAGED_OCTAVES, CAGED_PATTERNS};
pub use chord::{
    apply_voicing, chord_intervals, chord_name, chord_notes, invert, ChordQuality, ChordSpec, VoicingMode,
    DEGREE_NAMES,
};
