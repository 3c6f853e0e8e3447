//! Music theory and fretboard geometry for guitar and bass diagram editors.
//!
//! The engine modules (`pitch`, `tuning`, `fretmap`, `scale`, `harmony`, `layout`,
//! `view`) are pure and infallible. The editing and collaborator modules (`diagram`,
//! `editor`, `history`, `project`, `storage`, `export`, `config`) build an editor on top.

pub mod api;
pub mod config;
pub mod diagram;
pub mod editor;
pub mod error;
pub mod export;
pub mod fretmap;
pub mod harmony;
pub mod history;
pub mod layout;
pub mod pitch;
pub mod project;
pub mod scale;
pub mod storage;
pub mod tuning;
pub mod view;

pub use api::*;
pub use config::EditorConfig;
pub use diagram::{Diagram, Line, Marker};
pub use editor::{Editor, EditorEvent, Tool};
pub use error::FretboardError;
pub use fretmap::{fret_for_note, note_at, Position};
pub use harmony::{brush_paths, caged_positions, chord_brush, chord_notes, CagedShape, ChordQuality, ChordSpec, VoicingMode};
pub use layout::{FretboardLayout, Hit, LayoutConfig};
pub use pitch::{interval_name, normalize, IntervalLabel, PitchClass};
pub use project::Project;
pub use scale::scale_notes;
pub use storage::{FileStore, KeyValueStore, MemoryStore, ProjectStore};
pub use tuning::{resolve_tuning, InstrumentType, TuningKey};
pub use view::{render_view, DiagramView, Theme};
