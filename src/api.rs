//! # Public API
//!
//! Name-based entry points for callers that hold plain strings (stored JSON, form
//! fields, config files) rather than typed values. Every function here is fail-soft:
//! an unknown note, scale, quality or voicing falls back to the documented default or
//! yields an empty result.
//!
//! ## Theory Functions
//!
//! - [`chord_notes_by_name()`] - Chord tones from root, scale, degree and chord options
//! - [`scale_notes_by_name()`] - Scale tones, empty for an unknown scale
//! - [`note_name_at()`] / [`fret_for_note_name()`] - Fretboard lookups on a named tuning
//!
//! ## Diagram Functions
//!
//! - [`render_diagram()`] - Full view of a diagram with configured geometry
//! - [`open_editor()`] - Editor over a diagram with the configured history depth
//! - [`export_project_yaml()`] - Label sheet for a whole project
//!
//! ## Typical Usage
//!
//! ```rust
//! use fretboard::chord_notes_by_name;
//!
//! let notes = chord_notes_by_name("C", "Major (Ionian)", 4, true, 0, "DIATONIC", "CLOSE");
//! assert_eq!(notes, vec!["G", "B", "D", "F"]);
//! ```

use crate::config::EditorConfig;
use crate::diagram::Diagram;
use crate::editor::Editor;
use crate::error::Result;
use crate::export::ProjectSheet;
use crate::fretmap::{fret_for_note, note_at};
use crate::harmony::{chord_notes, ChordQuality, ChordSpec, VoicingMode};
use crate::pitch::PitchClass;
use crate::project::Project;
use crate::scale::scale_notes;
use crate::view::{render_view, DiagramView, Theme};
use chrono::Utc;

/// Chord tones as canonical names.
///
/// An unrecognised root gives an empty chord; an unknown quality is read as major and
/// an unknown voicing as close.
///
/// # Example
/// ```rust
/// use fretboard::chord_notes_by_name;
///
/// // First inversion of C major, with an enharmonic spelling of the root.
/// assert_eq!(
///     chord_notes_by_name("B#", "Major (Ionian)", 0, false, 1, "DIATONIC", "CLOSE"),
///     vec!["E", "G", "C"]
/// );
/// ```
pub fn chord_notes_by_name(
    root: &str,
    scale: &str,
    degree: usize,
    tetrad: bool,
    inversion: usize,
    quality: &str,
    voicing: &str,
) -> Vec<String> {
    let Some(root) = PitchClass::from_name(root) else {
        return Vec::new();
    };
    let spec = ChordSpec {
        root,
        scale: scale.to_string(),
        degree,
        tetrad,
        inversion,
        quality: ChordQuality::resolve(quality),
        voicing: VoicingMode::from_name(voicing).unwrap_or_default(),
    };
    names(&chord_notes(&spec))
}

/// Scale tones as canonical names; empty for an unknown root or scale.
pub fn scale_notes_by_name(root: &str, scale: &str) -> Vec<String> {
    match PitchClass::from_name(root) {
        Some(root) => names(&scale_notes(root, scale)),
        None => Vec::new(),
    }
}

/// Note at a fret on a tuning given as names. Unreadable tuning entries read as `C`.
pub fn note_name_at(string: usize, fret: u8, tuning: &[String]) -> String {
    note_at(string, fret, &parse_tuning(tuning)).to_string()
}

/// Octave-shielded fret for a named note, or `None` if the note is unreadable.
pub fn fret_for_note_name(string: usize, note: &str, tuning: &[String], reference_fret: u8) -> Option<u8> {
    let target = PitchClass::from_name(note)?;
    Some(fret_for_note(string, target, &parse_tuning(tuning), reference_fret))
}

pub fn render_diagram(diagram: &Diagram, config: &EditorConfig, theme: Theme) -> DiagramView {
    render_view(diagram, &config.layout, theme)
}

pub fn open_editor(diagram: Diagram, config: &EditorConfig) -> Editor {
    Editor::new(diagram, config.history_depth)
}

/// YAML label sheet for every diagram in a project, stamped now.
pub fn export_project_yaml(project: &Project) -> Result<String> {
    ProjectSheet::from_project(project, Utc::now()).to_yaml()
}

fn parse_tuning(tuning: &[String]) -> Vec<PitchClass> {
    tuning
        .iter()
        .map(|name| PitchClass::from_name(name).unwrap_or(PitchClass::C))
        .collect()
}

fn names(notes: &[PitchClass]) -> Vec<String> {
    notes.iter().map(|n| n.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> Vec<String> {
        ["E", "B", "G", "D", "A", "E"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_chord_notes_by_name() {
        assert_eq!(
            chord_notes_by_name("C", "Major (Ionian)", 0, true, 0, "DIATONIC", "DROP2"),
            vec!["G", "C", "E", "B"]
        );
        assert_eq!(
            chord_notes_by_name("A", "Major (Ionian)", 0, false, 0, "MINOR", "CLOSE"),
            vec!["A", "C", "E"]
        );
        assert_eq!(
            chord_notes_by_name("A", "Major (Ionian)", 0, false, 0, "SUS4", "WIDE"),
            vec!["A", "C#", "E"]
        );
        assert!(chord_notes_by_name("H", "Major (Ionian)", 0, false, 0, "DIATONIC", "CLOSE").is_empty());
        assert!(chord_notes_by_name("C", "Nope", 0, false, 0, "DIATONIC", "CLOSE").is_empty());
    }

    #[test]
    fn test_scale_and_fret_lookups() {
        assert_eq!(scale_notes_by_name("A", "Pentatonic Minor"), vec!["A", "C", "D", "E", "G"]);
        assert!(scale_notes_by_name("?", "Pentatonic Minor").is_empty());
        assert_eq!(note_name_at(5, 5, &standard()), "A");
        assert_eq!(note_name_at(9, 2, &standard()), "D");
        assert_eq!(fret_for_note_name(5, "G", &standard(), 14), Some(15));
        assert_eq!(fret_for_note_name(5, "Q", &standard(), 14), None);
    }

    #[test]
    fn test_diagram_entry_points() {
        let config = EditorConfig::from_yaml("history-depth: 2\nend-fret: 12").unwrap();
        let diagram = config.new_diagram();
        let view = render_diagram(&diagram, &config, Theme::Light);
        assert_eq!(view.cells.len(), 6 * 13);
        let editor = open_editor(diagram, &config);
        assert!(!editor.can_undo());
        let yaml = export_project_yaml(&Project::with_diagram("Etudes", "ana", editor.into_diagram())).unwrap();
        assert!(yaml.contains("frets: 0-12"));
    }
}
