//! # Export Sheets
//!
//! Human-readable label data for exported documents. A [`DiagramSheet`] resolves a
//! diagram's settings through the theory engine (tuning, scale notes, chord name and
//! tones, marker notes); a [`ProjectSheet`] collects one per diagram. Sheets render to
//! YAML for text exports and supply the captions raster/PDF exporters print.
//!
//! ## Example
//! ```rust
//! use fretboard::diagram::{Diagram, HarmonyMode};
//! use fretboard::export::DiagramSheet;
//!
//! let mut diagram = Diagram::default();
//! diagram.harmony_mode = HarmonyMode::Tetrads;
//! diagram.chord_degree = 4;
//! let sheet = DiagramSheet::from_diagram(&diagram);
//! assert_eq!(sheet.chord.unwrap().name, "V — G7");
//! ```

use crate::diagram::Diagram;
use crate::error::{FretboardError, Result};
use crate::fretmap::note_at;
use crate::harmony::{chord_intervals, chord_name, chord_notes};
use crate::pitch::PitchClass;
use crate::project::Project;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportKind {
    Png,
    Pdf,
}

/// File name for an export started at `at`, stamped in Unix milliseconds.
pub fn export_file_name(kind: ExportKind, at: DateTime<Utc>) -> String {
    let millis = at.timestamp_millis();
    match kind {
        ExportKind::Png => format!("GuitarArchitect_Export_{}.png", millis),
        ExportKind::Pdf => format!("GuitarArchitect_Sheet_{}.pdf", millis),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ChordSheet {
    pub name: String,
    pub notes: Vec<String>,
    pub intervals: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct MarkerSheet {
    pub string: usize,
    pub fret: u8,
    pub note: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finger: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct DiagramSheet {
    pub title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub subtitle: String,
    pub instrument: String,
    pub tuning: String,
    /// Open strings, highest first.
    pub strings: Vec<String>,
    pub frets: String,
    pub root: String,
    pub scale: String,
    pub scale_notes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chord: Option<ChordSheet>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<MarkerSheet>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

impl DiagramSheet {
    pub fn from_diagram(diagram: &Diagram) -> Self {
        let tuning = diagram.effective_tuning();
        let chord = diagram.chord_spec().and_then(|spec| {
            let name = chord_name(&spec)?;
            Some(ChordSheet {
                name,
                notes: names(&chord_notes(&spec)),
                intervals: chord_intervals(&spec).iter().map(|i| i.to_string()).collect(),
            })
        });
        let markers = diagram
            .markers
            .iter()
            .filter(|m| m.string < tuning.len())
            .map(|m| MarkerSheet {
                string: m.string + 1,
                fret: m.fret,
                note: note_at(m.string, m.fret, &tuning).to_string(),
                finger: m.finger.clone().filter(|f| !f.is_empty()),
            })
            .collect();

        Self {
            title: diagram.title.clone(),
            subtitle: diagram.subtitle.clone(),
            instrument: diagram.instrument_type.to_string(),
            tuning: diagram.tuning.to_string(),
            strings: names(&tuning),
            frets: format!("{}-{}", diagram.start_fret, diagram.end_fret),
            root: diagram.root.to_string(),
            scale: diagram.scale_type.clone(),
            scale_notes: names(&diagram.scale_notes()),
            chord,
            markers,
            notes: diagram.notes.clone(),
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        to_yaml(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProjectSheet {
    pub project: String,
    pub owner: String,
    pub transposition: i32,
    pub exported_at: String,
    pub diagrams: Vec<DiagramSheet>,
}

impl ProjectSheet {
    pub fn from_project(project: &Project, at: DateTime<Utc>) -> Self {
        Self {
            project: project.name.clone(),
            owner: project.owner.clone(),
            transposition: project.transposition,
            exported_at: at.to_rfc3339(),
            diagrams: project.diagrams.iter().map(DiagramSheet::from_diagram).collect(),
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        to_yaml(self)
    }
}

fn names(notes: &[PitchClass]) -> Vec<String> {
    notes.iter().map(|n| n.to_string()).collect()
}

fn to_yaml<T: Serialize>(value: &T) -> Result<String> {
    serde_yaml::to_string(value).map_err(|e| FretboardError::Export(e.to_string()))
}
