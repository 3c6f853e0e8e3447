//! # Diagram Model
//!
//! The full configuration of one rendered fretboard (`Diagram`), plus the markers and
//! lines a user places on it.
//!
//! ## Type Hierarchy
//! ```text
//! Diagram
//!   ├── instrument, tuning key, custom tuning
//!   ├── visible fret range, handedness
//!   ├── root, scale, harmony settings (mode, quality, degree, inversion, voicing)
//!   ├── CAGED shape, label mode, colour mode, layer toggles
//!   ├── string statuses (normal / open / mute)
//!   ├── Vec<Marker>  (position, shape, colour, finger)
//!   ├── Vec<Line>    (start, end, colour, width)
//!   └── title, subtitle, free-text notes
//! ```
//!
//! ## Ownership
//! A `Diagram` is a plain value. Editing produces a new value; history keeps old ones.
//! Markers and lines belong to exactly one diagram.
//!
//! ## Re-tuning
//! Changing the tuning, the instrument or transposing the diagram re-resolves every
//! marker and line endpoint with the octave shield so each keeps its pitch (or its
//! transposed pitch) near its old fret.
//!
//! ## Serialization
//! Field names are camelCase to match the stored project JSON.

use crate::fretmap::{retune_position, transpose_position, Position, MAX_FRET};
use crate::harmony::{CagedShape, ChordQuality, ChordSpec, VoicingMode};
use crate::pitch::PitchClass;
use crate::scale::{scale_notes, DEFAULT_SCALE};
use crate::tuning::{resolve_tuning, InstrumentType, TuningKey};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fresh random identifier for diagrams, markers, lines and projects.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerShape {
    #[default]
    Circle,
    Square,
    Triangle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelMode {
    Note,
    Interval,
    Fingering,
    #[default]
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HarmonyMode {
    #[default]
    Off,
    Triads,
    Tetrads,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColorMode {
    /// Every highlighted note in the tonic colour.
    #[default]
    Single,
    /// Colour by interval from the root.
    Intervals,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StringStatus {
    #[default]
    Normal,
    Open,
    Mute,
}

impl StringStatus {
    /// normal → open → mute → normal
    pub fn next(self) -> Self {
        match self {
            StringStatus::Normal => StringStatus::Open,
            StringStatus::Open => StringStatus::Mute,
            StringStatus::Mute => StringStatus::Normal,
        }
    }
}

/// Finger labels in cycling order; `None` follows `T`.
pub const FINGER_CYCLE: [&str; 5] = ["1", "2", "3", "4", "T"];

/// Next finger label after `current`.
pub fn next_finger(current: Option<&str>) -> Option<String> {
    let index = match current {
        None | Some("") => return Some(FINGER_CYCLE[0].to_string()),
        Some(label) => FINGER_CYCLE.iter().position(|f| *f == label),
    };
    match index {
        Some(i) if i + 1 < FINGER_CYCLE.len() => Some(FINGER_CYCLE[i + 1].to_string()),
        Some(_) => None,
        // Unknown label restarts the cycle.
        None => Some(FINGER_CYCLE[0].to_string()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    pub id: String,
    pub string: usize,
    pub fret: u8,
    pub shape: MarkerShape,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finger: Option<String>,
}

impl Marker {
    pub fn new(position: Position, shape: MarkerShape, color: &str) -> Self {
        Self {
            id: new_id(),
            string: position.string,
            fret: position.fret,
            shape,
            color: color.to_string(),
            finger: Some(FINGER_CYCLE[0].to_string()),
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.string, self.fret)
    }
}

/// Allowed line thicknesses: thin, medium, thick.
pub const LINE_WIDTHS: [u8; 3] = [2, 4, 7];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    pub id: String,
    pub start: Position,
    pub end: Position,
    pub color: String,
    pub width: u8,
}

impl Line {
    pub fn new(start: Position, end: Position, color: &str, width: u8) -> Self {
        Self {
            id: new_id(),
            start,
            end,
            color: color.to_string(),
            width,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layers {
    pub show_inlays: bool,
    pub show_all_notes: bool,
    pub show_scale: bool,
    pub show_tonic: bool,
}

impl Default for Layers {
    fn default() -> Self {
        Self {
            show_inlays: true,
            show_all_notes: false,
            show_scale: false,
            show_tonic: false,
        }
    }
}

/// Which layer a toggle addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Inlays,
    AllNotes,
    Scale,
    Tonic,
}

impl Layers {
    pub fn toggle(&mut self, layer: Layer) {
        let flag = match layer {
            Layer::Inlays => &mut self.show_inlays,
            Layer::AllNotes => &mut self.show_all_notes,
            Layer::Scale => &mut self.show_scale,
            Layer::Tonic => &mut self.show_tonic,
        };
        *flag = !*flag;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagram {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub notes: String,
    pub start_fret: u8,
    pub end_fret: u8,
    pub is_left_handed: bool,
    pub root: PitchClass,
    pub scale_type: String,
    #[serde(default)]
    pub instrument_type: InstrumentType,
    pub tuning: TuningKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_tuning: Option<Vec<PitchClass>>,
    #[serde(default)]
    pub string_statuses: Vec<StringStatus>,
    pub label_mode: LabelMode,
    #[serde(default)]
    pub color_mode: ColorMode,
    pub harmony_mode: HarmonyMode,
    pub chord_quality: ChordQuality,
    pub chord_degree: usize,
    pub inversion: usize,
    #[serde(default)]
    pub voicing_mode: VoicingMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caged_shape: Option<CagedShape>,
    pub layers: Layers,
    pub markers: Vec<Marker>,
    pub lines: Vec<Line>,
}

impl Default for Diagram {
    fn default() -> Self {
        Self::new(InstrumentType::Guitar6)
    }
}

impl Diagram {
    /// Blank diagram for an instrument: C major, standard tuning, nut to 15th fret.
    pub fn new(instrument: InstrumentType) -> Self {
        Self {
            id: new_id(),
            title: "Fretboard Diagram".to_string(),
            subtitle: String::new(),
            notes: String::new(),
            start_fret: 0,
            end_fret: 15,
            is_left_handed: false,
            root: PitchClass::C,
            scale_type: DEFAULT_SCALE.to_string(),
            instrument_type: instrument,
            tuning: TuningKey::Standard,
            custom_tuning: None,
            string_statuses: vec![StringStatus::Normal; instrument.string_count()],
            label_mode: LabelMode::None,
            color_mode: ColorMode::Single,
            harmony_mode: HarmonyMode::Off,
            chord_quality: ChordQuality::Diatonic,
            chord_degree: 0,
            inversion: 0,
            voicing_mode: VoicingMode::Close,
            caged_shape: None,
            layers: Layers::default(),
            markers: Vec::new(),
            lines: Vec::new(),
        }
    }

    /// Deep copy under a fresh id.
    pub fn duplicate(&self) -> Self {
        Self {
            id: new_id(),
            ..self.clone()
        }
    }

    pub fn string_count(&self) -> usize {
        self.instrument_type.string_count()
    }

    /// Effective open-string sequence.
    pub fn effective_tuning(&self) -> Vec<PitchClass> {
        resolve_tuning(self.instrument_type, self.tuning, self.custom_tuning.as_deref())
    }

    pub fn scale_notes(&self) -> Vec<PitchClass> {
        scale_notes(self.root, &self.scale_type)
    }

    /// Chord selected by the harmony settings, or `None` when harmony is off.
    pub fn chord_spec(&self) -> Option<ChordSpec> {
        let tetrad = match self.harmony_mode {
            HarmonyMode::Off => return None,
            HarmonyMode::Triads => false,
            HarmonyMode::Tetrads => true,
        };
        Some(ChordSpec {
            root: self.root,
            scale: self.scale_type.clone(),
            degree: self.chord_degree,
            tetrad,
            inversion: self.inversion,
            quality: self.chord_quality,
            voicing: self.voicing_mode,
        })
    }

    pub fn string_status(&self, string: usize) -> StringStatus {
        self.string_statuses.get(string).copied().unwrap_or_default()
    }

    pub fn cycle_string_status(&mut self, string: usize) {
        if string >= self.string_count() {
            return;
        }
        if self.string_statuses.len() <= string {
            self.string_statuses.resize(self.string_count(), StringStatus::Normal);
        }
        self.string_statuses[string] = self.string_statuses[string].next();
    }

    pub fn marker_at(&self, position: Position) -> Option<&Marker> {
        self.markers.iter().find(|m| m.position() == position)
    }

    /// Set the visible range. The range is kept inside `0..=MAX_FRET` with
    /// `start < end`; an inverted range is swapped.
    pub fn set_fret_range(&mut self, start: u8, end: u8) {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        let end = end.clamp(1, MAX_FRET);
        let start = start.min(end - 1);
        self.start_fret = start;
        self.end_fret = end;
    }

    /// Select a tuning and re-resolve markers and lines so they keep their notes.
    pub fn set_tuning(&mut self, key: TuningKey, custom: Option<Vec<PitchClass>>) {
        let before = self.effective_tuning();
        self.tuning = key;
        self.custom_tuning = match key {
            TuningKey::Custom => Some(custom.unwrap_or_else(|| before.clone())),
            _ => None,
        };
        let after = self.effective_tuning();
        self.retune(&before, &after);
    }

    /// Change one string of the tuning, switching to `Custom`.
    pub fn set_custom_string(&mut self, string: usize, note: PitchClass) {
        let mut custom = self.effective_tuning();
        if let Some(slot) = custom.get_mut(string) {
            *slot = note;
        }
        self.set_tuning(TuningKey::Custom, Some(custom));
    }

    /// Switch instrument, resizing string statuses and re-resolving markers on strings
    /// both instruments share.
    pub fn set_instrument(&mut self, instrument: InstrumentType) {
        let before = self.effective_tuning();
        self.instrument_type = instrument;
        self.string_statuses.resize(instrument.string_count(), StringStatus::Normal);
        let after = self.effective_tuning();
        self.retune(&before, &after);
    }

    /// Shift the root and every marker and line by `semitones`.
    pub fn transpose(&mut self, semitones: i32) {
        if semitones.rem_euclid(12) == 0 {
            return;
        }
        self.root = self.root.transpose(semitones);
        let tuning = self.effective_tuning();
        let shift = |position: Position| {
            if position.string < tuning.len() {
                transpose_position(position, semitones, &tuning)
            } else {
                position
            }
        };
        for marker in &mut self.markers {
            let moved = shift(marker.position());
            marker.fret = moved.fret;
        }
        for line in &mut self.lines {
            line.start = shift(line.start);
            line.end = shift(line.end);
        }
    }

    fn retune(&mut self, before: &[PitchClass], after: &[PitchClass]) {
        if before == after {
            return;
        }
        let shared = before.len().min(after.len());
        let move_to = |position: Position| {
            if position.string < shared {
                retune_position(position, before, after)
            } else {
                position
            }
        };
        for marker in &mut self.markers {
            let moved = move_to(marker.position());
            marker.fret = moved.fret;
        }
        for line in &mut self.lines {
            line.start = move_to(line.start);
            line.end = move_to(line.end);
        }
    }
}
