//! # Diagram View
//!
//! Everything a renderer needs to draw one diagram, computed from the diagram state and
//! a layout. The renderer never does music theory; it paints what this module returns.
//!
//! ## Cell highlighting
//! Every visible (string, fret) cell gets a [`CellView`]. Its fill follows the layers in
//! order, later layers overriding earlier ones:
//!
//! 1. `show_all_notes`: neutral fill on every cell
//! 2. `show_scale`: scale tones
//! 3. harmony on: chord tones
//! 4. `show_tonic`: the root, only if no earlier layer filled the cell
//!
//! Scale and chord fills use the tonic colour in [`ColorMode::Single`] and the interval
//! palette in [`ColorMode::Intervals`]. A shown tonic also gets a ring.
//!
//! ## Example
//! ```rust
//! use fretboard::diagram::Diagram;
//! use fretboard::layout::LayoutConfig;
//! use fretboard::view::{render_view, CellFill, Theme};
//!
//! let mut diagram = Diagram::default();
//! diagram.layers.show_scale = true;
//! let view = render_view(&diagram, &LayoutConfig::default(), Theme::Light);
//! let cell = view.cell(5, 8).unwrap();
//! assert_eq!(cell.note.name(), "C");
//! assert_eq!(cell.fill, CellFill::Tonic);
//! ```

use crate::diagram::{ColorMode, Diagram, LabelMode, MarkerShape, StringStatus};
use crate::fretmap::{note_at, Position};
use crate::harmony::{caged_positions, chord_notes, expand_caged};
use crate::layout::{FretboardLayout, Inlay, LayoutConfig};
use crate::pitch::{IntervalLabel, PitchClass};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

/// Interval colour, shared by both themes.
pub fn interval_color(label: IntervalLabel) -> &'static str {
    match label {
        IntervalLabel::Unison => "#ef4444",
        IntervalLabel::MinorSecond => "#71717a",
        IntervalLabel::MajorSecond => "#3b82f6",
        IntervalLabel::MinorThird | IntervalLabel::MajorThird => "#22c55e",
        IntervalLabel::PerfectFourth => "#f97316",
        IntervalLabel::Tritone | IntervalLabel::PerfectFifth => "#3b82f6",
        IntervalLabel::MinorSixth | IntervalLabel::MajorSixth => "#a855f7",
        IntervalLabel::MinorSeventh | IntervalLabel::MajorSeventh => "#eab308",
    }
}

/// Fixed colours of the board itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub fretboard: &'static str,
    pub fret: &'static str,
    pub nut: &'static str,
    pub string: &'static str,
    pub text: &'static str,
    pub inlay: &'static str,
    pub caged: &'static str,
    pub neutral: &'static str,
    pub cell_stroke: &'static str,
    pub mute: &'static str,
    pub open: &'static str,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                fretboard: "#ffffff",
                fret: "#cbd5e1",
                nut: "#0f172a",
                string: "#94a3b8",
                text: "#475569",
                inlay: "#cbd5e1",
                caged: "#2563eb",
                neutral: "#cbd5e1",
                cell_stroke: "#fff",
                mute: "#ef4444",
                open: "#22c55e",
            },
            Theme::Dark => Self {
                fretboard: "#18181b",
                fret: "#3f3f46",
                nut: "#f4f4f5",
                string: "#52525b",
                text: "#94a3b8",
                inlay: "#3f3f46",
                caged: "#3b82f6",
                neutral: "#444",
                cell_stroke: "#000",
                mute: "#ef4444",
                open: "#22c55e",
            },
        }
    }
}

/// How a cell is filled. `None` cells are not drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellFill {
    #[default]
    None,
    Neutral,
    Interval(IntervalLabel),
    Tonic,
}

impl CellFill {
    pub fn color(self, palette: &Palette) -> Option<&'static str> {
        match self {
            CellFill::None => None,
            CellFill::Neutral => Some(palette.neutral),
            CellFill::Interval(label) => Some(interval_color(label)),
            CellFill::Tonic => Some(interval_color(IntervalLabel::Unison)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellView {
    pub position: Position,
    pub x: f64,
    pub y: f64,
    pub note: PitchClass,
    pub interval: IntervalLabel,
    pub is_scale: bool,
    pub is_chord: bool,
    pub is_tonic: bool,
    pub is_caged: bool,
    pub fill: CellFill,
    pub tonic_ring: bool,
    pub label: Option<String>,
}

impl CellView {
    pub fn is_visible(&self) -> bool {
        self.fill != CellFill::None
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerView {
    pub id: String,
    pub position: Position,
    pub x: f64,
    pub y: f64,
    pub shape: MarkerShape,
    pub color: String,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineView {
    pub id: String,
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub color: String,
    pub width: u8,
}

/// Open or mute glyph left of the nut.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusGlyph {
    pub string: usize,
    pub status: StringStatus,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DiagramView {
    pub layout: FretboardLayout,
    pub palette: Palette,
    pub tuning: Vec<PitchClass>,
    /// One entry per visible cell, string-major.
    pub cells: Vec<CellView>,
    pub caged: Vec<Position>,
    pub markers: Vec<MarkerView>,
    pub lines: Vec<LineView>,
    pub inlays: Vec<Inlay>,
    pub statuses: Vec<StatusGlyph>,
}

impl DiagramView {
    pub fn cell(&self, string: usize, fret: u8) -> Option<&CellView> {
        self.cells.iter().find(|c| c.position == Position::new(string, fret))
    }

    /// Cells that are actually painted.
    pub fn visible_cells(&self) -> impl Iterator<Item = &CellView> {
        self.cells.iter().filter(|c| c.is_visible())
    }
}

/// Build the complete view of a diagram.
pub fn render_view(diagram: &Diagram, config: &LayoutConfig, theme: Theme) -> DiagramView {
    let layout = FretboardLayout::for_diagram(config, diagram);
    let tuning = diagram.effective_tuning();
    let caged = caged_overlay(diagram, &tuning);
    let cells = cell_views(diagram, &layout, &tuning, &caged);
    let markers = marker_views(diagram, &layout, &tuning);
    let lines = line_views(diagram, &layout);
    let inlays = if diagram.layers.show_inlays { layout.inlays() } else { Vec::new() };
    let statuses = status_glyphs(diagram, &layout);

    DiagramView {
        layout,
        palette: Palette::for_theme(theme),
        tuning,
        cells,
        caged,
        markers,
        lines,
        inlays,
        statuses,
    }
}

/// CAGED shape positions copied across the visible range; empty when no shape is set.
pub fn caged_overlay(diagram: &Diagram, tuning: &[PitchClass]) -> Vec<Position> {
    match diagram.caged_shape {
        Some(shape) => {
            let base = caged_positions(diagram.root, shape, tuning);
            expand_caged(&base, diagram.start_fret, diagram.end_fret)
        }
        None => Vec::new(),
    }
}

pub fn cell_views(
    diagram: &Diagram,
    layout: &FretboardLayout,
    tuning: &[PitchClass],
    caged: &[Position],
) -> Vec<CellView> {
    let scale = diagram.scale_notes();
    let spec = diagram.chord_spec();
    let harmony_on = spec.is_some();
    let chord = spec.map(|spec| chord_notes(&spec)).unwrap_or_default();
    let layers = diagram.layers;

    let mut cells = Vec::with_capacity(tuning.len() * layout.visible_frets());
    for string in 0..tuning.len() {
        for fret in diagram.start_fret..=diagram.end_fret {
            let position = Position::new(string, fret);
            let note = note_at(string, fret, tuning);
            let interval = IntervalLabel::between(diagram.root, note);
            let is_scale = scale.contains(&note);
            let is_chord = chord.contains(&note);
            let is_tonic = note == diagram.root;

            let highlight = match diagram.color_mode {
                ColorMode::Single => CellFill::Tonic,
                ColorMode::Intervals => CellFill::Interval(interval),
            };
            let mut fill = CellFill::None;
            if layers.show_all_notes {
                fill = CellFill::Neutral;
            }
            if layers.show_scale && is_scale {
                fill = highlight;
            }
            if harmony_on && is_chord {
                fill = highlight;
            }
            if layers.show_tonic && is_tonic && fill == CellFill::None {
                fill = CellFill::Tonic;
            }

            let label = match diagram.label_mode {
                LabelMode::Note => Some(note.name().to_string()),
                LabelMode::Interval => Some(interval.as_str().to_string()),
                LabelMode::Fingering | LabelMode::None => None,
            };
            let (x, y) = layout.position_xy(position);

            cells.push(CellView {
                position,
                x,
                y,
                note,
                interval,
                is_scale,
                is_chord,
                is_tonic,
                is_caged: caged.contains(&position),
                fill,
                tonic_ring: is_tonic && layers.show_tonic,
                label,
            });
        }
    }
    cells
}

pub fn marker_views(diagram: &Diagram, layout: &FretboardLayout, tuning: &[PitchClass]) -> Vec<MarkerView> {
    diagram
        .markers
        .iter()
        .filter(|m| m.string < tuning.len())
        .map(|m| {
            let position = m.position();
            let note = note_at(m.string, m.fret, tuning);
            let label = match diagram.label_mode {
                LabelMode::Note => Some(note.name().to_string()),
                LabelMode::Interval => Some(IntervalLabel::between(diagram.root, note).as_str().to_string()),
                LabelMode::Fingering => m.finger.clone().filter(|f| !f.is_empty()),
                LabelMode::None => None,
            };
            let (x, y) = layout.position_xy(position);
            MarkerView {
                id: m.id.clone(),
                position,
                x,
                y,
                shape: m.shape,
                color: m.color.clone(),
                label,
            }
        })
        .collect()
}

pub fn line_views(diagram: &Diagram, layout: &FretboardLayout) -> Vec<LineView> {
    let strings = diagram.string_count();
    diagram
        .lines
        .iter()
        .filter(|l| l.start.string < strings && l.end.string < strings)
        .map(|l| LineView {
            id: l.id.clone(),
            from: layout.position_xy(l.start),
            to: layout.position_xy(l.end),
            color: l.color.clone(),
            width: l.width,
        })
        .collect()
}

/// Open/mute glyphs; empty unless the nut is on screen.
pub fn status_glyphs(diagram: &Diagram, layout: &FretboardLayout) -> Vec<StatusGlyph> {
    if !layout.nut_visible() {
        return Vec::new();
    }
    (0..diagram.string_count())
        .filter_map(|string| match diagram.string_status(string) {
            StringStatus::Normal => None,
            status => Some(StatusGlyph {
                string,
                status,
                x: layout.status_x(),
                y: layout.string_y(string),
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::{HarmonyMode, Line, Marker};
    use crate::harmony::CagedShape;
    use crate::pitch::PitchClass::*;

    fn view(diagram: &Diagram) -> DiagramView {
        render_view(diagram, &LayoutConfig::default(), Theme::Dark)
    }

    #[test]
    fn test_blank_diagram_paints_nothing() {
        let v = view(&Diagram::default());
        assert_eq!(v.cells.len(), 6 * 16);
        assert_eq!(v.visible_cells().count(), 0);
        assert_eq!(v.inlays.len(), 7);
        assert!(v.statuses.is_empty());
    }

    #[test]
    fn test_scale_layer_single_colour() {
        let mut diagram = Diagram::default();
        diagram.layers.show_scale = true;
        let v = view(&diagram);
        // E on the open high string is in C major.
        assert_eq!(v.cell(0, 0).unwrap().fill, CellFill::Tonic);
        // F# is not.
        assert_eq!(v.cell(0, 2).unwrap().fill, CellFill::None);
        assert!(v.visible_cells().all(|c| c.is_scale));
    }

    #[test]
    fn test_interval_colour_mode() {
        let mut diagram = Diagram::default();
        diagram.layers.show_scale = true;
        diagram.color_mode = ColorMode::Intervals;
        let v = view(&diagram);
        let e = v.cell(0, 0).unwrap();
        assert_eq!(e.fill, CellFill::Interval(IntervalLabel::MajorThird));
        assert_eq!(e.fill.color(&v.palette), Some("#22c55e"));
    }

    #[test]
    fn test_layer_precedence() {
        let mut diagram = Diagram::default();
        diagram.layers.show_all_notes = true;
        diagram.layers.show_tonic = true;
        diagram.harmony_mode = HarmonyMode::Triads;
        diagram.color_mode = ColorMode::Intervals;
        let v = view(&diagram);
        // Not in the chord: stays neutral.
        assert_eq!(v.cell(0, 2).unwrap().fill, CellFill::Neutral);
        // Chord tone overrides neutral.
        assert_eq!(v.cell(0, 3).unwrap().fill, CellFill::Interval(IntervalLabel::PerfectFifth));
        // The tonic is already filled by the chord; the tonic layer only adds the ring.
        let c = v.cell(1, 1).unwrap();
        assert_eq!(c.fill, CellFill::Interval(IntervalLabel::Unison));
        assert!(c.tonic_ring);
        assert!(c.is_chord && c.is_tonic && c.is_scale);
    }

    #[test]
    fn test_tonic_layer_alone() {
        let mut diagram = Diagram::default();
        diagram.layers.show_tonic = true;
        let v = view(&diagram);
        let tonics: Vec<Position> = v.visible_cells().map(|c| c.position).collect();
        assert!(tonics.contains(&Position::new(1, 1)));
        assert!(tonics.contains(&Position::new(4, 3)));
        assert!(v.visible_cells().all(|c| c.fill == CellFill::Tonic && c.tonic_ring));
    }

    #[test]
    fn test_labels_follow_label_mode() {
        let mut diagram = Diagram::default();
        diagram.layers.show_scale = true;
        diagram.label_mode = LabelMode::Note;
        assert_eq!(view(&diagram).cell(4, 3).unwrap().label.as_deref(), Some("C"));
        diagram.label_mode = LabelMode::Interval;
        assert_eq!(view(&diagram).cell(4, 7).unwrap().label.as_deref(), Some("3"));
        diagram.label_mode = LabelMode::Fingering;
        assert_eq!(view(&diagram).cell(4, 7).unwrap().label, None);
    }

    #[test]
    fn test_caged_overlay() {
        let mut diagram = Diagram::default();
        diagram.caged_shape = Some(CagedShape::C);
        let v = view(&diagram);
        assert!(v.caged.contains(&Position::new(4, 3)));
        assert!(v.caged.contains(&Position::new(4, 15)));
        assert!(v.cell(4, 3).unwrap().is_caged);
        assert!(v.caged.iter().all(|p| p.fret <= 15));
    }

    #[test]
    fn test_marker_and_line_views() {
        let mut diagram = Diagram::default();
        diagram.label_mode = LabelMode::Fingering;
        diagram.markers.push(Marker::new(Position::new(4, 3), MarkerShape::Square, "#3b82f6"));
        diagram.markers.push(Marker::new(Position::new(7, 3), MarkerShape::Circle, "#3b82f6"));
        diagram.lines.push(Line::new(Position::new(4, 3), Position::new(3, 5), "#000", 4));
        diagram.lines.push(Line::new(Position::new(4, 3), Position::new(6, 5), "#000", 4));
        let v = view(&diagram);
        assert_eq!(v.markers.len(), 1);
        assert_eq!(v.markers[0].label.as_deref(), Some("1"));
        assert_eq!(v.lines.len(), 1);
        assert_eq!(v.lines[0].from, v.layout.position_xy(Position::new(4, 3)));

        diagram.label_mode = LabelMode::Interval;
        diagram.root = A;
        assert_eq!(view(&diagram).markers[0].label.as_deref(), Some("b3"));
    }

    #[test]
    fn test_status_glyphs_need_the_nut() {
        let mut diagram = Diagram::default();
        diagram.cycle_string_status(5);
        diagram.cycle_string_status(0);
        diagram.cycle_string_status(0);
        let v = view(&diagram);
        assert_eq!(v.statuses.len(), 2);
        assert_eq!(v.statuses[0].status, StringStatus::Mute);
        assert_eq!(v.statuses[1].status, StringStatus::Open);

        diagram.set_fret_range(3, 12);
        assert!(view(&diagram).statuses.is_empty());
    }

    #[test]
    fn test_inlays_toggle_and_theme() {
        let mut diagram = Diagram::default();
        diagram.layers.show_inlays = false;
        assert!(view(&diagram).inlays.is_empty());
        let light = render_view(&diagram, &LayoutConfig::default(), Theme::Light);
        assert_eq!(light.palette.fretboard, "#ffffff");
        assert_eq!(CellFill::Neutral.color(&light.palette), Some("#cbd5e1"));
        assert_eq!(CellFill::None.color(&light.palette), None);
    }
}
