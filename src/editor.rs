//! # Diagram Editor
//!
//! A reducer over one [`Diagram`]: pointer events and field edits go in, a new diagram
//! value comes out, and the value it replaced is pushed onto a bounded [`History`].
//!
//! ## Events
//! | Event | Tool | Effect |
//! |-------|------|--------|
//! | `Note` | marker | toggle a marker at the cell |
//! | `Note` | line | first click stores the start, second adds the line |
//! | `Line` | line (no pending start) | delete that line |
//! | `MarkerFinger` | any | cycle the marker's finger label |
//! | `StringStatus` | any | cycle normal → open → mute |
//!
//! The view tool ignores cell clicks so the diagram can be inspected without editing.
//!
//! ## Example
//! ```rust
//! use fretboard::editor::{Editor, EditorEvent};
//! use fretboard::diagram::Diagram;
//!
//! let mut editor = Editor::new(Diagram::default(), 25);
//! editor.dispatch(EditorEvent::Note { string: 4, fret: 3 });
//! assert_eq!(editor.diagram().markers.len(), 1);
//! editor.undo();
//! assert!(editor.diagram().markers.is_empty());
//! ```

use crate::diagram::{next_finger, Diagram, Line, Marker, MarkerShape, LINE_WIDTHS};
use crate::fretmap::{Position, MAX_FRET};
use crate::history::History;
use crate::layout::{FretboardLayout, Hit};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// Default marker and line colour.
pub const DEFAULT_COLOR: &str = "#ef4444";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Marker,
    Line,
    View,
}

/// Input from the rendered diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum EditorEvent {
    Note { string: usize, fret: u8 },
    MarkerFinger { id: String },
    StringStatus { string: usize },
    Line { index: usize },
}

#[derive(Debug, Clone)]
pub struct Editor {
    diagram: Diagram,
    history: History<Diagram>,
    tool: Tool,
    marker_shape: MarkerShape,
    color: String,
    thickness: u8,
    line_start: Option<Position>,
}

impl Editor {
    pub fn new(diagram: Diagram, history_depth: usize) -> Self {
        Self {
            diagram,
            history: History::new(history_depth),
            tool: Tool::Marker,
            marker_shape: MarkerShape::Circle,
            color: DEFAULT_COLOR.to_string(),
            thickness: LINE_WIDTHS[1],
            line_start: None,
        }
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn into_diagram(self) -> Diagram {
        self.diagram
    }

    /// Swap in another diagram, forgetting history and any pending line.
    pub fn load(&mut self, diagram: Diagram) {
        self.diagram = diagram;
        self.history.clear();
        self.line_start = None;
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
        self.line_start = None;
    }

    pub fn set_marker_shape(&mut self, shape: MarkerShape) {
        self.marker_shape = shape;
    }

    pub fn set_color(&mut self, color: &str) {
        self.color = color.to_string();
    }

    /// Line thickness, snapped to the nearest allowed width.
    pub fn set_thickness(&mut self, width: u8) {
        self.thickness = LINE_WIDTHS
            .iter()
            .copied()
            .min_by_key(|allowed| allowed.abs_diff(width))
            .unwrap_or(LINE_WIDTHS[1]);
    }

    pub fn thickness(&self) -> u8 {
        self.thickness
    }

    pub fn pending_line_start(&self) -> Option<Position> {
        self.line_start
    }

    /// Apply an event. Returns whether the diagram changed.
    pub fn dispatch(&mut self, event: EditorEvent) -> bool {
        trace!("editor event {:?} with {:?} tool", event, self.tool);
        match event {
            EditorEvent::Note { string, fret } => self.note(Position::new(string, fret)),
            EditorEvent::MarkerFinger { id } => self.update(|d| {
                if let Some(marker) = d.markers.iter_mut().find(|m| m.id == id) {
                    marker.finger = next_finger(marker.finger.as_deref());
                }
            }),
            EditorEvent::StringStatus { string } => self.update(|d| d.cycle_string_status(string)),
            EditorEvent::Line { index } => {
                if self.tool != Tool::Line || self.line_start.is_some() {
                    return false;
                }
                self.update(|d| {
                    if index < d.lines.len() {
                        d.lines.remove(index);
                    }
                })
            }
        }
    }

    /// Hit-test a pointer position and dispatch the resulting event.
    pub fn click(&mut self, layout: &FretboardLayout, x: f64, y: f64) -> bool {
        match layout.hit_test(x, y) {
            Some(Hit::Cell { string, fret }) => self.dispatch(EditorEvent::Note { string, fret }),
            Some(Hit::StringStatus { string }) => self.dispatch(EditorEvent::StringStatus { string }),
            None => false,
        }
    }

    /// Edit the diagram through a closure, recording the previous value when anything
    /// changed. Returns whether it changed.
    pub fn update<F>(&mut self, edit: F) -> bool
    where
        F: FnOnce(&mut Diagram),
    {
        let mut next = self.diagram.clone();
        edit(&mut next);
        if next == self.diagram {
            return false;
        }
        let previous = std::mem::replace(&mut self.diagram, next);
        self.history.push(previous);
        true
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo(self.diagram.clone()) {
            Some(previous) => {
                self.diagram = previous;
                self.line_start = None;
                debug!("undo ({} steps left)", self.history.undo_len());
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo(self.diagram.clone()) {
            Some(next) => {
                self.diagram = next;
                self.line_start = None;
                debug!("redo ({} steps left)", self.history.redo_len());
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn note(&mut self, position: Position) -> bool {
        if position.string >= self.diagram.string_count() || position.fret > MAX_FRET {
            return false;
        }
        match self.tool {
            Tool::Marker => {
                let shape = self.marker_shape;
                let color = self.color.clone();
                self.update(|d| match d.markers.iter().position(|m| m.position() == position) {
                    Some(index) => {
                        d.markers.remove(index);
                    }
                    None => d.markers.push(Marker::new(position, shape, &color)),
                })
            }
            Tool::Line => match self.line_start.take() {
                None => {
                    self.line_start = Some(position);
                    false
                }
                Some(start) => {
                    let line = Line::new(start, position, &self.color, self.thickness);
                    self.update(|d| d.lines.push(line))
                }
            },
            Tool::View => false,
        }
    }
}
