//! # Geometry/Layout Adapter
//!
//! Translates abstract (string, fret) coordinates into 2D drawing coordinates and back.
//!
//! ## Coordinate System
//! - x grows along the neck: the nut (or `start_fret`) on the left for right-handed
//!   players, mirrored for left-handed ones.
//! - y grows across the neck: string 0 (highest pitch) at the top.
//! - A fret *line* `f` sits at [`FretboardLayout::fret_x`]; notes on fret `f` are drawn
//!   in the middle of the cell between line `f - 1` and line `f`
//!   ([`FretboardLayout::note_x`]). Open-string notes sit on the nut.
//!
//! ## Hit-testing
//! [`FretboardLayout::hit_test`] maps a pointer position back to a fretboard cell, or to
//! the string-status area left of the nut. It is the inverse of `note_x`/`string_y`.
//!
//! ## Example
//! ```rust
//! use fretboard::layout::{FretboardLayout, Hit, LayoutConfig};
//!
//! let layout = FretboardLayout::new(&LayoutConfig::default(), 6, 0, 15, false);
//! let (x, y) = (layout.note_x(5), layout.string_y(2));
//! assert_eq!(layout.hit_test(x, y), Some(Hit::Cell { string: 2, fret: 5 }));
//! ```

use crate::fretmap::Position;
use serde::{Deserialize, Serialize};

/// Fret numbers that carry an inlay dot; multiples of 12 carry two.
pub const INLAY_FRETS: [u8; 10] = [3, 5, 7, 9, 12, 15, 17, 19, 21, 24];

/// Fixed drawing constants. Deserialised from the `layout` section of the editor config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub width: f64,
    pub margin_x: f64,
    pub margin_y: f64,
    /// Vertical space per string.
    pub string_gap: f64,
    /// Height before adding string space.
    pub base_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 1300.0,
            margin_x: 100.0,
            margin_y: 60.0,
            string_gap: 45.0,
            base_height: 150.0,
        }
    }
}

/// What a pointer landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// A fretboard cell inside the visible range.
    Cell { string: usize, fret: u8 },
    /// The status area left of the nut (only when the nut is visible).
    StringStatus { string: usize },
}

/// Inlay dot centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inlay {
    pub fret: u8,
    pub x: f64,
    pub y: f64,
}

/// Layout of one diagram: instrument string count, visible range and handedness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FretboardLayout {
    pub width: f64,
    pub height: f64,
    pub margin_x: f64,
    pub margin_y: f64,
    pub fret_width: f64,
    pub string_spacing: f64,
    pub string_count: usize,
    pub start_fret: u8,
    pub end_fret: u8,
    pub left_handed: bool,
}

impl FretboardLayout {
    pub fn new(config: &LayoutConfig, string_count: usize, start_fret: u8, end_fret: u8, left_handed: bool) -> Self {
        let end_fret = end_fret.max(start_fret.saturating_add(1));
        let height = config.base_height + string_count as f64 * config.string_gap;
        let visible = (end_fret - start_fret) as f64 + 1.0;
        // With the nut visible the open-string column is narrower than a fret.
        let columns = if start_fret == 0 { visible - 0.4 } else { visible };
        let fret_width = (config.width - 2.0 * config.margin_x) / columns;
        let string_spacing = if string_count > 1 {
            (height - config.margin_y - 60.0) / (string_count - 1) as f64
        } else {
            0.0
        };

        Self {
            width: config.width,
            height,
            margin_x: config.margin_x,
            margin_y: config.margin_y,
            fret_width,
            string_spacing,
            string_count,
            start_fret,
            end_fret,
            left_handed,
        }
    }

    /// Layout for a diagram's instrument, range and handedness.
    pub fn for_diagram(config: &LayoutConfig, diagram: &crate::diagram::Diagram) -> Self {
        Self::new(
            config,
            diagram.string_count(),
            diagram.start_fret,
            diagram.end_fret,
            diagram.is_left_handed,
        )
    }

    pub fn nut_visible(&self) -> bool {
        self.start_fret == 0
    }

    /// Number of fret columns drawn, including the open column when the nut is visible.
    pub fn visible_frets(&self) -> usize {
        (self.end_fret - self.start_fret) as usize + 1
    }

    pub fn string_y(&self, string: usize) -> f64 {
        self.margin_y + string as f64 * self.string_spacing
    }

    /// x of fret line `fret`, mirrored for left-handed layouts.
    pub fn fret_x(&self, fret: u8) -> f64 {
        let relative = fret as f64 - self.start_fret as f64;
        let x = self.margin_x + relative * self.fret_width;
        self.mirror(x)
    }

    /// x where a note on `fret` is drawn.
    pub fn note_x(&self, fret: u8) -> f64 {
        if fret == 0 && self.nut_visible() {
            return self.fret_x(0);
        }
        let half = self.fret_width / 2.0;
        if self.left_handed {
            self.fret_x(fret) + half
        } else {
            self.fret_x(fret) - half
        }
    }

    pub fn position_xy(&self, position: Position) -> (f64, f64) {
        (self.note_x(position.fret), self.string_y(position.string))
    }

    /// x of the string-status glyph column, left of the nut.
    pub fn status_x(&self) -> f64 {
        let offset = if self.left_handed { 50.0 } else { -50.0 };
        self.note_x(0) + offset
    }

    pub fn marker_radius(&self) -> f64 {
        (self.fret_width * 0.42).clamp(12.0, 18.0)
    }

    pub fn font_size(&self) -> f64 {
        (self.marker_radius() * 0.75).clamp(9.0, 13.0)
    }

    /// Inlay dots within the visible range.
    pub fn inlays(&self) -> Vec<Inlay> {
        let middle = self.height / 2.0;
        INLAY_FRETS
            .iter()
            .filter(|fret| **fret >= self.start_fret && **fret <= self.end_fret)
            .flat_map(|fret| {
                let x = self.note_x(*fret);
                if fret % 12 == 0 {
                    vec![
                        Inlay { fret: *fret, x, y: middle - self.string_spacing },
                        Inlay { fret: *fret, x, y: middle + self.string_spacing },
                    ]
                } else {
                    vec![Inlay { fret: *fret, x, y: middle }]
                }
            })
            .collect()
    }

    /// Map a pointer position (in layout units) to what it hits.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<Hit> {
        let effective_x = self.mirror(x);
        let string = self.string_at(y)?;

        if self.nut_visible() && effective_x < self.margin_x - 10.0 {
            return Some(Hit::StringStatus { string });
        }

        let fret = if self.nut_visible() && effective_x < self.margin_x + 15.0 {
            0
        } else {
            let column = ((effective_x - self.margin_x) / self.fret_width).floor();
            let fret = column + self.start_fret as f64 + 1.0;
            if fret < 0.0 {
                return None;
            }
            fret as u8
        };

        if fret >= self.start_fret && fret <= self.end_fret {
            Some(Hit::Cell { string, fret })
        } else {
            None
        }
    }

    fn string_at(&self, y: f64) -> Option<usize> {
        if self.string_count == 0 {
            return None;
        }
        if self.string_count == 1 {
            return Some(0);
        }
        let index = ((y - self.margin_y) / self.string_spacing).round();
        if index < 0.0 || index >= self.string_count as f64 {
            return None;
        }
        Some(index as usize)
    }

    fn mirror(&self, x: f64) -> f64 {
        if self.left_handed {
            self.width - x
        } else {
            x
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(start: u8, end: u8, left_handed: bool) -> FretboardLayout {
        FretboardLayout::new(&LayoutConfig::default(), 6, start, end, left_handed)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "{} != {}", actual, expected);
    }

    #[test]
    fn test_dimensions() {
        let l = layout(0, 15, false);
        assert_close(l.height, 150.0 + 6.0 * 45.0);
        assert_close(l.fret_width, 1100.0 / 15.6);
        assert_close(l.string_spacing, 60.0);
        assert_eq!(l.visible_frets(), 16);
        let l = layout(5, 12, false);
        assert_close(l.fret_width, 1100.0 / 8.0);
    }

    #[test]
    fn test_string_y() {
        let l = layout(0, 15, false);
        assert_close(l.string_y(0), 60.0);
        assert_close(l.string_y(5), 360.0);
    }

    #[test]
    fn test_note_x_handedness() {
        let right = layout(0, 12, false);
        let left = layout(0, 12, true);
        assert_close(right.note_x(0), 100.0);
        assert_close(left.note_x(0), 1200.0);
        assert_close(right.note_x(3), 100.0 + 2.5 * right.fret_width);
        assert_close(left.note_x(3), right.width - right.note_x(3));
    }

    #[test]
    fn test_note_x_without_nut() {
        let l = layout(5, 12, false);
        assert_close(l.fret_x(5), 100.0);
        assert_close(l.note_x(5), 100.0 - l.fret_width / 2.0);
        assert_close(l.note_x(6), 100.0 + l.fret_width / 2.0);
    }

    #[test]
    fn test_hit_test_round_trips_every_cell() {
        for (start, end) in [(0u8, 15u8), (5, 12), (0, 24)] {
            for left_handed in [false, true] {
                let l = layout(start, end, left_handed);
                for string in 0..6 {
                    for fret in start..=end {
                        let (x, y) = l.position_xy(Position::new(string, fret));
                        assert_eq!(
                            l.hit_test(x, y),
                            Some(Hit::Cell { string, fret }),
                            "range {}-{} left={} string {} fret {}",
                            start,
                            end,
                            left_handed,
                            string,
                            fret
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_hit_test_string_status_area() {
        let l = layout(0, 12, false);
        assert_eq!(l.hit_test(40.0, l.string_y(3)), Some(Hit::StringStatus { string: 3 }));
        let mirrored = layout(0, 12, true);
        assert_eq!(mirrored.hit_test(1260.0, mirrored.string_y(1)), Some(Hit::StringStatus { string: 1 }));
        // With the nut hidden the left margin belongs to the first visible fret.
        let l = layout(5, 12, false);
        assert_eq!(l.hit_test(40.0, l.string_y(3)), Some(Hit::Cell { string: 3, fret: 5 }));
        assert_eq!(l.hit_test(-200.0, l.string_y(3)), None);
    }

    #[test]
    fn test_hit_test_outside() {
        let l = layout(0, 12, false);
        assert_eq!(l.hit_test(300.0, -100.0), None);
        assert_eq!(l.hit_test(300.0, 1000.0), None);
        assert_eq!(l.hit_test(1299.0, l.string_y(0)), None);
    }

    #[test]
    fn test_marker_radius_and_font_are_clamped() {
        assert_close(layout(0, 3, false).marker_radius(), 18.0);
        let narrow = LayoutConfig { width: 600.0, ..LayoutConfig::default() };
        let l = FretboardLayout::new(&narrow, 6, 0, 36, false);
        assert_close(l.marker_radius(), 12.0);
        assert_close(l.font_size(), 9.0);
    }

    #[test]
    fn test_inlays() {
        let l = layout(0, 15, false);
        let frets: Vec<u8> = l.inlays().iter().map(|i| i.fret).collect();
        assert_eq!(frets, vec![3, 5, 7, 9, 12, 12, 15]);
        let l = layout(13, 20, false);
        let frets: Vec<u8> = l.inlays().iter().map(|i| i.fret).collect();
        assert_eq!(frets, vec![15, 17, 19]);
    }

    #[test]
    fn test_single_string_layout() {
        let l = FretboardLayout::new(&LayoutConfig::default(), 1, 0, 12, false);
        assert_close(l.string_spacing, 0.0);
        assert_eq!(l.hit_test(l.note_x(4), 500.0), Some(Hit::Cell { string: 0, fret: 4 }));
    }
}
