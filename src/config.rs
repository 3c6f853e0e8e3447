//! # Editor Configuration
//!
//! Defaults for new diagrams, editor limits and drawing constants, read from YAML.
//!
//! ## Format
//! ```yaml
//! history-depth: 25
//! max-diagrams: 12
//! storage-key: guitar_architect_data
//! instrument: guitar-7
//! tuning: Drop D
//! root: Eb
//! scale: Dorian
//! start-fret: 0
//! end-fret: 15
//! layout:
//!   width: 1300
//!   margin-x: 100
//! ```
//!
//! Every key is optional; an empty document yields [`EditorConfig::default`]. Values are
//! validated strictly: an unknown name or an impossible range is a
//! [`FretboardError::Config`] rather than a silent fallback.
//!
//! ## Example
//! ```rust
//! use fretboard::EditorConfig;
//! use fretboard::pitch::PitchClass;
//!
//! let config = EditorConfig::from_yaml("root: Bb\nhistory-depth: 50").unwrap();
//! assert_eq!(config.root, PitchClass::As);
//! assert_eq!(config.history_depth, 50);
//! assert_eq!(config.max_diagrams, 12);
//! ```

use crate::diagram::Diagram;
use crate::error::{FretboardError, Result};
use crate::fretmap::MAX_FRET;
use crate::history::DEFAULT_HISTORY_DEPTH;
use crate::layout::LayoutConfig;
use crate::pitch::PitchClass;
use crate::project::MAX_DIAGRAMS;
use crate::scale::{find_scale, DEFAULT_SCALE};
use crate::tuning::{InstrumentType, TuningKey};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Storage key of the persisted session record.
pub const DEFAULT_STORAGE_KEY: &str = "guitar_architect_data";

/// Configuration as written in YAML, before validation.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RawConfig {
    pub history_depth: Option<usize>,
    pub max_diagrams: Option<usize>,
    pub storage_key: Option<String>,
    pub instrument: Option<String>,
    pub tuning: Option<String>,
    pub root: Option<String>,
    pub scale: Option<String>,
    pub start_fret: Option<u8>,
    pub end_fret: Option<u8>,
    pub layout: Option<LayoutConfig>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    pub history_depth: usize,
    pub max_diagrams: usize,
    pub storage_key: String,
    pub instrument: InstrumentType,
    pub tuning: TuningKey,
    pub root: PitchClass,
    pub scale: String,
    pub start_fret: u8,
    pub end_fret: u8,
    pub layout: LayoutConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_depth: DEFAULT_HISTORY_DEPTH,
            max_diagrams: MAX_DIAGRAMS,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            instrument: InstrumentType::Guitar6,
            tuning: TuningKey::Standard,
            root: PitchClass::C,
            scale: DEFAULT_SCALE.to_string(),
            start_fret: 0,
            end_fret: 15,
            layout: LayoutConfig::default(),
        }
    }
}

impl EditorConfig {
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawConfig = serde_yaml::from_str(content).map_err(|e| FretboardError::Config(e.to_string()))?;
        Self::from_raw(raw)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_raw(raw: RawConfig) -> Result<Self> {
        let defaults = Self::default();

        let history_depth = positive("history-depth", raw.history_depth, defaults.history_depth)?;
        let max_diagrams = positive("max-diagrams", raw.max_diagrams, defaults.max_diagrams)?;

        let storage_key = match raw.storage_key {
            Some(key) if key.trim().is_empty() => {
                return Err(FretboardError::Config("storage-key must not be empty".to_string()))
            }
            Some(key) => key,
            None => defaults.storage_key,
        };

        let instrument = match &raw.instrument {
            Some(name) => InstrumentType::from_key(name)
                .ok_or_else(|| FretboardError::Config(format!("Unknown instrument: {}", name)))?,
            None => defaults.instrument,
        };

        let tuning = match &raw.tuning {
            Some(name) => match TuningKey::from_name(name) {
                Some(TuningKey::Custom) => {
                    return Err(FretboardError::Config("tuning must be a named preset".to_string()))
                }
                Some(key) => key,
                None => return Err(FretboardError::Config(format!("Unknown tuning: {}", name))),
            },
            None => defaults.tuning,
        };

        let root = match &raw.root {
            Some(name) => PitchClass::from_name(name)
                .ok_or_else(|| FretboardError::Config(format!("Invalid root note: {}", name)))?,
            None => defaults.root,
        };

        let scale = match &raw.scale {
            Some(name) => find_scale(name)
                .map(|def| def.name.to_string())
                .ok_or_else(|| FretboardError::Config(format!("Unknown scale: {}", name)))?,
            None => defaults.scale,
        };

        let start_fret = raw.start_fret.unwrap_or(defaults.start_fret);
        let end_fret = raw.end_fret.unwrap_or(defaults.end_fret);
        if start_fret >= end_fret || end_fret > MAX_FRET {
            return Err(FretboardError::Config(format!(
                "fret range {}-{} must satisfy start < end <= {}",
                start_fret, end_fret, MAX_FRET
            )));
        }

        let layout = raw.layout.unwrap_or_default();
        if layout.string_gap <= 0.0 || layout.base_height <= 0.0 || layout.width <= 2.0 * layout.margin_x {
            return Err(FretboardError::Config(
                "layout leaves no room for the fretboard".to_string(),
            ));
        }

        Ok(Self {
            history_depth,
            max_diagrams,
            storage_key,
            instrument,
            tuning,
            root,
            scale,
            start_fret,
            end_fret,
            layout,
        })
    }

    /// A blank diagram carrying the configured defaults.
    pub fn new_diagram(&self) -> Diagram {
        let mut diagram = Diagram::new(self.instrument);
        diagram.set_tuning(self.tuning, None);
        diagram.root = self.root;
        diagram.scale_type = self.scale.clone();
        diagram.set_fret_range(self.start_fret, self.end_fret);
        diagram
    }
}

fn positive(key: &str, value: Option<usize>, default: usize) -> Result<usize> {
    match value {
        Some(0) => Err(FretboardError::Config(format!("{} must be at least 1", key))),
        Some(n) => Ok(n),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(EditorConfig::from_yaml("").unwrap(), EditorConfig::default());
        assert_eq!(EditorConfig::from_yaml("  \n").unwrap(), EditorConfig::default());
    }

    #[test]
    fn test_full_document() {
        let yaml = r#"
history-depth: 40
max-diagrams: 6
storage-key: my_diagrams
instrument: bass-5
tuning: standard
root: F#
scale: Dorian
start-fret: 3
end-fret: 12
layout:
  width: 900
  string-gap: 30
"#;
        let config = EditorConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.history_depth, 40);
        assert_eq!(config.max_diagrams, 6);
        assert_eq!(config.storage_key, "my_diagrams");
        assert_eq!(config.instrument, InstrumentType::Bass5);
        assert_eq!(config.tuning, TuningKey::Standard);
        assert_eq!(config.root, PitchClass::Fs);
        assert_eq!(config.scale, "Dorian");
        assert_eq!((config.start_fret, config.end_fret), (3, 12));
        assert_eq!(config.layout.width, 900.0);
        assert_eq!(config.layout.string_gap, 30.0);
        assert_eq!(config.layout.margin_x, 100.0);
    }

    #[test]
    fn test_invalid_values() {
        let cases = [
            ("history-depth: 0", "Invalid config: history-depth must be at least 1"),
            ("max-diagrams: 0", "Invalid config: max-diagrams must be at least 1"),
            ("instrument: banjo", "Invalid config: Unknown instrument: banjo"),
            ("tuning: DADGAD", "Invalid config: Unknown tuning: DADGAD"),
            ("tuning: Custom", "Invalid config: tuning must be a named preset"),
            ("root: H", "Invalid config: Invalid root note: H"),
            ("scale: Bebop", "Invalid config: Unknown scale: Bebop"),
            ("start-fret: 12\nend-fret: 5", "Invalid config: fret range 12-5 must satisfy start < end <= 36"),
            ("end-fret: 40", "Invalid config: fret range 0-40 must satisfy start < end <= 36"),
            ("storage-key: ' '", "Invalid config: storage-key must not be empty"),
            ("layout:\n  width: 150", "Invalid config: layout leaves no room for the fretboard"),
        ];
        for (yaml, message) in cases {
            let err = EditorConfig::from_yaml(yaml).unwrap_err();
            assert_eq!(err.to_string(), message, "for {:?}", yaml);
        }
    }

    #[test]
    fn test_unknown_keys_and_bad_yaml_are_rejected() {
        assert!(matches!(
            EditorConfig::from_yaml("colour: red"),
            Err(FretboardError::Config(_))
        ));
        assert!(matches!(
            EditorConfig::from_yaml("history-depth: [1"),
            Err(FretboardError::Config(_))
        ));
        assert!(matches!(
            EditorConfig::from_yaml("layout:\n  widht: 900"),
            Err(FretboardError::Config(_))
        ));
    }

    #[test]
    fn test_new_diagram_uses_defaults() {
        let config = EditorConfig::from_yaml("instrument: guitar-7\nroot: A\nscale: Pentatonic Minor\nend-fret: 12")
            .unwrap();
        let diagram = config.new_diagram();
        assert_eq!(diagram.string_count(), 7);
        assert_eq!(diagram.root, PitchClass::A);
        assert_eq!(diagram.scale_type, "Pentatonic Minor");
        assert_eq!(diagram.end_fret, 12);
        assert_eq!(diagram.effective_tuning().len(), 7);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("editor.yaml");
        fs::write(&path, "root: D\n").unwrap();
        assert_eq!(EditorConfig::from_file(&path).unwrap().root, PitchClass::D);
        assert!(matches!(
            EditorConfig::from_file(dir.path().join("missing.yaml")),
            Err(FretboardError::Io(_))
        ));
    }
}
