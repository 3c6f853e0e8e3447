//! # Tuning and Instrument Resolution
//!
//! Static catalogs of instruments and named tunings, and the rule that turns a diagram's
//! tuning selection into the concrete open-string sequence.
//!
//! ## Conventions
//! - A tuning is a `Vec<PitchClass>` with one entry per string.
//! - Index 0 is the highest-pitched string (the high E on a standard guitar).
//! - The effective tuning always has exactly as many entries as the instrument has strings.
//!
//! ## Resolution rules
//! - `Custom` uses the user sequence if present, otherwise the instrument default.
//!   A custom sequence of the wrong length is fitted to the string count.
//! - Any preset key uses the preset table when the preset matches the instrument's
//!   string count, otherwise the instrument default.
//!
//! ## Example
//! ```rust
//! use fretboard::pitch::PitchClass;
//! use fretboard::tuning::{resolve_tuning, InstrumentType, TuningKey};
//!
//! let drop_d = resolve_tuning(InstrumentType::Guitar6, TuningKey::DropD, None);
//! assert_eq!(drop_d[5], PitchClass::D);
//!
//! // 6-string presets do not apply to a 4-string bass
//! let bass = resolve_tuning(InstrumentType::Bass4, TuningKey::DropD, None);
//! assert_eq!(bass.len(), 4);
//! ```

use crate::pitch::PitchClass;
use serde::{Deserialize, Serialize};
use std::fmt;

use PitchClass::*;

/// Supported instruments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InstrumentType {
    #[default]
    #[serde(rename = "guitar-6")]
    Guitar6,
    #[serde(rename = "guitar-7")]
    Guitar7,
    #[serde(rename = "guitar-8")]
    Guitar8,
    #[serde(rename = "bass-4")]
    Bass4,
    #[serde(rename = "bass-5")]
    Bass5,
}

/// String count and default tuning of an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstrumentPreset {
    pub instrument: InstrumentType,
    pub label: &'static str,
    pub default_tuning: &'static [PitchClass],
}

impl InstrumentPreset {
    pub fn strings(&self) -> usize {
        self.default_tuning.len()
    }
}

pub static INSTRUMENT_PRESETS: [InstrumentPreset; 5] = [
    InstrumentPreset {
        instrument: InstrumentType::Guitar6,
        label: "Guitar (6 strings)",
        default_tuning: &[E, B, G, D, A, E],
    },
    InstrumentPreset {
        instrument: InstrumentType::Guitar7,
        label: "Guitar (7 strings)",
        default_tuning: &[E, B, G, D, A, E, B],
    },
    InstrumentPreset {
        instrument: InstrumentType::Guitar8,
        label: "Guitar (8 strings)",
        default_tuning: &[E, B, G, D, A, E, B, Fs],
    },
    InstrumentPreset {
        instrument: InstrumentType::Bass4,
        label: "Bass (4 strings)",
        default_tuning: &[G, D, A, E],
    },
    InstrumentPreset {
        instrument: InstrumentType::Bass5,
        label: "Bass (5 strings)",
        default_tuning: &[G, D, A, E, B],
    },
];

impl InstrumentType {
    pub const ALL: [InstrumentType; 5] = [
        InstrumentType::Guitar6,
        InstrumentType::Guitar7,
        InstrumentType::Guitar8,
        InstrumentType::Bass4,
        InstrumentType::Bass5,
    ];

    pub fn preset(self) -> &'static InstrumentPreset {
        // The catalog is ordered like `ALL`.
        &INSTRUMENT_PRESETS[self as usize]
    }

    pub fn string_count(self) -> usize {
        self.preset().strings()
    }

    pub fn default_tuning(self) -> Vec<PitchClass> {
        self.preset().default_tuning.to_vec()
    }

    pub fn key(self) -> &'static str {
        match self {
            InstrumentType::Guitar6 => "guitar-6",
            InstrumentType::Guitar7 => "guitar-7",
            InstrumentType::Guitar8 => "guitar-8",
            InstrumentType::Bass4 => "bass-4",
            InstrumentType::Bass5 => "bass-5",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|i| i.key() == key.trim())
    }
}

impl fmt::Display for InstrumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.preset().label)
    }
}

/// Named tuning selection of a diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TuningKey {
    #[default]
    Standard,
    #[serde(rename = "Drop D")]
    DropD,
    #[serde(rename = "Drop C")]
    DropC,
    #[serde(rename = "Open D")]
    OpenD,
    #[serde(rename = "Open G")]
    OpenG,
    Custom,
}

impl TuningKey {
    pub const PRESETS: [TuningKey; 5] = [
        TuningKey::Standard,
        TuningKey::DropD,
        TuningKey::DropC,
        TuningKey::OpenD,
        TuningKey::OpenG,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TuningKey::Standard => "Standard",
            TuningKey::DropD => "Drop D",
            TuningKey::DropC => "Drop C",
            TuningKey::OpenD => "Open D",
            TuningKey::OpenG => "Open G",
            TuningKey::Custom => "Custom",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::PRESETS
            .into_iter()
            .chain(std::iter::once(TuningKey::Custom))
            .find(|k| k.name().eq_ignore_ascii_case(name))
    }

    /// Open-string table of a named preset; `None` for `Custom`.
    pub fn preset_notes(self) -> Option<&'static [PitchClass]> {
        match self {
            TuningKey::Standard => Some(&[E, B, G, D, A, E]),
            TuningKey::DropD => Some(&[E, B, G, D, A, D]),
            TuningKey::DropC => Some(&[D, A, F, C, G, C]),
            TuningKey::OpenD => Some(&[D, A, Fs, D, A, D]),
            TuningKey::OpenG => Some(&[D, B, G, D, G, D]),
            TuningKey::Custom => None,
        }
    }
}

impl fmt::Display for TuningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Effective open-string sequence for an instrument and tuning selection.
pub fn resolve_tuning(
    instrument: InstrumentType,
    key: TuningKey,
    custom: Option<&[PitchClass]>,
) -> Vec<PitchClass> {
    let default = instrument.preset().default_tuning;
    match key {
        TuningKey::Custom => match custom {
            Some(notes) => fit_to_strings(notes, default),
            None => default.to_vec(),
        },
        preset => match preset.preset_notes() {
            Some(notes) if notes.len() == default.len() => notes.to_vec(),
            _ => default.to_vec(),
        },
    }
}

/// Same as [`resolve_tuning`] with string names, for UI and stored data.
///
/// Unknown instrument keys fall back to `guitar-6`, unknown tuning keys to the instrument
/// default, and unrecognised custom note names to the default note of that string.
pub fn resolve_tuning_by_name(instrument: &str, key: &str, custom: Option<&[String]>) -> Vec<PitchClass> {
    let instrument = InstrumentType::from_key(instrument).unwrap_or_default();
    let default = instrument.preset().default_tuning;
    let key = match TuningKey::from_name(key) {
        Some(key) => key,
        None => return default.to_vec(),
    };
    let custom: Option<Vec<PitchClass>> = custom.map(|names| {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                PitchClass::from_name(name).unwrap_or_else(|| default.get(i).copied().unwrap_or_default())
            })
            .collect()
    });
    resolve_tuning(instrument, key, custom.as_deref())
}

/// Truncate, or pad from the instrument default, so the length matches the string count.
fn fit_to_strings(notes: &[PitchClass], default: &[PitchClass]) -> Vec<PitchClass> {
    default
        .iter()
        .enumerate()
        .map(|(i, fallback)| notes.get(i).copied().unwrap_or(*fallback))
        .collect()
}
