//! Chord derivation: diatonic and fixed-quality chords, inversion and drop voicings.
//!
//! Everything here works in pitch-class space. An "inversion" or a "drop voicing" only
//! changes the order of the returned list; no note is moved to another register.

use crate::pitch::{IntervalLabel, PitchClass};
use crate::scale::scale_notes;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Roman numerals for scale degrees 0-6.
pub const DEGREE_NAMES: [&str; 7] = ["I", "II", "III", "IV", "V", "VI", "VII"];

/// How the chord's intervals are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChordQuality {
    /// Stack thirds inside the scale.
    #[default]
    Diatonic,
    /// Major triad, major seventh as a tetrad.
    Major,
    /// Minor triad, minor seventh as a tetrad.
    Minor,
    /// Diminished triad, diminished seventh as a tetrad.
    Dim,
    /// Augmented triad, augmented seventh as a tetrad.
    Aug,
    /// Major triad, dominant seventh as a tetrad.
    Dominant,
    /// Diminished triad, half-diminished seventh as a tetrad.
    HalfDim,
}

impl ChordQuality {
    pub const ALL: [ChordQuality; 7] = [
        ChordQuality::Diatonic,
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Dim,
        ChordQuality::Aug,
        ChordQuality::Dominant,
        ChordQuality::HalfDim,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ChordQuality::Diatonic => "DIATONIC",
            ChordQuality::Major => "MAJOR",
            ChordQuality::Minor => "MINOR",
            ChordQuality::Dim => "DIM",
            ChordQuality::Aug => "AUG",
            ChordQuality::Dominant => "DOMINANT",
            ChordQuality::HalfDim => "HALF_DIM",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|q| q.key().eq_ignore_ascii_case(name))
    }

    /// Resolve a quality name, defaulting unknown names to `Major`.
    pub fn resolve(name: &str) -> Self {
        Self::from_name(name).unwrap_or(ChordQuality::Major)
    }

    /// Four-note interval list of a fixed quality. Triads use the first three entries.
    /// `Diatonic` has no fixed list and yields the major one.
    pub fn intervals(self) -> &'static [u8] {
        match self {
            ChordQuality::Major | ChordQuality::Diatonic => &[0, 4, 7, 11],
            ChordQuality::Minor => &[0, 3, 7, 10],
            ChordQuality::Dim => &[0, 3, 6, 9],
            ChordQuality::Aug => &[0, 4, 8, 10],
            ChordQuality::Dominant => &[0, 4, 7, 10],
            ChordQuality::HalfDim => &[0, 3, 6, 10],
        }
    }
}

/// Ordering convention applied to an inverted tetrad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VoicingMode {
    #[default]
    Close,
    Drop2,
    Drop3,
}

impl VoicingMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "CLOSE" => Some(VoicingMode::Close),
            "DROP2" => Some(VoicingMode::Drop2),
            "DROP3" => Some(VoicingMode::Drop3),
            _ => None,
        }
    }
}

/// Everything needed to derive one chord.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordSpec {
    pub root: PitchClass,
    pub scale: String,
    pub degree: usize,
    pub tetrad: bool,
    pub inversion: usize,
    pub quality: ChordQuality,
    pub voicing: VoicingMode,
}

impl ChordSpec {
    /// Root-position triad on `degree` of the scale.
    pub fn triad(root: PitchClass, scale: &str, degree: usize) -> Self {
        Self {
            root,
            scale: scale.to_string(),
            degree,
            tetrad: false,
            inversion: 0,
            quality: ChordQuality::Diatonic,
            voicing: VoicingMode::Close,
        }
    }

    /// Root-position tetrad on `degree` of the scale.
    pub fn tetrad(root: PitchClass, scale: &str, degree: usize) -> Self {
        Self {
            tetrad: true,
            ..Self::triad(root, scale, degree)
        }
    }

    pub fn with_quality(mut self, quality: ChordQuality) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_inversion(mut self, inversion: usize) -> Self {
        self.inversion = inversion;
        self
    }

    pub fn with_voicing(mut self, voicing: VoicingMode) -> Self {
        self.voicing = voicing;
        self
    }

    /// 3 for a triad, 4 for a tetrad.
    pub fn note_count(&self) -> usize {
        if self.tetrad {
            4
        } else {
            3
        }
    }

    /// The scale note the chord is built on, if the scale is known.
    pub fn chord_root(&self) -> Option<PitchClass> {
        let notes = scale_notes(self.root, &self.scale);
        if notes.is_empty() {
            return None;
        }
        Some(notes[self.degree % notes.len()])
    }
}

/// Derive the ordered notes of a chord.
///
/// Steps: resolve the scale (unknown scale gives an empty list), build the close
/// root-position chord, rotate it by the inversion, then reorder by the voicing mode.
pub fn chord_notes(spec: &ChordSpec) -> Vec<PitchClass> {
    let scale = scale_notes(spec.root, &spec.scale);
    if scale.is_empty() {
        return Vec::new();
    }

    let length = spec.note_count();
    let chord: Vec<PitchClass> = match spec.quality {
        // Every other scale note from the degree: stacked thirds inside the scale.
        ChordQuality::Diatonic => (0..length)
            .map(|i| scale[(spec.degree + i * 2) % scale.len()])
            .collect(),
        quality => {
            let chord_root = scale[spec.degree % scale.len()];
            quality
                .intervals()
                .iter()
                .take(length)
                .map(|interval| chord_root.transpose(*interval as i32))
                .collect()
        }
    };

    let inverted = invert(&chord, spec.inversion);
    if spec.tetrad {
        apply_voicing(&inverted, spec.voicing)
    } else {
        inverted
    }
}

/// Rotate left by `inversion` (mod length): the first notes move to the end.
pub fn invert(notes: &[PitchClass], inversion: usize) -> Vec<PitchClass> {
    let mut rotated = notes.to_vec();
    if !rotated.is_empty() {
        rotated.rotate_left(inversion % notes.len());
    }
    rotated
}

/// Reorder a four-note list by voicing mode.
///
/// `Drop2` moves the note at index 2 to the front, `Drop3` the note at index 1.
/// Lists of any other length are returned unchanged.
pub fn apply_voicing(notes: &[PitchClass], voicing: VoicingMode) -> Vec<PitchClass> {
    let mut voiced = notes.to_vec();
    if voiced.len() != 4 {
        return voiced;
    }
    let dropped = match voicing {
        VoicingMode::Close => return voiced,
        VoicingMode::Drop2 => 2,
        VoicingMode::Drop3 => 1,
    };
    let note = voiced.remove(dropped);
    voiced.insert(0, note);
    voiced
}

/// Interval of each chord note relative to the diagram root.
pub fn chord_intervals(spec: &ChordSpec) -> Vec<IntervalLabel> {
    chord_notes(spec)
        .into_iter()
        .map(|note| IntervalLabel::between(spec.root, note))
        .collect()
}

/// Display name like `V — G` for a chord spec, or `None` for an unknown scale.
pub fn chord_name(spec: &ChordSpec) -> Option<String> {
    let chord_root = spec.chord_root()?;
    let numeral = DEGREE_NAMES[spec.degree % DEGREE_NAMES.len()];
    let suffix = quality_suffix(spec);
    Some(format!("{} — {}{}", numeral, chord_root, suffix))
}

/// Chord-symbol suffix derived from the root-position intervals.
fn quality_suffix(spec: &ChordSpec) -> &'static str {
    let root_position = ChordSpec {
        inversion: 0,
        voicing: VoicingMode::Close,
        ..spec.clone()
    };
    let notes = chord_notes(&root_position);
    let Some(first) = notes.first().copied() else {
        return "";
    };
    let semitones: Vec<u8> = notes.iter().map(|n| n.semitones_above(first)).collect();
    match semitones.as_slice() {
        [0, 4, 7] => "",
        [0, 3, 7] => "m",
        [0, 3, 6] => "dim",
        [0, 4, 8] => "aug",
        [0, 4, 7, 11] => "maj7",
        [0, 4, 7, 10] => "7",
        [0, 3, 7, 10] => "m7",
        [0, 3, 7, 11] => "m(maj7)",
        [0, 3, 6, 10] => "m7b5",
        [0, 3, 6, 9] => "dim7",
        [0, 4, 8, 10] => "aug7",
        [0, 4, 8, 11] => "maj7#5",
        _ => "(?)",
    }
}

impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
