// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Scale templates and spelled scales.
//!
//! Provides scale definitions, key-to-scale-degree mapping, transposition
//! within scales, harmonic fields and key relationships.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::chord::{Chord, ChordType};
use super::interval::Interval;
use super::key::Key;
use super::parse::ParseError;
use super::pitch::Pitch;

macro_rules! intervals {
    ($($name:ident),* $(,)?) => {
        &[$(Interval::$name),*]
    };
}

/// Scale types supported by the system
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "ScaleTypeRecord", into = "ScaleTypeRecord")]
pub enum ScaleType {
    // Major scale and modes
    Major,
    Minor,
    Ionian,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Locrian,

    // Other minor scales
    HarmonicMinor,
    MelodicMinor,

    // Pentatonic scales
    PentatonicMajor,
    PentatonicMinor,
    PentatonicNeutral,

    // Blues
    Blues,

    // Symmetric scales
    WholeTone,
    HalfWholeDiminished,
    WholeHalfDiminished,
    Augmented,
    SixToneSymmetrical,
    Chromatic,

    // Other heptatonic colours
    RoumanianMinor,
    SpanishGypsy,
    DoubleHarmonic,
    Enigmatic,
    LydianAugmented,
    LydianMinor,
    LydianDiminished,
    NeapolitanMajor,
    NeapolitanMinor,
    SuperLocrian,
    MajorLocrian,
    Overtone,
    LeadingWholeTone,

    // Other gapped and extended scales
    EightToneSpanish,
    Pelog,
    Prometheus,
    PrometheusNeapolitan,
    NineTone,

    /// Scale from an arbitrary interval set
    Custom {
        intervals: Vec<Interval>,
        description: String,
    },
}

impl ScaleType {
    /// Every named scale type, in reverse-lookup priority order
    pub const ALL: [ScaleType; 39] = [
        ScaleType::Major,
        ScaleType::Minor,
        ScaleType::Ionian,
        ScaleType::Dorian,
        ScaleType::Phrygian,
        ScaleType::Lydian,
        ScaleType::Mixolydian,
        ScaleType::Aeolian,
        ScaleType::Locrian,
        ScaleType::HarmonicMinor,
        ScaleType::MelodicMinor,
        ScaleType::PentatonicMajor,
        ScaleType::PentatonicMinor,
        ScaleType::PentatonicNeutral,
        ScaleType::Blues,
        ScaleType::WholeTone,
        ScaleType::HalfWholeDiminished,
        ScaleType::WholeHalfDiminished,
        ScaleType::Augmented,
        ScaleType::SixToneSymmetrical,
        ScaleType::Chromatic,
        ScaleType::RoumanianMinor,
        ScaleType::SpanishGypsy,
        ScaleType::DoubleHarmonic,
        ScaleType::Enigmatic,
        ScaleType::LydianAugmented,
        ScaleType::LydianMinor,
        ScaleType::LydianDiminished,
        ScaleType::NeapolitanMajor,
        ScaleType::NeapolitanMinor,
        ScaleType::SuperLocrian,
        ScaleType::MajorLocrian,
        ScaleType::Overtone,
        ScaleType::LeadingWholeTone,
        ScaleType::EightToneSpanish,
        ScaleType::Pelog,
        ScaleType::Prometheus,
        ScaleType::PrometheusNeapolitan,
        ScaleType::NineTone,
    ];

    /// Intervals above the root, one per scale degree
    pub fn intervals(&self) -> &[Interval] {
        match self {
            ScaleType::Major | ScaleType::Ionian => intervals![P1, M2, M3, P4, P5, M6, M7],
            ScaleType::Minor | ScaleType::Aeolian => intervals![P1, M2, m3, P4, P5, m6, m7],
            ScaleType::Dorian => intervals![P1, M2, m3, P4, P5, M6, m7],
            ScaleType::Phrygian => intervals![P1, m2, m3, P4, P5, m6, m7],
            ScaleType::Lydian => intervals![P1, M2, M3, A4, P5, M6, M7],
            ScaleType::Mixolydian => intervals![P1, M2, M3, P4, P5, M6, m7],
            ScaleType::Locrian => intervals![P1, m2, m3, P4, d5, m6, m7],

            ScaleType::HarmonicMinor => intervals![P1, M2, m3, P4, P5, m6, M7],
            ScaleType::MelodicMinor => intervals![P1, M2, m3, P4, P5, M6, M7],

            ScaleType::PentatonicMajor => intervals![P1, M2, M3, P5, M6],
            ScaleType::PentatonicMinor => intervals![P1, m3, P4, P5, m7],
            ScaleType::PentatonicNeutral => intervals![P1, M2, P4, P5, m7],

            ScaleType::Blues => intervals![P1, m3, P4, d5, P5, m7],

            ScaleType::WholeTone => intervals![P1, M2, M3, A4, A5, m7],
            ScaleType::HalfWholeDiminished => intervals![P1, m2, m3, M3, A4, P5, M6, m7],
            ScaleType::WholeHalfDiminished => intervals![P1, M2, m3, P4, d5, m6, M6, M7],
            ScaleType::Augmented => intervals![P1, A2, M3, P5, A5, M7],
            ScaleType::SixToneSymmetrical => intervals![P1, m2, M3, P4, A5, M6],
            ScaleType::Chromatic => intervals![P1, m2, M2, m3, M3, P4, A4, P5, m6, M6, m7, M7],

            ScaleType::RoumanianMinor => intervals![P1, M2, m3, A4, P5, M6, m7],
            ScaleType::SpanishGypsy => intervals![P1, m2, M3, P4, P5, m6, m7],
            ScaleType::DoubleHarmonic => intervals![P1, m2, M3, P4, P5, m6, M7],
            ScaleType::Enigmatic => intervals![P1, m2, M3, A4, A5, A6, M7],
            ScaleType::LydianAugmented => intervals![P1, M2, M3, A4, A5, M6, M7],
            ScaleType::LydianMinor => intervals![P1, M2, M3, A4, P5, m6, m7],
            ScaleType::LydianDiminished => intervals![P1, M2, m3, A4, P5, m6, m7],
            ScaleType::NeapolitanMajor => intervals![P1, m2, m3, P4, P5, M6, M7],
            ScaleType::NeapolitanMinor => intervals![P1, m2, m3, P4, P5, m6, M7],
            ScaleType::SuperLocrian => intervals![P1, m2, m3, d4, d5, m6, m7],
            ScaleType::MajorLocrian => intervals![P1, M2, M3, P4, d5, m6, m7],
            ScaleType::Overtone => intervals![P1, M2, M3, A4, P5, M6, m7],
            ScaleType::LeadingWholeTone => intervals![P1, M2, M3, A4, A5, M6, m7],

            ScaleType::EightToneSpanish => intervals![P1, m2, m3, M3, P4, d5, m6, m7],
            ScaleType::Pelog => intervals![P1, m2, m3, A4, m7, M7],
            ScaleType::Prometheus => intervals![P1, M2, M3, A4, M6, m7],
            ScaleType::PrometheusNeapolitan => intervals![P1, m2, M3, A4, M6, m7],
            ScaleType::NineTone => intervals![P1, M2, m3, M3, A4, P5, m6, M6, M7],

            ScaleType::Custom { intervals, .. } => intervals,
        }
    }

    /// Named scale type with exactly these intervals, if any
    pub fn lookup(intervals: &[Interval]) -> Option<ScaleType> {
        lookup_table().get(intervals).cloned()
    }

    /// Named scale type for these intervals, or a custom one carrying the
    /// given description
    pub fn from_intervals(intervals: Vec<Interval>, description: impl Into<String>) -> ScaleType {
        match ScaleType::lookup(&intervals) {
            Some(scale_type) => scale_type,
            None => ScaleType::Custom {
                intervals,
                description: description.into(),
            },
        }
    }

    /// Get a human-readable name for this scale type
    pub fn name(&self) -> &str {
        match self {
            ScaleType::Major => "Major",
            ScaleType::Minor => "Minor",
            ScaleType::Ionian => "Ionian",
            ScaleType::Dorian => "Dorian",
            ScaleType::Phrygian => "Phrygian",
            ScaleType::Lydian => "Lydian",
            ScaleType::Mixolydian => "Mixolydian",
            ScaleType::Aeolian => "Aeolian",
            ScaleType::Locrian => "Locrian",
            ScaleType::HarmonicMinor => "Harmonic Minor",
            ScaleType::MelodicMinor => "Melodic Minor",
            ScaleType::PentatonicMajor => "Pentatonic Major",
            ScaleType::PentatonicMinor => "Pentatonic Minor",
            ScaleType::PentatonicNeutral => "Pentatonic Neutral",
            ScaleType::Blues => "Blues",
            ScaleType::WholeTone => "Whole Tone",
            ScaleType::HalfWholeDiminished => "Half-Whole Diminished",
            ScaleType::WholeHalfDiminished => "Whole-Half Diminished",
            ScaleType::Augmented => "Augmented",
            ScaleType::SixToneSymmetrical => "Six Tone Symmetrical",
            ScaleType::Chromatic => "Chromatic",
            ScaleType::RoumanianMinor => "Roumanian Minor",
            ScaleType::SpanishGypsy => "Spanish Gypsy",
            ScaleType::DoubleHarmonic => "Double Harmonic",
            ScaleType::Enigmatic => "Enigmatic",
            ScaleType::LydianAugmented => "Lydian Augmented",
            ScaleType::LydianMinor => "Lydian Minor",
            ScaleType::LydianDiminished => "Lydian Diminished",
            ScaleType::NeapolitanMajor => "Neapolitan Major",
            ScaleType::NeapolitanMinor => "Neapolitan Minor",
            ScaleType::SuperLocrian => "Super Locrian",
            ScaleType::MajorLocrian => "Major Locrian",
            ScaleType::Overtone => "Overtone",
            ScaleType::LeadingWholeTone => "Leading Whole Tone",
            ScaleType::EightToneSpanish => "Eight Tone Spanish",
            ScaleType::Pelog => "Pelog",
            ScaleType::Prometheus => "Prometheus",
            ScaleType::PrometheusNeapolitan => "Prometheus Neapolitan",
            ScaleType::NineTone => "Nine Tone",
            ScaleType::Custom { description, .. } => description,
        }
    }

    /// Get the parallel minor/major scale type
    pub fn parallel(&self) -> Option<Self> {
        match self {
            ScaleType::Major | ScaleType::Ionian => Some(ScaleType::Minor),
            ScaleType::Minor | ScaleType::Aeolian => Some(ScaleType::Major),
            ScaleType::PentatonicMajor => Some(ScaleType::PentatonicMinor),
            ScaleType::PentatonicMinor => Some(ScaleType::PentatonicMajor),
            _ => None,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, ScaleType::Custom { .. })
    }
}

/// Interval list -> first named scale type producing it
fn lookup_table() -> &'static HashMap<Vec<Interval>, ScaleType> {
    static TABLE: OnceLock<HashMap<Vec<Interval>, ScaleType>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = HashMap::with_capacity(ScaleType::ALL.len());
        for scale_type in ScaleType::ALL {
            table
                .entry(scale_type.intervals().to_vec())
                .or_insert(scale_type);
        }
        debug!(entries = table.len(), "built scale type lookup table");
        table
    })
}

impl FromStr for ScaleType {
    type Err = ParseError;

    /// Parse scale type from a name such as "major", "Harmonic Minor" or
    /// "whole-tone"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase().replace([' ', '-', '_'], "");
        let scale_type = match name.as_str() {
            "major" => ScaleType::Major,
            "minor" | "naturalminor" | "pureminor" => ScaleType::Minor,
            "ionian" => ScaleType::Ionian,
            "dorian" => ScaleType::Dorian,
            "phrygian" => ScaleType::Phrygian,
            "lydian" => ScaleType::Lydian,
            "mixolydian" | "dominant7th" => ScaleType::Mixolydian,
            "aeolian" => ScaleType::Aeolian,
            "locrian" => ScaleType::Locrian,
            "harmonicminor" => ScaleType::HarmonicMinor,
            "melodicminor" => ScaleType::MelodicMinor,
            "pentatonicmajor" | "majorpentatonic" | "diatonic" => ScaleType::PentatonicMajor,
            "pentatonicminor" | "minorpentatonic" | "pentatonic" => ScaleType::PentatonicMinor,
            "pentatonicneutral" => ScaleType::PentatonicNeutral,
            "blues" | "pentatonicblues" => ScaleType::Blues,
            "wholetone" | "whole" | "auxiliaryaugmented" => ScaleType::WholeTone,
            "halfwholediminished" | "halfwhole" | "octatonic" | "auxiliarydimblues" => {
                ScaleType::HalfWholeDiminished
            }
            "wholehalfdiminished" | "wholehalf" | "auxiliarydiminished" => {
                ScaleType::WholeHalfDiminished
            }
            "augmented" => ScaleType::Augmented,
            "sixtonesymmetrical" => ScaleType::SixToneSymmetrical,
            "chromatic" => ScaleType::Chromatic,
            "roumanianminor" => ScaleType::RoumanianMinor,
            "spanishgypsy" => ScaleType::SpanishGypsy,
            "doubleharmonic" => ScaleType::DoubleHarmonic,
            "enigmatic" => ScaleType::Enigmatic,
            "lydianaugmented" => ScaleType::LydianAugmented,
            "lydianminor" => ScaleType::LydianMinor,
            "lydiandiminished" => ScaleType::LydianDiminished,
            "neapolitanmajor" | "neopolitanmajor" => ScaleType::NeapolitanMajor,
            "neapolitanminor" | "neopolitanminor" => ScaleType::NeapolitanMinor,
            "superlocrian" | "altered" | "diminishedwholetone" => ScaleType::SuperLocrian,
            "majorlocrian" => ScaleType::MajorLocrian,
            "overtone" | "lydiandominant" => ScaleType::Overtone,
            "leadingwholetone" => ScaleType::LeadingWholeTone,
            "eighttonespanish" => ScaleType::EightToneSpanish,
            "pelog" => ScaleType::Pelog,
            "prometheus" => ScaleType::Prometheus,
            "prometheusneapolitan" | "prometheusneopolitan" => ScaleType::PrometheusNeapolitan,
            "ninetone" | "ninetonescale" => ScaleType::NineTone,
            _ => return Err(ParseError::UnknownScale(s.to_string())),
        };
        Ok(scale_type)
    }
}

impl PartialEq for ScaleType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                ScaleType::Custom {
                    intervals: a,
                    description: a_description,
                },
                ScaleType::Custom {
                    intervals: b,
                    description: b_description,
                },
            ) => a == b && a_description == b_description,
            (ScaleType::Custom { .. }, _) | (_, ScaleType::Custom { .. }) => false,
            _ => self.intervals() == other.intervals(),
        }
    }
}

impl Hash for ScaleType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.intervals().hash(state);
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Serialized form of a scale type: its interval labels and a name
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScaleTypeRecord {
    intervals: Vec<Interval>,
    #[serde(default)]
    description: String,
}

impl From<ScaleTypeRecord> for ScaleType {
    fn from(record: ScaleTypeRecord) -> Self {
        ScaleType::from_intervals(record.intervals, record.description)
    }
}

impl From<ScaleType> for ScaleTypeRecord {
    fn from(scale_type: ScaleType) -> Self {
        Self {
            intervals: scale_type.intervals().to_vec(),
            description: scale_type.name().to_string(),
        }
    }
}

/// Harmonic-field chord size, counted in stacked thirds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarmonicField {
    #[default]
    Triad,
    Seventh,
    Ninth,
    Eleventh,
    Thirteenth,
}

impl HarmonicField {
    /// Number of chord tones
    pub fn voices(self) -> usize {
        match self {
            HarmonicField::Triad => 3,
            HarmonicField::Seventh => 4,
            HarmonicField::Ninth => 5,
            HarmonicField::Eleventh => 6,
            HarmonicField::Thirteenth => 7,
        }
    }
}

impl FromStr for HarmonicField {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "triad" | "triads" | "3" => Ok(HarmonicField::Triad),
            "seventh" | "sevenths" | "7" | "7th" => Ok(HarmonicField::Seventh),
            "ninth" | "ninths" | "9" | "9th" => Ok(HarmonicField::Ninth),
            "eleventh" | "elevenths" | "11" | "11th" => Ok(HarmonicField::Eleventh),
            "thirteenth" | "thirteenths" | "13" | "13th" => Ok(HarmonicField::Thirteenth),
            _ => Err(ParseError::UnknownHarmonicField(s.to_string())),
        }
    }
}

/// A complete scale with root and type
#[derive(Debug, Clone, PartialEq)]
pub struct Scale {
    root: Key,
    scale_type: ScaleType,
    keys: Vec<Key>,
}

impl Scale {
    /// Create a new scale from root and type
    pub fn new(root: Key, scale_type: ScaleType) -> Self {
        let keys = spell(root, scale_type.intervals(), 0)
            .into_iter()
            .map(|pitch| pitch.key())
            .collect();
        Self {
            root,
            scale_type,
            keys,
        }
    }

    /// Create a scale from root and intervals, named if they match a
    /// known scale type
    pub fn custom(root: Key, intervals: Vec<Interval>) -> Self {
        Scale::new(root, ScaleType::from_intervals(intervals, "Custom"))
    }

    /// Parse a scale from strings (e.g., "C", "major")
    pub fn parse(root_str: &str, scale_str: &str) -> Result<Self, ParseError> {
        let root: Key = root_str.parse()?;
        let scale_type: ScaleType = scale_str.parse()?;
        Ok(Scale::new(root, scale_type))
    }

    /// Get the root key
    pub fn root(&self) -> Key {
        self.root
    }

    /// Get the scale type
    pub fn scale_type(&self) -> &ScaleType {
        &self.scale_type
    }

    /// Get the intervals above the root
    pub fn intervals(&self) -> &[Interval] {
        self.scale_type.intervals()
    }

    /// Spelled keys, one per degree
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Spelled pitches with the root in `octave`
    pub fn pitches(&self, octave: i32) -> Vec<Pitch> {
        spell(self.root, self.intervals(), octave)
    }

    /// Get the number of degrees in this scale
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if this scale is empty (only possible for custom scales)
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Check if a key (enharmonically) belongs to this scale
    pub fn contains(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    /// Get the scale degree (1-based) for a key, if it's in the scale
    pub fn degree_of(&self, key: Key) -> Option<usize> {
        self.keys.iter().position(|&k| k == key).map(|i| i + 1)
    }

    /// Get the key at a given scale degree (1-based)
    pub fn key_at_degree(&self, degree: usize) -> Option<Key> {
        if degree == 0 || degree > self.len() {
            return None;
        }
        Some(self.keys[degree - 1])
    }

    /// Move a pitch by scale degrees (positive = up, negative = down),
    /// spelled as the scale spells it. `None` if the pitch is not in the
    /// scale.
    pub fn transpose_in_scale(&self, pitch: Pitch, degrees: i32) -> Option<Pitch> {
        let index = self.degree_of(pitch.key())? - 1;
        let pitches = self.pitches(0);
        let octave_offset = (pitch.midi() - pitches[index].midi()).div_euclid(12);

        let len = self.len() as i32;
        let position = index as i32 + degrees;
        let target = pitches[position.rem_euclid(len) as usize];
        let octave = target.octave() + octave_offset + position.div_euclid(len);
        Some(target.with_octave(octave))
    }

    /// Chords stacked in thirds on every degree.
    ///
    /// An entry is `None` when the stacked intervals match no known chord
    /// type; the rest of the field is still computed.
    pub fn harmonic_field(&self, size: HarmonicField) -> Vec<Option<Chord>> {
        let pitches = self.pitches(1);
        let len = pitches.len();

        (0..len)
            .map(|degree| {
                let root = pitches[degree];
                let intervals: Vec<Interval> = (0..size.voices())
                    .map(|voice| {
                        let index = degree + 2 * voice;
                        let pitch = pitches[index % len];
                        let pitch = pitch.with_octave(pitch.octave() + (index / len) as i32);
                        pitch - root
                    })
                    .collect();
                ChordType::from_intervals(&intervals).map(|t| Chord::new(t, root.key()))
            })
            .collect()
    }

    /// Get the parallel scale (major <-> minor)
    pub fn parallel(&self) -> Option<Scale> {
        self.scale_type
            .parallel()
            .map(|scale_type| Scale::new(self.root, scale_type))
    }

    /// Get the relative scale (e.g., C major -> A minor)
    pub fn relative(&self) -> Option<Scale> {
        match self.scale_type {
            ScaleType::Major | ScaleType::Ionian => {
                let relative_root = self.root.transposed(Interval::M6); // Down a minor 3rd
                Some(Scale::new(relative_root, ScaleType::Minor))
            }
            ScaleType::Minor | ScaleType::Aeolian => {
                let relative_root = self.root.transposed(Interval::m3);
                Some(Scale::new(relative_root, ScaleType::Major))
            }
            _ => None,
        }
    }
}

/// Spell each interval above `root` in `octave`.
///
/// Seven-note scales take consecutive letters so no letter repeats; other
/// sizes use the letter implied by each interval's degree.
fn spell(root: Key, intervals: &[Interval], octave: i32) -> Vec<Pitch> {
    let root = Pitch::new(root, octave);
    let heptatonic = intervals.len() == 7;
    intervals
        .iter()
        .enumerate()
        .map(|(degree, interval)| {
            let steps = if heptatonic {
                degree as i32
            } else {
                interval.steps()
            };
            root.spell(steps, root.midi() + interval.semitones())
        })
        .collect()
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.root, self.scale_type)
    }
}

/// Custom scale definitions that can be loaded from config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomScaleDefinition {
    /// Name of the scale
    pub name: String,
    /// Intervals above the root
    pub intervals: Vec<Interval>,
}

impl CustomScaleDefinition {
    /// Create a scale from this definition
    pub fn to_scale(&self, root: Key) -> Scale {
        Scale::new(
            root,
            ScaleType::from_intervals(self.intervals.clone(), self.name.clone()),
        )
    }
}

/// Registry for custom scale definitions
#[derive(Debug, Clone, Default)]
pub struct ScaleRegistry {
    custom_scales: HashMap<String, CustomScaleDefinition>,
}

impl ScaleRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom scale
    pub fn register(&mut self, def: CustomScaleDefinition) {
        self.custom_scales.insert(def.name.clone(), def);
    }

    /// Get a scale by name (checks custom first, then built-in)
    pub fn get_scale(&self, root: Key, name: &str) -> Option<Scale> {
        if let Some(def) = self.custom_scales.get(name) {
            return Some(def.to_scale(root));
        }

        name.parse::<ScaleType>()
            .ok()
            .map(|scale_type| Scale::new(root, scale_type))
    }

    /// List all available scale names
    pub fn available_scales(&self) -> Vec<String> {
        let mut names: Vec<String> = self.custom_scales.keys().cloned().collect();
        names.extend(ScaleType::ALL.iter().map(|t| t.name().to_string()));
        names.sort();
        names.dedup();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::accidental::Accidental;
    use crate::music::chord::ChordThird;
    use crate::music::letter::Letter;
    use crate::music::StrictEq;

    fn natural(letter: Letter) -> Key {
        Key::natural(letter)
    }

    fn flat(letter: Letter) -> Key {
        Key::new(letter, Accidental::FLAT)
    }

    fn sharp(letter: Letter) -> Key {
        Key::new(letter, Accidental::SHARP)
    }

    fn romans(scale: &Scale, size: HarmonicField) -> Vec<String> {
        scale
            .harmonic_field(size)
            .iter()
            .flatten()
            .filter_map(|chord| chord.roman_numeral(scale))
            .collect()
    }

    #[test]
    fn test_scale_keys() {
        let c_major = Scale::new(natural(Letter::C), ScaleType::Major);
        assert!(c_major.keys().strict_eq(&[
            natural(Letter::C),
            natural(Letter::D),
            natural(Letter::E),
            natural(Letter::F),
            natural(Letter::G),
            natural(Letter::A),
            natural(Letter::B),
        ]));

        let c_minor = Scale::new(natural(Letter::C), ScaleType::Minor);
        assert!(c_minor.keys().strict_eq(&[
            natural(Letter::C),
            natural(Letter::D),
            flat(Letter::E),
            natural(Letter::F),
            natural(Letter::G),
            flat(Letter::A),
            flat(Letter::B),
        ]));
    }

    #[test]
    fn test_heptatonic_scales_use_every_letter() {
        let roots = [
            natural(Letter::C),
            sharp(Letter::F),
            flat(Letter::D),
            sharp(Letter::G),
        ];
        for scale_type in ScaleType::ALL.iter().filter(|t| t.intervals().len() == 7) {
            for root in roots {
                let scale = Scale::new(root, scale_type.clone());
                let letters: Vec<Letter> = scale.keys().iter().map(|k| k.letter).collect();
                let expected: Vec<Letter> = (0..7).map(|i| root.letter.at(i)).collect();
                assert_eq!(letters, expected, "{}", scale);
            }
        }
    }

    #[test]
    fn test_sharp_key_spelling() {
        let f_sharp_major = Scale::new(sharp(Letter::F), ScaleType::Major);
        assert!(f_sharp_major.keys().strict_eq(&[
            sharp(Letter::F),
            sharp(Letter::G),
            sharp(Letter::A),
            natural(Letter::B),
            sharp(Letter::C),
            sharp(Letter::D),
            sharp(Letter::E),
        ]));

        let c_lydian = Scale::new(natural(Letter::C), ScaleType::Lydian);
        assert!(c_lydian.keys()[3].strict_eq(&sharp(Letter::F)));

        let c_altered = Scale::new(natural(Letter::C), ScaleType::SuperLocrian);
        assert!(c_altered.keys()[3].strict_eq(&flat(Letter::F)));

        let leading = Scale::parse("C", "leading whole tone").unwrap();
        assert_eq!(leading.scale_type(), &ScaleType::LeadingWholeTone);
        assert!(leading.keys().strict_eq(&[
            natural(Letter::C),
            natural(Letter::D),
            natural(Letter::E),
            sharp(Letter::F),
            sharp(Letter::G),
            natural(Letter::A),
            flat(Letter::B),
        ]));
    }

    #[test]
    fn test_non_heptatonic_spelling() {
        let blues = Scale::new(natural(Letter::C), ScaleType::Blues);
        assert!(blues.keys().strict_eq(&[
            natural(Letter::C),
            flat(Letter::E),
            natural(Letter::F),
            flat(Letter::G),
            natural(Letter::G),
            flat(Letter::B),
        ]));

        let whole_tone = Scale::new(natural(Letter::C), ScaleType::WholeTone);
        assert!(whole_tone.keys().strict_eq(&[
            natural(Letter::C),
            natural(Letter::D),
            natural(Letter::E),
            sharp(Letter::F),
            sharp(Letter::G),
            flat(Letter::B),
        ]));
        assert_eq!(Scale::new(natural(Letter::C), ScaleType::Chromatic).len(), 12);
    }

    #[test]
    fn test_scale_pitches_carry_octave() {
        let a_minor = Scale::new(natural(Letter::A), ScaleType::Minor);
        let pitches = a_minor.pitches(3);
        assert!(pitches[0].strict_eq(&Pitch::new(natural(Letter::A), 3)));
        assert!(pitches[2].strict_eq(&Pitch::new(natural(Letter::C), 4)));
        assert!(pitches[6].strict_eq(&Pitch::new(natural(Letter::G), 4)));
    }

    #[test]
    fn test_scale_type_lookup() {
        let intervals = ScaleType::HarmonicMinor.intervals().to_vec();
        assert_eq!(ScaleType::lookup(&intervals), Some(ScaleType::HarmonicMinor));
        assert_eq!(ScaleType::lookup(&[Interval::P1, Interval::m2]), None);

        let custom = ScaleType::from_intervals(vec![Interval::P1, Interval::m2], "Tiny");
        assert!(custom.is_custom());
        assert_eq!(custom.name(), "Tiny");

        // Ionian shares the major intervals; the first template wins
        let ionian = ScaleType::from_intervals(ScaleType::Ionian.intervals().to_vec(), "");
        assert!(matches!(ionian, ScaleType::Major));
        assert_eq!(ScaleType::Ionian, ScaleType::Major);
    }

    #[test]
    fn test_custom_scale_equality() {
        let a = ScaleType::Custom {
            intervals: vec![Interval::P1, Interval::m2],
            description: "a".to_string(),
        };
        let b = ScaleType::Custom {
            intervals: vec![Interval::P1, Interval::m2],
            description: "b".to_string(),
        };
        assert_ne!(a, b);
        assert_eq!(a, a.clone());

        // A custom scale never equals a named one, even with the same intervals
        let major_a = ScaleType::Custom {
            intervals: ScaleType::Major.intervals().to_vec(),
            description: "a".to_string(),
        };
        let major_b = ScaleType::Custom {
            intervals: ScaleType::Major.intervals().to_vec(),
            description: "b".to_string(),
        };
        assert_ne!(ScaleType::Major, major_a);
        assert_ne!(major_b, ScaleType::Major);
        assert_ne!(major_a, major_b);
    }

    #[test]
    fn test_scale_type_from_str() {
        assert_eq!("major".parse::<ScaleType>().unwrap(), ScaleType::Major);
        assert_eq!("Minor".parse::<ScaleType>().unwrap(), ScaleType::Minor);
        assert_eq!("dorian".parse::<ScaleType>().unwrap(), ScaleType::Dorian);
        assert_eq!(
            "harmonic_minor".parse::<ScaleType>().unwrap(),
            ScaleType::HarmonicMinor
        );
        assert_eq!(
            "Whole-Half Diminished".parse::<ScaleType>().unwrap(),
            ScaleType::WholeHalfDiminished
        );
        assert!(matches!(
            "unknown".parse::<ScaleType>(),
            Err(ParseError::UnknownScale(_))
        ));
    }

    #[test]
    fn test_names_parse_back() {
        for scale_type in ScaleType::ALL {
            assert_eq!(scale_type.name().parse::<ScaleType>().unwrap(), scale_type);
        }
    }

    #[test]
    fn test_scale_type_serde() {
        let yaml = serde_yaml::to_string(&ScaleType::Dorian).unwrap();
        assert!(yaml.contains("m3"));
        let parsed: ScaleType = serde_yaml::from_str(&yaml).unwrap();
        assert!(matches!(parsed, ScaleType::Dorian));

        let custom: ScaleType =
            serde_yaml::from_str("intervals: [P1, M3, A4]\ndescription: Odd").unwrap();
        assert_eq!(custom.name(), "Odd");
        assert_eq!(custom.intervals(), &[Interval::P1, Interval::M3, Interval::A4]);
    }

    #[test]
    fn test_harmonic_field_triads() {
        let c_major = Scale::new(natural(Letter::C), ScaleType::Major);
        let triads = c_major.harmonic_field(HarmonicField::Triad);
        let expected = [
            Chord::new(ChordType::major(), natural(Letter::C)),
            Chord::new(ChordType::minor(), natural(Letter::D)),
            Chord::new(ChordType::minor(), natural(Letter::E)),
            Chord::new(ChordType::major(), natural(Letter::F)),
            Chord::new(ChordType::major(), natural(Letter::G)),
            Chord::new(ChordType::minor(), natural(Letter::A)),
            Chord::new(ChordType::diminished(), natural(Letter::B)),
        ];
        assert_eq!(triads.len(), 7);
        for (chord, expected) in triads.iter().zip(expected.iter()) {
            assert_eq!(chord.as_ref(), Some(expected));
        }
    }

    #[test]
    fn test_roman_numerals() {
        let c_major = Scale::new(natural(Letter::C), ScaleType::Major);
        assert_eq!(
            romans(&c_major, HarmonicField::Triad),
            vec!["I", "ii", "iii", "IV", "V", "vi", "vii°"]
        );

        let c_minor = Scale::new(natural(Letter::C), ScaleType::Minor);
        assert_eq!(
            romans(&c_minor, HarmonicField::Triad),
            vec!["i", "ii°", "III", "iv", "v", "VI", "VII"]
        );

        let a_harmonic = Scale::new(natural(Letter::A), ScaleType::HarmonicMinor);
        assert_eq!(
            romans(&a_harmonic, HarmonicField::Triad),
            vec!["i", "ii°", "III+", "iv", "V", "VI", "vii°"]
        );
    }

    #[test]
    fn test_seventh_field() {
        let c_major = Scale::new(natural(Letter::C), ScaleType::Major);
        let sevenths = c_major.harmonic_field(HarmonicField::Seventh);
        let symbols: Vec<String> = sevenths.iter().flatten().map(|c| c.to_string()).collect();
        assert_eq!(
            symbols,
            vec!["Cmaj7", "Dm7", "Em7", "Fmaj7", "G7", "Am7", "Bm7♭5"]
        );
    }

    #[test]
    fn test_extended_fields_resolve() {
        let c_major = Scale::new(natural(Letter::C), ScaleType::Major);
        for size in [
            HarmonicField::Ninth,
            HarmonicField::Eleventh,
            HarmonicField::Thirteenth,
        ] {
            let field = c_major.harmonic_field(size);
            assert_eq!(field.len(), 7);
            assert!(field.iter().all(|chord| chord.is_some()), "{:?}", size);
            assert_eq!(field[0].as_ref().unwrap().len(), size.voices());
        }
    }

    #[test]
    fn test_unmatched_field_entries_are_none() {
        let blues = Scale::new(natural(Letter::C), ScaleType::Blues);
        let field = blues.harmonic_field(HarmonicField::Triad);
        assert_eq!(field.len(), 6);
        // G♭-B♭-E♭ stacks a sixth with no fifth
        assert!(field.iter().any(|chord| chord.is_none()));
        assert!(field.iter().any(|chord| chord.is_some()));
    }

    #[test]
    fn test_scale_contains() {
        let c_major = Scale::new(natural(Letter::C), ScaleType::Major);
        assert!(c_major.contains(natural(Letter::C)));
        assert!(c_major.contains(natural(Letter::G)));
        assert!(!c_major.contains(sharp(Letter::C)));
        assert!(!c_major.contains(sharp(Letter::F)));
        assert!(c_major.contains(Key::new(Letter::E, Accidental::SHARP)));
    }

    #[test]
    fn test_scale_degree() {
        let c_major = Scale::new(natural(Letter::C), ScaleType::Major);
        assert_eq!(c_major.degree_of(natural(Letter::C)), Some(1));
        assert_eq!(c_major.degree_of(natural(Letter::E)), Some(3));
        assert_eq!(c_major.degree_of(natural(Letter::B)), Some(7));
        assert_eq!(c_major.degree_of(sharp(Letter::F)), None);
        assert_eq!(c_major.key_at_degree(5), Some(natural(Letter::G)));
        assert_eq!(c_major.key_at_degree(0), None);
        assert_eq!(c_major.key_at_degree(8), None);
    }

    #[test]
    fn test_transpose_in_scale() {
        let c_major = Scale::new(natural(Letter::C), ScaleType::Major);
        let c4 = Pitch::new(natural(Letter::C), 4);

        let up = c_major.transpose_in_scale(c4, 3).unwrap();
        assert!(up.strict_eq(&Pitch::new(natural(Letter::F), 4)));

        let down = c_major.transpose_in_scale(c4, -1).unwrap();
        assert!(down.strict_eq(&Pitch::new(natural(Letter::B), 3)));

        let octave = c_major.transpose_in_scale(c4, 7).unwrap();
        assert!(octave.strict_eq(&Pitch::new(natural(Letter::C), 5)));

        let outside = Pitch::new(sharp(Letter::C), 4);
        assert_eq!(c_major.transpose_in_scale(outside, 1), None);
    }

    #[test]
    fn test_transpose_in_d_minor() {
        let d_minor = Scale::new(natural(Letter::D), ScaleType::Minor);
        let d4 = Pitch::new(natural(Letter::D), 4);
        let result = d_minor.transpose_in_scale(d4, 5).unwrap();
        assert!(result.strict_eq(&Pitch::new(flat(Letter::B), 4)));

        let a3 = Pitch::new(natural(Letter::A), 3);
        let result = d_minor.transpose_in_scale(a3, 3).unwrap();
        assert!(result.strict_eq(&Pitch::new(natural(Letter::D), 4)));
    }

    #[test]
    fn test_scale_relative() {
        let c_major = Scale::new(natural(Letter::C), ScaleType::Major);
        let relative = c_major.relative().unwrap();
        assert!(relative.root().strict_eq(&natural(Letter::A)));
        assert_eq!(relative.scale_type(), &ScaleType::Minor);

        let e_flat_major = Scale::new(flat(Letter::E), ScaleType::Major);
        assert!(e_flat_major.relative().unwrap().root().strict_eq(&natural(Letter::C)));

        let a_minor = Scale::new(natural(Letter::A), ScaleType::Minor);
        let relative = a_minor.relative().unwrap();
        assert!(relative.root().strict_eq(&natural(Letter::C)));
        assert_eq!(relative.scale_type(), &ScaleType::Major);
    }

    #[test]
    fn test_scale_parallel() {
        let c_major = Scale::new(natural(Letter::C), ScaleType::Major);
        let parallel = c_major.parallel().unwrap();
        assert!(parallel.root().strict_eq(&natural(Letter::C)));
        assert_eq!(parallel.scale_type(), &ScaleType::Minor);
        assert!(Scale::new(natural(Letter::C), ScaleType::Blues).parallel().is_none());
    }

    #[test]
    fn test_scale_parse() {
        let scale = Scale::parse("Eb", "dorian").unwrap();
        assert!(scale.root().strict_eq(&flat(Letter::E)));
        assert_eq!(scale.to_string(), "E♭ Dorian");
        assert!(Scale::parse("H", "major").is_err());
    }

    #[test]
    fn test_custom_scale() {
        let custom = Scale::custom(
            natural(Letter::C),
            vec![Interval::P1, Interval::M2, Interval::m3, Interval::P4],
        );
        assert_eq!(custom.len(), 4);
        assert!(custom.contains(flat(Letter::E)));
        assert!(custom.scale_type().is_custom());
    }

    #[test]
    fn test_scale_registry() {
        let mut registry = ScaleRegistry::new();

        registry.register(CustomScaleDefinition {
            name: "hirajoshi".to_string(),
            intervals: vec![Interval::P1, Interval::M2, Interval::m3, Interval::P5, Interval::m6],
        });

        let custom = registry.get_scale(natural(Letter::A), "hirajoshi").unwrap();
        assert_eq!(custom.len(), 5);
        assert_eq!(custom.scale_type().name(), "hirajoshi");

        let major = registry.get_scale(natural(Letter::C), "major");
        assert!(major.is_some());
        assert!(registry.get_scale(natural(Letter::C), "nope").is_none());

        let names = registry.available_scales();
        assert!(names.contains(&"hirajoshi".to_string()));
        assert!(names.contains(&"Dorian".to_string()));
    }

    #[test]
    fn test_minor_chord_on_minor_degree() {
        let c_minor = Scale::new(natural(Letter::C), ScaleType::Minor);
        let field = c_minor.harmonic_field(HarmonicField::Triad);
        let first = field[0].as_ref().unwrap();
        assert_eq!(first.chord_type().third, ChordThird::Minor);
    }
}
