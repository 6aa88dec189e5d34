// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord templates and spelled chords.
//!
//! A `ChordType` is a stack of interval layers (third, fifth, optional
//! sixth/seventh, extensions). A `Chord` applies one to a root key and
//! produces spelled keys, octave-correct voicings, inversions and roman
//! numerals relative to a scale.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::accidental::Accidental;
use super::interval::Interval;
use super::key::Key;
use super::notation::Notation;
use super::pitch::Pitch;
use super::scale::Scale;

/// Quality of the chord's third
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordThird {
    Major,
    Minor,
}

impl ChordThird {
    pub fn interval(self) -> Interval {
        match self {
            ChordThird::Major => Interval::M3,
            ChordThird::Minor => Interval::m3,
        }
    }
}

/// Quality of the chord's fifth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordFifth {
    #[default]
    Perfect,
    Diminished,
    Augmented,
}

impl ChordFifth {
    pub fn interval(self) -> Interval {
        match self {
            ChordFifth::Perfect => Interval::P5,
            ChordFifth::Diminished => Interval::d5,
            ChordFifth::Augmented => Interval::A5,
        }
    }
}

/// Seventh layered on top of the triad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordSeventh {
    Major,
    Dominant,
    Diminished,
}

impl ChordSeventh {
    pub fn interval(self) -> Interval {
        match self {
            ChordSeventh::Major => Interval::M7,
            ChordSeventh::Dominant => Interval::m7,
            ChordSeventh::Diminished => Interval::d7,
        }
    }
}

/// Suspension replacing the third
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordSuspended {
    Sus2,
    Sus4,
}

impl ChordSuspended {
    pub fn interval(self) -> Interval {
        match self {
            ChordSuspended::Sus2 => Interval::M2,
            ChordSuspended::Sus4 => Interval::P4,
        }
    }
}

/// Upper extension degree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionDegree {
    Ninth,
    Eleventh,
    Thirteenth,
}

impl ExtensionDegree {
    pub fn number(self) -> i32 {
        match self {
            ExtensionDegree::Ninth => 9,
            ExtensionDegree::Eleventh => 11,
            ExtensionDegree::Thirteenth => 13,
        }
    }

    /// Unaltered interval for this degree
    fn natural_interval(self) -> Interval {
        match self {
            ExtensionDegree::Ninth => Interval::M9,
            ExtensionDegree::Eleventh => Interval::P11,
            ExtensionDegree::Thirteenth => Interval::M13,
        }
    }
}

/// A 9th, 11th or 13th, optionally altered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChordExtension {
    pub degree: ExtensionDegree,
    #[serde(default)]
    pub accidental: Accidental,
}

impl ChordExtension {
    pub fn new(degree: ExtensionDegree) -> Self {
        Self {
            degree,
            accidental: Accidental::Natural,
        }
    }

    pub fn altered(degree: ExtensionDegree, accidental: Accidental) -> Self {
        Self { degree, accidental }
    }

    /// The unaltered interval moved by the accidental's offset
    pub fn interval(&self) -> Interval {
        let natural = self.degree.natural_interval();
        let semitones = natural.semitones() + self.accidental.offset();
        let steps = natural.steps();
        Interval::classify(steps, semitones)
    }

    fn symbol(&self, notation: &Notation) -> String {
        format!(
            "{}{}",
            self.accidental.render(notation),
            self.degree.number()
        )
    }
}

/// Layered description of a chord, independent of its root.
///
/// Two chord types are equal when they produce the same interval stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChordType {
    pub third: ChordThird,
    #[serde(default)]
    pub fifth: ChordFifth,
    #[serde(default)]
    pub suspended: Option<ChordSuspended>,
    #[serde(default)]
    pub sixth: bool,
    #[serde(default)]
    pub seventh: Option<ChordSeventh>,
    #[serde(default)]
    pub extensions: Vec<ChordExtension>,
}

impl ChordType {
    /// Triad with the given third and a perfect fifth
    pub fn new(third: ChordThird) -> Self {
        Self {
            third,
            fifth: ChordFifth::Perfect,
            suspended: None,
            sixth: false,
            seventh: None,
            extensions: Vec::new(),
        }
    }

    pub fn major() -> Self {
        Self::new(ChordThird::Major)
    }

    pub fn minor() -> Self {
        Self::new(ChordThird::Minor)
    }

    pub fn diminished() -> Self {
        Self::minor().with_fifth(ChordFifth::Diminished)
    }

    pub fn augmented() -> Self {
        Self::major().with_fifth(ChordFifth::Augmented)
    }

    pub fn dominant_seventh() -> Self {
        Self::major().with_seventh(ChordSeventh::Dominant)
    }

    pub fn with_fifth(mut self, fifth: ChordFifth) -> Self {
        self.fifth = fifth;
        self
    }

    pub fn with_suspended(mut self, suspended: ChordSuspended) -> Self {
        self.suspended = Some(suspended);
        self
    }

    pub fn with_sixth(mut self) -> Self {
        self.sixth = true;
        self
    }

    pub fn with_seventh(mut self, seventh: ChordSeventh) -> Self {
        self.seventh = Some(seventh);
        self
    }

    pub fn with_extension(mut self, extension: ChordExtension) -> Self {
        self.extensions.push(extension);
        self
    }

    /// Extensions in ascending order. With a seventh present, a 13th
    /// implies the 9th and 11th and an 11th implies the 9th.
    fn voiced_extensions(&self) -> Vec<ChordExtension> {
        let mut extensions = self.extensions.clone();
        extensions.sort_by_key(|e| e.degree);
        extensions.dedup_by_key(|e| e.degree);

        if self.seventh.is_some() {
            if let Some(highest) = extensions.last().map(|e| e.degree) {
                let implied: &[ExtensionDegree] = match highest {
                    ExtensionDegree::Ninth => &[],
                    ExtensionDegree::Eleventh => &[ExtensionDegree::Ninth],
                    ExtensionDegree::Thirteenth => {
                        &[ExtensionDegree::Ninth, ExtensionDegree::Eleventh]
                    }
                };
                for degree in implied {
                    if !extensions.iter().any(|e| e.degree == *degree) {
                        extensions.push(ChordExtension::new(*degree));
                    }
                }
                extensions.sort_by_key(|e| e.degree);
            }
        }

        extensions
    }

    /// Intervals above the root, starting with the unison
    pub fn intervals(&self) -> Vec<Interval> {
        let mut intervals = vec![Interval::P1];
        match self.suspended {
            Some(suspended) => intervals.push(suspended.interval()),
            None => intervals.push(self.third.interval()),
        }
        intervals.push(self.fifth.interval());
        if self.sixth {
            intervals.push(Interval::M6);
        }
        if let Some(seventh) = self.seventh {
            intervals.push(seventh.interval());
        }
        intervals.extend(self.voiced_extensions().iter().map(|e| e.interval()));
        intervals
    }

    /// Number of chord tones
    pub fn len(&self) -> usize {
        self.intervals().len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals().is_empty()
    }

    /// Known chord type whose interval stack is exactly `intervals`
    pub fn from_intervals(intervals: &[Interval]) -> Option<ChordType> {
        lookup_table().get(intervals).cloned()
    }

    /// Every template the reverse lookup knows, in priority order
    pub fn all() -> Vec<ChordType> {
        let thirds = [ChordThird::Major, ChordThird::Minor];
        let suspensions = [None, Some(ChordSuspended::Sus2), Some(ChordSuspended::Sus4)];
        let fifths = [ChordFifth::Perfect, ChordFifth::Diminished, ChordFifth::Augmented];
        let sevenths = [
            None,
            Some(ChordSeventh::Major),
            Some(ChordSeventh::Dominant),
            Some(ChordSeventh::Diminished),
        ];
        let extension_sets = extension_sets();

        let mut all = Vec::new();
        for third in thirds {
            for suspended in suspensions {
                for fifth in fifths {
                    for sixth in [false, true] {
                        for seventh in sevenths {
                            for extensions in &extension_sets {
                                all.push(ChordType {
                                    third,
                                    fifth,
                                    suspended,
                                    sixth,
                                    seventh,
                                    extensions: extensions.clone(),
                                });
                            }
                        }
                    }
                }
            }
        }
        all
    }

    fn is_diminished_triad(&self) -> bool {
        self.suspended.is_none()
            && self.third == ChordThird::Minor
            && self.fifth == ChordFifth::Diminished
    }

    fn is_augmented_triad(&self) -> bool {
        self.suspended.is_none()
            && self.third == ChordThird::Major
            && self.fifth == ChordFifth::Augmented
    }

    /// Chord symbol suffix such as `"m7"`, `"maj9"`, `"dim"` or `"7sus4"`
    pub fn symbol(&self, notation: &Notation) -> String {
        let extensions = self.voiced_extensions();
        let highest = extensions.last().map(|e| e.degree.number());
        let altered: Vec<&ChordExtension> =
            extensions.iter().filter(|e| !e.accidental.is_natural()).collect();

        let mut symbol = String::new();
        let half_diminished =
            self.is_diminished_triad() && self.seventh == Some(ChordSeventh::Dominant);

        // Quality prefix
        if self.is_diminished_triad() && !half_diminished {
            symbol.push_str("dim");
        } else if self.is_augmented_triad() {
            symbol.push_str("aug");
        } else if self.suspended.is_none() && self.third == ChordThird::Minor {
            symbol.push('m');
        }

        if self.sixth {
            symbol.push('6');
        }

        // Seventh, replaced by the highest natural extension when stacked
        let size = match highest {
            Some(n) if extensions.iter().all(|e| e.accidental.is_natural()) => n,
            _ => 7,
        };
        match self.seventh {
            Some(ChordSeventh::Major) => symbol.push_str(&format!("maj{}", size)),
            Some(ChordSeventh::Dominant) => symbol.push_str(&size.to_string()),
            Some(ChordSeventh::Diminished) => symbol.push_str(&size.to_string()),
            None => {}
        }

        if half_diminished {
            symbol.push_str(&format!("{}5", notation.flat()));
        } else if self.suspended.is_none() {
            match (self.third, self.fifth) {
                (ChordThird::Major, ChordFifth::Diminished) => {
                    symbol.push_str(&format!("({}5)", notation.flat()))
                }
                (ChordThird::Minor, ChordFifth::Augmented) => {
                    symbol.push_str(&format!("({}5)", notation.sharp()))
                }
                _ => {}
            }
        }

        if let Some(suspended) = self.suspended {
            symbol.push_str(match suspended {
                ChordSuspended::Sus2 => "sus2",
                ChordSuspended::Sus4 => "sus4",
            });
        }

        if self.seventh.is_none() {
            for extension in &extensions {
                symbol.push_str(&format!("add{}", extension.symbol(notation)));
            }
        } else if !altered.is_empty() {
            let list: Vec<String> = altered.iter().map(|e| e.symbol(notation)).collect();
            symbol.push_str(&format!("({})", list.join(",")));
        }

        symbol
    }
}

/// Extension combinations, at most one alteration per degree
fn extension_sets() -> Vec<Vec<ChordExtension>> {
    let ninths = [
        None,
        Some(Accidental::Natural),
        Some(Accidental::FLAT),
        Some(Accidental::SHARP),
    ];
    let elevenths = [None, Some(Accidental::Natural), Some(Accidental::SHARP)];
    let thirteenths = [None, Some(Accidental::Natural), Some(Accidental::FLAT)];

    let mut sets = Vec::new();
    for ninth in ninths {
        for eleventh in elevenths {
            for thirteenth in thirteenths {
                let set: Vec<ChordExtension> = [
                    (ExtensionDegree::Ninth, ninth),
                    (ExtensionDegree::Eleventh, eleventh),
                    (ExtensionDegree::Thirteenth, thirteenth),
                ]
                .into_iter()
                .filter_map(|(degree, accidental)| {
                    accidental.map(|a| ChordExtension::altered(degree, a))
                })
                .collect();
                sets.push(set);
            }
        }
    }
    sets
}

/// Interval stack -> first template producing it
fn lookup_table() -> &'static HashMap<Vec<Interval>, ChordType> {
    static TABLE: OnceLock<HashMap<Vec<Interval>, ChordType>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let templates = ChordType::all();
        let mut table = HashMap::with_capacity(templates.len());
        for template in templates {
            table.entry(template.intervals()).or_insert(template);
        }
        debug!(entries = table.len(), "built chord type lookup table");
        table
    })
}

impl PartialEq for ChordType {
    fn eq(&self, other: &Self) -> bool {
        self.intervals() == other.intervals()
    }
}

impl Eq for ChordType {}

impl Hash for ChordType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.intervals().hash(state);
    }
}

impl fmt::Display for ChordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol(&Notation::default()))
    }
}

const ROMAN_NUMERALS: [&str; 12] = [
    "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII",
];

/// A chord type applied to a root key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "ChordRecord")]
pub struct Chord {
    chord_type: ChordType,
    root: Key,
    inversion: usize,
}

/// Serialized chord; the inversion is wrapped on the way in
#[derive(Deserialize)]
struct ChordRecord {
    chord_type: ChordType,
    root: Key,
    #[serde(default)]
    inversion: usize,
}

impl From<ChordRecord> for Chord {
    fn from(record: ChordRecord) -> Self {
        Chord::new(record.chord_type, record.root).with_inversion(record.inversion)
    }
}

impl Chord {
    /// Root-position chord
    pub fn new(chord_type: ChordType, root: Key) -> Self {
        Self {
            chord_type,
            root,
            inversion: 0,
        }
    }

    /// Same chord with the given inversion (wrapped to the voice count)
    pub fn with_inversion(mut self, inversion: usize) -> Self {
        self.inversion = inversion % self.chord_type.len().max(1);
        self
    }

    pub fn chord_type(&self) -> &ChordType {
        &self.chord_type
    }

    pub fn root(&self) -> Key {
        self.root
    }

    pub fn inversion(&self) -> usize {
        self.inversion
    }

    /// Number of chord tones
    pub fn len(&self) -> usize {
        self.chord_type.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chord_type.is_empty()
    }

    /// Spelled chord tones, lowest voice first
    pub fn keys(&self) -> Vec<Key> {
        let mut keys: Vec<Key> = self
            .chord_type
            .intervals()
            .into_iter()
            .map(|interval| self.root.transposed(interval))
            .collect();
        keys.rotate_left(self.inversion);
        keys
    }

    /// Lowest sounding key
    pub fn bass(&self) -> Key {
        self.keys().first().copied().unwrap_or(self.root)
    }

    /// Voicing with the root position built from `octave`.
    ///
    /// Extensions beyond an octave land an octave (or more) higher. Each
    /// inversion step moves the lowest tone above the current top tone.
    pub fn pitches(&self, octave: i32) -> Vec<Pitch> {
        let root = Pitch::new(self.root, octave);
        let mut pitches: Vec<Pitch> = self
            .chord_type
            .intervals()
            .into_iter()
            .map(|interval| root + interval)
            .collect();

        for _ in 0..self.inversion {
            let lowest = pitches.remove(0);
            let top = pitches.last().copied().unwrap_or(lowest);
            let mut raised = lowest.with_octave(lowest.octave() + 1);
            while raised <= top {
                raised = raised.with_octave(raised.octave() + 1);
            }
            pitches.push(raised);
        }
        pitches
    }

    /// Root position followed by every inversion
    pub fn inversions(&self) -> Vec<Chord> {
        (0..self.len())
            .map(|inversion| self.clone().with_inversion(inversion))
            .collect()
    }

    /// Roman numeral of this chord within `scale`, such as `"ii"` or `"vii°"`.
    ///
    /// Returns `None` when the root is not a scale member.
    pub fn roman_numeral(&self, scale: &Scale) -> Option<String> {
        let degree = scale.degree_of(self.root)?;
        let numeral = ROMAN_NUMERALS.get(degree - 1)?;

        let mut roman = if self.chord_type.suspended.is_none()
            && self.chord_type.third == ChordThird::Minor
        {
            numeral.to_lowercase()
        } else {
            numeral.to_string()
        };

        if self.chord_type.is_diminished_triad() {
            roman.push('°');
        } else if self.chord_type.is_augmented_triad() {
            roman.push('+');
        }
        Some(roman)
    }

    /// Chord symbol such as `"E♭m7"` or `"C7/E"`
    pub fn render(&self, notation: &Notation) -> String {
        let mut symbol = format!(
            "{}{}",
            self.root.render(notation),
            self.chord_type.symbol(notation)
        );
        if self.inversion > 0 {
            symbol.push('/');
            symbol.push_str(&self.bass().render(notation));
        }
        symbol
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&Notation::default()))
    }
}
