// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Interval catalogue and classification.
//!
//! An interval carries both a generic size (the degree: third, fifth, ...)
//! and an exact semitone distance. The degree decides which letter a
//! transposition lands on; the semitones decide the accidental.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::parse::ParseError;

/// Interval quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    Perfect,
    Major,
    Minor,
    Diminished,
    Augmented,
}

impl Quality {
    /// Abbreviation used in interval labels
    pub fn symbol(self) -> &'static str {
        match self {
            Quality::Perfect => "P",
            Quality::Major => "M",
            Quality::Minor => "m",
            Quality::Diminished => "d",
            Quality::Augmented => "A",
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            'P' => Some(Quality::Perfect),
            'M' => Some(Quality::Major),
            'm' => Some(Quality::Minor),
            'd' => Some(Quality::Diminished),
            'A' => Some(Quality::Augmented),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Quality::Perfect => "Perfect",
            Quality::Major => "Major",
            Quality::Minor => "Minor",
            Quality::Diminished => "Diminished",
            Quality::Augmented => "Augmented",
        }
    }
}

/// Semitones of the major or perfect interval for each simple step count
const NATURAL_SEMITONES: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Largest degree an interval may have (a thousand octaves)
pub const MAX_DEGREE: i32 = 7 * 1000 + 1;

/// Unisons, fourths and fifths are perfect; the rest are major/minor
fn is_perfect_family(simple_steps: i32) -> bool {
    matches!(simple_steps, 0 | 3 | 4)
}

/// A generic size with an exact semitone distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Interval {
    quality: Quality,
    degree: i32,
    semitones: i32,
}

macro_rules! interval {
    ($quality:ident, $degree:expr, $semitones:expr) => {
        Interval {
            quality: Quality::$quality,
            degree: $degree,
            semitones: $semitones,
        }
    };
}

#[allow(non_upper_case_globals)]
impl Interval {
    pub const P1: Interval = interval!(Perfect, 1, 0);
    pub const A1: Interval = interval!(Augmented, 1, 1);
    pub const d2: Interval = interval!(Diminished, 2, 0);
    pub const m2: Interval = interval!(Minor, 2, 1);
    pub const M2: Interval = interval!(Major, 2, 2);
    pub const A2: Interval = interval!(Augmented, 2, 3);
    pub const d3: Interval = interval!(Diminished, 3, 2);
    pub const m3: Interval = interval!(Minor, 3, 3);
    pub const M3: Interval = interval!(Major, 3, 4);
    pub const A3: Interval = interval!(Augmented, 3, 5);
    pub const d4: Interval = interval!(Diminished, 4, 4);
    pub const P4: Interval = interval!(Perfect, 4, 5);
    pub const A4: Interval = interval!(Augmented, 4, 6);
    pub const d5: Interval = interval!(Diminished, 5, 6);
    pub const P5: Interval = interval!(Perfect, 5, 7);
    pub const A5: Interval = interval!(Augmented, 5, 8);
    pub const d6: Interval = interval!(Diminished, 6, 7);
    pub const m6: Interval = interval!(Minor, 6, 8);
    pub const M6: Interval = interval!(Major, 6, 9);
    pub const A6: Interval = interval!(Augmented, 6, 10);
    pub const d7: Interval = interval!(Diminished, 7, 9);
    pub const m7: Interval = interval!(Minor, 7, 10);
    pub const M7: Interval = interval!(Major, 7, 11);
    pub const A7: Interval = interval!(Augmented, 7, 12);
    pub const d8: Interval = interval!(Diminished, 8, 11);
    pub const P8: Interval = interval!(Perfect, 8, 12);
    pub const m9: Interval = interval!(Minor, 9, 13);
    pub const M9: Interval = interval!(Major, 9, 14);
    pub const A9: Interval = interval!(Augmented, 9, 15);
    pub const m10: Interval = interval!(Minor, 10, 15);
    pub const M10: Interval = interval!(Major, 10, 16);
    pub const d11: Interval = interval!(Diminished, 11, 16);
    pub const P11: Interval = interval!(Perfect, 11, 17);
    pub const A11: Interval = interval!(Augmented, 11, 18);
    pub const d12: Interval = interval!(Diminished, 12, 18);
    pub const P12: Interval = interval!(Perfect, 12, 19);
    pub const A12: Interval = interval!(Augmented, 12, 20);
    pub const m13: Interval = interval!(Minor, 13, 20);
    pub const M13: Interval = interval!(Major, 13, 21);
    pub const A13: Interval = interval!(Augmented, 13, 22);
    pub const m14: Interval = interval!(Minor, 14, 22);
    pub const M14: Interval = interval!(Major, 14, 23);
    pub const P15: Interval = interval!(Perfect, 15, 24);

    /// Named intervals, ordered by semitones then degree
    pub const ALL: [Interval; 43] = [
        Interval::P1,
        Interval::d2,
        Interval::A1,
        Interval::m2,
        Interval::M2,
        Interval::d3,
        Interval::A2,
        Interval::m3,
        Interval::M3,
        Interval::d4,
        Interval::A3,
        Interval::P4,
        Interval::A4,
        Interval::d5,
        Interval::P5,
        Interval::d6,
        Interval::A5,
        Interval::m6,
        Interval::M6,
        Interval::d7,
        Interval::A6,
        Interval::m7,
        Interval::M7,
        Interval::d8,
        Interval::A7,
        Interval::P8,
        Interval::m9,
        Interval::M9,
        Interval::A9,
        Interval::m10,
        Interval::M10,
        Interval::d11,
        Interval::P11,
        Interval::A11,
        Interval::d12,
        Interval::P12,
        Interval::A12,
        Interval::m13,
        Interval::M13,
        Interval::A13,
        Interval::m14,
        Interval::M14,
        Interval::P15,
    ];

    /// Labels used when a bare semitone distance has to be named
    const DEFAULTS: [Interval; 12] = [
        Interval::P1,
        Interval::m2,
        Interval::M2,
        Interval::m3,
        Interval::M3,
        Interval::P4,
        Interval::d5,
        Interval::P5,
        Interval::m6,
        Interval::M6,
        Interval::m7,
        Interval::M7,
    ];

    /// Build an interval from a quality and a 1-based degree.
    ///
    /// Returns `None` for combinations that do not exist (a major fifth,
    /// a perfect third, a diminished unison) and for degrees above
    /// [`MAX_DEGREE`].
    pub fn new(quality: Quality, degree: i32) -> Option<Interval> {
        if !(1..=MAX_DEGREE).contains(&degree) {
            return None;
        }
        let steps = degree - 1;
        let simple = steps % 7;
        let natural = NATURAL_SEMITONES[simple as usize] + 12 * (steps / 7);

        let adjust = if is_perfect_family(simple) {
            match quality {
                Quality::Perfect => 0,
                Quality::Diminished => -1,
                Quality::Augmented => 1,
                Quality::Major | Quality::Minor => return None,
            }
        } else {
            match quality {
                Quality::Major => 0,
                Quality::Minor => -1,
                Quality::Diminished => -2,
                Quality::Augmented => 1,
                Quality::Perfect => return None,
            }
        };

        let semitones = natural + adjust;
        if semitones < 0 {
            return None;
        }
        Some(Interval {
            quality,
            degree,
            semitones,
        })
    }

    /// Name a spelled distance: `steps` letters and `semitones` semitones.
    ///
    /// Falls back to [`Interval::from_semitones`] when the spelling does not
    /// produce a labelled quality (negative or oversized steps, doubly
    /// altered sizes).
    pub fn classify(steps: i32, semitones: i32) -> Interval {
        if steps < 0 || steps >= MAX_DEGREE || semitones < 0 {
            return Interval::from_semitones(semitones.abs());
        }
        let simple = steps % 7;
        let natural = NATURAL_SEMITONES[simple as usize] + 12 * (steps / 7);
        let deviation = semitones - natural;

        let quality = if is_perfect_family(simple) {
            match deviation {
                -1 => Some(Quality::Diminished),
                0 => Some(Quality::Perfect),
                1 => Some(Quality::Augmented),
                _ => None,
            }
        } else {
            match deviation {
                -2 => Some(Quality::Diminished),
                -1 => Some(Quality::Minor),
                0 => Some(Quality::Major),
                1 => Some(Quality::Augmented),
                _ => None,
            }
        };

        match quality {
            Some(quality) => Interval {
                quality,
                degree: steps + 1,
                semitones,
            },
            None => Interval::from_semitones(semitones),
        }
    }

    /// Default label for a plain semitone distance, octaves carried
    pub fn from_semitones(semitones: i32) -> Interval {
        let semitones = semitones.abs();
        let octaves = semitones / 12;
        let base = Interval::DEFAULTS[(semitones % 12) as usize];
        Interval {
            quality: base.quality,
            degree: base.degree + 7 * octaves,
            semitones,
        }
    }

    /// Parse a label such as `"m3"`, `"P5"` or `"A11"`
    pub fn from_label(label: &str) -> Option<Interval> {
        let mut chars = label.trim().chars();
        let quality = Quality::from_symbol(chars.next()?)?;
        let degree: i32 = chars.as_str().parse().ok()?;
        Interval::new(quality, degree)
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    /// Generic size, 1-based (a third is 3)
    pub fn degree(&self) -> i32 {
        self.degree
    }

    pub fn semitones(&self) -> i32 {
        self.semitones
    }

    /// Number of letters moved (a third moves two)
    pub fn steps(&self) -> i32 {
        self.degree - 1
    }

    /// Larger than an octave
    pub fn is_compound(&self) -> bool {
        self.degree > 8
    }

    /// The interval reduced to within an octave (an octave stays an octave)
    pub fn simple(&self) -> Interval {
        if !self.is_compound() {
            return *self;
        }
        let octaves = (self.degree - 2) / 7;
        Interval {
            quality: self.quality,
            degree: self.degree - 7 * octaves,
            semitones: self.semitones - 12 * octaves,
        }
    }

    /// Short label such as `"M3"`
    pub fn label(&self) -> String {
        format!("{}{}", self.quality.symbol(), self.degree)
    }

    /// Long name such as `"Major Third"`
    pub fn name(&self) -> String {
        let size = match self.degree {
            1 => "Unison".to_string(),
            2 => "Second".to_string(),
            3 => "Third".to_string(),
            4 => "Fourth".to_string(),
            5 => "Fifth".to_string(),
            6 => "Sixth".to_string(),
            7 => "Seventh".to_string(),
            8 => "Octave".to_string(),
            9 => "Ninth".to_string(),
            10 => "Tenth".to_string(),
            11 => "Eleventh".to_string(),
            12 => "Twelfth".to_string(),
            13 => "Thirteenth".to_string(),
            14 => "Fourteenth".to_string(),
            15 => "Double Octave".to_string(),
            n => format!("{}th", n),
        };
        format!("{} {}", self.quality.name(), size)
    }
}

impl PartialOrd for Interval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Interval {
    fn cmp(&self, other: &Self) -> Ordering {
        self.semitones
            .cmp(&other.semitones)
            .then(self.degree.cmp(&other.degree))
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.quality.symbol(), self.degree)
    }
}

impl TryFrom<String> for Interval {
    type Error = ParseError;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        Interval::from_label(&label).ok_or(ParseError::UnknownInterval(label))
    }
}

impl From<Interval> for String {
    fn from(interval: Interval) -> Self {
        interval.label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_is_consistent() {
        for interval in Interval::ALL {
            assert_eq!(
                Interval::new(interval.quality(), interval.degree()),
                Some(interval),
                "{}",
                interval
            );
        }
    }

    #[test]
    fn test_catalogue_is_sorted() {
        for pair in Interval::ALL.windows(2) {
            assert!(pair[0] < pair[1], "{} >= {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_new_rejects_invalid() {
        assert_eq!(Interval::new(Quality::Major, 5), None);
        assert_eq!(Interval::new(Quality::Perfect, 3), None);
        assert_eq!(Interval::new(Quality::Diminished, 1), None);
        assert_eq!(Interval::new(Quality::Major, 0), None);
    }

    #[test]
    fn test_new_compound() {
        let m17 = Interval::new(Quality::Minor, 17).unwrap();
        assert_eq!(m17.semitones(), 27);
        assert_eq!(m17.simple(), Interval::m3);
        assert_eq!(Interval::M13.simple(), Interval::M6);
        assert_eq!(Interval::P8.simple(), Interval::P8);
    }

    #[test]
    fn test_classify() {
        assert_eq!(Interval::classify(2, 3), Interval::m3);
        assert_eq!(Interval::classify(2, 4), Interval::M3);
        assert_eq!(Interval::classify(1, 3), Interval::A2);
        assert_eq!(Interval::classify(4, 6), Interval::d5);
        assert_eq!(Interval::classify(3, 6), Interval::A4);
        assert_eq!(Interval::classify(6, 9), Interval::d7);
        assert_eq!(Interval::classify(8, 14), Interval::M9);
        assert_eq!(Interval::classify(12, 20), Interval::m13);
    }

    #[test]
    fn test_classify_falls_back_to_semitones() {
        // Triply augmented second
        assert_eq!(Interval::classify(1, 5), Interval::P4);
        assert_eq!(Interval::classify(-1, 1), Interval::m2);
    }

    #[test]
    fn test_from_semitones() {
        assert_eq!(Interval::from_semitones(0), Interval::P1);
        assert_eq!(Interval::from_semitones(6), Interval::d5);
        assert_eq!(Interval::from_semitones(12), Interval::P8);
        assert_eq!(Interval::from_semitones(14), Interval::M9);
        assert_eq!(Interval::from_semitones(24), Interval::P15);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Interval::m3.label(), "m3");
        assert_eq!(Interval::A11.to_string(), "A11");
        assert_eq!(Interval::from_label("P5"), Some(Interval::P5));
        assert_eq!(Interval::from_label("M13"), Some(Interval::M13));
        assert_eq!(Interval::from_label("M5"), None);
        assert_eq!(Interval::from_label("x3"), None);
        assert_eq!(Interval::from_label(""), None);
        assert_eq!(Interval::from_label("M2000000000"), None);
        assert!("M2000000000".parse::<Interval>().is_err());
        assert!(Interval::from_label(&format!("P{}", MAX_DEGREE)).is_some());
    }

    #[test]
    fn test_classify_large_steps() {
        let interval = Interval::classify(i32::MAX - 1, 12);
        assert_eq!(interval, Interval::P8);
        assert_eq!(Interval::classify(7, 12), Interval::P8);
    }

    #[test]
    fn test_names() {
        assert_eq!(Interval::M3.name(), "Major Third");
        assert_eq!(Interval::P1.name(), "Perfect Unison");
        assert_eq!(Interval::P15.name(), "Perfect Double Octave");
        assert_eq!(Interval::new(Quality::Minor, 17).unwrap().name(), "Minor 17th");
    }

    #[test]
    fn test_serde_as_label() {
        let yaml = serde_yaml::to_string(&vec![Interval::P1, Interval::m3]).unwrap();
        let parsed: Vec<Interval> = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, vec![Interval::P1, Interval::m3]);
        assert!(serde_yaml::from_str::<Interval>("Q3").is_err());
        assert!(serde_yaml::from_str::<Vec<Interval>>("[P1, M2000000000]").is_err());
    }
}
