// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Accidentals and their algebra.
//!
//! An accidental is a signed semitone offset. All arithmetic goes through
//! the integer offset and rebuilds the canonical variant, so `♯ + ♭` is
//! natural and `♭ * 2` is a double flat.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use super::notation::Notation;
use super::StrictEq;

/// Semitone alteration applied to a letter
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum Accidental {
    /// No alteration
    #[default]
    Natural,
    /// Lowers by the given number of semitones
    Flats(u32),
    /// Raises by the given number of semitones
    Sharps(u32),
}

impl Accidental {
    pub const FLAT: Accidental = Accidental::Flats(1);
    pub const SHARP: Accidental = Accidental::Sharps(1);
    pub const DOUBLE_FLAT: Accidental = Accidental::Flats(2);
    pub const DOUBLE_SHARP: Accidental = Accidental::Sharps(2);

    /// Signed semitone offset: 0 for natural, negative for flats
    pub fn offset(self) -> i32 {
        match self {
            Accidental::Natural => 0,
            Accidental::Flats(amount) => -(amount as i32),
            Accidental::Sharps(amount) => amount as i32,
        }
    }

    /// Canonical accidental for a signed semitone offset
    pub fn from_offset(offset: i32) -> Self {
        match offset.cmp(&0) {
            Ordering::Equal => Accidental::Natural,
            Ordering::Greater => Accidental::Sharps(offset.unsigned_abs()),
            Ordering::Less => Accidental::Flats(offset.unsigned_abs()),
        }
    }

    pub fn is_natural(self) -> bool {
        self.offset() == 0
    }

    /// Render with the given notation; natural renders as an empty string
    pub fn render(self, notation: &Notation) -> String {
        let (amount, single, double) = match self {
            Accidental::Natural => return String::new(),
            Accidental::Flats(amount) => (amount, notation.flat(), notation.double_flat()),
            Accidental::Sharps(amount) => (amount, notation.sharp(), notation.double_sharp()),
        };

        match amount {
            2 if notation.double_accidentals => double.to_string(),
            _ => single.repeat(amount as usize),
        }
    }

    /// Like `render`, but a natural shows its own glyph
    pub fn render_explicit(self, notation: &Notation) -> String {
        if self.is_natural() {
            return notation.natural().to_string();
        }
        self.render(notation)
    }
}

impl StrictEq for Accidental {
    fn strict_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Accidental::Natural, Accidental::Natural) => true,
            (Accidental::Flats(a), Accidental::Flats(b)) => a == b,
            (Accidental::Sharps(a), Accidental::Sharps(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialEq for Accidental {
    fn eq(&self, other: &Self) -> bool {
        self.offset() == other.offset()
    }
}

impl Eq for Accidental {}

impl Hash for Accidental {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.offset().hash(state);
    }
}

impl PartialOrd for Accidental {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Accidental {
    fn cmp(&self, other: &Self) -> Ordering {
        self.offset().cmp(&other.offset())
    }
}

impl From<i32> for Accidental {
    fn from(offset: i32) -> Self {
        Accidental::from_offset(offset)
    }
}

impl From<Accidental> for i32 {
    fn from(accidental: Accidental) -> Self {
        accidental.offset()
    }
}

impl Add for Accidental {
    type Output = Accidental;

    fn add(self, rhs: Accidental) -> Accidental {
        Accidental::from_offset(self.offset() + rhs.offset())
    }
}

impl Sub for Accidental {
    type Output = Accidental;

    fn sub(self, rhs: Accidental) -> Accidental {
        Accidental::from_offset(self.offset() - rhs.offset())
    }
}

impl Add<i32> for Accidental {
    type Output = Accidental;

    fn add(self, rhs: i32) -> Accidental {
        Accidental::from_offset(self.offset() + rhs)
    }
}

impl Sub<i32> for Accidental {
    type Output = Accidental;

    fn sub(self, rhs: i32) -> Accidental {
        Accidental::from_offset(self.offset() - rhs)
    }
}

impl Mul<i32> for Accidental {
    type Output = Accidental;

    fn mul(self, rhs: i32) -> Accidental {
        Accidental::from_offset(self.offset() * rhs)
    }
}

/// Truncates toward zero. Panics on division by zero, as `i32` does.
impl Div<i32> for Accidental {
    type Output = Accidental;

    fn div(self, rhs: i32) -> Accidental {
        Accidental::from_offset(self.offset() / rhs)
    }
}

impl Neg for Accidental {
    type Output = Accidental;

    fn neg(self) -> Accidental {
        Accidental::from_offset(-self.offset())
    }
}

impl fmt::Display for Accidental {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&Notation::default()))
    }
}
