// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Note letters A-G.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The seven note letters, ordered alphabetically from C
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    /// All letters in order, starting at C where the octave number changes
    pub const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    /// Semitone of the natural note (C = 0)
    pub fn semitone(self) -> i32 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }

    /// Position in `ALL` (C = 0, B = 6)
    pub fn index(self) -> i32 {
        self as i32
    }

    /// Letter `steps` diatonic steps away, wrapping in both directions
    pub fn at(self, steps: i32) -> Letter {
        Letter::ALL[(self.index() + steps).rem_euclid(7) as usize]
    }

    /// Number of B-to-C boundaries crossed when moving `steps` letters
    pub fn octaves_crossed(self, steps: i32) -> i32 {
        (self.index() + steps).div_euclid(7)
    }

    /// Upward letter distance to `other` (0..6)
    pub fn steps_to(self, other: Letter) -> i32 {
        (other.index() - self.index()).rem_euclid(7)
    }

    /// Letter for a character, either case
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'C' => Some(Letter::C),
            'D' => Some(Letter::D),
            'E' => Some(Letter::E),
            'F' => Some(Letter::F),
            'G' => Some(Letter::G),
            'A' => Some(Letter::A),
            'B' => Some(Letter::B),
            _ => None,
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Letter::C => "C",
            Letter::D => "D",
            Letter::E => "E",
            Letter::F => "F",
            Letter::G => "G",
            Letter::A => "A",
            Letter::B => "B",
        };
        f.write_str(c)
    }
}
