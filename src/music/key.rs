// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Spelled pitch classes.
//!
//! A `Key` is a letter plus an accidental. Comparing keys with `==` is
//! enharmonic (C♭ equals B); use [`StrictEq`] to compare spellings.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::accidental::Accidental;
use super::interval::Interval;
use super::letter::Letter;
use super::notation::Notation;
use super::StrictEq;

/// Preferred accidental when a bare semitone value has to be spelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Spelling {
    #[default]
    Sharps,
    Flats,
}

/// A letter with an accidental, independent of octave
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Key {
    pub letter: Letter,
    #[serde(default)]
    pub accidental: Accidental,
}

impl Key {
    /// Chromatic spellings preferring sharps, indexed by pitch class
    pub const SHARPS: [Key; 12] = [
        Key::natural(Letter::C),
        Key::new(Letter::C, Accidental::SHARP),
        Key::natural(Letter::D),
        Key::new(Letter::D, Accidental::SHARP),
        Key::natural(Letter::E),
        Key::natural(Letter::F),
        Key::new(Letter::F, Accidental::SHARP),
        Key::natural(Letter::G),
        Key::new(Letter::G, Accidental::SHARP),
        Key::natural(Letter::A),
        Key::new(Letter::A, Accidental::SHARP),
        Key::natural(Letter::B),
    ];

    /// Chromatic spellings preferring flats, indexed by pitch class
    pub const FLATS: [Key; 12] = [
        Key::natural(Letter::C),
        Key::new(Letter::D, Accidental::FLAT),
        Key::natural(Letter::D),
        Key::new(Letter::E, Accidental::FLAT),
        Key::natural(Letter::E),
        Key::natural(Letter::F),
        Key::new(Letter::G, Accidental::FLAT),
        Key::natural(Letter::G),
        Key::new(Letter::A, Accidental::FLAT),
        Key::natural(Letter::A),
        Key::new(Letter::B, Accidental::FLAT),
        Key::natural(Letter::B),
    ];

    pub const fn new(letter: Letter, accidental: Accidental) -> Self {
        Self { letter, accidental }
    }

    pub const fn natural(letter: Letter) -> Self {
        Self::new(letter, Accidental::Natural)
    }

    /// Spell a pitch class (reduced mod 12) with the given preference
    pub fn from_pitch_class(pitch_class: i32, spelling: Spelling) -> Self {
        let index = pitch_class.rem_euclid(12) as usize;
        match spelling {
            Spelling::Sharps => Key::SHARPS[index],
            Spelling::Flats => Key::FLATS[index],
        }
    }

    /// Spell a pitch class on a fixed letter with the smallest accidental
    pub fn on_letter(letter: Letter, pitch_class: i32) -> Self {
        let mut offset = (pitch_class - letter.semitone()).rem_euclid(12);
        if offset > 6 {
            offset -= 12;
        }
        Key::new(letter, Accidental::from_offset(offset))
    }

    /// Letter semitone plus accidental, not reduced (B♯ is 12)
    pub fn semitone(&self) -> i32 {
        self.letter.semitone() + self.accidental.offset()
    }

    /// Pitch class in 0..11
    pub fn pitch_class(&self) -> i32 {
        self.semitone().rem_euclid(12)
    }

    /// Same accidental on the letter `steps` letters away
    pub fn at(&self, steps: i32) -> Key {
        Key::new(self.letter.at(steps), self.accidental)
    }

    /// Key an interval above this one, spelled on the letter implied by the
    /// interval's generic size (a minor third above C is E♭, never D♯)
    pub fn transposed(&self, interval: Interval) -> Key {
        let letter = self.letter.at(interval.steps());
        Key::on_letter(letter, self.pitch_class() + interval.semitones())
    }

    /// Key an interval below this one
    pub fn transposed_down(&self, interval: Interval) -> Key {
        let letter = self.letter.at(-interval.steps());
        Key::on_letter(letter, self.pitch_class() - interval.semitones())
    }

    /// Render with an explicit notation style
    pub fn render(&self, notation: &Notation) -> String {
        format!("{}{}", self.letter, self.accidental.render(notation))
    }
}

impl Default for Key {
    fn default() -> Self {
        Key::natural(Letter::C)
    }
}

impl From<Letter> for Key {
    fn from(letter: Letter) -> Self {
        Key::natural(letter)
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.pitch_class() == other.pitch_class()
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pitch_class().hash(state);
    }
}

impl StrictEq for Key {
    fn strict_eq(&self, other: &Self) -> bool {
        self.letter == other.letter && self.accidental.strict_eq(&other.accidental)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&Notation::default()))
    }
}
