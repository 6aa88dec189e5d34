// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pitches: a spelled key in a given octave.
//!
//! The absolute semitone index is the MIDI note number: C-1 is 0, middle C
//! (C4) is 60 and A4 is 69. Octave numbers change between B and C, so B♯3
//! sits at the same index as C4.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use super::accidental::Accidental;
use super::interval::Interval;
use super::key::{Key, Spelling};
use super::letter::Letter;
use super::notation::Notation;
use super::StrictEq;

/// MIDI note number of A4
pub const A4_MIDI: i32 = 69;

/// Concert pitch of A4 in Hz
pub const A4_FREQUENCY: f64 = 440.0;

/// A key in a given octave.
///
/// `==`, `Hash` and ordering use the MIDI index, not the (pitch class,
/// octave) pair, so B♯3 == C4 and C♭4 == B3. Use [`StrictEq`] to compare
/// spellings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pitch {
    key: Key,
    octave: i32,
}

impl Pitch {
    pub fn new(key: Key, octave: i32) -> Self {
        Self { key, octave }
    }

    /// Pitch for a MIDI note number, spelled with the given preference
    pub fn from_midi(midi: i32, spelling: Spelling) -> Self {
        let octave = midi.div_euclid(12) - 1;
        Self::new(Key::from_pitch_class(midi, spelling), octave)
    }

    /// Nearest equal-tempered pitch to a frequency, with A4 at 440 Hz.
    ///
    /// Returns `None` for frequencies that are not finite and positive.
    pub fn nearest(frequency: f64, spelling: Spelling) -> Option<Self> {
        Self::nearest_with(frequency, A4_FREQUENCY, spelling)
    }

    /// Nearest pitch to a frequency relative to the given A4 reference
    pub fn nearest_with(frequency: f64, reference: f64, spelling: Spelling) -> Option<Self> {
        if !(frequency.is_finite() && frequency > 0.0 && reference.is_finite() && reference > 0.0)
        {
            return None;
        }
        let midi = A4_MIDI as f64 + 12.0 * (frequency / reference).log2();
        Some(Self::from_midi(midi.round() as i32, spelling))
    }

    /// Spell the note `steps` letters away from `self` that sits at the
    /// absolute index `midi`
    pub(crate) fn spell(&self, steps: i32, midi: i32) -> Pitch {
        let letter = self.key.letter.at(steps);
        let octave = self.octave + self.key.letter.octaves_crossed(steps);
        let natural = (octave + 1) * 12 + letter.semitone();
        Pitch::new(Key::new(letter, Accidental::from_offset(midi - natural)), octave)
    }

    pub fn key(&self) -> Key {
        self.key
    }

    pub fn letter(&self) -> Letter {
        self.key.letter
    }

    pub fn accidental(&self) -> Accidental {
        self.key.accidental
    }

    pub fn octave(&self) -> i32 {
        self.octave
    }

    /// Absolute semitone index (MIDI note number)
    pub fn midi(&self) -> i32 {
        (self.octave + 1) * 12 + self.key.semitone()
    }

    /// Position on the staff counted in letters, ignoring accidentals
    pub fn letter_rank(&self) -> i32 {
        self.octave * 7 + self.key.letter.index()
    }

    /// Same key in another octave
    pub fn with_octave(&self, octave: i32) -> Pitch {
        Pitch::new(self.key, octave)
    }

    /// Equal-tempered frequency with A4 at 440 Hz
    pub fn frequency(&self) -> f64 {
        self.frequency_with(A4_FREQUENCY)
    }

    /// Equal-tempered frequency relative to the given A4 reference
    pub fn frequency_with(&self, reference: f64) -> f64 {
        reference * 2f64.powf((self.midi() - A4_MIDI) as f64 / 12.0)
    }

    /// Move by a number of semitones. Whole octaves keep the spelling;
    /// anything else is respelled with the given preference.
    pub fn transposed(&self, semitones: i32, spelling: Spelling) -> Pitch {
        if semitones % 12 == 0 {
            return Pitch::new(self.key, self.octave + semitones / 12);
        }
        Pitch::from_midi(self.midi() + semitones, spelling)
    }

    /// Interval above, spelled on the letter implied by its degree
    pub fn up(&self, interval: Interval) -> Pitch {
        self.spell(interval.steps(), self.midi() + interval.semitones())
    }

    /// Interval below, spelled on the letter implied by its degree
    pub fn down(&self, interval: Interval) -> Pitch {
        self.spell(-interval.steps(), self.midi() - interval.semitones())
    }

    /// Interval between two pitches, named from their spelling
    pub fn interval_to(&self, other: &Pitch) -> Interval {
        let (low, high) = if (self.midi(), self.letter_rank()) <= (other.midi(), other.letter_rank())
        {
            (self, other)
        } else {
            (other, self)
        };
        Interval::classify(
            high.letter_rank() - low.letter_rank(),
            high.midi() - low.midi(),
        )
    }

    /// Render with an explicit notation style, e.g. `"C♯4"`
    pub fn render(&self, notation: &Notation) -> String {
        format!("{}{}", self.key.render(notation), self.octave)
    }
}

impl Default for Pitch {
    fn default() -> Self {
        Pitch::new(Key::default(), 4)
    }
}

impl PartialEq for Pitch {
    fn eq(&self, other: &Self) -> bool {
        self.midi() == other.midi()
    }
}

impl Eq for Pitch {}

impl Hash for Pitch {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.midi().hash(state);
    }
}

impl PartialOrd for Pitch {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pitch {
    fn cmp(&self, other: &Self) -> Ordering {
        self.midi().cmp(&other.midi())
    }
}

impl StrictEq for Pitch {
    fn strict_eq(&self, other: &Self) -> bool {
        self.key.strict_eq(&other.key) && self.octave == other.octave
    }
}

impl Add<i32> for Pitch {
    type Output = Pitch;

    fn add(self, rhs: i32) -> Pitch {
        self.transposed(rhs, Spelling::Sharps)
    }
}

impl Sub<i32> for Pitch {
    type Output = Pitch;

    fn sub(self, rhs: i32) -> Pitch {
        self.transposed(-rhs, Spelling::Sharps)
    }
}

impl Add<Interval> for Pitch {
    type Output = Pitch;

    fn add(self, rhs: Interval) -> Pitch {
        self.up(rhs)
    }
}

impl Sub<Interval> for Pitch {
    type Output = Pitch;

    fn sub(self, rhs: Interval) -> Pitch {
        self.down(rhs)
    }
}

impl Sub for Pitch {
    type Output = Interval;

    fn sub(self, rhs: Pitch) -> Interval {
        self.interval_to(&rhs)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&Notation::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pitch(letter: Letter, accidental: Accidental, octave: i32) -> Pitch {
        Pitch::new(Key::new(letter, accidental), octave)
    }

    fn natural(letter: Letter, octave: i32) -> Pitch {
        pitch(letter, Accidental::Natural, octave)
    }

    #[test]
    fn test_midi_origin() {
        assert_eq!(natural(Letter::C, -1).midi(), 0);
        assert_eq!(natural(Letter::C, 4).midi(), 60);
        assert_eq!(natural(Letter::A, 4).midi(), 69);
        assert_eq!(pitch(Letter::B, Accidental::SHARP, 3).midi(), 60);
        assert_eq!(pitch(Letter::C, Accidental::FLAT, 4).midi(), 59);
    }

    #[test]
    fn test_semitone_transposition() {
        let c1 = natural(Letter::C, 1);
        assert_eq!((c1 + 12).octave(), c1.octave() + 1);
        assert!((c1 + 1).key().strict_eq(&Key::new(Letter::C, Accidental::SHARP)));
        assert_eq!(c1 - 1, natural(Letter::B, 0));
        assert!((c1 - 1).strict_eq(&natural(Letter::B, 0)));
        assert!(c1
            .transposed(3, Spelling::Flats)
            .strict_eq(&pitch(Letter::E, Accidental::FLAT, 1)));
    }

    #[test]
    fn test_octave_shift_keeps_spelling() {
        let b_sharp = pitch(Letter::B, Accidental::SHARP, 3);
        assert!((b_sharp + 24).strict_eq(&pitch(Letter::B, Accidental::SHARP, 5)));
        assert!((b_sharp - 12).strict_eq(&pitch(Letter::B, Accidental::SHARP, 2)));
    }

    #[test]
    fn test_from_midi() {
        let c0 = Pitch::from_midi(12, Spelling::Sharps);
        assert!(c0.strict_eq(&natural(Letter::C, 0)));
        assert_eq!(c0 - 12, Pitch::from_midi(0, Spelling::Sharps));

        let top = Pitch::from_midi(127, Spelling::Sharps);
        assert_eq!(top.key(), Key::natural(Letter::G));
        assert_eq!(top.octave(), 9);

        assert_eq!(Pitch::from_midi(0, Spelling::Sharps).key(), Key::natural(Letter::C));

        let g_flat = Pitch::from_midi(66, Spelling::Flats);
        assert!(g_flat.key().strict_eq(&Key::new(Letter::G, Accidental::FLAT)));

        let below = Pitch::from_midi(-1, Spelling::Sharps);
        assert!(below.strict_eq(&natural(Letter::B, -2)));
    }

    #[test]
    fn test_interval_addition() {
        let c1 = natural(Letter::C, 1);
        assert!((c1 + Interval::m2).strict_eq(&pitch(Letter::D, Accidental::FLAT, 1)));
        assert!((c1 + Interval::M2).strict_eq(&natural(Letter::D, 1)));
        assert!((c1 + Interval::m3).strict_eq(&pitch(Letter::E, Accidental::FLAT, 1)));
        assert!((c1 + Interval::M3).strict_eq(&natural(Letter::E, 1)));
        assert!((c1 + Interval::P8).strict_eq(&natural(Letter::C, 2)));
        assert!((c1 + Interval::M9).strict_eq(&natural(Letter::D, 2)));

        let a3 = natural(Letter::A, 3);
        assert!((a3 + Interval::m3).strict_eq(&natural(Letter::C, 4)));
        let b3 = natural(Letter::B, 3);
        assert!((b3 + Interval::A1).strict_eq(&pitch(Letter::B, Accidental::SHARP, 3)));
    }

    #[test]
    fn test_interval_subtraction() {
        let d1 = natural(Letter::D, 1);
        assert!((d1 - Interval::m2).strict_eq(&pitch(Letter::C, Accidental::SHARP, 1)));
        assert!((d1 - Interval::M2).strict_eq(&natural(Letter::C, 1)));
        assert!((d1 - Interval::m3).strict_eq(&natural(Letter::B, 0)));
    }

    #[test]
    fn test_pitch_difference() {
        let c1 = natural(Letter::C, 1);
        let d1 = natural(Letter::D, 1);
        assert_eq!(d1 - c1, Interval::M2);
        assert_eq!(c1 - d1, Interval::M2);

        let f_sharp = pitch(Letter::F, Accidental::SHARP, 1);
        let g_flat = pitch(Letter::G, Accidental::FLAT, 1);
        assert_eq!(f_sharp - c1, Interval::A4);
        assert_eq!(g_flat - c1, Interval::d5);
        assert_eq!(natural(Letter::E, 2) - c1, Interval::M10);
    }

    #[test]
    fn test_difference_recovers_interval() {
        let roots = [
            natural(Letter::C, 1),
            pitch(Letter::F, Accidental::SHARP, 3),
            pitch(Letter::B, Accidental::FLAT, 4),
            natural(Letter::B, 2),
        ];
        for root in roots {
            for interval in Interval::ALL.iter().filter(|i| !i.is_compound()) {
                assert_eq!((root + *interval) - root, *interval, "{} + {}", root, interval);
            }
        }
    }

    #[test]
    fn test_frequency() {
        let a4 = natural(Letter::A, 4);
        assert_eq!(a4.frequency(), 440.0);
        assert_eq!(Pitch::nearest(440.0, Spelling::Sharps), Some(a4));
        assert!((natural(Letter::A, 5).frequency() - 880.0).abs() < 1e-9);
        assert!((natural(Letter::C, 4).frequency() - 261.6256).abs() < 1e-3);
        assert!((a4.frequency_with(432.0) - 432.0).abs() < 1e-9);
    }

    #[test]
    fn test_frequency_round_trip() {
        for midi in 0..=127 {
            let pitch = Pitch::from_midi(midi, Spelling::Flats);
            let nearest = Pitch::nearest(pitch.frequency(), Spelling::Flats).unwrap();
            assert!(nearest.strict_eq(&pitch), "{}", pitch);
        }
    }

    #[test]
    fn test_nearest_rejects_invalid() {
        assert_eq!(Pitch::nearest(0.0, Spelling::Sharps), None);
        assert_eq!(Pitch::nearest(-10.0, Spelling::Sharps), None);
        assert_eq!(Pitch::nearest(f64::NAN, Spelling::Sharps), None);
        assert_eq!(Pitch::nearest_with(440.0, 0.0, Spelling::Sharps), None);
    }

    #[test]
    fn test_nearest_rounds() {
        let a4 = Pitch::nearest(445.0, Spelling::Sharps).unwrap();
        assert_eq!(a4.midi(), 69);
        let a_sharp = Pitch::nearest(460.0, Spelling::Sharps).unwrap();
        assert!(a_sharp.strict_eq(&pitch(Letter::A, Accidental::SHARP, 4)));
    }

    #[test]
    fn test_equality_and_order() {
        let c_sharp = pitch(Letter::C, Accidental::SHARP, 1);
        let d_flat = pitch(Letter::D, Accidental::FLAT, 1);
        assert_eq!(c_sharp, d_flat);
        assert!(!c_sharp.strict_eq(&d_flat));
        assert!(natural(Letter::B, 3) < natural(Letter::C, 4));
        assert_ne!(natural(Letter::C, 1), natural(Letter::C, 2));

        // Equal across the octave boundary even though the octave numbers differ
        let b_sharp = pitch(Letter::B, Accidental::SHARP, 3);
        assert_eq!(b_sharp, natural(Letter::C, 4));
        assert!(!b_sharp.strict_eq(&natural(Letter::C, 4)));
        assert_eq!(pitch(Letter::C, Accidental::FLAT, 4), natural(Letter::B, 3));
    }

    #[test]
    fn test_display() {
        assert_eq!(pitch(Letter::F, Accidental::SHARP, -5).to_string(), "F♯-5");
        assert_eq!(
            pitch(Letter::E, Accidental::FLAT, 4).render(&Notation::ascii()),
            "Eb4"
        );
    }
}
