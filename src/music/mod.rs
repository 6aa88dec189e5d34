// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory types.
//!
//! This module provides spelled keys and pitches, intervals, chords, scales
//! and harmonic fields. Every note keeps its letter, so a minor third above
//! C comes out as E♭ and never as D♯.
//!
//! Equality on [`Key`] and [`Pitch`] is enharmonic. Compare spellings with
//! [`StrictEq`].

pub mod accidental;
pub mod chord;
pub mod interval;
pub mod key;
pub mod letter;
pub mod notation;
pub mod parse;
pub mod pitch;
pub mod scale;

pub use accidental::Accidental;
pub use chord::{
    Chord, ChordExtension, ChordFifth, ChordSeventh, ChordSuspended, ChordThird, ChordType,
    ExtensionDegree,
};
pub use interval::{Interval, Quality};
pub use key::{Key, Spelling};
pub use letter::Letter;
pub use notation::{GlyphSet, Notation};
pub use parse::ParseError;
pub use pitch::Pitch;
pub use scale::{CustomScaleDefinition, HarmonicField, Scale, ScaleRegistry, ScaleType};

/// Spelling-sensitive equality.
///
/// `==` treats C♯ and D♭ as the same note; `strict_eq` does not.
pub trait StrictEq {
    fn strict_eq(&self, other: &Self) -> bool;
}

impl<T: StrictEq> StrictEq for [T] {
    fn strict_eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.strict_eq(b))
    }
}
