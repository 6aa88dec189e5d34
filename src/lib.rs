// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! musicology - music theory spelling and harmony.
//!
//! Spelled keys and pitches, interval arithmetic, chord construction and
//! recognition, scales with harmonic fields and roman numerals, plus tempo
//! and note-value calculations.

pub mod config;
pub mod music;
pub mod timing;

pub use config::TheoryConfig;
pub use music::{
    Accidental, Chord, ChordType, HarmonicField, Interval, Key, Letter, Notation, Pitch, Scale,
    ScaleType, Spelling, StrictEq,
};
pub use timing::{NoteModifier, NoteValue, NoteValueType, Tempo, TimeSignature};
