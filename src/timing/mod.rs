// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Rhythm and tempo module.
//!
//! This module provides note values, time signatures and tempo
//! calculations.

pub mod tempo;

pub use tempo::{NoteModifier, NoteValue, NoteValueType, Tempo, TimeSignature, PPQN};
