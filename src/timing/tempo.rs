// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Note values, time signatures and tempo.
//!
//! Converts rhythmic values into seconds, audio samples, LFO rates and
//! MIDI clock pulses at 24 PPQN (Pulses Per Quarter Note).

use std::fmt;
use std::ops::Div;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Pulses Per Quarter Note - MIDI standard is 24
pub const PPQN: u32 = 24;

/// Default sample rate for sample-length calculations
pub const DEFAULT_SAMPLE_RATE: f64 = 44_100.0;

/// Standard note durations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteValueType {
    Whole,
    Half,
    #[default]
    Quarter,
    Eighth,
    Sixteenth,
    ThirtySecond,
    SixtyFourth,
}

impl NoteValueType {
    pub const ALL: [NoteValueType; 7] = [
        NoteValueType::Whole,
        NoteValueType::Half,
        NoteValueType::Quarter,
        NoteValueType::Eighth,
        NoteValueType::Sixteenth,
        NoteValueType::ThirtySecond,
        NoteValueType::SixtyFourth,
    ];

    /// Divisor of a whole note (a quarter is 4)
    pub fn value(self) -> f64 {
        self.division() as f64
    }

    pub fn division(self) -> u32 {
        match self {
            NoteValueType::Whole => 1,
            NoteValueType::Half => 2,
            NoteValueType::Quarter => 4,
            NoteValueType::Eighth => 8,
            NoteValueType::Sixteenth => 16,
            NoteValueType::ThirtySecond => 32,
            NoteValueType::SixtyFourth => 64,
        }
    }

    /// Note value for a divisor such as 8, if it is a standard one
    pub fn from_division(division: u32) -> Option<Self> {
        NoteValueType::ALL
            .into_iter()
            .find(|value| value.division() == division)
    }
}

/// Length modifier applied to a note value
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteModifier {
    #[default]
    Default,
    Dotted,
    Triplet,
    Quintuplet,
}

impl NoteModifier {
    pub fn value(self) -> f64 {
        match self {
            NoteModifier::Default => 1.0,
            NoteModifier::Dotted => 1.5,
            NoteModifier::Triplet => 0.6667,
            NoteModifier::Quintuplet => 0.8,
        }
    }
}

/// A note duration with an optional modifier
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NoteValue {
    #[serde(rename = "type")]
    pub value_type: NoteValueType,
    #[serde(default)]
    pub modifier: NoteModifier,
}

impl NoteValue {
    pub fn new(value_type: NoteValueType) -> Self {
        Self {
            value_type,
            modifier: NoteModifier::Default,
        }
    }

    pub fn with_modifier(mut self, modifier: NoteModifier) -> Self {
        self.modifier = modifier;
        self
    }

    /// Length measured in quarter notes
    pub fn quarters(&self) -> f64 {
        4.0 / self.value_type.value() * self.modifier.value()
    }
}

impl Div<NoteValueType> for NoteValue {
    type Output = f64;

    /// How many `rhs` notes fit in this one (a dotted half holds 12 sixteenths)
    fn div(self, rhs: NoteValueType) -> f64 {
        self.modifier.value() * rhs.value() / self.value_type.value()
    }
}

/// Beats per measure and the note value of each beat
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSignature {
    pub beats: u32,
    pub note_value: NoteValueType,
}

impl TimeSignature {
    pub fn new(beats: u32, note_value: NoteValueType) -> Self {
        Self { beats, note_value }
    }

    /// Time signature from a numeric division such as 8 in 6/8
    pub fn with_division(beats: u32, division: u32) -> Option<Self> {
        NoteValueType::from_division(division).map(|note_value| Self::new(beats, note_value))
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self::new(4, NoteValueType::Quarter)
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.beats, self.note_value.division())
    }
}

/// Time signature and beats per minute
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tempo {
    #[serde(default = "default_bpm")]
    pub bpm: f64,
    #[serde(default)]
    pub time_signature: TimeSignature,
}

fn default_bpm() -> f64 {
    120.0
}

impl Tempo {
    pub fn new(time_signature: TimeSignature, bpm: f64) -> Self {
        Self {
            bpm,
            time_signature,
        }
    }

    fn seconds_per_beat(&self) -> f64 {
        60.0 / self.bpm
    }

    /// Duration of a note value in seconds
    pub fn duration(&self, note_value: NoteValue) -> f64 {
        self.seconds_per_beat()
            * (self.time_signature.note_value.value() / note_value.value_type.value())
            * note_value.modifier.value()
    }

    /// Duration of a note value as a `Duration`.
    ///
    /// Returns `None` when the bpm does not give a finite, non-negative length.
    pub fn duration_of(&self, note_value: NoteValue) -> Option<Duration> {
        Duration::try_from_secs_f64(self.duration(note_value)).ok()
    }

    /// Note length in samples, for sample-accurate sequencing
    pub fn sample_length(&self, note_value: NoteValue, sample_rate: f64) -> f64 {
        self.seconds_per_beat()
            * sample_rate
            * ((4.0 / note_value.value_type.value()) * note_value.modifier.value())
    }

    /// LFO rate in hertz for one cycle per note value
    pub fn hertz(&self, note_value: NoteValue) -> f64 {
        1.0 / self.duration(note_value)
    }

    /// MIDI clock pulses spanned by a note value
    pub fn pulses(&self, note_value: NoteValue) -> f64 {
        note_value.quarters() * PPQN as f64
    }

    /// Interval between MIDI clock pulses, `None` for an unusable bpm
    pub fn pulse_interval(&self) -> Option<Duration> {
        // At 24 PPQN, interval = 60 / (BPM * 24) seconds
        Duration::try_from_secs_f64(60.0 / (self.bpm * PPQN as f64)).ok()
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Self::new(TimeSignature::default(), default_bpm())
    }
}

impl fmt::Display for Tempo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} BPM {}", self.bpm, self.time_signature)
    }
}
