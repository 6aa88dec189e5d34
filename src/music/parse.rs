// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Text parsing for keys, pitches and intervals.
//!
//! Accepts letters in either case followed by any run of accidental glyphs
//! (`#` `♯` `b` `♭` `x` `𝄪` `𝄫` `n` `♮`), which accumulate: `"a##b"` is A♯.

use std::str::FromStr;

use thiserror::Error;

use super::accidental::Accidental;
use super::interval::Interval;
use super::key::Key;
use super::letter::Letter;
use super::pitch::Pitch;

/// Default octave for pitches written without one
pub const DEFAULT_OCTAVE: i32 = 4;

/// Largest octave number accepted in either direction
pub const MAX_OCTAVE: i32 = 1000;

/// Errors produced when parsing music text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty input")]
    Empty,
    #[error("invalid note letter '{0}'")]
    InvalidLetter(char),
    #[error("invalid octave '{0}'")]
    InvalidOctave(String),
    #[error("unexpected trailing text '{0}'")]
    Trailing(String),
    #[error("unknown interval '{0}'")]
    UnknownInterval(String),
    #[error("unknown scale type '{0}'")]
    UnknownScale(String),
    #[error("unknown harmonic field '{0}'")]
    UnknownHarmonicField(String),
}

/// Split a key off the front of `s`, returning it with the unparsed rest
fn split_key(s: &str) -> Result<(Key, &str), ParseError> {
    let mut chars = s.char_indices();
    let (_, first) = chars.next().ok_or(ParseError::Empty)?;
    let letter = Letter::from_char(first).ok_or(ParseError::InvalidLetter(first))?;

    let mut offset = 0;
    let mut rest = &s[first.len_utf8()..];
    for (index, c) in chars {
        let delta = match c {
            '#' | '♯' => 1,
            'b' | '♭' => -1,
            'x' | '𝄪' => 2,
            '𝄫' => -2,
            'n' | '♮' => 0,
            _ => {
                rest = &s[index..];
                break;
            }
        };
        offset += delta;
        rest = &s[index + c.len_utf8()..];
    }

    Ok((Key::new(letter, Accidental::from_offset(offset)), rest))
}

impl FromStr for Key {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, rest) = split_key(s.trim())?;
        if !rest.is_empty() {
            return Err(ParseError::Trailing(rest.to_string()));
        }
        Ok(key)
    }
}

impl FromStr for Pitch {
    type Err = ParseError;

    /// Parse `"C#4"`, `"f#-5"` or `"Eb"` (octave 4 when omitted)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, rest) = split_key(s.trim())?;
        let octave = if rest.is_empty() {
            DEFAULT_OCTAVE
        } else {
            rest.parse::<i32>()
                .ok()
                .filter(|octave| (-MAX_OCTAVE..=MAX_OCTAVE).contains(octave))
                .ok_or_else(|| ParseError::InvalidOctave(rest.to_string()))?
        };
        Ok(Pitch::new(key, octave))
    }
}

impl FromStr for Interval {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interval::from_label(s).ok_or_else(|| ParseError::UnknownInterval(s.to_string()))
    }
}
