// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Rendering style for accidentals.
//!
//! Rendering never touches global state: every textual form is produced
//! from an explicit `Notation` value. `Display` impls use the default.

use serde::{Deserialize, Serialize};

/// Glyph family used when rendering accidentals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlyphSet {
    /// ♯ ♭ 𝄪 𝄫 ♮
    #[default]
    Unicode,
    /// # b x bb n
    Ascii,
}

/// How accidentals are written out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Notation {
    /// Use single double-sharp/double-flat glyphs for magnitude 2.
    /// Turn off for fonts that lack them.
    pub double_accidentals: bool,
    /// Glyph family
    pub glyphs: GlyphSet,
}

impl Notation {
    /// Unicode glyphs without the double-accidental symbols
    pub const fn single_glyphs() -> Self {
        Self {
            double_accidentals: false,
            glyphs: GlyphSet::Unicode,
        }
    }

    /// Plain ASCII glyphs
    pub const fn ascii() -> Self {
        Self {
            double_accidentals: true,
            glyphs: GlyphSet::Ascii,
        }
    }

    pub fn sharp(&self) -> &'static str {
        match self.glyphs {
            GlyphSet::Unicode => "♯",
            GlyphSet::Ascii => "#",
        }
    }

    pub fn flat(&self) -> &'static str {
        match self.glyphs {
            GlyphSet::Unicode => "♭",
            GlyphSet::Ascii => "b",
        }
    }

    pub fn double_sharp(&self) -> &'static str {
        match self.glyphs {
            GlyphSet::Unicode => "𝄪",
            GlyphSet::Ascii => "x",
        }
    }

    pub fn double_flat(&self) -> &'static str {
        match self.glyphs {
            GlyphSet::Unicode => "𝄫",
            GlyphSet::Ascii => "bb",
        }
    }

    pub fn natural(&self) -> &'static str {
        match self.glyphs {
            GlyphSet::Unicode => "♮",
            GlyphSet::Ascii => "n",
        }
    }
}

impl Default for Notation {
    fn default() -> Self {
        Self {
            double_accidentals: true,
            glyphs: GlyphSet::Unicode,
        }
    }
}
