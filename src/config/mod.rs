// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration for musicology.
//!
//! This module provides the settings that shape how notes are spelled and
//! rendered, the A4 reference pitch, the default tempo and any custom scale
//! definitions. Files are YAML unless the extension is `.toml`.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::music::pitch::A4_FREQUENCY;
use crate::music::scale::{CustomScaleDefinition, Scale, ScaleRegistry};
use crate::music::{Key, Notation, Spelling};
use crate::timing::Tempo;

/// Root configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TheoryConfig {
    /// Accidental preference when spelling bare semitone values
    #[serde(default)]
    pub spelling: Spelling,
    /// Frequency of A4 in Hz
    #[serde(default = "default_reference_pitch")]
    pub reference_pitch: f64,
    /// Default root (e.g., "C", "Eb", "F#")
    #[serde(default = "default_key")]
    pub key: String,
    /// Default scale name (e.g., "major", "minor", "dorian")
    #[serde(default = "default_scale")]
    pub scale: String,
    /// Accidental rendering style
    #[serde(default)]
    pub notation: Notation,
    /// Default tempo and time signature
    #[serde(default)]
    pub tempo: Tempo,
    /// Named custom scales
    #[serde(default)]
    pub scales: Vec<CustomScaleDefinition>,
}

fn default_reference_pitch() -> f64 {
    A4_FREQUENCY
}
fn default_key() -> String {
    "C".to_string()
}
fn default_scale() -> String {
    "major".to_string()
}

impl Default for TheoryConfig {
    fn default() -> Self {
        Self {
            spelling: Spelling::default(),
            reference_pitch: default_reference_pitch(),
            key: default_key(),
            scale: default_scale(),
            notation: Notation::default(),
            tempo: Tempo::default(),
            scales: Vec::new(),
        }
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

impl TheoryConfig {
    /// Load and validate a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config = if is_toml(path) {
            Self::from_toml(&contents)?
        } else {
            Self::from_yaml(&contents)?
        };
        config
            .validate()
            .with_context(|| format!("Invalid config file: {:?}", path))?;
        debug!(
            path = %path.display(),
            custom_scales = config.scales.len(),
            "loaded configuration"
        );
        Ok(config)
    }

    /// Parse a configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Parse a configuration from TOML string
    pub fn from_toml(toml: &str) -> Result<Self> {
        toml::from_str(toml).context("Failed to parse TOML configuration")
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize configuration to TOML")
    }

    /// Save configuration, as TOML when the extension is `.toml`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let contents = if is_toml(path) {
            self.to_toml()?
        } else {
            self.to_yaml()?
        };
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {:?}", path))
    }

    /// Check values that deserialize but cannot be used
    pub fn validate(&self) -> Result<()> {
        if !(self.reference_pitch.is_finite() && self.reference_pitch > 0.0) {
            bail!("reference_pitch must be positive, got {}", self.reference_pitch);
        }
        if !(self.tempo.bpm.is_finite() && self.tempo.bpm > 0.0) {
            bail!("tempo bpm must be positive, got {}", self.tempo.bpm);
        }
        if self.tempo.time_signature.beats == 0 {
            bail!("time signature needs at least one beat");
        }
        for def in &self.scales {
            if def.intervals.is_empty() {
                bail!("custom scale '{}' has no intervals", def.name);
            }
        }
        Ok(())
    }

    /// Registry holding this configuration's custom scales
    pub fn registry(&self) -> ScaleRegistry {
        let mut registry = ScaleRegistry::new();
        for def in &self.scales {
            registry.register(def.clone());
        }
        registry
    }

    /// The configured default scale
    pub fn configured_scale(&self) -> Result<Scale> {
        let root: Key = self
            .key
            .parse()
            .with_context(|| format!("Invalid key in config: {:?}", self.key))?;
        self.registry()
            .get_scale(root, &self.scale)
            .with_context(|| format!("Unknown scale in config: {:?}", self.scale))
    }
}
