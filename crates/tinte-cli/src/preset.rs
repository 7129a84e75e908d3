//! Preset file format.
//!
//! Presets are TOML files holding a flat set of named parameter values
//! per processor, applied through `ParameterInfo` name lookup. Parameter
//! names match the descriptor names (case-insensitive), e.g.:
//!
//! ```toml
//! name = "Glue"
//!
//! [saturator]
//! process = 65.0
//! character = 1.0
//! model = 2.0
//!
//! [compressor]
//! threshold = -12.0
//! ratio = 4.0
//! mix = 80.0
//! ```

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tinte_core::ParameterInfo;
use tracing::warn;

/// Preset file format.
#[derive(Debug, Default, Deserialize)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    #[allow(dead_code)]
    pub description: Option<String>,
    /// Named parameter values for the tone shaper pair.
    #[serde(default)]
    pub saturator: HashMap<String, f32>,
    /// Named parameter values for the bus compressor.
    #[serde(default)]
    pub compressor: HashMap<String, f32>,
}

impl Preset {
    /// Load a preset from a TOML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading preset {}", path.display()))?;
        let preset: Self = toml::from_str(&content)
            .with_context(|| format!("parsing preset {}", path.display()))?;
        Ok(preset)
    }
}

/// Apply a flat name/value map to a processor's parameters.
///
/// Unknown names are skipped with a warning so presets stay loadable
/// across versions.
pub fn apply_params(target: &mut impl ParameterInfo, params: &HashMap<String, f32>) {
    for (name, &value) in params {
        if !target.set_param_by_name(name, value) {
            warn!(name, "preset parameter not recognized, skipping");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinte_effects::{BusCompressor, Character, ChannelPair};

    #[test]
    fn parses_flat_sections() {
        let preset: Preset = toml::from_str(
            r#"
            name = "Glue"

            [saturator]
            process = 65.0
            character = 2.0

            [compressor]
            threshold = -12.0
            ratio = 4.0
            "#,
        )
        .unwrap();
        assert_eq!(preset.name, "Glue");
        assert_eq!(preset.saturator["process"], 65.0);
        assert_eq!(preset.compressor.len(), 2);
    }

    #[test]
    fn applies_to_processors() {
        let preset: Preset = toml::from_str(
            r#"
            name = "Test"

            [saturator]
            process = 40.0
            character = 2.0

            [compressor]
            threshold = -20.0
            "#,
        )
        .unwrap();

        let mut pair = ChannelPair::new(48000.0);
        apply_params(&mut pair, &preset.saturator);
        assert!((pair.get_param(1) - 40.0).abs() < 1e-4);
        assert_eq!(pair.character(), Character::Sapphire);

        let mut comp = BusCompressor::new(48000.0);
        apply_params(&mut comp, &preset.compressor);
        assert!((comp.get_param(0) + 20.0).abs() < 1e-4);
    }

    #[test]
    fn unknown_names_are_skipped() {
        let mut pair = ChannelPair::new(48000.0);
        let mut params = HashMap::new();
        params.insert("nonsense".to_string(), 1.0);
        // Must not panic or change anything.
        apply_params(&mut pair, &params);
        assert_eq!(pair.get_param(1), 0.0);
    }
}
