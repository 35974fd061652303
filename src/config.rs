use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, terrain::MapKind, utility::ENGAGEMENT_RANGE};

/// Tuning parameters for the canned behaviours and utility selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Distance at which attack utility reaches zero and hunt saturates.
    pub engagement_range: f32,
    /// Period of the perception refresh service, in seconds.
    pub service_interval: f32,
    /// Maximum `targetOffCentre` at which the tank counts as facing its
    /// target.
    pub aim_tolerance: f32,
    /// Pause between stopping the turret and firing, in seconds.
    pub aim_wait: f32,
    /// Duration of one flee or hunt burst, in seconds.
    pub burst_wait: f32,
    /// Turn velocity while tracking a target, in -1..1.
    pub track_turn: f32,
    /// Turn velocity of the spin behaviour.
    pub spin_turn: f32,
    /// Fire force of the spin behaviour, in 0..1.
    pub spin_fire: f32,
    /// Turn velocity of the idle turn-slowly behaviour.
    pub idle_turn: f32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            engagement_range: ENGAGEMENT_RANGE,
            service_interval: 0.2,
            aim_tolerance: 0.1,
            aim_wait: 2.0,
            burst_wait: 2.0,
            track_turn: 0.2,
            spin_turn: -0.05,
            spin_fire: 1.0,
            idle_turn: 0.1,
        }
    }
}

/// Parameters of the height-field generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub map: MapKind,
    pub seed: u64,
    pub width: usize,
    pub depth: usize,
    /// World-space vertical scale applied by [`crate::HeightMap::elevation`].
    pub height: f32,
    /// Sampling density of the noise maps; larger means choppier terrain.
    pub frequency: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    /// Number of noise layers in the octave map.
    pub octaves: u32,
    /// Per-octave amplitude multiplier.
    pub amplitude_modifier: f32,
    /// Per-octave frequency multiplier.
    pub frequency_modifier: f32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            map: MapKind::Flat,
            seed: 10,
            width: 256,
            depth: 256,
            height: 20.0,
            frequency: 20.0,
            offset_x: 100.0,
            offset_y: 100.0,
            octaves: 3,
            amplitude_modifier: 0.5,
            frequency_modifier: 2.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub agent: AgentConfig,
    pub terrain: TerrainConfig,
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_yaml(&std::fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_tuning() {
        let config = AgentConfig::default();
        assert_eq!(config.engagement_range, 50.0);
        assert_eq!(config.service_interval, 0.2);
        assert_eq!(config.aim_tolerance, 0.1);

        let terrain = TerrainConfig::default();
        assert_eq!(terrain.width, 256);
        assert_eq!(terrain.frequency, 20.0);
    }

    #[test]
    fn partial_yaml_overrides_defaults() {
        let config = Config::from_yaml(
            r#"
agent:
  engagement_range: 80.0
terrain:
  map: perlin_octave
  octaves: 5
"#,
        )
        .unwrap();
        assert_eq!(config.agent.engagement_range, 80.0);
        assert_eq!(config.agent.service_interval, 0.2);
        assert_eq!(config.terrain.map, MapKind::PerlinOctave);
        assert_eq!(config.terrain.octaves, 5);
        assert_eq!(config.terrain.width, 256);
    }

    #[test]
    fn bad_yaml_is_an_error() {
        assert!(Config::from_yaml("agent: [not, a, mapping]").is_err());
    }
}
