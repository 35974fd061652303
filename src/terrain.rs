//! Procedural height-field generation: the noise-based terrain lab,
//! decoupled from any engine terrain component. Every generator produces
//! normalized heights in [0, 1] over a `width` x `depth` grid.

use noise::{NoiseFn, Perlin, Simplex};
use serde::{Deserialize, Serialize};

use crate::config::TerrainConfig;

/// The available height-map shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapKind {
    #[default]
    Flat,
    Slope,
    Random,
    Perlin,
    Simplex,
    PerlinOctave,
}

/// A generated height field. Heights are normalized to [0, 1]; world-space
/// elevation is obtained by scaling with the configured vertical size.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightMap {
    width: usize,
    depth: usize,
    vertical_scale: f32,
    heights: Vec<f32>,
}

impl HeightMap {
    fn new(width: usize, depth: usize, vertical_scale: f32) -> Self {
        Self {
            width,
            depth,
            vertical_scale,
            heights: vec![0.0; width * depth],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Normalized height at a grid position.
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.heights[x * self.depth + y]
    }

    fn set(&mut self, x: usize, y: usize, value: f32) {
        self.heights[x * self.depth + y] = value;
    }

    /// World-space elevation at a grid position.
    pub fn elevation(&self, x: usize, y: usize) -> f32 {
        self.get(x, y) * self.vertical_scale
    }

    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.heights.iter().copied()
    }
}

/// Generates height maps from a [`TerrainConfig`]. The noise samplers are
/// seeded once at construction, so the same generator always produces the
/// same map.
pub struct TerrainGenerator {
    config: TerrainConfig,
    perlin: Perlin,
    simplex: Simplex,
}

impl TerrainGenerator {
    pub fn new(config: TerrainConfig) -> Self {
        let perlin = Perlin::new(config.seed as u32);
        let simplex = Simplex::new(config.seed as u32);
        Self {
            config,
            perlin,
            simplex,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(TerrainConfig {
            seed,
            ..Default::default()
        })
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    pub fn generate(&self) -> HeightMap {
        match self.config.map {
            MapKind::Flat => self.flat_map(),
            MapKind::Slope => self.sloping_map(),
            MapKind::Random => self.random_map(),
            MapKind::Perlin => self.noise_map(false),
            MapKind::Simplex => self.noise_map(true),
            MapKind::PerlinOctave => self.perlin_octave_map(),
        }
    }

    fn blank(&self) -> HeightMap {
        HeightMap::new(self.config.width, self.config.depth, self.config.height)
    }

    /// All-zero height map.
    pub fn flat_map(&self) -> HeightMap {
        self.blank()
    }

    /// Linear ramp rising toward the far corner.
    pub fn sloping_map(&self) -> HeightMap {
        let mut map = self.blank();
        for x in 0..self.config.width {
            for y in 0..self.config.depth {
                let value = (x as f32 / self.config.width as f32
                    + y as f32 / self.config.depth as f32)
                    / 2.0;
                map.set(x, y, value);
            }
        }
        map
    }

    /// Uncorrelated uniform noise in [0, 1).
    pub fn random_map(&self) -> HeightMap {
        let mut map = self.blank();
        let mut rng = fastrand::Rng::with_seed(self.config.seed);
        for x in 0..self.config.width {
            for y in 0..self.config.depth {
                map.set(x, y, rng.f32());
            }
        }
        map
    }

    /// Single-layer gradient noise, Perlin or simplex.
    pub fn noise_map(&self, use_simplex: bool) -> HeightMap {
        let mut map = self.blank();
        for x in 0..self.config.width {
            for y in 0..self.config.depth {
                let sample_x = self.config.frequency * x as f32 / self.config.width as f32;
                let sample_y = self.config.frequency * y as f32 / self.config.depth as f32;
                let value = if use_simplex {
                    self.simplex01(sample_x, sample_y)
                } else {
                    self.perlin01(sample_x, sample_y)
                };
                map.set(x, y, value);
            }
        }
        map
    }

    /// Sum of noise layers of increasing frequency and decreasing
    /// amplitude, normalized by the maximum possible height. Each octave
    /// samples at a different offset so the layers do not align.
    pub fn perlin_octave_map(&self) -> HeightMap {
        let mut map = self.blank();
        let octaves = self.config.octaves.max(1);
        for x in 0..self.config.width {
            for y in 0..self.config.depth {
                let sample_x = x as f32 / self.config.width as f32;
                let sample_y = y as f32 / self.config.depth as f32;
                let mut amplitude = 1.0;
                let mut frequency = self.config.frequency;
                let mut sum = 0.0;
                let mut max_possible = 0.0;
                for i in 0..octaves {
                    let offset_x = self.config.offset_x + i as f32 * 100.0;
                    let offset_y = self.config.offset_y + i as f32 * 100.0;
                    let value =
                        self.perlin01(frequency * sample_x + offset_x, frequency * sample_y + offset_y);
                    sum += value * amplitude;
                    max_possible += amplitude;
                    amplitude *= self.config.amplitude_modifier;
                    frequency *= self.config.frequency_modifier;
                }
                map.set(x, y, sum / max_possible);
            }
        }
        map
    }

    fn perlin01(&self, x: f32, y: f32) -> f32 {
        let value = self.perlin.get([x as f64, y as f64]) as f32;
        (value + 1.0) / 2.0
    }

    fn simplex01(&self, x: f32, y: f32) -> f32 {
        let value = self.simplex.get([x as f64, y as f64]) as f32;
        (value + 1.0) / 2.0
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::TerrainConfig;

    fn config(map: MapKind) -> TerrainConfig {
        TerrainConfig {
            map,
            width: 32,
            depth: 24,
            ..Default::default()
        }
    }

    fn assert_normalized(map: &HeightMap) {
        assert!(map.iter().all(|h| (0.0..=1.0).contains(&h)));
    }

    #[test]
    fn flat_map_is_all_zero() {
        let map = TerrainGenerator::new(config(MapKind::Flat)).generate();
        assert_eq!(map.width(), 32);
        assert_eq!(map.depth(), 24);
        assert!(map.iter().all(|h| h == 0.0));
    }

    #[test]
    fn sloping_map_rises_toward_the_far_corner() {
        let map = TerrainGenerator::new(config(MapKind::Slope)).generate();
        assert_eq!(map.get(0, 0), 0.0);
        assert!(map.get(31, 23) > map.get(16, 12));
        assert!(map.get(16, 12) > map.get(0, 0));
        assert_normalized(&map);
    }

    #[test]
    fn random_map_is_deterministic_per_seed() {
        let a = TerrainGenerator::new(config(MapKind::Random)).generate();
        let b = TerrainGenerator::new(config(MapKind::Random)).generate();
        assert_eq!(a, b);
        assert_normalized(&a);

        let other = TerrainGenerator::new(TerrainConfig {
            seed: 11,
            ..config(MapKind::Random)
        })
        .generate();
        assert_ne!(a, other);
    }

    #[test]
    fn noise_maps_stay_normalized() {
        for kind in [MapKind::Perlin, MapKind::Simplex, MapKind::PerlinOctave] {
            let map = TerrainGenerator::new(config(kind)).generate();
            assert_normalized(&map);
            // Gradient noise over a 20x frequency span is not constant.
            let first = map.get(0, 0);
            assert!(map.iter().any(|h| (h - first).abs() > 1e-3));
        }
    }

    #[test]
    fn elevation_applies_vertical_scale() {
        let map = TerrainGenerator::new(config(MapKind::Slope)).generate();
        assert_eq!(map.elevation(31, 23), map.get(31, 23) * 20.0);
    }
}
