//! Procedural terrain presets for the flood grid.
//!
//! Each preset produces a raw float field which is normalised into integer
//! levels `0..=levels`. An optional cave pass punches impassable holes using a
//! second fBm noise field. All presets are deterministic for a given seed.

use std::f32::consts::TAU;

use fastnoise_lite::{FastNoiseLite, FractalType, NoiseType};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::{CAVE_THRESHOLD, DEFAULT_SEED, TERRAIN_LEVELS};
use crate::grid::GridShape;
use crate::terrain::TerrainModel;

const PERLIN_OCTAVES: i32 = 8;
const PERLIN_FREQUENCY: f32 = 0.03;
const CAVE_FREQUENCY: f32 = 0.08;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TerrainPreset {
    /// Every cell at level 0.
    Flat,
    /// Multi-octave Perlin hills.
    #[default]
    Perlin,
    /// Sinusoidal ridges with a slope across the map.
    Bumps,
    /// A slope with a deep pit in the middle.
    Well,
    /// Low noise crossed by ridges, trenches and a walled square.
    Walls,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainSettings {
    pub preset: TerrainPreset,
    /// Highest level after normalisation.
    pub levels: u32,
    /// Cells whose cave noise (normalised to [0, 1]) falls below this value
    /// become impassable. 0 disables caves.
    pub cave_threshold: f32,
    pub seed: u64,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            preset: TerrainPreset::default(),
            levels: TERRAIN_LEVELS,
            cave_threshold: CAVE_THRESHOLD,
            seed: DEFAULT_SEED,
        }
    }
}

pub fn generate_terrain(shape: GridShape, settings: &TerrainSettings) -> TerrainModel {
    let raw = match settings.preset {
        TerrainPreset::Flat => vec![0.0; shape.len()],
        TerrainPreset::Perlin => perlin_field(shape, settings.seed),
        TerrainPreset::Bumps => bumps_field(shape, settings.seed),
        TerrainPreset::Well => well_field(shape, settings.seed),
        TerrainPreset::Walls => walls_field(shape, settings.seed),
    };
    let mut levels: Vec<Option<u32>> = quantize(&raw, settings.levels)
        .into_iter()
        .map(Some)
        .collect();

    if settings.cave_threshold > 0.0 {
        let caves = cave_field(shape, settings.seed);
        for (level, cave) in levels.iter_mut().zip(caves) {
            if cave < settings.cave_threshold {
                *level = None;
            }
        }
    }

    TerrainModel::new(shape, levels)
}

/// Map a float field onto integer levels `0..=levels`.
fn quantize(raw: &[f32], levels: u32) -> Vec<u32> {
    let min = raw.iter().copied().fold(f32::INFINITY, f32::min);
    let max = raw.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let range = max - min;
    if !range.is_finite() || range <= 0.0 {
        return vec![0; raw.len()];
    }
    raw.iter()
        .map(|&v| (((v - min) / range) * levels as f32).floor() as u32)
        .collect()
}

/// Sample position along each axis in `[0, TAU]`.
fn axis(i: usize, n: usize) -> f32 {
    if n < 2 {
        return 0.0;
    }
    i as f32 / (n - 1) as f32 * TAU
}

fn fbm(seed: u64, frequency: f32) -> FastNoiseLite {
    let mut noise = FastNoiseLite::with_seed(seed as i32);
    noise.set_noise_type(Some(NoiseType::Perlin));
    noise.set_frequency(Some(frequency));
    noise.set_fractal_type(Some(FractalType::FBm));
    noise.set_fractal_octaves(Some(PERLIN_OCTAVES));
    noise
}

fn perlin_field(shape: GridShape, seed: u64) -> Vec<f32> {
    let noise = fbm(seed, PERLIN_FREQUENCY);
    shape
        .coords()
        .map(|c| noise.get_noise_2d(c.x as f32, c.y as f32))
        .collect()
}

fn bumps_field(shape: GridShape, seed: u64) -> Vec<f32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    shape
        .coords()
        .map(|c| {
            let bx = axis(c.x, shape.width);
            let by = axis(c.y, shape.height);
            bx * (2.0 * bx).sin() - by + (1.5 * by).cos() * 3.0 + rng.gen::<f32>() * 3.0
        })
        .collect()
}

fn well_field(shape: GridShape, seed: u64) -> Vec<f32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut field: Vec<f32> = shape
        .coords()
        .map(|c| {
            let bx = axis(c.x, shape.width);
            let by = axis(c.y, shape.height);
            bx * bx.sin() - by * 3.0 + rng.gen::<f32>() * 3.0
        })
        .collect();

    let floor = field.iter().copied().fold(f32::INFINITY, f32::min) - 2.0;
    let (ex, ey) = (shape.width / 8, shape.height / 8);
    for c in shape.coords() {
        if (3 * ex..5 * ex).contains(&c.x) && (3 * ey..5 * ey).contains(&c.y) {
            field[shape.index(c)] = floor;
        }
    }
    field
}

fn walls_field(shape: GridShape, seed: u64) -> Vec<f32> {
    let noise = fbm(seed, PERLIN_FREQUENCY);
    let (ex, ey) = (shape.width / 8, shape.height / 8);
    shape
        .coords()
        .map(|c| {
            let (x, y) = (c.x, c.y);
            let in_square_x = (3 * ex..=5 * ex).contains(&x);
            let in_square_y = (3 * ey..=5 * ey).contains(&y);
            if x == 4 * ex || y == 4 * ey {
                4.0
            } else if x == ex || y == ey {
                -1.0
            } else if ((x == 3 * ex || x == 5 * ex) && in_square_y)
                || ((y == 3 * ey || y == 5 * ey) && in_square_x)
            {
                5.0
            } else {
                noise.get_noise_2d(x as f32, y as f32) * 4.0
            }
        })
        .collect()
}

/// Cave noise normalised to roughly `[0, 1]`.
fn cave_field(shape: GridShape, seed: u64) -> Vec<f32> {
    let noise = fbm(seed.wrapping_add(1), CAVE_FREQUENCY);
    shape
        .coords()
        .map(|c| (noise.get_noise_2d(c.x as f32, c.y as f32) + 1.0) * 0.5)
        .collect()
}
