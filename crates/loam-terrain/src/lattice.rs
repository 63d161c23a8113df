//! Single-frequency lattice noise over a seeded table of 2D gradient vectors.
//!
//! Every integer lattice point hashes into a fixed-size lookup table that is
//! filled once at construction from an explicit seed. Sampling is a pure
//! function of the lattice coordinates, so the same field always produces the
//! same terrain.

use glam::Vec2;
use noise::NoiseFn;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::ease::ease_lerp;

/// Seed used when none is configured.
pub const DEFAULT_NOISE_SEED: u64 = 1230;

/// Number of gradient vectors in the lookup table when none is configured.
pub const DEFAULT_LOOKUP_SIZE: usize = 1024;

const ROW_HASH_PRIME: i64 = 41;
const COL_HASH_PRIME: i64 = 43;

/// Deterministic 2D value noise backed by a seeded gradient table.
#[derive(Clone, Debug)]
pub struct NoiseField {
    lookup: Vec<Vec2>,
    seed: u64,
}

impl NoiseField {
    /// Build the gradient table from `seed`.
    ///
    /// Each table entry has both components drawn uniformly from `[-1, 1]`.
    ///
    /// # Panics
    ///
    /// Panics if `lookup_size` is zero.
    pub fn new(seed: u64, lookup_size: usize) -> Self {
        assert!(lookup_size > 0, "noise lookup table must not be empty");

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let lookup = (0..lookup_size)
            .map(|_| {
                Vec2::new(
                    rng.random_range(-1.0..=1.0),
                    rng.random_range(-1.0..=1.0),
                )
            })
            .collect();

        Self { lookup, seed }
    }

    /// Returns the gradient vector assigned to lattice point `(row, col)`.
    ///
    /// Negative coordinates wrap into the table, so points just outside the
    /// grid (sampled when computing border normals) are still well defined.
    pub fn sample(&self, row: i32, col: i32) -> Vec2 {
        self.lattice_vector(i64::from(row), i64::from(col))
    }

    // Wrapping arithmetic keeps far-off or saturated corners in the table
    // instead of overflowing.
    fn lattice_vector(&self, row: i64, col: i64) -> Vec2 {
        let hashed = row
            .wrapping_mul(ROW_HASH_PRIME)
            .wrapping_add(col.wrapping_mul(COL_HASH_PRIME));
        let index = hashed.rem_euclid(self.lookup.len() as i64) as usize;
        self.lookup[index]
    }

    /// Evaluate the noise at an arbitrary point.
    ///
    /// Each of the four surrounding lattice corners contributes the dot
    /// product of its gradient with the corner-minus-point offset. The four
    /// values are blended along x, then along y, with an eased lerp.
    ///
    /// Any input is accepted. Points far outside the terrain give
    /// extrapolated values and non-finite inputs give NaN; neither panics.
    pub fn perlin(&self, x: f32, y: f32) -> f32 {
        let x0 = x.floor();
        let y0 = y.floor();
        let row = x0 as i64;
        let col = y0 as i64;

        let corner = |dr: i64, dc: i64| {
            let offset = Vec2::new(x0 + dr as f32 - x, y0 + dc as f32 - y);
            self.lattice_vector(row.wrapping_add(dr), col.wrapping_add(dc))
                .dot(offset)
        };

        let fx = x - x0;
        let fy = y - y0;
        let near = ease_lerp(corner(0, 0), corner(1, 0), fx);
        let far = ease_lerp(corner(0, 1), corner(1, 1), fx);
        ease_lerp(near, far, fy)
    }

    /// The seed the lookup table was built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of entries in the lookup table.
    pub fn lookup_size(&self) -> usize {
        self.lookup.len()
    }
}

impl NoiseFn<f64, 2> for NoiseField {
    fn get(&self, point: [f64; 2]) -> f64 {
        f64::from(self.perlin(point[0] as f32, point[1] as f32))
    }
}
