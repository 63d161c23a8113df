//! Tiled height-field mesh built from lattice noise plus sculpted divots.
//!
//! [`HeightField`] owns the interleaved vertex buffer consumed by the
//! renderer. A cold start fills the whole buffer; after an edit only the
//! tiles around the edit are re-sampled and written back in place.

use std::collections::BTreeSet;
use std::ops::Range;

use glam::Vec3;
use tracing::{debug, trace};

use crate::ease::{ease_lerp, smoothstep};
use crate::error::TerrainError;
use crate::lattice::{DEFAULT_LOOKUP_SIZE, DEFAULT_NOISE_SEED, NoiseField};
use crate::ledger::DisplacementLedger;
use crate::tiles::{TileCoord, TileLayout, coalesce_ranges};
use crate::vertex::{self, TerrainVertex, VERTEX_STRIDE};

/// Base color of low terrain before height and slope tinting.
const SAND: Vec3 = Vec3::new(0.95, 0.9, 0.6);

/// Ring of neighbour offsets walked when averaging face normals.
const NORMAL_RING: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
];

/// Construction parameters for a [`HeightField`].
#[derive(Clone, Debug, PartialEq)]
pub struct HeightFieldParams {
    /// Grid cells per side. Default: 100.
    pub resolution: u32,
    /// Tiles per side; must divide `resolution`. Default: 10.
    pub tiles_per_side: u32,
    /// Seed for the noise gradient table. Default: 1230.
    pub seed: u64,
    /// Entries in the noise gradient table. Default: 1024.
    pub lookup_size: usize,
    /// Noise frequency multiplier, also used as the amplitude divisor so the
    /// two stay in step. Default: 512.
    pub noise_scale: f32,
}

impl Default for HeightFieldParams {
    fn default() -> Self {
        Self {
            resolution: 100,
            tiles_per_side: 10,
            seed: DEFAULT_NOISE_SEED,
            lookup_size: DEFAULT_LOOKUP_SIZE,
            noise_scale: 512.0,
        }
    }
}

/// A sculptable terrain height field and its tiled vertex buffer.
pub struct HeightField {
    params: HeightFieldParams,
    layout: TileLayout,
    noise: NoiseField,
    ledger: DisplacementLedger,
    vertices: Vec<TerrainVertex>,
}

impl HeightField {
    /// Create a height field, validating the parameters.
    ///
    /// The vertex buffer is allocated at full size but zeroed until
    /// [`HeightField::generate_terrain`] runs.
    ///
    /// # Errors
    ///
    /// Returns a [`TerrainError`] for an empty grid, uneven tiling, an empty
    /// lookup table, or a non-positive noise scale.
    pub fn try_new(params: HeightFieldParams) -> Result<Self, TerrainError> {
        let layout = TileLayout::new(params.resolution, params.tiles_per_side)?;
        if params.lookup_size == 0 {
            return Err(TerrainError::EmptyLookup);
        }
        if !(params.noise_scale > 0.0 && params.noise_scale.is_finite()) {
            return Err(TerrainError::InvalidNoiseScale(params.noise_scale));
        }

        let noise = NoiseField::new(params.seed, params.lookup_size);
        let vertices = vec![TerrainVertex::default(); layout.total_vertices()];

        Ok(Self {
            params,
            layout,
            noise,
            ledger: DisplacementLedger::new(),
            vertices,
        })
    }

    /// Create a height field.
    ///
    /// # Panics
    ///
    /// Panics on any configuration error reported by [`HeightField::try_new`].
    pub fn new(params: HeightFieldParams) -> Self {
        match Self::try_new(params) {
            Ok(field) => field,
            Err(e) => panic!("invalid height field configuration: {e}"),
        }
    }

    /// The parameters this field was built with.
    pub fn params(&self) -> &HeightFieldParams {
        &self.params
    }

    /// Tile partitioning of the grid.
    pub fn layout(&self) -> &TileLayout {
        &self.layout
    }

    /// The underlying noise field.
    pub fn noise(&self) -> &NoiseField {
        &self.noise
    }

    /// Every divot applied so far.
    pub fn ledger(&self) -> &DisplacementLedger {
        &self.ledger
    }

    // -----------------------------------------------------------------------
    // Height queries
    // -----------------------------------------------------------------------

    /// Terrain height at the normalized position `(x, y)`.
    ///
    /// Callers should clamp `x` and `y` to `[0, 1]`; values outside are not
    /// rejected and yield extrapolated noise.
    pub fn height(&self, x: f32, y: f32) -> f32 {
        let scale = self.params.noise_scale;
        self.noise.perlin(x * scale, y * scale) / scale + self.height_modification(x, y)
    }

    /// Total sculpted offset at `(x, y)`.
    pub fn height_modification(&self, x: f32, y: f32) -> f32 {
        self.ledger.height_modification(x, y)
    }

    /// Clamp `(x, y)` into the terrain and return the surface point there.
    ///
    /// Intended for placing props on the terrain. The result changes after
    /// every sculpt, so callers should query again instead of caching it.
    pub fn surface_point(&self, x: f32, y: f32) -> Vec3 {
        let x = x.clamp(0.0, 1.0);
        let y = y.clamp(0.0, 1.0);
        Vec3::new(x, y, self.height(x, y))
    }

    /// Record a divot. The vertex buffer is not touched until the affected
    /// tiles are regenerated.
    pub fn divot(&mut self, x: f32, y: f32, depth: f32, radius: f32) {
        self.ledger.divot(x, y, depth, radius);
    }

    // -----------------------------------------------------------------------
    // Per-vertex attributes
    // -----------------------------------------------------------------------

    /// Terrain-space position of grid vertex `(row, col)`.
    ///
    /// Rows and columns may lie one step outside the grid; normals at the
    /// border sample there.
    pub fn position(&self, row: i32, col: i32) -> Vec3 {
        let resolution = self.params.resolution as f32;
        let x = row as f32 / resolution;
        let y = col as f32 / resolution;
        Vec3::new(x, y, self.height(x, y))
    }

    /// Smoothed normal at grid vertex `(row, col)`.
    ///
    /// Sums the cross products of consecutive edges to the eight surrounding
    /// vertices, then normalizes.
    pub fn normal(&self, row: i32, col: i32) -> Vec3 {
        let center = self.position(row, col);
        let ring = NORMAL_RING.map(|(dr, dc)| self.position(row + dr, col + dc) - center);

        let mut sum = Vec3::ZERO;
        for i in 0..ring.len() {
            sum += ring[i].cross(ring[(i + 1) % ring.len()]);
        }
        sum.normalize()
    }

    fn vertex(&self, row: i32, col: i32) -> TerrainVertex {
        let position = self.position(row, col);
        let normal = self.normal(row, col);
        TerrainVertex::new(position, normal, vertex_color(normal, position))
    }

    // -----------------------------------------------------------------------
    // Mesh synthesis
    // -----------------------------------------------------------------------

    /// Synthesize the vertices of one tile.
    ///
    /// Each cell emits triangles `(p1, p2, p3)` and `(p1, p3, p4)` with
    /// `p1..p4 = (r, c), (r + 1, c), (r + 1, c + 1), (r, c + 1)`. Cells are
    /// visited with the x axis outermost.
    ///
    /// # Panics
    ///
    /// Panics if `coord` lies outside the tile grid.
    pub fn generate_tile(&self, coord: TileCoord) -> Vec<TerrainVertex> {
        assert!(
            self.layout.contains(coord),
            "tile {coord:?} outside {0}x{0} tile grid",
            self.layout.tiles_per_side()
        );

        let tr = self.layout.tile_resolution() as i32;
        let start_row = coord.x as i32 * tr;
        let start_col = coord.y as i32 * tr;

        let mut verts = Vec::with_capacity(self.layout.vertices_per_tile());
        for row in start_row..start_row + tr {
            for col in start_col..start_col + tr {
                let v1 = self.vertex(row, col);
                let v2 = self.vertex(row + 1, col);
                let v3 = self.vertex(row + 1, col + 1);
                let v4 = self.vertex(row, col + 1);

                verts.extend_from_slice(&[v1, v2, v3, v1, v3, v4]);
            }
        }
        verts
    }

    /// Synthesize the full vertex buffer without touching the stored one.
    ///
    /// Tiles are concatenated in tile-index order, which defines the
    /// canonical buffer layout.
    pub fn build_terrain(&self) -> Vec<TerrainVertex> {
        let mut verts = Vec::with_capacity(self.layout.total_vertices());
        for index in 0..self.layout.tile_count() {
            verts.extend(self.generate_tile(self.layout.tile_coords(index)));
        }
        verts
    }

    /// Regenerate the entire stored buffer and return it as floats.
    pub fn generate_terrain(&mut self) -> &[f32] {
        self.vertices = self.build_terrain();
        debug!(
            tiles = self.layout.tile_count(),
            vertices = self.vertices.len(),
            divots = self.ledger.len(),
            "generated terrain"
        );
        vertex::as_floats(&self.vertices)
    }

    // -----------------------------------------------------------------------
    // Tile cache
    // -----------------------------------------------------------------------

    /// Tile containing the normalized position `(x, y)`.
    pub fn tile_coordinates(&self, x: f32, y: f32) -> TileCoord {
        self.layout.tile_coordinates(x, y)
    }

    /// Indices of every tile a divot of `radius` at `(x, y)` can change.
    pub fn affected_tiles(&self, x: f32, y: f32, radius: f32) -> BTreeSet<usize> {
        self.layout.affected_tiles(x, y, radius)
    }

    /// Regenerate one tile in the stored buffer.
    ///
    /// Returns the byte range that changed, for a partial GPU upload.
    ///
    /// # Panics
    ///
    /// Panics if `coord` lies outside the tile grid.
    pub fn update_tile(&mut self, coord: TileCoord) -> Range<usize> {
        let tile = self.generate_tile(coord);
        let range = self.layout.tile_vertex_range(coord);
        self.vertices[range.clone()].copy_from_slice(&tile);
        trace!(x = coord.x, y = coord.y, "regenerated tile");
        range.start * VERTEX_STRIDE..range.end * VERTEX_STRIDE
    }

    /// Regenerate one tile into a caller-owned float buffer.
    ///
    /// # Panics
    ///
    /// Panics if `coord` lies outside the tile grid or `buffer` is shorter
    /// than the full terrain buffer.
    pub fn update_tile_into(&self, coord: TileCoord, buffer: &mut [f32]) {
        let tile = self.generate_tile(coord);
        let range = self.layout.tile_float_range(coord);
        buffer[range].copy_from_slice(vertex::as_floats(&tile));
    }

    /// Regenerate a set of tiles by index.
    ///
    /// Duplicate indices are regenerated once. Returns the changed byte
    /// ranges in buffer order with adjacent tiles merged.
    ///
    /// # Panics
    ///
    /// Panics if any index is not below [`TileLayout::tile_count`]. Tiles
    /// with smaller indices have already been rewritten by then.
    pub fn update_tiles(&mut self, indices: impl IntoIterator<Item = usize>) -> Vec<Range<usize>> {
        let unique: BTreeSet<usize> = indices.into_iter().collect();
        let ranges: Vec<Range<usize>> = unique
            .into_iter()
            .map(|index| self.update_tile(self.layout.tile_coords(index)))
            .collect();
        coalesce_ranges(ranges)
    }

    // -----------------------------------------------------------------------
    // Buffer access
    // -----------------------------------------------------------------------

    /// The stored vertex buffer.
    pub fn vertices(&self) -> &[TerrainVertex] {
        &self.vertices
    }

    /// The stored vertex buffer as interleaved floats.
    pub fn as_floats(&self) -> &[f32] {
        vertex::as_floats(&self.vertices)
    }

    /// The stored vertex buffer as bytes.
    pub fn as_bytes(&self) -> &[u8] {
        vertex::as_bytes(&self.vertices)
    }
}

/// Vertex color from height and slope.
///
/// Low ground starts as sand and eases toward white with height; the result
/// is then blended toward snow white as the surface tilts away from `+Z`.
pub fn vertex_color(normal: Vec3, position: Vec3) -> Vec3 {
    let a = ((position.z + 0.5) / (0.5 + 0.5)).clamp(0.0, 1.0);
    let ease = smoothstep(a);
    let tint = Vec3::new(
        ease_lerp(SAND.x, ease, ease),
        ease_lerp(SAND.y, ease, ease),
        ease_lerp(SAND.z, ease, ease),
    );

    let ease = smoothstep(normal.dot(Vec3::Z));
    Vec3::new(
        ease_lerp(1.0, tint.x, ease),
        ease_lerp(1.0, tint.y, ease),
        ease_lerp(1.0, tint.z, ease),
    )
}
