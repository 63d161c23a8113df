//! Tile partitioning of the height-field grid.
//!
//! The `resolution × resolution` cell grid is split into `tiles_per_side²`
//! square tiles. Tile `(tx, ty)` owns one contiguous run of the flattened
//! vertex buffer, so regenerating a tile rewrites exactly that run and the
//! renderer can re-upload just those bytes.

use std::collections::BTreeSet;
use std::ops::Range;

use crate::error::TerrainError;
use crate::vertex::{FLOATS_PER_VERTEX, VERTEX_STRIDE, VERTICES_PER_CELL};

/// Integer coordinate of a tile, each component in `[0, tiles_per_side)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileCoord {
    /// Tile column along the terrain x axis.
    pub x: u32,
    /// Tile row along the terrain y axis.
    pub y: u32,
}

impl TileCoord {
    /// Create a tile coordinate.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Maps between tile coordinates, normalized terrain positions, and buffer ranges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileLayout {
    resolution: u32,
    tiles_per_side: u32,
    tile_resolution: u32,
}

impl TileLayout {
    /// Create a layout, checking that the tiles partition the grid exactly.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::UnevenTiling`] when `resolution` is not a
    /// multiple of `tiles_per_side`, since every buffer offset would be wrong.
    pub fn new(resolution: u32, tiles_per_side: u32) -> Result<Self, TerrainError> {
        if resolution == 0 {
            return Err(TerrainError::ZeroResolution);
        }
        if tiles_per_side == 0 {
            return Err(TerrainError::ZeroTiles);
        }
        if resolution % tiles_per_side != 0 {
            return Err(TerrainError::UnevenTiling {
                resolution,
                tiles_per_side,
            });
        }
        Ok(Self {
            resolution,
            tiles_per_side,
            tile_resolution: resolution / tiles_per_side,
        })
    }

    /// Grid cells per side.
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Tiles per side.
    pub fn tiles_per_side(&self) -> u32 {
        self.tiles_per_side
    }

    /// Grid cells per tile side.
    pub fn tile_resolution(&self) -> u32 {
        self.tile_resolution
    }

    /// Total number of tiles.
    pub fn tile_count(&self) -> usize {
        (self.tiles_per_side as usize).pow(2)
    }

    /// Vertices emitted for one tile.
    pub fn vertices_per_tile(&self) -> usize {
        (self.tile_resolution as usize).pow(2) * VERTICES_PER_CELL
    }

    /// Vertices in the whole terrain buffer.
    pub fn total_vertices(&self) -> usize {
        (self.resolution as usize).pow(2) * VERTICES_PER_CELL
    }

    /// Floats in the whole terrain buffer.
    pub fn total_floats(&self) -> usize {
        self.total_vertices() * FLOATS_PER_VERTEX
    }

    /// Returns `true` if `coord` lies on the grid.
    pub fn contains(&self, coord: TileCoord) -> bool {
        coord.x < self.tiles_per_side && coord.y < self.tiles_per_side
    }

    /// Row-major tile index (`y * tiles_per_side + x`).
    pub fn tile_index(&self, coord: TileCoord) -> usize {
        coord.y as usize * self.tiles_per_side as usize + coord.x as usize
    }

    /// Inverse of [`TileLayout::tile_index`].
    pub fn tile_coords(&self, index: usize) -> TileCoord {
        let side = self.tiles_per_side as usize;
        TileCoord::new((index % side) as u32, (index / side) as u32)
    }

    /// Tile containing the normalized position `(x, y)`.
    ///
    /// Positions outside `[0, 1)` clamp to the border tiles.
    pub fn tile_coordinates(&self, x: f32, y: f32) -> TileCoord {
        TileCoord::new(self.axis_tile(x), self.axis_tile(y))
    }

    fn axis_tile(&self, v: f32) -> u32 {
        let max = i64::from(self.tiles_per_side) - 1;
        ((v * self.tiles_per_side as f32).floor() as i64).clamp(0, max) as u32
    }

    /// Every tile whose mesh can change when a divot of `radius` lands at `(x, y)`.
    ///
    /// The circle's bounding box is mapped to tiles and then grown by one
    /// tile on every side. Normals sample one cell beyond the edited area,
    /// so a tile bordering the box can still change; extra tiles only cost
    /// time, a missing one leaves a visible seam.
    pub fn affected_tiles(&self, x: f32, y: f32, radius: f32) -> BTreeSet<usize> {
        let min = self.tile_coordinates(x - radius, y - radius);
        let max = self.tile_coordinates(x + radius, y + radius);
        let last = self.tiles_per_side - 1;

        let min_x = min.x.saturating_sub(1);
        let min_y = min.y.saturating_sub(1);
        let max_x = (max.x + 1).min(last);
        let max_y = (max.y + 1).min(last);

        let mut tiles = BTreeSet::new();
        for ty in min_y..=max_y {
            for tx in min_x..=max_x {
                tiles.insert(self.tile_index(TileCoord::new(tx, ty)));
            }
        }
        tiles
    }

    /// Half-open vertex range of `coord` in the terrain buffer.
    pub fn tile_vertex_range(&self, coord: TileCoord) -> Range<usize> {
        let per_tile = self.vertices_per_tile();
        let start = self.tile_index(coord) * per_tile;
        start..start + per_tile
    }

    /// Half-open float range of `coord` in the flattened terrain buffer.
    pub fn tile_float_range(&self, coord: TileCoord) -> Range<usize> {
        let r = self.tile_vertex_range(coord);
        r.start * FLOATS_PER_VERTEX..r.end * FLOATS_PER_VERTEX
    }

    /// Half-open byte range of `coord` in the flattened terrain buffer.
    pub fn tile_byte_range(&self, coord: TileCoord) -> Range<usize> {
        let r = self.tile_vertex_range(coord);
        r.start * VERTEX_STRIDE..r.end * VERTEX_STRIDE
    }
}

/// Merge sorted ranges that touch or overlap.
///
/// Input must be sorted by `start`; tile ranges produced in tile-index order are.
pub fn coalesce_ranges(ranges: impl IntoIterator<Item = Range<usize>>) -> Vec<Range<usize>> {
    let mut merged: Vec<Range<usize>> = Vec::new();
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.start <= last.end => last.end = last.end.max(range.end),
            _ => merged.push(range),
        }
    }
    merged
}
