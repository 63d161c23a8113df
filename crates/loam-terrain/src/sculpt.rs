//! Brush-driven sculpting: stamp divots around a hit point and regenerate
//! only the tiles they touch.

use std::collections::BTreeSet;
use std::ops::Range;

use tracing::debug;

use crate::height_field::HeightField;

/// One crater stamped by a brush, relative to the hit point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BrushStamp {
    /// Offset from the hit point in normalized terrain units.
    pub offset: [f32; 2],
    /// Multiplier on the brush depth.
    pub depth_scale: f32,
    /// Multiplier on the brush radius.
    pub radius_scale: f32,
}

impl BrushStamp {
    /// Create a stamp.
    pub const fn new(offset: [f32; 2], depth_scale: f32, radius_scale: f32) -> Self {
        Self {
            offset,
            depth_scale,
            radius_scale,
        }
    }
}

/// Shape of a sculpting brush.
///
/// Several overlapping stamps give a wider, less perfectly round depression
/// than a single divot.
#[derive(Clone, Debug, PartialEq)]
pub struct BrushProfile {
    /// Depth of a unit stamp.
    pub depth: f32,
    /// Radius of a unit stamp.
    pub radius: f32,
    /// Craters applied per stroke.
    pub stamps: Vec<BrushStamp>,
    /// Radius multiplier for the extra tile-collection pass around the hit
    /// point. Must cover every stamp's footprint.
    pub wide_radius_factor: f32,
}

impl Default for BrushProfile {
    fn default() -> Self {
        Self {
            depth: 0.02,
            radius: 0.05,
            stamps: vec![
                BrushStamp::new([0.0, 0.0], 1.0, 1.0),
                BrushStamp::new([0.02, 0.0], 0.6, 0.7),
                BrushStamp::new([-0.01, 0.017], 0.6, 0.7),
                BrushStamp::new([-0.01, -0.017], 0.6, 0.7),
            ],
            wide_radius_factor: 2.0,
        }
    }
}

impl BrushProfile {
    /// A brush that stamps one divot.
    pub fn single(depth: f32, radius: f32) -> Self {
        Self {
            depth,
            radius,
            stamps: vec![BrushStamp::new([0.0, 0.0], 1.0, 1.0)],
            wide_radius_factor: 1.0,
        }
    }
}

/// What a sculpt stroke changed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SculptOutcome {
    /// Indices of every regenerated tile.
    pub dirty_tiles: BTreeSet<usize>,
    /// Byte ranges of the vertex buffer to re-upload, merged and sorted.
    pub upload_ranges: Vec<Range<usize>>,
    /// Number of divots appended to the ledger.
    pub divots_added: usize,
}

impl SculptOutcome {
    /// Total bytes that need uploading.
    pub fn upload_bytes(&self) -> usize {
        self.upload_ranges.iter().map(|r| r.len()).sum()
    }
}

impl HeightField {
    /// Apply `brush` at the normalized hit point `(x, y)`.
    ///
    /// Appends one divot per stamp, collects every tile touched by any stamp
    /// plus a wide pass around the hit point, and regenerates only those.
    pub fn sculpt(&mut self, x: f32, y: f32, brush: &BrushProfile) -> SculptOutcome {
        let mut dirty = BTreeSet::new();

        for stamp in &brush.stamps {
            let sx = x + stamp.offset[0];
            let sy = y + stamp.offset[1];
            let radius = brush.radius * stamp.radius_scale;
            self.divot(sx, sy, brush.depth * stamp.depth_scale, radius);
            dirty.extend(self.affected_tiles(sx, sy, radius));
        }
        dirty.extend(self.affected_tiles(x, y, brush.radius * brush.wide_radius_factor));

        let upload_ranges = self.update_tiles(dirty.iter().copied());
        debug!(
            x,
            y,
            stamps = brush.stamps.len(),
            tiles = dirty.len(),
            "sculpted terrain"
        );

        SculptOutcome {
            dirty_tiles: dirty,
            upload_ranges,
            divots_added: brush.stamps.len(),
        }
    }
}
