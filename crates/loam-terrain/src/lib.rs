//! Procedural terrain height field: lattice noise, sculpted divots, and a
//! tiled vertex buffer that regenerates only the tiles an edit touches.

mod ease;
mod error;
mod height_field;
mod lattice;
mod ledger;
mod sculpt;
mod tiles;
mod vertex;

pub use ease::{ease_lerp, smoothstep};
pub use error::TerrainError;
pub use height_field::{HeightField, HeightFieldParams, vertex_color};
pub use lattice::{DEFAULT_LOOKUP_SIZE, DEFAULT_NOISE_SEED, NoiseField};
pub use ledger::{DisplacementLedger, Divot};
pub use sculpt::{BrushProfile, BrushStamp, SculptOutcome};
pub use tiles::{TileCoord, TileLayout, coalesce_ranges};
pub use vertex::{
    FLOATS_PER_CELL, FLOATS_PER_VERTEX, TerrainVertex, VERTEX_STRIDE, VERTICES_PER_CELL, as_bytes,
    as_floats,
};
