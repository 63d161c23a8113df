//! Height-field configuration errors.

/// Errors raised when a height field is configured inconsistently.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TerrainError {
    /// The grid must have at least one cell per side.
    #[error("terrain resolution must be positive")]
    ZeroResolution,

    /// The grid must be split into at least one tile per side.
    #[error("tiles per side must be positive")]
    ZeroTiles,

    /// Tiles must partition the grid exactly.
    #[error("resolution {resolution} is not divisible by {tiles_per_side} tiles per side")]
    UnevenTiling {
        /// Grid cells per side.
        resolution: u32,
        /// Requested tiles per side.
        tiles_per_side: u32,
    },

    /// The noise gradient table needs at least one entry.
    #[error("noise lookup table must not be empty")]
    EmptyLookup,

    /// The noise scale multiplies and divides every sample.
    #[error("noise scale must be positive and finite, got {0}")]
    InvalidNoiseScale(f32),
}
