//! Interleaved vertex record shared by mesh synthesis and the upload path.

/// One terrain mesh vertex, laid out as nine consecutive `f32`s.
///
/// Layout (36 bytes total):
///   - `[0..12]`  position `[f32; 3]` in terrain space (x, y in `[0, 1]`, z = height)
///   - `[12..24]` normal `[f32; 3]`, unit length
///   - `[24..36]` color `[f32; 3]`, linear RGB in `[0, 1]`
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TerrainVertex {
    /// Terrain-space position.
    pub position: [f32; 3],
    /// Smoothed surface normal.
    pub normal: [f32; 3],
    /// Height- and slope-tinted color.
    pub color: [f32; 3],
}

static_assertions::assert_eq_size!(TerrainVertex, [f32; FLOATS_PER_VERTEX]);

/// Floats per interleaved vertex.
pub const FLOATS_PER_VERTEX: usize = 9;

/// Two triangles per grid cell.
pub const VERTICES_PER_CELL: usize = 6;

/// Floats emitted for every grid cell.
pub const FLOATS_PER_CELL: usize = FLOATS_PER_VERTEX * VERTICES_PER_CELL;

/// Bytes per interleaved vertex.
pub const VERTEX_STRIDE: usize = std::mem::size_of::<TerrainVertex>();

impl TerrainVertex {
    /// Assemble a vertex from glam vectors.
    pub fn new(position: glam::Vec3, normal: glam::Vec3, color: glam::Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            color: color.to_array(),
        }
    }

    /// Position as a glam vector.
    pub fn position(&self) -> glam::Vec3 {
        glam::Vec3::from_array(self.position)
    }

    /// Normal as a glam vector.
    pub fn normal(&self) -> glam::Vec3 {
        glam::Vec3::from_array(self.normal)
    }
}

/// View a vertex slice as the flat float buffer consumed by the renderer.
pub fn as_floats(vertices: &[TerrainVertex]) -> &[f32] {
    bytemuck::cast_slice(vertices)
}

/// View a vertex slice as raw bytes for GPU upload.
pub fn as_bytes(vertices: &[TerrainVertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_stride_is_nine_floats() {
        assert_eq!(VERTEX_STRIDE, 36);
        assert_eq!(FLOATS_PER_CELL, 54);
    }

    #[test]
    fn test_float_view_is_interleaved() {
        let verts = [
            TerrainVertex::new(Vec3::new(1.0, 2.0, 3.0), Vec3::Z, Vec3::splat(0.5)),
            TerrainVertex::new(Vec3::new(4.0, 5.0, 6.0), Vec3::X, Vec3::ONE),
        ];
        let floats = as_floats(&verts);
        assert_eq!(floats.len(), 18);
        assert_eq!(&floats[0..3], &[1.0, 2.0, 3.0]);
        assert_eq!(&floats[3..6], &[0.0, 0.0, 1.0]);
        assert_eq!(&floats[6..9], &[0.5, 0.5, 0.5]);
        assert_eq!(&floats[9..12], &[4.0, 5.0, 6.0]);
        assert_eq!(as_bytes(&verts).len(), 72);
    }

    #[test]
    fn test_accessors_round_trip_glam() {
        let v = TerrainVertex::new(Vec3::new(0.1, 0.2, 0.3), Vec3::Y, Vec3::ZERO);
        assert_eq!(v.position(), Vec3::new(0.1, 0.2, 0.3));
        assert_eq!(v.normal(), Vec3::Y);
    }
}
