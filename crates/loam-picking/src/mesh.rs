//! Nearest-hit ray casting over the terrain vertex buffer.

use glam::{Mat4, Vec2, Vec3};
use loam_terrain::TerrainVertex;
use tracing::trace;

use crate::intersect::intersect_triangle;
use crate::ray::{Ray, screen_ray};

/// The closest triangle hit by a ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshHit {
    /// Distance along the ray.
    pub t: f32,
    /// World-space hit point.
    pub point: Vec3,
    /// Index of the triangle in the vertex buffer (vertex index / 3).
    pub triangle: usize,
}

/// Cast `ray` against every triangle of `mesh` placed in the world by `world`.
///
/// `mesh` is a flat triangle list, three vertices per triangle, as produced
/// by [`loam_terrain::HeightField::vertices`]. Returns the hit with the
/// smallest positive distance, or `None` if no triangle is hit.
pub fn raycast_mesh(ray: &Ray, mesh: &[TerrainVertex], world: &Mat4) -> Option<MeshHit> {
    let mut nearest: Option<MeshHit> = None;

    for (triangle, verts) in mesh.chunks_exact(3).enumerate() {
        let v0 = world.transform_point3(verts[0].position());
        let v1 = world.transform_point3(verts[1].position());
        let v2 = world.transform_point3(verts[2].position());

        if let Some(t) = intersect_triangle(ray, v0, v1, v2)
            && nearest.is_none_or(|best| t < best.t)
        {
            nearest = Some(MeshHit {
                t,
                point: ray.at(t),
                triangle,
            });
        }
    }

    nearest
}

/// World-space terrain point under the pointer, if any.
///
/// Combines [`screen_ray`] and [`raycast_mesh`]; stateless, so the same
/// inputs always give the same answer.
pub fn pick_terrain(
    pointer: Vec2,
    viewport: Vec2,
    proj: &Mat4,
    view: &Mat4,
    mesh: &[TerrainVertex],
    world: &Mat4,
) -> Option<Vec3> {
    let ray = screen_ray(pointer, viewport, proj, view)?;
    let hit = raycast_mesh(&ray, mesh, world);
    trace!(
        px = pointer.x,
        py = pointer.y,
        hit = hit.is_some(),
        "terrain pick"
    );
    hit.map(|h| h.point)
}

/// Map a world-space point back into normalized terrain coordinates.
///
/// Applies the inverse of `world` and clamps x and y to `[0, 1]`, ready for
/// [`loam_terrain::HeightField::sculpt`].
pub fn to_terrain_local(point: Vec3, world: &Mat4) -> Vec2 {
    let local = world.inverse().transform_point3(point);
    Vec2::new(local.x.clamp(0.0, 1.0), local.y.clamp(0.0, 1.0))
}
