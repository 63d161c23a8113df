//! Pointer picking against the terrain mesh: screen-ray reconstruction and
//! Möller–Trumbore ray/triangle intersection.

mod intersect;
mod mesh;
mod ray;

pub use intersect::{INTERSECT_EPSILON, intersect_triangle};
pub use mesh::{MeshHit, pick_terrain, raycast_mesh, to_terrain_local};
pub use ray::{Ray, screen_ray};
