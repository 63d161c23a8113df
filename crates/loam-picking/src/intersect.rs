//! Möller–Trumbore ray/triangle intersection.

use glam::Vec3;

use crate::ray::Ray;

/// Tolerance for parallel rays and for hits at the ray origin.
pub const INTERSECT_EPSILON: f32 = 1e-7;

/// Distance along `ray` to triangle `(v0, v1, v2)`, if it is hit in front of
/// the origin.
///
/// Rays parallel to the triangle plane and degenerate triangles never hit.
pub fn intersect_triangle(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);

    if a.abs() < INTERSECT_EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    (t > INTERSECT_EPSILON).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down_ray() -> Ray {
        Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z)
    }

    #[test]
    fn test_hit_straight_down() {
        let ray = down_ray();
        let t = intersect_triangle(
            &ray,
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        )
        .expect("ray through the triangle must hit");
        assert_eq!(t, 5.0);
        assert_eq!(ray.at(t), Vec3::ZERO);
    }

    #[test]
    fn test_miss_triangle_to_the_side() {
        let hit = intersect_triangle(
            &down_ray(),
            Vec3::new(1.5, -1.0, 0.0),
            Vec3::new(3.0, -1.0, 0.0),
            Vec3::new(2.0, 1.0, 0.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_back_facing_triangle_still_hits() {
        let hit = intersect_triangle(
            &down_ray(),
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
        );
        assert_eq!(hit, Some(5.0));
    }

    #[test]
    fn test_parallel_ray_rejected() {
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::X);
        let hit = intersect_triangle(
            &ray,
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_triangle_behind_origin_rejected() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::NEG_Z);
        let hit = intersect_triangle(
            &ray,
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_degenerate_triangle_rejected() {
        let p = Vec3::new(0.0, 0.0, 0.0);
        let hit = intersect_triangle(&down_ray(), p, p, Vec3::new(1.0, 0.0, 0.0));
        assert!(hit.is_none());
    }
}
