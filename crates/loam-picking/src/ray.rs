//! World-space rays and their reconstruction from a pointer position.

use glam::{Mat4, Vec2, Vec3, Vec4};

/// A half-line in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// Start of the ray.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray. `direction` is normalized.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Point at parameter `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Build the world-space ray under a pointer.
///
/// `pointer` is in pixels with the origin at the top-left of a viewport of
/// `viewport` pixels. The pointer is mapped to normalized device
/// coordinates, un-projected onto the near plane through `proj⁻¹`, turned
/// into an eye-space direction, and carried to world space through `view⁻¹`.
/// The ray starts at the camera position, the translation column of `view⁻¹`.
///
/// Returns `None` for an empty viewport or a singular matrix.
pub fn screen_ray(pointer: Vec2, viewport: Vec2, proj: &Mat4, view: &Mat4) -> Option<Ray> {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return None;
    }

    let ndc_x = 2.0 * pointer.x / viewport.x - 1.0;
    let ndc_y = 1.0 - 2.0 * pointer.y / viewport.y;

    let clip = Vec4::new(ndc_x, ndc_y, -1.0, 1.0);
    let eye = proj.inverse() * clip;
    let eye = Vec4::new(eye.x, eye.y, -1.0, 0.0);

    let inv_view = view.inverse();
    let direction = (inv_view * eye).truncate();
    let origin = inv_view.w_axis.truncate();

    let direction = direction.try_normalize()?;
    origin.is_finite().then_some(Ray { origin, direction })
}
