//! Cubic ease curves shared by noise interpolation, divot falloff, and vertex tinting.

/// The cubic Hermite ease `3t² - 2t³`.
///
/// Not clamped: callers pass `t` in `[0, 1]` where the curve has zero slope
/// at both ends.
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    3.0 * t * t - 2.0 * t * t * t
}

/// Interpolate from `a` to `b`, shaping `alpha` through [`smoothstep`] first.
#[inline]
pub fn ease_lerp(a: f32, b: f32, alpha: f32) -> f32 {
    a + smoothstep(alpha) * (b - a)
}
