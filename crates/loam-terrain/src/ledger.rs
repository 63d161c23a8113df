//! Append-only record of sculpting edits.
//!
//! Each [`Divot`] lowers the terrain around its center with a smoothstep
//! falloff. Contributions from overlapping divots add up without clamping, so
//! repeated strokes keep carving deeper.

use crate::ease::smoothstep;

/// A radial depression in normalized terrain space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Divot {
    /// Center along the terrain x axis, in `[0, 1)`.
    pub center_x: f32,
    /// Center along the terrain y axis, in `[0, 1)`.
    pub center_y: f32,
    /// Height removed at the center.
    pub depth: f32,
    /// Distance from the center at which the divot has no effect.
    pub radius: f32,
}

impl Divot {
    /// Create a divot record.
    pub fn new(center_x: f32, center_y: f32, depth: f32, radius: f32) -> Self {
        Self {
            center_x,
            center_y,
            depth,
            radius,
        }
    }

    /// Height offset this divot applies at `(x, y)`.
    ///
    /// Equals `-depth` at the center and rises to zero at `radius`.
    pub fn contribution(&self, x: f32, y: f32) -> f32 {
        let dx = x - self.center_x;
        let dy = y - self.center_y;
        let distance = libm::sqrtf(dx * dx + dy * dy);

        if distance < self.radius {
            let falloff = 1.0 - smoothstep(distance / self.radius);
            -self.depth * falloff
        } else {
            0.0
        }
    }
}

/// Chronological list of every divot applied to a height field.
#[derive(Clone, Debug, Default)]
pub struct DisplacementLedger {
    divots: Vec<Divot>,
}

impl DisplacementLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a divot. Does not touch any vertex data.
    pub fn divot(&mut self, x: f32, y: f32, depth: f32, radius: f32) {
        self.push(Divot::new(x, y, depth, radius));
    }

    /// Record an already-built divot.
    pub fn push(&mut self, divot: Divot) {
        self.divots.push(divot);
    }

    /// Total height offset at `(x, y)` summed over every recorded divot.
    pub fn height_modification(&self, x: f32, y: f32) -> f32 {
        self.divots.iter().map(|d| d.contribution(x, y)).sum()
    }

    /// All divots in insertion order.
    pub fn divots(&self) -> &[Divot] {
        &self.divots
    }

    /// Number of recorded divots.
    pub fn len(&self) -> usize {
        self.divots.len()
    }

    /// Returns `true` if no divot has been recorded.
    pub fn is_empty(&self) -> bool {
        self.divots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_empty_ledger_has_no_effect() {
        let ledger = DisplacementLedger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.height_modification(0.3, 0.7), 0.0);
    }

    #[test]
    fn test_full_depth_at_center() {
        let mut ledger = DisplacementLedger::new();
        ledger.divot(0.5, 0.5, 0.2, 0.1);
        let h = ledger.height_modification(0.5, 0.5);
        assert!((h + 0.2).abs() < EPSILON, "center should be lowered by depth, got {h}");
    }

    #[test]
    fn test_zero_at_radius() {
        // Radius along an axis so the distance is exact.
        let divot = Divot::new(0.25, 0.5, 0.2, 0.25);
        assert_eq!(divot.contribution(0.5, 0.5), 0.0);
        assert_eq!(divot.contribution(0.0, 0.5), 0.0);
    }

    #[test]
    fn test_zero_outside_radius() {
        let divot = Divot::new(0.5, 0.5, 0.2, 0.1);
        assert_eq!(divot.contribution(0.9, 0.9), 0.0);
    }

    #[test]
    fn test_falloff_monotonic_toward_zero() {
        let divot = Divot::new(0.0, 0.0, 1.0, 1.0);
        let mut prev = divot.contribution(0.0, 0.0);
        for i in 1..=100 {
            let d = i as f32 / 100.0;
            let h = divot.contribution(d, 0.0);
            assert!(h >= prev, "falloff decreased at distance {d}: {h} < {prev}");
            assert!(h <= 0.0, "divot must never raise terrain, got {h} at {d}");
            prev = h;
        }
        assert_eq!(prev, 0.0);
    }

    #[test]
    fn test_overlapping_divots_accumulate() {
        let mut ledger = DisplacementLedger::new();
        ledger.divot(0.5, 0.5, 0.1, 0.2);
        ledger.divot(0.5, 0.5, 0.1, 0.2);
        ledger.divot(0.5, 0.5, 0.1, 0.2);
        let h = ledger.height_modification(0.5, 0.5);
        assert!((h + 0.3).abs() < EPSILON, "three divots should stack to -0.3, got {h}");
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut ledger = DisplacementLedger::new();
        ledger.divot(0.1, 0.1, 0.1, 0.1);
        ledger.push(Divot::new(0.9, 0.9, 0.2, 0.05));
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.divots()[0].center_x, 0.1);
        assert_eq!(ledger.divots()[1].depth, 0.2);
    }

    #[test]
    fn test_zero_radius_divot_is_inert() {
        let divot = Divot::new(0.5, 0.5, 1.0, 0.0);
        assert_eq!(divot.contribution(0.5, 0.5), 0.0);
    }
}
