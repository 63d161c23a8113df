//! Runtime scene assembled from configuration: the height field, the brush,
//! and the camera and world matrices used for picking.

use glam::{Mat4, Vec2, Vec3};
use loam_config::{BrushConfig, CameraConfig, Config, TerrainConfig};
use loam_picking::{pick_terrain, to_terrain_local};
use loam_terrain::{
    BrushProfile, BrushStamp, HeightField, HeightFieldParams, SculptOutcome, TerrainError,
};

/// Camera matrices and viewport for turning pointer positions into rays.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct CameraRig {
    pub proj: Mat4,
    pub view: Mat4,
    pub viewport: Vec2,
}

impl CameraRig {
    pub(crate) fn from_config(camera: &CameraConfig) -> Self {
        let viewport = Vec2::new(camera.viewport_width as f32, camera.viewport_height as f32);
        let aspect = if viewport.y > 0.0 { viewport.x / viewport.y } else { 1.0 };
        Self {
            proj: Mat4::perspective_rh_gl(
                camera.fov_degrees.to_radians(),
                aspect,
                camera.near,
                camera.far,
            ),
            view: Mat4::look_at_rh(
                Vec3::from_array(camera.eye),
                Vec3::from_array(camera.target),
                Vec3::Z,
            ),
            viewport,
        }
    }
}

/// Terrain-space to world-space transform: scale by `world_scale` and center
/// the unit square on the origin.
pub(crate) fn world_matrix(terrain: &TerrainConfig) -> Mat4 {
    let half = terrain.world_scale * 0.5;
    Mat4::from_translation(Vec3::new(-half, -half, 0.0))
        * Mat4::from_scale(Vec3::splat(terrain.world_scale))
}

pub(crate) fn height_field_params(terrain: &TerrainConfig) -> HeightFieldParams {
    HeightFieldParams {
        resolution: terrain.resolution,
        tiles_per_side: terrain.tiles_per_side,
        seed: terrain.seed,
        lookup_size: terrain.lookup_size,
        noise_scale: terrain.noise_scale,
    }
}

pub(crate) fn brush_profile(brush: &BrushConfig) -> BrushProfile {
    BrushProfile {
        depth: brush.depth,
        radius: brush.radius,
        stamps: brush
            .stamps
            .iter()
            .map(|s| BrushStamp::new(s.offset, s.depth_scale, s.radius_scale))
            .collect(),
        wide_radius_factor: brush.wide_radius_factor,
    }
}

/// Everything needed to run the pointer-to-sculpt loop.
pub(crate) struct TerrainScene {
    pub field: HeightField,
    pub brush: BrushProfile,
    pub camera: CameraRig,
    pub world: Mat4,
}

/// Result of one pointer stroke.
pub(crate) struct Stroke {
    pub local: Vec2,
    pub outcome: SculptOutcome,
}

impl TerrainScene {
    /// Build the scene and generate the initial terrain.
    pub(crate) fn from_config(config: &Config) -> Result<Self, TerrainError> {
        let mut field = HeightField::try_new(height_field_params(&config.terrain))?;
        field.generate_terrain();
        Ok(Self {
            field,
            brush: brush_profile(&config.brush),
            camera: CameraRig::from_config(&config.camera),
            world: world_matrix(&config.terrain),
        })
    }

    /// Swap in brush and camera settings from a reloaded config.
    ///
    /// Terrain settings are left alone; they need a new scene.
    pub(crate) fn apply_live_settings(&mut self, config: &Config) {
        self.brush = brush_profile(&config.brush);
        self.camera = CameraRig::from_config(&config.camera);
    }

    /// Pick the terrain under `pointer` and sculpt there.
    ///
    /// Returns `None` when the pointer is off the terrain.
    pub(crate) fn stroke(&mut self, pointer: Vec2) -> Option<Stroke> {
        let hit = pick_terrain(
            pointer,
            self.camera.viewport,
            &self.camera.proj,
            &self.camera.view,
            self.field.vertices(),
            &self.world,
        )?;
        let local = to_terrain_local(hit, &self.world);
        let outcome = self.field.sculpt(local.x, local.y, &self.brush);
        Some(Stroke { local, outcome })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> Config {
        let mut config = Config::default();
        config.terrain.resolution = 20;
        config.terrain.tiles_per_side = 5;
        config
    }

    #[test]
    fn test_world_matrix_centers_terrain() {
        let world = world_matrix(&TerrainConfig::default());
        let center = world.transform_point3(Vec3::new(0.5, 0.5, 0.0));
        assert!(center.length() < 1e-6);
        let corner = world.transform_point3(Vec3::new(1.0, 1.0, 0.0));
        assert!((corner - Vec3::new(5.0, 5.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_brush_profile_copies_stamps() {
        let brush = brush_profile(&BrushConfig::default());
        assert_eq!(brush.stamps.len(), 4);
        assert_eq!(brush, BrushProfile::default());
    }

    #[test]
    fn test_uneven_config_rejected() {
        let mut config = small_config();
        config.terrain.tiles_per_side = 3;
        assert!(TerrainScene::from_config(&config).is_err());
    }

    #[test]
    fn test_center_stroke_sculpts_under_camera() {
        let config = small_config();
        let mut scene = TerrainScene::from_config(&config).unwrap();
        let center = scene.camera.viewport * 0.5;

        let stroke = scene.stroke(center).expect("default camera looks at the terrain center");
        assert!((stroke.local - Vec2::new(0.5, 0.5)).length() < 0.05);
        assert!(!stroke.outcome.dirty_tiles.is_empty());
        assert_eq!(scene.field.ledger().len(), 4);
    }

    #[test]
    fn test_live_settings_change_next_stroke() {
        let mut config = small_config();
        let mut scene = TerrainScene::from_config(&config).unwrap();

        config.brush.stamps.truncate(1);
        config.terrain.seed = 7;
        scene.apply_live_settings(&config);
        assert_eq!(scene.brush.stamps.len(), 1);
        assert_eq!(scene.field.params().seed, 1230, "terrain must not be rebuilt");

        let center = scene.camera.viewport * 0.5;
        let stroke = scene.stroke(center).expect("center pointer should hit");
        assert_eq!(stroke.outcome.divots_added, 1);
    }

    #[test]
    fn test_stroke_off_terrain_is_ignored() {
        let config = small_config();
        let mut scene = TerrainScene::from_config(&config).unwrap();
        // Top-left corner of the viewport looks over the far edge into the sky.
        assert!(scene.stroke(Vec2::new(0.0, 0.0)).is_none());
        assert!(scene.field.ledger().is_empty());
    }
}
