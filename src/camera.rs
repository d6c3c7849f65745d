//! Fixed perspective camera looking at the bar row.

use glam::{Mat4, Vec3};

use crate::params::RenderConfig;

/// Stationary camera on the +Z axis; only the aspect ratio changes
pub struct CameraSystem {
    eye: Vec3,
    fov_radians: f32,
    near: f32,
    far: f32,
    aspect: f32,
}

impl CameraSystem {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, config.camera_distance),
            fov_radians: config.fov_degrees.to_radians(),
            near: config.near_plane,
            far: config.far_plane,
            aspect: config.aspect_ratio(),
        }
    }

    /// Track a new window size; zero-sized windows are ignored
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Create view-projection matrix for rendering
    pub fn view_proj(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, Vec3::ZERO, Vec3::Y);
        let proj = Mat4::perspective_rh(self.fov_radians, self.aspect, self.near, self.far);
        proj * view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_proj_matrix_generation() {
        let camera = CameraSystem::new(&RenderConfig::default());
        let view_proj = camera.view_proj();

        assert_ne!(view_proj, Mat4::IDENTITY);
        assert_ne!(view_proj, Mat4::ZERO);
        assert_eq!(camera.eye(), Vec3::new(0.0, 0.0, 40.0));
    }

    #[test]
    fn test_origin_projects_to_screen_centre() {
        let camera = CameraSystem::new(&RenderConfig::default());
        let clip = camera.view_proj() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;

        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut camera = CameraSystem::new(&RenderConfig::default());
        camera.resize(1000, 500);
        assert_eq!(camera.aspect(), 2.0);

        camera.resize(0, 500);
        assert_eq!(camera.aspect(), 2.0);
    }
}
