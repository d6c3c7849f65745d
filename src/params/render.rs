//! Rendering and camera configuration.

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane (world units)
    pub near_plane: f32,

    /// Far clipping plane (world units)
    pub far_plane: f32,

    /// Camera distance from the origin along +Z (world units)
    pub camera_distance: f32,

    /// Bar colour before any gradient is applied (sRGB)
    /// 0x00ffff
    pub initial_bar_color: [f32; 3],

    /// Ambient light intensity (the only light in the scene)
    pub ambient_intensity: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            fov_degrees: 75.0,
            near_plane: 0.1,
            far_plane: 1000.0,
            camera_distance: 40.0,
            initial_bar_color: [0.0, 1.0, 1.0],
            ambient_intensity: 1.0,
        }
    }
}

impl RenderConfig {
    pub fn aspect_ratio(&self) -> f32 {
        if self.window_height == 0 {
            return 1.0;
        }
        self.window_width as f32 / self.window_height as f32
    }
}
