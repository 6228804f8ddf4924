//! Camera, projection and orbit controls
use nalgebra::{Matrix4, Point3, Vector3};

use crate::scene::{CameraConfig, OrbitLimits};

/// Keeps the orbit from flipping over the poles.
const POLAR_MARGIN: f32 = 1e-3;

/// Perspective camera for 3D rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_config(&CameraConfig::default(), width as f32 / height.max(1) as f32)
    }

    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            position: config.position,
            target: Point3::origin(),
            up: Vector3::y(),
            fov: config.fov_degrees.to_radians(),
            aspect,
            near: config.near,
            far: config.far,
        }
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    /// Project a 3D point to 2D screen space.
    ///
    /// Returns `(x, y, depth)` with depth in NDC, or `None` when the point lies
    /// behind the near plane. Points outside the viewport are still returned
    /// so that callers can clip primitives themselves.
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let mvp = self.projection_matrix() * self.view_matrix() * model_matrix;

        // Transform to clip space
        let clip = mvp * point.to_homogeneous();

        if clip.w < self.near {
            return None;
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        let depth = clip.z / clip.w;

        // Convert to screen space
        let screen_x = (ndc_x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc_y) * 0.5 * height as f32;

        Some((screen_x, screen_y, depth))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// Orbit-style camera controls around a target point.
///
/// Angles are spherical: `azimuth` around +Y measured from +Z, `polar` from +Y.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    pub target: Point3<f32>,
    pub radius: f32,
    pub azimuth: f32,
    pub polar: f32,
    pub limits: OrbitLimits,
}

impl OrbitControls {
    /// Controls reproducing the camera's current placement.
    pub fn from_camera(camera: &Camera, limits: OrbitLimits) -> Self {
        let offset = camera.position - camera.target;
        let radius = offset.norm().clamp(limits.min_distance, limits.max_distance);
        let polar = if offset.norm() > f32::EPSILON {
            (offset.y / offset.norm()).clamp(-1.0, 1.0).acos()
        } else {
            std::f32::consts::FRAC_PI_2
        };

        Self {
            target: camera.target,
            radius,
            azimuth: offset.x.atan2(offset.z),
            polar: clamp_polar(polar),
            limits,
        }
    }

    pub fn rotate(&mut self, d_azimuth: f32, d_polar: f32) {
        if !self.limits.enable_rotate {
            return;
        }
        self.azimuth += d_azimuth;
        self.polar = clamp_polar(self.polar + d_polar);
    }

    /// Scale the distance to the target; `factor < 1` moves closer.
    pub fn zoom(&mut self, factor: f32) {
        if !self.limits.enable_zoom || factor <= 0.0 {
            return;
        }
        self.radius =
            (self.radius * factor).clamp(self.limits.min_distance, self.limits.max_distance);
    }

    /// Slide the target in the view plane by `dx` right and `dy` up (world units).
    pub fn pan(&mut self, dx: f32, dy: f32) {
        if !self.limits.enable_pan {
            return;
        }
        let forward = (self.target - self.position()).normalize();
        let right = forward.cross(&Vector3::y()).normalize();
        let up = right.cross(&forward);
        self.target += right * dx + up * dy;
    }

    pub fn position(&self) -> Point3<f32> {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_azimuth, cos_azimuth) = self.azimuth.sin_cos();
        self.target
            + Vector3::new(
                self.radius * sin_polar * sin_azimuth,
                self.radius * cos_polar,
                self.radius * sin_polar * cos_azimuth,
            )
    }

    pub fn apply(&self, camera: &mut Camera) {
        camera.position = self.position();
        camera.target = self.target;
    }
}

fn clamp_polar(polar: f32) -> f32 {
    polar.clamp(POLAR_MARGIN, std::f32::consts::PI - POLAR_MARGIN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800, 600);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert_eq!(camera.position, Point3::new(5.0, 5.0, 5.0));
        assert_relative_eq!(camera.fov, 50f32.to_radians());
    }

    #[test]
    fn test_view_matrix() {
        let camera = Camera::new(800, 600);
        let view = camera.view_matrix();
        // View matrix should be non-zero
        assert!(view.norm() > 0.0);
    }

    #[test]
    fn test_target_projects_to_screen_center() {
        let camera = Camera::new(80, 40);
        let (x, y, depth) = camera
            .project_to_screen(&Point3::origin(), &Matrix4::identity(), 80, 40)
            .unwrap();
        assert_relative_eq!(x, 40.0, epsilon = 1e-3);
        assert_relative_eq!(y, 20.0, epsilon = 1e-3);
        assert!(depth > -1.0 && depth < 1.0);
    }

    #[test]
    fn test_points_behind_camera_are_rejected() {
        let camera = Camera::new(80, 40);
        let behind = Point3::new(10.0, 10.0, 10.0);
        assert!(camera
            .project_to_screen(&behind, &Matrix4::identity(), 80, 40)
            .is_none());
    }

    #[test]
    fn test_orbit_round_trips_camera_position() {
        let camera = Camera::default();
        let orbit = OrbitControls::from_camera(&camera, OrbitLimits::default());
        assert_relative_eq!(orbit.position(), camera.position, epsilon = 1e-4);
        assert_relative_eq!(orbit.radius, 75f32.sqrt(), epsilon = 1e-4);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut orbit = OrbitControls::from_camera(&Camera::default(), OrbitLimits::default());
        orbit.zoom(0.01);
        assert_relative_eq!(orbit.radius, 3.0);
        orbit.zoom(100.0);
        assert_relative_eq!(orbit.radius, 20.0);
    }

    #[test]
    fn test_rotate_keeps_distance_and_clamps_polar() {
        let mut orbit = OrbitControls::from_camera(&Camera::default(), OrbitLimits::default());
        orbit.rotate(1.0, -10.0);
        assert_relative_eq!(orbit.polar, POLAR_MARGIN);
        assert_relative_eq!(
            (orbit.position() - orbit.target).norm(),
            orbit.radius,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_pan_moves_target_and_camera_together() {
        let mut orbit = OrbitControls::from_camera(&Camera::default(), OrbitLimits::default());
        let before = orbit.position() - orbit.target;
        orbit.pan(1.0, 0.5);
        assert!(orbit.target.coords.norm() > 0.0);
        assert_relative_eq!(orbit.position() - orbit.target, before, epsilon = 1e-4);
    }

    #[test]
    fn test_disabled_controls_do_nothing() {
        let limits = OrbitLimits {
            enable_pan: false,
            enable_zoom: false,
            enable_rotate: false,
            ..OrbitLimits::default()
        };
        let mut orbit = OrbitControls::from_camera(&Camera::default(), limits);
        let before = orbit.clone();
        orbit.rotate(1.0, 1.0);
        orbit.zoom(0.5);
        orbit.pan(1.0, 1.0);
        assert_eq!(orbit, before);
    }

    #[test]
    fn test_apply_moves_camera() {
        let mut camera = Camera::default();
        let mut orbit = OrbitControls::from_camera(&camera, OrbitLimits::default());
        orbit.zoom(0.5);
        orbit.apply(&mut camera);
        assert_relative_eq!(camera.position.coords.norm(), orbit.radius, epsilon = 1e-4);
    }
}
