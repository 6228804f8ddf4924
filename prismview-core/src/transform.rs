//! 3D rotation state and the auto-rotate tick
use nalgebra::{Matrix4, Vector3};
use std::str::FromStr;
use std::time::Duration;

use crate::error::PrismError;

/// Auto-rotate increment per frame around X and Y (radians).
pub const AUTO_ROTATE_STEP: (f32, f32) = (0.005, 0.01);

/// Frame rate the per-frame increments were tuned for.
pub const REFERENCE_FRAME_RATE: f32 = 60.0;

/// Rotation state around three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

    /// Apply one auto-rotate tick. `elapsed` is the time since the previous
    /// frame and is ignored by [`RotationClock::PerFrame`].
    pub fn advance(&mut self, clock: RotationClock, elapsed: Duration) {
        let scale = clock.step_scale(elapsed);
        self.rotate(AUTO_ROTATE_STEP.0 * scale, AUTO_ROTATE_STEP.1 * scale, 0.0);
    }
}

/// How auto-rotation speed relates to time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationClock {
    /// Fixed increment per rendered frame; speed follows the frame rate.
    #[default]
    PerFrame,
    /// Increment scaled by elapsed time so that speed matches the per-frame
    /// clock running at [`REFERENCE_FRAME_RATE`].
    Elapsed,
}

impl RotationClock {
    pub fn step_scale(self, elapsed: Duration) -> f32 {
        match self {
            RotationClock::PerFrame => 1.0,
            RotationClock::Elapsed => elapsed.as_secs_f32() * REFERENCE_FRAME_RATE,
        }
    }
}

impl FromStr for RotationClock {
    type Err = PrismError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "per-frame" => Ok(RotationClock::PerFrame),
            "elapsed" => Ok(RotationClock::Elapsed),
            other => Err(PrismError::UnknownRotationClock(other.to_string())),
        }
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    /// Create a rotation matrix from a rotation state
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix4<f32> {
        let rx = Matrix4::new_rotation(Vector3::new(rotation.x, 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, rotation.y, 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, rotation.z));

        // Intrinsic X, then Y, then Z
        rx * ry * rz
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn test_rotation_state() {
        let mut state = RotationState::zero();
        assert_eq!(state.x, 0.0);
        assert_eq!(state.y, 0.0);
        assert_eq!(state.z, 0.0);

        state.rotate(0.1, 0.2, 0.3);
        assert!((state.x - 0.1).abs() < 1e-6);
        assert!((state.y - 0.2).abs() < 1e-6);
        assert!((state.z - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_identity_rotation() {
        let rotation = RotationState::zero();
        let matrix = Transform::rotation_matrix(&rotation);
        assert!((matrix - Matrix4::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_per_frame_clock_ignores_elapsed_time() {
        let mut fast = RotationState::zero();
        let mut slow = RotationState::zero();
        fast.advance(RotationClock::PerFrame, Duration::from_millis(1));
        slow.advance(RotationClock::PerFrame, Duration::from_millis(500));
        assert_eq!(fast, slow);
        assert_relative_eq!(fast.x, 0.005);
        assert_relative_eq!(fast.y, 0.01);
        assert_eq!(fast.z, 0.0);
    }

    #[test]
    fn test_elapsed_clock_matches_reference_rate() {
        let mut state = RotationState::zero();
        for _ in 0..60 {
            state.advance(RotationClock::Elapsed, Duration::from_secs_f32(1.0 / 60.0));
        }
        assert_relative_eq!(state.y, 0.6, epsilon = 1e-4);

        let mut one_second = RotationState::zero();
        one_second.advance(RotationClock::Elapsed, Duration::from_secs(1));
        assert_relative_eq!(one_second.y, state.y, epsilon = 1e-4);
    }

    #[test]
    fn test_parse_clock() {
        assert_eq!("per-frame".parse(), Ok(RotationClock::PerFrame));
        assert_eq!("elapsed".parse(), Ok(RotationClock::Elapsed));
        assert!("wall".parse::<RotationClock>().is_err());
    }

    #[test]
    fn test_quarter_turn_about_y() {
        let rotation = RotationState::new(0.0, std::f32::consts::FRAC_PI_2, 0.0);
        let matrix = Transform::rotation_matrix(&rotation);
        let rotated = matrix.transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(rotated, Point3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
    }
}
