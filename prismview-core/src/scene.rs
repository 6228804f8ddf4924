//! Scene description consumed by the rendering hosts: camera placement, orbit
//! limits, light rig and the reference ground grid.
//!
//! Nothing here is loaded from disk. Hosts start from [`SceneConfig::default`]
//! and override individual values from their own command line or API.
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::material::Rgb;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub orbit: OrbitLimits,
    #[serde(default)]
    pub lighting: Lighting,
    #[serde(default)]
    pub grid: Grid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    pub position: Point3<f32>,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Point3::new(5.0, 5.0, 5.0),
            fov_degrees: 50.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Bounds and switches for the orbit controls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitLimits {
    pub min_distance: f32,
    pub max_distance: f32,
    pub enable_pan: bool,
    pub enable_zoom: bool,
    pub enable_rotate: bool,
}

impl Default for OrbitLimits {
    fn default() -> Self {
        Self {
            min_distance: 3.0,
            max_distance: 20.0,
            enable_pan: true,
            enable_zoom: true,
            enable_rotate: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionedLight {
    pub position: Point3<f32>,
    pub intensity: f32,
}

/// Ambient, directional and point light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lighting {
    pub ambient: f32,
    /// Shines from `position` towards the origin.
    pub directional: PositionedLight,
    /// Radiates from `position`; no distance falloff.
    pub point: PositionedLight,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient: 0.4,
            directional: PositionedLight {
                position: Point3::new(5.0, 5.0, 5.0),
                intensity: 0.8,
            },
            point: PositionedLight {
                position: Point3::new(-5.0, -5.0, -5.0),
                intensity: 0.3,
            },
        }
    }
}

impl Lighting {
    /// Lambertian illuminance at a world-space surface point, clamped to `[0, 1]`.
    pub fn illuminance(&self, position: &Point3<f32>, normal: &Vector3<f32>) -> f32 {
        let lambert = |to_light: Vector3<f32>| {
            to_light
                .try_normalize(f32::EPSILON)
                .map_or(0.0, |dir| normal.dot(&dir).max(0.0))
        };

        let directional = self.directional.intensity * lambert(self.directional.position.coords);
        let point = self.point.intensity * lambert(self.point.position - position);

        (self.ambient + directional + point).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridLineKind {
    Cell,
    Section,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub start: Point3<f32>,
    pub end: Point3<f32>,
    pub kind: GridLineKind,
}

/// Reference grid on the `y = 0` plane, centered on the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    pub size: f32,
    pub cell_size: f32,
    pub section_size: f32,
    pub cell_color: Rgb,
    pub section_color: Rgb,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            size: 10.0,
            cell_size: 1.0,
            section_size: 5.0,
            cell_color: Rgb::from_hex(0x808080),
            section_color: Rgb::from_hex(0x404040),
        }
    }
}

impl Grid {
    pub fn divisions(&self) -> usize {
        if self.cell_size <= 0.0 {
            return 0;
        }
        (self.size / self.cell_size).round() as usize
    }

    /// Line segments parallel to X and Z; every line whose offset is a multiple
    /// of `section_size` is a section line.
    pub fn lines(&self) -> Vec<GridLine> {
        let half = self.size / 2.0;
        let divisions = self.divisions();
        let mut lines = Vec::with_capacity(2 * (divisions + 1));

        for i in 0..=divisions {
            let offset = -half + i as f32 * self.cell_size;
            let kind = if self.is_section(offset) {
                GridLineKind::Section
            } else {
                GridLineKind::Cell
            };
            lines.push(GridLine {
                start: Point3::new(-half, 0.0, offset),
                end: Point3::new(half, 0.0, offset),
                kind,
            });
            lines.push(GridLine {
                start: Point3::new(offset, 0.0, -half),
                end: Point3::new(offset, 0.0, half),
                kind,
            });
        }

        lines
    }

    fn is_section(&self, offset: f32) -> bool {
        if self.section_size <= 0.0 {
            return false;
        }
        let ratio = offset / self.section_size;
        (ratio - ratio.round()).abs() < 1e-4
    }
}
