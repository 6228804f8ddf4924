//! Surface appearance for the two rendering modes
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::from_hex(0x000000);
    pub const LIGHT_GRAY: Rgb = Rgb::from_hex(0xd4d4d4);

    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    /// CSS-style `#rrggbb`
    pub fn to_hex_string(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Relative luminance in `[0, 1]`.
    pub fn luminance(self) -> f32 {
        (0.2126 * self.r as f32 + 0.7152 * self.g as f32 + 0.0722 * self.b as f32) / 255.0
    }

    pub fn scaled(self, factor: f32) -> Self {
        let scale = |c: u8| (c as f32 * factor.clamp(0.0, 1.0)).round() as u8;
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
        }
    }
}

/// Rendering attributes applied on top of a mesh. Never alters geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub color: Rgb,
    pub wireframe: bool,
    pub transparent: bool,
    pub opacity: f32,
}

impl Material {
    /// Black opaque edge skeleton.
    pub const WIREFRAME: Material = Material {
        color: Rgb::BLACK,
        wireframe: true,
        transparent: false,
        opacity: 1.0,
    };

    /// Semi-transparent light-gray shaded solid.
    pub const SOLID: Material = Material {
        color: Rgb::LIGHT_GRAY,
        wireframe: false,
        transparent: true,
        opacity: 0.8,
    };

    pub fn for_mode(wireframe: bool) -> Self {
        if wireframe {
            Self::WIREFRAME
        } else {
            Self::SOLID
        }
    }
}
