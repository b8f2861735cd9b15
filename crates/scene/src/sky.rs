//! Two-color vertical gradient used for the sky dome.
//!
//! The gradient samples the direction from the world origin (shifted by
//! `offset` on every axis) rather than the absolute position, so it looks the
//! same wherever the camera sits inside the dome.

use basicworld_common::Color;
use glam::Vec3;

/// Parameters consumed by the sky shader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyUniforms {
    /// Color at the zenith.
    pub top_color: Color,
    /// Color at and below the horizon.
    pub bottom_color: Color,
    /// Added to each component of the world position before normalizing.
    pub offset: f32,
    /// Shapes the horizon-to-zenith falloff.
    pub exponent: f32,
}

impl Default for SkyUniforms {
    fn default() -> Self {
        Self {
            top_color: Color::from_hex(0x0077ff),
            bottom_color: Color::from_hex(0xffffff),
            offset: -10.0,
            exponent: 0.7,
        }
    }
}

impl SkyUniforms {
    /// Color for a given vertical direction component `h`.
    pub fn gradient(&self, h: f32) -> Color {
        self.bottom_color
            .lerp(self.top_color, gradient_factor(h, self.exponent))
    }

    /// Color of the sky fragment at `world_position`.
    pub fn sky_color(&self, world_position: Vec3) -> Color {
        let h = (world_position + Vec3::splat(self.offset))
            .normalize_or_zero()
            .y;
        self.gradient(h)
    }
}

/// Mix factor between bottom and top color: `max(max(h, 0)^exponent, 0)`.
pub fn gradient_factor(h: f32, exponent: f32) -> f32 {
    h.max(0.0).powf(exponent).max(0.0)
}
