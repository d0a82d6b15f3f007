//! Render sink contract.
//!
//! The simulation never rasterizes anything itself. Each frame it clears the
//! sink, issues one primitive per visible body, optionally a set of debug
//! outlines, and presents. Implementors decide what a "frame" means: the
//! bundled [`DrawBuffer`](super::buffer::DrawBuffer) flattens everything into
//! POD records for the browser renderer.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Linear RGBA colour, each channel in 0.0-1.0.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// Axis-aligned (before rotation) filled rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    /// Centre in world space.
    pub center: Vec2,
    /// Full width and height in world units.
    pub size: Vec2,
    /// Rotation about the centre, radians.
    pub rotation: f32,
    pub color: Color,
}

/// Filled circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CirclePrimitive {
    pub center: Vec2,
    pub radius: f32,
    /// Rotation in radians; only visible on textured circles.
    pub rotation: f32,
    pub color: Color,
}

/// Consumer of per-frame draw calls.
pub trait RenderSink {
    /// Start a new frame, discarding whatever the previous frame drew.
    fn clear(&mut self, color: Color);

    fn draw_rect(&mut self, rect: &RectPrimitive);

    fn draw_circle(&mut self, circle: &CirclePrimitive);

    /// Closed or open polyline in world space (physics debug outlines).
    fn draw_outline(&mut self, points: &[Vec2], color: Color);

    /// Hand the finished frame to the display.
    fn present(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_is_four_floats() {
        assert_eq!(std::mem::size_of::<Color>(), 16);
        assert_eq!(Color::RED.a, 1.0);
    }

    #[test]
    fn color_deserializes_from_json() {
        let c: Color = serde_json::from_str(r#"{"r":0.5,"g":0.25,"b":0.0,"a":1.0}"#).unwrap();
        assert_eq!(c, Color { r: 0.5, g: 0.25, b: 0.0, a: 1.0 });
    }
}
