use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::sink::{CirclePrimitive, Color, RectPrimitive, RenderSink};

/// Primitive kinds written into [`DrawInstance::kind`].
pub const KIND_RECT: f32 = 0.0;
pub const KIND_CIRCLE: f32 = 1.0;

/// Per-primitive record read by the JavaScript renderer.
/// Must match the TypeScript protocol: 10 floats = 40 bytes stride.
///
/// For circles `width == height == 2 * radius`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct DrawInstance {
    pub kind: f32,
    /// Centre in world space.
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Radians.
    pub rotation: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl DrawInstance {
    pub const FLOATS: usize = 10;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// One end of a debug line segment: x, y, r, g, b, a.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct OutlineVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl OutlineVertex {
    pub const FLOATS: usize = 6;
}

/// Flat frame buffer implementing [`RenderSink`].
///
/// Outlines are stored as line-list vertex pairs so the renderer can draw
/// them in a single call.
pub struct DrawBuffer {
    pub clear_color: Color,
    pub instances: Vec<DrawInstance>,
    pub outline_vertices: Vec<OutlineVertex>,
    frames_presented: u64,
}

impl DrawBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    pub fn with_capacity(max_instances: usize) -> Self {
        Self {
            clear_color: Color::BLACK,
            instances: Vec::with_capacity(max_instances),
            outline_vertices: Vec::new(),
            frames_presented: 0,
        }
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn outline_vertex_count(&self) -> u32 {
        self.outline_vertices.len() as u32
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Instances of the given kind, in draw order.
    pub fn instances_of(&self, kind: f32) -> impl Iterator<Item = &DrawInstance> {
        self.instances.iter().filter(move |i| i.kind == kind)
    }

    /// Raw pointer to instance data for zero-copy reads from JS.
    pub fn instances_ptr(&self) -> *const f32 {
        bytemuck::cast_slice::<DrawInstance, f32>(&self.instances).as_ptr()
    }

    pub fn outline_ptr(&self) -> *const f32 {
        bytemuck::cast_slice::<OutlineVertex, f32>(&self.outline_vertices).as_ptr()
    }
}

impl Default for DrawBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderSink for DrawBuffer {
    fn clear(&mut self, color: Color) {
        self.clear_color = color;
        self.instances.clear();
        self.outline_vertices.clear();
    }

    fn draw_rect(&mut self, rect: &RectPrimitive) {
        self.instances.push(DrawInstance {
            kind: KIND_RECT,
            x: rect.center.x,
            y: rect.center.y,
            width: rect.size.x,
            height: rect.size.y,
            rotation: rect.rotation,
            r: rect.color.r,
            g: rect.color.g,
            b: rect.color.b,
            a: rect.color.a,
        });
    }

    fn draw_circle(&mut self, circle: &CirclePrimitive) {
        let diameter = circle.radius * 2.0;
        self.instances.push(DrawInstance {
            kind: KIND_CIRCLE,
            x: circle.center.x,
            y: circle.center.y,
            width: diameter,
            height: diameter,
            rotation: circle.rotation,
            r: circle.color.r,
            g: circle.color.g,
            b: circle.color.b,
            a: circle.color.a,
        });
    }

    fn draw_outline(&mut self, points: &[Vec2], color: Color) {
        let vertex = |p: Vec2| OutlineVertex {
            x: p.x,
            y: p.y,
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        };
        for pair in points.windows(2) {
            self.outline_vertices.push(vertex(pair[0]));
            self.outline_vertices.push(vertex(pair[1]));
        }
    }

    fn present(&mut self) {
        self.frames_presented += 1;
    }
}
