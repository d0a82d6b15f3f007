//! Debug rendering: opt-in collider outlines drawn over the frame.

use glam::Vec2;

use crate::core::physics::{ColliderDesc, PhysicsWorld};
use crate::renderer::sink::{Color, RenderSink};

const CIRCLE_SEGMENTS: usize = 24;

/// Draw one closed outline per collider in the world.
pub fn debug_draw_world(physics: &PhysicsWorld, sink: &mut dyn RenderSink, color: Color) {
    for (shape, pos, rot) in physics.colliders() {
        let points = collider_outline(pos, rot, &shape);
        sink.draw_outline(&points, color);
    }
}

/// Outline points for a collider at a given position and rotation.
/// The first point is repeated at the end.
fn collider_outline(center: Vec2, rot: f32, shape: &ColliderDesc) -> Vec<Vec2> {
    match *shape {
        ColliderDesc::Ball { radius } => (0..=CIRCLE_SEGMENTS)
            .map(|i| {
                let angle = rot + (i as f32 / CIRCLE_SEGMENTS as f32) * std::f32::consts::TAU;
                center + Vec2::from_angle(angle) * radius
            })
            .collect(),
        ColliderDesc::Cuboid {
            half_width,
            half_height,
        } => {
            let rotation = Vec2::from_angle(rot);
            let corners = [
                Vec2::new(-half_width, -half_height),
                Vec2::new(half_width, -half_height),
                Vec2::new(half_width, half_height),
                Vec2::new(-half_width, half_height),
            ];
            let mut points: Vec<Vec2> =
                corners.iter().map(|&c| center + rotation.rotate(c)).collect();
            points.push(points[0]);
            points
        }
    }
}
