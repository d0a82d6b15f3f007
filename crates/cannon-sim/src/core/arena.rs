use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::physics::{ColliderDesc, ColliderMaterial, PhysicsBody, PhysicsWorld};
use crate::renderer::sink::Color;

/// One static wall, floor or ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundaryConfig {
    pub center: Vec2,
    /// Full width and height.
    pub size: Vec2,
    #[serde(default)]
    pub friction: f32,
    #[serde(default)]
    pub restitution: f32,
    #[serde(default = "default_boundary_color")]
    pub color: Color,
}

fn default_boundary_color() -> Color {
    Color::WHITE
}

impl BoundaryConfig {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            size,
            friction: 0.0,
            restitution: 0.0,
            color: Color::WHITE,
        }
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

/// A spawned boundary: its body plus what is needed to draw it.
#[derive(Debug, Clone, Copy)]
pub struct Boundary {
    pub body: PhysicsBody,
    pub size: Vec2,
    pub color: Color,
}

/// The static bodies enclosing the playfield.
#[derive(Debug, Default)]
pub struct Arena {
    boundaries: Vec<Boundary>,
}

impl Arena {
    pub fn build(world: &mut PhysicsWorld, configs: &[BoundaryConfig]) -> Self {
        let boundaries = configs
            .iter()
            .map(|cfg| {
                let material = ColliderMaterial {
                    restitution: cfg.restitution,
                    friction: cfg.friction,
                    ..ColliderMaterial::default()
                };
                let body =
                    world.create_static_body(ColliderDesc::rect(cfg.size), cfg.center, material);
                Boundary {
                    body,
                    size: cfg.size,
                    color: cfg.color,
                }
            })
            .collect();
        Self { boundaries }
    }

    pub fn boundaries(&self) -> &[Boundary] {
        &self.boundaries
    }

    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    /// Remove every boundary body from the world. Returns how many were live.
    pub fn destroy(&self, world: &mut PhysicsWorld) -> usize {
        self.boundaries
            .iter()
            .filter(|b| world.destroy_body(&b.body))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::physics::BodyKind;

    fn box_of_walls() -> Vec<BoundaryConfig> {
        vec![
            BoundaryConfig::new(Vec2::new(50.0, 100.0), Vec2::new(100.0, 10.0))
                .with_friction(0.5),
            BoundaryConfig::new(Vec2::new(0.0, 50.0), Vec2::new(10.0, 100.0))
                .with_restitution(1.0),
            BoundaryConfig::new(Vec2::new(100.0, 50.0), Vec2::new(10.0, 100.0))
                .with_restitution(1.0),
        ]
    }

    #[test]
    fn builds_one_static_body_per_boundary() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, 9.8));
        let arena = Arena::build(&mut world, &box_of_walls());
        assert_eq!(arena.len(), 3);
        assert_eq!(world.body_count(), 3);
        for b in arena.boundaries() {
            assert_eq!(world.kind(&b.body), Some(BodyKind::Static));
        }
    }

    #[test]
    fn boundaries_do_not_fall() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, 9.8));
        let arena = Arena::build(&mut world, &box_of_walls());
        let mut contacts = Vec::new();
        for _ in 0..60 {
            world.step(1.0 / 60.0, 8, 8, &mut contacts);
        }
        let (pos, _) = world.transform(&arena.boundaries()[0].body).unwrap();
        assert_eq!(pos, Vec2::new(50.0, 100.0));
    }

    #[test]
    fn ground_stops_a_falling_ball() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, 9.8));
        Arena::build(&mut world, &box_of_walls());
        let ball = world
            .create_dynamic_body(ColliderDesc::Ball { radius: 0.5 }, ColliderMaterial::default());
        world.set_transform(&ball, Vec2::new(50.0, 80.0), 0.0);

        let mut contacts = Vec::new();
        for _ in 0..600 {
            world.step(1.0 / 60.0, 8, 8, &mut contacts);
        }
        let (pos, _) = world.transform(&ball).unwrap();
        // Ground top face is at y = 95.
        assert!(pos.y < 95.0 && pos.y > 93.5, "ball rests on the ground: y={}", pos.y);
        assert!(contacts.iter().any(|c| c.started));
    }

    #[test]
    fn destroy_removes_boundaries_once() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let arena = Arena::build(&mut world, &box_of_walls());
        assert_eq!(arena.destroy(&mut world), 3);
        assert_eq!(world.body_count(), 0);
        assert_eq!(arena.destroy(&mut world), 0);
    }

    #[test]
    fn boundary_from_json_uses_defaults() {
        let cfg: BoundaryConfig =
            serde_json::from_str(r#"{"center":[50.0,0.0],"size":[100.0,10.0]}"#).unwrap();
        assert_eq!(cfg.friction, 0.0);
        assert_eq!(cfg.color, Color::WHITE);
    }
}
