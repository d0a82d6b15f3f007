//! The player-controlled kinematic body and its steering strategies.

pub mod aiming;
pub mod shooter;

use glam::Vec2;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::api::error::SimError;
use crate::api::types::ProjectileId;
use crate::core::physics::{ColliderDesc, PhysicsBody, PhysicsWorld};
use crate::core::pool::ProjectilePool;
use crate::input::queue::InputState;
use crate::renderer::camera::Camera2D;
use crate::renderer::sink::Color;

use aiming::{aim_angle, launch_velocity, muzzle_tip, AimingParams};
use shooter::{vertical_velocity, FireGate, FireMode, ShooterParams};

/// Steering strategy for the control body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControlMode {
    /// Rotate in place toward the pointer, fire along the barrel.
    Aiming(AimingParams),
    /// Slide vertically between two limits, fire to the right.
    VerticalShooter(ShooterParams),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlConfig {
    /// Spawn position of the body centre.
    pub position: Vec2,
    /// Full width and height of the box collider.
    pub size: Vec2,
    pub color: Color,
    pub mode: ControlMode,
}

/// The single kinematic body of a session.
///
/// Holds only a handle; position and angle are always read back from the
/// physics world.
pub struct ControlBody {
    body: PhysicsBody,
    size: Vec2,
    color: Color,
    mode: ControlMode,
    gate: FireGate,
}

impl ControlBody {
    pub fn spawn(world: &mut PhysicsWorld, config: &ControlConfig) -> Self {
        let body = world.create_kinematic_body(ColliderDesc::rect(config.size), config.position);
        let fire_mode = match config.mode {
            ControlMode::Aiming(_) => FireMode::EdgeTriggered,
            ControlMode::VerticalShooter(params) => params.fire_mode,
        };
        Self {
            body,
            size: config.size,
            color: config.color,
            mode: config.mode,
            gate: FireGate::new(fire_mode),
        }
    }

    pub fn body(&self) -> &PhysicsBody {
        &self.body
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn mode(&self) -> &ControlMode {
        &self.mode
    }

    /// Remove the body from the world. Returns `false` if it was already gone.
    pub fn destroy(&self, world: &mut PhysicsWorld) -> bool {
        world.destroy_body(&self.body)
    }

    /// Current position and orientation.
    pub fn transform(&self, world: &PhysicsWorld) -> Result<(Vec2, f32), SimError> {
        world
            .transform(&self.body)
            .ok_or(SimError::MissingBody("control"))
    }

    /// Apply this frame's input. Returns the projectile fired, if any.
    pub fn update(
        &mut self,
        world: &mut PhysicsWorld,
        pool: &mut ProjectilePool,
        input: &InputState,
        camera: &Camera2D,
        dt: f32,
    ) -> Result<Option<ProjectileId>, SimError> {
        let (position, _) = self.transform(world)?;

        match self.mode {
            ControlMode::Aiming(params) => {
                let target = camera.pixel_to_world(input.pointer);
                let angle = aim_angle(position, target);
                world.set_transform(&self.body, position, angle);

                let fire = self.gate.ready(
                    input.key_pressed(params.fire_key),
                    input.key_held(params.fire_key),
                );
                if !fire {
                    return Ok(None);
                }
                let tip = muzzle_tip(position, angle, params.muzzle_length);
                let velocity = launch_velocity(angle, params.muzzle_speed);
                Ok(Self::fire(world, pool, tip, angle, velocity))
            }
            ControlMode::VerticalShooter(params) => {
                let requested = if input.key_held(params.down_key) {
                    params.move_speed
                } else if input.key_held(params.up_key) {
                    -params.move_speed
                } else {
                    0.0
                };
                let vy = vertical_velocity(
                    position.y,
                    requested,
                    params.top_limit,
                    params.bottom_limit,
                    dt,
                );
                world.set_velocity(&self.body, Vec2::new(0.0, vy));

                let fire = self.gate.ready(
                    input.button_pressed(params.fire_button),
                    input.button_held(params.fire_button),
                );
                if !fire {
                    return Ok(None);
                }
                let spawn = position + Vec2::new(params.spawn_offset, 0.0);
                let velocity = Vec2::new(params.projectile_speed, 0.0);
                Ok(Self::fire(world, pool, spawn, 0.0, velocity))
            }
        }
    }

    fn fire(
        world: &mut PhysicsWorld,
        pool: &mut ProjectilePool,
        position: Vec2,
        angle: f32,
        velocity: Vec2,
    ) -> Option<ProjectileId> {
        let id = pool.spawn(world, position, angle, velocity)?;
        debug!(
            "projectile {} fired at ({:.1}, {:.1}), {} active",
            id.index,
            position.x,
            position.y,
            pool.active_count()
        );
        Some(id)
    }
}
