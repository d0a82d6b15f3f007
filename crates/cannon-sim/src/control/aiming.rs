//! Pointer aiming: the cannon turns in place to face the pointer and fires
//! along its barrel.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::input::queue::KEY_SPACE;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AimingParams {
    /// Distance from the body centre to the barrel tip, world units.
    pub muzzle_length: f32,
    /// Launch speed along the barrel, world units per second.
    pub muzzle_speed: f32,
    /// Key whose press fires one projectile.
    #[serde(default = "default_fire_key")]
    pub fire_key: u32,
}

fn default_fire_key() -> u32 {
    KEY_SPACE
}

impl Default for AimingParams {
    fn default() -> Self {
        Self {
            muzzle_length: 7.5,
            muzzle_speed: 50.0,
            fire_key: KEY_SPACE,
        }
    }
}

/// Angle (radians) of the vector from `origin` to `target`.
/// In the Y-down world a positive angle turns clockwise on screen.
pub fn aim_angle(origin: Vec2, target: Vec2) -> f32 {
    let d = target - origin;
    d.y.atan2(d.x)
}

/// Barrel tip for a body at `position` rotated by `angle`.
pub fn muzzle_tip(position: Vec2, angle: f32, length: f32) -> Vec2 {
    position + Vec2::from_angle(angle) * length
}

pub fn launch_velocity(angle: f32, speed: f32) -> Vec2 {
    Vec2::from_angle(angle) * speed
}
