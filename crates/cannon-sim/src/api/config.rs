use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::error::SimError;
use crate::control::aiming::AimingParams;
use crate::control::shooter::ShooterParams;
use crate::control::{ControlConfig, ControlMode};
use crate::core::arena::BoundaryConfig;
use crate::core::pool::{ExpiryRule, ProjectileParams};
use crate::renderer::camera::Camera2D;
use crate::renderer::sink::Color;

/// Full configuration for one simulation session.
///
/// Missing JSON fields fall back to the [`SimConfig::cannon`] preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Frame rate cap for the native loop (default: 60).
    pub target_fps: u32,
    /// Solver iterations per step (default: 8).
    pub velocity_iterations: usize,
    /// Stabilization iterations per step (default: 8).
    pub position_iterations: usize,
    /// Y points down, so positive Y gravity pulls toward the ground.
    pub gravity: Vec2,
    /// Window size in pixels.
    pub window_width: u32,
    pub window_height: u32,
    /// World-space rectangle shown in the window.
    pub view_center: Vec2,
    pub view_size: Vec2,
    pub clear_color: Color,
    /// Maximum number of simultaneously live projectiles.
    pub pool_capacity: usize,
    pub projectile: ProjectileParams,
    pub projectile_color: Color,
    /// A projectile is removed as soon as any rule matches.
    pub expiry: Vec<ExpiryRule>,
    pub boundaries: Vec<BoundaryConfig>,
    pub control: ControlConfig,
    /// Draw collider outlines on top of every frame.
    pub debug_draw: bool,
    pub debug_color: Color,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::cannon()
    }
}

impl SimConfig {
    /// Rotating cannon aimed with the pointer, fired with space.
    pub fn cannon() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            target_fps: 60,
            velocity_iterations: 8,
            position_iterations: 8,
            gravity: Vec2::new(0.0, 9.8),
            window_width: 800,
            window_height: 800,
            view_center: Vec2::new(50.0, 50.0),
            view_size: Vec2::new(100.0, 100.0),
            clear_color: Color::BLACK,
            pool_capacity: 500,
            projectile: ProjectileParams {
                radius: 0.5,
                density: 1.0,
                friction: 0.2,
                restitution: 0.1,
            },
            projectile_color: Color::WHITE,
            expiry: vec![
                ExpiryRule::OutsideRect {
                    min: Vec2::new(-20.0, -200.0),
                    max: Vec2::new(120.0, 120.0),
                },
                // Shots settle on the walled floor; free them after 10 s.
                ExpiryRule::Lifetime { frames: 600 },
            ],
            boundaries: vec![
                BoundaryConfig::new(Vec2::new(50.0, 100.0), Vec2::new(100.0, 10.0))
                    .with_friction(0.5),
                BoundaryConfig::new(Vec2::new(0.0, 50.0), Vec2::new(10.0, 100.0))
                    .with_restitution(1.0),
                BoundaryConfig::new(Vec2::new(100.0, 50.0), Vec2::new(10.0, 100.0))
                    .with_restitution(1.0),
            ],
            control: ControlConfig {
                position: Vec2::new(10.0, 50.0),
                size: Vec2::new(15.0, 10.0),
                color: Color::RED,
                mode: ControlMode::Aiming(AimingParams::default()),
            },
            debug_draw: true,
            debug_color: Color::GREEN,
        }
    }

    /// Cannon sliding on a vertical rail, firing right on left click.
    pub fn vertical_shooter() -> Self {
        Self {
            gravity: Vec2::new(0.0, 0.1),
            projectile: ProjectileParams {
                radius: 2.0,
                density: 2.0,
                friction: 1.0,
                restitution: 0.5,
            },
            expiry: vec![ExpiryRule::BeyondX { x: 800.0 }],
            boundaries: vec![
                BoundaryConfig::new(Vec2::new(50.0, 100.0), Vec2::new(100.0, 10.0))
                    .with_friction(0.1),
                BoundaryConfig::new(Vec2::new(50.0, 0.0), Vec2::new(100.0, 10.0)),
                BoundaryConfig::new(Vec2::new(0.0, 50.0), Vec2::new(10.0, 100.0)),
            ],
            control: ControlConfig {
                position: Vec2::new(0.0, 50.0),
                size: Vec2::new(10.0, 5.0),
                color: Color::GREEN,
                mode: ControlMode::VerticalShooter(ShooterParams::default()),
            },
            debug_draw: false,
            ..Self::cannon()
        }
    }

    /// Parse a JSON configuration and validate it.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values no session can run with.
    pub fn validate(&self) -> Result<(), SimError> {
        fn invalid(reason: impl Into<String>) -> Result<(), SimError> {
            Err(SimError::InvalidConfig(reason.into()))
        }

        if !(self.fixed_dt.is_finite() && self.fixed_dt > 0.0) {
            return invalid(format!("fixed_dt must be positive, got {}", self.fixed_dt));
        }
        if self.velocity_iterations == 0 || self.position_iterations == 0 {
            return invalid("solver iteration counts must be at least 1");
        }
        if self.pool_capacity == 0 {
            return invalid("pool_capacity must be at least 1");
        }
        if self.window_width == 0 || self.window_height == 0 {
            return invalid("window must not be empty");
        }
        if self.view_size.x <= 0.0 || self.view_size.y <= 0.0 {
            return invalid("view_size must be positive");
        }
        if self.projectile.radius <= 0.0 {
            return invalid("projectile radius must be positive");
        }
        if let ControlMode::VerticalShooter(params) = &self.control.mode {
            if params.top_limit >= params.bottom_limit {
                return invalid(format!(
                    "top_limit {} must be above bottom_limit {}",
                    params.top_limit, params.bottom_limit
                ));
            }
            let y = self.control.position.y;
            if y < params.top_limit || y > params.bottom_limit {
                return invalid(format!(
                    "control starts at y = {} outside [{}, {}]",
                    y, params.top_limit, params.bottom_limit
                ));
            }
        }
        for rule in &self.expiry {
            match *rule {
                ExpiryRule::OutsideRect { min, max } if min.x >= max.x || min.y >= max.y => {
                    return invalid("expiry rectangle is empty");
                }
                ExpiryRule::Lifetime { frames: 0 } => {
                    return invalid("projectile lifetime must be at least 1 frame");
                }
                _ => {}
            }
        }
        Ok(())
    }

    pub fn camera(&self) -> Camera2D {
        Camera2D::new(
            self.view_size,
            self.view_center,
            Vec2::new(self.window_width as f32, self.window_height as f32),
        )
    }
}
