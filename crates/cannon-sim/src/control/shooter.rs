//! Vertical shooter: the cannon slides along a vertical rail and fires
//! horizontally.

use serde::{Deserialize, Serialize};

use crate::input::queue::{BUTTON_LEFT, KEY_DOWN, KEY_UP};

/// How a held or pressed trigger turns into projectiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FireMode {
    /// One projectile per press.
    #[default]
    EdgeTriggered,
    /// Continuous fire while held, at most one projectile every
    /// `interval_frames` frames.
    RateLimited { interval_frames: u32 },
}

/// Per-frame trigger state for a [`FireMode`].
#[derive(Debug, Clone, Copy)]
pub struct FireGate {
    mode: FireMode,
    cooldown: u32,
}

impl FireGate {
    pub fn new(mode: FireMode) -> Self {
        Self { mode, cooldown: 0 }
    }

    pub fn mode(&self) -> FireMode {
        self.mode
    }

    /// Call exactly once per frame. Returns whether to fire this frame.
    pub fn ready(&mut self, pressed: bool, held: bool) -> bool {
        match self.mode {
            FireMode::EdgeTriggered => pressed,
            FireMode::RateLimited { interval_frames } => {
                self.cooldown = self.cooldown.saturating_sub(1);
                if (held || pressed) && self.cooldown == 0 {
                    self.cooldown = interval_frames.max(1);
                    true
                } else {
                    false
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShooterParams {
    /// Vertical speed while up/down is held, world units per second.
    pub move_speed: f32,
    /// Smallest y the body may reach (the ceiling side).
    pub top_limit: f32,
    /// Largest y the body may reach (the ground side).
    pub bottom_limit: f32,
    /// Horizontal offset from the body centre to the spawn point.
    pub spawn_offset: f32,
    pub projectile_speed: f32,
    #[serde(default)]
    pub fire_mode: FireMode,
    #[serde(default = "default_fire_button")]
    pub fire_button: u32,
    #[serde(default = "default_up_key")]
    pub up_key: u32,
    #[serde(default = "default_down_key")]
    pub down_key: u32,
}

fn default_fire_button() -> u32 {
    BUTTON_LEFT
}

fn default_up_key() -> u32 {
    KEY_UP
}

fn default_down_key() -> u32 {
    KEY_DOWN
}

impl Default for ShooterParams {
    fn default() -> Self {
        Self {
            move_speed: 30.0,
            top_limit: 10.0,
            bottom_limit: 90.0,
            spawn_offset: 10.0,
            projectile_speed: 90.0,
            fire_mode: FireMode::EdgeTriggered,
            fire_button: BUTTON_LEFT,
            up_key: KEY_UP,
            down_key: KEY_DOWN,
        }
    }
}

/// Vertical velocity for this frame.
///
/// `requested` is kept if one step of it leaves `y` inside `[top, bottom]`,
/// or brings a body that is outside the band closer to it. Otherwise the
/// body stops where it is.
pub fn vertical_velocity(y: f32, requested: f32, top: f32, bottom: f32, dt: f32) -> f32 {
    let outside = |p: f32| (top - p).max(p - bottom).max(0.0);
    let next = y + requested * dt;
    if outside(next) == 0.0 || outside(next) < outside(y) {
        requested
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn velocity_kept_inside_limits() {
        assert_eq!(vertical_velocity(50.0, 30.0, 10.0, 90.0, DT), 30.0);
        assert_eq!(vertical_velocity(50.0, -30.0, 10.0, 90.0, DT), -30.0);
        assert_eq!(vertical_velocity(50.0, 0.0, 10.0, 90.0, DT), 0.0);
    }

    #[test]
    fn velocity_suppressed_at_limits() {
        assert_eq!(vertical_velocity(89.8, 30.0, 10.0, 90.0, DT), 0.0);
        assert_eq!(vertical_velocity(10.2, -30.0, 10.0, 90.0, DT), 0.0);
        // Moving away from a limit is always allowed.
        assert_eq!(vertical_velocity(89.8, -30.0, 10.0, 90.0, DT), -30.0);
    }

    #[test]
    fn velocity_toward_band_allowed_from_outside() {
        assert_eq!(vertical_velocity(5.0, 30.0, 10.0, 90.0, DT), 30.0);
        assert_eq!(vertical_velocity(5.0, -30.0, 10.0, 90.0, DT), 0.0);
        assert_eq!(vertical_velocity(95.0, -30.0, 10.0, 90.0, DT), -30.0);
        assert_eq!(vertical_velocity(95.0, 30.0, 10.0, 90.0, DT), 0.0);
    }

    #[test]
    fn simulated_hold_never_crosses_bottom() {
        let mut y = 50.0;
        for _ in 0..1000 {
            y += vertical_velocity(y, 30.0, 10.0, 90.0, DT) * DT;
            assert!(y <= 90.0);
        }
        assert!(y > 89.0);
    }

    #[test]
    fn edge_trigger_fires_once_per_press() {
        let mut gate = FireGate::new(FireMode::EdgeTriggered);
        assert!(gate.ready(true, true));
        assert!(!gate.ready(false, true));
        assert!(!gate.ready(false, true));
        assert!(gate.ready(true, true));
    }

    #[test]
    fn rate_limited_fires_every_interval_while_held() {
        let mut gate = FireGate::new(FireMode::RateLimited { interval_frames: 3 });
        let fired: Vec<bool> = (0..7).map(|i| gate.ready(i == 0, true)).collect();
        assert_eq!(fired, vec![true, false, false, true, false, false, true]);
    }

    #[test]
    fn rate_limited_interval_one_fires_every_frame() {
        let mut gate = FireGate::new(FireMode::RateLimited { interval_frames: 1 });
        assert!((0..5).all(|_| gate.ready(false, true)));
        assert!(!gate.ready(false, false));
    }

    #[test]
    fn fire_mode_from_json() {
        let mode: FireMode =
            serde_json::from_str(r#"{"kind":"rate_limited","interval_frames":6}"#).unwrap();
        assert_eq!(mode, FireMode::RateLimited { interval_frames: 6 });
    }
}
