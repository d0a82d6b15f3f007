use log::info;

use crate::api::config::SimConfig;
use crate::control::ControlBody;
use crate::core::arena::Arena;
use crate::core::physics::PhysicsWorld;
use crate::core::pool::ProjectilePool;

/// Everything a running simulation owns.
///
/// Built in dependency order: world, arena, control body, pool. Teardown
/// runs in reverse and destroys every body before the world goes away.
pub struct Session {
    pub world: PhysicsWorld,
    pub arena: Arena,
    pub control: ControlBody,
    pub pool: ProjectilePool,
}

impl Session {
    pub fn new(config: &SimConfig) -> Self {
        let mut world = PhysicsWorld::new(config.gravity);
        let arena = Arena::build(&mut world, &config.boundaries);
        let control = ControlBody::spawn(&mut world, &config.control);
        let pool = ProjectilePool::new(config.pool_capacity, config.projectile);
        info!(
            "session started: {} boundaries, pool capacity {}",
            arena.len(),
            pool.capacity()
        );
        Self {
            world,
            arena,
            control,
            pool,
        }
    }

    /// Destroy every body: projectiles, then the control body, then the
    /// boundaries. The session cannot run frames afterwards. Returns how
    /// many bodies were removed.
    pub fn shutdown(&mut self) -> usize {
        let projectiles = self.pool.clear(&mut self.world);
        let control = usize::from(self.control.destroy(&mut self.world));
        let boundaries = self.arena.destroy(&mut self.world);
        let removed = projectiles + control + boundaries;
        if removed > 0 {
            info!(
                "session shutdown: destroyed {} projectile(s) and {} other bodies",
                projectiles,
                control + boundaries
            );
        }
        removed
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn builds_world_in_order() {
        let config = SimConfig::cannon();
        let session = Session::new(&config);
        // Boundaries plus the cannon.
        assert_eq!(session.world.body_count(), config.boundaries.len() + 1);
        assert_eq!(session.pool.capacity(), config.pool_capacity);
        assert_eq!(session.pool.active_count(), 0);
    }

    #[test]
    fn shutdown_destroys_every_body() {
        let config = SimConfig::vertical_shooter();
        let mut session = Session::new(&config);
        let fixed = session.world.body_count();
        for i in 0..4 {
            let at = Vec2::new(20.0, 20.0 + i as f32 * 10.0);
            session.pool.spawn(&mut session.world, at, 0.0, Vec2::ZERO).unwrap();
        }
        assert_eq!(session.world.body_count(), fixed + 4);

        assert_eq!(session.shutdown(), fixed + 4);
        assert_eq!(session.world.body_count(), 0);
        assert_eq!(session.pool.active_count(), 0);
        assert!(session.control.transform(&session.world).is_err());
        assert_eq!(session.shutdown(), 0);
    }
}
