use glam::Vec2;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::api::types::ProjectileId;
use crate::core::physics::{ColliderDesc, ColliderMaterial, PhysicsBody, PhysicsWorld};

/// Shape and material every projectile is created with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileParams {
    pub radius: f32,
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
}

impl ProjectileParams {
    fn material(&self) -> ColliderMaterial {
        ColliderMaterial {
            restitution: self.restitution,
            friction: self.friction,
            density: self.density,
        }
    }
}

/// What an expiry check sees of one live projectile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileState {
    pub position: Vec2,
    /// Sweeps survived since spawn.
    pub age: u32,
}

/// Condition that frees a projectile's slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExpiryRule {
    /// Expire once the projectile is right of `x`.
    BeyondX { x: f32 },
    /// Expire once the projectile leaves the `[min, max]` rectangle.
    OutsideRect { min: Vec2, max: Vec2 },
    /// Expire after surviving `frames` sweeps, wherever the projectile is.
    Lifetime { frames: u32 },
}

impl ExpiryRule {
    pub fn is_expired(&self, state: &ProjectileState) -> bool {
        let position = state.position;
        match *self {
            ExpiryRule::BeyondX { x } => position.x > x,
            ExpiryRule::OutsideRect { min, max } => {
                position.x < min.x
                    || position.y < min.y
                    || position.x > max.x
                    || position.y > max.y
            }
            ExpiryRule::Lifetime { frames } => state.age >= frames,
        }
    }

    /// A projectile expires as soon as any rule matches.
    pub fn any(rules: &[ExpiryRule], state: &ProjectileState) -> bool {
        rules.iter().any(|rule| rule.is_expired(state))
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Slot {
    generation: u32,
    age: u32,
    body: Option<PhysicsBody>,
}

/// Fixed-capacity arena of projectile bodies.
///
/// The pool exclusively owns the dynamic body of every occupied slot:
/// emptying a slot always destroys its body in the world. The slot vector
/// is allocated once and never resized.
pub struct ProjectilePool {
    slots: Box<[Slot]>,
    params: ProjectileParams,
    active: usize,
}

impl ProjectilePool {
    pub fn new(capacity: usize, params: ProjectileParams) -> Self {
        Self {
            slots: vec![Slot::default(); capacity].into_boxed_slice(),
            params,
            active: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn active_count(&self) -> usize {
        self.active
    }

    pub fn is_full(&self) -> bool {
        self.active == self.slots.len()
    }

    pub fn params(&self) -> &ProjectileParams {
        &self.params
    }

    /// Create a projectile in the lowest-index empty slot.
    ///
    /// Returns `None` without touching the world when every slot is taken.
    pub fn spawn(
        &mut self,
        world: &mut PhysicsWorld,
        position: Vec2,
        orientation: f32,
        velocity: Vec2,
    ) -> Option<ProjectileId> {
        let Some(index) = self.slots.iter().position(|s| s.body.is_none()) else {
            trace!("projectile pool full ({}), spawn dropped", self.slots.len());
            return None;
        };

        let body = world.create_dynamic_body(
            ColliderDesc::Ball { radius: self.params.radius },
            self.params.material(),
        );
        world.set_transform(&body, position, orientation);
        world.set_velocity(&body, velocity);

        let slot = &mut self.slots[index];
        slot.body = Some(body);
        slot.age = 0;
        self.active += 1;
        Some(ProjectileId {
            index,
            generation: slot.generation,
        })
    }

    /// Destroy every projectile whose current state satisfies `expired`.
    /// Survivors age by one. Returns how many were removed.
    pub fn sweep(
        &mut self,
        world: &mut PhysicsWorld,
        mut expired: impl FnMut(&ProjectileState) -> bool,
    ) -> usize {
        let mut removed = 0;
        for slot in self.slots.iter_mut() {
            let Some(body) = slot.body else { continue };
            // A body missing from the world is culled along with the expired ones.
            let gone = match world.transform(&body) {
                Some((position, _)) => expired(&ProjectileState {
                    position,
                    age: slot.age,
                }),
                None => true,
            };
            if gone {
                world.destroy_body(&body);
                slot.body = None;
                slot.generation = slot.generation.wrapping_add(1);
                removed += 1;
            } else {
                slot.age = slot.age.saturating_add(1);
            }
        }
        self.active -= removed;
        if removed > 0 {
            debug!("expired {} projectile(s), {} active", removed, self.active);
        }
        removed
    }

    /// Destroy every live projectile. Used at session teardown.
    pub fn clear(&mut self, world: &mut PhysicsWorld) -> usize {
        self.sweep(world, |_| true)
    }

    /// Visit every active projectile in slot-index order.
    pub fn for_each_active(&self, mut visitor: impl FnMut(ProjectileId, &PhysicsBody)) {
        for (index, slot) in self.slots.iter().enumerate() {
            if let Some(body) = &slot.body {
                visitor(
                    ProjectileId {
                        index,
                        generation: slot.generation,
                    },
                    body,
                );
            }
        }
    }

    /// Body for `id`, if that exact occupancy is still alive.
    pub fn get(&self, id: ProjectileId) -> Option<&PhysicsBody> {
        let slot = self.slots.get(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.body.as_ref()
    }

    pub fn is_active(&self, id: ProjectileId) -> bool {
        self.get(id).is_some()
    }

    pub fn position_of(&self, world: &PhysicsWorld, id: ProjectileId) -> Option<Vec2> {
        let body = self.get(id)?;
        world.transform(body).map(|(pos, _)| pos)
    }
}
