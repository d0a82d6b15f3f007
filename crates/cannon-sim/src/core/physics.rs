use glam::Vec2;
use rapier2d::prelude::*;
use std::num::NonZeroUsize;
use std::sync::Mutex;

use crate::api::types::BodyId;

// ---------------------------------------------------------------------------
// Conversion helpers: glam ↔ nalgebra
// ---------------------------------------------------------------------------

fn vec2_to_na(v: Vec2) -> nalgebra::Vector2<f32> {
    nalgebra::Vector2::new(v.x, v.y)
}

fn na_to_vec2(v: &nalgebra::Vector2<f32>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

fn na_iso_to_pos_rot(iso: &nalgebra::Isometry2<f32>) -> (Vec2, f32) {
    let pos = Vec2::new(iso.translation.x, iso.translation.y);
    let rot = iso.rotation.angle();
    (pos, rot)
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// The kind of rigid body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Never moves. Used for the arena boundaries.
    Static,
    /// Moved only by explicit velocity/transform writes.
    Kinematic,
    /// Integrated by the solver.
    Dynamic,
}

impl BodyKind {
    fn to_rapier(self) -> RigidBodyType {
        match self {
            BodyKind::Static => RigidBodyType::Fixed,
            BodyKind::Kinematic => RigidBodyType::KinematicVelocityBased,
            BodyKind::Dynamic => RigidBodyType::Dynamic,
        }
    }
}

/// Shape description for a collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderDesc {
    Ball { radius: f32 },
    Cuboid { half_width: f32, half_height: f32 },
}

impl ColliderDesc {
    /// Box collider from full width/height.
    pub fn rect(size: Vec2) -> Self {
        ColliderDesc::Cuboid {
            half_width: size.x / 2.0,
            half_height: size.y / 2.0,
        }
    }

    fn build_collider(&self) -> ColliderBuilder {
        match *self {
            ColliderDesc::Ball { radius } => ColliderBuilder::ball(radius),
            ColliderDesc::Cuboid { half_width, half_height } => {
                ColliderBuilder::cuboid(half_width, half_height)
            }
        }
    }
}

/// Physical material properties for a collider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColliderMaterial {
    pub restitution: f32,
    pub friction: f32,
    pub density: f32,
}

impl Default for ColliderMaterial {
    fn default() -> Self {
        Self {
            restitution: 0.0,
            friction: 0.2,
            density: 1.0,
        }
    }
}

/// Handle pair referencing Rapier internals. Rapier handles carry a
/// generation, so a handle to a destroyed body never resolves again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicsBody {
    pub id: BodyId,
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
}

/// A contact event between two bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionPair {
    pub a: BodyId,
    pub b: BodyId,
    /// `true` when the contact just started, `false` when it ended.
    pub started: bool,
}

// ---------------------------------------------------------------------------
// WASM-safe event collector (no crossbeam)
// ---------------------------------------------------------------------------

struct DirectEventCollector {
    collisions: Mutex<Vec<CollisionEvent>>,
}

impl DirectEventCollector {
    fn new() -> Self {
        Self {
            collisions: Mutex::new(Vec::new()),
        }
    }

    fn drain_collisions(&self) -> Vec<CollisionEvent> {
        match self.collisions.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl EventHandler for DirectEventCollector {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        if let Ok(mut events) = self.collisions.lock() {
            events.push(event);
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: f32,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: f32,
    ) {
    }
}

// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// Wraps all Rapier2D boilerplate into a single struct.
/// Every body created here and not yet destroyed is live.
pub struct PhysicsWorld {
    gravity: nalgebra::Vector2<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    pub(crate) bodies: RigidBodySet,
    pub(crate) colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    event_collector: DirectEventCollector,
    next_id: u32,
}

impl PhysicsWorld {
    /// Create a new physics world with the given gravity vector.
    /// Y points down, so positive Y gravity pulls bodies toward the ground.
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity: vec2_to_na(gravity),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            event_collector: DirectEventCollector::new(),
            next_id: 1,
        }
    }

    pub fn gravity(&self) -> Vec2 {
        na_to_vec2(&self.gravity)
    }

    /// Create a boundary body that never moves.
    pub fn create_static_body(
        &mut self,
        shape: ColliderDesc,
        position: Vec2,
        material: ColliderMaterial,
    ) -> PhysicsBody {
        self.create_body(BodyKind::Static, shape, position, material)
    }

    /// Create a velocity-driven body. Gravity and contacts never move it.
    pub fn create_kinematic_body(&mut self, shape: ColliderDesc, position: Vec2) -> PhysicsBody {
        self.create_body(BodyKind::Kinematic, shape, position, ColliderMaterial::default())
    }

    /// Create a dynamic body at the origin. Callers place it with
    /// `set_transform` and launch it with `set_velocity`.
    pub fn create_dynamic_body(
        &mut self,
        shape: ColliderDesc,
        material: ColliderMaterial,
    ) -> PhysicsBody {
        self.create_body(BodyKind::Dynamic, shape, Vec2::ZERO, material)
    }

    fn create_body(
        &mut self,
        kind: BodyKind,
        shape: ColliderDesc,
        position: Vec2,
        material: ColliderMaterial,
    ) -> PhysicsBody {
        let id = BodyId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);

        let rb = RigidBodyBuilder::new(kind.to_rapier())
            .translation(vec2_to_na(position))
            .user_data(id.0 as u128)
            .build();
        let body_handle = self.bodies.insert(rb);

        let collider = shape
            .build_collider()
            .restitution(material.restitution)
            .friction(material.friction)
            .density(material.density)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();
        let collider_handle =
            self.colliders
                .insert_with_parent(collider, body_handle, &mut self.bodies);

        PhysicsBody {
            id,
            body_handle,
            collider_handle,
        }
    }

    /// Remove a body and its collider from the simulation.
    /// Returns `false` if the body was already gone.
    pub fn destroy_body(&mut self, body: &PhysicsBody) -> bool {
        self.bodies
            .remove(
                body.body_handle,
                &mut self.island_manager,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .is_some()
    }

    /// Whether the body is still part of the world.
    pub fn contains(&self, body: &PhysicsBody) -> bool {
        self.bodies.contains(body.body_handle)
    }

    pub fn kind(&self, body: &PhysicsBody) -> Option<BodyKind> {
        self.bodies.get(body.body_handle).map(|rb| match rb.body_type() {
            RigidBodyType::Fixed => BodyKind::Static,
            RigidBodyType::Dynamic => BodyKind::Dynamic,
            _ => BodyKind::Kinematic,
        })
    }

    /// Advance the world by `dt`. Contact events produced by the step are
    /// appended to `contacts`.
    pub fn step(
        &mut self,
        dt: f32,
        velocity_iterations: usize,
        position_iterations: usize,
        contacts: &mut Vec<CollisionPair>,
    ) {
        self.integration_parameters.dt = dt;
        self.integration_parameters.num_solver_iterations =
            NonZeroUsize::new(velocity_iterations).unwrap_or(NonZeroUsize::MIN);
        self.integration_parameters.num_internal_stabilization_iterations = position_iterations;

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &self.event_collector,
        );

        for event in self.event_collector.drain_collisions() {
            let (h1, h2, started) = match event {
                CollisionEvent::Started(h1, h2, _) => (h1, h2, true),
                CollisionEvent::Stopped(h1, h2, _) => (h1, h2, false),
            };
            if let (Some(a), Some(b)) = (self.collider_to_body(h1), self.collider_to_body(h2)) {
                contacts.push(CollisionPair { a, b, started });
            }
        }
    }

    /// Reset user forces and torques on every body.
    pub fn clear_forces(&mut self) {
        for (_, rb) in self.bodies.iter_mut() {
            rb.reset_forces(false);
            rb.reset_torques(false);
        }
    }

    /// Current position and rotation (radians), or `None` for a dead handle.
    pub fn transform(&self, body: &PhysicsBody) -> Option<(Vec2, f32)> {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_iso_to_pos_rot(rb.position()))
    }

    /// Teleport a body. Returns `false` for a dead handle.
    pub fn set_transform(&mut self, body: &PhysicsBody, position: Vec2, rotation: f32) -> bool {
        match self.bodies.get_mut(body.body_handle) {
            Some(rb) => {
                rb.set_position(nalgebra::Isometry2::new(vec2_to_na(position), rotation), true);
                true
            }
            None => false,
        }
    }

    pub fn velocity(&self, body: &PhysicsBody) -> Option<Vec2> {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_to_vec2(rb.linvel()))
    }

    /// Set the linear velocity directly. Returns `false` for a dead handle.
    pub fn set_velocity(&mut self, body: &PhysicsBody, vel: Vec2) -> bool {
        match self.bodies.get_mut(body.body_handle) {
            Some(rb) => {
                rb.set_linvel(vec2_to_na(vel), true);
                true
            }
            None => false,
        }
    }

    /// Apply a continuous force; cleared again by `clear_forces`.
    pub fn apply_force(&mut self, body: &PhysicsBody, force: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.add_force(vec2_to_na(force), true);
        }
    }

    /// Accumulated user force on a body.
    pub fn force(&self, body: &PhysicsBody) -> Vec2 {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_to_vec2(&rb.user_force()))
            .unwrap_or(Vec2::ZERO)
    }

    /// Number of rigid bodies in the simulation.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Query the collider shape of a physics body.
    pub fn collider_shape(&self, body: &PhysicsBody) -> Option<ColliderDesc> {
        let collider = self.colliders.get(body.collider_handle)?;
        shape_to_desc(collider.shape())
    }

    /// Every collider in the world with its world-space pose.
    pub fn colliders(&self) -> impl Iterator<Item = (ColliderDesc, Vec2, f32)> + '_ {
        self.colliders.iter().filter_map(|(_, collider)| {
            let desc = shape_to_desc(collider.shape())?;
            let (pos, rot) = na_iso_to_pos_rot(collider.position());
            Some((desc, pos, rot))
        })
    }

    fn collider_to_body(&self, collider_handle: ColliderHandle) -> Option<BodyId> {
        let collider = self.colliders.get(collider_handle)?;
        let body_handle = collider.parent()?;
        let body = self.bodies.get(body_handle)?;
        Some(BodyId(body.user_data as u32))
    }
}

fn shape_to_desc(shape: &dyn Shape) -> Option<ColliderDesc> {
    if let Some(ball) = shape.as_ball() {
        Some(ColliderDesc::Ball { radius: ball.radius })
    } else {
        shape.as_cuboid().map(|cuboid| ColliderDesc::Cuboid {
            half_width: cuboid.half_extents.x,
            half_height: cuboid.half_extents.y,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn step_n(world: &mut PhysicsWorld, n: usize) -> Vec<CollisionPair> {
        let mut contacts = Vec::new();
        for _ in 0..n {
            world.step(DT, 8, 8, &mut contacts);
            world.clear_forces();
        }
        contacts
    }

    fn circle(radius: f32) -> ColliderDesc {
        ColliderDesc::Ball { radius }
    }

    #[test]
    fn create_and_destroy_body() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let body = world.create_dynamic_body(
            ColliderDesc::Ball { radius: 1.0 },
            ColliderMaterial::default(),
        );
        assert_eq!(world.body_count(), 1);
        assert!(world.contains(&body));
        assert!(world.destroy_body(&body));
        assert_eq!(world.body_count(), 0);
        assert!(!world.contains(&body));
        assert!(!world.destroy_body(&body), "second destroy is a no-op");
        assert!(world.transform(&body).is_none());
    }

    #[test]
    fn gravity_pulls_dynamic_body_down() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, 9.8));
        let body = world.create_dynamic_body(
            ColliderDesc::Ball { radius: 0.5 },
            ColliderMaterial::default(),
        );
        world.set_transform(&body, Vec2::new(50.0, 10.0), 0.0);
        step_n(&mut world, 30);
        let (pos, _) = world.transform(&body).unwrap();
        assert!(pos.y > 10.0, "body should fall: y={}", pos.y);
    }

    #[test]
    fn static_body_does_not_move() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, 9.8));
        let ground = world.create_static_body(
            ColliderDesc::rect(Vec2::new(100.0, 10.0)),
            Vec2::new(50.0, 100.0),
            ColliderMaterial::default(),
        );
        step_n(&mut world, 30);
        let (pos, rot) = world.transform(&ground).unwrap();
        assert!((pos - Vec2::new(50.0, 100.0)).length() < 1e-4);
        assert!(rot.abs() < 1e-6);
        assert_eq!(world.kind(&ground), Some(BodyKind::Static));
    }

    #[test]
    fn kinematic_body_follows_velocity_and_ignores_gravity() {
        let mut world = PhysicsWorld::new(Vec2::new(0.0, 9.8));
        let cannon = world.create_kinematic_body(
            ColliderDesc::rect(Vec2::new(10.0, 5.0)),
            Vec2::new(0.0, 50.0),
        );
        world.set_velocity(&cannon, Vec2::new(0.0, 30.0));
        step_n(&mut world, 60);
        let (pos, _) = world.transform(&cannon).unwrap();
        assert!((pos.y - 80.0).abs() < 0.05, "y={}", pos.y);
        assert!(pos.x.abs() < 1e-4);
        assert_eq!(world.kind(&cannon), Some(BodyKind::Kinematic));
    }

    #[test]
    fn set_transform_and_velocity_round_trip() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let body = world.create_dynamic_body(
            ColliderDesc::Ball { radius: 2.0 },
            ColliderMaterial::default(),
        );
        assert!(world.set_transform(&body, Vec2::new(10.0, 20.0), 1.5));
        assert!(world.set_velocity(&body, Vec2::new(90.0, 0.0)));
        let (pos, rot) = world.transform(&body).unwrap();
        assert!((pos - Vec2::new(10.0, 20.0)).length() < 1e-4);
        assert!((rot - 1.5).abs() < 1e-4);
        let vel = world.velocity(&body).unwrap();
        assert!((vel.x - 90.0).abs() < 1e-4);
    }

    #[test]
    fn clear_forces_resets_accumulated_force() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let body = world.create_dynamic_body(
            ColliderDesc::Ball { radius: 1.0 },
            ColliderMaterial::default(),
        );
        world.apply_force(&body, Vec2::new(10.0, 0.0));
        assert!(world.force(&body).x > 0.0);
        world.clear_forces();
        assert_eq!(world.force(&body), Vec2::ZERO);
    }

    #[test]
    fn body_ids_are_unique() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let a = world.create_dynamic_body(circle(1.0), ColliderMaterial::default());
        let b = world.create_dynamic_body(circle(1.0), ColliderMaterial::default());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn contacts_reported_for_converging_bodies() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let a = world.create_dynamic_body(circle(2.0), ColliderMaterial::default());
        let b = world.create_dynamic_body(circle(2.0), ColliderMaterial::default());
        world.set_transform(&a, Vec2::new(0.0, 0.0), 0.0);
        world.set_transform(&b, Vec2::new(10.0, 0.0), 0.0);
        world.set_velocity(&a, Vec2::new(30.0, 0.0));
        world.set_velocity(&b, Vec2::new(-30.0, 0.0));

        let contacts = step_n(&mut world, 60);
        let started: Vec<_> = contacts.iter().filter(|c| c.started).collect();
        assert!(!started.is_empty(), "should have at least one contact start");
        let ids = [started[0].a, started[0].b];
        assert!(ids.contains(&a.id));
        assert!(ids.contains(&b.id));
    }

    #[test]
    fn collider_shapes_are_queryable() {
        let mut world = PhysicsWorld::new(Vec2::ZERO);
        let ball = world.create_dynamic_body(circle(0.5), ColliderMaterial::default());
        let wall = world.create_static_body(
            ColliderDesc::rect(Vec2::new(10.0, 100.0)),
            Vec2::new(0.0, 50.0),
            ColliderMaterial::default(),
        );
        assert_eq!(world.collider_shape(&ball), Some(ColliderDesc::Ball { radius: 0.5 }));
        match world.collider_shape(&wall) {
            Some(ColliderDesc::Cuboid { half_width, half_height }) => {
                assert!((half_width - 5.0).abs() < 1e-4);
                assert!((half_height - 50.0).abs() < 1e-4);
            }
            other => panic!("expected cuboid, got {:?}", other),
        }
        assert_eq!(world.colliders().count(), 2);
    }

    #[test]
    fn stepping_is_deterministic() {
        let run = || {
            let mut world = PhysicsWorld::new(Vec2::new(0.0, 9.8));
            world.create_static_body(
                ColliderDesc::rect(Vec2::new(100.0, 10.0)),
                Vec2::new(50.0, 100.0),
                ColliderMaterial::default(),
            );
            let ball = world.create_dynamic_body(
                ColliderDesc::Ball { radius: 0.5 },
                ColliderMaterial { restitution: 0.1, friction: 0.2, density: 1.0 },
            );
            world.set_transform(&ball, Vec2::new(20.0, 40.0), 0.3);
            world.set_velocity(&ball, Vec2::new(25.0, -10.0));
            let mut trace = Vec::new();
            let mut contacts = Vec::new();
            for _ in 0..240 {
                world.step(DT, 8, 8, &mut contacts);
                world.clear_forces();
                trace.push(world.transform(&ball).unwrap());
            }
            trace
        };
        assert_eq!(run(), run());
    }
}
