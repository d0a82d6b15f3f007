pub mod api;
pub mod control;
pub mod core;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::SimConfig;
pub use api::error::SimError;
pub use api::simulation::{CollisionHook, NoCollisionCheck, Simulation};
pub use api::types::{BodyId, FrameStatus, ProjectileId};
pub use control::aiming::AimingParams;
pub use control::shooter::{FireGate, FireMode, ShooterParams};
pub use control::{ControlBody, ControlConfig, ControlMode};
pub use crate::core::arena::{Arena, Boundary, BoundaryConfig};
pub use crate::core::physics::{
    BodyKind, ColliderDesc, ColliderMaterial, CollisionPair, PhysicsBody, PhysicsWorld,
};
pub use crate::core::pool::{ExpiryRule, ProjectileParams, ProjectilePool};
pub use crate::core::session::Session;
pub use crate::core::time::FrameLimiter;
pub use input::queue::{
    InputEvent, InputQueue, InputSource, InputState, BUTTON_LEFT, KEY_DOWN, KEY_SPACE, KEY_UP,
};
pub use renderer::buffer::{DrawBuffer, DrawInstance, OutlineVertex, KIND_CIRCLE, KIND_RECT};
pub use renderer::camera::Camera2D;
pub use renderer::sink::{CirclePrimitive, Color, RectPrimitive, RenderSink};
pub use systems::debug::debug_draw_world;
pub use systems::render::draw_session;
