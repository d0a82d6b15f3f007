use std::thread;
use std::time::Instant;

use log::{debug, info};

use crate::api::config::SimConfig;
use crate::api::error::SimError;
use crate::api::types::FrameStatus;
use crate::core::physics::CollisionPair;
use crate::core::pool::ExpiryRule;
use crate::core::session::Session;
use crate::core::time::FrameLimiter;
use crate::input::queue::{InputSource, InputState};
use crate::renderer::camera::Camera2D;
use crate::renderer::sink::RenderSink;
use crate::systems::debug::debug_draw_world;
use crate::systems::render::draw_session;

/// Per-frame collision check, run before the control body is updated.
///
/// `contacts` holds the pairs reported by the previous physics step.
pub trait CollisionHook {
    fn check(&mut self, _session: &mut Session, _contacts: &[CollisionPair]) {}
}

/// Hook that ignores every contact.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCollisionCheck;

impl CollisionHook for NoCollisionCheck {}

/// The fixed-timestep update/draw loop around one [`Session`].
pub struct Simulation {
    config: SimConfig,
    session: Session,
    camera: Camera2D,
    input: InputState,
    contacts: Vec<CollisionPair>,
    hook: Box<dyn CollisionHook>,
    frames: u64,
    closed: bool,
}

impl Simulation {
    /// Validate `config` and build the session.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        let session = Session::new(&config);
        let camera = config.camera();
        Ok(Self {
            config,
            session,
            camera,
            input: InputState::new(),
            contacts: Vec::new(),
            hook: Box::new(NoCollisionCheck),
            frames: 0,
            closed: false,
        })
    }

    pub fn with_hook(mut self, hook: impl CollisionHook + 'static) -> Self {
        self.hook = Box::new(hook);
        self
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn camera(&self) -> &Camera2D {
        &self.camera
    }

    /// Window resized; the visible world rectangle stays the same.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.camera.resize(glam::Vec2::new(width, height));
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Number of frames presented so far.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Run one frame: clear, drain input, collision check, control update,
    /// one physics step, expiry sweep, draw, present.
    pub fn frame(
        &mut self,
        source: &mut dyn InputSource,
        sink: &mut dyn RenderSink,
    ) -> Result<FrameStatus, SimError> {
        if self.closed {
            return Ok(FrameStatus::Closed);
        }

        sink.clear(self.config.clear_color);

        self.input.begin_frame();
        self.input.drain_from(source);
        if self.input.close_requested() {
            self.closed = true;
            info!("close requested after {} frame(s)", self.frames);
            return Ok(FrameStatus::Closed);
        }

        self.hook.check(&mut self.session, &self.contacts);
        self.contacts.clear();

        let dt = self.config.fixed_dt;
        let session = &mut self.session;
        session
            .control
            .update(&mut session.world, &mut session.pool, &self.input, &self.camera, dt)?;

        session.world.step(
            dt,
            self.config.velocity_iterations,
            self.config.position_iterations,
            &mut self.contacts,
        );
        session.world.clear_forces();

        let expiry = &self.config.expiry;
        session
            .pool
            .sweep(&mut session.world, |state| ExpiryRule::any(expiry, state));

        draw_session(session, sink, self.config.projectile_color)?;
        if self.config.debug_draw {
            debug_draw_world(&session.world, sink, self.config.debug_color);
        }

        sink.present();
        self.frames += 1;
        Ok(FrameStatus::Presented)
    }

    /// Drive frames until a close event arrives, sleeping between frames to
    /// stay at or below `target_fps`. Returns the number of frames presented.
    pub fn run(
        &mut self,
        source: &mut dyn InputSource,
        sink: &mut dyn RenderSink,
    ) -> Result<u64, SimError> {
        let limiter = FrameLimiter::new(self.config.target_fps);
        info!(
            "simulation running at {:.1} Hz, dt {:.4}s",
            1.0 / limiter.frame_budget().as_secs_f64(),
            self.config.fixed_dt
        );
        loop {
            let started = Instant::now();
            if self.frame(source, sink)? == FrameStatus::Closed {
                break;
            }
            let wait = limiter.remaining(started.elapsed());
            if !wait.is_zero() {
                thread::sleep(wait);
            }
        }
        debug!("{} projectile(s) live at close", self.session.pool.active_count());
        self.session.shutdown();
        Ok(self.frames)
    }
}
