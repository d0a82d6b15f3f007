use cannon_sim::{
    DrawBuffer, DrawInstance, FrameStatus, InputEvent, InputQueue, OutlineVertex, SimConfig,
    SimError, Simulation,
};

/// Owns one running simulation plus the buffers shared with JavaScript.
///
/// The browser pushes input events as they arrive and calls `tick` once per
/// animation frame; the renderer then reads the draw buffer through the
/// pointer accessors.
pub struct SimRunner {
    sim: Simulation,
    input: InputQueue,
    draw: DrawBuffer,
}

impl SimRunner {
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        let capacity = config.pool_capacity + config.boundaries.len() + 1;
        Ok(Self {
            sim: Simulation::new(config)?,
            input: InputQueue::new(),
            draw: DrawBuffer::with_capacity(capacity),
        })
    }

    /// Build from a JSON config; an empty string selects the default preset.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        if json.trim().is_empty() {
            return Self::new(SimConfig::default());
        }
        Self::new(SimConfig::from_json(json)?)
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run exactly one simulation frame with the queued input.
    pub fn tick(&mut self) -> Result<FrameStatus, SimError> {
        self.sim.frame(&mut self.input, &mut self.draw)
    }

    pub fn simulation(&self) -> &Simulation {
        &self.sim
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.sim.resize(width, height);
    }

    // ---- Pointer accessors for zero-copy reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.draw.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.draw.instance_count()
    }

    pub fn instance_floats(&self) -> u32 {
        DrawInstance::FLOATS as u32
    }

    pub fn outline_ptr(&self) -> *const f32 {
        self.draw.outline_ptr()
    }

    pub fn outline_vertex_count(&self) -> u32 {
        self.draw.outline_vertex_count()
    }

    pub fn outline_floats(&self) -> u32 {
        OutlineVertex::FLOATS as u32
    }

    pub fn clear_color(&self) -> [f32; 4] {
        let c = self.draw.clear_color;
        [c.r, c.g, c.b, c.a]
    }

    /// Column-major world-to-clip matrix for the current view.
    pub fn view_matrix(&self) -> [f32; 16] {
        self.sim.camera().projection_matrix().to_cols_array()
    }

    pub fn active_projectiles(&self) -> u32 {
        self.sim.session().pool.active_count() as u32
    }

    pub fn frame_count(&self) -> u64 {
        self.sim.frame_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cannon_sim::{BUTTON_LEFT, KEY_SPACE};

    #[test]
    fn empty_json_uses_cannon_preset() {
        let runner = SimRunner::from_json("").unwrap();
        assert_eq!(runner.simulation().config(), &SimConfig::cannon());
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(SimRunner::from_json("{\"pool_capacity\": 0}").is_err());
        assert!(SimRunner::from_json("not json").is_err());
    }

    #[test]
    fn tick_fills_draw_buffer() {
        let mut runner = SimRunner::new(SimConfig::cannon()).unwrap();
        runner.push_input(InputEvent::PointerMove { x: 800.0, y: 400.0 });
        runner.push_input(InputEvent::KeyDown { key_code: KEY_SPACE });
        assert_eq!(runner.tick().unwrap(), FrameStatus::Presented);

        // Three walls, the cannon and one projectile.
        assert_eq!(runner.instance_count(), 5);
        assert_eq!(runner.active_projectiles(), 1);
        assert!(runner.outline_vertex_count() > 0);
        assert!(!runner.instances_ptr().is_null());
        assert_eq!(runner.frame_count(), 1);
    }

    #[test]
    fn shooter_preset_from_json_fires_on_click() {
        let json = SimConfig::vertical_shooter().to_json().unwrap();
        let mut runner = SimRunner::from_json(&json).unwrap();
        runner.push_input(InputEvent::PointerDown { button: BUTTON_LEFT });
        runner.tick().unwrap();
        assert_eq!(runner.active_projectiles(), 1);
        assert_eq!(runner.outline_vertex_count(), 0);
    }

    #[test]
    fn close_stops_ticking() {
        let mut runner = SimRunner::new(SimConfig::cannon()).unwrap();
        runner.push_input(InputEvent::Closed);
        assert_eq!(runner.tick().unwrap(), FrameStatus::Closed);
        assert_eq!(runner.tick().unwrap(), FrameStatus::Closed);
        assert_eq!(runner.frame_count(), 0);
    }

    #[test]
    fn view_matrix_maps_playfield_to_clip_space() {
        let runner = SimRunner::new(SimConfig::cannon()).unwrap();
        let m = runner.view_matrix();
        // Column-major: x' = m[0]*x + m[12].
        assert!((m[0] * 0.0 + m[12] + 1.0).abs() < 1e-5);
        assert!((m[0] * 100.0 + m[12] - 1.0).abs() < 1e-5);
        // Y-down world: y = 0 is the top of the view.
        assert!((m[5] * 0.0 + m[13] - 1.0).abs() < 1e-5);
    }
}
