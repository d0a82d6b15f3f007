use std::collections::VecDeque;

use glam::Vec2;

/// Key codes the simulation reacts to (DOM `keyCode` values).
pub const KEY_SPACE: u32 = 32;
pub const KEY_UP: u32 = 38;
pub const KEY_DOWN: u32 = 40;

/// Pointer button index for the primary (left) button.
pub const BUTTON_LEFT: u32 = 0;

/// Input event types the simulation understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The window asked to close.
    Closed,
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
    /// The pointer moved to window pixel coordinates (x, y).
    PointerMove { x: f32, y: f32 },
    /// A pointer button was pressed.
    PointerDown { button: u32 },
    /// A pointer button was released.
    PointerUp { button: u32 },
}

/// Lazily polled producer of input events.
pub trait InputSource {
    /// Next pending event, or `None` once this frame's events are drained.
    fn poll_event(&mut self) -> Option<InputEvent>;
}

/// A FIFO queue of input events.
/// The host pushes events as they arrive; the loop drains them each frame.
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: VecDeque::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for InputQueue {
    fn poll_event(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }
}

/// Held state plus this frame's press edges, rebuilt from events.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held_keys: Vec<u32>,
    pressed_keys: Vec<u32>,
    held_buttons: Vec<u32>,
    pressed_buttons: Vec<u32>,
    /// Last known pointer position in window pixels.
    pub pointer: Vec2,
    close_requested: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget last frame's edges. Held state carries over.
    pub fn begin_frame(&mut self) {
        self.pressed_keys.clear();
        self.pressed_buttons.clear();
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Closed => self.close_requested = true,
            InputEvent::KeyDown { key_code } => {
                // OS key repeat sends KeyDown again while held; only the first is an edge.
                if !self.held_keys.contains(&key_code) {
                    self.held_keys.push(key_code);
                    self.pressed_keys.push(key_code);
                }
            }
            InputEvent::KeyUp { key_code } => self.held_keys.retain(|&k| k != key_code),
            InputEvent::PointerMove { x, y } => self.pointer = Vec2::new(x, y),
            InputEvent::PointerDown { button } => {
                if !self.held_buttons.contains(&button) {
                    self.held_buttons.push(button);
                    self.pressed_buttons.push(button);
                }
            }
            InputEvent::PointerUp { button } => self.held_buttons.retain(|&b| b != button),
        }
    }

    /// Drain every pending event from `source`. Returns how many were applied.
    pub fn drain_from(&mut self, source: &mut dyn InputSource) -> usize {
        let mut count = 0;
        while let Some(event) = source.poll_event() {
            self.apply(event);
            count += 1;
        }
        count
    }

    pub fn key_held(&self, key_code: u32) -> bool {
        self.held_keys.contains(&key_code)
    }

    /// Whether the key went down during the current frame.
    pub fn key_pressed(&self, key_code: u32) -> bool {
        self.pressed_keys.contains(&key_code)
    }

    pub fn button_held(&self, button: u32) -> bool {
        self.held_buttons.contains(&button)
    }

    pub fn button_pressed(&self, button: u32) -> bool {
        self.pressed_buttons.contains(&button)
    }

    pub fn close_requested(&self) -> bool {
        self.close_requested
    }
}
