//! Browser bridge for `cannon-sim`.
//!
//! JavaScript calls `sim_init` once, forwards DOM input through the
//! `sim_*` input functions, calls `sim_tick` every animation frame and reads
//! the draw records straight out of WASM memory.

pub mod runner;

pub use runner::SimRunner;

use std::cell::RefCell;

use cannon_sim::{FrameStatus, InputEvent, SimError};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<SimRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut SimRunner) -> R) -> Result<R, SimError> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow.as_mut().ok_or(SimError::NotInitialized)?;
        Ok(f(runner))
    })
}

fn to_js(err: SimError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Build the simulation. `config_json` may be empty for the default preset.
#[wasm_bindgen]
pub fn sim_init(config_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = SimRunner::from_json(config_json).map_err(to_js)?;
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("cannon-sim: initialized");
    Ok(())
}

/// Run one frame. Returns `false` once the simulation has closed.
#[wasm_bindgen]
pub fn sim_tick() -> Result<bool, JsValue> {
    let status = with_runner(|r| r.tick()).and_then(|res| res).map_err(to_js)?;
    Ok(status == FrameStatus::Presented)
}

/// Tear the session down. Further ticks report "not initialized".
#[wasm_bindgen]
pub fn sim_shutdown() {
    RUNNER.with(|cell| {
        if cell.borrow_mut().take().is_some() {
            log::info!("cannon-sim: shut down");
        }
    });
}

fn push(event: InputEvent) -> Result<(), JsValue> {
    with_runner(|r| r.push_input(event)).map_err(to_js)
}

#[wasm_bindgen]
pub fn sim_close() -> Result<(), JsValue> {
    push(InputEvent::Closed)
}

#[wasm_bindgen]
pub fn sim_key_down(key_code: u32) -> Result<(), JsValue> {
    push(InputEvent::KeyDown { key_code })
}

#[wasm_bindgen]
pub fn sim_key_up(key_code: u32) -> Result<(), JsValue> {
    push(InputEvent::KeyUp { key_code })
}

#[wasm_bindgen]
pub fn sim_pointer_move(x: f32, y: f32) -> Result<(), JsValue> {
    push(InputEvent::PointerMove { x, y })
}

#[wasm_bindgen]
pub fn sim_pointer_down(button: u32) -> Result<(), JsValue> {
    push(InputEvent::PointerDown { button })
}

#[wasm_bindgen]
pub fn sim_pointer_up(button: u32) -> Result<(), JsValue> {
    push(InputEvent::PointerUp { button })
}

#[wasm_bindgen]
pub fn sim_resize(width: f32, height: f32) -> Result<(), JsValue> {
    with_runner(|r| r.resize(width, height)).map_err(to_js)
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_instances_ptr() -> Result<*const f32, JsValue> {
    with_runner(|r| r.instances_ptr()).map_err(to_js)
}

#[wasm_bindgen]
pub fn get_instance_count() -> Result<u32, JsValue> {
    with_runner(|r| r.instance_count()).map_err(to_js)
}

#[wasm_bindgen]
pub fn get_instance_floats() -> Result<u32, JsValue> {
    with_runner(|r| r.instance_floats()).map_err(to_js)
}

#[wasm_bindgen]
pub fn get_outline_ptr() -> Result<*const f32, JsValue> {
    with_runner(|r| r.outline_ptr()).map_err(to_js)
}

#[wasm_bindgen]
pub fn get_outline_vertex_count() -> Result<u32, JsValue> {
    with_runner(|r| r.outline_vertex_count()).map_err(to_js)
}

#[wasm_bindgen]
pub fn get_outline_floats() -> Result<u32, JsValue> {
    with_runner(|r| r.outline_floats()).map_err(to_js)
}

#[wasm_bindgen]
pub fn get_clear_color() -> Result<js_sys::Float32Array, JsValue> {
    let color = with_runner(|r| r.clear_color()).map_err(to_js)?;
    Ok(js_sys::Float32Array::from(&color[..]))
}

#[wasm_bindgen]
pub fn get_view_matrix() -> Result<js_sys::Float32Array, JsValue> {
    let matrix = with_runner(|r| r.view_matrix()).map_err(to_js)?;
    Ok(js_sys::Float32Array::from(&matrix[..]))
}

#[wasm_bindgen]
pub fn get_active_projectiles() -> Result<u32, JsValue> {
    with_runner(|r| r.active_projectiles()).map_err(to_js)
}
