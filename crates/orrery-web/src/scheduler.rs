use std::cell::Cell;

use orrery_engine::{FrameCallback, FrameScheduler};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Window;

/// Schedules frames with `window.requestAnimationFrame`.
///
/// The browser decides the cadence (display refresh, throttled or suspended
/// in background tabs). `stop()` withdraws all future frames.
pub struct AnimationFrameScheduler {
    window: Window,
    stopped: Cell<bool>,
}

impl AnimationFrameScheduler {
    pub fn new() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global `window`"))?;
        Ok(Self {
            window,
            stopped: Cell::new(false),
        })
    }

    /// Stop scheduling. A frame already requested still fires but does not re-arm.
    pub fn stop(&self) {
        self.stopped.set(true);
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn schedule_next(&self, callback: FrameCallback) {
        if self.stopped.get() {
            return;
        }
        let closure = Closure::once_into_js(move || callback());
        if let Err(err) = self.window.request_animation_frame(closure.unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", err);
        }
    }
}
