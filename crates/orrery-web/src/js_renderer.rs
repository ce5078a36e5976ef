use js_sys::{Float32Array, Function};
use orrery_engine::{DrawTiming, FrameData, ProtocolLayout, Renderer};
use wasm_bindgen::JsValue;

/// Renderer that packs each frame into a flat buffer for a JS callback.
///
/// `draw` only packs. The callback runs from `present`, after the runner
/// borrow is released, so JS may call back into the game exports.
pub struct JsRenderer {
    callback: Function,
    layout: ProtocolLayout,
    frame: Vec<f32>,
}

impl JsRenderer {
    pub fn new(callback: Function, layout: ProtocolLayout) -> Self {
        let frame = vec![0.0; layout.buffer_total_floats];
        Self { callback, layout, frame }
    }

    /// The last packed frame.
    pub fn frame(&self) -> &[f32] {
        &self.frame
    }

    /// Pass a copy of the last packed frame to the JS callback.
    pub fn present(&self) {
        let view = Float32Array::from(self.frame.as_slice());
        if let Err(err) = self.callback.call1(&JsValue::NULL, &view) {
            log::error!("frame callback threw: {:?}", err);
        }
    }
}

impl Renderer for JsRenderer {
    fn backend(&self) -> &'static str {
        "js-callback"
    }

    fn draw(&mut self, frame: &FrameData) -> DrawTiming {
        if let Err(err) = self.layout.write_frame(frame, &mut self.frame) {
            log::error!("frame dropped: {}", err);
        }
        DrawTiming::default()
    }
}
