use orrery_engine::TimeSource;
use wasm_bindgen::JsValue;
use web_sys::Performance;

/// Browser clock: `performance.now()` relative to the moment of creation.
pub struct PerformanceClock {
    performance: Performance,
    origin_ms: f64,
}

impl PerformanceClock {
    pub fn new() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global `window`"))?;
        let performance = window
            .performance()
            .ok_or_else(|| JsValue::from_str("`window.performance` unavailable"))?;
        let origin_ms = performance.now();
        Ok(Self { performance, origin_ms })
    }
}

impl TimeSource for PerformanceClock {
    fn elapsed(&self) -> f64 {
        (self.performance.now() - self.origin_ms).max(0.0) / 1000.0
    }
}
