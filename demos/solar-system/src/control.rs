/// Control surface descriptors: what the UI should show, as JSON.
///
/// The UI builds one slider per body and a pause button from this, then
/// talks back through `set_planet_speed` / `toggle_pause` (or the matching
/// custom input events).

use serde::Serialize;

use crate::bodies::Body;
use crate::pause::RunState;
use crate::speeds::SpeedTable;

pub const SPEED_MIN: f64 = 0.0;
pub const SPEED_MAX: f64 = 0.1;
pub const SPEED_STEP: f64 = 0.001;

/// One speed slider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderSpec {
    pub index: usize,
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// Current speed. May lie outside `min..=max` when set programmatically.
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlSurface {
    pub sliders: Vec<SliderSpec>,
    pub pause_label: &'static str,
}

impl ControlSurface {
    pub fn new(bodies: &[Body], speeds: &SpeedTable, state: RunState) -> Self {
        let sliders = bodies
            .iter()
            .map(|body| SliderSpec {
                index: body.index,
                label: format!("{} Speed:", body.name),
                min: SPEED_MIN,
                max: SPEED_MAX,
                step: SPEED_STEP,
                value: speeds.get_speed(body.index).unwrap_or(body.default_speed),
            })
            .collect();
        Self {
            sliders,
            pause_label: state.label(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
