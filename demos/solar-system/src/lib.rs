use wasm_bindgen::prelude::*;

pub mod bodies;
pub mod control;
pub mod game;
pub mod orbit;
pub mod pause;
pub mod speeds;

use game::SolarSystem;

orrery_web::export_game!(SolarSystem, "solar-system");

// ---- Control surface ----

#[wasm_bindgen]
pub fn set_planet_speed(index: usize, value: f64) -> Result<(), JsError> {
    with_runner(|r| r.game_mut().set_speed(index, value)).map_err(JsError::from)
}

#[wasm_bindgen]
pub fn planet_speed(index: usize) -> Result<f64, JsError> {
    with_runner(|r| r.game().speed(index)).map_err(JsError::from)
}

/// Flip pause and return the new button label.
#[wasm_bindgen]
pub fn toggle_pause() -> String {
    with_runner(|r| r.game_mut().toggle_pause().label().to_string())
}

#[wasm_bindgen]
pub fn pause_label() -> String {
    with_runner(|r| r.game().run_state().label().to_string())
}

/// Slider and button descriptors for building the UI.
#[wasm_bindgen]
pub fn control_surface_json() -> Result<String, JsError> {
    with_runner(|r| r.game().control_surface().to_json()).map_err(JsError::from)
}
