pub mod clock;
pub mod js_renderer;
pub mod runner;
pub mod scheduler;

pub use clock::PerformanceClock;
pub use js_renderer::JsRenderer;
pub use runner::{drive, GameRunner};
pub use scheduler::AnimationFrameScheduler;

// Paths used by `export_game!` expansions.
pub use js_sys;
pub use orrery_engine;

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Generates:
/// - `thread_local!` storage for the GameRunner, the browser clock and the
///   animation-frame scheduler
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (init, tick, the frame loop, input handlers,
///   data and capacity accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod game;
/// use game::MyGame;
///
/// orrery_web::export_game!(MyGame, "my-game");
/// ```
///
/// The calling crate must depend on `wasm-bindgen`, `log`, `console_log`
/// and `console_error_panic_hook`.
///
/// # Arguments
///
/// - `$game_type`: The game struct type that implements `orrery_engine::Game`
///   and has a `new()` constructor
/// - `$game_name`: A string literal used in log messages
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;
        use std::rc::Rc;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
            static CLOCK: RefCell<Option<Rc<$crate::PerformanceClock>>> = RefCell::new(None);
            static SCHEDULER: RefCell<Option<Rc<$crate::AnimationFrameScheduler>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Game not initialized. Call game_init() first.");
                f(runner)
            })
        }

        fn install(config: Option<$crate::orrery_engine::GameConfig>) {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let game = <$game_type>::new();
            let mut runner = match config {
                Some(config) => $crate::GameRunner::with_config(game, config),
                None => $crate::GameRunner::new(game),
            };
            runner.init();

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            match $crate::PerformanceClock::new() {
                Ok(clock) => CLOCK.with(|cell| *cell.borrow_mut() = Some(Rc::new(clock))),
                Err(err) => log::error!("{}: no performance clock: {:?}", $game_name, err),
            }
            log::info!("{}: initialized", $game_name);
        }

        fn clock() -> Option<Rc<$crate::PerformanceClock>> {
            CLOCK.with(|cell| cell.borrow().clone())
        }

        #[wasm_bindgen]
        pub fn game_init() {
            install(None);
        }

        /// Initialize with a JSON config. Invalid JSON falls back to the game's defaults.
        #[wasm_bindgen]
        pub fn game_init_with_config(json: &str) {
            match $crate::orrery_engine::GameConfig::from_json(json) {
                Ok(config) => install(Some(config)),
                Err(err) => {
                    log::warn!("{}: {}; using default config", $game_name, err);
                    install(None);
                }
            }
        }

        /// Tick at the browser clock's current reading.
        #[wasm_bindgen]
        pub fn game_tick() {
            use $crate::orrery_engine::TimeSource;
            match clock() {
                Some(clock) => with_runner(|r| r.tick(clock.elapsed())),
                None => log::warn!("{}: game_tick without a clock", $game_name),
            }
        }

        /// Tick at an explicit time source reading (seconds).
        #[wasm_bindgen]
        pub fn game_tick_at(elapsed: f64) {
            with_runner(|r| r.tick(elapsed));
        }

        /// Run the frame loop on animation frames. Each frame is packed with
        /// the runner's protocol layout and passed to `on_frame` as a Float32Array.
        #[wasm_bindgen]
        pub fn game_start(on_frame: $crate::js_sys::Function) -> Result<(), JsValue> {
            let clock = clock().ok_or_else(|| JsValue::from_str("game not initialized"))?;
            let scheduler = Rc::new($crate::AnimationFrameScheduler::new()?);
            if let Some(previous) = SCHEDULER.with(|cell| cell.borrow_mut().replace(Rc::clone(&scheduler))) {
                previous.stop();
            }

            let layout = with_runner(|r| r.layout().clone());
            let mut renderer = $crate::JsRenderer::new(on_frame, layout);
            $crate::orrery_engine::run_loop(scheduler, move || {
                with_runner(|r| r.step(&*clock, &mut renderer));
                renderer.present();
            });
            log::info!("{}: frame loop started", $game_name);
            Ok(())
        }

        /// Stop the frame loop started by `game_start`.
        #[wasm_bindgen]
        pub fn game_stop() {
            if let Some(scheduler) = SCHEDULER.with(|cell| cell.borrow_mut().take()) {
                scheduler.stop();
                log::info!("{}: frame loop stopped", $game_name);
            }
        }

        #[wasm_bindgen]
        pub fn game_resize(width: f32, height: f32) {
            with_runner(|r| r.resize(width, height));
        }

        #[wasm_bindgen]
        pub fn game_key_down(key_code: u32) {
            with_runner(|r| r.push_input($crate::orrery_engine::InputEvent::KeyDown { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_key_up(key_code: u32) {
            with_runner(|r| r.push_input($crate::orrery_engine::InputEvent::KeyUp { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| r.push_input($crate::orrery_engine::InputEvent::Custom { kind, a, b, c }));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_sdf_instances_ptr() -> *const f32 {
            with_runner(|r| r.sdf_instances_ptr())
        }

        #[wasm_bindgen]
        pub fn get_sdf_instance_count() -> u32 {
            with_runner(|r| r.sdf_instance_count())
        }

        #[wasm_bindgen]
        pub fn get_backdrop_vertices_ptr() -> *const f32 {
            with_runner(|r| r.backdrop_vertices_ptr())
        }

        #[wasm_bindgen]
        pub fn get_backdrop_vertex_count() -> u32 {
            with_runner(|r| r.backdrop_vertex_count())
        }

        #[wasm_bindgen]
        pub fn get_vector_vertices_ptr() -> *const f32 {
            with_runner(|r| r.vector_vertices_ptr())
        }

        #[wasm_bindgen]
        pub fn get_vector_vertex_count() -> u32 {
            with_runner(|r| r.vector_vertex_count())
        }

        #[wasm_bindgen]
        pub fn get_star_points_ptr() -> *const f32 {
            with_runner(|r| r.star_points_ptr())
        }

        #[wasm_bindgen]
        pub fn get_star_point_count() -> u32 {
            with_runner(|r| r.star_point_count())
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len())
        }

        #[wasm_bindgen]
        pub fn get_viewport_width() -> f32 {
            with_runner(|r| r.viewport_width())
        }

        #[wasm_bindgen]
        pub fn get_viewport_height() -> f32 {
            with_runner(|r| r.viewport_height())
        }

        #[wasm_bindgen]
        pub fn get_frame_count() -> f64 {
            with_runner(|r| r.frame_count() as f64)
        }

        // ---- Bake state accessor ----

        #[wasm_bindgen]
        pub fn get_bake_state() -> u32 {
            with_runner(|r| r.bake_generation())
        }

        // ---- Lighting accessors ----

        #[wasm_bindgen]
        pub fn get_lights_ptr() -> *const f32 {
            with_runner(|r| r.lights_ptr())
        }

        #[wasm_bindgen]
        pub fn get_light_count() -> u32 {
            with_runner(|r| r.light_count())
        }

        #[wasm_bindgen]
        pub fn get_ambient_intensity() -> f32 {
            with_runner(|r| r.ambient().intensity)
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_sdf_instances() -> u32 {
            with_runner(|r| r.max_sdf_instances())
        }

        #[wasm_bindgen]
        pub fn get_max_vector_vertices() -> u32 {
            with_runner(|r| r.max_vector_vertices())
        }

        #[wasm_bindgen]
        pub fn get_max_star_points() -> u32 {
            with_runner(|r| r.max_star_points())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }

        #[wasm_bindgen]
        pub fn get_max_lights() -> u32 {
            with_runner(|r| r.max_lights())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats())
        }
    };
}
