use std::cell::RefCell;
use std::rc::Rc;

use orrery_engine::{
    build_sdf_buffer, run_loop, AmbientLight, BakeState, DrawTiming, EngineContext, FrameData,
    FrameScheduler, Game, GameConfig, InputEvent, InputQueue, PointBuffer, ProtocolLayout,
    RenderContext, Renderer, SDFBuffer, TimeSource, VectorState,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]` (see `export_game!`), because
/// wasm-bindgen cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    sdf_buffer: SDFBuffer,
    baked_vectors: VectorState,
    star_points: PointBuffer,
    bake_state: BakeState,
    /// Camera and backdrop generations the current bake was made from.
    baked_for: Option<(u64, u64)>,
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
    frames: u64,
}

impl<G: Game> GameRunner<G> {
    /// Runner using the game's own config.
    pub fn new(game: G) -> Self {
        let config = game.config();
        Self::with_config(game, config)
    }

    /// Runner using an externally supplied config.
    pub fn with_config(game: G, config: GameConfig) -> Self {
        Self {
            game,
            ctx: EngineContext::from_config(&config),
            input: InputQueue::new(),
            sdf_buffer: SDFBuffer::with_capacity(config.max_sdf_instances),
            baked_vectors: VectorState::with_capacity(config.max_vector_vertices),
            star_points: PointBuffer::with_capacity(config.max_star_points),
            bake_state: BakeState::default(),
            baked_for: None,
            layout: ProtocolLayout::from_config(&config),
            config,
            initialized: false,
            frames: 0,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.ctx = EngineContext::from_config(&self.config);
        self.ctx.backdrop.scatter_stars(&self.config.stars);
        self.game.init(&mut self.ctx);
        self.initialized = true;
        log::info!(
            "runner initialized: {} entities, {} stars, {} rings, {} lights",
            self.ctx.scene.len(),
            self.ctx.backdrop.stars().len(),
            self.ctx.backdrop.rings().len(),
            self.ctx.lights.count(),
        );
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Push an input event into the queue. Consumed by the next tick.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Resize the viewport. The backdrop is re-baked on the next tick.
    pub fn resize(&mut self, width: f32, height: f32) {
        if self.ctx.camera.set_viewport(width, height) {
            self.config.viewport_width = width;
            self.config.viewport_height = height;
            log::info!("viewport resized to {}x{}", width, height);
        }
    }

    /// Run one animation step for the time source reading `elapsed`.
    pub fn tick(&mut self, elapsed: f64) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();
        self.ctx.set_elapsed(elapsed);

        let resizes: Vec<(f32, f32)> = self
            .input
            .iter()
            .filter_map(|event| match *event {
                InputEvent::Resize { width, height } => Some((width, height)),
                _ => None,
            })
            .collect();
        for (width, height) in resizes {
            self.resize(width, height);
        }

        self.game.update(&mut self.ctx, &self.input);

        // Drain input after update
        self.input.drain();

        self.bake_if_needed();

        build_sdf_buffer(
            self.ctx.scene.iter(),
            &self.ctx.camera,
            &mut self.sdf_buffer,
            self.config.max_sdf_instances,
        );

        // Allow game to add custom render commands
        {
            let mut render_ctx = RenderContext {
                sdf_buffer: &mut self.sdf_buffer,
                camera: &self.ctx.camera,
            };
            self.game.render(&mut render_ctx);
        }

        self.frames += 1;
    }

    fn bake_if_needed(&mut self) {
        let key = (self.ctx.camera.generation(), self.ctx.backdrop.generation());
        if self.baked_for == Some(key) {
            return;
        }
        let stats = self.ctx.backdrop.bake(
            &self.ctx.camera,
            &mut self.baked_vectors,
            &mut self.star_points,
            self.config.max_star_points,
        );
        self.baked_for = Some(key);
        self.bake_state.generation += 1;
        log::info!(
            "backdrop baked (generation {}): {} stars, {} ring vertices",
            self.bake_state.generation,
            stats.stars,
            stats.ring_vertices,
        );
    }

    /// Borrow everything the renderer needs for the last tick.
    pub fn frame_data(&self) -> FrameData<'_> {
        let viewport = self.ctx.camera.viewport();
        FrameData {
            frame_index: self.frames,
            elapsed: self.ctx.elapsed(),
            sdf_instances: self.sdf_buffer.instances(),
            backdrop_vertices: self.baked_vectors.vertices(),
            vector_vertices: self.ctx.vectors.vertices(),
            stars: self.star_points.points(),
            bake_state: self.bake_state,
            ambient: self.ctx.lights.ambient(),
            lights: self.ctx.lights.lights(),
            camera: self.ctx.camera.uniform(),
            viewport_width: viewport.x,
            viewport_height: viewport.y,
            events: &self.ctx.events,
        }
    }

    /// Hand the last tick's frame to `renderer`.
    pub fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) -> DrawTiming {
        renderer.draw(&self.frame_data())
    }

    /// One driver step: read the clock, tick, submit.
    pub fn step<T, R>(&mut self, clock: &T, renderer: &mut R) -> DrawTiming
    where
        T: TimeSource + ?Sized,
        R: Renderer + ?Sized,
    {
        self.tick(clock.elapsed());
        self.draw(renderer)
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut G {
        &mut self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn layout(&self) -> &ProtocolLayout {
        &self.layout
    }

    /// Ticks run since init.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn bake_generation(&self) -> u32 {
        self.bake_state.generation
    }

    // ---- Pointer accessors for direct memory reads ----

    pub fn sdf_instances_ptr(&self) -> *const f32 {
        self.sdf_buffer.instances_ptr()
    }

    pub fn sdf_instance_count(&self) -> u32 {
        self.sdf_buffer.instance_count().min(self.layout.max_sdf_instances) as u32
    }

    pub fn backdrop_vertices_ptr(&self) -> *const f32 {
        self.baked_vectors.buffer_ptr()
    }

    pub fn backdrop_vertex_count(&self) -> u32 {
        self.baked_vectors.vertex_count().min(self.layout.max_vector_vertices) as u32
    }

    pub fn vector_vertices_ptr(&self) -> *const f32 {
        self.ctx.vectors.buffer_ptr()
    }

    pub fn vector_vertex_count(&self) -> u32 {
        let room = self.layout.max_vector_vertices - self.backdrop_vertex_count() as usize;
        self.ctx.vectors.vertex_count().min(room) as u32
    }

    pub fn star_points_ptr(&self) -> *const f32 {
        self.star_points.points_ptr()
    }

    pub fn star_point_count(&self) -> u32 {
        self.star_points.point_count().min(self.layout.max_star_points) as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len().min(self.layout.max_events) as u32
    }

    pub fn lights_ptr(&self) -> *const f32 {
        self.ctx.lights.buffer_ptr()
    }

    pub fn light_count(&self) -> u32 {
        self.ctx.lights.count().min(self.layout.max_lights) as u32
    }

    pub fn ambient(&self) -> AmbientLight {
        self.ctx.lights.ambient()
    }

    pub fn viewport_width(&self) -> f32 {
        self.ctx.camera.viewport().x
    }

    pub fn viewport_height(&self) -> f32 {
        self.ctx.camera.viewport().y
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_sdf_instances(&self) -> u32 {
        self.layout.max_sdf_instances as u32
    }

    pub fn max_vector_vertices(&self) -> u32 {
        self.layout.max_vector_vertices as u32
    }

    pub fn max_star_points(&self) -> u32 {
        self.layout.max_star_points as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn max_lights(&self) -> u32 {
        self.layout.max_lights as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}

/// Run `runner` on `scheduler` until the scheduler stops invoking frames.
/// Every frame reads `clock`, ticks, and submits to `renderer`.
pub fn drive<G, S, T, R>(runner: Rc<RefCell<GameRunner<G>>>, scheduler: Rc<S>, clock: T, mut renderer: R)
where
    G: Game + 'static,
    S: FrameScheduler + ?Sized + 'static,
    T: TimeSource + 'static,
    R: Renderer + 'static,
{
    run_loop(scheduler, move || {
        runner.borrow_mut().step(&clock, &mut renderer);
    });
}
