/// Solar System: eight planets on circular orbits around an emissive sun.
///
/// Positions come straight from the clock: every running frame each planet is
/// placed at `compute_position(body, speed, elapsed)`. Pausing freezes the
/// planets where they are; frames keep being drawn.

use glam::Vec3;
use orrery_engine::{
    EngineContext, Entity, EntityId, Game, GameConfig, GameEvent, InputEvent, InputQueue,
    MeshComponent, PointLight, SDFColor,
};

use crate::bodies::{self, Body, BODY_COUNT};
use crate::control::ControlSurface;
use crate::orbit::{self, RING_SEGMENTS};
use crate::pause::{PauseController, RunState};
use crate::speeds::{SpeedError, SpeedTable};

// ── Custom event kinds from the UI ───────────────────────────────────

/// `a` = body index, `b` = new speed.
pub const CUSTOM_SET_SPEED: u32 = 1;
pub const CUSTOM_TOGGLE_PAUSE: u32 = 2;

/// Space bar toggles pause.
pub const KEY_SPACE: u32 = 32;

// ── Game event kinds to the UI ───────────────────────────────────────

/// `a` = elapsed seconds, `b` = 1 when paused.
pub const EVENT_FRAME_INFO: f32 = 1.0;
/// `a` = 1 when paused. Emitted when pause changes through input.
pub const EVENT_PAUSE_STATE: f32 = 2.0;
/// `a` = body index, `b` = accepted speed.
pub const EVENT_SPEED_CHANGED: f32 = 3.0;

// ── Lighting ─────────────────────────────────────────────────────────

const AMBIENT_INTENSITY: f32 = 0.3;
const SUN_LIGHT_INTENSITY: f32 = 2.0;
const SUN_LIGHT_RANGE: f32 = 500.0;

fn flag(on: bool) -> f32 {
    if on {
        1.0
    } else {
        0.0
    }
}

/// Body index carried in an event float. Negative or fractional values are
/// not indices.
fn event_index(value: f32) -> Option<usize> {
    (value >= 0.0 && value.fract() == 0.0).then_some(value as usize)
}

/// The mutable part of the simulation. Only the speed table and the pause
/// controller change after init, and only through their own methods.
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub speeds: SpeedTable,
    pub pause: PauseController,
}

impl SimulationState {
    pub fn new(bodies: &[Body]) -> Self {
        Self {
            speeds: SpeedTable::from_bodies(bodies),
            pause: PauseController::new(),
        }
    }
}

pub struct SolarSystem {
    bodies: [Body; BODY_COUNT],
    state: SimulationState,
    sun_id: Option<EntityId>,
    planet_ids: [Option<EntityId>; BODY_COUNT],
}

impl SolarSystem {
    pub fn new() -> Self {
        let bodies = bodies::registry();
        Self {
            state: SimulationState::new(&bodies),
            bodies,
            sun_id: None,
            planet_ids: [None; BODY_COUNT],
        }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn sun_id(&self) -> Option<EntityId> {
        self.sun_id
    }

    pub fn planet_id(&self, index: usize) -> Option<EntityId> {
        self.planet_ids.get(index).copied().flatten()
    }

    pub fn set_speed(&mut self, index: usize, value: f64) -> Result<(), SpeedError> {
        self.state.speeds.set_speed(index, value)?;
        log::debug!("{} speed set to {}", self.bodies[index].name, value);
        Ok(())
    }

    pub fn speed(&self, index: usize) -> Result<f64, SpeedError> {
        self.state.speeds.get_speed(index)
    }

    pub fn toggle_pause(&mut self) -> RunState {
        let state = self.state.pause.toggle();
        log::info!("animation {}", if state.is_paused() { "paused" } else { "resumed" });
        state
    }

    pub fn run_state(&self) -> RunState {
        self.state.pause.state()
    }

    pub fn control_surface(&self) -> ControlSurface {
        ControlSurface::new(&self.bodies, &self.state.speeds, self.run_state())
    }

    /// Where every body belongs at `elapsed`, given the current speeds.
    fn place_bodies(&self, ctx: &mut EngineContext) {
        let elapsed = ctx.elapsed();
        for body in &self.bodies {
            let Some(id) = self.planet_ids[body.index] else {
                continue;
            };
            let speed = self.state.speeds.get_speed(body.index).unwrap_or(body.default_speed);
            let pos = orbit::compute_position(body, speed, elapsed);
            ctx.scene.set_position(id, pos.as_vec3());
        }
    }

    fn handle_input(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            match *event {
                InputEvent::KeyDown { key_code: KEY_SPACE } => {
                    let state = self.toggle_pause();
                    ctx.emit_event(GameEvent::new(EVENT_PAUSE_STATE, flag(state.is_paused()), 0.0, 0.0));
                }
                InputEvent::Custom { kind: CUSTOM_TOGGLE_PAUSE, .. } => {
                    let state = self.toggle_pause();
                    ctx.emit_event(GameEvent::new(EVENT_PAUSE_STATE, flag(state.is_paused()), 0.0, 0.0));
                }
                InputEvent::Custom { kind: CUSTOM_SET_SPEED, a, b, .. } => {
                    let Some(index) = event_index(a) else {
                        log::warn!("speed change rejected: {} is not a body index", a);
                        continue;
                    };
                    match self.set_speed(index, b as f64) {
                        Ok(()) => ctx.emit_event(GameEvent::new(EVENT_SPEED_CHANGED, a, b, 0.0)),
                        Err(err) => log::warn!("speed change rejected: {}", err),
                    }
                }
                _ => {}
            }
        }
    }
}

impl Default for SolarSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for SolarSystem {
    fn config(&self) -> GameConfig {
        GameConfig {
            max_sdf_instances: 16,
            max_events: 64,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        // ── Sun ──────────────────────────────────────────────────────
        let sun_id = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(sun_id)
                .with_tag("sun")
                .with_mesh(
                    MeshComponent::sphere(bodies::SUN_RADIUS, SDFColor::hex(bodies::SUN_COLOR))
                        .with_emissive(bodies::SUN_EMISSIVE),
                ),
        );
        self.sun_id = Some(sun_id);

        // ── Planets and their orbit rings ────────────────────────────
        for body in &self.bodies {
            let id = ctx.next_id();
            ctx.scene.spawn(
                Entity::new(id)
                    .with_tag(body.name)
                    .with_mesh(
                        MeshComponent::sphere(body.display_radius, body.body_color)
                            .with_shininess(bodies::PLANET_SHININESS),
                    ),
            );
            self.planet_ids[body.index] = Some(id);

            let ring: Vec<Vec3> = orbit::ring_points(body.orbital_distance, RING_SEGMENTS)
                .into_iter()
                .map(|p| p.as_vec3())
                .collect();
            ctx.backdrop.add_ring(ring, body.orbit_color, bodies::ORBIT_LINE_WIDTH);
        }
        self.place_bodies(ctx);

        // ── Lighting ─────────────────────────────────────────────────
        ctx.lights.set_ambient([1.0, 1.0, 1.0], AMBIENT_INTENSITY);
        ctx.lights.add(PointLight::new(
            Vec3::ZERO,
            [1.0, 1.0, 1.0],
            SUN_LIGHT_INTENSITY,
            SUN_LIGHT_RANGE,
        ));

        log::info!("solar system ready: sun + {} planets", self.bodies.len());
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        self.handle_input(ctx, input);

        let paused = self.state.pause.is_paused();
        if !paused {
            self.place_bodies(ctx);
        }

        ctx.emit_event(GameEvent::new(
            EVENT_FRAME_INFO,
            ctx.elapsed() as f32,
            flag(paused),
            0.0,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::{EARTH, MARS, NEPTUNE};
    use approx::assert_relative_eq;

    fn ready() -> (SolarSystem, EngineContext) {
        let mut game = SolarSystem::new();
        let mut ctx = EngineContext::from_config(&game.config());
        game.init(&mut ctx);
        (game, ctx)
    }

    fn step(game: &mut SolarSystem, ctx: &mut EngineContext, elapsed: f64, input: &InputQueue) {
        ctx.clear_frame_data();
        ctx.set_elapsed(elapsed);
        game.update(ctx, input);
    }

    fn pos(game: &SolarSystem, ctx: &EngineContext, index: usize) -> Vec3 {
        ctx.scene.get(game.planet_id(index).unwrap()).unwrap().pos
    }

    #[test]
    fn init_builds_static_scene() {
        let (game, ctx) = ready();
        assert_eq!(ctx.scene.len(), BODY_COUNT + 1);
        assert_eq!(ctx.backdrop.rings().len(), BODY_COUNT);
        assert_eq!(ctx.backdrop.rings()[0].points.len(), RING_SEGMENTS + 1);
        assert_eq!(ctx.lights.count(), 1);
        assert_eq!(ctx.lights.ambient().intensity, AMBIENT_INTENSITY);

        let sun = ctx.scene.get(game.sun_id().unwrap()).unwrap();
        assert_eq!(sun.pos, Vec3::ZERO);
        assert_eq!(sun.mesh.unwrap().emissive, 1.0);
        assert_eq!(ctx.scene.find_by_tag("Earth").unwrap().pos, Vec3::new(20.0, 0.0, 0.0));
    }

    #[test]
    fn running_frames_follow_the_clock() {
        let (mut game, mut ctx) = ready();
        let t = std::f64::consts::FRAC_PI_2 / 0.014;
        step(&mut game, &mut ctx, t, &InputQueue::new());
        let earth = pos(&game, &ctx, EARTH);
        assert_relative_eq!(earth.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(earth.z, 20.0, epsilon = 1e-4);
        assert_eq!(earth.y, 0.0);
    }

    #[test]
    fn space_and_custom_event_toggle_pause() {
        let (mut game, mut ctx) = ready();
        let mut input = InputQueue::new();
        input.push(InputEvent::KeyDown { key_code: KEY_SPACE });
        step(&mut game, &mut ctx, 1.0, &input);
        assert_eq!(game.run_state(), RunState::Paused);
        assert_eq!(ctx.events[0], GameEvent::new(EVENT_PAUSE_STATE, 1.0, 0.0, 0.0));

        let mut input = InputQueue::new();
        input.push(InputEvent::Custom { kind: CUSTOM_TOGGLE_PAUSE, a: 0.0, b: 0.0, c: 0.0 });
        step(&mut game, &mut ctx, 2.0, &input);
        assert_eq!(game.run_state(), RunState::Running);
    }

    #[test]
    fn paused_frames_leave_positions_alone() {
        let (mut game, mut ctx) = ready();
        step(&mut game, &mut ctx, 10.0, &InputQueue::new());
        let frozen = pos(&game, &ctx, NEPTUNE);

        game.toggle_pause();
        step(&mut game, &mut ctx, 50.0, &InputQueue::new());
        assert_eq!(pos(&game, &ctx, NEPTUNE), frozen);

        let info = ctx.events.last().unwrap();
        assert_eq!(info.kind, EVENT_FRAME_INFO);
        assert_eq!(info.a, 50.0);
        assert_eq!(info.b, 1.0);
    }

    #[test]
    fn set_speed_event_updates_table() {
        let (mut game, mut ctx) = ready();
        let mut input = InputQueue::new();
        input.push(InputEvent::Custom { kind: CUSTOM_SET_SPEED, a: MARS as f32, b: 0.05, c: 0.0 });
        step(&mut game, &mut ctx, 1.0, &input);

        assert_relative_eq!(game.speed(MARS).unwrap(), 0.05, epsilon = 1e-7);
        assert_eq!(ctx.events[0].kind, EVENT_SPEED_CHANGED);
    }

    #[test]
    fn bad_speed_events_are_ignored() {
        let (mut game, mut ctx) = ready();
        let before = game.state().speeds.clone();
        let mut input = InputQueue::new();
        input.push(InputEvent::Custom { kind: CUSTOM_SET_SPEED, a: 8.0, b: 0.05, c: 0.0 });
        input.push(InputEvent::Custom { kind: CUSTOM_SET_SPEED, a: -1.0, b: 0.05, c: 0.0 });
        input.push(InputEvent::Custom { kind: CUSTOM_SET_SPEED, a: 1.5, b: 0.05, c: 0.0 });
        step(&mut game, &mut ctx, 1.0, &input);

        assert_eq!(game.state().speeds, before);
        assert_eq!(ctx.events.len(), 1);
        assert_eq!(ctx.events[0].kind, EVENT_FRAME_INFO);
    }

    #[test]
    fn event_index_accepts_whole_non_negative_numbers() {
        assert_eq!(event_index(3.0), Some(3));
        assert_eq!(event_index(0.0), Some(0));
        assert_eq!(event_index(-1.0), None);
        assert_eq!(event_index(2.5), None);
        assert_eq!(event_index(f32::NAN), None);
    }
}
