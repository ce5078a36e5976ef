//! Headless render loop tests.
//!
//! Drive the full runner + game stack with a hand-advanced clock, a
//! fixed-rate scheduler and a renderer that only records what it was given.

use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use glam::Vec3;
use orrery_engine::{FixedRateScheduler, HeadlessRenderer, ManualClock, Renderer, TimeSource};
use orrery_web::{drive, GameRunner};
use solar_system::bodies::{registry, BODY_COUNT, EARTH, MARS};
use solar_system::game::SolarSystem;
use solar_system::orbit::compute_position;
use solar_system::pause::RunState;
use solar_system::speeds::SpeedError;

fn runner() -> GameRunner<SolarSystem> {
    let mut runner = GameRunner::new(SolarSystem::new());
    runner.init();
    runner
}

fn positions(runner: &GameRunner<SolarSystem>) -> Vec<Vec3> {
    (0..BODY_COUNT)
        .map(|i| {
            let id = runner.game().planet_id(i).unwrap();
            runner.context().scene.get(id).unwrap().pos
        })
        .collect()
}

#[test]
fn earth_quarter_orbit_through_the_loop() {
    let mut runner = runner();
    let mut renderer = HeadlessRenderer::new();
    let clock = ManualClock::new();

    runner.step(&clock, &mut renderer);
    assert_eq!(positions(&runner)[EARTH], Vec3::new(20.0, 0.0, 0.0));

    clock.set(std::f64::consts::FRAC_PI_2 / 0.014);
    runner.step(&clock, &mut renderer);
    let earth = positions(&runner)[EARTH];
    assert_relative_eq!(earth.x, 0.0, epsilon = 1e-4);
    assert_relative_eq!(earth.z, 20.0, epsilon = 1e-4);
}

#[test]
fn every_body_stays_on_its_orbit() {
    let mut runner = runner();
    let mut renderer = HeadlessRenderer::new();
    let clock = ManualClock::new();
    let bodies = registry();

    for _ in 0..50 {
        clock.advance(7.3);
        runner.step(&clock, &mut renderer);
        for (body, pos) in bodies.iter().zip(positions(&runner)) {
            assert_relative_eq!(pos.y, 0.0);
            assert_relative_eq!(
                (pos.x as f64).hypot(pos.z as f64),
                body.orbital_distance,
                max_relative = 1e-5
            );
        }
    }
}

#[test]
fn pause_freezes_bodies_but_frames_keep_coming() {
    let mut runner = runner();
    let mut renderer = HeadlessRenderer::new();
    let clock = ManualClock::new();

    clock.set(12.0);
    runner.step(&clock, &mut renderer);
    let frozen = positions(&runner);

    assert_eq!(runner.game_mut().toggle_pause(), RunState::Paused);
    for _ in 0..20 {
        clock.advance(1.0);
        runner.step(&clock, &mut renderer);
        assert_eq!(positions(&runner), frozen);
    }
    assert_eq!(renderer.frames_drawn(), 21);
    let last = renderer.last_frame().unwrap();
    assert_eq!(last.sdf_instances.len(), BODY_COUNT + 1);
    assert_eq!(last.elapsed, 32.0);
}

#[test]
fn resume_jumps_to_clock_implied_angle() {
    let mut runner = runner();
    let mut renderer = HeadlessRenderer::new();
    let clock = ManualClock::new();

    runner.game_mut().toggle_pause();
    clock.set(100.0);
    runner.step(&clock, &mut renderer);
    assert_eq!(runner.game_mut().toggle_pause(), RunState::Running);
    runner.step(&clock, &mut renderer);

    let mars = registry()[MARS];
    let expected = compute_position(&mars, mars.default_speed, 100.0).as_vec3();
    let actual = positions(&runner)[MARS];
    assert_relative_eq!(actual.x, expected.x, epsilon = 1e-4);
    assert_relative_eq!(actual.z, expected.z, epsilon = 1e-4);
}

#[test]
fn speed_change_applies_on_next_step() {
    let mut runner = runner();
    let mut renderer = HeadlessRenderer::new();
    let clock = ManualClock::starting_at(10.0);

    runner.game_mut().set_speed(MARS, 0.05).unwrap();
    runner.step(&clock, &mut renderer);

    let mars = registry()[MARS];
    let expected = compute_position(&mars, 0.05, 10.0).as_vec3();
    let actual = positions(&runner)[MARS];
    assert_relative_eq!(actual.x, expected.x, epsilon = 1e-4);
    assert_relative_eq!(actual.z, expected.z, epsilon = 1e-4);
}

#[test]
fn invalid_speed_index_is_an_error() {
    let mut runner = runner();
    let err = runner.game_mut().set_speed(BODY_COUNT, 0.05).unwrap_err();
    assert_eq!(err, SpeedError::InvalidIndex { index: BODY_COUNT, count: BODY_COUNT });
    for body in registry() {
        assert_eq!(runner.game().speed(body.index), Ok(body.default_speed));
    }
}

#[test]
fn scheduled_loop_runs_until_cancelled() {
    let runner = Rc::new(RefCell::new(runner()));
    let clock = ManualClock::new();
    let scheduler = Rc::new(FixedRateScheduler::at_hz(60.0, clock.clone()));
    drive(Rc::clone(&runner), Rc::clone(&scheduler), clock.clone(), HeadlessRenderer::new());

    assert_eq!(scheduler.run_frames(120), 120);
    assert_eq!(runner.borrow().frame_count(), 120);
    assert_eq!(scheduler.pending(), 1);

    scheduler.cancel();
    assert!(scheduler.is_cancelled());
    assert_eq!(scheduler.run_frames(60), 0);
    assert_eq!(runner.borrow().frame_count(), 120);
    assert_relative_eq!(clock.elapsed(), 2.0, epsilon = 1e-9);
}

#[test]
fn static_scene_is_baked_once() {
    let mut runner = runner();
    let mut renderer = HeadlessRenderer::new();
    let clock = ManualClock::new();

    for _ in 0..30 {
        clock.advance(0.5);
        runner.step(&clock, &mut renderer);
    }
    let frame = renderer.last_frame().unwrap();
    assert_eq!(frame.bake_generation, 1);
    assert!(frame.backdrop_vertex_count > 0);
    assert!(frame.star_count > 0);
    assert_eq!(frame.light_count, 1);

    runner.resize(1280.0, 720.0);
    runner.step(&clock, &mut renderer);
    assert_eq!(renderer.last_frame().unwrap().bake_generation, 2);
}

#[test]
fn sdf_frame_is_sorted_back_to_front() {
    let mut runner = runner();
    let mut renderer = HeadlessRenderer::new();
    runner.step(&ManualClock::starting_at(40.0), &mut renderer);

    let frame = renderer.last_frame().unwrap();
    assert_eq!(renderer.backend(), "headless");
    assert!(frame
        .sdf_instances
        .windows(2)
        .all(|pair| pair[0].depth >= pair[1].depth));
    assert_eq!(frame.sdf_instances.iter().filter(|i| i.emissive >= 1.0).count(), 1);
}

#[test]
fn control_surface_tracks_state() {
    let mut runner = runner();
    runner.game_mut().set_speed(EARTH, 0.08).unwrap();
    runner.game_mut().toggle_pause();

    let surface = runner.game().control_surface();
    assert_eq!(surface.sliders.len(), BODY_COUNT);
    assert_eq!(surface.sliders[EARTH].value, 0.08);
    assert_eq!(surface.pause_label, "Resume");
}
