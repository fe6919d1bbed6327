/*
 * Scenario Tests
 *
 * End-to-end runs of whole scenes: tracing an opposed pair of dipoles,
 * handing strength around a triangle, and loading the bundled scene files.
 */

use magnetism::tracer::{near_pole, seeds};
use magnetism::{Bounds, Dipole, FieldLineTracer, SceneConfig, Scene, Simulation, StrengthCycle, SourceId};
use nannou::prelude::*;

fn scenario_path(name: &str) -> String {
    format!("{}/scenarios/{}", env!("CARGO_MANIFEST_DIR"), name)
}

/// Two opposed dipoles stacked vertically, default strength
fn opposed_pair() -> Scene {
    let mut scene = Scene::new();
    scene.attach_source(Dipole::with_defaults(vec2(200.0, 150.0), 90f32.to_radians()).unwrap());
    scene.attach_source(Dipole::with_defaults(vec2(200.0, 250.0), (-90f32).to_radians()).unwrap());
    scene
}

/// True when `point` lies no further than `step` outside the bounds
fn within_one_step(point: Vec2, bounds: &Bounds, step: f32) -> bool {
    point.x >= -step && point.x < bounds.width + step && point.y >= -step && point.y < bounds.height + step
}

#[test]
fn opposed_pair_lines_stay_in_bounds_and_clear_of_poles() {
    let scene = opposed_pair();
    let bounds = Bounds::default();
    let tracer = FieldLineTracer::default();
    let dipoles = scene.sources();

    for (i, dipole) in dipoles.iter().enumerate() {
        for seed in seeds(SourceId(i), dipole) {
            let line = tracer.trace(seed.point, seed.polarity, dipoles, &bounds);
            let seed_valid = bounds.contains(seed.point) && !near_pole(seed.point, dipoles);

            if !seed_valid {
                assert!(line.len() <= 1);
                continue;
            }

            assert!(line.len() >= 2, "seed {:?} produced no line", seed.point);

            let (last, interior) = line.split_last().unwrap();
            for point in interior {
                assert!(bounds.contains(*point));
                assert!(!near_pole(*point, dipoles));
            }
            assert!(within_one_step(*last, &bounds, tracer.resolution));
        }
    }
}

#[test]
fn opposed_pair_traces_every_seed() {
    let scene = opposed_pair();
    let lines = FieldLineTracer::default().trace_scene(&scene, &Bounds::default(), false);

    // 2 dipoles × 2 poles × 16 seeds, none of which starts inside a pole
    assert_eq!(lines.len(), 64);
    assert!(lines.iter().all(|line| line.points.len() >= 2));
    assert_eq!(lines[0].source, SourceId(0));
    assert_eq!(lines[63].source, SourceId(1));
}

#[test]
fn hundred_frames_hand_the_strength_on() {
    let mut scene = Scene::new();
    let ids: Vec<SourceId> = [(200.0, 90.0, 10.0), (100.0, 290.0, 0.0), (300.0, 290.0, 0.0)]
        .into_iter()
        .map(|(x, y, strength)| {
            let mut dipole = Dipole::with_defaults(vec2(x, y), 0.0).unwrap();
            dipole.set_strength(strength);
            scene.attach_source(dipole)
        })
        .collect();

    let mut sim = Simulation::new(scene, Bounds::default(), FieldLineTracer::default());
    sim.add_animation(Box::new(StrengthCycle::with_defaults(ids)));

    for _ in 0..100 {
        sim.step();
    }

    let strengths: Vec<f32> = sim.scene.sources().iter().map(|d| d.strength()).collect();
    assert_eq!(strengths, vec![0.0, 10.0, 0.0]);
    assert_eq!(sim.frame(), 100);
    assert!(sim.field_lines().iter().all(|line| line.source == SourceId(1)));
}

#[test]
fn triangle_scene_file_matches_the_built_in_scene() {
    let loaded = SceneConfig::load(scenario_path("triangle.yaml")).unwrap();
    assert_eq!(loaded, SceneConfig::default());
}

#[test]
fn two_dipole_scene_file_builds() {
    let mut sim = SceneConfig::load(scenario_path("two_dipoles.yaml"))
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(sim.scene.sources().len(), 2);
    assert_eq!(sim.scene.free_dipoles().len(), 2);
    assert_eq!(sim.animation_count(), 0);

    sim.step();
    assert_eq!(sim.stats().ferrites_turned, 2);
    assert_eq!(sim.field_lines().len(), 64);
}
