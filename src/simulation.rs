/*
 * Simulation Module
 *
 * Owns the scene and everything that runs against it each tick, without any
 * knowledge of windows or drawing. One tick runs, in order:
 * 1. animation drivers
 * 2. ferrite re-orientation
 * 3. field-line retracing
 * The app presents the result afterwards.
 */

use std::time::{Duration, Instant};

use crate::animation::Animation;
use crate::bounds::Bounds;
use crate::scene::Scene;
use crate::tracer::{FieldLine, FieldLineTracer};

/// Counters from the most recent tick, used by the debug overlay.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickStats {
    pub field_lines: usize,
    pub trace_points: usize,
    pub ferrites_turned: usize,
    pub trace_time: Duration,
}

pub struct Simulation {
    pub scene: Scene,
    pub bounds: Bounds,
    pub tracer: FieldLineTracer,
    pub parallel: bool,
    pub animate: bool,
    animations: Vec<Box<dyn Animation>>,
    field_lines: Vec<FieldLine>,
    frame: u64,
    stats: TickStats,
}

impl Simulation {
    pub fn new(scene: Scene, bounds: Bounds, tracer: FieldLineTracer) -> Self {
        Self {
            scene,
            bounds,
            tracer,
            parallel: false,
            animate: true,
            animations: Vec::new(),
            field_lines: Vec::new(),
            frame: 0,
            stats: TickStats::default(),
        }
    }

    pub fn add_animation(&mut self, animation: Box<dyn Animation>) {
        log::debug!("registered animation '{}'", animation.name());
        self.animations.push(animation);
    }

    pub fn animation_count(&self) -> usize {
        self.animations.len()
    }

    /// Advance the simulation by one frame.
    pub fn step(&mut self) {
        if self.animate {
            for animation in &mut self.animations {
                animation.advance(&mut self.scene);
            }
        }

        self.stats.ferrites_turned = self.scene.update_free_dipoles();
        self.retrace();
        self.frame += 1;
    }

    /// Bring ferrites and field lines up to date after an edit, without
    /// running animations or counting a frame.
    pub fn settle(&mut self) {
        self.stats.ferrites_turned = self.scene.update_free_dipoles();
        self.retrace();
    }

    /// Rebuild the field lines from the current scene without advancing time.
    pub fn retrace(&mut self) {
        let started = Instant::now();
        self.field_lines = self.tracer.trace_scene(&self.scene, &self.bounds, self.parallel);

        self.stats.field_lines = self.field_lines.len();
        self.stats.trace_points = self.field_lines.iter().map(|line| line.points.len()).sum();
        self.stats.trace_time = started.elapsed();
    }

    pub fn field_lines(&self) -> &[FieldLine] {
        &self.field_lines
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn stats(&self) -> TickStats {
        self.stats
    }
}
