/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that contains the runtime
 * tunables of the magnetism simulation. These parameters can be modified
 * through the UI and the keyboard. Change detection works on snapshots so
 * the app can retrace field lines while paused when something changed.
 */

use crate::tracer::{DEFAULT_MAX_STEPS, DEFAULT_RESOLUTION};

pub const DEFAULT_TICK_RATE: f32 = 60.0;

// Parameters for the simulation that can be adjusted via UI
#[derive(Debug, Clone)]
pub struct SimulationParams {
    pub trace_resolution: f32,
    pub max_trace_steps: usize,
    pub tick_rate: f32,
    pub show_field_lines: bool,
    pub show_grid: bool,
    pub show_debug: bool,
    pub pause_simulation: bool,
    pub animate: bool,
    // Performance settings
    pub enable_parallel: bool,

    // Internal state for tracking changes
    previous_values: Option<ParamSnapshot>,
}

// A snapshot of the parameter values that affect the simulated state
#[derive(Debug, Clone, PartialEq)]
struct ParamSnapshot {
    trace_resolution: f32,
    max_trace_steps: usize,
    tick_rate: f32,
    show_field_lines: bool,
    animate: bool,
    pause_simulation: bool,
    enable_parallel: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            trace_resolution: DEFAULT_RESOLUTION,
            max_trace_steps: DEFAULT_MAX_STEPS,
            tick_rate: DEFAULT_TICK_RATE,
            show_field_lines: true,
            show_grid: true,
            show_debug: false,
            pause_simulation: false,
            animate: true,
            // Tracing runs on one thread unless asked otherwise
            enable_parallel: false,
            previous_values: None,
        }
    }
}

impl SimulationParams {
    fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            trace_resolution: self.trace_resolution,
            max_trace_steps: self.max_trace_steps,
            tick_rate: self.tick_rate,
            show_field_lines: self.show_field_lines,
            animate: self.animate,
            pause_simulation: self.pause_simulation,
            enable_parallel: self.enable_parallel,
        }
    }

    // Defaults with the tick rate of a loaded scene
    pub fn with_tick_rate(tick_rate: f32) -> Self {
        Self {
            tick_rate,
            ..Self::default()
        }
    }

    // Take a snapshot of current parameter values for change detection
    pub fn take_snapshot(&mut self) {
        self.previous_values = Some(self.snapshot());
    }

    // Check if any simulation-relevant parameter changed since the last snapshot
    pub fn detect_changes(&self) -> bool {
        match &self.previous_values {
            Some(prev) => *prev != self.snapshot(),
            None => false,
        }
    }

    // Get parameter ranges for UI sliders
    pub fn get_resolution_range() -> std::ops::RangeInclusive<f32> {
        0.25..=5.0
    }

    pub fn get_max_steps_range() -> std::ops::RangeInclusive<usize> {
        100..=10000
    }

    pub fn get_tick_rate_range() -> std::ops::RangeInclusive<f32> {
        10.0..=240.0
    }

    pub fn get_field_lines_range() -> std::ops::RangeInclusive<usize> {
        0..=64
    }

    pub fn get_strength_range() -> std::ops::RangeInclusive<f32> {
        0.0..=crate::animation::DEFAULT_MAX_STRENGTH
    }
}
