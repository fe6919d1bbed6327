/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains performance metrics
 * to be displayed in the UI and the on-canvas overlay.
 *
 * Includes metrics for:
 * - FPS (frames per second) and frame time
 * - Simulation ticks run this frame
 * - Field lines and traced points of the last tick
 * - Time spent tracing
 */

use std::time::Duration;

use crate::simulation::TickStats;

// Debug information to display
#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub ticks_per_frame: usize,
    pub field_lines: usize,
    pub trace_points: usize,
    pub trace_time: Duration,
    pub simulation_frame: u64,
}

impl DebugInfo {
    // Copy the counters of the latest tick
    pub fn record_tick(&mut self, stats: TickStats, simulation_frame: u64) {
        self.field_lines = stats.field_lines;
        self.trace_points = stats.trace_points;
        self.trace_time = stats.trace_time;
        self.simulation_frame = simulation_frame;
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("FPS: {:.1}", self.fps),
            format!("Frame time: {:.2} ms", self.frame_time.as_secs_f64() * 1000.0),
            format!("Ticks this frame: {}", self.ticks_per_frame),
            format!("Field lines: {}", self.field_lines),
            format!("Traced points: {}", self.trace_points),
            format!("Trace time: {:.2} ms", self.trace_time.as_secs_f64() * 1000.0),
            format!("Simulation frame: {}", self.simulation_frame),
        ]
    }
}
