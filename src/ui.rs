/*
 * UI Module
 *
 * This module contains functions for creating and updating the user interface
 * using nannou_egui. It provides controls for the dipole strengths and the
 * tracer tunables, and shows the current performance metrics.
 * Parameter change detection is handled by the SimulationParams struct.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::SimulationParams;
use crate::scene::Scene;

/// What the user asked for this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiResponse {
    pub reset_scene: bool,
    pub scene_edited: bool,
    pub params_changed: bool,
}

// Update the UI and report resets and edits
pub fn update_ui(
    egui: &mut Egui,
    params: &mut SimulationParams,
    scene: &mut Scene,
    debug_info: &DebugInfo,
) -> UiResponse {
    let mut response = UiResponse::default();

    // Take a snapshot of current parameter values for change detection
    params.take_snapshot();

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Dipoles", |ui| {
                for (i, dipole) in scene.sources_mut().enumerate() {
                    let mut strength = dipole.strength();
                    let slider = egui::Slider::new(&mut strength, SimulationParams::get_strength_range())
                        .text(format!("Dipole {} strength", i));
                    if ui.add(slider).changed() {
                        dipole.set_strength(strength);
                        response.scene_edited = true;
                    }

                    let mut lines = dipole.field_line_count();
                    let slider = egui::Slider::new(&mut lines, SimulationParams::get_field_lines_range())
                        .text(format!("Dipole {} lines per pole", i));
                    if ui.add(slider).changed() {
                        dipole.set_field_line_count(lines);
                        response.scene_edited = true;
                    }
                }

                if ui.button("Reset Scene").clicked() {
                    response.reset_scene = true;
                }
            });

            ui.collapsing("Field Lines", |ui| {
                ui.checkbox(&mut params.show_field_lines, "Show Field Lines");
                ui.add(
                    egui::Slider::new(&mut params.trace_resolution, SimulationParams::get_resolution_range())
                        .text("Step Length"),
                );
                ui.add(
                    egui::Slider::new(&mut params.max_trace_steps, SimulationParams::get_max_steps_range())
                        .text("Max Steps"),
                );
            });

            ui.collapsing("Performance Tuning", |ui| {
                ui.checkbox(&mut params.enable_parallel, "Enable Parallel Tracing");
                ui.add(
                    egui::Slider::new(&mut params.tick_rate, SimulationParams::get_tick_rate_range())
                        .text("Tick Rate"),
                );

                ui.separator();

                // Performance metrics
                ui.label(format!("FPS: {:.1}", debug_info.fps));
                ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
                ui.label(format!("Field lines: {}", debug_info.field_lines));
                ui.label(format!("Trace time: {:.2} ms", debug_info.trace_time.as_secs_f64() * 1000.0));
            });

            ui.checkbox(&mut params.show_grid, "Show Grid");
            ui.checkbox(&mut params.show_debug, "Show Debug Info");
            ui.checkbox(&mut params.animate, "Animate Strengths");
            ui.checkbox(&mut params.pause_simulation, "Pause Simulation");
        });

    response.params_changed = params.detect_changes();
    response
}

// Draw debug information on the screen
pub fn draw_debug_info(draw: &nannou::Draw, debug_info: &DebugInfo, window_rect: nannou::geom::Rect) {
    let lines = debug_info.lines();

    // Background panel in the bottom-left corner, away from the controls
    let margin = 10.0;
    let line_height = 16.0;
    let panel_width = 180.0;
    let panel_height = line_height * lines.len() as f32 + margin;
    let panel_x = window_rect.left() + panel_width / 2.0;
    let panel_y = window_rect.bottom() + panel_height / 2.0;

    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_y = window_rect.bottom() + panel_height - margin;

    for (i, text) in lines.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);

        draw.text(text)
            .x_y(panel_x, y)
            .w(panel_width - margin * 2.0)
            .left_justify()
            .color(nannou::color::WHITE)
            .font_size(11);
    }
}
