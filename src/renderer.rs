/*
 * Renderer Module
 *
 * This module handles the rendering of the magnetism simulation.
 * Draw order: background, grid, field lines, dipoles, ferrites, debug
 * overlay, then the egui controls on top.
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::bounds::Bounds;
use crate::ui;
use crate::viewport::Viewport;

pub const GRID_SPACING: f32 = 20.0;

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(WHITE);

    if model.params.show_grid {
        draw_grid(&draw, &model.viewport, &model.simulation.bounds);
    }

    if model.params.show_field_lines {
        for line in model.simulation.field_lines() {
            let points = line.points.iter().map(|p| model.viewport.world_to_screen(*p));
            draw.polyline().weight(1.0).points(points).color(rgba(0.15, 0.15, 0.15, 0.8));
        }
    }

    for dipole in model.simulation.scene.sources() {
        dipole.draw(&draw, &model.viewport);
    }

    for ferrite in model.simulation.scene.free_dipoles() {
        ferrite.draw(&draw, &model.viewport);
    }

    if model.params.show_debug {
        ui::draw_debug_info(&draw, &model.debug_info, app.window_rect());
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        log::error!("failed to draw frame: {:?}", err);
    }

    if let Err(err) = model.egui.draw_to_frame(&frame) {
        log::error!("failed to draw controls: {:?}", err);
    }
}

// Light grid over the simulation area
fn draw_grid(draw: &Draw, viewport: &Viewport, bounds: &Bounds) {
    let colour = LIGHTGRAY;

    let columns = (bounds.width / GRID_SPACING).floor() as usize;
    for i in 0..=columns {
        let x = i as f32 * GRID_SPACING;
        draw.line()
            .start(viewport.world_to_screen(vec2(x, 0.0)))
            .end(viewport.world_to_screen(vec2(x, bounds.height)))
            .weight(1.0)
            .color(colour);
    }

    let rows = (bounds.height / GRID_SPACING).floor() as usize;
    for i in 0..=rows {
        let y = i as f32 * GRID_SPACING;
        draw.line()
            .start(viewport.world_to_screen(vec2(0.0, y)))
            .end(viewport.world_to_screen(vec2(bounds.width, y)))
            .weight(1.0)
            .color(colour);
    }
}
