/*
 * Input Module
 *
 * This module handles user input events for the magnetism simulation.
 *
 * Features:
 * - Dragging dipoles with the left mouse button
 * - Keyboard shortcuts for the display toggles, pause and reset
 * - Forwarding raw window events to egui
 */

use nannou::prelude::*;
use nannou::winit::event::MouseButton;

use crate::app::Model;
use crate::scene::SourceId;

/// A dipole being dragged, with the grab point relative to its centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    pub source: SourceId,
    pub offset: Vec2,
}

// Mouse moved event handler
pub fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    model.mouse_position = pos;

    if let Some(drag) = model.drag {
        let target = model.viewport.screen_to_world(pos) - drag.offset;
        if let Some(dipole) = model.simulation.scene.source_mut(drag.source) {
            dipole.set_position(target);
            model.needs_retrace = true;
        }
    }
}

// Mouse pressed event handler
pub fn mouse_pressed(_app: &App, model: &mut Model, button: MouseButton) {
    if button != MouseButton::Left {
        return;
    }

    // Clicks on the controls never grab a dipole
    if model.egui.ctx().is_pointer_over_area() {
        return;
    }

    let world_pos = model.viewport.screen_to_world(model.mouse_position);
    model.drag = model.simulation.scene.source_at(world_pos).and_then(|source| {
        let dipole = model.simulation.scene.source(source)?;
        log::debug!("grabbed dipole {}", source.0);
        Some(Drag {
            source,
            offset: world_pos - dipole.position(),
        })
    });
}

// Mouse released event handler
pub fn mouse_released(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        model.drag = None;
    }
}

// Keyboard shortcuts
pub fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    if model.egui.ctx().wants_keyboard_input() {
        return;
    }

    match key {
        Key::Space => model.params.pause_simulation = !model.params.pause_simulation,
        Key::L => model.params.show_field_lines = !model.params.show_field_lines,
        Key::G => model.params.show_grid = !model.params.show_grid,
        Key::D => model.params.show_debug = !model.params.show_debug,
        Key::R => model.reset(),
        _ => {}
    }
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
