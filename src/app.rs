/*
 * Application Module
 *
 * This module defines the main application model and logic for the
 * magnetism simulation. It handles the initialization and update of the
 * simulation; rendering lives in the renderer module.
 *
 * The simulation advances on a fixed timestep: frame time is accumulated
 * and drained in whole ticks, so the animation speed does not depend on the
 * display refresh rate.
 */

use nannou::prelude::*;
use nannou_egui::Egui;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use crate::config::SceneConfig;
use crate::debug::DebugInfo;
use crate::input::{self, Drag};
use crate::params::SimulationParams;
use crate::renderer::view;
use crate::simulation::Simulation;
use crate::ui;
use crate::viewport::Viewport;

/// Upper bound on ticks run in a single frame. Anything beyond this is
/// dropped instead of being caught up.
pub const MAX_TICKS_PER_FRAME: usize = 8;

static SCENE_CONFIG: OnceLock<SceneConfig> = OnceLock::new();

/// Set the scene used by `model`. Only the first call has an effect.
pub fn set_scene_config(config: SceneConfig) -> bool {
    SCENE_CONFIG.set(config).is_ok()
}

// Main model for the application
pub struct Model {
    pub simulation: Simulation,
    pub config: SceneConfig,
    pub params: SimulationParams,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub viewport: Viewport,
    pub mouse_position: Vec2,
    pub drag: Option<Drag>,
    pub needs_retrace: bool,
    // Fixed timestep variables
    pub tick_accumulator: Duration,
    pub tick_size: Duration,
    pub last_update_time: Instant,
}

impl Model {
    /// Rebuild the scene from its configuration, keeping the current tunables.
    pub fn reset(&mut self) {
        match self.config.build() {
            Ok(simulation) => {
                log::info!("scene reset");
                self.simulation = simulation;
                self.drag = None;
                self.apply_params();
            }
            Err(err) => log::error!("failed to rebuild scene: {}", err),
        }
    }

    // Push the UI tunables into the simulation
    pub fn apply_params(&mut self) {
        self.simulation.tracer.resolution = self.params.trace_resolution;
        self.simulation.tracer.max_steps = self.params.max_trace_steps;
        self.simulation.parallel = self.params.enable_parallel;
        self.simulation.animate = self.params.animate;
        self.tick_size = tick_duration(self.params.tick_rate);
        self.needs_retrace = true;
    }
}

pub fn tick_duration(tick_rate: f32) -> Duration {
    Duration::from_secs_f32(1.0 / tick_rate.max(1.0))
}

/// Drain whole ticks from `accumulator`, running `tick` once per tick.
/// Returns how many ticks ran. If more than `MAX_TICKS_PER_FRAME` are owed
/// the backlog is discarded.
pub fn run_fixed_ticks(accumulator: &mut Duration, tick_size: Duration, mut tick: impl FnMut()) -> usize {
    let mut ticks = 0;

    while *accumulator >= tick_size {
        if ticks == MAX_TICKS_PER_FRAME {
            log::warn!(
                "simulation fell behind, dropping {:.1} ms of ticks",
                accumulator.as_secs_f64() * 1000.0
            );
            *accumulator = Duration::ZERO;
            break;
        }

        tick();
        *accumulator -= tick_size;
        ticks += 1;
    }

    ticks
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let config = SCENE_CONFIG.get().cloned().unwrap_or_default();

    let (config, simulation) = match config.build() {
        Ok(simulation) => (config, simulation),
        Err(err) => {
            log::error!("invalid scene ({}), using the built-in scene", err);
            let fallback = SceneConfig::default();
            let simulation = fallback.build().expect("built-in scene is valid");
            (fallback, simulation)
        }
    };

    let window_id = app
        .new_window()
        .title(&config.window.title)
        .size(config.window.width as u32, config.window.height as u32)
        .view(view)
        .mouse_moved(input::mouse_moved)
        .mouse_pressed(input::mouse_pressed)
        .mouse_released(input::mouse_released)
        .key_pressed(input::key_pressed)
        .raw_event(input::raw_window_event)
        .build()
        .expect("failed to create window");

    let window = app.window(window_id).expect("window was just created");
    let egui = Egui::from_window(&window);

    let params = SimulationParams::with_tick_rate(config.tick_rate);

    let mut viewport = Viewport::new(&simulation.bounds);
    viewport.fit(window.rect());

    log::info!(
        "starting with {} dipoles and {} ferrites",
        simulation.scene.sources().len(),
        simulation.scene.free_dipoles().len()
    );

    let mut model = Model {
        simulation,
        config,
        params,
        egui,
        debug_info: DebugInfo::default(),
        viewport,
        mouse_position: Vec2::ZERO,
        drag: None,
        needs_retrace: true,
        tick_accumulator: Duration::ZERO,
        tick_size: Duration::ZERO,
        last_update_time: Instant::now(),
    };
    model.apply_params();
    model
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;
    model.viewport.fit(app.window_rect());

    let response = ui::update_ui(
        &mut model.egui,
        &mut model.params,
        &mut model.simulation.scene,
        &model.debug_info,
    );

    if response.reset_scene {
        model.reset();
    }
    if response.params_changed {
        model.apply_params();
    }
    if response.scene_edited {
        model.needs_retrace = true;
    }

    let now = Instant::now();
    let frame_time = now.duration_since(model.last_update_time);
    model.last_update_time = now;

    let ticks = if model.params.pause_simulation {
        model.tick_accumulator = Duration::ZERO;
        0
    } else {
        model.tick_accumulator += frame_time;
        let simulation = &mut model.simulation;
        run_fixed_ticks(&mut model.tick_accumulator, model.tick_size, || simulation.step())
    };

    // Edits made while no tick ran still need fresh lines
    if ticks == 0 && model.needs_retrace {
        model.simulation.settle();
    }
    model.needs_retrace = false;

    model.debug_info.ticks_per_frame = ticks;
    model.debug_info.record_tick(model.simulation.stats(), model.simulation.frame());
}
