/*
 * Application Module
 *
 * This module defines the nannou model for the interactive demo.
 * It owns the Simulation context and drives it with a fixed timestep:
 * frame time is accumulated and the physics is stepped at
 * `ticks_per_second`, independent of the render rate. Queued input is
 * applied every frame, also while paused.
 */

use nannou::prelude::*;
use nannou_egui::Egui;
use std::time::Duration;

use crate::debug::DebugInfo;
use crate::input::{key_pressed, mouse_pressed, raw_window_event};
use crate::params::SimulationParams;
use crate::renderer::view;
use crate::simulation::Simulation;
use crate::ui;
use crate::viewport::Viewport;

// Cap on catch-up ticks after a long frame
const MAX_TICKS_PER_FRAME: usize = 8;

pub struct Model {
    pub simulation: Simulation,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub viewport: Viewport,
    pub show_debug: bool,
    // Fixed timestep physics variables
    pub physics_accumulator: Duration,
    pub physics_step_size: Duration,
}

// Parameters come from the JSON file named by the first argument, if any
fn load_params() -> SimulationParams {
    match std::env::args().nth(1) {
        Some(path) => match SimulationParams::from_json_file(&path) {
            Ok(params) => {
                log::info!("loaded parameters from {}", path);
                params
            }
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => {
            log::info!("using default parameters");
            SimulationParams::default()
        }
    }
}

fn step_size(params: &SimulationParams) -> Duration {
    Duration::from_secs_f32(1.0 / params.ticks_per_second)
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let params = load_params();

    let window_id = app
        .new_window()
        .title("BOIDS")
        .size(params.width as u32, params.height as u32)
        .view(view)
        .mouse_pressed(mouse_pressed)
        .key_pressed(key_pressed)
        .raw_event(raw_window_event)
        .build()
        .expect("failed to create window");

    let window = app.window(window_id).expect("window vanished right after creation");
    let egui = Egui::from_window(&window);

    let mut viewport = Viewport::new(params.width, params.height);
    viewport.fit(window.rect());

    let physics_step_size = step_size(&params);
    let initial_agents = params.initial_agents;
    let mut simulation = Simulation::new(params);
    if initial_agents > 0 {
        simulation.populate(initial_agents, &mut rand::thread_rng());
    }
    simulation.flush_commands();

    log::info!(
        "window {}x{}, {} initial boids",
        simulation.params.width,
        simulation.params.height,
        simulation.scene().agent_count()
    );

    Model {
        simulation,
        egui,
        debug_info: DebugInfo::default(),
        viewport,
        show_debug: false,
        physics_accumulator: Duration::ZERO,
        physics_step_size,
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;
    model.viewport.fit(app.window_rect());

    model.egui.set_elapsed_time(update.since_start);
    let actions = ui::update_ui(
        &mut model.egui,
        &model.simulation.params,
        &model.debug_info,
        model.simulation.is_running(),
        &mut model.show_debug,
    );
    apply_ui_actions(model, actions);

    // Input queued since the last frame lands before any tick
    model.simulation.flush_commands();

    let mut ticks = 0;
    if model.simulation.is_running() {
        model.physics_accumulator += update.since_last;
        while model.physics_accumulator >= model.physics_step_size && ticks < MAX_TICKS_PER_FRAME {
            model.simulation.update();
            model.physics_accumulator -= model.physics_step_size;
            ticks += 1;
        }
        // Too far behind, drop the backlog instead of spiralling
        if ticks == MAX_TICKS_PER_FRAME {
            model.physics_accumulator = Duration::ZERO;
        }
    } else {
        model.physics_accumulator = Duration::ZERO;
    }

    model.debug_info.record(&model.simulation, ticks);
}

fn apply_ui_actions(model: &mut Model, actions: ui::UiActions) {
    if let Some(params) = actions.params {
        model.physics_step_size = step_size(&params);
        model.simulation.params = params;
    }
    if actions.toggle_running {
        model.simulation.toggle_running();
    }
    if actions.clear_agents {
        model.simulation.clear_agents();
    }
    if actions.scatter_agents > 0 {
        model.simulation.populate(actions.scatter_agents, &mut rand::thread_rng());
    }
}
