/*
 * UI Module
 *
 * This module contains functions for creating and updating the user interface
 * using nannou_egui. It edits a copy of the simulation parameters and only
 * hands it back when the copy still validates, so a slider can never put the
 * physics into an invalid state.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::{SimulationParams, UpdateMode};

// Requests from the panel that the app applies after the frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiActions {
    pub params: Option<SimulationParams>,
    pub toggle_running: bool,
    pub clear_agents: bool,
    pub scatter_agents: usize,
}

const SCATTER_BATCH: usize = 20;

pub fn update_ui(
    egui: &mut Egui,
    params: &SimulationParams,
    debug_info: &DebugInfo,
    running: bool,
    show_debug: &mut bool,
) -> UiActions {
    let mut actions = UiActions::default();
    let mut edited = params.clone();
    let mut paused = !running;

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Flocking Behavior", |ui| {
                ui.add(egui::Slider::new(&mut edited.max_speed, SimulationParams::get_max_speed_range()).text("Max Speed"));
                ui.add(egui::Slider::new(&mut edited.dist_threshold, SimulationParams::get_distance_range()).text("Separation Distance"));
                ui.add(egui::Slider::new(&mut edited.avoid_factor, SimulationParams::get_factor_range()).text("Avoid Factor"));
                ui.add(egui::Slider::new(&mut edited.alignment_factor, SimulationParams::get_factor_range()).text("Alignment Factor"));
                ui.add(egui::Slider::new(&mut edited.centering_factor, SimulationParams::get_factor_range()).text("Centering Factor"));
                ui.add(egui::Slider::new(&mut edited.turn_factor, SimulationParams::get_turn_factor_range()).text("Turn Factor"));
                ui.add(egui::Slider::new(&mut edited.rad_step, SimulationParams::get_rad_step_range()).text("Turn Step (rad)"));
            });

            ui.collapsing("Update Order", |ui| {
                ui.radio_value(&mut edited.update_mode, UpdateMode::Sequential, "Sequential (in place)");
                ui.radio_value(&mut edited.update_mode, UpdateMode::Snapshot, "Snapshot (order independent)");
            });

            ui.separator();

            ui.horizontal(|ui| {
                if ui.button(format!("Add {} Boids", SCATTER_BATCH)).clicked() {
                    actions.scatter_agents = SCATTER_BATCH;
                }
                if ui.button("Clear Boids").clicked() {
                    actions.clear_agents = true;
                }
            });

            ui.label(format!("Boids: {}  Obstacles: {}", debug_info.agents, debug_info.obstacles));
            ui.label("Left click: add boid / select   Right click: add obstacle");
            ui.label("Space: pause   Backspace: clear boids   Esc: quit");

            ui.checkbox(show_debug, "Show Debug Info");
            ui.checkbox(&mut paused, "Pause Simulation");
        });

    actions.toggle_running = paused == running;

    if edited != *params {
        match edited.validate() {
            Ok(()) => {
                log::debug!("parameters changed: {:?}", edited);
                actions.params = Some(edited);
            }
            Err(e) => log::warn!("ignoring parameter change: {}", e),
        }
    }

    actions
}

// Draw debug information on the screen
pub fn draw_debug_info(draw: &nannou::Draw, debug_info: &DebugInfo, window_rect: nannou::geom::Rect) {
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 200.0;

    let debug_texts = [
        format!("FPS: {:.1}", debug_info.fps),
        format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0),
        format!("Ticks: {} (+{})", debug_info.total_ticks, debug_info.ticks_this_frame),
        format!("Boids: {}", debug_info.agents),
        format!("Obstacles: {}", debug_info.obstacles),
        format!("Selected: {}", debug_info.selected),
    ];

    let panel_height = line_height * debug_texts.len() as f32 + margin;
    let panel_x = window_rect.right() - panel_width / 2.0;
    let panel_y = window_rect.top() - panel_height / 2.0;

    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = window_rect.right() - panel_width + margin;
    let text_y = window_rect.top() - margin;

    for (i, text) in debug_texts.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);
        draw.text(text)
            .x_y(text_x + 70.0, y)
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
