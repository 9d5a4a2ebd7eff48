/*
 * Input Module
 *
 * This module turns window events into simulation requests:
 * - Left click: toggle selection of the entity under the cursor, or add a boid
 * - Right click: add an obstacle
 * - Space: pause / resume
 * - Backspace: remove every boid, obstacles stay
 * - Escape: quit
 *
 * Requests are queued on the simulation and applied at the next tick boundary.
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::simulation::Simulation;

// What a left click at `world_pos` should do
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickAction {
    Select,
    SpawnAgent,
}

// Selection wins over spawning when something is close enough to the cursor.
// Spawns still waiting in the queue count, so two clicks on the same spot
// within one frame spawn and then select.
pub fn left_click(simulation: &mut Simulation, world_pos: Vec2) -> ClickAction {
    let radius = simulation.params.select_distance;
    let hit = simulation.scene().find_nearest(world_pos, radius).is_some()
        || simulation.pending_spawn_near(world_pos, radius);
    if hit {
        simulation.toggle_selection(world_pos, radius);
        ClickAction::Select
    } else {
        let velocity = simulation.params.initial_velocity();
        simulation.spawn_agent(world_pos, velocity);
        ClickAction::SpawnAgent
    }
}

// Mouse pressed event handler
pub fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    // Clicks on the control panel belong to the panel
    if model.egui.ctx().is_pointer_over_area() {
        return;
    }

    let window_rect = app.window_rect();
    let world_pos = model.viewport.screen_to_world(vec2(app.mouse.x, app.mouse.y), window_rect);

    match button {
        MouseButton::Left => {
            left_click(&mut model.simulation, world_pos);
        }
        MouseButton::Right => {
            model.simulation.spawn_obstacle(world_pos);
        }
        _ => {}
    }
}

// Key pressed event handler
pub fn key_pressed(app: &App, model: &mut Model, key: Key) {
    if model.egui.ctx().wants_keyboard_input() {
        return;
    }

    match key {
        Key::Space => {
            model.simulation.toggle_running();
        }
        Key::Back => model.simulation.clear_agents(),
        Key::Escape => {
            log::info!("quit requested");
            app.quit();
        }
        _ => {}
    }
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
