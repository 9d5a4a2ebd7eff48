/*
 * Renderer Module
 *
 * This module draws the scene. Agents are triangles pointing along their
 * heading, obstacles are squares. Selected entities get a highlight
 * colour. With debug enabled, selected agents also show their separation
 * radius and the steering force acting on them.
 *
 * Rendering only reads the scene; nothing drawn here feeds back into the
 * physics.
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::entity::{Entity, EntityKind};
use crate::physics;
use crate::ui;
use crate::viewport::Viewport;

// Length multiplier for the debug force arrow, forces are tiny
const FORCE_ARROW_SCALE: f32 = 400.0;

pub fn entity_color(entity: &Entity) -> Rgb<u8> {
    match (entity.kind, entity.selected) {
        (EntityKind::Agent { .. }, false) => rgb(255, 0, 0),
        (EntityKind::Agent { .. }, true) => rgb(0, 255, 255),
        (EntityKind::Obstacle, false) => rgb(0, 255, 0),
        (EntityKind::Obstacle, true) => rgb(255, 255, 0),
    }
}

// Triangle corners in world space. The position is the middle of the base,
// the tip sits 1.5 scales ahead along the heading.
pub fn agent_triangle(position: Vec2, heading: f32, scale: f32) -> [Vec2; 3] {
    let forward = vec2(heading.cos(), heading.sin());
    let side = vec2(-forward.y, forward.x) * (scale / 2.0);
    [position - side, position + side, position + forward * (1.5 * scale)]
}

fn draw_entity(draw: &Draw, entity: &Entity, viewport: &Viewport, window_rect: Rect) {
    let color = entity_color(entity);
    match entity.heading() {
        Some(heading) => {
            let points = agent_triangle(entity.position, heading, entity.scale)
                .map(|p| viewport.world_to_screen(p, window_rect));
            draw.polygon().color(color).points(points);
        }
        None => {
            let center = viewport.world_to_screen(entity.position, window_rect);
            let side = viewport.length_to_screen(entity.scale);
            draw.rect().xy(center).w_h(side, side).color(color);
        }
    }
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    let window_rect = app.window_rect();
    let viewport = &model.viewport;
    let params = &model.simulation.params;

    // World boundary, visible when the window is larger than the world
    let world_center = viewport.world_to_screen(vec2(params.width / 2.0, params.height / 2.0), window_rect);
    draw.rect()
        .xy(world_center)
        .w_h(viewport.length_to_screen(params.width), viewport.length_to_screen(params.height))
        .no_fill()
        .stroke_weight(1.0)
        .stroke(rgba(0.3, 0.3, 0.3, 1.0));

    for entity in model.simulation.scene() {
        draw_entity(&draw, entity, viewport, window_rect);
    }

    if model.show_debug {
        draw_debug_overlay(&draw, model, window_rect);
        ui::draw_debug_info(&draw, &model.debug_info, window_rect);
    }

    if let Err(e) = draw.to_frame(app, &frame) {
        log::error!("failed to draw frame: {:?}", e);
    }
    if let Err(e) = model.egui.draw_to_frame(&frame) {
        log::error!("failed to draw ui: {:?}", e);
    }
}

fn draw_debug_overlay(draw: &Draw, model: &Model, window_rect: Rect) {
    let viewport = &model.viewport;
    let params = &model.simulation.params;
    let entities = model.simulation.scene().entities();

    // Margin band where the boundary force kicks in
    let inner_center = viewport.world_to_screen(vec2(params.width / 2.0, params.height / 2.0), window_rect);
    draw.rect()
        .xy(inner_center)
        .w_h(
            viewport.length_to_screen(params.width - 2.0 * params.boundary_margin),
            viewport.length_to_screen(params.height - 2.0 * params.boundary_margin),
        )
        .no_fill()
        .stroke_weight(1.0)
        .stroke(rgba(0.2, 0.2, 0.6, 1.0));

    for (i, entity) in entities.iter().enumerate() {
        if !entity.selected {
            continue;
        }
        let Some(forces) = physics::steering_forces(entities, i, params) else {
            continue;
        };
        let center = viewport.world_to_screen(entity.position, window_rect);

        draw.ellipse()
            .xy(center)
            .radius(viewport.length_to_screen(params.dist_threshold))
            .no_fill()
            .stroke(RED)
            .stroke_weight(1.0);

        let tip = viewport.world_to_screen(entity.position + forces.total() * FORCE_ARROW_SCALE, window_rect);
        if tip != center {
            draw.arrow().start(center).end(tip).color(YELLOW).stroke_weight(2.0);
        }
    }
}
