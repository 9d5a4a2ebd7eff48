/*
 * Physics Module
 *
 * This module advances the scene by one tick. For every agent it:
 * 1. Scans every entity once to aggregate a steering force from
 *    separation, alignment, cohesion and boundary avoidance
 * 2. Adds the force to the velocity and clamps the speed
 * 3. Rotates the velocity toward the force direction by a bounded step
 * 4. Moves the agent by its velocity
 *
 * The neighbor scan is a plain O(n²) loop over the scene. Obstacles never
 * move; they only push nearby agents away.
 */

use nannou::prelude::*;
use std::f32::consts::{PI, TAU};

use crate::entity::{Entity, EntityKind};
use crate::params::{SimulationParams, UpdateMode};
use crate::scene::Scene;

// One tick
pub const DT: f32 = 1.0;

// The steering force acting on one agent, split by rule.
// Kept apart so the renderer and the tests can look at each rule.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SteeringForces {
    pub separation: Vec2,
    pub alignment: Vec2,
    pub cohesion: Vec2,
    pub boundary: Vec2,
    // Agents counted in the barycenter, including the agent itself
    pub flock_size: usize,
    // Agents outside the separation threshold that fed the alignment
    pub aligned_with: usize,
}

impl SteeringForces {
    pub fn total(&self) -> Vec2 {
        self.separation + self.alignment + self.cohesion + self.boundary
    }
}

// Aggregate the steering force for the agent stored at `index`.
// Returns `None` when that entity is an obstacle or the index is out of range.
pub fn steering_forces(entities: &[Entity], index: usize, params: &SimulationParams) -> Option<SteeringForces> {
    let me = entities.get(index)?;
    let velocity = me.velocity()?;
    let position = me.position;

    let mut forces = SteeringForces::default();
    let mut bary_accum = Vec2::ZERO;
    let mut align_accum = Vec2::ZERO;

    for (j, other) in entities.iter().enumerate() {
        let other_velocity = match other.kind {
            EntityKind::Obstacle => {
                if position.distance(other.position) < params.dist_threshold {
                    forces.separation -= (other.position - position) * params.avoid_factor;
                }
                continue;
            }
            EntityKind::Agent { velocity } => velocity,
        };

        bary_accum += other.position;
        forces.flock_size += 1;
        if j == index {
            continue;
        }

        if position.distance(other.position) < params.dist_threshold {
            forces.separation -= (other.position - position) * params.avoid_factor;
        } else {
            // Alignment has no outer radius
            align_accum += other_velocity;
            forces.aligned_with += 1;
        }
    }

    if forces.aligned_with > 0 {
        let average = align_accum / forces.aligned_with as f32;
        forces.alignment = (average - velocity) * params.alignment_factor;
    }

    // A lone agent has nothing to gather around
    if forces.flock_size > 1 {
        let barycenter = bary_accum / forces.flock_size as f32;
        let to_center = barycenter - position;
        let length = to_center.length();
        if length > 0.0 {
            forces.cohesion = to_center / length * params.centering_factor;
        }
    }

    forces.boundary = boundary_force(position, params);
    Some(forces)
}

// Constant push back toward the middle once inside the margin band
pub fn boundary_force(position: Vec2, params: &SimulationParams) -> Vec2 {
    let mut force = Vec2::ZERO;
    let margin = params.boundary_margin;

    if position.x < margin {
        force.x += params.turn_factor;
    }
    if position.x > params.width - margin {
        force.x -= params.turn_factor;
    }
    if position.y < margin {
        force.y += params.turn_factor;
    }
    if position.y > params.height - margin {
        force.y -= params.turn_factor;
    }
    force
}

// Rotate `velocity` toward `desired` by at most `rad_step`, keeping its length.
// A zero `desired` has no direction and leaves the velocity alone.
pub fn turn_towards(velocity: Vec2, desired: Vec2, rad_step: f32) -> Vec2 {
    if desired.length_squared() == 0.0 {
        return velocity;
    }

    let target = desired.y.atan2(desired.x);
    let mut heading = velocity.y.atan2(velocity.x);

    let mut diff = target - heading;
    if diff > PI {
        diff -= TAU;
    } else if diff <= -PI {
        diff += TAU;
    }

    // Close enough, stops jittering around the target
    if diff.abs() < rad_step {
        return velocity;
    }

    if diff > 0.0 {
        heading += rad_step;
    } else {
        heading -= rad_step;
    }

    let norm = velocity.length();
    vec2(heading.cos(), heading.sin()) * norm
}

// Apply a steering force to an agent's kinematic state.
// Returns the new (position, velocity).
pub fn integrate(position: Vec2, velocity: Vec2, force: Vec2, params: &SimulationParams) -> (Vec2, Vec2) {
    let mut velocity = velocity + force * DT;

    let speed = velocity.length();
    if speed > params.max_speed {
        velocity = velocity / speed * params.max_speed;
    }

    // Direction follows the raw force, not the clamped velocity
    let velocity = turn_towards(velocity, force, params.rad_step);

    (position + velocity * DT, velocity)
}

// Compute the next (position, velocity) of the agent at `index`
pub fn step_agent(entities: &[Entity], index: usize, params: &SimulationParams) -> Option<(Vec2, Vec2)> {
    let forces = steering_forces(entities, index, params)?;
    let entity = entities.get(index)?;
    let velocity = entity.velocity()?;
    Some(integrate(entity.position, velocity, forces.total(), params))
}

fn apply_step(entity: &mut Entity, position: Vec2, new_velocity: Vec2) {
    if let EntityKind::Agent { velocity } = &mut entity.kind {
        *velocity = new_velocity;
        entity.position = position;
    }
}

// Advance every agent of the scene by one tick
pub fn update_scene(scene: &mut Scene, params: &SimulationParams) {
    match params.update_mode {
        UpdateMode::Sequential => update_sequential(scene, params),
        UpdateMode::Snapshot => update_from_snapshot(scene, params),
    }
}

// Agents are written back as soon as they are computed, so an agent later in
// the scene order sees the new state of the agents before it.
fn update_sequential(scene: &mut Scene, params: &SimulationParams) {
    for i in 0..scene.len() {
        if let Some((position, velocity)) = step_agent(scene.entities(), i, params) {
            apply_step(&mut scene.entities_mut()[i], position, velocity);
        }
    }
}

// Every agent reads the pre-tick state; results do not depend on scene order
fn update_from_snapshot(scene: &mut Scene, params: &SimulationParams) {
    let steps: Vec<Option<(Vec2, Vec2)>> = (0..scene.len())
        .map(|i| step_agent(scene.entities(), i, params))
        .collect();

    for (entity, step) in scene.entities_mut().iter_mut().zip(steps) {
        if let Some((position, velocity)) = step {
            apply_step(entity, position, velocity);
        }
    }
}
