/*
 * Simulation Module
 *
 * This module defines the Simulation context that owns the scene and the
 * parameters. Input never touches the scene directly: every request is
 * queued as a SceneCommand and applied at the next tick boundary, so the
 * entity list never changes in the middle of a physics pass.
 */

use nannou::prelude::*;
use rand::Rng;
use std::collections::VecDeque;
use std::f32::consts::TAU;

use crate::entity::{Entity, EntityId};
use crate::params::SimulationParams;
use crate::physics;
use crate::scene::Scene;

#[derive(Debug, Clone, PartialEq)]
pub enum SceneCommand {
    SpawnAgent { id: EntityId, position: Vec2, velocity: Vec2 },
    SpawnObstacle { id: EntityId, position: Vec2 },
    ToggleSelection { position: Vec2, radius: f32 },
    ClearAgents,
}

#[derive(Debug, Clone)]
pub struct Simulation {
    scene: Scene,
    pub params: SimulationParams,
    running: bool,
    ticks: u64,
    pending: VecDeque<SceneCommand>,
}

impl Simulation {
    pub fn new(params: SimulationParams) -> Self {
        Self {
            scene: Scene::new(),
            params,
            running: true,
            ticks: 0,
            pending: VecDeque::new(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn pending_commands(&self) -> usize {
        self.pending.len()
    }

    // Queue a new agent; the id is valid once the queue is flushed
    pub fn spawn_agent(&mut self, position: Vec2, velocity: Vec2) -> EntityId {
        let id = self.scene.reserve_id();
        self.pending.push_back(SceneCommand::SpawnAgent { id, position, velocity });
        id
    }

    pub fn spawn_obstacle(&mut self, position: Vec2) -> EntityId {
        let id = self.scene.reserve_id();
        self.pending.push_back(SceneCommand::SpawnObstacle { id, position });
        id
    }

    pub fn toggle_selection(&mut self, position: Vec2, radius: f32) {
        self.pending.push_back(SceneCommand::ToggleSelection { position, radius });
    }

    pub fn clear_agents(&mut self) {
        self.pending.push_back(SceneCommand::ClearAgents);
    }

    // Whether a queued spawn will land strictly inside `radius` of `point`.
    // Agents queued before a pending clear do not count.
    pub fn pending_spawn_near(&self, point: Vec2, radius: f32) -> bool {
        let mut near = Vec::new();
        for command in &self.pending {
            match *command {
                SceneCommand::SpawnAgent { position, .. } => near.push((true, position)),
                SceneCommand::SpawnObstacle { position, .. } => near.push((false, position)),
                SceneCommand::ClearAgents => near.retain(|(is_agent, _)| !is_agent),
                SceneCommand::ToggleSelection { .. } => {}
            }
        }
        near.iter().any(|(_, position)| position.distance(point) < radius)
    }

    // Pausing takes effect immediately, it does not touch the scene
    pub fn toggle_running(&mut self) -> bool {
        self.running = !self.running;
        log::info!("simulation {}", if self.running { "resumed" } else { "paused" });
        self.running
    }

    // Scatter `count` agents inside the margin band with random headings
    // at the configured initial speed
    pub fn populate<R: Rng>(&mut self, count: usize, rng: &mut R) {
        let margin = self.params.boundary_margin;
        let speed = self.params.initial_velocity().length();
        for _ in 0..count {
            let x = rng.gen_range(margin..=(self.params.width - margin));
            let y = rng.gen_range(margin..=(self.params.height - margin));
            let angle: f32 = rng.gen_range(0.0..TAU);
            self.spawn_agent(vec2(x, y), vec2(angle.cos(), angle.sin()) * speed);
        }
        log::debug!("queued {} random agents", count);
    }

    // Apply queued commands in arrival order
    pub fn flush_commands(&mut self) {
        while let Some(command) = self.pending.pop_front() {
            self.apply(command);
        }
    }

    fn apply(&mut self, command: SceneCommand) {
        match command {
            SceneCommand::SpawnAgent { id, position, velocity } => {
                let entity = Entity::agent(id, position, velocity, self.params.agent_size);
                self.scene.add(entity);
                log::debug!("spawned agent {} at ({:.1}, {:.1})", id, position.x, position.y);
            }
            SceneCommand::SpawnObstacle { id, position } => {
                let entity = Entity::obstacle(id, position, self.params.obstacle_size);
                self.scene.add(entity);
                log::debug!("spawned obstacle {} at ({:.1}, {:.1})", id, position.x, position.y);
            }
            SceneCommand::ToggleSelection { position, radius } => {
                if let Some(id) = self.scene.find_nearest(position, radius) {
                    if let Some(entity) = self.scene.get_mut(id) {
                        entity.selected = !entity.selected;
                        log::debug!("entity {} selected: {}", id, entity.selected);
                    }
                }
            }
            SceneCommand::ClearAgents => {
                let removed = self.scene.remove_all(|e| e.is_agent());
                log::info!("cleared {} agents", removed);
            }
        }
    }

    // One frame's worth of simulation: apply input, then tick unless paused
    pub fn update(&mut self) {
        self.flush_commands();
        if self.running {
            self.step();
        }
    }

    // Force a single tick regardless of the pause flag
    pub fn tick(&mut self) {
        self.flush_commands();
        self.step();
    }

    fn step(&mut self) {
        physics::update_scene(&mut self.scene, &self.params);
        self.ticks += 1;
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimulationParams::default())
    }
}
