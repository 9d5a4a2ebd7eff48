/*
 * Entity Module
 *
 * This module defines the entities that live in the scene.
 * Every entity shares a position, a visual scale and a selection flag;
 * the kind-specific payload is carried by the `EntityKind` variant:
 * - Agent: a flocking boid with a velocity
 * - Obstacle: a static square that only repels nearby agents
 */

use nannou::prelude::*;
use std::fmt;

// Stable identity of an entity inside a scene. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntityKind {
    Agent { velocity: Vec2 },
    Obstacle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub position: Vec2,
    pub scale: f32,
    // Presentation only, never read by the physics
    pub selected: bool,
    pub kind: EntityKind,
}

impl Entity {
    pub fn agent(id: EntityId, position: Vec2, velocity: Vec2, scale: f32) -> Self {
        Self {
            id,
            position,
            scale,
            selected: false,
            kind: EntityKind::Agent { velocity },
        }
    }

    pub fn obstacle(id: EntityId, position: Vec2, scale: f32) -> Self {
        Self {
            id,
            position,
            scale,
            selected: false,
            kind: EntityKind::Obstacle,
        }
    }

    pub fn is_agent(&self) -> bool {
        matches!(self.kind, EntityKind::Agent { .. })
    }

    pub fn is_obstacle(&self) -> bool {
        matches!(self.kind, EntityKind::Obstacle)
    }

    pub fn velocity(&self) -> Option<Vec2> {
        match self.kind {
            EntityKind::Agent { velocity } => Some(velocity),
            EntityKind::Obstacle => None,
        }
    }

    // Heading is derived from the velocity, obstacles have none
    pub fn heading(&self) -> Option<f32> {
        self.velocity().map(|v| v.y.atan2(v.x))
    }

    pub fn distance_to(&self, point: Vec2) -> f32 {
        self.position.distance(point)
    }
}
