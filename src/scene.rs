/*
 * Scene Module
 *
 * This module defines the Scene registry that owns every entity.
 * Entities are kept in insertion order, which is also the order the
 * flocking update visits them in. Ids are allocated by the scene and
 * never reused.
 */

use nannou::prelude::*;

use crate::entity::{Entity, EntityId};

#[derive(Debug, Clone, Default)]
pub struct Scene {
    entities: Vec<Entity>,
    next_id: u64,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    // Hand out the next id without inserting anything yet.
    // Used by the simulation to give queued spawns a handle right away.
    pub fn reserve_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    // Append an entity and return its id.
    // An entity whose id was never reserved, or is already taken, gets a fresh one.
    pub fn add(&mut self, mut entity: Entity) -> EntityId {
        if entity.id.0 >= self.next_id || self.get(entity.id).is_some() {
            entity.id = self.reserve_id();
        }
        let id = entity.id;
        self.entities.push(entity);
        id
    }

    // Remove every entity matching the predicate, keeping the order of the rest
    pub fn remove_all<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&Entity) -> bool,
    {
        let before = self.entities.len();
        self.entities.retain(|e| !predicate(e));
        before - self.entities.len()
    }

    // Closest entity strictly inside `radius` of `point`.
    // On equal distances the earlier entity wins.
    pub fn find_nearest(&self, point: Vec2, radius: f32) -> Option<EntityId> {
        let mut best: Option<(EntityId, f32)> = None;
        for entity in &self.entities {
            let d = entity.distance_to(point);
            if d >= radius {
                continue;
            }
            match best {
                Some((_, best_d)) if best_d <= d => {}
                _ => best = Some((entity.id, d)),
            }
        }
        best.map(|(id, _)| id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.entities.iter()
    }

    // Slice access for the physics, which addresses entities by index
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub(crate) fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn agent_count(&self) -> usize {
        self.entities.iter().filter(|e| e.is_agent()).count()
    }

    pub fn obstacle_count(&self) -> usize {
        self.entities.iter().filter(|e| e.is_obstacle()).count()
    }
}

impl<'a> IntoIterator for &'a Scene {
    type Item = &'a Entity;
    type IntoIter = std::slice::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
