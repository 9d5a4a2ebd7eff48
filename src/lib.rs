/*
 * Boid Flocking Simulation - Module Definitions
 *
 * The simulation core (entity, scene, physics, simulation, params) is plain
 * data and math. The remaining modules wrap it in an interactive nannou
 * window: app, input, renderer, ui, viewport and debug.
 */

// Re-export key components for easier access
pub use entity::{Entity, EntityId, EntityKind};
pub use error::{ConfigError, ConfigResult};
pub use params::{SimulationParams, UpdateMode};
pub use physics::SteeringForces;
pub use scene::Scene;
pub use simulation::{SceneCommand, Simulation};

// Define modules
pub mod app;
pub mod debug;
pub mod entity;
pub mod error;
pub mod input;
pub mod params;
pub mod physics;
pub mod renderer;
pub mod scene;
pub mod simulation;
pub mod ui;
pub mod viewport;
