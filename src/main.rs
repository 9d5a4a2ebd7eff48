/*
 * Boid Flocking Simulation
 *
 * Boids flock around static obstacles following four rules:
 * 1. Separation: Move away from boids and obstacles that are too close
 * 2. Alignment: Match the average velocity of the boids further away
 * 3. Cohesion: Head toward the barycenter of the flock
 * 4. Boundaries: Turn back before reaching the window edges
 *
 * Usage: boids [params.json]
 * Set RUST_LOG=debug to trace spawns and parameter edits.
 */

use boids::app::{model, update};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    nannou::app(model).update(update).run();
}
