/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains frame metrics
 * and scene statistics to be displayed in the UI.
 */

use std::time::Duration;

use crate::simulation::Simulation;

#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub ticks_this_frame: usize,
    pub total_ticks: u64,
    pub agents: usize,
    pub obstacles: usize,
    pub selected: usize,
}

impl DebugInfo {
    // Refresh the scene statistics after an update
    pub fn record(&mut self, simulation: &Simulation, ticks_this_frame: usize) {
        let scene = simulation.scene();
        self.ticks_this_frame = ticks_this_frame;
        self.total_ticks = simulation.ticks();
        self.agents = scene.agent_count();
        self.obstacles = scene.obstacle_count();
        self.selected = scene.iter().filter(|e| e.selected).count();
    }
}
