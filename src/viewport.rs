/*
 * Viewport Module
 *
 * This module maps between simulation world space and nannou's window
 * space. The world has its origin in the top-left corner with y growing
 * downward; nannou puts the origin in the window centre with y growing
 * upward. The world is scaled uniformly to fit the window, so a resized
 * window still shows the whole scene.
 */

use nannou::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub world_size: Vec2,
    pub zoom: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            world_size: vec2(width, height),
            zoom: 1.0,
        }
    }

    // Recompute the zoom so the world fits inside the window
    pub fn fit(&mut self, window_rect: Rect) {
        let zoom = (window_rect.w() / self.world_size.x).min(window_rect.h() / self.world_size.y);
        if zoom.is_finite() && zoom > 0.0 {
            self.zoom = zoom;
        }
    }

    // Convert a point from world space to screen space
    pub fn world_to_screen(&self, point: Vec2, window_rect: Rect) -> Vec2 {
        let centered = vec2(point.x - self.world_size.x / 2.0, self.world_size.y / 2.0 - point.y);
        centered * self.zoom + window_rect.xy()
    }

    // Convert a point from screen space to world space
    pub fn screen_to_world(&self, point: Vec2, window_rect: Rect) -> Vec2 {
        let centered = (point - window_rect.xy()) / self.zoom;
        vec2(centered.x + self.world_size.x / 2.0, self.world_size.y / 2.0 - centered.y)
    }

    pub fn length_to_screen(&self, length: f32) -> f32 {
        length * self.zoom
    }
}
