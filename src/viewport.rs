/*
 * Viewport Module
 *
 * The simulation works in screen-style coordinates: origin at the top-left
 * corner, y growing downward, `width × height` units. Nannou draws in a
 * centred, y-up space. The viewport converts between the two and scales the
 * simulation area to fit the window.
 */

use nannou::prelude::*;

use crate::bounds::Bounds;

#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub scale: f32,
    pub center: Vec2,
}

impl Viewport {
    pub fn new(bounds: &Bounds) -> Self {
        Self {
            width: bounds.width,
            height: bounds.height,
            scale: 1.0,
            center: Vec2::ZERO,
        }
    }

    // Rescale so the whole simulation area is visible in the window
    pub fn fit(&mut self, window_rect: Rect) {
        let sx = window_rect.w() / self.width;
        let sy = window_rect.h() / self.height;
        self.scale = sx.min(sy).max(f32::EPSILON);
        self.center = window_rect.xy();
    }

    // Convert a point from simulation space to screen space
    pub fn world_to_screen(&self, point: Vec2) -> Vec2 {
        let flipped = vec2(point.x - self.width / 2.0, self.height / 2.0 - point.y);
        flipped * self.scale + self.center
    }

    // Convert a point from screen space to simulation space
    pub fn screen_to_world(&self, point: Vec2) -> Vec2 {
        let centered = (point - self.center) / self.scale;
        vec2(centered.x + self.width / 2.0, self.height / 2.0 - centered.y)
    }

    /// Angles measured in simulation space turn the other way on screen
    /// because the y axis is flipped.
    pub fn angle_to_screen(&self, angle: f32) -> f32 {
        -angle
    }

    pub fn length_to_screen(&self, length: f32) -> f32 {
        length * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn top_left_maps_to_upper_left_of_window() {
        let viewport = Viewport::new(&Bounds::new(400.0, 400.0).unwrap());
        let screen = viewport.world_to_screen(vec2(0.0, 0.0));
        assert_abs_diff_eq!(screen.x, -200.0);
        assert_abs_diff_eq!(screen.y, 200.0);
    }

    #[test]
    fn fitting_a_larger_window_scales_up_uniformly() {
        let mut viewport = Viewport::new(&Bounds::new(400.0, 200.0).unwrap());
        viewport.fit(Rect::from_w_h(800.0, 800.0));
        assert_abs_diff_eq!(viewport.scale, 2.0);

        let screen = viewport.world_to_screen(vec2(400.0, 200.0));
        assert_abs_diff_eq!(screen.x, 400.0);
        assert_abs_diff_eq!(screen.y, -200.0);

        let back = viewport.screen_to_world(screen);
        assert_abs_diff_eq!(back.x, 400.0, epsilon = 1e-4);
        assert_abs_diff_eq!(back.y, 200.0, epsilon = 1e-4);
    }
}
