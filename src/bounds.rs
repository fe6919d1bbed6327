/*
 * Bounds Module
 *
 * The rectangular simulation area. Field lines stop as soon as they leave it.
 */

use nannou::prelude::*;

use crate::error::{ensure_positive, MagnetResult};

pub const DEFAULT_WIDTH: f32 = 400.0;
pub const DEFAULT_HEIGHT: f32 = 400.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> MagnetResult<Self> {
        Ok(Self {
            width: ensure_positive("bounds width", width)?,
            height: ensure_positive("bounds height", height)?,
        })
    }

    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0 && point.x < self.width && point.y >= 0.0 && point.y < self.height
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}
