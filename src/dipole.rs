/*
 * Dipole Module
 *
 * This module defines the Dipole struct: a magnet made of two point poles
 * (north and south) with a shared strength. Dipoles are the only field
 * sources in the simulation. Their pole positions are derived from
 * position, orientation and separation and are recomputed by every setter,
 * so the fields are private.
 *
 * Orientation is measured from vertical in screen-style coordinates
 * (y grows downward): an orientation of 0 puts the north pole above the
 * centre, PI/2 puts it to the right.
 */

use nannou::prelude::*;

use crate::error::{ensure_positive, ensure_strength, MagnetError, MagnetResult};
use crate::viewport::Viewport;

pub const DEFAULT_STRENGTH: f32 = 10.0;
pub const DEFAULT_RADIUS: f32 = 10.0;
pub const DEFAULT_SEPARATION: f32 = 40.0;
pub const DEFAULT_FIELD_LINES: usize = 16;

#[derive(Debug, Clone, PartialEq)]
pub struct Dipole {
    position: Vec2,
    orientation: f32,
    strength: f32,
    radius: f32,
    separation: f32,
    field_line_count: usize,
    north: Vec2,
    south: Vec2,
}

impl Dipole {
    pub fn new(
        position: Vec2,
        orientation: f32,
        strength: f32,
        radius: f32,
        separation: f32,
        field_line_count: usize,
    ) -> MagnetResult<Self> {
        if !position.is_finite() {
            return Err(MagnetError::InvalidPosition { x: position.x, y: position.y });
        }
        if !orientation.is_finite() {
            return Err(MagnetError::InvalidOrientation(orientation));
        }

        let mut dipole = Self {
            position,
            orientation,
            strength: ensure_strength(strength)?,
            radius: ensure_positive("radius", radius)?,
            separation: ensure_positive("separation", separation)?,
            field_line_count,
            north: Vec2::ZERO,
            south: Vec2::ZERO,
        };
        dipole.update_poles();
        Ok(dipole)
    }

    // A dipole with the default strength and geometry
    pub fn with_defaults(position: Vec2, orientation: f32) -> MagnetResult<Self> {
        Self::new(
            position,
            orientation,
            DEFAULT_STRENGTH,
            DEFAULT_RADIUS,
            DEFAULT_SEPARATION,
            DEFAULT_FIELD_LINES,
        )
    }

    // Recompute both pole positions from the current centre, axis and separation
    fn update_poles(&mut self) {
        let axis = vec2(self.orientation.sin(), -self.orientation.cos());
        let half = axis * (self.separation / 2.0);
        self.north = self.position + half;
        self.south = self.position - half;
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn orientation(&self) -> f32 {
        self.orientation
    }

    pub fn strength(&self) -> f32 {
        self.strength
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn separation(&self) -> f32 {
        self.separation
    }

    pub fn field_line_count(&self) -> usize {
        self.field_line_count
    }

    pub fn north(&self) -> Vec2 {
        self.north
    }

    pub fn south(&self) -> Vec2 {
        self.south
    }

    /// Only active dipoles act as field sources and emit field lines.
    /// Inactive ones are still obstacles for tracing.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.strength > 0.0
    }

    /// Poles paired with the signed strength the field model uses:
    /// south repels (`-strength`), north attracts (`+strength`).
    #[inline]
    pub fn field_poles(&self) -> [(Vec2, f32); 2] {
        [(self.south, -self.strength), (self.north, self.strength)]
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.update_poles();
    }

    pub fn set_orientation(&mut self, orientation: f32) {
        self.orientation = orientation;
        self.update_poles();
    }

    // Strength is driven externally; negative input means "off"
    pub fn set_strength(&mut self, strength: f32) {
        self.strength = if strength.is_finite() { strength.max(0.0) } else { 0.0 };
    }

    pub fn set_separation(&mut self, separation: f32) -> MagnetResult<()> {
        self.separation = ensure_positive("separation", separation)?;
        self.update_poles();
        Ok(())
    }

    pub fn set_field_line_count(&mut self, count: usize) {
        self.field_line_count = count;
    }

    /// True when `point` lies strictly inside the exclusion radius
    /// (`radius - 1`) of either pole.
    #[inline]
    pub fn is_near_pole(&self, point: Vec2) -> bool {
        let limit = self.radius - 1.0;
        if limit <= 0.0 {
            return false;
        }
        let limit_sq = limit * limit;
        (point - self.north).length_squared() < limit_sq || (point - self.south).length_squared() < limit_sq
    }

    /// True when `point` is within the drawn body (either pole disc or the bar between them).
    pub fn hit_test(&self, point: Vec2) -> bool {
        let axis = self.north - self.south;
        let t = ((point - self.south).dot(axis) / axis.length_squared()).clamp(0.0, 1.0);
        let closest = self.south + axis * t;
        (point - closest).length_squared() <= self.radius * self.radius
    }

    // Draw the dipole
    pub fn draw(&self, draw: &Draw, viewport: &Viewport) {
        let north = viewport.world_to_screen(self.north);
        let south = viewport.world_to_screen(self.south);
        let radius = viewport.length_to_screen(self.radius);

        let (north_colour, south_colour) = if self.is_active() {
            (CRIMSON, ROYALBLUE)
        } else {
            (DARKGRAY, DARKGRAY)
        };

        draw.line()
            .start(south)
            .end(north)
            .weight(radius)
            .color(DIMGRAY);

        draw.ellipse().xy(south).radius(radius).color(south_colour);
        draw.ellipse().xy(north).radius(radius).color(north_colour);

        let font_size = (radius * 1.2).max(6.0) as u32;
        draw.text("S").xy(south).color(WHITE).font_size(font_size);
        draw.text("N").xy(north).color(WHITE).font_size(font_size);
    }
}
