/*
 * Ferrite Module
 *
 * A FreeDipole is a passive magnet pinned at its centre. It does not move;
 * each update it samples its own body along the long axis, sums the force
 * every active source pole exerts on the samples, and snaps its orientation
 * to the direction of that total. There is no inertia or damping.
 *
 * The force model uses the opposite sign convention to the field model:
 * south poles pull (+strength), north poles push (-strength).
 */

use nannou::prelude::*;

use crate::dipole::Dipole;
use crate::error::{ensure_positive, MagnetError, MagnetResult};
use crate::viewport::Viewport;

pub const DEFAULT_LENGTH: f32 = 30.0;
pub const DEFAULT_WIDTH: f32 = 6.0;
pub const DEFAULT_SAMPLE_STEP: f32 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct FreeDipole {
    position: Vec2,
    length: f32,
    width: f32,
    sample_step: f32,
    orientation: f32,
    north: Vec2,
    south: Vec2,
}

/// Outcome of a single `update_moment` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MomentUpdate {
    /// Orientation was set to the direction of the summed force.
    Aligned(f32),
    /// A sample point sat exactly on a source pole.
    Degenerate,
    /// The forces cancelled out (or there were no active sources).
    NoForce,
}

impl FreeDipole {
    pub fn new(position: Vec2, length: f32, width: f32) -> MagnetResult<Self> {
        Self::with_sample_step(position, length, width, DEFAULT_SAMPLE_STEP)
    }

    pub fn with_sample_step(position: Vec2, length: f32, width: f32, sample_step: f32) -> MagnetResult<Self> {
        if !position.is_finite() {
            return Err(MagnetError::InvalidPosition { x: position.x, y: position.y });
        }

        let mut ferrite = Self {
            position,
            length: ensure_positive("ferrite length", length)?,
            width: ensure_positive("ferrite width", width)?,
            sample_step: ensure_positive("ferrite sample step", sample_step)?,
            orientation: 0.0,
            north: Vec2::ZERO,
            south: Vec2::ZERO,
        };
        ferrite.update_poles();
        Ok(ferrite)
    }

    fn update_poles(&mut self) {
        let half = self.axis() * (self.length / 2.0);
        self.north = self.position + half;
        self.south = self.position - half;
    }

    #[inline]
    fn axis(&self) -> Vec2 {
        vec2(self.orientation.cos(), self.orientation.sin())
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn sample_step(&self) -> f32 {
        self.sample_step
    }

    pub fn orientation(&self) -> f32 {
        self.orientation
    }

    pub fn north(&self) -> Vec2 {
        self.north
    }

    pub fn south(&self) -> Vec2 {
        self.south
    }

    pub fn set_orientation(&mut self, orientation: f32) {
        self.orientation = orientation;
        self.update_poles();
    }

    /// Offsets along the body, from `-length/2` up to `+length/2` in
    /// `sample_step` increments.
    pub fn sample_offsets(&self) -> impl Iterator<Item = f32> {
        let half = self.length / 2.0;
        let step = self.sample_step;
        let count = (self.length / step).floor() as usize;
        (0..=count).map(move |i| -half + i as f32 * step)
    }

    /// Summed force over all body samples, or `None` if a sample coincides
    /// with a pole of an active source.
    pub fn net_force<'a, I>(&self, sources: I) -> Option<Vec2>
    where
        I: IntoIterator<Item = &'a Dipole> + Clone,
    {
        let axis = self.axis();
        let mut force = Vec2::ZERO;

        for offset in self.sample_offsets() {
            let sample = self.position + axis * offset;

            for dipole in sources.clone() {
                if !dipole.is_active() {
                    continue;
                }

                let strength = dipole.strength();
                for (pole, signed_strength) in [(dipole.south(), strength), (dipole.north(), -strength)] {
                    let towards_pole = pole - sample;
                    let d_squared = towards_pole.length_squared();
                    if d_squared == 0.0 {
                        return None;
                    }

                    let d = d_squared.sqrt();
                    force += towards_pole * (signed_strength / (d_squared * d));
                }
            }
        }

        Some(force)
    }

    /// Re-orient the ferrite along the net force from `sources`.
    pub fn update_moment(&mut self, sources: &[Dipole]) -> MomentUpdate {
        let Some(force) = self.net_force(sources) else {
            log::trace!("ferrite at {:?} sits on a source pole, orientation kept", self.position);
            return MomentUpdate::Degenerate;
        };

        if force.x == 0.0 && force.y == 0.0 {
            return MomentUpdate::NoForce;
        }

        self.set_orientation(force.y.atan2(force.x));
        MomentUpdate::Aligned(self.orientation)
    }

    // Draw the ferrite as a bar with coloured ends
    pub fn draw(&self, draw: &Draw, viewport: &Viewport) {
        let centre = viewport.world_to_screen(self.position);
        let angle = viewport.angle_to_screen(self.orientation);
        let length = viewport.length_to_screen(self.length);
        let width = viewport.length_to_screen(self.width);

        draw.rect()
            .xy(centre)
            .w_h(length, width)
            .rotate(angle)
            .color(SLATEGRAY);

        let cap = (width * 0.8).max(1.0);
        draw.ellipse()
            .xy(viewport.world_to_screen(self.north))
            .radius(cap)
            .color(CRIMSON);
        draw.ellipse()
            .xy(viewport.world_to_screen(self.south))
            .radius(cap)
            .color(ROYALBLUE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn poles_stay_centred_and_length_apart() {
        let mut ferrite = FreeDipole::new(vec2(200.0, 200.0), 30.0, 6.0).unwrap();
        assert_abs_diff_eq!(ferrite.north().x, 215.0);
        assert_abs_diff_eq!(ferrite.south().x, 185.0);

        ferrite.set_orientation(1.1);
        assert_abs_diff_eq!((ferrite.north() - ferrite.south()).length(), 30.0, epsilon = 1e-4);
        let midpoint = (ferrite.north() + ferrite.south()) / 2.0;
        assert_abs_diff_eq!(midpoint.x, 200.0, epsilon = 1e-4);
        assert_abs_diff_eq!(midpoint.y, 200.0, epsilon = 1e-4);
    }

    #[test]
    fn samples_span_the_body() {
        let ferrite = FreeDipole::new(Vec2::ZERO, 10.0, 2.0).unwrap();
        let offsets: Vec<f32> = ferrite.sample_offsets().collect();
        assert_eq!(offsets, vec![-5.0, -3.0, -1.0, 1.0, 3.0, 5.0]);
    }

    #[test]
    fn aligns_between_opposite_poles_on_a_common_axis() {
        // Left magnet has its north pole facing the ferrite, the right one its south pole
        let left = Dipole::with_defaults(vec2(100.0, 200.0), FRAC_PI_2).unwrap();
        let right = Dipole::with_defaults(vec2(300.0, 200.0), FRAC_PI_2).unwrap();
        let sources = vec![left, right];

        let mut ferrite = FreeDipole::new(vec2(200.0, 200.0), 30.0, 6.0).unwrap();
        ferrite.set_orientation(0.4);
        for _ in 0..5 {
            ferrite.update_moment(&sources);
        }

        assert_abs_diff_eq!(ferrite.orientation().sin(), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn coincident_sample_leaves_orientation_unchanged() {
        // Ferrite centre sits exactly on the dipole's north pole
        let dipole = Dipole::with_defaults(vec2(200.0, 220.0), 0.0).unwrap();
        let mut ferrite = FreeDipole::new(dipole.north(), 20.0, 6.0).unwrap();
        ferrite.set_orientation(0.25);

        assert_eq!(ferrite.update_moment(&[dipole]), MomentUpdate::Degenerate);
        assert_eq!(ferrite.orientation(), 0.25);
    }

    #[test]
    fn inactive_sources_exert_no_force() {
        let mut dipole = Dipole::with_defaults(vec2(50.0, 50.0), 0.0).unwrap();
        dipole.set_strength(0.0);
        let mut ferrite = FreeDipole::new(vec2(200.0, 200.0), 30.0, 6.0).unwrap();
        ferrite.set_orientation(0.8);

        assert_eq!(ferrite.update_moment(&[dipole]), MomentUpdate::NoForce);
        assert_eq!(ferrite.orientation(), 0.8);
    }

    #[test]
    fn invalid_geometry_is_rejected() {
        assert!(FreeDipole::new(Vec2::ZERO, 0.0, 6.0).is_err());
        assert!(FreeDipole::new(Vec2::ZERO, 30.0, -6.0).is_err());
        assert!(FreeDipole::with_sample_step(Vec2::ZERO, 30.0, 6.0, 0.0).is_err());
    }
}
