/*
 * Field-Line Tracer Module
 *
 * Walks a point through the field in fixed-length steps and records the
 * path as a polyline. Lines are seeded on a circle around each pole of
 * every active dipole; lines from south poles walk against the field so
 * that every line leaves its pole.
 *
 * A trace stops once the current point leaves the bounds or enters the
 * exclusion radius (`radius - 1`) of any pole, active or not. The point
 * that failed the check is kept, so lines end flush with pole edges.
 *
 * Tracing is the dominant per-frame cost (lines × steps × sources). Each
 * step only pushes one point into the output polyline.
 */

use nannou::prelude::*;
use rayon::prelude::*;
use std::f32::consts::{PI, TAU};

use crate::bounds::Bounds;
use crate::dipole::Dipole;
use crate::error::{ensure_positive, MagnetResult};
use crate::field;
use crate::scene::{Scene, SourceId};

pub const DEFAULT_RESOLUTION: f32 = 1.0;
pub const DEFAULT_MAX_STEPS: usize = 2000;

/// Which pole a line is seeded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    North,
    South,
}

impl Polarity {
    /// Angle added to the raw field direction while stepping.
    #[inline]
    pub fn offset(self) -> f32 {
        match self {
            Polarity::North => 0.0,
            Polarity::South => PI,
        }
    }
}

/// A start point for one field line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Seed {
    pub source: SourceId,
    pub polarity: Polarity,
    pub point: Vec2,
}

/// A traced line with at least two points.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldLine {
    pub source: SourceId,
    pub polarity: Polarity,
    pub points: Vec<Vec2>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldLineTracer {
    pub resolution: f32,
    pub max_steps: usize,
}

impl Default for FieldLineTracer {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

/// True when `point` is inside the exclusion radius of any pole in `dipoles`.
#[inline]
pub fn near_pole(point: Vec2, dipoles: &[Dipole]) -> bool {
    dipoles.iter().any(|dipole| dipole.is_near_pole(point))
}

/// Seed points around both poles of `dipole`: `field_line_count` equally
/// spaced angles on a circle of the pole radius.
pub fn seeds(id: SourceId, dipole: &Dipole) -> impl Iterator<Item = Seed> + '_ {
    let count = dipole.field_line_count();
    let radius = dipole.radius();

    [(Polarity::North, dipole.north()), (Polarity::South, dipole.south())]
        .into_iter()
        .flat_map(move |(polarity, pole)| {
            (0..count).map(move |k| {
                let angle = TAU * k as f32 / count as f32;
                Seed {
                    source: id,
                    polarity,
                    point: pole + vec2(angle.cos(), angle.sin()) * radius,
                }
            })
        })
}

impl FieldLineTracer {
    pub fn new(resolution: f32, max_steps: usize) -> MagnetResult<Self> {
        Ok(Self {
            resolution: ensure_positive("trace resolution", resolution)?,
            max_steps,
        })
    }

    /// Trace one line from `seed`.
    ///
    /// `dipoles` is the full source list: active dipoles supply the field,
    /// all of them act as obstacles. A result with fewer than two points
    /// means the seed itself was invalid.
    pub fn trace(&self, seed: Vec2, polarity: Polarity, dipoles: &[Dipole], bounds: &Bounds) -> Vec<Vec2> {
        let offset = polarity.offset();
        let mut points = Vec::with_capacity(64);
        let mut point = seed;
        points.push(point);

        for _ in 0..self.max_steps {
            if !bounds.contains(point) || near_pole(point, dipoles) {
                break;
            }

            let active = dipoles.iter().filter(|dipole| dipole.is_active());
            let angle = field::field_direction(point, active) + offset;
            point += vec2(angle.cos(), angle.sin()) * self.resolution;
            points.push(point);
        }

        points
    }

    /// Trace every field line of the scene, in source order, north pole
    /// seeds before south pole seeds. Seeds that produce no line are dropped.
    pub fn trace_scene(&self, scene: &Scene, bounds: &Bounds, parallel: bool) -> Vec<FieldLine> {
        let dipoles = scene.sources();
        let seeds: Vec<Seed> = scene
            .drawable_sources()
            .flat_map(|(id, dipole, _)| seeds(id, dipole))
            .collect();

        let trace_seed = |seed: &Seed| {
            let points = self.trace(seed.point, seed.polarity, dipoles, bounds);
            (points.len() >= 2).then(|| FieldLine {
                source: seed.source,
                polarity: seed.polarity,
                points,
            })
        };

        if parallel {
            seeds.par_iter().filter_map(trace_seed).collect()
        } else {
            seeds.iter().filter_map(trace_seed).collect()
        }
    }
}
