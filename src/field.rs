/*
 * Field Module
 *
 * Superposition of inverse-square point-pole contributions. Every pole adds
 * `signed_strength / d²` along the unit vector pointing from the pole to
 * the query point; the field direction is the angle of the summed vector.
 *
 * The functions here never filter their input: callers pass the active
 * dipoles only (see `Scene::active_sources`).
 */

use nannou::prelude::*;

use crate::dipole::Dipole;

/// Net field vector at `point`. Poles that coincide exactly with `point`
/// are skipped; the remaining poles still contribute.
///
/// North poles push the field away and south poles pull it in, so between
/// the poles of a dipole the field runs from north to south.
pub fn field_vector<'a, I>(point: Vec2, sources: I) -> Vec2
where
    I: IntoIterator<Item = &'a Dipole>,
{
    let mut field = Vec2::ZERO;

    for dipole in sources {
        for (pole, signed_strength) in dipole.field_poles() {
            let offset = point - pole;
            let d_squared = offset.length_squared();
            if d_squared == 0.0 {
                continue;
            }

            let d = d_squared.sqrt();
            field += offset * (signed_strength / (d_squared * d));
        }
    }

    field
}

/// Direction of the net field at `point`, in radians.
pub fn field_direction<'a, I>(point: Vec2, sources: I) -> f32
where
    I: IntoIterator<Item = &'a Dipole>,
{
    direction_of(field_vector(point, sources))
}

/// Angle of `v`, with the zero vector mapped to 0 (east).
///
/// `atan2` alone would return PI for `(-0.0, 0.0)`; the explicit check keeps
/// the fallback independent of signed zeros.
#[inline]
pub fn direction_of(v: Vec2) -> f32 {
    if v.x == 0.0 && v.y == 0.0 {
        0.0
    } else {
        v.y.atan2(v.x)
    }
}
