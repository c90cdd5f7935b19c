use crate::core::models::ids::PointId;
use crate::core::models::point::Point;
use nalgebra::{Unit, Vector3};
use thiserror::Error;

/// Arms shorter than this (in Angstroms) are treated as zero-length.
const COINCIDENCE_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum GeometryError {
    #[error("Angle undefined: point {other} coincides with vertex {vertex}")]
    CoincidentPoints { vertex: PointId, other: PointId },
}

#[inline]
pub fn squared_distance(a: &Point, b: &Point) -> f64 {
    nalgebra::distance_squared(a.position(), b.position())
}

#[inline]
pub fn distance(a: &Point, b: &Point) -> f64 {
    squared_distance(a, b).sqrt()
}

/// Angle in degrees subtended at `vertex` by `a` and `c`, in `[0, 180]`.
///
/// # Errors
///
/// Returns [`GeometryError::CoincidentPoints`] when `a` or `c` sits on the
/// vertex, since the direction of that arm is undefined.
pub fn angle_at_vertex(a: &Point, vertex: &Point, c: &Point) -> Result<f64, GeometryError> {
    let arm_a = unit_arm(vertex, a)?;
    let arm_c = unit_arm(vertex, c)?;
    let cosine = arm_a.into_inner().dot(&arm_c.into_inner()).clamp(-1.0, 1.0);
    Ok(cosine.acos().to_degrees())
}

fn unit_arm(vertex: &Point, tip: &Point) -> Result<Unit<Vector3<f64>>, GeometryError> {
    Unit::try_new(tip.position() - vertex.position(), COINCIDENCE_TOLERANCE).ok_or(
        GeometryError::CoincidentPoints {
            vertex: vertex.id(),
            other: tip.id(),
        },
    )
}
