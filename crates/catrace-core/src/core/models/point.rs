use super::ids::PointId;
use nalgebra::Point3;
use std::fmt;
use thiserror::Error;

/// Label given to points whose record carries none.
pub const DEFAULT_LABEL: &str = "CA";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PointError {
    #[error("Expected 4 or 5 fields (id x y z [label]), found {found}")]
    WrongArity { found: usize },
    #[error("Invalid point id '{value}': must be an integer")]
    InvalidId { value: String },
    #[error("Invalid {axis} coordinate '{value}'")]
    InvalidCoordinate { axis: char, value: String },
    #[error("Coordinate {axis} of point {id} is not finite ({value})")]
    NonFiniteCoordinate { id: PointId, axis: char, value: f64 },
}

/// A uniquely identified location in 3D space, typically a C-alpha atom.
///
/// Points are immutable once built. Identity is carried by [`PointId`]; two
/// points with the same id are the same chain element even if their
/// coordinates differ, see [`Point::is_same_as`].
#[derive(Debug, Clone)]
pub struct Point {
    id: PointId,
    position: Point3<f64>,
    label: String,
}

impl Point {
    /// Builds a point, rejecting NaN or infinite coordinates.
    pub fn new(
        id: impl Into<PointId>,
        x: f64,
        y: f64,
        z: f64,
        label: &str,
    ) -> Result<Self, PointError> {
        let id = id.into();
        for (axis, value) in [('x', x), ('y', y), ('z', z)] {
            if !value.is_finite() {
                return Err(PointError::NonFiniteCoordinate { id, axis, value });
            }
        }
        Ok(Self {
            id,
            position: Point3::new(x, y, z),
            label: label.to_string(),
        })
    }

    /// Builds a point from the whitespace-separated fields of a record
    /// (`id x y z [label]`).
    ///
    /// The id may be written as an integral real (`"4.0"`), as produced by
    /// tools that emit every column as a float.
    pub fn from_fields(fields: &[&str]) -> Result<Self, PointError> {
        let (id_str, coords, label) = match fields {
            [id, x, y, z] => (*id, [*x, *y, *z], DEFAULT_LABEL),
            [id, x, y, z, label] => (*id, [*x, *y, *z], *label),
            _ => return Err(PointError::WrongArity { found: fields.len() }),
        };

        let id = parse_id(id_str)?;
        let mut parsed = [0.0; 3];
        for ((slot, raw), axis) in parsed.iter_mut().zip(coords).zip(['x', 'y', 'z']) {
            *slot = raw.parse().map_err(|_| PointError::InvalidCoordinate {
                axis,
                value: raw.to_string(),
            })?;
        }

        Self::new(id, parsed[0], parsed[1], parsed[2], label)
    }

    pub fn id(&self) -> PointId {
        self.id
    }

    pub fn position(&self) -> &Point3<f64> {
        &self.position
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Identity comparison: true iff both points carry the same id.
    #[inline]
    pub fn is_same_as(&self, other: &Point) -> bool {
        self.id == other.id
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

fn parse_id(raw: &str) -> Result<PointId, PointError> {
    if let Ok(id) = raw.parse::<i64>() {
        return Ok(PointId(id));
    }
    let invalid = || PointError::InvalidId {
        value: raw.to_string(),
    };
    let real: f64 = raw.parse().map_err(|_| invalid())?;
    if real.is_finite() && real.fract() == 0.0 && real.abs() < i64::MAX as f64 {
        Ok(PointId(real as i64))
    } else {
        Err(invalid())
    }
}
