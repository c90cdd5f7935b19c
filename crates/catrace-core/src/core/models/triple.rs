use super::ids::PointId;
use super::point::Point;

/// Three points with the angle measured at `b`, scored against a reference
/// angle. Lower scores are closer to the reference.
#[derive(Debug, Clone, Copy)]
pub struct ScoredTriple<'a> {
    pub score: f64,
    pub angle: f64,
    pub a: &'a Point,
    pub b: &'a Point,
    pub c: &'a Point,
}

impl<'a> ScoredTriple<'a> {
    pub fn vertex(&self) -> &'a Point {
        self.b
    }

    pub fn ids(&self) -> (PointId, PointId, PointId) {
        (self.a.id(), self.b.id(), self.c.id())
    }
}
