use super::ids::{PairKey, PointId};
use super::point::Point;
use std::fmt;

/// An unordered pair of points found within a distance cutoff.
///
/// The order of `first` and `second` is the enumeration order of the input
/// slice; it matters only for seeding a chain.
#[derive(Debug, Clone, Copy)]
pub struct NeighborPair<'a> {
    first: &'a Point,
    second: &'a Point,
    distance: f64,
}

impl<'a> NeighborPair<'a> {
    pub fn new(first: &'a Point, second: &'a Point, distance: f64) -> Self {
        Self {
            first,
            second,
            distance,
        }
    }

    pub fn first(&self) -> &'a Point {
        self.first
    }

    pub fn second(&self) -> &'a Point {
        self.second
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn key(&self) -> PairKey {
        PairKey::new(self.first.id(), self.second.id())
    }

    pub fn ids(&self) -> (PointId, PointId) {
        (self.first.id(), self.second.id())
    }

    pub fn contains(&self, id: PointId) -> bool {
        self.first.id() == id || self.second.id() == id
    }

    /// The other member of the pair, if `id` is one of its members.
    pub fn partner_of(&self, id: PointId) -> Option<&'a Point> {
        if self.first.id() == id {
            Some(self.second)
        } else if self.second.id() == id {
            Some(self.first)
        } else {
            None
        }
    }
}

impl fmt::Display for NeighborPair<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first.id(), self.second.id())
    }
}
