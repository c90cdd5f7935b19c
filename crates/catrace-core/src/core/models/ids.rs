use serde::Serialize;
use std::fmt;

/// Caller-assigned identity of a [`Point`](super::point::Point).
///
/// Every "is this point already in the chain" question is answered by comparing
/// `PointId`s, never coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PointId(pub i64);

impl PointId {
    pub fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for PointId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Order-independent key for an unordered pair of points.
///
/// `PairKey::new(a, b) == PairKey::new(b, a)` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey {
    low: PointId,
    high: PointId,
}

impl PairKey {
    pub fn new(a: PointId, b: PointId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn ids(&self) -> (PointId, PointId) {
        (self.low, self.high)
    }
}
