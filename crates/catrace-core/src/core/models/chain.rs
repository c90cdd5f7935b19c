use super::ids::PointId;
use super::point::Point;
use std::fmt;

/// An ordered path of points with no repeated ids.
///
/// Chains are produced by the chain assembler and are read-only afterwards.
/// Direction carries no meaning: a chain and its reverse describe the same
/// backbone.
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    points: Vec<&'a Point>, // Ordered chain elements, first to last
}

impl<'a> Chain<'a> {
    pub(crate) fn from_points(points: Vec<&'a Point>) -> Self {
        debug_assert!(
            {
                let mut ids: Vec<_> = points.iter().map(|p| p.id()).collect();
                ids.sort_unstable();
                ids.windows(2).all(|w| w[0] != w[1])
            },
            "chain must not repeat point ids"
        );
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&'a Point> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<&'a Point> {
        self.points.last().copied()
    }

    pub fn points(&self) -> &[&'a Point] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Point> + '_ {
        self.points.iter().copied()
    }

    pub fn ids(&self) -> Vec<PointId> {
        self.points.iter().map(|p| p.id()).collect()
    }

    pub fn contains(&self, id: PointId) -> bool {
        self.points.iter().any(|p| p.id() == id)
    }

    /// Consecutive point pairs along the chain: the segments a renderer
    /// would draw.
    pub fn segments(&self) -> impl Iterator<Item = (&'a Point, &'a Point)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    pub fn reversed(&self) -> Chain<'a> {
        Self {
            points: self.points.iter().rev().copied().collect(),
        }
    }

    /// Whether the chain visits exactly `expected`, in either direction.
    pub fn matches_order(&self, expected: &[PointId]) -> bool {
        if self.points.len() != expected.len() {
            return false;
        }
        let forward = self.points.iter().zip(expected).all(|(p, id)| p.id() == *id);
        forward
            || self
                .points
                .iter()
                .rev()
                .zip(expected)
                .all(|(p, id)| p.id() == *id)
    }
}

impl fmt::Display for Chain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, point) in self.points.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", point.id())?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: i64) -> Vec<Point> {
        (1..=n)
            .map(|i| Point::new(i, i as f64, 0.0, 0.0, "CA").unwrap())
            .collect()
    }

    fn ids(raw: &[i64]) -> Vec<PointId> {
        raw.iter().copied().map(PointId).collect()
    }

    #[test]
    fn accessors_reflect_point_order() {
        let points = line(3);
        let chain = Chain::from_points(points.iter().collect());

        assert_eq!(chain.len(), 3);
        assert!(!chain.is_empty());
        assert_eq!(chain.first().map(Point::id), Some(PointId(1)));
        assert_eq!(chain.last().map(Point::id), Some(PointId(3)));
        assert_eq!(chain.ids(), ids(&[1, 2, 3]));
        assert!(chain.contains(PointId(2)));
        assert!(!chain.contains(PointId(4)));
        assert_eq!(chain.to_string(), "[1, 2, 3]");
    }

    #[test]
    fn segments_link_consecutive_points() {
        let points = line(4);
        let chain = Chain::from_points(points.iter().collect());
        let segments: Vec<_> = chain.segments().map(|(a, b)| (a.id(), b.id())).collect();
        assert_eq!(
            segments,
            vec![
                (PointId(1), PointId(2)),
                (PointId(2), PointId(3)),
                (PointId(3), PointId(4)),
            ]
        );
    }

    #[test]
    fn matches_order_accepts_either_direction() {
        let points = line(4);
        let chain = Chain::from_points(points.iter().collect());

        assert!(chain.matches_order(&ids(&[1, 2, 3, 4])));
        assert!(chain.matches_order(&ids(&[4, 3, 2, 1])));
        assert!(!chain.matches_order(&ids(&[1, 3, 2, 4])));
        assert!(!chain.matches_order(&ids(&[1, 2, 3])));
        assert!(chain.reversed().matches_order(&ids(&[1, 2, 3, 4])));
        assert_eq!(chain.reversed().ids(), ids(&[4, 3, 2, 1]));
    }
}
