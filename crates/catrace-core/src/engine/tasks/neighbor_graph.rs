use crate::core::models::ids::{PairKey, PointId};
use crate::core::models::pair::NeighborPair;
use crate::core::models::point::Point;
use crate::core::utils::geometry::distance;
use crate::engine::config::{DistanceClass, ThresholdBound};
use crate::engine::context::{Context, ensure_unique_ids};
use crate::engine::error::EngineError;
use crate::engine::progress::Progress;
use itertools::Itertools;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, instrument};

/// All pairs of one distance class, kept in enumeration order and indexed by
/// their id pair so that equal distances never shadow each other.
#[derive(Debug, Clone)]
pub struct NeighborBucket<'a> {
    class: DistanceClass,
    pairs: Vec<NeighborPair<'a>>,
    index: HashMap<PairKey, usize>,
}

impl<'a> NeighborBucket<'a> {
    fn new(class: DistanceClass) -> Self {
        Self {
            class,
            pairs: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Callers enumerate each unordered pair once, so keys never repeat.
    fn insert(&mut self, pair: NeighborPair<'a>) {
        self.index.insert(pair.key(), self.pairs.len());
        self.pairs.push(pair);
    }

    pub fn class(&self) -> &DistanceClass {
        &self.class
    }

    pub fn name(&self) -> &str {
        &self.class.name
    }

    pub fn cutoff(&self) -> f64 {
        self.class.cutoff
    }

    pub fn pairs(&self) -> &[NeighborPair<'a>] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, a: PointId, b: PointId) -> Option<&NeighborPair<'a>> {
        self.index
            .get(&PairKey::new(a, b))
            .map(|&position| &self.pairs[position])
    }

    pub fn contains(&self, a: PointId, b: PointId) -> bool {
        self.index.contains_key(&PairKey::new(a, b))
    }

    /// Pairs ordered by ascending distance; ties keep enumeration order.
    pub fn by_distance(&self) -> Vec<&NeighborPair<'a>> {
        let mut sorted: Vec<_> = self.pairs.iter().collect();
        sorted.sort_by(|a, b| a.distance().total_cmp(&b.distance()));
        sorted
    }

    /// Distinct ids taking part in at least one pair, in order of first
    /// appearance.
    pub fn point_ids(&self) -> Vec<PointId> {
        let mut seen = HashSet::new();
        self.pairs
            .iter()
            .flat_map(|pair| [pair.first().id(), pair.second().id()])
            .filter(|id| seen.insert(*id))
            .collect()
    }
}

/// One bucket per distance class, built from a single pass over all pairs.
#[derive(Debug, Clone)]
pub struct NeighborGraph<'a> {
    bound: ThresholdBound,
    buckets: Vec<NeighborBucket<'a>>,
}

impl<'a> NeighborGraph<'a> {
    pub fn bound(&self) -> ThresholdBound {
        self.bound
    }

    pub fn buckets(&self) -> &[NeighborBucket<'a>] {
        &self.buckets
    }

    pub fn bucket(&self, name: &str) -> Option<&NeighborBucket<'a>> {
        self.buckets.iter().find(|bucket| bucket.name() == name)
    }

    pub fn require(&self, name: &str) -> Result<&NeighborBucket<'a>, EngineError> {
        self.bucket(name)
            .ok_or_else(|| EngineError::UnknownDistanceClass(name.to_string()))
    }
}

/// Buckets every unordered pair of `points` into each class whose cutoff
/// admits its distance.
pub fn build<'a>(
    points: &'a [Point],
    classes: &[DistanceClass],
    bound: ThresholdBound,
) -> Result<NeighborGraph<'a>, EngineError> {
    ensure_unique_ids(points)?;
    build_with(points, classes, bound, || {})
}

#[instrument(skip_all, name = "neighbor_graph_task")]
pub fn run<'a>(context: &Context<'a>) -> Result<NeighborGraph<'a>, EngineError> {
    let classes = context.config.distance_classes();
    let num_points = context.points.len() as u64;
    info!(
        num_points,
        bound = ?context.config.threshold_bound,
        "Building neighbor graph."
    );

    context.reporter.report(Progress::TaskStart {
        total_steps: num_points * num_points.saturating_sub(1) / 2,
    });
    let graph = build_with(
        context.points,
        &classes,
        context.config.threshold_bound,
        || context.reporter.report(Progress::TaskIncrement),
    )?;
    context.reporter.report(Progress::TaskFinish);

    for bucket in graph.buckets() {
        info!(
            class = bucket.name(),
            cutoff = bucket.cutoff(),
            num_pairs = bucket.len(),
            "Distance class populated."
        );
    }
    Ok(graph)
}

/// Expects unique ids, checked by [`build`] and [`Context::new`].
fn build_with<'a>(
    points: &'a [Point],
    classes: &[DistanceClass],
    bound: ThresholdBound,
    on_pair: impl Fn(),
) -> Result<NeighborGraph<'a>, EngineError> {
    if classes.is_empty() {
        return Err(EngineError::EmptyDistanceClasses);
    }

    let mut buckets: Vec<_> = classes.iter().cloned().map(NeighborBucket::new).collect();

    for (a, b) in points.iter().tuple_combinations() {
        let dist = distance(a, b);
        for bucket in buckets.iter_mut() {
            if bound.admits(dist, bucket.cutoff()) {
                debug!(class = bucket.name(), a = %a.id(), b = %b.id(), dist, "Pair admitted.");
                bucket.insert(NeighborPair::new(a, b, dist));
            }
        }
        on_pair();
    }

    Ok(NeighborGraph { bound, buckets })
}
