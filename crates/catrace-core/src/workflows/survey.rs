use crate::core::models::ids::PointId;
use crate::core::models::point::Point;
use crate::engine::config::{ADJACENT_CLASS, ChainConfig};
use crate::engine::context::Context;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use crate::engine::tasks;
use crate::engine::tasks::angle_scoring::AngleScan;
use crate::engine::tasks::neighbor_graph::NeighborGraph;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct Survey<'a> {
    pub graph: NeighborGraph<'a>,
    /// Points with at least one partner within the adjacent threshold, in
    /// order of first appearance.
    pub adjacent: Vec<PointId>,
    pub scan: AngleScan<'a>,
}

/// Lists close contacts and scores the vertex angle of every reachable
/// triple, without assembling a chain.
#[instrument(skip_all, name = "survey_workflow")]
pub fn run<'a>(
    points: &'a [Point],
    config: &'a ChainConfig,
    reporter: &'a ProgressReporter<'a>,
) -> Result<Survey<'a>, EngineError> {
    info!(num_points = points.len(), "Starting point survey.");
    let context = Context::new(points, config, reporter)?;

    let graph = reporter.phase("Neighbor Graph", || tasks::neighbor_graph::run(&context))?;
    let adjacent = graph.require(ADJACENT_CLASS)?.point_ids();
    let scan = reporter.phase("Angle Scoring", || tasks::angle_scoring::run(&context));

    info!(
        num_adjacent = adjacent.len(),
        num_triples = scan.triples.len(),
        "Point survey complete."
    );
    Ok(Survey {
        graph,
        adjacent,
        scan,
    })
}
