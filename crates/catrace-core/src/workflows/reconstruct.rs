use crate::core::models::chain::Chain;
use crate::core::models::ids::PointId;
use crate::core::models::point::Point;
use crate::engine::config::{ADJACENT_CLASS, ChainConfig, NEIGHBOR_CLASS};
use crate::engine::context::Context;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use crate::engine::tasks;
use crate::engine::tasks::chain_validation::ChainValidation;
use crate::engine::tasks::neighbor_graph::NeighborGraph;
use serde::Serialize;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone)]
pub struct Reconstruction<'a> {
    pub graph: NeighborGraph<'a>,
    pub chain: Chain<'a>,
    pub validation: ChainValidation<'a>,
    /// Input points that never appeared in a neighbor pair, in input order.
    pub excluded: Vec<PointId>,
}

/// Owned, serializable digest of a [`Reconstruction`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReconstructionSummary {
    pub length: usize,
    pub order: Vec<PointId>,
    pub neighbor_pairs: usize,
    pub adjacent_pairs: usize,
    pub excluded: Vec<PointId>,
    pub flagged: Vec<PointId>,
    pub angles: Vec<VertexAngle>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VertexAngle {
    pub vertex: PointId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
}

impl Reconstruction<'_> {
    pub fn summary(&self) -> ReconstructionSummary {
        let pair_count = |name: &str| self.graph.bucket(name).map_or(0, |b| b.len());
        ReconstructionSummary {
            length: self.chain.len(),
            order: self.chain.ids(),
            neighbor_pairs: pair_count(NEIGHBOR_CLASS),
            adjacent_pairs: pair_count(ADJACENT_CLASS),
            excluded: self.excluded.clone(),
            flagged: self.validation.flagged.clone(),
            angles: self
                .validation
                .angles
                .iter()
                .map(|a| VertexAngle {
                    vertex: a.vertex.id(),
                    angle: a.angle.ok(),
                })
                .collect(),
        }
    }
}

/// Orders `points` into a single chain.
///
/// # Errors
///
/// Fails on duplicate point ids, when no pair falls within the neighbor
/// threshold, or when the neighbor pairs do not form one simple path.
#[instrument(skip_all, name = "reconstruct_workflow")]
pub fn run<'a>(
    points: &'a [Point],
    config: &'a ChainConfig,
    reporter: &'a ProgressReporter<'a>,
) -> Result<Reconstruction<'a>, EngineError> {
    info!(num_points = points.len(), "Starting chain reconstruction.");
    let context = Context::new(points, config, reporter)?;

    let graph = reporter.phase("Neighbor Graph", || tasks::neighbor_graph::run(&context))?;
    let chain = reporter.phase("Chain Assembly", || {
        tasks::chain_assembly::run(&context, &graph)
    })?;
    let validation = reporter.phase("Chain Validation", || {
        tasks::chain_validation::run(&context, &chain)
    });

    let excluded: Vec<PointId> = points
        .iter()
        .map(Point::id)
        .filter(|id| !chain.contains(*id))
        .collect();
    if !excluded.is_empty() {
        warn!(
            num_excluded = excluded.len(),
            "Some points are not part of the chain."
        );
    }

    info!(
        chain_length = chain.len(),
        num_flagged = validation.flagged.len(),
        "Chain reconstruction complete."
    );
    Ok(Reconstruction {
        graph,
        chain,
        validation,
        excluded,
    })
}
