use thiserror::Error;

use super::config::ConfigError;
use crate::core::models::ids::PointId;
use crate::core::utils::geometry::GeometryError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("At least one distance class is required to build a neighbor graph")]
    EmptyDistanceClasses,

    #[error("Point id {0} appears more than once in the input")]
    DuplicatePointId(PointId),

    #[error("Distance class '{0}' is not present in the neighbor graph")]
    UnknownDistanceClass(String),

    #[error("No neighbor pairs to assemble: the neighbor threshold admits no pair of points")]
    EmptyNeighborPool,

    #[error(
        "Chain assembly stalled: {} unconsumed pair(s) remain after growing a chain of {chain_length} point(s): {}",
        remaining.len(),
        format_pairs(remaining)
    )]
    AssemblyStalled {
        chain_length: usize,
        remaining: Vec<(PointId, PointId)>,
    },

    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),
}

fn format_pairs(pairs: &[(PointId, PointId)]) -> String {
    pairs
        .iter()
        .map(|(a, b)| format!("({a}, {b})"))
        .collect::<Vec<_>>()
        .join(", ")
}
