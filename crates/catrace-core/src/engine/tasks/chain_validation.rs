use crate::core::models::chain::Chain;
use crate::core::models::ids::PointId;
use crate::core::models::point::Point;
use crate::core::utils::geometry::{GeometryError, angle_at_vertex};
use crate::engine::config::ChainConfig;
use crate::engine::context::Context;
use tracing::{info, instrument, warn};

/// The angle at one interior vertex of an assembled chain.
#[derive(Debug, Clone, Copy)]
pub struct ChainAngle<'a> {
    pub previous: &'a Point,
    pub vertex: &'a Point,
    pub next: &'a Point,
    /// `Err` when the vertex coincides with one of its chain neighbors.
    pub angle: Result<f64, GeometryError>,
}

impl ChainAngle<'_> {
    pub fn score(&self, config: &ChainConfig) -> Option<f64> {
        self.angle.ok().map(|angle| config.angle_score(angle))
    }

    /// A vertex is plausible when its angle is measurable and inside the
    /// acceptance window.
    pub fn is_plausible(&self, config: &ChainConfig) -> bool {
        matches!(self.angle, Ok(angle) if config.angle_window.contains(angle))
    }
}

#[derive(Debug, Clone)]
pub struct ChainValidation<'a> {
    pub angles: Vec<ChainAngle<'a>>,
    /// Vertices whose angle is outside the window or undefined, in chain order.
    pub flagged: Vec<PointId>,
}

impl ChainValidation<'_> {
    pub fn is_plausible(&self) -> bool {
        self.flagged.is_empty()
    }
}

pub fn validate<'a>(chain: &Chain<'a>, config: &ChainConfig) -> ChainValidation<'a> {
    let angles: Vec<ChainAngle<'a>> = chain
        .points()
        .windows(3)
        .map(|w| ChainAngle {
            previous: w[0],
            vertex: w[1],
            next: w[2],
            angle: angle_at_vertex(w[0], w[1], w[2]),
        })
        .collect();

    let flagged = angles
        .iter()
        .filter(|a| !a.is_plausible(config))
        .map(|a| a.vertex.id())
        .collect();

    ChainValidation { angles, flagged }
}

#[instrument(skip_all, name = "chain_validation_task")]
pub fn run<'a>(context: &Context<'a>, chain: &Chain<'a>) -> ChainValidation<'a> {
    let validation = validate(chain, context.config);
    for angle in validation
        .angles
        .iter()
        .filter(|a| !a.is_plausible(context.config))
    {
        match angle.angle {
            Ok(degrees) => warn!(
                vertex = %angle.vertex.id(),
                angle = degrees,
                "Chain vertex angle outside acceptance window."
            ),
            Err(e) => warn!(vertex = %angle.vertex.id(), "Chain vertex angle undefined: {}", e),
        }
    }
    info!(
        num_vertices = validation.angles.len(),
        num_flagged = validation.flagged.len(),
        "Chain validation complete."
    );
    validation
}
