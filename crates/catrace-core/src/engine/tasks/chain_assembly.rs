use super::neighbor_graph::NeighborGraph;
use crate::core::models::chain::Chain;
use crate::core::models::ids::PointId;
use crate::core::models::pair::NeighborPair;
use crate::core::models::point::Point;
use crate::engine::config::NEIGHBOR_CLASS;
use crate::engine::context::Context;
use crate::engine::error::EngineError;
use crate::engine::progress::Progress;
use std::collections::{HashSet, VecDeque};
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, Copy)]
enum Extension<'a> {
    Prepend(&'a Point),
    Append(&'a Point),
}

/// Grows a single chain from a pool of neighbor pairs.
///
/// The first pair seeds the chain in its own order. Afterwards the pool is
/// scanned front to back for the first pair with one member on a chain end
/// and the other member not yet in the chain; that pair is consumed, the
/// chain grows by one point and the scan starts over. Assembly succeeds once
/// the pool is empty.
///
/// # Errors
///
/// - [`EngineError::EmptyNeighborPool`] if `pairs` is empty.
/// - [`EngineError::AssemblyStalled`] if a full scan over a non-empty pool
///   extends nothing, which happens whenever the pairs do not form one simple
///   path (a branch, a cycle, or a disconnected piece).
pub fn assemble<'a>(pairs: &[NeighborPair<'a>]) -> Result<Chain<'a>, EngineError> {
    assemble_with(pairs, |_| {})
}

#[instrument(skip_all, name = "chain_assembly_task")]
pub fn run<'a>(
    context: &Context<'a>,
    graph: &NeighborGraph<'a>,
) -> Result<Chain<'a>, EngineError> {
    let bucket = graph.require(NEIGHBOR_CLASS)?;
    info!(
        num_pairs = bucket.len(),
        cutoff = bucket.cutoff(),
        "Assembling chain from neighbor pairs."
    );

    context.reporter.report(Progress::TaskStart {
        total_steps: bucket.len() as u64,
    });
    let result = assemble_with(bucket.pairs(), |length| {
        context.reporter.report(Progress::ChainExtended { length });
        context.reporter.report(Progress::TaskIncrement);
    });
    context.reporter.report(Progress::TaskFinish);

    match &result {
        Ok(chain) => info!(chain_length = chain.len(), "Chain assembly complete."),
        Err(e) => warn!("Chain assembly failed: {}", e),
    }
    result
}

fn assemble_with<'a>(
    pairs: &[NeighborPair<'a>],
    on_extend: impl Fn(usize),
) -> Result<Chain<'a>, EngineError> {
    let mut pool: Vec<NeighborPair<'a>> = pairs.to_vec();
    if pool.is_empty() {
        return Err(EngineError::EmptyNeighborPool);
    }

    let seed = pool.remove(0);
    let mut chain: VecDeque<&'a Point> = VecDeque::from([seed.first(), seed.second()]);
    let mut members: HashSet<PointId> = chain.iter().map(|p| p.id()).collect();
    debug!(seed = %seed, "Seeded chain.");
    on_extend(chain.len());

    while !pool.is_empty() {
        let found = pool.iter().enumerate().find_map(|(index, pair)| {
            extension_for(pair, &chain, &members).map(|extension| (index, extension))
        });

        let Some((index, extension)) = found else {
            return Err(EngineError::AssemblyStalled {
                chain_length: chain.len(),
                remaining: pool.iter().map(NeighborPair::ids).collect(),
            });
        };

        let pair = pool.remove(index);
        let added = match extension {
            Extension::Prepend(point) => {
                chain.push_front(point);
                point
            }
            Extension::Append(point) => {
                chain.push_back(point);
                point
            }
        };
        members.insert(added.id());
        debug!(pair = %pair, added = %added.id(), chain_length = chain.len(), "Extended chain.");
        on_extend(chain.len());
    }

    Ok(Chain::from_points(chain.into()))
}

/// The first applicable rule, tested in order: `x` on the first end, `x` on
/// the last end, `y` on the first end, `y` on the last end. The partner must
/// not already be a member of the chain.
fn extension_for<'a>(
    pair: &NeighborPair<'a>,
    chain: &VecDeque<&'a Point>,
    members: &HashSet<PointId>,
) -> Option<Extension<'a>> {
    let first = *chain.front()?;
    let last = *chain.back()?;
    let (x, y) = (pair.first(), pair.second());
    let absent = |p: &Point| !members.contains(&p.id());

    if x.is_same_as(first) && absent(y) {
        Some(Extension::Prepend(y))
    } else if x.is_same_as(last) && absent(y) {
        Some(Extension::Append(y))
    } else if y.is_same_as(first) && absent(x) {
        Some(Extension::Prepend(x))
    } else if y.is_same_as(last) && absent(x) {
        Some(Extension::Append(x))
    } else {
        None
    }
}
