use crate::core::models::ids::PointId;
use crate::core::models::point::Point;
use crate::core::models::triple::ScoredTriple;
use crate::core::utils::geometry::{GeometryError, angle_at_vertex, distance};
use crate::engine::config::ChainConfig;
use crate::engine::context::Context;
use crate::engine::progress::Progress;
use itertools::Itertools;
use tracing::{info, instrument, warn};

/// A triple whose angle could not be measured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DegenerateTriple {
    pub a: PointId,
    pub b: PointId,
    pub c: PointId,
    pub error: GeometryError,
}

#[derive(Debug, Clone, Default)]
pub struct AngleScan<'a> {
    /// Triples whose angle fell inside the acceptance window.
    pub triples: Vec<ScoredTriple<'a>>,
    /// Triples skipped because two of their points coincide.
    pub degenerate: Vec<DegenerateTriple>,
    /// Triples that passed the reachability pre-filter and were measured.
    pub examined: usize,
}

impl<'a> AngleScan<'a> {
    /// Retained triples, best (lowest) score first.
    pub fn sorted_by_score(&self) -> Vec<&ScoredTriple<'a>> {
        let mut sorted: Vec<_> = self.triples.iter().collect();
        sorted.sort_by(|x, y| x.score.total_cmp(&y.score));
        sorted
    }
}

/// Measures the angle at `b` and scores it.
///
/// Returns `Ok(None)` when the angle lies outside the configured window.
pub fn score_triple<'a>(
    a: &'a Point,
    b: &'a Point,
    c: &'a Point,
    config: &ChainConfig,
) -> Result<Option<ScoredTriple<'a>>, GeometryError> {
    let angle = angle_at_vertex(a, b, c)?;
    if !config.angle_window.contains(angle) {
        return Ok(None);
    }
    Ok(Some(ScoredTriple {
        score: config.angle_score(angle),
        angle,
        a,
        b,
        c,
    }))
}

/// Scores every triple `(a, b, c)` with `b` as the vertex and `{a, c}` an
/// unordered pair of the remaining points.
pub fn scan<'a>(points: &'a [Point], config: &ChainConfig) -> AngleScan<'a> {
    scan_with(points, config, || {})
}

#[instrument(skip_all, name = "angle_scoring_task")]
pub fn run<'a>(context: &Context<'a>) -> AngleScan<'a> {
    let config = context.config;
    info!(
        num_points = context.points.len(),
        prefilter = config.angle_prefilter,
        reference = config.reference_angle,
        "Scoring vertex angles."
    );

    context.reporter.report(Progress::TaskStart {
        total_steps: context.points.len() as u64,
    });
    let scan = scan_with(context.points, config, || {
        context.reporter.report(Progress::TaskIncrement)
    });
    context.reporter.report(Progress::TaskFinish);

    info!(
        examined = scan.examined,
        retained = scan.triples.len(),
        degenerate = scan.degenerate.len(),
        "Angle scoring complete."
    );
    scan
}

fn scan_with<'a>(
    points: &'a [Point],
    config: &ChainConfig,
    on_vertex: impl Fn(),
) -> AngleScan<'a> {
    let mut result = AngleScan::default();
    let reachable = |x: &Point, y: &Point| {
        !config.angle_prefilter || distance(x, y) < config.adjacent_threshold
    };

    for (vertex_index, b) in points.iter().enumerate() {
        let arms = points
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != vertex_index)
            .map(|(_, p)| p);

        for (a, c) in arms.tuple_combinations() {
            if !(reachable(a, b) && reachable(b, c)) {
                continue;
            }
            result.examined += 1;
            match score_triple(a, b, c, config) {
                Ok(Some(triple)) => result.triples.push(triple),
                Ok(None) => {}
                Err(error) => {
                    warn!(
                        a = %a.id(),
                        b = %b.id(),
                        c = %c.id(),
                        %error,
                        "Skipping degenerate triple."
                    );
                    result.degenerate.push(DegenerateTriple {
                        a: a.id(),
                        b: b.id(),
                        c: c.id(),
                        error,
                    });
                }
            }
        }
        on_vertex();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::ChainConfigBuilder;
    use crate::engine::progress::ProgressReporter;

    const TOLERANCE: f64 = 1e-9;

    fn point(id: i64, x: f64, y: f64, z: f64) -> Point {
        Point::new(id, x, y, z, "CA").unwrap()
    }

    fn unfiltered_config() -> ChainConfig {
        ChainConfig {
            angle_prefilter: false,
            ..ChainConfig::default()
        }
    }

    #[test]
    fn right_angle_is_retained_with_expected_score() {
        let a = point(1, 0.0, 0.0, 0.0);
        let b = point(2, 1.0, 0.0, 0.0);
        let c = point(3, 1.0, 1.0, 0.0);

        let triple = score_triple(&a, &b, &c, &ChainConfig::default())
            .unwrap()
            .unwrap();
        assert!((triple.angle - 90.0).abs() < TOLERANCE);
        assert!((triple.score - 20.0 / 30.0).abs() < TOLERANCE);
        assert_eq!(triple.vertex().id(), PointId(2));
    }

    #[test]
    fn angle_below_window_is_dropped() {
        let a = point(1, 1.0, 0.2, 0.0);
        let b = point(2, 0.0, 0.0, 0.0);
        let c = point(3, 1.0, -0.2, 0.0);
        assert!(
            score_triple(&a, &b, &c, &ChainConfig::default())
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn scan_enumerates_every_vertex_once_per_unordered_arm_pair() {
        let points = vec![
            point(1, 0.0, 0.0, 0.0),
            point(2, 1.0, 0.0, 0.0),
            point(3, 1.0, 1.0, 0.0),
        ];
        let scan = scan(&points, &unfiltered_config());

        // 3 vertices x C(2, 2) arm pairs; the right angle at 2 passes, the
        // two 45 degree angles at 1 and 3 do not.
        assert_eq!(scan.examined, 3);
        assert_eq!(scan.triples.len(), 1);
        assert_eq!(scan.triples[0].ids(), (PointId(1), PointId(2), PointId(3)));
        assert!(scan.degenerate.is_empty());
    }

    #[test]
    fn prefilter_skips_triples_with_long_arms() {
        let points = vec![
            point(1, 0.0, 0.0, 0.0),
            point(2, 3.8, 0.0, 0.0),
            point(3, 3.8, 3.0, 0.0),
            point(4, 3.8, 20.0, 0.0),
        ];
        let config = ChainConfigBuilder::new()
            .neighbor_threshold(4.5)
            .adjacent_threshold(3.9)
            .threshold_bound(Default::default())
            .angle_window(70.0, 180.0)
            .reference_angle(110.0)
            .angle_tolerance(30.0)
            .angle_prefilter(true)
            .build()
            .unwrap();

        let scan = scan(&points, &config);
        for triple in &scan.triples {
            assert!(distance(triple.a, triple.b) < 3.9);
            assert!(distance(triple.b, triple.c) < 3.9);
        }
        // Only vertex 2 has two short arms (to 1 and to 3).
        assert_eq!(scan.examined, 1);
        assert_eq!(scan.triples.len(), 1);
        assert_eq!(scan.triples[0].vertex().id(), PointId(2));
    }

    #[test]
    fn prefilter_uses_strict_comparison() {
        let points = vec![
            point(1, 0.0, 0.0, 0.0),
            point(2, 3.8, 0.0, 0.0),
            point(3, 3.8, 3.8, 0.0),
        ];
        let scan = scan(&points, &ChainConfig::default());
        assert_eq!(scan.examined, 0);
    }

    #[test]
    fn degenerate_triples_are_skipped_without_aborting() {
        let points = vec![
            point(1, 0.0, 0.0, 0.0),
            point(2, 1.0, 0.0, 0.0),
            point(3, 1.0, 0.0, 0.0),
            point(4, 1.0, 1.0, 0.0),
        ];
        let scan = scan(&points, &unfiltered_config());

        assert!(!scan.degenerate.is_empty());
        for skipped in &scan.degenerate {
            assert!(matches!(
                skipped.error,
                GeometryError::CoincidentPoints { .. }
            ));
        }
        assert!(
            scan.triples
                .iter()
                .any(|t| t.ids() == (PointId(1), PointId(2), PointId(4)))
        );
        assert!(scan.triples.iter().all(|t| t.angle.is_finite()));
    }

    #[test]
    fn sorted_by_score_puts_closest_to_reference_first() {
        let points = vec![
            point(1, 0.0, 0.0, 0.0),
            point(2, 1.0, 0.0, 0.0),
            point(3, 1.0, 1.0, 0.0),
            point(4, 2.0, 0.0, 0.0),
        ];
        let scan = scan(&points, &unfiltered_config());
        let scores: Vec<f64> = scan.sorted_by_score().iter().map(|t| t.score).collect();
        assert!(scores.len() >= 2);
        assert!(scores.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn run_matches_scan() {
        let points = vec![
            point(1, 0.0, 0.0, 0.0),
            point(2, 3.0, 0.0, 0.0),
            point(3, 4.0, 2.5, 0.0),
            point(4, 6.5, 3.5, 1.0),
        ];
        let config = ChainConfig::default();
        let reporter = ProgressReporter::new();
        let context = Context::new(&points, &config, &reporter).unwrap();

        let from_run = run(&context);
        let from_scan = scan(&points, &config);
        assert_eq!(from_run.examined, from_scan.examined);
        assert_eq!(from_run.triples.len(), from_scan.triples.len());
    }
}
