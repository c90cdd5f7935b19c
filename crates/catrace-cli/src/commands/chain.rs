use crate::cli::ChainArgs;
use crate::config::{ConfigOverrides, PartialChainConfig};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use catrace::{
    core::io::{records::RecordFile, traits::PointFile},
    core::models::ids::PointId,
    engine::progress::ProgressReporter,
    workflows,
};
use std::collections::HashSet;
use std::io::Write;
use tracing::{debug, info, warn};

pub async fn run(args: ChainArgs, quiet: bool) -> Result<()> {
    let mut seen = HashSet::new();
    if let Some(id) = args.expected.iter().find(|id| !seen.insert(**id)) {
        return Err(CliError::Argument(format!(
            "--expected lists point {} more than once",
            id
        )));
    }

    let partial_config = PartialChainConfig::load(args.config.as_deref())?;
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&ConfigOverrides::from(&args), &args.set_values)?;
    debug!(?config, "Final configuration.");

    info!("Loading points from {:?}", &args.input);
    let points = RecordFile::read_from_path(&args.input).map_err(|e| CliError::FileParsing {
        path: args.input.clone(),
        source: e.into(),
    })?;
    info!("Loaded {} point(s).", points.len());

    let progress_handler = CliProgressHandler::new();
    let reporter = if quiet {
        ProgressReporter::new()
    } else {
        ProgressReporter::with_callback(progress_handler.get_callback())
    };

    info!("Invoking the core reconstruction workflow...");
    let reconstruction = tokio::task::block_in_place(|| {
        workflows::reconstruct::run(&points, &config, &reporter)
    })?;
    let summary = reconstruction.summary();

    match &args.output {
        Some(path) => {
            RecordFile::write_chain_to_path(&reconstruction.chain, path).map_err(|e| {
                CliError::FileParsing {
                    path: path.clone(),
                    source: e.into(),
                }
            })?;
            info!("Chain written to {:?}", path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            RecordFile::write_chain_to(&reconstruction.chain, &mut stdout)
                .map_err(|e| CliError::Other(e.into()))?;
            stdout.flush()?;
        }
    }

    if !quiet {
        eprintln!(
            "Chain of {} point(s) assembled from {} neighbor pair(s).",
            summary.length, summary.neighbor_pairs
        );
        if !summary.excluded.is_empty() {
            eprintln!("  Excluded: {}", join_ids(&summary.excluded));
        }
        if !summary.flagged.is_empty() {
            eprintln!("  Implausible vertex angles at: {}", join_ids(&summary.flagged));
        }
    }

    if let Some(path) = &args.report {
        let report = toml::to_string_pretty(&summary).map_err(|e| CliError::Other(e.into()))?;
        std::fs::write(path, report)?;
        info!("Reconstruction report written to {:?}", path);
    }

    if !args.expected.is_empty() {
        let expected: Vec<PointId> = args.expected.iter().copied().map(PointId::from).collect();
        if reconstruction.chain.matches_order(&expected) {
            info!("Chain matches the expected order.");
            if !quiet {
                eprintln!("✓ Chain matches the expected order.");
            }
        } else {
            warn!(chain = %reconstruction.chain, "Chain differs from the expected order.");
            return Err(CliError::Other(anyhow::anyhow!(
                "Chain {} does not match the expected order [{}]",
                reconstruction.chain,
                join_ids(&expected)
            )));
        }
    }

    Ok(())
}

fn join_ids(ids: &[PointId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;
    use std::path::Path;

    const SHUFFLED_LINE: &str = "\
# four points on a line, 3.8 apart
3 7.6 0.0 0.0
1 0.0 0.0 0.0
4 11.4 0.0 0.0
2 3.8 0.0 0.0
";

    fn chain_args(input: &Path, extra: &[&str]) -> ChainArgs {
        let mut args = vec!["catrace", "chain", "-i", input.to_str().unwrap()];
        args.extend_from_slice(extra);
        match Cli::parse_from(args).command {
            Commands::Chain(args) => args,
            _ => panic!("Expected 'chain' subcommand"),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn writes_ordered_chain_and_report() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("points.txt");
        let output = dir.path().join("chain.txt");
        let report = dir.path().join("report.toml");
        fs::write(&input, SHUFFLED_LINE).unwrap();

        let args = chain_args(
            &input,
            &[
                "-o",
                output.to_str().unwrap(),
                "--report",
                report.to_str().unwrap(),
                "--expected",
                "1,2,3,4",
            ],
        );
        run(args, true).await.unwrap();

        let ids: Vec<String> = fs::read_to_string(&output)
            .unwrap()
            .lines()
            .map(|line| line.split_whitespace().next().unwrap().to_string())
            .collect();
        assert!(ids == ["1", "2", "3", "4"] || ids == ["4", "3", "2", "1"]);

        let report = fs::read_to_string(&report).unwrap();
        assert!(report.contains("length = 4"));
        assert!(report.contains("neighbor-pairs = 3"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn mismatched_expected_order_fails() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("points.txt");
        let output = dir.path().join("chain.txt");
        fs::write(&input, SHUFFLED_LINE).unwrap();

        let args = chain_args(
            &input,
            &["-o", output.to_str().unwrap(), "--expected", "1,3,2,4"],
        );
        assert!(matches!(run(args, true).await, Err(CliError::Other(_))));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn repeated_expected_ids_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("points.txt");
        fs::write(&input, SHUFFLED_LINE).unwrap();

        let args = chain_args(&input, &["--expected", "1,2,2,4"]);
        assert!(matches!(run(args, true).await, Err(CliError::Argument(_))));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn malformed_input_reports_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("points.txt");
        fs::write(&input, "1 0.0 0.0\n").unwrap();

        match run(chain_args(&input, &[]), true).await {
            Err(CliError::FileParsing { path, .. }) => assert_eq!(path, input),
            other => panic!("expected parse failure, got {:?}", other),
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn exclusive_bound_can_break_the_chain() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("points.txt");
        fs::write(&input, "1 0 0 0\n2 4 0 0\n3 8 0 0\n").unwrap();

        let args = chain_args(&input, &["--neighbor-threshold", "4", "--exclusive"]);
        assert!(matches!(
            run(args, true).await,
            Err(CliError::Core(
                catrace::engine::error::EngineError::EmptyNeighborPool
            ))
        ));
    }
}
