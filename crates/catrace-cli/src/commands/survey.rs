use crate::cli::SurveyArgs;
use crate::config::{ConfigOverrides, PartialChainConfig};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use catrace::{
    core::io::{records::RecordFile, traits::PointFile},
    engine::progress::ProgressReporter,
    workflows,
};
use tracing::{debug, info};

pub async fn run(args: SurveyArgs, quiet: bool) -> Result<()> {
    let partial_config = PartialChainConfig::load(args.config.as_deref())?;
    let config = partial_config.merge_with_cli(&ConfigOverrides::from(&args), &args.set_values)?;
    debug!(?config, "Final configuration.");

    info!("Loading points from {:?}", &args.input);
    let points = RecordFile::read_from_path(&args.input).map_err(|e| CliError::FileParsing {
        path: args.input.clone(),
        source: e.into(),
    })?;

    let progress_handler = CliProgressHandler::new();
    let reporter = if quiet {
        ProgressReporter::new()
    } else {
        ProgressReporter::with_callback(progress_handler.get_callback())
    };

    let survey =
        tokio::task::block_in_place(|| workflows::survey::run(&points, &config, &reporter))?;

    println!(
        "Adjacent points ({} within {:.2}):",
        survey.adjacent.len(),
        config.adjacent_threshold
    );
    for id in &survey.adjacent {
        println!("  {}", id);
    }

    let ranked = survey.scan.sorted_by_score();
    println!(
        "Best-scored triples ({} of {} retained, {} examined):",
        ranked.len().min(args.top),
        ranked.len(),
        survey.scan.examined
    );
    for triple in ranked.iter().take(args.top) {
        let (a, b, c) = triple.ids();
        println!(
            "  {}-{}-{}  angle {:>7.2}  score {:.4}",
            a, b, c, triple.angle, triple.score
        );
    }
    if !survey.scan.degenerate.is_empty() {
        println!(
            "Skipped {} degenerate triple(s) with coincident points.",
            survey.scan.degenerate.len()
        );
    }

    Ok(())
}
