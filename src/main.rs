use anyhow::{Context, Result};
use clap::Parser;
use pate_panda::cli::{Cli, OutputFormat};
use pate_panda::item_sets::{read_dataset, ItemSetMiner, Panda, PatternNoise};
use pate_panda::report::Report;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.debug);

    let max_row_noise = PatternNoise::validate_tolerance(args.max_row_noise)
        .context("Invalid value for --max-row-noise")?;
    let max_column_noise = PatternNoise::validate_tolerance(args.max_column_noise)
        .context("Invalid value for --max-column-noise")?;
    let mut miner =
        Panda::with_config(args.panda_config()).context("Invalid value for --complexity-weight")?;

    let dataset = read_dataset(&args.dataset)
        .with_context(|| format!("Failed to load dataset {}", args.dataset.display()))?;

    let patterns = miner.mine(&dataset);
    let report = Report::new(
        &patterns,
        &dataset,
        miner.cost_model(),
        max_row_noise,
        max_column_noise,
    );

    match args.format {
        OutputFormat::Text => print!("{}", report.to_text()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    Ok(())
}
