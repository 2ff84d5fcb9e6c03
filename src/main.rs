//! grid-loss-roi entry point: CLI wiring, logging, and report output.

use std::process;

use anyhow::{Context, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use grid_loss_roi::analysis::Analysis;
use grid_loss_roi::cli::Args;
use grid_loss_roi::config::AnalysisConfig;
use grid_loss_roi::io::export::export_csv;
use grid_loss_roi::io::report::{Report, export_json};
use grid_loss_roi::io::workbook::Workbook;
use grid_loss_roi::tables::build_results_table;

/// Logs go to stderr so stdout carries only the report.
fn init_tracing(verbose: u8) {
    let default_level = if verbose > 0 { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(args: &Args) -> anyhow::Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_toml_file(path)?,
        None => AnalysisConfig::default(),
    };
    args.apply_overrides(&mut config);

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        bail!("invalid configuration ({} error(s))", errors.len());
    }
    Ok(config)
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = load_config(args)?;
    let workbook = Workbook::open(&args.workbook, config.assumptions.default_phase)
        .with_context(|| format!("cannot analyze workbook {}", args.workbook.display()))?;
    let analysis = Analysis::with_config(&workbook, &config);

    let location = args.location.as_deref();
    if let Some(loc) = location
        && !analysis.locations().contains(&loc)
    {
        bail!(
            "unknown location \"{loc}\", available: {}",
            analysis.locations().join(", ")
        );
    }

    println!("{}", build_results_table(analysis.filtered(location)));
    println!("\n{}", analysis.summary);
    println!("\n{}", analysis.assessment(location));

    if let Some(path) = &args.csv_out {
        export_csv(analysis.filtered(location), path)
            .with_context(|| format!("failed to write CSV {}", path.display()))?;
        info!(path = %path.display(), "result table written");
    }

    if let Some(path) = &args.report_out {
        export_json(&Report::new(&analysis, location), path)
            .with_context(|| format!("failed to write report {}", path.display()))?;
        info!(path = %path.display(), "report written");
    }

    Ok(())
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
