use anyhow::Context;
use clap::Parser;
use generator::profile::{write_sensor_log, GeneratorConfig};
use log::info;
use std::io;
use std::path::PathBuf;
use workflow::config::RunConfig;
use workflow::report::{append_report, RunReport};
use workflow::runner::Runner;

mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Filters seabed distance-sensor logs and simulates the target LED")]
struct Args {
    /// Sensor log to filter, one reading per line
    #[arg(required_unless_present = "synthetic")]
    input: Option<PathBuf>,
    /// Load filter settings from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Maximum deviation from the rolling median, in millimeters
    #[arg(long)]
    threshold: Option<i32>,
    /// Text that precedes the reading on each line
    #[arg(long)]
    marker: Option<String>,
    /// Unit suffix stripped after the reading
    #[arg(long)]
    unit: Option<String>,
    /// Append a JSON summary line to this file
    #[arg(long)]
    report: Option<PathBuf>,
    /// Write a synthetic sensor log to this path before anything else
    #[arg(long)]
    synthetic: Option<PathBuf>,
    #[arg(long, default_value_t = 200)]
    lines: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if let Some(path) = args.synthetic.as_ref() {
        let generator_config = GeneratorConfig {
            lines: args.lines,
            seed: args.seed,
            ..Default::default()
        };
        let written = write_sensor_log(path, &generator_config)?;
        println!("Wrote {} synthetic lines to {}", written, path.display());
    }

    let Some(input) = args.input else {
        return Ok(());
    };

    let mut run_config = match args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    run_config.apply_overrides(args.threshold, args.marker, args.unit, args.report);

    let runner = Runner::new(run_config);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = runner.run_file(&input, &mut out)?;
    info!(
        "{} line(s) read, {} in range",
        summary.lines_read, summary.in_range
    );

    if let Some(report_path) = runner.config().report.as_ref() {
        let report = RunReport {
            input: input.clone(),
            threshold_mm: runner.config().threshold_mm,
            summary,
        };
        append_report(report_path, &report)
            .with_context(|| format!("recording run report for {}", input.display()))?;
    }

    Ok(())
}
