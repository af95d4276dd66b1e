//! Price-sensitivity sweep for one project
//!
//! Replays the same project under a grid of rate shifts, in parallel, and
//! prints how payback and lifetime savings move with the price assumptions.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rayon::prelude::*;

use heatpump_economics::market::provider::{
    CsvSeriesFetcher, HistoricalModelProvider, OfflineFetcher, SeriesFetcher,
};
use heatpump_economics::project::loader::load_project;
use heatpump_economics::scenario::{ScenarioSpec, SensitivityRunner};

#[derive(Parser, Debug)]
#[command(name = "sensitivity", about = "Price-sensitivity sweep")]
struct Args {
    /// Path to the project input JSON
    project: PathBuf,

    /// Directory of per-carrier CSV price series; defaults otherwise
    #[arg(long)]
    series_dir: Option<PathBuf>,

    /// Largest symmetric shift in points; the grid spans [-max, +max]
    #[arg(long, default_value_t = 3.0)]
    max_shift: f64,

    /// Grid step in points
    #[arg(long, default_value_t = 0.5)]
    step: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let input = load_project(&args.project)
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("loading project {}", args.project.display()))?;

    let fetcher: Box<dyn SeriesFetcher> = match &args.series_dir {
        Some(dir) => Box::new(CsvSeriesFetcher::new(dir.clone())),
        None => Box::new(OfflineFetcher),
    };
    let provider = HistoricalModelProvider::new(fetcher);
    let runner = SensitivityRunner::from_provider(&provider, &input);

    let mut specs = Vec::new();
    let steps = (args.max_shift / args.step).round() as i32;
    for i in -steps..=steps {
        let delta = i as f64 * args.step;
        specs.push(ScenarioSpec::symmetric(format!("{:+.1} pts", delta), delta));
    }

    let outcomes: Vec<_> = specs
        .par_iter()
        .map(|spec| runner.run(&input, spec))
        .collect();

    println!(
        "{:>12} {:>10} {:>16} {:>14} {:>10}",
        "Shift", "Payback", "Lifetime saved", "Net benefit", "Return"
    );
    println!("{}", "-".repeat(68));
    for outcome in &outcomes {
        let payback = outcome
            .payback_years
            .map(|y| format!("{:.1}y", y))
            .unwrap_or_else(|| "never".to_string());
        let rate = outcome
            .annualized_return_pct
            .map(|r| format!("{:.2}%", r))
            .unwrap_or_else(|| "n/a".to_string());
        println!(
            "{:>12} {:>10} {:>16.0} {:>14.0} {:>10}",
            outcome.label, payback, outcome.lifetime_savings, outcome.net_benefit, rate
        );
    }

    Ok(())
}
