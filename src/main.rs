//! Heat-Pump Economics CLI
//!
//! Runs one simulation from a project JSON file and prints the year table,
//! with optional CSV and JSON output for downstream tooling.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use heatpump_economics::market::provider::{
    CsvSeriesFetcher, HistoricalModelProvider, OfflineFetcher, SeriesFetcher,
};
use heatpump_economics::project::loader::load_project;
use heatpump_economics::simulator::Simulator;

#[derive(Parser, Debug)]
#[command(name = "heatpump_economics", about = "Heat-pump replacement economics")]
struct Args {
    /// Path to the project input JSON
    project: PathBuf,

    /// Directory of per-carrier CSV price series; defaults otherwise
    #[arg(long)]
    series_dir: Option<PathBuf>,

    /// Write the year table to this CSV file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the full result as JSON instead of the table
    #[arg(long)]
    json: bool,
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
    let simulator = Simulator::new(HistoricalModelProvider::new(fetcher));
    let result = simulator.run(&input);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Heat-Pump Economics v0.1.0");
    println!("==========================\n");

    println!("Zone: {}  Adjusted COP: {:.2}", result.climate_zone.as_str(), result.adjusted_cop);
    println!("{}", result.sizing.advisory);
    println!();

    println!(
        "Year 1: current {:.0}, heat pump {:.0}, savings {:.0} ({:.0}/month)",
        result.year_one.current_system_cost,
        result.year_one.heat_pump_cost,
        result.year_one.savings,
        result.year_one.monthly_savings,
    );
    println!();

    println!(
        "{:>4} {:>14} {:>14} {:>12} {:>14}",
        "Year", "Current", "Heat pump", "Savings", "Cumulative"
    );
    println!("{}", "-".repeat(62));
    for row in &result.years {
        println!(
            "{:>4} {:>14.2} {:>14.2} {:>12.2} {:>14.2}",
            row.year + 1,
            row.current_system_cost,
            row.heat_pump_cost,
            row.savings,
            row.cumulative_savings,
        );
    }

    println!("\nSummary:");
    println!("  Real investment: {:.2}", result.financing.real_investment);
    if result.financing.monthly_payment > 0.0 {
        println!(
            "  Loan: {:.2}/month, total credit cost {:.2}",
            result.financing.monthly_payment, result.financing.total_credit_cost
        );
    }
    println!("  Lifetime savings: {:.2}", result.lifetime_savings);
    println!("  Net benefit: {:.2}", result.net_benefit);
    match result.payback_years {
        Some(years) => println!(
            "  Payback: {:.1} years (in {})",
            years,
            result.payback_calendar_year.unwrap_or_default()
        ),
        None => println!("  Payback: not reached within the lifetime"),
    }
    match result.annualized_return_pct {
        Some(rate) => println!("  Annualized return: {:.2}%", rate),
        None => println!("  Annualized return: n/a"),
    }

    if let Some(path) = &args.output {
        let mut file = File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        writeln!(file, "Year,Current,HeatPump,Savings,Cumulative")?;
        for row in &result.years {
            writeln!(
                file,
                "{},{:.2},{:.2},{:.2},{:.2}",
                row.year + 1,
                row.current_system_cost,
                row.heat_pump_cost,
                row.savings,
                row.cumulative_savings,
            )?;
        }
        println!("\nYear table written to: {}", path.display());
    }

    Ok(())
}
