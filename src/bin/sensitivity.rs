//! SDE growth-rate sensitivity sweep
//!
//! Re-projects one deal across a range of annual growth assumptions in
//! parallel and prints the coverage and cash-flow impact per scenario.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use rayon::prelude::*;

use dealcast::deal::load_deal;
use dealcast::forecast::SdeForecast;
use dealcast::projection::{ProjectionEngine, ProjectionResult};

#[derive(Debug, Parser)]
#[command(name = "sensitivity", about = "SDE growth sensitivity for a deal")]
struct Args {
    /// Deal definition JSON file
    deal: PathBuf,

    /// Lowest annual growth rate in percent
    #[arg(long, default_value_t = -10.0)]
    min: f64,

    /// Highest annual growth rate in percent
    #[arg(long, default_value_t = 20.0)]
    max: f64,

    /// Step between scenarios in percent
    #[arg(long, default_value_t = 2.5)]
    step: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    anyhow::ensure!(args.step > 0.0, "step must be positive");

    let deal = load_deal(&args.deal)
        .with_context(|| format!("loading deal from {}", args.deal.display()))?;
    let base_amount = deal.sde_forecast.expand(1).first().copied().unwrap_or(0.0);

    let mut rates = Vec::new();
    let mut rate = args.min;
    while rate <= args.max + 1e-9 {
        rates.push(rate);
        rate += args.step;
    }

    println!(
        "Sweeping {} growth scenarios ({}% to {}%) from year-1 SDE ${:.0}",
        rates.len(),
        args.min,
        args.max,
        base_amount
    );

    let start = Instant::now();
    let results: Vec<(f64, ProjectionResult)> = rates
        .par_iter()
        .map(|&growth_rate| {
            let mut scenario = deal.clone();
            scenario.sde_forecast = SdeForecast::Growth {
                base_amount,
                growth_rate,
            };
            let engine = ProjectionEngine::default();
            (growth_rate, engine.project(&scenario))
        })
        .collect();
    println!("Ran {} projections in {:?}\n", results.len(), start.elapsed());

    println!(
        "{:>8} {:>10} {:>16} {:>16} {:>14}",
        "Growth%", "Avg DSCR", "Total NetCF", "Total SDE", "Total Earnout"
    );
    println!("{}", "-".repeat(68));
    for (growth_rate, result) in &results {
        let s = &result.summary;
        println!(
            "{:>8.1} {:>10.2} {:>16.0} {:>16.0} {:>14.0}",
            growth_rate, s.average_dscr, s.total_net_cash_flow, s.total_sde, s.total_earnout
        );
    }

    Ok(())
}
