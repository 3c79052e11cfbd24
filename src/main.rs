//! Dealcast CLI
//!
//! Loads a deal definition from JSON, runs the debt-service projection,
//! and prints the year-by-year table with a run summary.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::warn;

use dealcast::deal::{load_deal, load_yearly_sde};
use dealcast::projection::{
    DscrRating, ProjectionConfig, ProjectionEngine, ProjectionResult, DEFAULT_PROJECTION_YEARS,
};

#[derive(Debug, Parser)]
#[command(name = "dealcast", about = "Acquisition financing projections")]
struct Args {
    /// Deal definition JSON file
    deal: PathBuf,

    /// Replace the deal's SDE forecast with a year,sde CSV
    #[arg(long)]
    sde_csv: Option<PathBuf>,

    /// Projection horizon in years
    #[arg(long, default_value_t = DEFAULT_PROJECTION_YEARS)]
    years: u32,

    /// Write the year-by-year rows to a CSV file
    #[arg(long)]
    csv_out: Option<PathBuf>,

    /// Write the full projection result as JSON
    #[arg(long)]
    json_out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut deal = load_deal(&args.deal)
        .with_context(|| format!("loading deal from {}", args.deal.display()))?;

    if let Some(path) = &args.sde_csv {
        deal.sde_forecast = load_yearly_sde(path)
            .with_context(|| format!("loading SDE forecast from {}", path.display()))?;
    }

    if !deal.funding_percentages_balanced() {
        // Validation never blocks the run; the result may just be misleading
        warn!("funding source percentages do not sum to 100%");
    }

    println!("Dealcast v{}", env!("CARGO_PKG_VERSION"));
    println!("==============\n");
    println!("Deal: {}", deal.name.as_deref().unwrap_or("(unnamed)"));
    if let Some(date) = deal.prepared_on {
        println!("  Prepared: {}", date);
    }
    println!("  Business Price: ${:.0}", deal.business_price);
    for source in &deal.funding_sources {
        println!(
            "  {:<14} ${:>12.0} ({:.1}%)",
            source.source_type.as_str(),
            source.amount,
            source.percentage,
        );
    }
    println!();

    let engine = ProjectionEngine::new(ProjectionConfig { years: args.years });
    let result = engine.project(&deal);

    print_table(&result);

    if let Some(path) = &args.csv_out {
        write_csv(&result, path)
            .with_context(|| format!("writing rows to {}", path.display()))?;
        println!("\nFull results written to: {}", path.display());
    }

    if let Some(path) = &args.json_out {
        let file = File::create(path)
            .with_context(|| format!("writing result to {}", path.display()))?;
        serde_json::to_writer_pretty(file, &result)?;
        println!("\nJSON result written to: {}", path.display());
    }

    let s = &result.summary;
    println!("\nSummary:");
    println!("  Total SDE:           ${:>14.0}", s.total_sde);
    println!("  Total Debt Service:  ${:>14.0}", s.total_debt_service);
    println!("  Total Earnout:       ${:>14.0}", s.total_earnout);
    println!("  Total Net Cash Flow: ${:>14.0}", s.total_net_cash_flow);
    println!("  Average DSCR:        {:>15.2}", s.average_dscr);

    Ok(())
}

fn print_table(result: &ProjectionResult) {
    println!(
        "{:>4} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>6}",
        "Year", "SDE", "SBA", "SellerNote", "OtherLoan", "Earnout", "NetCF", "DSCR"
    );
    println!("{}", "-".repeat(92));

    for row in &result.projections {
        let flag = match row.dscr_rating() {
            Some(DscrRating::Underwater) => " !",
            Some(DscrRating::Tight) => " ~",
            _ => "",
        };
        println!(
            "{:>4} {:>12.0} {:>12.0} {:>12.0} {:>12.0} {:>12.0} {:>12.0} {:>6.2}{}",
            row.year,
            row.sde,
            row.sba_payment,
            row.seller_note_payment,
            row.other_loan_payment,
            row.seller_earnout_payment,
            row.net_cash_flow,
            row.dscr,
            flag,
        );
    }
}

fn write_csv(result: &ProjectionResult, path: &PathBuf) -> std::io::Result<()> {
    let mut file = File::create(path)?;

    writeln!(
        file,
        "Year,SDE,SBA_Payment,SellerNote_Payment,OtherLoan_Payment,SellerEarnout_Payment,\
         TotalDebtService,NetCashFlow,DSCR,SBA_Balance,SellerNote_Balance,OtherLoan_Balance,\
         SellerEarnout_Balance"
    )?;

    for row in &result.projections {
        writeln!(
            file,
            "{},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.4},{:.2},{:.2},{:.2},{:.2}",
            row.year,
            row.sde,
            row.sba_payment,
            row.seller_note_payment,
            row.other_loan_payment,
            row.seller_earnout_payment,
            row.total_debt_service,
            row.net_cash_flow,
            row.dscr,
            row.sba_balance,
            row.seller_note_balance,
            row.other_loan_balance,
            row.seller_earnout_balance,
        )?;
    }

    Ok(())
}
