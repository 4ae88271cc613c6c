//! Property Projection CLI
//!
//! Projects every requested scenario, prints the ledgers, then exports them.
//! Export problems are reported but never discard the printed results.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use property_projection::config::{load_investment, load_rental_overrides, load_repairs};
use property_projection::export::{export_ledgers, CsvSink, ExportOutcome, JsonSink, LedgerSink};
use property_projection::{FinancingMode, Ledger, Scenario, ScenarioRunner};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ExportFormat {
    Csv,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "property_projection", version, about = "Monthly projection of a leveraged rental property")]
struct Cli {
    /// Investment file (JSON)
    #[arg(long, default_value = property_projection::config::DEFAULT_INVESTMENT_PATH)]
    config: PathBuf,

    /// Extra repairs as a month,cost CSV (replaces same-month entries from the config)
    #[arg(long)]
    repairs: Option<PathBuf>,

    /// Extra rent overrides as a month,amount CSV
    #[arg(long)]
    rental_overrides: Option<PathBuf>,

    /// Override the number of months to project
    #[arg(long)]
    horizon: Option<u32>,

    /// Ignore debt service, brokerage fee and property tax
    #[arg(long)]
    all_cash: bool,

    /// Scenarios to run (defaults to all)
    #[arg(long, value_enum)]
    scenario: Vec<Scenario>,

    /// Rows to print per scenario (defaults to the whole horizon)
    #[arg(long)]
    rows: Option<usize>,

    /// Directory for exported files
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    #[arg(long, value_enum, default_value = "csv")]
    format: ExportFormat,

    /// Skip the export step
    #[arg(long)]
    no_export: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let (mut config, mut overlay) = load_investment(&cli.config)
        .with_context(|| format!("loading investment from {}", cli.config.display()))?;

    if let Some(path) = &cli.repairs {
        let repairs = load_repairs(path)
            .with_context(|| format!("loading repairs from {}", path.display()))?;
        for (month, cost) in repairs {
            overlay.add_repair(month, cost);
        }
    }

    if let Some(path) = &cli.rental_overrides {
        let overrides = load_rental_overrides(path)
            .with_context(|| format!("loading rental overrides from {}", path.display()))?;
        for (month, amount) in overrides {
            overlay.set_rental_override(month, amount);
        }
    }

    if let Some(horizon) = cli.horizon {
        config.horizon_months = horizon;
    }
    if cli.all_cash {
        config.financing = FinancingMode::AllCash;
    }

    let runner = ScenarioRunner::new(config, overlay).context("invalid investment inputs")?;

    let scenarios = if cli.scenario.is_empty() {
        Scenario::ALL.to_vec()
    } else {
        cli.scenario.clone()
    };

    // Phase 1: compute and report
    let ledgers = runner.run_scenarios(&scenarios);
    for ledger in &ledgers {
        print_ledger(ledger, cli.rows.unwrap_or(ledger.len()));
    }

    if cli.no_export {
        return Ok(());
    }

    // Phase 2: export; failures are reported, results above stand
    let mut sink: Box<dyn LedgerSink> = match cli.format {
        ExportFormat::Csv => Box::new(CsvSink::new(&cli.output_dir)),
        ExportFormat::Json => Box::new(JsonSink::new(cli.output_dir.join("property_projection.json"))),
    };

    match export_ledgers(sink.as_mut(), &ledgers) {
        ExportOutcome::Exported { location, .. } => {
            println!("\nResults exported to: {}", location);
        }
        ExportOutcome::Failed { sink, error } => {
            println!("\nError exporting via {}: {}", sink, error);
            println!("The projections above are complete; check the output location and permissions");
        }
    }

    Ok(())
}

fn print_ledger(ledger: &Ledger, rows: usize) {
    println!("\n{}:", ledger.scenario().title());
    println!(
        "{:>5} {:>14} {:>10} {:>8} {:>8} {:>10} {:>10} {:>10} {:>10} {:>8} {:>14}",
        "Month", "Value", "Rent", "HOA", "Repair", "Payment", "Principal", "Interest", "CashFlow", "CoC %", "Equity"
    );
    println!("{}", "-".repeat(118));

    for r in ledger.records().iter().take(rows) {
        println!(
            "{:>5} {:>14.2} {:>10.2} {:>8.2} {:>8.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>8.2} {:>14.2}",
            r.month,
            r.property_value,
            r.rental_income,
            r.hoa_cost,
            r.repair_cost,
            r.mortgage_payment,
            r.principal_portion,
            r.interest_portion,
            r.net_cash_flow,
            r.cash_on_cash_return_pct,
            r.equity,
        );
    }

    if ledger.len() > rows {
        println!("... ({} more months)", ledger.len() - rows);
    }

    let summary = ledger.summary();
    println!("\nSummary:");
    println!("  Total Months: {}", summary.total_months);
    println!("  Total Rental Income: ${:.2}", summary.total_rental_income);
    println!("  Total Repairs: ${:.2}", summary.total_repairs);
    println!("  Total Interest: ${:.2}", summary.total_interest);
    println!("  Total Net Cash Flow: ${:.2}", summary.total_net_cash_flow);
    println!("  Average CoC Return: {:.2}%", summary.average_coc_return_pct);
    println!("  Final Property Value: ${:.2}", summary.final_property_value);
    println!("  Final Loan Balance: ${:.2}", summary.final_remaining_balance);
    println!("  Final Equity: ${:.2}", summary.final_equity);
    match summary.equity_irr {
        Some(irr) => println!("  Equity IRR: {:.2}%", irr * 100.0),
        None => println!("  Equity IRR: n/a"),
    }
}
