use clap::{ArgAction, Parser};
use log::{error, LevelFilter};
use mortgage_schedule::export::{save_workbook, write_all_csv};
use mortgage_schedule::input::{collect_parameters, RawParameters};
use mortgage_schedule::{PlanResults, Result};
use simple_logger::SimpleLogger;
use std::io;
use std::path::PathBuf;
use std::process;

/// Payment amounts and amortization schedules for six mortgage payment plans
#[derive(Parser)]
#[command(name = "mortgage-schedule", version, allow_negative_numbers = true)]
struct Cli {
    /// Principal loan amount (prompted for when omitted)
    #[arg(long)]
    principal: Option<String>,

    /// Yearly interest rate in percent, e.g. 5.5 (prompted for when omitted)
    #[arg(long)]
    rate: Option<String>,

    /// Amortization period in years (prompted for when omitted)
    #[arg(long)]
    amortization: Option<String>,

    /// Term of the mortgage in years (prompted for when omitted)
    #[arg(long)]
    term: Option<String>,

    /// Workbook to write, one sheet per plan plus a balance chart
    #[arg(long, default_value = "Loan_Amortization_Schedules.xlsx")]
    xlsx: PathBuf,

    /// Skip writing the workbook
    #[arg(long)]
    no_xlsx: bool,

    /// Also write one CSV file per plan into this directory
    #[arg(long)]
    csv_dir: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        match (self.quiet, self.verbose) {
            (true, _) => LevelFilter::Warn,
            (false, 0) => LevelFilter::Info,
            (false, 1) => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    SimpleLogger::new()
        .with_level(cli.log_level())
        .env()
        .init()
        .unwrap();

    if let Err(e) = run(cli) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    println!("--- Loan Amortization and Payment Schedule Generator ---");

    let raw = RawParameters {
        principal: cli.principal,
        rate_percent: cli.rate,
        amortization_years: cli.amortization,
        term_years: cli.term,
    };
    let loan = collect_parameters(raw, &mut io::stdin().lock(), &mut io::stdout())?;

    println!("\nCalculating Payment Schedules...");
    let results = PlanResults::build(&loan);
    show_summary(&results);

    if let Some(dir) = &cli.csv_dir {
        let written = write_all_csv(dir, &results)?;
        println!("{} CSV files saved in {}", written.len(), dir.display());
    }
    if !cli.no_xlsx {
        save_workbook(&cli.xlsx, &results)?;
        println!("Excel file saved: {}", cli.xlsx.display());
    }
    Ok(())
}

fn show_summary(results: &PlanResults) {
    println!(
        "\n{:<16} {:>12} {:>9} {:>16}",
        "Plan", "Payment", "Periods", "Ending Balance"
    );
    println!("{}", "-".repeat(56));
    for (plan, schedule) in results.schedules() {
        println!(
            "{:<16} {:>12.2} {:>4}/{:<4} {:>16.2}",
            plan.name(),
            results.periodic_payment(*plan),
            schedule.final_period(),
            schedule.term_periods,
            schedule.ending_balance()
        );
    }
}

// verifies that types can implement the gated traits below
#[cfg(test)]
fn is_normal<T: Sized + Send + Sync + Unpin>() {}

#[test]
fn normal_types() {
    is_normal::<mortgage_schedule::ScheduleRow>();
    is_normal::<mortgage_schedule::AmortizationSchedule>();
    is_normal::<PlanResults>();
}

#[test]
fn log_levels() {
    let cli = Cli::parse_from(["mortgage-schedule", "-vv", "--principal", "1000"]);
    assert_eq!(cli.log_level(), LevelFilter::Trace);
    assert_eq!(cli.principal.as_deref(), Some("1000"));

    let quiet = Cli::parse_from(["mortgage-schedule", "-q", "--no-xlsx"]);
    assert_eq!(quiet.log_level(), LevelFilter::Warn);
    assert!(quiet.no_xlsx);
}
