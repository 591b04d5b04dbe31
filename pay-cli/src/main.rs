use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use pay_cli::app::{EmployeeInput, Session};
use pay_cli::input::Prompter;
use pay_cli::logging;
use pay_cli::settings::Settings;
use pay_core::BandTable;
use pay_data::BandTableLoader;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Monthly net pay calculator for UK employees.
///
/// Asks for the employee's name, number and yearly gross salary, then prints
/// the monthly pension, income tax, national insurance and parking
/// deductions along with the resulting net pay.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// TOML settings file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Band table CSV to use instead of the built-in UK schedule.
    #[arg(long)]
    bands: Option<PathBuf>,

    /// Leave pension contributions out of the breakdown.
    #[arg(long)]
    no_pension: bool,

    /// Leave the parking fee out of the breakdown.
    #[arg(long)]
    no_parking: bool,

    /// Employee full name. Prompted for when absent.
    #[arg(long)]
    name: Option<String>,

    /// Employee number. Prompted for when absent.
    #[arg(long)]
    number: Option<String>,

    /// Yearly gross salary in pounds. Prompted for when absent.
    #[arg(long, allow_hyphen_values = true)]
    salary: Option<String>,

    /// Log filter directive, e.g. `debug` or `pay_core=trace`.
    #[arg(long)]
    log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if cli.no_pension {
        settings.include_pension = false;
    }
    if cli.no_parking {
        settings.include_parking_fee = false;
    }
    if let Some(bands) = cli.bands {
        settings.bands_file = Some(bands);
    }

    let filter = logging::make_filter(cli.log_level.as_deref(), settings.log_level.as_deref())?;
    logging::init_logging(filter, cli.log_file.as_deref())?;
    debug!(?settings, "settings resolved");

    let table = match &settings.bands_file {
        Some(path) => {
            info!(path = %path.display(), "loading band table");
            BandTableLoader::load_from_path(path)
                .with_context(|| format!("Failed to load band table: {}", path.display()))?
        }
        None => BandTable::standard(),
    };
    let session = Session::new(table, settings.options()).context("band table is not usable")?;

    let preset = EmployeeInput {
        name: cli.name,
        number: cli.number,
        salary: cli.salary,
    };
    let mut prompter = Prompter::new(io::stdin().lock(), io::stdout().lock());
    session.run(&mut prompter, &preset)
}
