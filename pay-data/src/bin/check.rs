use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use pay_data::BandTableLoader;

/// Validate a band table CSV file and print what it defines.
///
/// Each line of the file is `category,threshold,rate` where category is one
/// of incometax, nationalinsurance, pension or parking. Use `inf` as the
/// threshold of an open-ended pension bracket.
#[derive(Parser, Debug)]
#[command(name = "band-table-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing band data
    #[arg(short, long)]
    file: PathBuf,

    /// Succeed even if some categories are not defined
    #[arg(long, default_value_t = false)]
    allow_missing: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Checking band table: {}", args.file.display());

    let table = BandTableLoader::load_from_path(&args.file)
        .with_context(|| format!("Failed to load band table: {}", args.file.display()))?;

    print!("{table}");

    let missing = table.missing_categories();
    if missing.is_empty() {
        println!("All categories defined.");
        return Ok(());
    }

    let names: Vec<_> = missing.iter().map(|c| c.as_str()).collect();
    println!("Missing categories: {}", names.join(", "));
    if !args.allow_missing {
        bail!("band table is incomplete");
    }
    Ok(())
}
