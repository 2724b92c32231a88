use anyhow::Context;
use clap::Parser;
use compute::Bills;
use read::read_calls;
use std::path::PathBuf;
use write::write_bills;

mod compute;
mod data;
mod read;
mod write;

/// Computes per-account charges from a CSV of phone call records.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Path to the usage CSV file
    #[arg(default_value = "usage.csv")]
    input: PathBuf,
    /// Path the computed bills are written to
    #[arg(short, long, default_value = "output.csv")]
    output: PathBuf,
}

fn main() -> Result<(), anyhow::Error> {
    env_logger::init();
    let args = Args::parse();
    let mut bills = Bills::new();
    let input = std::fs::File::open(&args.input)
        .with_context(|| format!("cannot open {}", args.input.display()))?;
    read_calls(input, &mut bills)?;
    let output = std::fs::File::create(&args.output)
        .with_context(|| format!("cannot create {}", args.output.display()))?;
    write_bills(output, &bills)?;
    Ok(())
}
