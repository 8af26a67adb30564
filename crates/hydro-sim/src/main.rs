use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    annual::{self, AnnualArgs},
    sample::{self, SampleArgs},
    seasonal::{self, SeasonalArgs},
    summary::{self, SummaryArgs},
};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "hydro-sim", about = "Catchment climate queries and parameter sampling")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the yearly totals and descriptive statistics of a climate file.
    Summary(SummaryArgs),
    /// Print the total rainfall of one calendar year.
    Annual(AnnualArgs),
    /// Print a station's seasonal rainfall or evapotranspiration total.
    Seasonal(SeasonalArgs),
    /// Draw Latin hypercube samples from a parameter table.
    Sample(SampleArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Command::Summary(args) => summary::run(&args),
        Command::Annual(args) => annual::run(&args),
        Command::Seasonal(args) => seasonal::run(&args),
        Command::Sample(args) => sample::run(&args),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
