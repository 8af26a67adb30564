use std::error::Error;

use clap::Args;
use serde_json::json;
use tracing::info;

use super::{display_path, print_json, ClimateSource};

#[derive(Args, Debug)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub source: ClimateSource,
}

pub fn run(args: &SummaryArgs) -> Result<(), Box<dyn Error>> {
    let climate = args.source.load()?;
    info!(
        data = %display_path(&args.source.data),
        rows = climate.len(),
        "summarising climate data"
    );
    let payload = json!({
        "label": climate.config().label,
        "units": climate.config().units,
        "summary": climate.description(),
    });
    print_json(&payload)
}
