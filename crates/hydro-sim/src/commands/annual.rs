use std::error::Error;

use clap::Args;
use hydro_climate::{parse_date, YearInput};
use serde_json::json;

use super::{print_json, ClimateSource};

#[derive(Args, Debug)]
pub struct AnnualArgs {
    #[command(flatten)]
    pub source: ClimateSource,
    /// Calendar year, or any date within it.
    #[arg(long)]
    pub year: String,
}

pub fn run(args: &AnnualArgs) -> Result<(), Box<dyn Error>> {
    let climate = args.source.load()?;
    let year = parse_year(&args.year)?;
    let total = climate.annual_rainfall(year)?;
    print_json(&json!({ "year": year.year(), "rainfall": total }))
}

fn parse_year(text: &str) -> Result<YearInput, Box<dyn Error>> {
    if let Ok(year) = text.trim().parse::<i32>() {
        return Ok(YearInput::Year(year));
    }
    Ok(YearInput::Date(parse_date(text, None)?))
}
