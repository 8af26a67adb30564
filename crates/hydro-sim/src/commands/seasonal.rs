use std::error::Error;

use clap::Args;
use hydro_climate::{Phenomenon, SeasonRange};
use serde_json::json;

use super::{print_json, ClimateSource};

#[derive(Args, Debug)]
pub struct SeasonalArgs {
    #[command(flatten)]
    pub source: ClimateSource,
    /// `rainfall` or `et`.
    #[arg(long, default_value = "rainfall")]
    pub phenomenon: String,
    /// First day of the season; falls back to the configured default season.
    #[arg(long, requires = "end")]
    pub start: Option<String>,
    /// Last day of the season (inclusive).
    #[arg(long, requires = "start")]
    pub end: Option<String>,
    /// Substring identifying the station column.
    #[arg(long)]
    pub station: String,
}

pub fn run(args: &SeasonalArgs) -> Result<(), Box<dyn Error>> {
    let climate = args.source.load()?;
    let phenomenon: Phenomenon = args.phenomenon.parse()?;
    let (season, total) = match (&args.start, &args.end) {
        (Some(start), Some(end)) => {
            let season = SeasonRange::new(start.as_str(), end.as_str());
            let total = climate.get_seasonal_total(phenomenon, season.clone(), &args.station)?;
            (season, total)
        }
        _ => {
            let season = climate
                .config()
                .default_season
                .clone()
                .ok_or("pass --start/--end or set default_season in the climate config")?;
            let total = climate.get_default_seasonal_total(phenomenon, &args.station)?;
            (season, total)
        }
    };
    let (start, end) = season.resolve()?;
    print_json(&json!({
        "phenomenon": phenomenon.to_string(),
        "station": args.station,
        "start": start.to_string(),
        "end": end.to_string(),
        "total": total,
    }))
}
