use std::error::Error;
use std::path::{Path, PathBuf};

use clap::Args;
use hydro_climate::{Climate, ClimateConfig};

pub mod annual;
pub mod sample;
pub mod seasonal;
pub mod summary;

/// Climate input shared by every climate subcommand.
#[derive(Args, Debug)]
pub struct ClimateSource {
    /// Delimited climate file whose first column holds dates.
    #[arg(long)]
    pub data: PathBuf,
    /// Optional YAML climate configuration.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl ClimateSource {
    pub fn load(&self) -> Result<Climate, Box<dyn Error>> {
        let config = match self.config.as_deref() {
            Some(path) => ClimateConfig::from_yaml_path(path)?,
            None => ClimateConfig::default(),
        };
        Ok(Climate::load_with_config(&self.data, config)?)
    }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    let bytes = hydro_core::to_canonical_json_bytes(value)?;
    println!("{}", String::from_utf8(bytes)?);
    Ok(())
}

pub fn display_path(path: &Path) -> String {
    path.display().to_string()
}
