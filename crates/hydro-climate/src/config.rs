use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use hydro_core::errors::{ErrorInfo, HydroError};
use serde::{Deserialize, Serialize};

use crate::dates::SeasonRange;

/// Optional settings recognised when loading climate data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClimateConfig {
    /// Human readable name of the dataset.
    #[serde(default)]
    pub label: Option<String>,
    /// Units of the numeric columns, e.g. `mm`.
    #[serde(default)]
    pub units: Option<String>,
    /// Field delimiter; must be a single ASCII character.
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    /// Explicit `chrono` format for the index column.
    #[serde(default)]
    pub date_format: Option<String>,
    /// Season used when a query does not name one.
    #[serde(default)]
    pub default_season: Option<SeasonRange>,
    /// Free-form metadata carried alongside the data, never interpreted.
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

fn default_delimiter() -> char {
    ','
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            label: None,
            units: None,
            delimiter: default_delimiter(),
            date_format: None,
            default_season: None,
            extra: BTreeMap::new(),
        }
    }
}

impl ClimateConfig {
    /// Parses a YAML document.
    pub fn from_yaml_str(contents: &str) -> Result<Self, HydroError> {
        serde_yaml::from_str(contents).map_err(|err| {
            HydroError::Config(ErrorInfo::new("climate.config_parse", err.to_string()))
        })
    }

    /// Reads and parses a YAML file.
    pub fn from_yaml_path(path: &Path) -> Result<Self, HydroError> {
        let contents =
            fs::read_to_string(path).map_err(|err| HydroError::io("climate.config_read", path, err))?;
        Self::from_yaml_str(&contents).map_err(|err| match err {
            HydroError::Config(info) => {
                HydroError::Config(info.with_context("path", path.display().to_string()))
            }
            other => other,
        })
    }

    pub(crate) fn delimiter_byte(&self) -> Result<u8, HydroError> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                HydroError::Config(
                    ErrorInfo::new("climate.delimiter", "delimiter must be a single ASCII character")
                        .with_context("delimiter", self.delimiter.to_string()),
                )
            })
    }
}
