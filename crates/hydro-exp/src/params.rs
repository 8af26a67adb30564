use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use hydro_core::errors::{ErrorInfo, HydroError};
use serde::{Deserialize, Serialize};

/// One row of a parameter table: a name and its sampling bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name, used as the sample column header.
    pub name: String,
    /// Lower bound.
    pub min_val: f64,
    /// Upper bound.
    pub max_val: f64,
}

/// Parameters read from a `name,min_val,max_val` table, in file order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParameterTable {
    /// Parameters in file order.
    pub parameters: Vec<Parameter>,
}

impl ParameterTable {
    /// Reads a parameter table from disk.
    pub fn from_csv_path(path: &Path) -> Result<Self, HydroError> {
        let file = File::open(path).map_err(|err| HydroError::io("params.open", path, err))?;
        Self::from_csv_reader(file).map_err(|err| match err {
            HydroError::Parse(info) => {
                HydroError::Parse(info.with_context("path", path.display().to_string()))
            }
            other => other,
        })
    }

    /// Reads a parameter table from any reader. Columns other than
    /// `name`, `min_val` and `max_val` are ignored.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, HydroError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut parameters = Vec::new();
        for (row, result) in reader.deserialize::<Parameter>().enumerate() {
            let parameter = result.map_err(|err| {
                HydroError::Parse(
                    ErrorInfo::new("params.record", "malformed parameter row")
                        .with_context("line", (row + 2).to_string())
                        .with_hint(err.to_string()),
                )
            })?;
            parameters.push(parameter);
        }
        Ok(Self { parameters })
    }

    /// Parameter names in table order.
    pub fn names(&self) -> Vec<String> {
        self.parameters.iter().map(|p| p.name.clone()).collect()
    }

    /// `[min_val, max_val]` per parameter, aligned with [`ParameterTable::names`].
    pub fn bounds(&self) -> Vec<[f64; 2]> {
        self.parameters
            .iter()
            .map(|p| [p.min_val, p.max_val])
            .collect()
    }
}
