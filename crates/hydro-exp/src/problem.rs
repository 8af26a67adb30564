use std::collections::BTreeSet;

use hydro_core::errors::{ErrorInfo, HydroError};
use serde::{Deserialize, Serialize};

use crate::hash::stable_hash_string;
use crate::params::ParameterTable;

/// Sampling problem definition: variable names and their `[min, max]` bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingProblem {
    /// Declared variable count; must equal `names.len()`.
    pub num_vars: usize,
    /// Variable names.
    pub names: Vec<String>,
    /// `[min, max]` per variable.
    pub bounds: Vec<[f64; 2]>,
}

impl SamplingProblem {
    /// Builds and validates a problem.
    pub fn new(names: Vec<String>, bounds: Vec<[f64; 2]>) -> Result<Self, HydroError> {
        let problem = Self {
            num_vars: names.len(),
            names,
            bounds,
        };
        problem.validate()?;
        Ok(problem)
    }

    /// Builds the problem described by a parameter table.
    pub fn from_table(table: &ParameterTable) -> Result<Self, HydroError> {
        Self::new(table.names(), table.bounds())
    }

    /// Checks names, bounds and the declared variable count.
    pub fn validate(&self) -> Result<(), HydroError> {
        if self.names.is_empty() {
            return Err(config_error("problem.empty", "a sampling problem needs at least one parameter"));
        }
        if self.num_vars != self.names.len() || self.bounds.len() != self.names.len() {
            return Err(HydroError::Config(
                ErrorInfo::new("problem.shape", "names, bounds and num_vars disagree")
                    .with_context("num_vars", self.num_vars.to_string())
                    .with_context("names", self.names.len().to_string())
                    .with_context("bounds", self.bounds.len().to_string()),
            ));
        }
        let mut seen = BTreeSet::new();
        for (name, [min, max]) in self.names.iter().zip(&self.bounds) {
            if !seen.insert(name.as_str()) {
                return Err(HydroError::Config(
                    ErrorInfo::new("problem.duplicate", "parameter names must be unique")
                        .with_context("name", name.clone()),
                ));
            }
            if !min.is_finite() || !max.is_finite() || min >= max {
                return Err(HydroError::Config(
                    ErrorInfo::new("problem.bounds", "bounds must be finite with min < max")
                        .with_context("name", name.clone())
                        .with_context("min", min.to_string())
                        .with_context("max", max.to_string()),
                ));
            }
        }
        Ok(())
    }

    /// SHA-256 of the canonical JSON encoding of the problem.
    pub fn hash(&self) -> Result<String, HydroError> {
        stable_hash_string(self)
    }
}

fn config_error(code: &str, message: &str) -> HydroError {
    HydroError::Config(ErrorInfo::new(code, message))
}
