use std::fs;
use std::path::Path;

use hydro_core::errors::{ErrorInfo, HydroError};
use serde::{Deserialize, Serialize};

/// Sample count and master seed for a sampling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingPlan {
    /// Number of samples to draw; defaults to 5.
    #[serde(default = "SamplingPlan::default_samples")]
    pub samples: usize,
    /// Master seed; defaults to 0.
    #[serde(default)]
    pub seed: u64,
}

impl SamplingPlan {
    const fn default_samples() -> usize {
        5
    }

    /// Loads a plan from YAML (JSON documents are valid YAML).
    pub fn from_path(path: &Path) -> Result<Self, HydroError> {
        let contents =
            fs::read_to_string(path).map_err(|err| HydroError::io("plan.read", path, err))?;
        serde_yaml::from_str(&contents).map_err(|err| {
            HydroError::Config(
                ErrorInfo::new("plan.parse", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })
    }
}

impl Default for SamplingPlan {
    fn default() -> Self {
        Self {
            samples: Self::default_samples(),
            seed: 0,
        }
    }
}
