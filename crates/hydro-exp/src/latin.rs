use std::fs;
use std::path::Path;

use csv::WriterBuilder;
use hydro_core::errors::{ErrorInfo, HydroError};
use hydro_core::RngHandle;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::problem::SamplingProblem;

/// Sampled parameter sets, one row per sample with values in `names` order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSet {
    /// Parameter names, the CSV header.
    pub names: Vec<String>,
    /// One row per sample.
    pub rows: Vec<Vec<f64>>,
    /// Master seed the samples were drawn with.
    pub seed: u64,
    /// [`SamplingProblem::hash`] of the sampled problem.
    pub problem_hash: String,
}

impl SampleSet {
    /// Values of one parameter across all samples.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let idx = self.names.iter().position(|n| n == name)?;
        Some(self.rows.iter().map(|row| row[idx]).collect())
    }

    /// Writes the samples as CSV: a header of parameter names, no index column.
    pub fn write_csv(&self, path: &Path) -> Result<(), HydroError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|err| HydroError::io("samples.create", parent, err))?;
            }
        }
        let mut writer = WriterBuilder::new()
            .from_path(path)
            .map_err(|err| HydroError::io("samples.open", path, err))?;
        writer
            .write_record(&self.names)
            .map_err(|err| wrap_csv("samples.write_header", err))?;
        for row in &self.rows {
            writer
                .write_record(row.iter().map(|value| value.to_string()))
                .map_err(|err| wrap_csv("samples.write_row", err))?;
        }
        writer
            .flush()
            .map_err(|err| HydroError::io("samples.flush", path, err))
    }
}

/// Draws `samples` Latin hypercube samples for `problem`.
///
/// Each variable's unit interval is cut into `samples` equal strata; one
/// uniform draw is taken inside every stratum and the strata are shuffled
/// independently per variable before scaling to `[min, max)`. Variable `i`
/// draws from substream `i` of `seed`.
pub fn latin_hypercube(
    problem: &SamplingProblem,
    samples: usize,
    seed: u64,
) -> Result<SampleSet, HydroError> {
    problem.validate()?;
    if samples == 0 {
        return Err(HydroError::Config(ErrorInfo::new(
            "samples.count",
            "at least one sample is required",
        )));
    }
    let problem_hash = problem.hash()?;
    let width = 1.0 / samples as f64;
    let mut rows = vec![Vec::with_capacity(problem.num_vars); samples];
    for (idx, [min, max]) in problem.bounds.iter().enumerate() {
        let mut rng = RngHandle::substream(seed, idx as u64);
        let mut strata: Vec<f64> = (0..samples)
            .map(|j| (j as f64 + rng.gen::<f64>()) * width)
            .collect();
        strata.shuffle(&mut rng);
        for (row, unit) in rows.iter_mut().zip(strata) {
            row.push(min + unit * (max - min));
        }
    }
    debug!(
        samples,
        num_vars = problem.num_vars,
        seed,
        %problem_hash,
        "drew latin hypercube samples"
    );
    Ok(SampleSet {
        names: problem.names.clone(),
        rows,
        seed,
        problem_hash,
    })
}

fn wrap_csv(code: &str, err: csv::Error) -> HydroError {
    HydroError::Io(ErrorInfo::new(code, "failed to write samples").with_hint(err.to_string()))
}
