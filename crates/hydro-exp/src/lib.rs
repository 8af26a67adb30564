//! Sensitivity-analysis sampling for catchment model parameters.

#![deny(missing_docs)]

mod hash;
mod latin;
mod params;
mod plan;
mod problem;

pub use hash::stable_hash_string;
pub use latin::{latin_hypercube, SampleSet};
pub use params::{Parameter, ParameterTable};
pub use plan::SamplingPlan;
pub use problem::SamplingProblem;
