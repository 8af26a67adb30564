use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use hydro_exp::{latin_hypercube, ParameterTable, SamplingPlan, SamplingProblem};
use serde_json::json;
use tracing::info;

use super::display_path;

#[derive(Args, Debug)]
pub struct SampleArgs {
    /// Parameter table with `name`, `min_val` and `max_val` columns.
    #[arg(long)]
    pub params: PathBuf,
    /// YAML plan with `samples` and `seed`; flags override it.
    #[arg(long)]
    pub plan: Option<PathBuf>,
    /// Number of samples to draw.
    #[arg(long)]
    pub samples: Option<usize>,
    /// Master seed.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Destination CSV for the sampled parameters.
    #[arg(long, default_value = "sampled_params.csv")]
    pub out: PathBuf,
    /// Also write the problem definition and hash next to the samples.
    #[arg(long)]
    pub report: bool,
}

pub fn run(args: &SampleArgs) -> Result<(), Box<dyn Error>> {
    let mut plan = match args.plan.as_deref() {
        Some(path) => SamplingPlan::from_path(path)?,
        None => SamplingPlan::default(),
    };
    if let Some(samples) = args.samples {
        plan.samples = samples;
    }
    if let Some(seed) = args.seed {
        plan.seed = seed;
    }

    let table = ParameterTable::from_csv_path(&args.params)?;
    let problem = SamplingProblem::from_table(&table)?;
    let set = latin_hypercube(&problem, plan.samples, plan.seed)?;
    set.write_csv(&args.out)?;
    info!(
        out = %display_path(&args.out),
        samples = plan.samples,
        num_vars = problem.num_vars,
        "wrote sampled parameters"
    );

    if args.report {
        let report = json!({
            "problem": problem,
            "problem_hash": set.problem_hash,
            "samples": plan.samples,
            "seed": plan.seed,
        });
        let bytes = hydro_core::to_canonical_json_bytes(&report)?;
        fs::write(args.out.with_extension("json"), bytes)?;
    }
    println!("{}", set.problem_hash);
    Ok(())
}
