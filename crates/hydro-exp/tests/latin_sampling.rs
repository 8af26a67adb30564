use hydro_core::HydroError;
use hydro_exp::{latin_hypercube, SamplingProblem};
use proptest::prelude::*;

fn problem() -> SamplingProblem {
    SamplingProblem::new(
        vec!["soil_depth".into(), "crop_coeff".into(), "irrigation_eff".into()],
        vec![[0.5, 2.0], [0.2, 1.3], [0.6, 0.95]],
    )
    .expect("problem")
}

#[test]
fn samples_repeat_for_a_fixed_seed() {
    let a = latin_hypercube(&problem(), 5, 42).expect("samples");
    let b = latin_hypercube(&problem(), 5, 42).expect("samples");
    assert_eq!(a, b);
    assert_eq!(a.rows.len(), 5);
    assert!(a.rows.iter().all(|row| row.len() == 3));
    assert_eq!(a.names, problem().names);
}

#[test]
fn different_seeds_give_different_designs() {
    let a = latin_hypercube(&problem(), 8, 1).expect("samples");
    let b = latin_hypercube(&problem(), 8, 2).expect("samples");
    assert_ne!(a.rows, b.rows);
    assert_eq!(a.problem_hash, b.problem_hash);
}

#[test]
fn adding_a_parameter_keeps_earlier_columns() {
    let base = latin_hypercube(&problem(), 6, 9).expect("samples");
    let mut names = problem().names;
    names.push("runoff_coeff".into());
    let mut bounds = problem().bounds;
    bounds.push([0.0, 1.0]);
    let extended = SamplingProblem::new(names, bounds).expect("problem");
    let more = latin_hypercube(&extended, 6, 9).expect("samples");
    assert_eq!(base.column("soil_depth"), more.column("soil_depth"));
    assert_eq!(base.column("irrigation_eff"), more.column("irrigation_eff"));
}

#[test]
fn zero_samples_is_a_config_error() {
    let err = latin_hypercube(&problem(), 0, 1).expect_err("zero samples");
    assert!(matches!(err, HydroError::Config(_)));
}

#[test]
fn invalid_problems_are_rejected() {
    let reversed = SamplingProblem::new(vec!["a".into()], vec![[1.0, 0.0]]);
    assert!(matches!(reversed, Err(HydroError::Config(_))));
    let duplicate = SamplingProblem::new(vec!["a".into(), "a".into()], vec![[0.0, 1.0]; 2]);
    assert!(matches!(duplicate, Err(HydroError::Config(_))));
    let empty = SamplingProblem::new(Vec::new(), Vec::new());
    assert!(matches!(empty, Err(HydroError::Config(_))));
    let ragged = SamplingProblem::new(vec!["a".into()], Vec::new());
    assert!(matches!(ragged, Err(HydroError::Config(_))));
}

proptest! {
    #[test]
    fn every_stratum_is_hit_exactly_once(samples in 1usize..40, seed in any::<u64>()) {
        let problem = problem();
        let set = latin_hypercube(&problem, samples, seed).expect("samples");
        for (idx, [min, max]) in problem.bounds.iter().enumerate() {
            let mut hits = vec![0usize; samples];
            for row in &set.rows {
                let value = row[idx];
                prop_assert!(value >= *min && value < *max);
                let unit = (value - min) / (max - min);
                let stratum = ((unit * samples as f64).floor() as usize).min(samples - 1);
                hits[stratum] += 1;
            }
            prop_assert!(hits.iter().all(|count| *count == 1));
        }
    }
}
