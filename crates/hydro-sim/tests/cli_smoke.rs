use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::tempdir;

const CLIMATE: &str = "\
date,rainfall,StationA_rainfall,StationA_ET
2019-06-01,80,8,1
2020-01-01,5,10,1.5
2020-06-01,3,32,2.5
2021-01-01,100,4,4
";

fn hydro_sim(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hydro-sim"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("run hydro-sim")
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("json stdout")
}

fn write(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path.display().to_string()
}

#[test]
fn annual_prints_the_year_total() {
    let dir = tempdir().expect("dir");
    let data = write(dir.path(), "climate.csv", CLIMATE);
    let json = stdout_json(&hydro_sim(&["annual", "--data", &data, "--year", "2020"]));
    assert_eq!(json["year"], 2020);
    assert_eq!(json["rainfall"], 8.0);

    let by_date = stdout_json(&hydro_sim(&["annual", "--data", &data, "--year", "2021-03-01"]));
    assert_eq!(by_date["rainfall"], 100.0);
}

#[test]
fn seasonal_uses_flags_or_the_configured_season() {
    let dir = tempdir().expect("dir");
    let data = write(dir.path(), "climate.csv", CLIMATE);
    let json = stdout_json(&hydro_sim(&[
        "seasonal", "--data", &data, "--start", "2020-01-01", "--end", "2020-12-31",
        "--station", "StationA",
    ]));
    assert_eq!(json["total"], 42.0);

    let config = write(
        dir.path(),
        "climate.yaml",
        "default_season:\n  start: 2020-01-01\n  end: 2020-06-01\n",
    );
    let json = stdout_json(&hydro_sim(&[
        "seasonal", "--data", &data, "--config", &config, "--phenomenon", "et",
        "--station", "StationA",
    ]));
    assert_eq!(json["total"], 4.0);
    assert_eq!(json["phenomenon"], "ET");
}

#[test]
fn seasonal_rejects_same_day_ranges() {
    let dir = tempdir().expect("dir");
    let data = write(dir.path(), "climate.csv", CLIMATE);
    let output = hydro_sim(&[
        "seasonal", "--data", &data, "--start", "2020-01-01", "--end", "2020-01-01",
        "--station", "StationA",
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("climate.invalid_range"));
}

#[test]
fn summary_reports_all_statistics() {
    let dir = tempdir().expect("dir");
    let data = write(dir.path(), "climate.csv", CLIMATE);
    let json = stdout_json(&hydro_sim(&["summary", "--data", &data]));
    let rows = json["summary"]["rows"].as_array().expect("rows");
    assert_eq!(rows.len(), 9);
    assert_eq!(rows[8]["statistic"], "90%");
}

#[test]
fn sample_writes_csv_and_report() {
    let dir = tempdir().expect("dir");
    let params = write(
        dir.path(),
        "test_params.csv",
        "name,min_val,max_val\nsoil_depth,0.5,2.0\ncrop_coeff,0.2,1.3\n",
    );
    let out = dir.path().join("sampled_params.csv");
    let out_arg = out.display().to_string();
    let output = hydro_sim(&[
        "sample", "--params", &params, "--samples", "4", "--seed", "11", "--out", &out_arg,
        "--report",
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let hash = String::from_utf8(output.stdout).expect("utf8");
    assert_eq!(hash.trim().len(), 64);

    let csv = fs::read_to_string(&out).expect("samples");
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("soil_depth,crop_coeff"));
    assert_eq!(lines.count(), 4);

    let report: Value =
        serde_json::from_slice(&fs::read(out.with_extension("json")).expect("report"))
            .expect("report json");
    assert_eq!(report["problem_hash"], hash.trim());
    assert_eq!(report["problem"]["num_vars"], 2);
}
