mod common;

use common::{load, write_csv};
use hydro_climate::{AnnualSummary, Climate, Statistic};
use hydro_core::HydroError;

const DECADE: &str = "\
date,rainfall,ET
2015-03-01,300,100
2015-09-01,100,50
2016-03-01,250,110
2017-03-01,600,90
2017-10-01,,10
2018-05-01,500,120
2019-05-01,450,130
";

#[test]
fn yearly_sums_are_grouped_by_calendar_year() {
    let climate = load(DECADE);
    let yearly = climate.description().yearly();
    assert_eq!(yearly.years(), &[2015, 2016, 2017, 2018, 2019]);
    assert_eq!(yearly.get(2015, "rainfall"), Some(400.0));
    assert_eq!(yearly.get(2017, "rainfall"), Some(600.0));
    assert_eq!(yearly.get(2017, "ET"), Some(100.0));
    assert_eq!(yearly.column("rainfall"), Some(vec![400.0, 250.0, 600.0, 500.0, 450.0]));
}

#[test]
fn describe_rows_follow_report_order_with_ninetieth_last() {
    let climate = load(DECADE);
    let labels: Vec<&str> = climate
        .description()
        .rows()
        .iter()
        .map(|row| row.statistic.label())
        .collect();
    assert_eq!(
        labels,
        vec!["count", "mean", "std", "min", "25%", "50%", "75%", "max", "90%"]
    );
}

#[test]
fn rainfall_statistics_match_hand_computation() {
    let climate = load(DECADE);
    // yearly rainfall sorted: 250, 400, 450, 500, 600
    assert_eq!(climate.get_climate_stat(Statistic::Count, "rainfall").unwrap(), 5.0);
    assert_eq!(climate.mean_rainfall().unwrap(), 440.0);
    assert_eq!(climate.min_rainfall().unwrap(), 250.0);
    assert_eq!(climate.max_rainfall().unwrap(), 600.0);
    assert_eq!(climate.median_rainfall().unwrap(), 450.0);
    assert_eq!(climate.get_climate_stat(Statistic::Q25, "rainfall").unwrap(), 400.0);
    assert_eq!(climate.get_climate_stat(Statistic::Q75, "rainfall").unwrap(), 500.0);
    assert!((climate.high_rainfall().unwrap() - 560.0).abs() < 1e-9);
    let std = climate.get_climate_stat(Statistic::Std, "rainfall").unwrap();
    assert!((std - 129.421_791_055_2).abs() < 1e-6);
}

#[test]
fn unknown_phenomenon_is_a_missing_column() {
    let climate = load(DECADE);
    let err = climate
        .get_climate_stat(Statistic::Mean, "snowfall")
        .expect_err("no snowfall");
    assert!(matches!(err, HydroError::MissingColumn(_)));
}

#[test]
fn summary_construction_is_deterministic() {
    let file = write_csv(DECADE);
    let first = Climate::load(file.path()).expect("first");
    let second = Climate::load(file.path()).expect("second");
    assert_eq!(first.description(), second.description());
    assert_eq!(
        AnnualSummary::from_table(first.table()),
        AnnualSummary::from_table(second.table())
    );
    let json_a = hydro_core::to_canonical_json_bytes(first.description()).expect("json");
    let json_b = hydro_core::to_canonical_json_bytes(second.description()).expect("json");
    assert_eq!(json_a, json_b);
}

#[test]
fn summary_serializes_statistic_labels() {
    let climate = load(DECADE);
    let value = serde_json::to_value(climate.description()).expect("json");
    assert_eq!(value["rows"][8]["statistic"], "90%");
    assert_eq!(value["columns"][0], "rainfall");
}
