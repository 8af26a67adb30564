use std::fmt;
use std::str::FromStr;

use hydro_core::errors::{ErrorInfo, HydroError};
use serde::{Deserialize, Serialize};

use crate::table::ClimateTable;

/// Row labels of the annual summary, in the order they are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Statistic {
    /// Number of years.
    #[serde(rename = "count")]
    Count,
    /// Mean yearly total.
    #[serde(rename = "mean")]
    Mean,
    /// Sample standard deviation (one delta degree of freedom).
    #[serde(rename = "std")]
    Std,
    /// Driest year.
    #[serde(rename = "min")]
    Min,
    /// Lower quartile.
    #[serde(rename = "25%")]
    Q25,
    /// Median.
    #[serde(rename = "50%")]
    Median,
    /// Upper quartile.
    #[serde(rename = "75%")]
    Q75,
    /// Wettest year.
    #[serde(rename = "max")]
    Max,
    /// 90th percentile, appended after the standard rows.
    #[serde(rename = "90%")]
    P90,
}

impl Statistic {
    /// Every statistic in report order.
    pub const ALL: [Statistic; 9] = [
        Statistic::Count,
        Statistic::Mean,
        Statistic::Std,
        Statistic::Min,
        Statistic::Q25,
        Statistic::Median,
        Statistic::Q75,
        Statistic::Max,
        Statistic::P90,
    ];

    /// Label used in reports and accepted by [`FromStr`].
    pub fn label(self) -> &'static str {
        match self {
            Statistic::Count => "count",
            Statistic::Mean => "mean",
            Statistic::Std => "std",
            Statistic::Min => "min",
            Statistic::Q25 => "25%",
            Statistic::Median => "50%",
            Statistic::Q75 => "75%",
            Statistic::Max => "max",
            Statistic::P90 => "90%",
        }
    }

    fn compute(self, sorted: &[f64]) -> f64 {
        match self {
            Statistic::Count => sorted.len() as f64,
            Statistic::Mean => mean(sorted),
            Statistic::Std => sample_std(sorted),
            Statistic::Min => sorted.first().copied().unwrap_or(f64::NAN),
            Statistic::Q25 => percentile(sorted, 0.25),
            Statistic::Median => percentile(sorted, 0.5),
            Statistic::Q75 => percentile(sorted, 0.75),
            Statistic::Max => sorted.last().copied().unwrap_or(f64::NAN),
            Statistic::P90 => percentile(sorted, 0.9),
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Statistic {
    type Err = HydroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Statistic::ALL
            .into_iter()
            .find(|stat| stat.label() == wanted)
            .or(match wanted {
                "median" => Some(Statistic::Median),
                "90th" | "p90" => Some(Statistic::P90),
                _ => None,
            })
            .ok_or_else(|| {
                HydroError::Parse(
                    ErrorInfo::new("climate.statistic", format!("unknown statistic '{wanted}'"))
                        .with_hint("expected one of count, mean, std, min, 25%, 50%, 75%, max, 90%"),
                )
            })
    }
}

/// Per-column totals for each calendar year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlySums {
    years: Vec<i32>,
    columns: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl YearlySums {
    pub(crate) fn new(years: Vec<i32>, columns: Vec<String>, rows: Vec<Vec<f64>>) -> Self {
        Self {
            years,
            columns,
            rows,
        }
    }

    /// Years present in the source table, ascending.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Total of `column` in `year`.
    pub fn get(&self, year: i32, column: &str) -> Option<f64> {
        let row = self.years.iter().position(|y| *y == year)?;
        let col = self.columns.iter().position(|c| c == column)?;
        Some(self.rows[row][col])
    }

    /// Totals of one column across all years, in year order.
    pub fn column(&self, column: &str) -> Option<Vec<f64>> {
        let col = self.columns.iter().position(|c| c == column)?;
        Some(self.rows.iter().map(|row| row[col]).collect())
    }
}

/// One labelled row of the summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    /// Which statistic the row holds.
    pub statistic: Statistic,
    /// One value per column, aligned with [`AnnualSummary::columns`].
    pub values: Vec<f64>,
}

/// Yearly totals and their descriptive statistics, computed once per table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualSummary {
    columns: Vec<String>,
    yearly: YearlySums,
    rows: Vec<SummaryRow>,
}

impl AnnualSummary {
    /// Groups `table` by calendar year, sums each group and describes the totals.
    pub fn from_table(table: &ClimateTable) -> Self {
        let yearly = table.yearly_sums();
        let columns = yearly.columns().to_vec();
        let sorted: Vec<Vec<f64>> = columns
            .iter()
            .map(|column| {
                let mut values = yearly.column(column).unwrap_or_default();
                values.retain(|value| !value.is_nan());
                values.sort_by(f64::total_cmp);
                values
            })
            .collect();
        let rows = Statistic::ALL
            .into_iter()
            .map(|statistic| SummaryRow {
                statistic,
                values: sorted.iter().map(|values| statistic.compute(values)).collect(),
            })
            .collect();
        Self {
            columns,
            yearly,
            rows,
        }
    }

    /// Column names, aligned with every row's values.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The per-year totals the statistics were computed from.
    pub fn yearly(&self) -> &YearlySums {
        &self.yearly
    }

    /// All statistic rows in report order.
    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    /// The row for one statistic.
    pub fn row(&self, statistic: Statistic) -> Option<&SummaryRow> {
        self.rows.iter().find(|row| row.statistic == statistic)
    }

    /// A single cell, e.g. the standard deviation of `rainfall`.
    pub fn get(&self, statistic: Statistic, column: &str) -> Result<f64, HydroError> {
        let position = self
            .columns
            .iter()
            .position(|c| c == column)
            .ok_or_else(|| missing_column(column))?;
        self.row(statistic)
            .map(|row| row.values[position])
            .ok_or_else(|| missing_column(column))
    }
}

pub(crate) fn missing_column(column: &str) -> HydroError {
    HydroError::MissingColumn(
        ErrorInfo::new("climate.missing_column", format!("no column named '{column}'"))
            .with_context("column", column),
    )
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let mean = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

fn percentile(values: &[f64], quantile: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let position = quantile * (values.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        values[lower]
    } else {
        let weight = position - lower as f64;
        values[lower] * (1.0 - weight) + values[upper] * weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentile_interpolates_linearly() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&values, 0.0), 1.0);
        assert_eq!(percentile(&values, 1.0), 4.0);
        assert!((percentile(&values, 0.5) - 2.5).abs() < 1e-12);
        assert!((percentile(&values, 0.9) - 3.7).abs() < 1e-12);
    }

    #[test]
    fn std_uses_one_degree_of_freedom() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((sample_std(&values) - 2.138_089_935_299_395).abs() < 1e-12);
        assert!(sample_std(&[3.0]).is_nan());
    }

    #[test]
    fn statistic_labels_round_trip() {
        for stat in Statistic::ALL {
            assert_eq!(stat.label().parse::<Statistic>().unwrap(), stat);
        }
        assert_eq!("median".parse::<Statistic>().unwrap(), Statistic::Median);
        assert!("mode".parse::<Statistic>().is_err());
    }
}
