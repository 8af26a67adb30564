use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{Datelike, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use hydro_core::errors::{ErrorInfo, HydroError};
use tracing::debug;

use crate::config::ClimateConfig;
use crate::dates::parse_datetime;
use crate::summary::YearlySums;

/// Timestamp-indexed table of numeric columns.
///
/// Values are stored column-major. Missing cells are `NaN` and are skipped by
/// every sum, so a column with no observations in a period sums to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ClimateTable {
    index_name: String,
    index: Vec<NaiveDateTime>,
    columns: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl ClimateTable {
    /// Builds a table from an index, column names and column-major values.
    pub fn new(
        index: Vec<NaiveDateTime>,
        columns: Vec<String>,
        values: Vec<Vec<f64>>,
    ) -> Result<Self, HydroError> {
        if columns.len() != values.len() {
            return Err(HydroError::Config(
                ErrorInfo::new("climate.shape", "column names and value columns differ in count")
                    .with_context("names", columns.len().to_string())
                    .with_context("columns", values.len().to_string()),
            ));
        }
        for (name, column) in columns.iter().zip(&values) {
            if column.len() != index.len() {
                return Err(HydroError::Config(
                    ErrorInfo::new("climate.shape", "column length does not match the index")
                        .with_context("column", name.clone())
                        .with_context("expected", index.len().to_string())
                        .with_context("actual", column.len().to_string()),
                ));
            }
        }
        Ok(Self {
            index_name: "date".to_string(),
            index,
            columns,
            values,
        })
    }

    /// Loads a delimited file whose first column is the date index.
    pub fn from_path(path: &Path, config: &ClimateConfig) -> Result<Self, HydroError> {
        let file = File::open(path).map_err(|err| HydroError::io("climate.open", path, err))?;
        let table = Self::from_reader(file, config).map_err(|err| match err {
            HydroError::Parse(info) => {
                HydroError::Parse(info.with_context("path", path.display().to_string()))
            }
            other => other,
        })?;
        debug!(
            path = %path.display(),
            rows = table.len(),
            columns = table.columns.len(),
            "loaded climate table"
        );
        Ok(table)
    }

    /// Loads delimited text from any reader.
    pub fn from_reader<R: Read>(reader: R, config: &ClimateConfig) -> Result<Self, HydroError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(config.delimiter_byte()?)
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);
        let headers = reader
            .headers()
            .map_err(|err| wrap_csv("climate.header", err))?
            .clone();
        if headers.is_empty() {
            return Err(HydroError::Parse(ErrorInfo::new(
                "climate.header",
                "climate data has no header row",
            )));
        }
        let index_name = headers.get(0).unwrap_or_default().to_string();
        let columns = disambiguate(headers.iter().skip(1));
        let mut index = Vec::new();
        let mut values = vec![Vec::new(); columns.len()];
        for (row, result) in reader.records().enumerate() {
            let record = result.map_err(|err| wrap_csv("climate.record", err))?;
            let (date, cells) = parse_record(&record, row, &columns, config)?;
            index.push(date);
            for (column, cell) in values.iter_mut().zip(cells) {
                column.push(cell);
            }
        }
        let mut table = Self::new(index, columns, values)?;
        table.index_name = index_name;
        Ok(table)
    }

    /// Header of the index column.
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Row timestamps in file order; date-only cells are midnight.
    pub fn index(&self) -> &[NaiveDateTime] {
        &self.index
    }

    /// Column names in file order, index column excluded.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Values of the named column.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.position(name).map(|pos| self.values[pos].as_slice())
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Earliest timestamp in the index.
    pub fn first_date(&self) -> Option<NaiveDateTime> {
        self.index.iter().min().copied()
    }

    /// Latest timestamp in the index.
    pub fn last_date(&self) -> Option<NaiveDateTime> {
        self.index.iter().max().copied()
    }

    /// Keeps the columns whose name satisfies `keep`, in original order.
    pub fn select_columns<F>(&self, keep: F) -> ClimateTable
    where
        F: Fn(&str) -> bool,
    {
        let (columns, values): (Vec<String>, Vec<Vec<f64>>) = self
            .columns
            .iter()
            .zip(&self.values)
            .filter(|(name, _)| keep(name.as_str()))
            .map(|(name, column)| (name.clone(), column.clone()))
            .unzip();
        ClimateTable {
            index_name: self.index_name.clone(),
            index: self.index.clone(),
            columns,
            values,
        }
    }

    /// Keeps the rows whose date satisfies `keep`, in original order.
    pub fn filter_rows<F>(&self, keep: F) -> ClimateTable
    where
        F: Fn(NaiveDateTime) -> bool,
    {
        let mask: Vec<bool> = self.index.iter().map(|date| keep(*date)).collect();
        let pick = |column: &Vec<f64>| -> Vec<f64> {
            column
                .iter()
                .zip(&mask)
                .filter(|(_, selected)| **selected)
                .map(|(value, _)| *value)
                .collect()
        };
        ClimateTable {
            index_name: self.index_name.clone(),
            index: self
                .index
                .iter()
                .zip(&mask)
                .filter(|(_, selected)| **selected)
                .map(|(date, _)| *date)
                .collect(),
            columns: self.columns.clone(),
            values: self.values.iter().map(pick).collect(),
        }
    }

    /// Rows stamped within `[start, end]`, both ends inclusive.
    pub fn between(&self, start: NaiveDateTime, end: NaiveDateTime) -> ClimateTable {
        self.filter_rows(|date| date >= start && date <= end)
    }

    /// Rows dated within the given calendar year.
    pub fn year(&self, year: i32) -> ClimateTable {
        self.filter_rows(|date| date.year() == year)
    }

    /// Per-column totals, skipping missing values.
    pub fn column_sums(&self) -> ColumnSums {
        ColumnSums {
            entries: self
                .columns
                .iter()
                .zip(&self.values)
                .map(|(name, column)| (name.clone(), nan_sum(column)))
                .collect(),
        }
    }

    /// Per-column totals for every calendar year present, years ascending.
    pub fn yearly_sums(&self) -> YearlySums {
        let mut grouped: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
        for (row, date) in self.index.iter().enumerate() {
            let totals = grouped
                .entry(date.year())
                .or_insert_with(|| vec![0.0; self.columns.len()]);
            for (total, column) in totals.iter_mut().zip(&self.values) {
                let value = column[row];
                if !value.is_nan() {
                    *total += value;
                }
            }
        }
        let (years, rows) = grouped.into_iter().unzip();
        YearlySums::new(years, self.columns.clone(), rows)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }
}

/// Ordered `(column, total)` pairs produced by [`ClimateTable::column_sums`].
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSums {
    entries: Vec<(String, f64)>,
}

impl ColumnSums {
    /// Total for the named column.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, total)| *total)
    }

    /// The first column's total, in original column order.
    pub fn first(&self) -> Option<(&str, f64)> {
        self.entries
            .first()
            .map(|(column, total)| (column.as_str(), *total))
    }

    /// Iterates the totals in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries
            .iter()
            .map(|(column, total)| (column.as_str(), *total))
    }

    /// Number of summed columns.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no column was summed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn nan_sum(values: &[f64]) -> f64 {
    values.iter().filter(|value| !value.is_nan()).sum()
}

fn parse_record(
    record: &StringRecord,
    row: usize,
    columns: &[String],
    config: &ClimateConfig,
) -> Result<(NaiveDateTime, Vec<f64>), HydroError> {
    let line = (row + 2).to_string();
    let raw_date = record.get(0).unwrap_or_default();
    let date = parse_datetime(raw_date, config.date_format.as_deref()).map_err(|err| match err {
        HydroError::Parse(info) => HydroError::Parse(info.with_context("line", line.clone())),
        other => other,
    })?;
    let mut cells = Vec::with_capacity(columns.len());
    for (name, raw) in columns.iter().zip(record.iter().skip(1)) {
        cells.push(parse_cell(raw).ok_or_else(|| {
            HydroError::Parse(
                ErrorInfo::new("climate.value", format!("non-numeric value '{raw}'"))
                    .with_context("line", line.clone())
                    .with_context("column", name.clone()),
            )
        })?);
    }
    Ok((date, cells))
}

fn parse_cell(raw: &str) -> Option<f64> {
    if raw.is_empty() || raw.eq_ignore_ascii_case("nan") || raw.eq_ignore_ascii_case("na") {
        return Some(f64::NAN);
    }
    raw.parse::<f64>().ok()
}

fn disambiguate<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut columns = Vec::new();
    for name in names {
        let mut candidate = name.to_string();
        let mut suffix = 1;
        while seen.contains(&candidate) {
            candidate = format!("{name}.{suffix}");
            suffix += 1;
        }
        seen.insert(candidate.clone());
        columns.push(candidate);
    }
    columns
}

fn wrap_csv(code: &str, err: csv::Error) -> HydroError {
    HydroError::Parse(ErrorInfo::new(code, "malformed climate data").with_hint(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_markers_become_nan() {
        assert!(parse_cell("").unwrap().is_nan());
        assert!(parse_cell("NaN").unwrap().is_nan());
        assert!(parse_cell("NA").unwrap().is_nan());
        assert_eq!(parse_cell("2.5"), Some(2.5));
        assert_eq!(parse_cell("abc"), None);
    }

    #[test]
    fn duplicate_headers_get_suffixes() {
        let names = disambiguate(["rainfall", "ET", "rainfall", "rainfall"].into_iter());
        assert_eq!(names, vec!["rainfall", "ET", "rainfall.1", "rainfall.2"]);
    }

    #[test]
    fn nan_sum_skips_missing() {
        assert_eq!(nan_sum(&[1.0, f64::NAN, 2.0]), 3.0);
        assert_eq!(nan_sum(&[f64::NAN]), 0.0);
    }
}
