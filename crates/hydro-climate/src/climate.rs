use std::fmt;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDateTime;
use hydro_core::errors::{ErrorInfo, HydroError};
use tracing::debug;

use crate::config::ClimateConfig;
use crate::dates::{self, DateInput, SeasonRange, YearInput};
use crate::summary::{missing_column, AnnualSummary, Statistic};
use crate::table::ClimateTable;

/// Column used by annual totals and the rainfall summary accessors.
const RAINFALL_COLUMN: &str = "rainfall";

/// Climate variable category, identified by a substring of the column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phenomenon {
    /// Columns containing `rainfall`.
    Rainfall,
    /// Columns containing `ET` (evapotranspiration).
    Evapotranspiration,
}

impl Phenomenon {
    /// Case-sensitive substring a column name must contain.
    pub fn column_tag(self) -> &'static str {
        match self {
            Phenomenon::Rainfall => "rainfall",
            Phenomenon::Evapotranspiration => "ET",
        }
    }
}

impl fmt::Display for Phenomenon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_tag())
    }
}

impl FromStr for Phenomenon {
    type Err = HydroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rainfall" | "rain" => Ok(Phenomenon::Rainfall),
            "et" | "evapotranspiration" => Ok(Phenomenon::Evapotranspiration),
            other => Err(HydroError::Parse(
                ErrorInfo::new("climate.phenomenon", format!("unknown phenomenon '{other}'"))
                    .with_hint("expected rainfall or et"),
            )),
        }
    }
}

/// Read-only access to a climate time series.
///
/// The table is loaded once and never mutated; the annual summary is computed
/// at construction and cached. Queries beyond the methods below go through
/// [`Climate::table`].
#[derive(Debug, Clone)]
pub struct Climate {
    table: ClimateTable,
    config: ClimateConfig,
    description: AnnualSummary,
}

impl Climate {
    /// Loads a CSV file with default settings.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, HydroError> {
        Self::load_with_config(path, ClimateConfig::default())
    }

    /// Loads a delimited file using `config`.
    pub fn load_with_config(
        path: impl AsRef<Path>,
        config: ClimateConfig,
    ) -> Result<Self, HydroError> {
        let table = ClimateTable::from_path(path.as_ref(), &config)?;
        Ok(Self::from_table(table, config))
    }

    /// Wraps an already built table and computes its annual summary.
    pub fn from_table(table: ClimateTable, config: ClimateConfig) -> Self {
        let description = AnnualSummary::from_table(&table);
        debug!(
            label = config.label.as_deref().unwrap_or("unnamed"),
            years = description.yearly().years().len(),
            "computed annual climate summary"
        );
        Self {
            table,
            config,
            description,
        }
    }

    /// The underlying table, for queries this type does not wrap.
    pub fn table(&self) -> &ClimateTable {
        &self.table
    }

    /// Settings the data was loaded with.
    pub fn config(&self) -> &ClimateConfig {
        &self.config
    }

    /// Cached yearly totals and descriptive statistics.
    pub fn description(&self) -> &AnnualSummary {
        &self.description
    }

    /// Column names, index excluded.
    pub fn columns(&self) -> &[String] {
        self.table.columns()
    }

    /// Values of one column.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.table.column(name)
    }

    /// Row timestamps.
    pub fn index(&self) -> &[NaiveDateTime] {
        self.table.index()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Earliest date.
    pub fn first_date(&self) -> Option<NaiveDateTime> {
        self.table.first_date()
    }

    /// Latest date.
    pub fn last_date(&self) -> Option<NaiveDateTime> {
        self.table.last_date()
    }

    /// Rows of one calendar year.
    pub fn year(&self, year: i32) -> ClimateTable {
        self.table.year(year)
    }

    /// Columns whose name satisfies `keep`.
    pub fn filter_columns<F>(&self, keep: F) -> ClimateTable
    where
        F: Fn(&str) -> bool,
    {
        self.table.select_columns(keep)
    }

    /// Total of the `rainfall` column over the year designated by `timestep`.
    pub fn annual_rainfall(&self, timestep: impl Into<YearInput>) -> Result<f64, HydroError> {
        let year = timestep.into().year();
        self.table
            .year(year)
            .column_sums()
            .get(RAINFALL_COLUMN)
            .ok_or_else(|| missing_column(RAINFALL_COLUMN))
    }

    /// Rows stamped within `[start, end]`, inclusive. Bounds are not validated.
    pub fn get_season_range(&self, start: NaiveDateTime, end: NaiveDateTime) -> ClimateTable {
        self.table.between(start, end)
    }

    /// Coerces both bounds to timestamps and rejects ranges that do not move forward.
    pub fn ensure_datetime(
        &self,
        start: impl Into<DateInput>,
        end: impl Into<DateInput>,
    ) -> Result<(NaiveDateTime, NaiveDateTime), HydroError> {
        dates::ensure_datetime(start, end)
    }

    /// Seasonal rainfall total of the first rainfall column containing `partial_name`.
    pub fn get_seasonal_rainfall(
        &self,
        season_range: impl Into<SeasonRange>,
        partial_name: &str,
    ) -> Result<f64, HydroError> {
        self.get_seasonal_total(Phenomenon::Rainfall, season_range, partial_name)
    }

    /// Seasonal evapotranspiration total of the first ET column containing `partial_name`.
    pub fn get_seasonal_et(
        &self,
        season_range: impl Into<SeasonRange>,
        partial_name: &str,
    ) -> Result<f64, HydroError> {
        self.get_seasonal_total(Phenomenon::Evapotranspiration, season_range, partial_name)
    }

    /// Sums the first column (in file order) whose name contains both the
    /// phenomenon tag and `partial_name` over the season.
    ///
    /// Only that first match is returned. When several columns match, the rest
    /// are silently ignored; pass a `partial_name` that identifies a single
    /// station.
    pub fn get_seasonal_total(
        &self,
        phenomenon: Phenomenon,
        season_range: impl Into<SeasonRange>,
        partial_name: &str,
    ) -> Result<f64, HydroError> {
        let (start, end) = season_range.into().resolve()?;
        let tag = phenomenon.column_tag();
        let selected = self
            .table
            .select_columns(|name| name.contains(tag) && name.contains(partial_name));
        if selected.columns().len() > 1 {
            debug!(
                phenomenon = tag,
                partial_name,
                matches = ?selected.columns(),
                "several columns match; using the first"
            );
        }
        let sums = selected.between(start, end).column_sums();
        sums.first().map(|(_, total)| total).ok_or_else(|| {
            HydroError::EmptyMatch(
                ErrorInfo::new(
                    "climate.empty_match",
                    format!("no {tag} column contains '{partial_name}'"),
                )
                .with_context("phenomenon", tag)
                .with_context("partial_name", partial_name),
            )
        })
    }

    /// Seasonal total over the configured default season.
    pub fn get_default_seasonal_total(
        &self,
        phenomenon: Phenomenon,
        partial_name: &str,
    ) -> Result<f64, HydroError> {
        let season = self.config.default_season.clone().ok_or_else(|| {
            HydroError::Config(ErrorInfo::new(
                "climate.no_default_season",
                "no default_season configured",
            ))
        })?;
        self.get_seasonal_total(phenomenon, season, partial_name)
    }

    /// One cell of the annual summary, e.g. `std` of `rainfall`.
    pub fn get_climate_stat(&self, statistic: Statistic, phenomenon: &str) -> Result<f64, HydroError> {
        self.description.get(statistic, phenomenon)
    }

    /// Lowest yearly rainfall total.
    pub fn min_rainfall(&self) -> Result<f64, HydroError> {
        self.get_climate_stat(Statistic::Min, RAINFALL_COLUMN)
    }

    /// Highest yearly rainfall total.
    pub fn max_rainfall(&self) -> Result<f64, HydroError> {
        self.get_climate_stat(Statistic::Max, RAINFALL_COLUMN)
    }

    /// Median yearly rainfall total.
    pub fn median_rainfall(&self) -> Result<f64, HydroError> {
        self.get_climate_stat(Statistic::Median, RAINFALL_COLUMN)
    }

    /// Mean yearly rainfall total.
    pub fn mean_rainfall(&self) -> Result<f64, HydroError> {
        self.get_climate_stat(Statistic::Mean, RAINFALL_COLUMN)
    }

    /// 90th percentile of yearly rainfall totals.
    pub fn high_rainfall(&self) -> Result<f64, HydroError> {
        self.get_climate_stat(Statistic::P90, RAINFALL_COLUMN)
    }
}
