#![deny(missing_docs)]
#![doc = "Climate time-series access: CSV loading, cached annual statistics and seasonal totals."]

/// The [`Climate`] facade over a loaded table.
pub mod climate;
/// Recognised optional settings for loading and querying climate data.
pub mod config;
/// Date coercion and range validation.
pub mod dates;
/// Date-indexed numeric table and its loader.
pub mod table;
/// Yearly sums and descriptive statistics.
pub mod summary;

pub use climate::{Climate, Phenomenon};
pub use config::ClimateConfig;
pub use dates::{ensure_datetime, parse_date, parse_datetime, DateInput, SeasonRange, YearInput};
pub use summary::{AnnualSummary, Statistic, SummaryRow, YearlySums};
pub use table::{ClimateTable, ColumnSums};
