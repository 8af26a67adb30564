use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use hydro_core::errors::{ErrorInfo, HydroError};
use serde::{Deserialize, Serialize};

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// A timestamp supplied either as text or as an already parsed value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateInput {
    /// A calendar date, standing for its midnight.
    Date(NaiveDate),
    /// A date with a time of day.
    DateTime(NaiveDateTime),
    /// Text coerced with [`parse_datetime`] when resolved.
    Text(String),
}

impl DateInput {
    /// Coerces the input to a timestamp; bare dates resolve to midnight.
    pub fn resolve(&self) -> Result<NaiveDateTime, HydroError> {
        match self {
            DateInput::Date(date) => Ok(midnight(*date)),
            DateInput::DateTime(datetime) => Ok(*datetime),
            DateInput::Text(text) => parse_datetime(text, None),
        }
    }
}

impl From<NaiveDate> for DateInput {
    fn from(value: NaiveDate) -> Self {
        DateInput::Date(value)
    }
}

impl From<NaiveDateTime> for DateInput {
    fn from(value: NaiveDateTime) -> Self {
        DateInput::DateTime(value)
    }
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        DateInput::Text(value.to_string())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        DateInput::Text(value)
    }
}

/// A calendar year, given directly or taken from a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearInput {
    /// An explicit year.
    Year(i32),
    /// A date whose year is used.
    Date(NaiveDate),
}

impl YearInput {
    /// The calendar year this input designates.
    pub fn year(&self) -> i32 {
        match self {
            YearInput::Year(year) => *year,
            YearInput::Date(date) => date.year(),
        }
    }
}

impl From<i32> for YearInput {
    fn from(value: i32) -> Self {
        YearInput::Year(value)
    }
}

impl From<NaiveDate> for YearInput {
    fn from(value: NaiveDate) -> Self {
        YearInput::Date(value)
    }
}

impl From<NaiveDateTime> for YearInput {
    fn from(value: NaiveDateTime) -> Self {
        YearInput::Date(value.date())
    }
}

/// Two-element season bounds, inclusive at both ends once resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonRange {
    /// First day of the season.
    pub start: DateInput,
    /// Last day of the season.
    pub end: DateInput,
}

impl SeasonRange {
    /// Builds a range from anything convertible into [`DateInput`].
    pub fn new(start: impl Into<DateInput>, end: impl Into<DateInput>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Resolves and validates the bounds with [`ensure_datetime`].
    pub fn resolve(&self) -> Result<(NaiveDateTime, NaiveDateTime), HydroError> {
        ensure_datetime(self.start.clone(), self.end.clone())
    }
}

impl<S, E> From<(S, E)> for SeasonRange
where
    S: Into<DateInput>,
    E: Into<DateInput>,
{
    fn from((start, end): (S, E)) -> Self {
        Self::new(start, end)
    }
}

impl From<[&str; 2]> for SeasonRange {
    fn from([start, end]: [&str; 2]) -> Self {
        Self::new(start, end)
    }
}

impl From<[NaiveDate; 2]> for SeasonRange {
    fn from([start, end]: [NaiveDate; 2]) -> Self {
        Self::new(start, end)
    }
}

impl From<[NaiveDateTime; 2]> for SeasonRange {
    fn from([start, end]: [NaiveDateTime; 2]) -> Self {
        Self::new(start, end)
    }
}

/// Parses a timestamp from text. Date-only values resolve to midnight.
///
/// With an explicit `format` only that `chrono` format is tried, first as a
/// date-time and then as a date. Without one, ISO dates, ISO date-times and
/// `DD/MM/YYYY` are tried in turn.
pub fn parse_datetime(text: &str, format: Option<&str>) -> Result<NaiveDateTime, HydroError> {
    let trimmed = text.trim();
    if let Some(format) = format {
        return NaiveDateTime::parse_from_str(trimmed, format)
            .or_else(|_| NaiveDate::parse_from_str(trimmed, format).map(midnight))
            .map_err(|err| {
                HydroError::Parse(
                    ErrorInfo::new(
                        "climate.date_parse",
                        format!("cannot parse '{trimmed}': {err}"),
                    )
                    .with_context("value", trimmed)
                    .with_context("format", format),
                )
            });
    }
    for candidate in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, candidate) {
            return Ok(midnight(date));
        }
    }
    for candidate in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, candidate) {
            return Ok(datetime);
        }
    }
    Err(HydroError::Parse(
        ErrorInfo::new("climate.date_parse", format!("unrecognised date '{trimmed}'"))
            .with_context("value", trimmed)
            .with_hint("use YYYY-MM-DD or set `date_format` in the climate config"),
    ))
}

/// Calendar date of [`parse_datetime`], time of day dropped.
pub fn parse_date(text: &str, format: Option<&str>) -> Result<NaiveDate, HydroError> {
    parse_datetime(text, format).map(|datetime| datetime.date())
}

fn midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Coerces both bounds to timestamps and requires `end` to fall strictly after `start`.
///
/// Equal timestamps are rejected; two times on the same day are not.
pub fn ensure_datetime(
    start: impl Into<DateInput>,
    end: impl Into<DateInput>,
) -> Result<(NaiveDateTime, NaiveDateTime), HydroError> {
    let start = start.into().resolve()?;
    let end = end.into().resolve()?;
    if end <= start {
        return Err(HydroError::InvalidRange(
            ErrorInfo::new(
                "climate.invalid_range",
                format!(
                    "Season end date cannot be earlier than start date ({start} < {end} ?)"
                ),
            )
            .with_context("start", start.to_string())
            .with_context("end", end.to_string()),
        ));
    }
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 3, 4)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn parses_iso_and_datetime_forms() {
        assert_eq!(parse_datetime("2020-03-04", None).unwrap(), at(0, 0));
        assert_eq!(parse_datetime(" 2020-03-04 ", None).unwrap(), at(0, 0));
        assert_eq!(parse_datetime("2020-03-04 10:30:00", None).unwrap(), at(10, 30));
        assert_eq!(parse_datetime("2020-03-04T10:30:00", None).unwrap(), at(10, 30));
        assert_eq!(parse_datetime("2020-03-04 18:15", None).unwrap(), at(18, 15));
        assert_eq!(parse_datetime("04/03/2020", None).unwrap(), at(0, 0));
        assert_eq!(parse_date("2020-03-04 10:30:00", None).unwrap(), at(0, 0).date());
    }

    #[test]
    fn explicit_format_is_exclusive() {
        assert_eq!(parse_datetime("03-04-2020", Some("%m-%d-%Y")).unwrap(), at(0, 0));
        assert_eq!(
            parse_datetime("03-04-2020 10:30", Some("%m-%d-%Y %H:%M")).unwrap(),
            at(10, 30)
        );
        let err = parse_datetime("2020-03-04", Some("%m-%d-%Y")).unwrap_err();
        assert_eq!(err.info().context.get("format").map(String::as_str), Some("%m-%d-%Y"));
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_date("yesterday", None).unwrap_err();
        assert!(matches!(err, HydroError::Parse(_)));
    }

    #[test]
    fn same_day_ranges_with_distinct_times_are_valid() {
        let (start, end) = ensure_datetime("2020-03-04 00:00:00", "2020-03-04 12:00:00").unwrap();
        assert_eq!((start, end), (at(0, 0), at(12, 0)));
        let err = ensure_datetime("2020-03-04 12:00:00", "2020-03-04 12:00:00").unwrap_err();
        assert!(matches!(err, HydroError::InvalidRange(_)));
    }

    #[test]
    fn bare_dates_resolve_to_midnight() {
        let date = NaiveDate::from_ymd_opt(2020, 3, 4).unwrap();
        assert_eq!(DateInput::from(date).resolve().unwrap(), at(0, 0));
        assert_eq!(DateInput::from(at(6, 0)).resolve().unwrap(), at(6, 0));
    }

    #[test]
    fn year_input_extracts_year() {
        let date = NaiveDate::from_ymd_opt(1999, 12, 31).unwrap();
        assert_eq!(YearInput::from(date).year(), 1999);
        assert_eq!(YearInput::from(2004).year(), 2004);
        assert_eq!(YearInput::from(at(23, 0)).year(), 2020);
    }
}
