#![allow(dead_code)]

use std::io::Write;

use chrono::{NaiveDate, NaiveDateTime};
use hydro_climate::{Climate, ClimateConfig};
use tempfile::NamedTempFile;

pub fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp csv");
    file.write_all(contents.as_bytes()).expect("write csv");
    file.flush().expect("flush csv");
    file
}

pub fn load(contents: &str) -> Climate {
    let file = write_csv(contents);
    Climate::load(file.path()).expect("load climate")
}

pub fn load_with(contents: &str, config: ClimateConfig) -> Climate {
    let file = write_csv(contents);
    Climate::load_with_config(file.path(), config).expect("load climate")
}

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Midnight of the given day, the index value of a date-only cell.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDateTime {
    at(year, month, day, 0)
}

pub fn at(year: i32, month: u32, day_of_month: u32, hour: u32) -> NaiveDateTime {
    day(year, month, day_of_month)
        .and_hms_opt(hour, 0, 0)
        .expect("valid time")
}
