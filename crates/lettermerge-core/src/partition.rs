//! Date-partition naming (`YYYYMMDD`)

use chrono::{Local, NaiveDate};

use crate::error::{LetterError, Result};

/// `chrono` format of a date-partition directory name
pub const PARTITION_FORMAT: &str = "%Y%m%d";

/// `chrono` format of the date line in the report
pub const REPORT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Directory name for a date-partition
pub fn partition_name(date: NaiveDate) -> String {
    date.format(PARTITION_FORMAT).to_string()
}

/// Parse a `YYYYMMDD` partition name into a date
pub fn parse_partition(name: &str) -> Result<NaiveDate> {
    if name.len() != 8 || !name.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LetterError::invalid_value("date partition", name));
    }
    NaiveDate::parse_from_str(name, PARTITION_FORMAT)
        .map_err(|_| LetterError::invalid_value("date partition", name))
}

/// The local calendar date, used as the default run date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
