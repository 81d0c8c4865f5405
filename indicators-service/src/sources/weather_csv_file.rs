use std::{fs::File, io::Read, path::PathBuf};

use csv::StringRecord;
use kpi_client::domain::{normalize_zone, WeatherRecord};
use time::{format_description::BorrowedFormatItem, macros::format_description, Date};

use crate::pipeline::PipelineError;
use crate::sources::{field, parse_optional_f64};

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
const SLASH_DATE: &[BorrowedFormatItem<'static>] = format_description!("[month]/[day]/[year]");

/// CSV source for weather observations.
///
/// Expected header columns (by name, case-insensitive):
/// - zipcode
/// - date (`2024-01-31` or `01/31/2024`; anything else coerces to a missing
///   date and aggregates under a null year/month)
/// - temperature (numeric, optional)
/// - relative_humidity (numeric, optional)
pub struct WeatherCsvFileSource {
    path: PathBuf,
    separator: char,
}

impl WeatherCsvFileSource {
    pub fn new<P: Into<PathBuf>>(path: P, separator: char) -> Self {
        Self {
            path: path.into(),
            separator,
        }
    }

    pub fn load(&self) -> Result<Vec<WeatherRecord>, PipelineError> {
        let file = File::open(&self.path).map_err(|e| {
            PipelineError::Source(format!("failed to open {}: {e}", self.path.display()))
        })?;
        read_weather(file, self.separator)
    }
}

fn read_weather<R: Read>(reader: R, separator: char) -> Result<Vec<WeatherRecord>, PipelineError> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(separator as u8)
        .from_reader(reader);
    let headers = rdr
        .headers()
        .map_err(|e| PipelineError::Source(format!("failed to read CSV headers: {e}")))?
        .clone();

    let mut out = Vec::new();
    for result in rdr.records() {
        let record = result
            .map_err(|e| PipelineError::Source(format!("failed to read CSV record: {e}")))?;
        out.push(record_to_weather(&record, &headers)?);
    }
    Ok(out)
}

fn record_to_weather(
    record: &StringRecord,
    headers: &StringRecord,
) -> Result<WeatherRecord, PipelineError> {
    Ok(WeatherRecord {
        zipcode: normalize_zone(field(record, headers, "zipcode")?),
        date: parse_observation_date(field(record, headers, "date")?),
        temperature: parse_optional_f64(field(record, headers, "temperature")?),
        relative_humidity: parse_optional_f64(field(record, headers, "relative_humidity")?),
    })
}

fn parse_observation_date(s: &str) -> Option<Date> {
    let s = s.trim();
    Date::parse(s, ISO_DATE)
        .or_else(|_| Date::parse(s, SLASH_DATE))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn reads_semicolon_separated_records() {
        let data = "\
zipcode;date;temperature;relative_humidity
10001;2024-01-15;12.5;60
 10001 ;01/20/2024;-3.25;81.5
";
        let rows = read_weather(data.as_bytes(), ';').unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, Some(date!(2024 - 01 - 15)));
        assert_eq!(rows[0].temperature, Some(12.5));
        assert_eq!(rows[1].zipcode, "10001");
        assert_eq!(rows[1].date, Some(date!(2024 - 01 - 20)));
        assert_eq!(rows[1].relative_humidity, Some(81.5));
    }

    #[test]
    fn unparseable_dates_and_measures_coerce_to_none() {
        let data = "\
zipcode,date,temperature,relative_humidity
10001,not-a-date,,x
";
        let rows = read_weather(data.as_bytes(), ',').unwrap();
        assert_eq!(rows[0].date, None);
        assert_eq!(rows[0].temperature, None);
        assert_eq!(rows[0].relative_humidity, None);
    }
}
