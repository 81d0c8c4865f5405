pub mod contract_csv_file;
pub mod weather_csv_file;

pub use contract_csv_file::ContractCsvFileSource;
pub use weather_csv_file::WeatherCsvFileSource;

use csv::StringRecord;

use crate::pipeline::PipelineError;

/// Look a field up by header name, case-insensitively. The extracts disagree
/// on header casing (`ZIPCODE` vs `zipcode`), so name matching folds case.
pub(crate) fn field<'r>(
    record: &'r StringRecord,
    headers: &StringRecord,
    name: &str,
) -> Result<&'r str, PipelineError> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .and_then(|idx| record.get(idx))
        .ok_or_else(|| PipelineError::Source(format!("missing column '{name}' in CSV record")))
}

pub(crate) fn parse_optional_f64(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        trimmed.parse().ok()
    }
}
