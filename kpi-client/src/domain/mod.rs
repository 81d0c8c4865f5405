mod contract;
mod indicator;
mod weather;

pub use contract::{ContractRecord, PowerBand, MAX_POWER_KW, MIN_POWER_KW};
pub use indicator::IndicatorRow;
pub use weather::WeatherRecord;

/// Zone codes arrive with inconsistent casing and stray whitespace across the
/// source extracts; every comparison in the pipeline uses this normalized form.
pub fn normalize_zone(raw: &str) -> String {
    raw.trim().to_lowercase()
}
