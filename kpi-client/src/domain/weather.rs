use time::Date;

/// One weather observation for a zone. `date` is `None` when the source value
/// did not parse; such rows aggregate under a null year/month group instead
/// of being dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherRecord {
    pub zipcode: String,
    pub date: Option<Date>,
    pub temperature: Option<f64>,
    pub relative_humidity: Option<f64>,
}
