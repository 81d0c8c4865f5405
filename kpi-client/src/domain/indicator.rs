/// One persisted KPI row, keyed by (zipcode, year, month, power_category).
///
/// The three measure columns are two-decimal fixed-point strings because the
/// destination schema stores them as text; `n` counts distinct contracts in
/// the group. Year and month are null when the weather date did not parse.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndicatorRow {
    pub zipcode: String,
    pub year: Option<i32>,
    pub month: Option<i32>,
    pub power_category: String,
    #[sqlx(rename = "maxTemperature")]
    pub max_temperature: Option<String>,
    #[sqlx(rename = "minTemperature")]
    pub min_temperature: Option<String>,
    #[sqlx(rename = "avgRelativeHumidity")]
    pub avg_relative_humidity: Option<String>,
    pub n: i64,
}
