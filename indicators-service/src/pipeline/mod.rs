use sqlx::PgPool;

use crate::{
    config::AppConfig,
    sinks::WarehouseSink,
    sources::{ContractCsvFileSource, WeatherCsvFileSource},
    transform::{self, indicators, join, zone_filter},
};

#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("source error: {0}")]
    Source(String),
    #[error("sink error: {0}")]
    Sink(String),
}

/// Outcome of one table write, reported on stdout by the binary.
#[derive(Debug, Clone)]
pub struct TableSummary {
    pub table: String,
    pub rows: u64,
}

pub const KPI_SOLAR_TABLE: &str = "kpi_solar_customers";
pub const KPI_NON_SOLAR_TABLE: &str = "kpi_non_solar_customers";

/// The whole batch flow, start to finish: load both datasets, restrict them
/// to zones above the contract-count threshold, band and keep residential
/// contracts, left-join weather to contracts, then aggregate and replace one
/// warehouse table per solar status. Everything is threaded through
/// explicitly; the two table writes are sequential and independent, so a
/// failure on the second leaves the first in place.
pub async fn run(cfg: &AppConfig, pool: &PgPool) -> Result<Vec<TableSummary>, PipelineError> {
    let contracts = ContractCsvFileSource::new(&cfg.inputs.contracts.path, cfg.inputs.contracts.separator)
        .load()
        .map_err(|e| {
            tracing::error!(error = %e, path = %cfg.inputs.contracts.path, "failed to load contracts dataset");
            e
        })?;
    tracing::info!(rows = contracts.len(), "loaded contract records");

    let weather = WeatherCsvFileSource::new(&cfg.inputs.weather.path, cfg.inputs.weather.separator)
        .load()
        .map_err(|e| {
            tracing::error!(error = %e, path = %cfg.inputs.weather.path, "failed to load weather dataset");
            e
        })?;
    tracing::info!(rows = weather.len(), "loaded weather records");

    let zones = zone_filter::eligible_zones(&contracts);
    tracing::info!(zones = zones.len(), "zones above the contract-count threshold");

    let contracts: Vec<_> = contracts
        .into_iter()
        .filter(|c| zones.contains(&c.zipcode))
        .collect();
    let weather: Vec<_> = weather
        .into_iter()
        .filter(|w| zones.contains(&w.zipcode))
        .collect();

    let residential = transform::retain_residential(transform::attach_power_bands(contracts));
    tracing::info!(rows = residential.len(), "residential contracts after banding");

    let joined = join::left_join_weather(&weather, &residential);
    tracing::info!(rows = joined.len(), "joined weather/contract rows");

    let sink = WarehouseSink::new(pool.clone());
    let mut summaries = Vec::new();
    for (table, has_solar) in [(KPI_SOLAR_TABLE, true), (KPI_NON_SOLAR_TABLE, false)] {
        let rows = indicators::indicators_table(&joined, has_solar);
        let written = sink.replace_table(table, &rows).await?;
        tracing::info!(table, rows = written, "kpi table replaced");
        summaries.push(TableSummary {
            table: table.to_string(),
            rows: written,
        });
    }

    Ok(summaries)
}
