use anyhow::Result;
use indicators_service::{config::AppConfig, observability, pipeline};
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() -> Result<()> {
    observability::init_tracing();

    let cfg = AppConfig::load().map_err(|e| {
        tracing::error!(error = %e, "failed to load configuration");
        e
    })?;

    let pool = PgPoolOptions::new()
        .max_connections(cfg.data_warehouse.max_connections)
        .connect(&cfg.data_warehouse.uri())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to connect to the data warehouse");
            e
        })?;

    let summaries = pipeline::run(&cfg, &pool).await?;

    // Stdout carries only the success summaries; diagnostics go to tracing.
    for summary in summaries {
        println!("{} table created with {} records.", summary.table, summary.rows);
    }

    Ok(())
}
