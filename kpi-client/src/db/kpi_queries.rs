use anyhow::Result;
use sqlx::PgPool;

use crate::domain::IndicatorRow;

// Table names are interpolated rather than bound because pgwire cannot bind
// identifiers. Callers pass the fixed table constants owned by the batch job,
// not user input.

const KPI_COLUMNS: &str = r#"zipcode, year, month, power_category,
"maxTemperature", "minTemperature", "avgRelativeHumidity", n"#;

/// Fetch every row of a persisted KPI table.
pub async fn kpi_table(pool: &PgPool, table: &str) -> Result<Vec<IndicatorRow>> {
    let sql = format!(
        r#"
        SELECT {KPI_COLUMNS}
        FROM "{table}"
        ORDER BY zipcode, year, month, power_category
        "#
    );

    let rows = sqlx::query_as::<_, IndicatorRow>(&sql).fetch_all(pool).await?;

    Ok(rows)
}

/// Monthly KPI series for a single zone, ordered by (year, month).
pub async fn zone_monthly_kpis(
    pool: &PgPool,
    table: &str,
    zipcode: &str,
) -> Result<Vec<IndicatorRow>> {
    let sql = format!(
        r#"
        SELECT {KPI_COLUMNS}
        FROM "{table}"
        WHERE zipcode = $1
        ORDER BY year, month, power_category
        "#
    );

    let rows = sqlx::query_as::<_, IndicatorRow>(&sql)
        .bind(zipcode)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}
