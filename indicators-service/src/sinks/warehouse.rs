use kpi_client::domain::IndicatorRow;
use sqlx::{postgres::PgPool, Postgres, QueryBuilder};

use crate::pipeline::PipelineError;

/// Rows per INSERT statement; 8 binds per row keeps a chunk comfortably
/// under the pgwire parameter limit.
const INSERT_CHUNK_ROWS: usize = 1000;

pub struct WarehouseSink {
    pool: PgPool,
}

impl WarehouseSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Replace `table` with `rows` and return the row count written. Drop,
    /// create and inserts share one transaction, so a concurrent reader sees
    /// either the previous table or the complete new one, never a partial
    /// state. No retries: this is a single-shot batch job.
    pub async fn replace_table(
        &self,
        table: &str,
        rows: &[IndicatorRow],
    ) -> Result<u64, PipelineError> {
        match self.replace_table_inner(table, rows).await {
            Ok(written) => Ok(written),
            Err(e) => {
                tracing::error!(error = %e, table, "warehouse write failed");
                Err(PipelineError::Sink(format!(
                    "failed to replace table {table}: {e}"
                )))
            }
        }
    }

    async fn replace_table_inner(
        &self,
        table: &str,
        rows: &[IndicatorRow],
    ) -> Result<u64, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(&format!(r#"DROP TABLE IF EXISTS "{table}""#))
            .execute(&mut *tx)
            .await?;
        sqlx::query(&create_table_sql(table)).execute(&mut *tx).await?;

        let mut written = 0u64;
        for chunk in rows.chunks(INSERT_CHUNK_ROWS) {
            let mut builder = QueryBuilder::<Postgres>::new(insert_prefix(table));
            builder.push_values(chunk, |mut b, row| {
                b.push_bind(&row.zipcode)
                    .push_bind(row.year)
                    .push_bind(row.month)
                    .push_bind(&row.power_category)
                    .push_bind(&row.max_temperature)
                    .push_bind(&row.min_temperature)
                    .push_bind(&row.avg_relative_humidity)
                    .push_bind(row.n);
            });
            written += builder.build().execute(&mut *tx).await?.rows_affected();
        }

        tx.commit().await?;
        Ok(written)
    }
}

fn create_table_sql(table: &str) -> String {
    // year/month are nullable: unparseable observation dates persist as a
    // null year/month group. Measure columns are text in the destination
    // schema.
    format!(
        r#"CREATE TABLE "{table}" (
    zipcode VARCHAR NOT NULL,
    year INTEGER,
    month INTEGER,
    power_category VARCHAR NOT NULL,
    "maxTemperature" VARCHAR,
    "minTemperature" VARCHAR,
    "avgRelativeHumidity" VARCHAR,
    n BIGINT NOT NULL
)"#
    )
}

fn insert_prefix(table: &str) -> String {
    format!(
        r#"INSERT INTO "{table}" (zipcode, year, month, power_category, "maxTemperature", "minTemperature", "avgRelativeHumidity", n) "#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_table_quotes_the_camel_case_measure_columns() {
        let sql = create_table_sql("kpi_solar_customers");
        assert!(sql.starts_with(r#"CREATE TABLE "kpi_solar_customers""#));
        assert!(sql.contains(r#""maxTemperature" VARCHAR"#));
        assert!(sql.contains(r#""minTemperature" VARCHAR"#));
        assert!(sql.contains(r#""avgRelativeHumidity" VARCHAR"#));
        assert!(sql.contains("n BIGINT NOT NULL"));
    }

    #[test]
    fn insert_targets_the_same_column_set() {
        let sql = insert_prefix("kpi_non_solar_customers");
        assert!(sql.starts_with(r#"INSERT INTO "kpi_non_solar_customers""#));
        for col in [
            "zipcode",
            "year",
            "month",
            "power_category",
            r#""maxTemperature""#,
            r#""minTemperature""#,
            r#""avgRelativeHumidity""#,
        ] {
            assert!(sql.contains(col), "missing column {col}");
        }
    }
}
