pub mod kpi_queries;
