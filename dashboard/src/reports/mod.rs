//! Reporting functions: one query plus one transform per chart.
//!
//! Every function returns a [`Chart`]. Missing query definitions, store
//! failures, unreadable results and empty results all come back as
//! [`Chart::Empty`] so callers render one kind of placeholder.

pub mod chart;
pub mod customer_matrix;
pub mod filters;
pub mod global_revenue;
pub mod product_performance;
pub mod service_quality;

pub use chart::{Chart, ChartMeta, EmptyReason, EmptyState, SeriesStyle};
pub use customer_matrix::CustomerValueMatrix;
pub use filters::ALL_COUNTRIES;
pub use global_revenue::GlobalRevenue;
pub use product_performance::ProductPerformance;
pub use service_quality::ServiceQuality;

use crate::services::QueryService;
use crate::utils::arrow::{i64_values, string_values};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use common::config::Settings;
use common::{Error, Result};
use filters::{text_param, year_param};
use rusqlite::types::Value;
use std::str::FromStr;
use tracing::{debug, error};

const COUNTRY_OPTIONS_SQL: &str = "SELECT DISTINCT country FROM Customers ORDER BY country";
const YEAR_OPTIONS_SQL: &str = "SELECT DISTINCT CAST(strftime('%Y', order_date) AS INTEGER) AS year \
     FROM Orders ORDER BY year DESC";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    GlobalRevenue,
    CustomerValueMatrix,
    ProductPerformance,
    ServiceQuality,
}

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [
        ReportKind::GlobalRevenue,
        ReportKind::CustomerValueMatrix,
        ReportKind::ProductPerformance,
        ReportKind::ServiceQuality,
    ];

    /// Name of the SQL definition backing the report.
    pub fn query_name(&self) -> &'static str {
        match self {
            Self::GlobalRevenue => "global_revenue",
            Self::CustomerValueMatrix => "customer_value_matrix",
            Self::ProductPerformance => "product_performance",
            Self::ServiceQuality => "service_quality",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            Self::GlobalRevenue => "global-revenue",
            Self::CustomerValueMatrix => "customer-value-matrix",
            Self::ProductPerformance => "product-performance",
            Self::ServiceQuality => "service-quality",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::GlobalRevenue => "Global Revenue",
            Self::CustomerValueMatrix => "Customer Value Matrix",
            Self::ProductPerformance => "Product Performance Analysis",
            Self::ServiceQuality => "Service Quality Trend: Shipping Time vs Customer Satisfaction",
        }
    }

    /// Positional parameters in the order the SQL definition numbers them.
    pub fn params(&self, year: Option<i32>, country: Option<&str>) -> Vec<Value> {
        match self {
            Self::GlobalRevenue => Vec::new(),
            Self::CustomerValueMatrix => vec![year_param(year), text_param(country)],
            Self::ProductPerformance | Self::ServiceQuality => vec![text_param(country)],
        }
    }
}

impl FromStr for ReportKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.slug() == s || kind.query_name() == s)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown report '{}'", s)))
    }
}

/// The four dashboard reports over one store.
#[derive(Debug, Clone)]
pub struct Reports {
    queries: QueryService,
}

impl Reports {
    pub fn new(queries: QueryService) -> Self {
        Self { queries }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(QueryService::from_settings(settings))
    }

    pub fn query_service(&self) -> &QueryService {
        &self.queries
    }

    /// Runs a report's query and returns the untransformed result.
    pub fn raw_result(
        &self,
        kind: ReportKind,
        year: Option<i32>,
        country: Option<&str>,
    ) -> Result<RecordBatch> {
        let sql = self.queries.catalog().require(kind.query_name())?;
        let country = filters::country_filter(country);
        self.queries.run(&sql, &kind.params(year, country.as_deref()))
    }

    /// Loads and runs a report query, turning every failure into a placeholder.
    pub(crate) fn fetch(
        &self,
        kind: ReportKind,
        params: &[Value],
        title: &str,
    ) -> std::result::Result<RecordBatch, EmptyState> {
        let query = kind.query_name();
        let Some(sql) = self.queries.load_query(query) else {
            return Err(EmptyState::query_unavailable(title, query));
        };

        debug!(query, "Running report query");
        match self.queries.run(&sql, params) {
            Ok(batch) if batch.num_rows() == 0 => Err(EmptyState::no_data(title)),
            Ok(batch) => Ok(batch),
            Err(e) => {
                error!(query, error = %e, "Report query failed");
                Err(EmptyState::store_error(title, &e))
            }
        }
    }

    /// Country dropdown entries, `All Countries` first.
    pub fn country_options(&self) -> Result<Vec<String>> {
        let batch = self.queries.run(COUNTRY_OPTIONS_SQL, &[])?;
        let mut options = vec![ALL_COUNTRIES.to_string()];
        options.extend(string_values(&batch, "country")?.into_iter().flatten());
        Ok(options)
    }

    /// Order years, most recent first.
    pub fn year_options(&self) -> Result<Vec<i32>> {
        let batch = self.queries.run(YEAR_OPTIONS_SQL, &[])?;
        i64_values(&batch, "year")?
            .into_iter()
            .flatten()
            .map(|year| {
                i32::try_from(year)
                    .map_err(|_| Error::SchemaMismatch(format!("Year {} out of range", year)))
            })
            .collect()
    }
}

/// Parses a `YYYY-MM` month key into the first day of that month.
pub(crate) fn month_start(month: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", month.trim()), "%Y-%m-%d")
        .map_err(|e| Error::SchemaMismatch(format!("Invalid month '{}': {}", month, e)))
}

/// Wraps a transform outcome, reporting decode failures as placeholders.
pub(crate) fn ready_or_invalid<T>(
    title: &str,
    outcome: Result<(ChartMeta, T)>,
) -> Chart<T> {
    match outcome {
        Ok((meta, data)) => Chart::Ready { meta, data },
        Err(e) => {
            error!(title, error = %e, "Report result could not be read");
            Chart::Empty(EmptyState::invalid_result(title, &e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_kinds_parse_from_slug_or_query_name() {
        assert_eq!(
            "global-revenue".parse::<ReportKind>().unwrap(),
            ReportKind::GlobalRevenue
        );
        assert_eq!(
            "service_quality".parse::<ReportKind>().unwrap(),
            ReportKind::ServiceQuality
        );
        assert!("pie-chart".parse::<ReportKind>().is_err());
    }

    #[test]
    fn params_follow_each_definition() {
        assert!(ReportKind::GlobalRevenue.params(Some(2023), Some("Peru")).is_empty());
        assert_eq!(
            ReportKind::CustomerValueMatrix.params(None, Some("Peru")),
            vec![Value::Null, Value::Text("Peru".into())]
        );
        assert_eq!(
            ReportKind::ProductPerformance.params(Some(2023), None),
            vec![Value::Null]
        );
    }

    #[test]
    fn month_keys_become_first_of_month() {
        assert_eq!(
            month_start("2023-07").unwrap(),
            NaiveDate::from_ymd_opt(2023, 7, 1).unwrap()
        );
        assert!(month_start("July").is_err());
    }
}
