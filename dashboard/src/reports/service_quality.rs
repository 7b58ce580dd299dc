use super::chart::{Chart, ChartMeta, SeriesStyle, ACCENT_COLOR, PRIMARY_COLOR};
use super::filters::country_filter;
use super::{month_start, ready_or_invalid, ReportKind, Reports};
use crate::utils::arrow::{f64_values, required, string_values};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use common::Result;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityPoint {
    pub month: NaiveDate,
    pub avg_shipping_days: Option<f64>,
    /// `None` for months without any review.
    pub avg_review_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceQuality {
    pub country: Option<String>,
    pub points: Vec<QualityPoint>,
}

fn points(batch: &RecordBatch) -> Result<Vec<QualityPoint>> {
    let months = string_values(batch, "month")?;
    let shipping = f64_values(batch, "avg_shipping_days")?;
    let scores = f64_values(batch, "avg_review_score")?;

    (0..batch.num_rows())
        .map(|i| {
            Ok(QualityPoint {
                month: month_start(required(months[i].as_deref(), "month", i)?)?,
                avg_shipping_days: shipping[i],
                avg_review_score: scores[i],
            })
        })
        .collect()
}

fn meta(title: &str) -> ChartMeta {
    ChartMeta {
        title: title.to_string(),
        x_axis: "Time (Monthly)".to_string(),
        y_axis: "Avg Shipping Days".to_string(),
        secondary_y_axis: Some("Avg Review Score (1-5)".to_string()),
        series: vec![
            SeriesStyle::primary("Avg Shipping Days", ACCENT_COLOR),
            SeriesStyle::secondary("Avg Review Score", PRIMARY_COLOR),
        ],
    }
}

impl Reports {
    pub fn service_quality(&self, country: Option<&str>) -> Chart<ServiceQuality> {
        let selected = country_filter(country);
        let country = selected.as_deref();
        let kind = ReportKind::ServiceQuality;
        let title = kind.title();

        let batch = match self.fetch(kind, &kind.params(None, country), title) {
            Ok(batch) => batch,
            Err(empty) => return Chart::Empty(empty),
        };

        let outcome = points(&batch).map(|points| {
            (
                meta(title),
                ServiceQuality {
                    country: country.map(str::to_string),
                    points,
                },
            )
        });
        ready_or_invalid(title, outcome)
    }
}
