use super::chart::{Chart, ChartMeta, SeriesStyle, ACCENT_COLOR, ALERT_COLOR, PRIMARY_COLOR};
use super::filters::{country_filter, country_label};
use super::{ready_or_invalid, ReportKind, Reports};
use crate::utils::arrow::{f64_values, required, string_values};
use arrow::record_batch::RecordBatch;
use common::Result;
use serde::Serialize;

pub const ACTION_NEEDED: &str = "Action Needed";

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRow {
    pub category: String,
    pub total_sales_volume: f64,
    pub average_rating: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryPerformance {
    pub category: String,
    pub total_sales_volume: f64,
    pub average_rating: Option<f64>,
    pub action_needed: bool,
    pub annotation: Option<String>,
    pub color: String,
}

/// Categories in descending sales volume with their flags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductPerformance {
    pub country: Option<String>,
    pub mean_sales_volume: f64,
    pub mean_rating: Option<f64>,
    pub categories: Vec<CategoryPerformance>,
}

impl ProductPerformance {
    pub fn category(&self, name: &str) -> Option<&CategoryPerformance> {
        self.categories.iter().find(|c| c.category == name)
    }

    pub fn flagged(&self) -> impl Iterator<Item = &CategoryPerformance> {
        self.categories.iter().filter(|c| c.action_needed)
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Flags every category below both the mean volume and the mean rating.
/// Unrated categories are never flagged and do not count toward the rating mean.
pub fn flag_categories(country: Option<&str>, mut rows: Vec<CategoryRow>) -> ProductPerformance {
    rows.sort_by(|a, b| {
        b.total_sales_volume
            .total_cmp(&a.total_sales_volume)
            .then_with(|| a.category.cmp(&b.category))
    });

    let mean_sales_volume = mean(rows.iter().map(|r| r.total_sales_volume)).unwrap_or(0.0);
    let mean_rating = mean(rows.iter().filter_map(|r| r.average_rating));

    let categories = rows
        .into_iter()
        .map(|row| {
            let action_needed = match (row.average_rating, mean_rating) {
                (Some(rating), Some(mean_rating)) => {
                    row.total_sales_volume < mean_sales_volume && rating < mean_rating
                }
                _ => false,
            };
            CategoryPerformance {
                category: row.category,
                total_sales_volume: row.total_sales_volume,
                average_rating: row.average_rating,
                action_needed,
                annotation: action_needed.then(|| ACTION_NEEDED.to_string()),
                color: if action_needed { ALERT_COLOR } else { PRIMARY_COLOR }.to_string(),
            }
        })
        .collect();

    ProductPerformance {
        country: country.map(str::to_string),
        mean_sales_volume,
        mean_rating,
        categories,
    }
}

fn rows(batch: &RecordBatch) -> Result<Vec<CategoryRow>> {
    let categories = string_values(batch, "category")?;
    let volumes = f64_values(batch, "total_sales_volume")?;
    let ratings = f64_values(batch, "average_customer_rating")?;

    (0..batch.num_rows())
        .map(|i| {
            Ok(CategoryRow {
                category: required(categories[i].clone(), "category", i)?,
                total_sales_volume: required(volumes[i], "total_sales_volume", i)?,
                average_rating: ratings[i],
            })
        })
        .collect()
}

fn meta(title: &str) -> ChartMeta {
    ChartMeta {
        title: title.to_string(),
        x_axis: "Product Category".to_string(),
        y_axis: "Total Sales Volume".to_string(),
        secondary_y_axis: Some("Average Customer Rating (1-5)".to_string()),
        series: vec![
            SeriesStyle::primary("Total Sales Volume", PRIMARY_COLOR),
            SeriesStyle::secondary("Average Customer Rating", ACCENT_COLOR),
        ],
    }
}

impl Reports {
    pub fn product_performance(&self, country: Option<&str>) -> Chart<ProductPerformance> {
        let selected = country_filter(country);
        let country = selected.as_deref();
        let kind = ReportKind::ProductPerformance;
        let title = format!("{} - {}", kind.title(), country_label(country));

        let batch = match self.fetch(kind, &kind.params(None, country), &title) {
            Ok(batch) => batch,
            Err(empty) => return Chart::Empty(empty),
        };

        let outcome = rows(&batch).map(|rows| (meta(&title), flag_categories(country, rows)));
        ready_or_invalid(&title, outcome)
    }
}
