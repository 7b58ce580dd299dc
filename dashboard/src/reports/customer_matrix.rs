use super::chart::{Chart, ChartMeta, SeriesStyle, PRIMARY_COLOR};
use super::filters::{country_filter, country_label};
use super::{month_start, ready_or_invalid, ReportKind, Reports};
use crate::utils::arrow::{f64_values, required, string_values};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use common::Result;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySpend {
    pub month: NaiveDate,
    pub total_spend: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountrySeries {
    pub country: String,
    pub points: Vec<MonthlySpend>,
}

/// Monthly spend, one series per country.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerValueMatrix {
    pub year: Option<i32>,
    pub country: Option<String>,
    pub series: Vec<CountrySeries>,
}

impl CustomerValueMatrix {
    pub fn series_for(&self, country: &str) -> Option<&CountrySeries> {
        self.series.iter().find(|s| s.country == country)
    }
}

/// Groups query rows into per-country series. Rows arrive ordered by
/// country then month.
fn group_by_country(batch: &RecordBatch) -> Result<Vec<CountrySeries>> {
    let countries = string_values(batch, "country")?;
    let months = string_values(batch, "month")?;
    let spend = f64_values(batch, "total_spend")?;

    let mut series: Vec<CountrySeries> = Vec::new();
    for i in 0..batch.num_rows() {
        let country = required(countries[i].as_deref(), "country", i)?;
        let point = MonthlySpend {
            month: month_start(required(months[i].as_deref(), "month", i)?)?,
            total_spend: required(spend[i], "total_spend", i)?,
        };

        if series.last().is_none_or(|last| last.country != country) {
            series.push(CountrySeries {
                country: country.to_string(),
                points: Vec::new(),
            });
        }
        if let Some(last) = series.last_mut() {
            last.points.push(point);
        }
    }

    for s in &mut series {
        s.points.sort_by_key(|p| p.month);
    }
    Ok(series)
}

fn meta(title: &str, series: &[CountrySeries]) -> ChartMeta {
    ChartMeta {
        title: title.to_string(),
        x_axis: "Month".to_string(),
        y_axis: "Total Spend".to_string(),
        secondary_y_axis: None,
        series: series
            .iter()
            .map(|s| SeriesStyle::primary(&s.country, PRIMARY_COLOR))
            .collect(),
    }
}

impl Reports {
    /// Monthly spend per country. `None` for either filter means all.
    pub fn customer_value_matrix(
        &self,
        year: Option<i32>,
        country: Option<&str>,
    ) -> Chart<CustomerValueMatrix> {
        let selected = country_filter(country);
        let country = selected.as_deref();
        let kind = ReportKind::CustomerValueMatrix;
        let mut title = format!("{} - {}", kind.title(), country_label(country));
        if let Some(year) = year {
            title.push_str(&format!(" ({})", year));
        }

        let batch = match self.fetch(kind, &kind.params(year, country), &title) {
            Ok(batch) => batch,
            Err(empty) => return Chart::Empty(empty),
        };

        let outcome = group_by_country(&batch).map(|series| {
            (
                meta(&title, &series),
                CustomerValueMatrix {
                    year,
                    country: country.map(str::to_string),
                    series,
                },
            )
        });
        ready_or_invalid(&title, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Float64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};
    use std::sync::Arc;

    fn batch(countries: Vec<&str>, months: Vec<&str>, spend: Vec<f64>) -> RecordBatch {
        let schema = Schema::new(vec![
            Field::new("country", DataType::Utf8, true),
            Field::new("month", DataType::Utf8, true),
            Field::new("total_spend", DataType::Float64, true),
        ]);
        RecordBatch::try_new(
            Arc::new(schema),
            vec![
                Arc::new(StringArray::from(countries)),
                Arc::new(StringArray::from(months)),
                Arc::new(Float64Array::from(spend)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn one_series_per_country_with_calendar_months() {
        let series = group_by_country(&batch(
            vec!["Brazil", "Japan", "Japan"],
            vec!["2023-06", "2023-07", "2023-05"],
            vec![80.0, 130.0, 10.0],
        ))
        .unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series[1].country, "Japan");
        assert_eq!(
            series[1].points[0].month,
            NaiveDate::from_ymd_opt(2023, 5, 1).unwrap()
        );
        assert_eq!(series[1].points[1].total_spend, 130.0);
    }

    #[test]
    fn malformed_months_are_rejected() {
        let result = group_by_country(&batch(vec!["Japan"], vec!["July"], vec![1.0]));
        assert!(result.is_err());
    }
}
