use super::chart::{Chart, ChartMeta, EmptyState, SeriesStyle, PRIMARY_COLOR};
use super::{ready_or_invalid, ReportKind, Reports};
use crate::utils::arrow::{f64_values, i64_values, required, string_values};
use arrow::record_batch::RecordBatch;
use common::{Error, Result};
use serde::Serialize;

pub const NO_PRIOR_DATA: &str = "No prior data";

/// One aggregated row as the query returns it.
#[derive(Debug, Clone, PartialEq)]
pub struct RevenueRow {
    pub country: String,
    pub year: i32,
    pub total_revenue: f64,
    pub avg_basket_size: f64,
    pub avg_delivery_days: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenuePoint {
    pub country: String,
    pub year: i32,
    pub total_revenue: f64,
    pub avg_basket_size: f64,
    pub avg_delivery_days: Option<f64>,
    pub yoy_growth_pct: Option<f64>,
    pub growth_label: String,
    pub trend: Trend,
}

/// Map-ready revenue per country for one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalRevenue {
    pub year: i32,
    pub points: Vec<RevenuePoint>,
}

impl GlobalRevenue {
    pub fn point(&self, country: &str) -> Option<&RevenuePoint> {
        self.points.iter().find(|p| p.country == country)
    }
}

pub fn growth_pct(previous: f64, current: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    Some((current - previous) / previous * 100.0)
}

pub fn growth_label(growth: Option<f64>) -> String {
    match growth {
        Some(pct) if pct > 0.0 => format!("▲ +{:.1}%", pct),
        Some(pct) if pct < 0.0 => format!("▼ {:.1}%", pct),
        _ => NO_PRIOR_DATA.to_string(),
    }
}

fn trend(growth: Option<f64>) -> Trend {
    match growth {
        Some(pct) if pct > 0.0 => Trend::Up,
        Some(pct) if pct < 0.0 => Trend::Down,
        _ => Trend::Flat,
    }
}

/// Sorts by (country, year) and compares each row with the previous row of
/// the same country.
pub fn with_growth(mut rows: Vec<RevenueRow>) -> Vec<RevenuePoint> {
    rows.sort_by(|a, b| a.country.cmp(&b.country).then(a.year.cmp(&b.year)));

    let mut points: Vec<RevenuePoint> = Vec::with_capacity(rows.len());
    for row in rows {
        let previous = points
            .last()
            .filter(|p| p.country == row.country)
            .map(|p| p.total_revenue);
        let growth = previous.and_then(|prev| growth_pct(prev, row.total_revenue));

        points.push(RevenuePoint {
            growth_label: growth_label(growth),
            trend: trend(growth),
            yoy_growth_pct: growth,
            country: row.country,
            year: row.year,
            total_revenue: row.total_revenue,
            avg_basket_size: row.avg_basket_size,
            avg_delivery_days: row.avg_delivery_days,
        });
    }
    points
}

/// Keeps the rows of `year`, or of the latest year on record when unset.
pub fn select_year(points: Vec<RevenuePoint>, year: Option<i32>) -> Option<GlobalRevenue> {
    let year = year.or_else(|| points.iter().map(|p| p.year).max())?;
    let points: Vec<RevenuePoint> = points.into_iter().filter(|p| p.year == year).collect();
    if points.is_empty() {
        None
    } else {
        Some(GlobalRevenue { year, points })
    }
}

fn rows(batch: &RecordBatch) -> Result<Vec<RevenueRow>> {
    let countries = string_values(batch, "country")?;
    let years = i64_values(batch, "year")?;
    let revenue = f64_values(batch, "total_revenue")?;
    let basket = f64_values(batch, "avg_basket_size")?;
    let delivery = f64_values(batch, "avg_delivery_days")?;

    (0..batch.num_rows())
        .map(|i| {
            let year = required(years[i], "year", i)?;
            Ok(RevenueRow {
                country: required(countries[i].clone(), "country", i)?,
                year: i32::try_from(year)
                    .map_err(|_| Error::SchemaMismatch(format!("Year {} out of range", year)))?,
                total_revenue: required(revenue[i], "total_revenue", i)?,
                avg_basket_size: required(basket[i], "avg_basket_size", i)?,
                avg_delivery_days: delivery[i],
            })
        })
        .collect()
}

fn meta(year: i32) -> ChartMeta {
    ChartMeta {
        title: format!("Global Revenue {}", year),
        x_axis: "Country".to_string(),
        y_axis: "Total Revenue".to_string(),
        secondary_y_axis: None,
        series: vec![SeriesStyle::primary("Total Revenue", PRIMARY_COLOR)],
    }
}

impl Reports {
    /// Revenue map for `year`, defaulting to the latest year with orders.
    pub fn global_revenue(&self, year: Option<i32>) -> Chart<GlobalRevenue> {
        let kind = ReportKind::GlobalRevenue;
        let title = match year {
            Some(year) => format!("{} {}", kind.title(), year),
            None => kind.title().to_string(),
        };

        let batch = match self.fetch(kind, &kind.params(year, None), &title) {
            Ok(batch) => batch,
            Err(empty) => return Chart::Empty(empty),
        };

        let points = match rows(&batch) {
            Ok(rows) => with_growth(rows),
            Err(e) => return ready_or_invalid(&title, Err(e)),
        };

        match select_year(points, year) {
            Some(data) => ready_or_invalid(&title, Ok((meta(data.year), data))),
            None => Chart::Empty(EmptyState::no_data(&title)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(country: &str, year: i32, revenue: f64) -> RevenueRow {
        RevenueRow {
            country: country.to_string(),
            year,
            total_revenue: revenue,
            avg_basket_size: revenue,
            avg_delivery_days: Some(4.0),
        }
    }

    #[test]
    fn growth_is_computed_within_each_country() {
        let points = with_growth(vec![
            row("Peru", 2023, 120.0),
            row("Chile", 2023, 50.0),
            row("Peru", 2022, 100.0),
            row("Chile", 2024, 47.5),
        ]);

        let labels: Vec<(&str, i32, &str)> = points
            .iter()
            .map(|p| (p.country.as_str(), p.year, p.growth_label.as_str()))
            .collect();
        assert_eq!(
            labels,
            vec![
                ("Chile", 2023, NO_PRIOR_DATA),
                ("Chile", 2024, "▼ -5.0%"),
                ("Peru", 2022, NO_PRIOR_DATA),
                ("Peru", 2023, "▲ +20.0%"),
            ]
        );
        assert_eq!(points[3].trend, Trend::Up);
        assert_eq!(points[0].yoy_growth_pct, None);
    }

    #[test]
    fn zero_or_undefined_growth_uses_the_placeholder() {
        assert_eq!(growth_pct(0.0, 10.0), None);
        assert_eq!(growth_label(Some(0.0)), NO_PRIOR_DATA);
        assert_eq!(growth_label(None), NO_PRIOR_DATA);
    }

    #[test]
    fn latest_year_is_the_default_selection() {
        let points = with_growth(vec![row("Peru", 2022, 1.0), row("Peru", 2023, 2.0)]);

        let latest = select_year(points.clone(), None).unwrap();
        assert_eq!(latest.year, 2023);
        assert_eq!(latest.points.len(), 1);

        assert!(select_year(points, Some(2019)).is_none());
        assert!(select_year(Vec::new(), None).is_none());
    }
}
