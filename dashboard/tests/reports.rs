use chrono::NaiveDate;
use dashboard::reports::global_revenue::NO_PRIOR_DATA;
use dashboard::reports::{EmptyReason, ReportKind, Reports, ALL_COUNTRIES};
use dashboard::services::QueryService;
use tempfile::tempdir;

mod support;

use support::Fixture;

fn month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}

#[test]
fn dropdown_options_come_from_the_store() {
    let fixture = Fixture::new();
    let reports = fixture.reports();

    assert_eq!(
        reports.country_options().unwrap(),
        vec![ALL_COUNTRIES, "Brazil", "Japan", "Thailand"]
    );
    assert_eq!(reports.year_options().unwrap(), vec![2023, 2022]);
}

#[test]
fn global_revenue_defaults_to_latest_year_with_growth_labels() {
    let fixture = Fixture::new();
    let chart = fixture.reports().global_revenue(None);

    let data = chart.data().expect("revenue chart");
    assert_eq!(data.year, 2023);
    assert_eq!(data.points.len(), 3);

    let thailand = data.point("Thailand").unwrap();
    assert_eq!(thailand.total_revenue, 120.0);
    assert_eq!(thailand.growth_label, "▲ +20.0%");

    let brazil = data.point("Brazil").unwrap();
    assert_eq!(brazil.total_revenue, 80.0);
    assert_eq!(brazil.growth_label, NO_PRIOR_DATA);
    assert_eq!(brazil.yoy_growth_pct, None);

    let japan = data.point("Japan").unwrap();
    assert_eq!(japan.total_revenue, 130.0);
    assert_eq!(japan.avg_basket_size, 65.0);

    for point in &data.points {
        let days = point.avg_delivery_days.unwrap();
        assert!((2.0..=7.0).contains(&days), "{} days", days);
    }
    assert_eq!(chart.meta().unwrap().title, "Global Revenue 2023");
}

#[test]
fn global_revenue_filters_to_the_selected_year() {
    let fixture = Fixture::new();
    let reports = fixture.reports();

    let chart = reports.global_revenue(Some(2022));
    let data = chart.data().unwrap();
    assert_eq!(data.points.len(), 1);
    assert_eq!(data.points[0].country, "Thailand");
    assert_eq!(data.points[0].growth_label, NO_PRIOR_DATA);

    let chart = reports.global_revenue(Some(2019));
    assert_eq!(chart.empty_state().unwrap().reason, EmptyReason::NoData);
}

#[test]
fn customer_value_matrix_has_one_series_per_country() {
    let fixture = Fixture::new();
    let reports = fixture.reports();

    let all = reports.customer_value_matrix(None, None);
    let data = all.data().unwrap();
    assert_eq!(data.series.len(), 3);
    assert_eq!(all.meta().unwrap().series.len(), 3);

    let thailand = reports.customer_value_matrix(None, Some("Thailand"));
    let data = thailand.data().unwrap();
    assert_eq!(data.series.len(), 1);
    let months: Vec<NaiveDate> = data.series[0].points.iter().map(|p| p.month).collect();
    assert_eq!(months, vec![month(2022, 3), month(2023, 4)]);
    assert_eq!(data.series[0].points[0].total_spend, 100.0);

    let one_year = reports.customer_value_matrix(Some(2023), Some("Thailand"));
    let series = &one_year.data().unwrap().series;
    assert_eq!(series.len(), 1);
    assert_eq!(series[0].points.len(), 1);
}

#[test]
fn product_performance_ranks_categories_by_volume() {
    let fixture = Fixture::new();
    let chart = fixture.reports().product_performance(None);

    let data = chart.data().unwrap();
    let ranking: Vec<(&str, f64)> = data
        .categories
        .iter()
        .map(|c| (c.category.as_str(), c.total_sales_volume))
        .collect();
    assert_eq!(
        ranking,
        vec![("Books", 4.0), ("Home", 3.0), ("Electronics", 2.0)]
    );

    assert_eq!(data.category("Home").unwrap().average_rating, Some(2.0));
    assert_eq!(data.category("Electronics").unwrap().average_rating, Some(4.0));
    assert_eq!(data.flagged().count(), 0);

    let meta = chart.meta().unwrap();
    assert_eq!(meta.title, "Product Performance Analysis - All Countries");
    assert_eq!(
        meta.secondary_y_axis.as_deref(),
        Some("Average Customer Rating (1-5)")
    );
}

#[test]
fn product_performance_for_unknown_country_is_a_no_data_state() {
    let fixture = Fixture::new();
    let chart = fixture.reports().product_performance(Some("Atlantis"));

    let empty = chart.empty_state().expect("placeholder");
    assert_eq!(empty.reason, EmptyReason::NoData);
    assert_eq!(empty.title, "Product Performance Analysis - Atlantis");
}

#[test]
fn all_country_sentinels_mean_no_filter_in_every_report() {
    let fixture = Fixture::new();
    let reports = fixture.reports();

    let chart = reports.product_performance(Some(ALL_COUNTRIES));
    let data = chart.data().expect("sentinel selects every country");
    assert_eq!(data.country, None);
    assert_eq!(data.categories.len(), 3);
    assert_eq!(
        chart.meta().unwrap().title,
        "Product Performance Analysis - All Countries"
    );

    let chart = reports.customer_value_matrix(None, Some("all"));
    assert_eq!(chart.data().unwrap().series.len(), 3);

    let chart = reports.service_quality(Some(" "));
    assert_eq!(chart.data().unwrap().points.len(), 4);

    let batch = reports
        .raw_result(ReportKind::ProductPerformance, None, Some("All Countries"))
        .unwrap();
    assert_eq!(batch.num_rows(), 3);
}

#[test]
fn service_quality_is_monthly() {
    let fixture = Fixture::new();
    let chart = fixture.reports().service_quality(None);

    let points = &chart.data().unwrap().points;
    let months: Vec<NaiveDate> = points.iter().map(|p| p.month).collect();
    assert_eq!(
        months,
        vec![month(2022, 3), month(2023, 4), month(2023, 6), month(2023, 7)]
    );
    assert_eq!(points[2].avg_review_score, None);
    assert_eq!(points[3].avg_review_score, Some(3.5));

    let brazil = fixture.reports().service_quality(Some("Brazil"));
    assert_eq!(brazil.data().unwrap().points.len(), 1);
}

#[test]
fn missing_query_definitions_become_placeholders() {
    let fixture = Fixture::new();
    let dir = tempdir().unwrap();
    let reports = Reports::new(QueryService::new(fixture.database(), dir.path()));

    let chart = reports.service_quality(None);
    assert_eq!(chart.empty_state().unwrap().reason, EmptyReason::QueryUnavailable);

    let err = reports
        .raw_result(ReportKind::ServiceQuality, None, None)
        .unwrap_err();
    assert!(matches!(err, common::Error::QueryNotFound(_)));
}

#[test]
fn missing_store_becomes_a_store_error_state() {
    let dir = tempdir().unwrap();
    let reports = Reports::new(QueryService::new(
        dir.path().join("absent.db"),
        support::SQL_DIR,
    ));

    let chart = reports.global_revenue(None);
    assert_eq!(chart.empty_state().unwrap().reason, EmptyReason::StoreError);
    assert!(matches!(
        reports.country_options(),
        Err(common::Error::StoreUnavailable(_))
    ));
}

#[test]
fn raw_results_keep_query_columns() {
    let fixture = Fixture::new();
    let batch = fixture
        .reports()
        .raw_result(ReportKind::ProductPerformance, None, Some("Japan"))
        .unwrap();

    let schema = batch.schema();
    let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
    assert_eq!(
        names,
        vec!["category", "total_sales_volume", "average_customer_rating"]
    );
    assert_eq!(batch.num_rows(), 2);
}
