use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::models::{ApiResponse, ChartQuery};
use crate::reports::filters::{country_filter, parse_year};
use crate::reports::{
    Chart, CustomerValueMatrix, GlobalRevenue, ProductPerformance, Reports, ServiceQuality,
};
use crate::services::AppError;

type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

/// Runs store access off the async runtime.
async fn run_blocking<T, F>(reports: Arc<Reports>, f: F) -> Result<T, AppError>
where
    F: FnOnce(&Reports) -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || f(&reports))
        .await
        .map_err(|e| AppError(common::Error::Other(format!("Report task failed: {}", e))))
}

pub async fn country_options(State(reports): State<Arc<Reports>>) -> ApiResult<Vec<String>> {
    let options = run_blocking(reports, |r| r.country_options()).await??;
    Ok(Json(ApiResponse::success(options)))
}

pub async fn year_options(State(reports): State<Arc<Reports>>) -> ApiResult<Vec<i32>> {
    let options = run_blocking(reports, |r| r.year_options()).await??;
    Ok(Json(ApiResponse::success(options)))
}

pub async fn global_revenue(
    Query(params): Query<ChartQuery>,
    State(reports): State<Arc<Reports>>,
) -> ApiResult<Chart<GlobalRevenue>> {
    let year = parse_year(params.year.as_deref())?;
    let chart = run_blocking(reports, move |r| r.global_revenue(year)).await?;
    Ok(Json(ApiResponse::success(chart)))
}

pub async fn customer_value_matrix(
    Query(params): Query<ChartQuery>,
    State(reports): State<Arc<Reports>>,
) -> ApiResult<Chart<CustomerValueMatrix>> {
    let year = parse_year(params.year.as_deref())?;
    let country = country_filter(params.country.as_deref());
    let chart = run_blocking(reports, move |r| {
        r.customer_value_matrix(year, country.as_deref())
    })
    .await?;
    Ok(Json(ApiResponse::success(chart)))
}

pub async fn product_performance(
    Query(params): Query<ChartQuery>,
    State(reports): State<Arc<Reports>>,
) -> ApiResult<Chart<ProductPerformance>> {
    let country = country_filter(params.country.as_deref());
    let chart = run_blocking(reports, move |r| r.product_performance(country.as_deref())).await?;
    Ok(Json(ApiResponse::success(chart)))
}

pub async fn service_quality(
    Query(params): Query<ChartQuery>,
    State(reports): State<Arc<Reports>>,
) -> ApiResult<Chart<ServiceQuality>> {
    let country = country_filter(params.country.as_deref());
    let chart = run_blocking(reports, move |r| r.service_quality(country.as_deref())).await?;
    Ok(Json(ApiResponse::success(chart)))
}

// Define all API routes
pub fn routes(reports: Arc<Reports>) -> Router {
    Router::new()
        .route("/api/options/countries", get(country_options))
        .route("/api/options/years", get(year_options))
        .route("/api/charts/global-revenue", get(global_revenue))
        .route("/api/charts/customer-value-matrix", get(customer_value_matrix))
        .route("/api/charts/product-performance", get(product_performance))
        .route("/api/charts/service-quality", get(service_quality))
        .layer(TraceLayer::new_for_http())
        .with_state(reports)
}
