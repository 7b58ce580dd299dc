pub mod api;
pub mod reports;
pub mod services;
pub mod utils;

use common::config::Settings;
use common::Result;
use reports::Reports;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Serves the dashboard JSON API until the process is stopped.
pub async fn run_dashboard_server(settings: &Settings) -> Result<()> {
    let reports = Arc::new(Reports::from_settings(settings));

    let database = reports.query_service().database();
    if !database.exists() {
        warn!(path = %database.display(), "Store file not found, charts will be empty until the ETL runs");
    }

    let api_router = api::routes(Arc::clone(&reports));

    let addr = format!("{}:{}", settings.api.host, settings.api.port);
    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "Dashboard API server listening");
    axum::serve(listener, api_router).await?;

    Ok(())
}
