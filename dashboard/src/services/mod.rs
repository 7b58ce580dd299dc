pub mod catalog;
pub mod query;
pub use catalog::QueryCatalog;
pub use query::QueryService;

use axum::{
    response::IntoResponse,
    http::StatusCode,
    Json
};
use crate::api::models::ApiResponse;

/// Error returned by API handlers, rendered as an `ApiResponse` body.
#[derive(Debug)]
pub struct AppError(pub common::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status_code = match self.0 {
            common::Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
            common::Error::QueryNotFound(_) => StatusCode::NOT_FOUND,
            common::Error::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ApiResponse::<()>::error(self.0.to_string()));
        (status_code, body).into_response()
    }
}

impl From<common::Error> for AppError {
    fn from(err: common::Error) -> Self {
        AppError(err)
    }
}
