use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use uniformops_inventory::SchoolCriteria;

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/summary", get(get_summary))
}

/// Summary cards for the selected schools (`school`, `category`, plus the
/// inventory criteria `type`, `variantSearch`, `status`).
pub async fn get_summary(
    Extension(services): Extension<Arc<AppServices>>,
    Query(criteria): Query<SchoolCriteria>,
) -> axum::response::Response {
    match services.dashboard_summary(&criteria).await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
