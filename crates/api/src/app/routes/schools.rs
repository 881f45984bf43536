use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use uniformops_core::SchoolId;
use uniformops_inventory::FilterCriteria;

use crate::app::dto::{SchoolListing, SchoolStatus};
use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_schools))
        .route("/:id", get(get_school))
        .route("/:id/inventory", get(get_inventory))
        .route("/:id/totals", get(get_totals))
        .route("/:id/status", get(get_status))
        .route("/:id/reorder", get(get_reorder))
}

fn parse_id(id: &str) -> Result<SchoolId, axum::response::Response> {
    id.parse()
        .map_err(|_| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid school id"))
}

fn not_found() -> axum::response::Response {
    errors::json_error(StatusCode::NOT_FOUND, "not_found", "school not found")
}

pub async fn list_schools(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.schools().await {
        Ok(schools) => {
            let rows: Vec<SchoolListing> = schools.iter().map(SchoolListing::from).collect();
            (StatusCode::OK, Json(rows)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_school(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.school(id).await {
        Ok(Some(school)) => (StatusCode::OK, Json(school)).into_response(),
        Ok(None) => not_found(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_inventory(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Query(criteria): Query<FilterCriteria>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    tracing::debug!(school_id = %id, ?criteria, "filtering inventory");
    match services.filtered_inventory(id, &criteria).await {
        Ok(Some(inventory)) => (StatusCode::OK, Json(inventory)).into_response(),
        Ok(None) => not_found(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_totals(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Query(criteria): Query<FilterCriteria>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.totals(id, &criteria).await {
        Ok(Some(totals)) => (StatusCode::OK, Json(totals)).into_response(),
        Ok(None) => not_found(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_status(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.school(id).await {
        Ok(Some(school)) => (StatusCode::OK, Json(SchoolStatus::from(&school))).into_response(),
        Ok(None) => not_found(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_reorder(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_id(&id) {
        Ok(v) => v,
        Err(res) => return res,
    };

    match services.reorder(id).await {
        Ok(Some(lines)) => (StatusCode::OK, Json(lines)).into_response(),
        Ok(None) => not_found(),
        Err(e) => errors::store_error_to_response(e),
    }
}
