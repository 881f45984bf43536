use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use uniformops_core::DomainError;
use uniformops_infra::StoreError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::InvalidRecord(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invalid_record", msg)
        }
        DomainError::InvalidShape(msg) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "invalid_shape", msg)
        }
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
    }
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    tracing::error!(error = %err, "school store failure");
    match err {
        StoreError::Domain(e) => domain_error_to_response(e),
        other => json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", other.to_string()),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_domain_errors_to_status_codes() {
        let cases = [
            (DomainError::invalid_record("x"), StatusCode::UNPROCESSABLE_ENTITY),
            (DomainError::invalid_shape("x"), StatusCode::UNPROCESSABLE_ENTITY),
            (DomainError::validation("x"), StatusCode::BAD_REQUEST),
            (DomainError::invalid_id("x"), StatusCode::BAD_REQUEST),
            (DomainError::not_found(), StatusCode::NOT_FOUND),
        ];
        for (err, status) in cases {
            assert_eq!(domain_error_to_response(err).status(), status);
        }
    }

    #[test]
    fn poisoned_store_is_internal_error() {
        let res = store_error_to_response(StoreError::Poisoned);
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
