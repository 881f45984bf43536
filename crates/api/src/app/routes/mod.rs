use axum::Router;

pub mod dashboard;
pub mod schools;
pub mod system;

/// Router for all dashboard endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/schools", schools::router())
        .nest("/dashboard", dashboard::router())
}
