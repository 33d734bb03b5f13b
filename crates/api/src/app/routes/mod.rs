use axum::{routing::get, Router};

pub mod lots;
pub mod system;
pub mod vaccines;

/// Router for every endpoint.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .merge(vaccines::router())
        .merge(lots::router())
}
