use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/lots", get(list_lots))
}

pub async fn list_lots(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.list_lots() {
        Ok(lots) => (StatusCode::OK, Json(dto::lots_to_json(&lots))).into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}
