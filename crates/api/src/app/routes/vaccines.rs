use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/vaccines", get(list_vaccines).post(create_vaccine))
        .route("/vaccines/:manufacturer", get(get_vaccine))
        .route("/vaccines/:manufacturer/stock", get(get_stock))
        .route(
            "/vaccines/:manufacturer/lots",
            get(list_vaccine_lots).post(create_lot),
        )
        .route("/vaccines/:manufacturer/withdrawals", post(withdraw))
}

pub async fn create_vaccine(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateVaccineRequest>,
) -> axum::response::Response {
    match services.create_vaccine(body.into()) {
        Ok(v) => (StatusCode::CREATED, Json(dto::vaccine_to_json(&v))).into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}

pub async fn list_vaccines(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.list_vaccines() {
        Ok(all) => {
            let body: Vec<_> = all.iter().map(dto::vaccine_to_json).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => errors::inventory_error_to_response(e),
    }
}

pub async fn get_vaccine(
    Extension(services): Extension<Arc<AppServices>>,
    Path(manufacturer): Path<String>,
) -> axum::response::Response {
    match services.find_vaccine(&manufacturer) {
        Ok(v) => (StatusCode::OK, Json(dto::vaccine_to_json(&v))).into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}

pub async fn get_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path(manufacturer): Path<String>,
    Query(query): Query<dto::StockQuery>,
) -> axum::response::Response {
    if let Err(e) = services.find_vaccine(&manufacturer) {
        return errors::inventory_error_to_response(e);
    }

    let total = match services.total_stock(&manufacturer) {
        Ok(t) => t,
        Err(e) => return errors::inventory_error_to_response(e),
    };

    let mut body = serde_json::json!({
        "manufacturer": manufacturer,
        "total_doses": total,
    });

    if let Some(requested) = query.requested {
        match services.has_sufficient_stock(&manufacturer, requested) {
            Ok(sufficient) => {
                body["requested"] = requested.into();
                body["sufficient"] = sufficient.into();
            }
            Err(e) => return errors::inventory_error_to_response(e),
        }
    }

    (StatusCode::OK, Json(body)).into_response()
}

pub async fn create_lot(
    Extension(services): Extension<Arc<AppServices>>,
    Path(manufacturer): Path<String>,
    Json(body): Json<dto::CreateLotRequest>,
) -> axum::response::Response {
    match services.create_lot(&manufacturer, body.into()) {
        Ok(lot) => (StatusCode::CREATED, Json(dto::lot_to_json(&lot))).into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}

pub async fn list_vaccine_lots(
    Extension(services): Extension<Arc<AppServices>>,
    Path(manufacturer): Path<String>,
) -> axum::response::Response {
    if let Err(e) = services.find_vaccine(&manufacturer) {
        return errors::inventory_error_to_response(e);
    }

    match services.list_lots_by_manufacturer(&manufacturer) {
        Ok(lots) => (StatusCode::OK, Json(dto::lots_to_json(&lots))).into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}

pub async fn withdraw(
    Extension(services): Extension<Arc<AppServices>>,
    Path(manufacturer): Path<String>,
    Json(body): Json<dto::WithdrawRequest>,
) -> axum::response::Response {
    match services.withdraw(&manufacturer, body.count) {
        Ok(touched) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "manufacturer": manufacturer,
                "withdrawn": body.count,
                "lots": dto::lots_to_json(&touched),
            })),
        )
            .into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}
