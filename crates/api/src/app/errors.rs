use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use vaxreg_inventory::InventoryError;

pub fn inventory_error_to_response(err: InventoryError) -> axum::response::Response {
    let status = match &err {
        InventoryError::DuplicateVaccine { .. } => StatusCode::CONFLICT,
        InventoryError::InvalidDoseCount(_)
        | InventoryError::InvalidInterval(_)
        | InventoryError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        InventoryError::VaccineNotFound { .. } => StatusCode::NOT_FOUND,
        InventoryError::InsufficientStock { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        InventoryError::Store(e) => {
            tracing::error!(error = %e, "inventory store failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    json_error(status, err.code(), err.to_string())
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
    fn domain_errors_map_to_client_statuses() {
        let cases = [
            (
                InventoryError::DuplicateVaccine {
                    manufacturer: "Acme".to_string(),
                },
                StatusCode::CONFLICT,
            ),
            (InventoryError::InvalidDoseCount(3), StatusCode::BAD_REQUEST),
            (InventoryError::InvalidInterval(91), StatusCode::BAD_REQUEST),
            (InventoryError::not_found("Ghost"), StatusCode::NOT_FOUND),
            (
                InventoryError::InsufficientStock {
                    manufacturer: "Acme".to_string(),
                    requested: 10,
                    available: 2,
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (InventoryError::invalid_request("negative"), StatusCode::BAD_REQUEST),
        ];

        for (err, status) in cases {
            assert_eq!(inventory_error_to_response(err).status(), status);
        }
    }
}
