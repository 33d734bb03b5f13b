use chrono::NaiveDate;
use serde::Deserialize;

use vaxreg_inventory::{Lot, LotMetadata, LotSpec, VaccineSpec, VaccineType};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateVaccineRequest {
    pub manufacturer: String,
    pub required_doses: i64,
    pub interval_days: i64,
    #[serde(default)]
    pub initial_doses: i64,
}

impl From<CreateVaccineRequest> for VaccineSpec {
    fn from(body: CreateVaccineRequest) -> Self {
        VaccineSpec {
            manufacturer: body.manufacturer,
            required_doses: body.required_doses,
            interval_days: body.interval_days,
            initial_doses: body.initial_doses,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateLotRequest {
    pub initial_doses: i64,
    pub lot_code: Option<String>,
    pub manufactured_on: Option<NaiveDate>, // YYYY-MM-DD
    pub expires_on: Option<NaiveDate>,      // YYYY-MM-DD
    pub notes: Option<String>,
}

impl From<CreateLotRequest> for LotSpec {
    fn from(body: CreateLotRequest) -> Self {
        LotSpec {
            initial_doses: body.initial_doses,
            metadata: LotMetadata {
                lot_code: body.lot_code,
                manufactured_on: body.manufactured_on,
                expires_on: body.expires_on,
                notes: body.notes,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct WithdrawRequest {
    pub count: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct StockQuery {
    pub requested: Option<i64>,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn vaccine_to_json(v: &VaccineType) -> serde_json::Value {
    serde_json::json!({
        "manufacturer": v.manufacturer().as_str(),
        "required_doses": v.required_doses(),
        "interval_days": v.interval_days(),
        "doses_received": v.doses_received(),
        "registered_at": v.registered_at().to_rfc3339(),
    })
}

pub fn lot_to_json(lot: &Lot) -> serde_json::Value {
    let meta = lot.metadata();
    serde_json::json!({
        "id": lot.id_typed().to_string(),
        "manufacturer": lot.manufacturer().as_str(),
        "sequence": lot.sequence(),
        "initial_doses": lot.initial_doses(),
        "doses_remaining": lot.doses_remaining(),
        "received_at": lot.received_at().to_rfc3339(),
        "lot_code": meta.lot_code,
        "manufactured_on": meta.manufactured_on.map(|d| d.to_string()),
        "expires_on": meta.expires_on.map(|d| d.to_string()),
        "notes": meta.notes,
    })
}

pub fn lots_to_json(lots: &[Lot]) -> serde_json::Value {
    serde_json::Value::Array(lots.iter().map(lot_to_json).collect())
}
