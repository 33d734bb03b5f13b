//! Inventory error taxonomy.

use thiserror::Error;

use vaxreg_core::StoreError;

pub type InventoryResult<T> = Result<T, InventoryError>;

/// Every failure an inventory operation can report.
///
/// Domain variants are deterministic validation outcomes and are never retried.
/// `Store` wraps adapter failures so callers can tell the two apart.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    #[error("vaccine from manufacturer '{manufacturer}' is already registered")]
    DuplicateVaccine { manufacturer: String },

    #[error("required dose count {0} is outside 0..=2")]
    InvalidDoseCount(i64),

    #[error("interval between doses of {0} days is outside 0..=90")]
    InvalidInterval(i64),

    #[error("no vaccine registered for manufacturer '{manufacturer}'")]
    VaccineNotFound { manufacturer: String },

    #[error(
        "insufficient stock for '{manufacturer}': requested {requested}, available {available}"
    )]
    InsufficientStock {
        manufacturer: String,
        requested: u64,
        available: u64,
    },

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl InventoryError {
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn not_found(manufacturer: impl Into<String>) -> Self {
        Self::VaccineNotFound {
            manufacturer: manufacturer.into(),
        }
    }

    /// Short, stable identifier for the failure kind (logs, API error codes).
    pub fn code(&self) -> &'static str {
        match self {
            InventoryError::DuplicateVaccine { .. } => "duplicate_vaccine",
            InventoryError::InvalidDoseCount(_) => "invalid_dose_count",
            InventoryError::InvalidInterval(_) => "invalid_interval",
            InventoryError::VaccineNotFound { .. } => "vaccine_not_found",
            InventoryError::InsufficientStock { .. } => "insufficient_stock",
            InventoryError::InvalidRequest(_) => "invalid_request",
            InventoryError::Store(_) => "store_error",
        }
    }
}
