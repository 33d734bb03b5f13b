//! Vaccine dose-inventory domain.
//!
//! This crate contains the business rules for vaccine types, received lots and
//! dose allocation, implemented purely as deterministic domain logic (no IO,
//! no HTTP, no storage). Adapters in `vaxreg-infra` persist the records and
//! serialize mutations.

pub mod allocation;
pub mod error;
pub mod lot;
pub mod vaccine;

pub use allocation::{total_stock, DoseAllocator, DoseDraw};
pub use error::{InventoryError, InventoryResult};
pub use lot::{Lot, LotMetadata, LotSpec};
pub use vaccine::{
    Manufacturer, VaccineSpec, VaccineType, MAX_INTERVAL_DAYS, MAX_REQUIRED_DOSES,
};

/// Validate a caller-supplied dose count (withdrawals, stock queries, lot sizes).
pub fn dose_count(requested: i64) -> InventoryResult<u64> {
    u64::try_from(requested).map_err(|_| {
        InventoryError::invalid_request(format!("dose count cannot be negative (got {requested})"))
    })
}
