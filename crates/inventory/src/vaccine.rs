use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vaxreg_core::Entity;

use crate::error::{InventoryError, InventoryResult};

/// Upper bound (inclusive) on the number of doses a schedule may require.
pub const MAX_REQUIRED_DOSES: i64 = 2;

/// Upper bound (inclusive) on the minimum interval between doses, in days.
pub const MAX_INTERVAL_DAYS: i64 = 90;

/// Manufacturer name: the catalog key of a vaccine type.
///
/// Keys are case-sensitive and stored exactly as given; only blank names are
/// rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manufacturer(String);

impl Manufacturer {
    pub fn parse(name: impl Into<String>) -> InventoryResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(InventoryError::invalid_request("manufacturer cannot be empty"));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Manufacturer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registration request for a new vaccine type.
///
/// Numeric fields are signed so that out-of-range input reaches validation and
/// is reported with the matching error kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaccineSpec {
    pub manufacturer: String,
    pub required_doses: i64,
    pub interval_days: i64,
    pub initial_doses: i64,
}

/// A manufacturer's vaccine product and its dosing schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaccineType {
    manufacturer: Manufacturer,
    required_doses: u8,
    interval_days: u16,
    doses_received: u64,
    registered_at: DateTime<Utc>,
}

impl VaccineType {
    /// Validate the schedule and build a new record.
    ///
    /// Range checks run interval first, then dose count, then the initial
    /// quantity. Uniqueness is the catalog's concern.
    pub fn register(
        manufacturer: Manufacturer,
        spec: &VaccineSpec,
        registered_at: DateTime<Utc>,
    ) -> InventoryResult<Self> {
        let interval_days = validate_interval_days(spec.interval_days)?;
        let required_doses = validate_required_doses(spec.required_doses)?;
        let doses_received = u64::try_from(spec.initial_doses).map_err(|_| {
            InventoryError::invalid_request(format!(
                "initial dose quantity cannot be negative (got {})",
                spec.initial_doses
            ))
        })?;

        Ok(Self {
            manufacturer,
            required_doses,
            interval_days,
            doses_received,
            registered_at,
        })
    }

    pub fn manufacturer(&self) -> &Manufacturer {
        &self.manufacturer
    }

    pub fn required_doses(&self) -> u8 {
        self.required_doses
    }

    pub fn interval_days(&self) -> u16 {
        self.interval_days
    }

    /// Doses ever received for this vaccine (registration quantity plus lots).
    ///
    /// This is a receipt counter, not stock: available stock is always summed
    /// from the lots.
    pub fn doses_received(&self) -> u64 {
        self.doses_received
    }

    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    pub fn record_receipt(&mut self, doses: u64) {
        self.doses_received = self.doses_received.saturating_add(doses);
    }
}

impl Entity for VaccineType {
    type Id = Manufacturer;

    fn id(&self) -> &Self::Id {
        &self.manufacturer
    }
}

pub fn validate_required_doses(required_doses: i64) -> InventoryResult<u8> {
    if !(0..=MAX_REQUIRED_DOSES).contains(&required_doses) {
        return Err(InventoryError::InvalidDoseCount(required_doses));
    }
    Ok(required_doses as u8)
}

pub fn validate_interval_days(interval_days: i64) -> InventoryResult<u16> {
    if !(0..=MAX_INTERVAL_DAYS).contains(&interval_days) {
        return Err(InventoryError::InvalidInterval(interval_days));
    }
    Ok(interval_days as u16)
}
