use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use vaxreg_core::{Entity, LotId};

use crate::error::{InventoryError, InventoryResult};
use crate::vaccine::Manufacturer;

/// Descriptive data recorded when a lot is received. Opaque to allocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lot_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufactured_on: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_on: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Request to receive a new lot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LotSpec {
    pub initial_doses: i64,
    pub metadata: LotMetadata,
}

/// A received batch of doses for one vaccine type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lot {
    id: LotId,
    manufacturer: Manufacturer,
    initial_doses: u64,
    doses_remaining: u64,
    sequence: u64,
    received_at: DateTime<Utc>,
    metadata: LotMetadata,
}

impl Lot {
    /// Build a freshly received lot. `sequence` is its 1-based receipt
    /// position among the lots of the same vaccine type.
    pub fn receive(
        id: LotId,
        manufacturer: Manufacturer,
        sequence: u64,
        spec: LotSpec,
        received_at: DateTime<Utc>,
    ) -> InventoryResult<Self> {
        let initial_doses = crate::dose_count(spec.initial_doses)?;
        Ok(Self {
            id,
            manufacturer,
            initial_doses,
            doses_remaining: initial_doses,
            sequence,
            received_at,
            metadata: spec.metadata,
        })
    }

    pub fn id_typed(&self) -> LotId {
        self.id
    }

    pub fn manufacturer(&self) -> &Manufacturer {
        &self.manufacturer
    }

    pub fn initial_doses(&self) -> u64 {
        self.initial_doses
    }

    pub fn doses_remaining(&self) -> u64 {
        self.doses_remaining
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }

    pub fn metadata(&self) -> &LotMetadata {
        &self.metadata
    }

    pub fn is_depleted(&self) -> bool {
        self.doses_remaining == 0
    }

    /// Remove `doses` from this lot. Only the allocator calls this, after it
    /// has checked the lot can cover the draw.
    pub(crate) fn draw(&mut self, doses: u64) -> InventoryResult<()> {
        if doses > self.doses_remaining {
            return Err(InventoryError::InsufficientStock {
                manufacturer: self.manufacturer.to_string(),
                requested: doses,
                available: self.doses_remaining,
            });
        }
        self.doses_remaining -= doses;
        Ok(())
    }
}

impl Entity for Lot {
    type Id = LotId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
