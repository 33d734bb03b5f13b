use chrono::Utc;

use vaxreg_core::KeyedStore;
use vaxreg_inventory::{InventoryError, InventoryResult, Manufacturer, VaccineSpec, VaccineType};

/// Owner of vaccine-type records: registration rules and existence checks.
#[derive(Debug)]
pub struct VaccineCatalog<S> {
    store: S,
}

impl<S> VaccineCatalog<S>
where
    S: KeyedStore<VaccineType>,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Register a new vaccine type.
    ///
    /// The duplicate check runs before any range validation so a repeated
    /// registration always reports `DuplicateVaccine`.
    pub fn register(&self, spec: &VaccineSpec) -> InventoryResult<VaccineType> {
        let manufacturer = Manufacturer::parse(spec.manufacturer.clone())?;

        if self.store.find_by_id(&manufacturer)?.is_some() {
            return Err(InventoryError::DuplicateVaccine {
                manufacturer: manufacturer.to_string(),
            });
        }

        let vaccine = VaccineType::register(manufacturer, spec, Utc::now())?;
        self.store.save(vaccine.clone())?;

        tracing::info!(
            manufacturer = %vaccine.manufacturer(),
            required_doses = vaccine.required_doses(),
            interval_days = vaccine.interval_days(),
            "vaccine registered"
        );
        Ok(vaccine)
    }

    pub fn find(&self, manufacturer: &str) -> InventoryResult<VaccineType> {
        // A blank name can never have been registered.
        let key = Manufacturer::parse(manufacturer)
            .map_err(|_| InventoryError::not_found(manufacturer))?;

        self.store
            .find_by_id(&key)?
            .ok_or_else(|| InventoryError::not_found(manufacturer))
    }

    /// Every registered vaccine type, ordered by manufacturer.
    pub fn list_all(&self) -> InventoryResult<Vec<VaccineType>> {
        let mut all = self.store.find_all()?;
        all.sort_by(|a, b| a.manufacturer().cmp(b.manufacturer()));
        Ok(all)
    }

    /// Count a received lot towards the vaccine's doses-received total.
    pub fn record_receipt(&self, mut vaccine: VaccineType, doses: u64) -> InventoryResult<VaccineType> {
        vaccine.record_receipt(doses);
        self.store.save(vaccine.clone())?;
        Ok(vaccine)
    }

    /// Write back an earlier copy of a vaccine record.
    pub fn restore(&self, vaccine: VaccineType) -> InventoryResult<()> {
        self.store.save(vaccine)?;
        Ok(())
    }
}
