//! Inventory operations exposed to external callers.
//!
//! The facade composes the catalog, the lot store and the allocator, and runs
//! every mutation under the manufacturer's lock:
//!
//! ```text
//! withdraw(manufacturer, n)
//!   ↓ lock(manufacturer)
//!   ↓ catalog.find            -> VaccineNotFound
//!   ↓ lots.list_by_manufacturer
//!   ↓ DoseAllocator::allocate -> InvalidRequest / InsufficientStock (nothing written)
//!   ↓ lots.save(touched)      -> Store (already-written lots are reverted)
//! ```
//!
//! Reads take no key lock and see the latest committed state.

use vaxreg_core::KeyedStore;
use vaxreg_inventory::{
    dose_count, DoseAllocator, InventoryResult, Lot, LotSpec, Manufacturer, VaccineSpec,
    VaccineType,
};

use crate::catalog::VaccineCatalog;
use crate::locks::KeyLocks;
use crate::lots::LotStore;
use crate::store::InMemoryStore;

#[derive(Debug)]
pub struct InventoryFacade<V, L> {
    catalog: VaccineCatalog<V>,
    lots: LotStore<L>,
    locks: KeyLocks,
}

/// Facade wired to in-memory stores (dev/test).
pub type InMemoryInventory = InventoryFacade<InMemoryStore<VaccineType>, InMemoryStore<Lot>>;

impl InMemoryInventory {
    pub fn in_memory() -> Self {
        Self::new(InMemoryStore::new(), InMemoryStore::new())
    }
}

impl<V, L> InventoryFacade<V, L>
where
    V: KeyedStore<VaccineType>,
    L: KeyedStore<Lot>,
{
    pub fn new(vaccines: V, lots: L) -> Self {
        Self {
            catalog: VaccineCatalog::new(vaccines),
            lots: LotStore::new(lots),
            locks: KeyLocks::new(),
        }
    }

    pub fn create_vaccine(&self, spec: VaccineSpec) -> InventoryResult<VaccineType> {
        self.locks
            .with_key(&spec.manufacturer, || self.catalog.register(&spec))
            .inspect_err(|e| {
                tracing::warn!(manufacturer = %spec.manufacturer, error = %e, "vaccine registration rejected")
            })
    }

    /// Receive a lot for `manufacturer`.
    ///
    /// The receipt is counted on the vaccine record first; if storing the lot
    /// then fails, the previous vaccine record is written back so neither
    /// record reflects the lot.
    pub fn create_lot(&self, manufacturer: &str, spec: LotSpec) -> InventoryResult<Lot> {
        self.locks.with_key(manufacturer, || -> InventoryResult<Lot> {
            let vaccine = self.catalog.find(manufacturer)?;
            let doses = dose_count(spec.initial_doses)?;

            let previous = vaccine.clone();
            self.catalog.record_receipt(vaccine, doses)?;

            self.lots.create_lot(&previous, spec).inspect_err(|e| {
                if let Err(undo) = self.catalog.restore(previous.clone()) {
                    tracing::error!(
                        manufacturer = %previous.manufacturer(),
                        error = %e,
                        undo_error = %undo,
                        "lot receipt could not be reverted"
                    );
                }
            })
        })
    }

    /// Withdraw `count` doses from the oldest lots of `manufacturer`.
    ///
    /// All-or-nothing: domain failures are detected before any write, and a
    /// store failure while saving the touched lots re-saves the prior state of
    /// the lots already written before the error is returned.
    pub fn withdraw(&self, manufacturer: &str, count: i64) -> InventoryResult<Vec<Lot>> {
        self.locks.with_key(manufacturer, || -> InventoryResult<Vec<Lot>> {
            let vaccine = self.catalog.find(manufacturer)?;
            let requested = dose_count(count)?;
            let key = vaccine.manufacturer();

            let lots = self.lots.list_by_manufacturer(key)?;
            let before = lots.clone();
            let touched = DoseAllocator::allocate(key, lots, requested).inspect_err(|e| {
                tracing::warn!(manufacturer = %key, requested, error = %e, "withdrawal rejected")
            })?;

            for (written, lot) in touched.iter().enumerate() {
                if let Err(e) = self.lots.save(lot.clone()) {
                    tracing::warn!(manufacturer = %key, requested, error = %e, "withdrawal save failed");
                    self.revert_lots(key, &before, &touched[..written]);
                    return Err(e);
                }
            }

            tracing::info!(
                manufacturer = %key,
                requested,
                lots_touched = touched.len(),
                "doses withdrawn"
            );
            Ok(touched)
        })
    }

    /// Write back the pre-withdrawal copy of every lot in `written`.
    fn revert_lots(&self, manufacturer: &Manufacturer, before: &[Lot], written: &[Lot]) {
        for lot in written {
            let Some(original) = before.iter().find(|o| o.id_typed() == lot.id_typed()) else {
                continue;
            };
            if let Err(e) = self.lots.save(original.clone()) {
                tracing::error!(
                    manufacturer = %manufacturer,
                    lot_id = %lot.id_typed(),
                    error = %e,
                    "lot could not be reverted after failed withdrawal"
                );
            }
        }
    }

    /// Number of manufacturer keys with a mutation in flight.
    pub fn keys_in_flight(&self) -> usize {
        self.locks.len()
    }

    pub fn find_vaccine(&self, manufacturer: &str) -> InventoryResult<VaccineType> {
        self.catalog.find(manufacturer)
    }

    pub fn list_vaccines(&self) -> InventoryResult<Vec<VaccineType>> {
        self.catalog.list_all()
    }

    pub fn list_lots(&self) -> InventoryResult<Vec<Lot>> {
        self.lots.list_all()
    }

    /// Lots of one manufacturer, oldest first. Unknown or blank names yield
    /// an empty list.
    pub fn list_lots_by_manufacturer(&self, manufacturer: &str) -> InventoryResult<Vec<Lot>> {
        match Manufacturer::parse(manufacturer) {
            Ok(key) => self.lots.list_by_manufacturer(&key),
            Err(_) => Ok(Vec::new()),
        }
    }

    pub fn total_stock(&self, manufacturer: &str) -> InventoryResult<u64> {
        let total = match Manufacturer::parse(manufacturer) {
            Ok(key) => self.lots.total_stock(&key)?,
            Err(_) => 0,
        };
        tracing::debug!(manufacturer, total, "stock queried");
        Ok(total)
    }

    pub fn has_sufficient_stock(&self, manufacturer: &str, requested: i64) -> InventoryResult<bool> {
        let requested = dose_count(requested)?;
        match Manufacturer::parse(manufacturer) {
            Ok(key) => self.lots.has_sufficient_stock(&key, requested),
            Err(_) => Ok(requested == 0),
        }
    }
}
