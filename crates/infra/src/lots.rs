use chrono::Utc;

use vaxreg_core::{KeyedStore, LotId};
use vaxreg_inventory::{total_stock, InventoryResult, Lot, LotSpec, Manufacturer, VaccineType};

/// Owner of lot records and the stock queries scoped to one vaccine type.
#[derive(Debug)]
pub struct LotStore<S> {
    store: S,
}

impl<S> LotStore<S>
where
    S: KeyedStore<Lot>,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Receive a lot for an already-resolved vaccine type.
    ///
    /// Callers must hold the manufacturer's lock: the receipt sequence is
    /// derived from the lots already stored.
    pub fn create_lot(&self, vaccine: &VaccineType, spec: LotSpec) -> InventoryResult<Lot> {
        let manufacturer = vaccine.manufacturer();
        let sequence = self
            .list_by_manufacturer(manufacturer)?
            .last()
            .map(|l| l.sequence())
            .unwrap_or(0)
            + 1;

        let lot = Lot::receive(LotId::new(), manufacturer.clone(), sequence, spec, Utc::now())?;
        self.store.save(lot.clone())?;

        tracing::info!(
            manufacturer = %manufacturer,
            lot_id = %lot.id_typed(),
            sequence,
            doses = lot.initial_doses(),
            "lot received"
        );
        Ok(lot)
    }

    /// Lots of one vaccine type, oldest first.
    pub fn list_by_manufacturer(&self, manufacturer: &Manufacturer) -> InventoryResult<Vec<Lot>> {
        let mut lots: Vec<Lot> = self
            .store
            .find_all()?
            .into_iter()
            .filter(|l| l.manufacturer() == manufacturer)
            .collect();
        lots.sort_by_key(|l| (l.sequence(), l.received_at(), l.id_typed()));
        Ok(lots)
    }

    /// Every lot, grouped by manufacturer, oldest first within a group.
    pub fn list_all(&self) -> InventoryResult<Vec<Lot>> {
        let mut lots = self.store.find_all()?;
        lots.sort_by(|a, b| {
            a.manufacturer()
                .cmp(b.manufacturer())
                .then(a.sequence().cmp(&b.sequence()))
                .then(a.received_at().cmp(&b.received_at()))
                .then(a.id_typed().cmp(&b.id_typed()))
        });
        Ok(lots)
    }

    pub fn total_stock(&self, manufacturer: &Manufacturer) -> InventoryResult<u64> {
        Ok(total_stock(&self.list_by_manufacturer(manufacturer)?))
    }

    pub fn has_sufficient_stock(&self, manufacturer: &Manufacturer, requested: u64) -> InventoryResult<bool> {
        Ok(self.total_stock(manufacturer)? >= requested)
    }

    pub fn save(&self, lot: Lot) -> InventoryResult<()> {
        self.store.save(lot)?;
        Ok(())
    }
}
