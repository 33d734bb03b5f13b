//! Dose allocation across the lots of one vaccine type.
//!
//! Lots are drained oldest-first (by receipt sequence). A withdrawal of `n`
//! doses behaves like `n` single-dose removals, each taken from the earliest
//! lot that still has stock; the allocator computes the equivalent per-lot
//! draws in one pass.
//!
//! Sufficiency is checked against the whole lot set before any lot is
//! touched, so a failed withdrawal never leaves a partial depletion behind.

use vaxreg_core::LotId;

use crate::error::{InventoryError, InventoryResult};
use crate::lot::Lot;
use crate::vaccine::Manufacturer;

/// Doses taken from a single lot by one withdrawal.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DoseDraw {
    pub lot_id: LotId,
    pub doses: u64,
}

/// Summed doses remaining across `lots`. Never cached.
pub fn total_stock<'a>(lots: impl IntoIterator<Item = &'a Lot>) -> u64 {
    lots.into_iter()
        .fold(0u64, |acc, lot| acc.saturating_add(lot.doses_remaining()))
}

/// Oldest-lot-first, all-or-nothing dose allocator.
#[derive(Debug, Default, Copy, Clone)]
pub struct DoseAllocator;

impl DoseAllocator {
    /// Decide which lots cover `requested` doses, without mutating anything.
    ///
    /// Lots belonging to other manufacturers are ignored.
    pub fn plan(
        manufacturer: &Manufacturer,
        lots: &[Lot],
        requested: u64,
    ) -> InventoryResult<Vec<DoseDraw>> {
        Ok(draws_by_position(manufacturer, lots, requested)?
            .into_iter()
            .map(|(idx, doses)| DoseDraw {
                lot_id: lots[idx].id_typed(),
                doses,
            })
            .collect())
    }

    /// Plan and apply a withdrawal.
    ///
    /// Returns the touched lots, updated, in consumption order. On error the
    /// input lots are dropped untouched; nothing is returned for persisting.
    pub fn allocate(
        manufacturer: &Manufacturer,
        mut lots: Vec<Lot>,
        requested: u64,
    ) -> InventoryResult<Vec<Lot>> {
        let draws = draws_by_position(manufacturer, &lots, requested)?;

        let mut touched = Vec::with_capacity(draws.len());
        for (idx, doses) in draws {
            lots[idx].draw(doses)?;
            touched.push(lots[idx].clone());
        }

        Ok(touched)
    }
}

/// `(index into lots, doses)` pairs in consumption order. Indices are the
/// only handle on a lot here, so the apply step cannot miss or alias one.
fn draws_by_position(
    manufacturer: &Manufacturer,
    lots: &[Lot],
    requested: u64,
) -> InventoryResult<Vec<(usize, u64)>> {
    if requested == 0 {
        return Ok(Vec::new());
    }

    let ordered = in_receipt_order(manufacturer, lots);
    let available = total_stock(ordered.iter().map(|&idx| &lots[idx]));
    if available < requested {
        return Err(InventoryError::InsufficientStock {
            manufacturer: manufacturer.to_string(),
            requested,
            available,
        });
    }

    let mut left = requested;
    let mut draws = Vec::new();
    for idx in ordered {
        if left == 0 {
            break;
        }
        let take = lots[idx].doses_remaining().min(left);
        if take == 0 {
            continue;
        }
        draws.push((idx, take));
        left -= take;
    }

    Ok(draws)
}

fn in_receipt_order(manufacturer: &Manufacturer, lots: &[Lot]) -> Vec<usize> {
    let mut ordered: Vec<usize> = (0..lots.len())
        .filter(|&idx| lots[idx].manufacturer() == manufacturer)
        .collect();
    ordered.sort_by_key(|&idx| {
        let lot = &lots[idx];
        (lot.sequence(), lot.received_at(), lot.id_typed())
    });
    ordered
}
