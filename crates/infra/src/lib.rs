//! Infrastructure layer: store adapters and the inventory services that
//! compose them.
//!
//! - `store`: keyed-store adapters (in-memory for dev/test)
//! - `locks`: per-manufacturer mutual exclusion for mutating operations
//! - `catalog` / `lots`: record ownership and creation rules
//! - `facade`: the operations exposed to callers (HTTP layer, tests)

pub mod catalog;
pub mod facade;
pub mod locks;
pub mod lots;
pub mod store;


pub use catalog::VaccineCatalog;
pub use facade::{InMemoryInventory, InventoryFacade};
pub use locks::KeyLocks;
pub use lots::LotStore;
pub use store::InMemoryStore;
