//! `vaxreg-core`: building blocks shared by the inventory domain and its adapters.
//!
//! This crate contains **no infrastructure**: identifiers, the entity trait,
//! and the keyed-store boundary that persistence adapters implement.

pub mod entity;
pub mod error;
pub mod id;
pub mod store;

pub use entity::Entity;
pub use error::{StoreError, StoreResult};
pub use id::LotId;
pub use store::KeyedStore;
