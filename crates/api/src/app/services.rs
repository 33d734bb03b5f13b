use vaxreg_infra::InMemoryInventory;

/// Services shared by every handler.
///
/// Facade calls are synchronous and take std `Mutex`/`RwLock` guards, so
/// handlers call them inline on the tokio worker. That holds for the
/// in-memory stores only: a store that does blocking I/O must be driven
/// through `tokio::task::spawn_blocking` instead.
pub type AppServices = InMemoryInventory;

/// In-memory wiring (dev/test). A persistent deployment swaps the stores
/// behind `InventoryFacade` without touching the handlers' contract.
pub fn build_services() -> AppServices {
    tracing::info!("using in-memory vaccine and lot stores");
    InMemoryInventory::in_memory()
}
