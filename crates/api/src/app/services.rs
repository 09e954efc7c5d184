use std::sync::Arc;

use stockpilot_store::{
    ConsumptionLedger, InMemoryConsumptionStore, InMemoryItemStore, ItemRegistry, RestockPredictor,
};

type SharedItems = Arc<InMemoryItemStore>;
type SharedEvents = Arc<InMemoryConsumptionStore>;

/// Wired service layer shared by all handlers.
///
/// Registry, ledger, and predictor all operate on the same two shared stores,
/// so reads observe exactly what the mutation paths committed.
#[derive(Clone)]
pub struct AppServices {
    pub registry: ItemRegistry<SharedItems>,
    pub ledger: ConsumptionLedger<SharedItems, SharedEvents>,
    pub predictor: RestockPredictor<SharedItems, SharedEvents>,
}

pub fn build_services() -> AppServices {
    let items: SharedItems = Arc::new(InMemoryItemStore::new());
    let events: SharedEvents = Arc::new(InMemoryConsumptionStore::new());

    let registry = ItemRegistry::new(Arc::clone(&items));

    AppServices {
        registry: registry.clone(),
        ledger: ConsumptionLedger::new(registry, Arc::clone(&events)),
        predictor: RestockPredictor::new(items, events),
    }
}
