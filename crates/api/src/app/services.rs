//! Ledger and engine wiring shared by every handler.

use std::sync::Arc;

use cafe_core::{DocumentStore, DomainResult};
use cafe_fulfillment::{FulfillmentEngine, Reporting};
use cafe_inventory::InventoryLedger;
use cafe_menu::MenuCatalog;
use cafe_orders::OrderLedger;

/// Store handle shared by all ledgers.
pub type SharedStore = Arc<dyn DocumentStore>;

pub struct AppServices {
    pub inventory: Arc<InventoryLedger<SharedStore>>,
    pub menu: Arc<MenuCatalog<SharedStore>>,
    pub engine: FulfillmentEngine<SharedStore>,
    pub reporting: Reporting<SharedStore>,
}

impl AppServices {
    /// Load every ledger from `store`.
    pub fn open(store: SharedStore) -> DomainResult<Self> {
        let inventory = Arc::new(InventoryLedger::open(store.clone())?);
        let menu = Arc::new(MenuCatalog::open(store.clone())?);
        let orders = Arc::new(OrderLedger::open(store)?);

        Ok(Self {
            engine: FulfillmentEngine::new(orders.clone(), menu.clone(), inventory.clone()),
            reporting: Reporting::new(orders, menu.clone()),
            inventory,
            menu,
        })
    }
}
