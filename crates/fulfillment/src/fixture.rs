//! Seeded café used by the engine and reporting tests.

use std::sync::Arc;

use cafe_core::{IngredientId, InMemoryDocumentStore};
use cafe_inventory::{InventoryItem, InventoryLedger};
use cafe_menu::{MenuCatalog, MenuItem, RecipeIngredient};
use cafe_orders::OrderLedger;

use crate::{FulfillmentEngine, Reporting};

pub type Store = Arc<InMemoryDocumentStore>;

pub struct Cafe {
    pub inventory_store: Store,
    pub orders_store: Store,
    pub inventory: Arc<InventoryLedger<Store>>,
    pub menu: Arc<MenuCatalog<Store>>,
    pub orders: Arc<OrderLedger<Store>>,
    pub engine: FulfillmentEngine<Store>,
    pub reporting: Reporting<Store>,
}

impl Cafe {
    pub fn with_stock(stock: &[(&str, f64)]) -> Self {
        let inventory_store: Store = Arc::new(InMemoryDocumentStore::new());
        let orders_store: Store = Arc::new(InMemoryDocumentStore::new());

        let inventory = Arc::new(InventoryLedger::open(inventory_store.clone()).unwrap());
        for (id, quantity) in stock {
            inventory
                .create(InventoryItem::new(*id, id.replace('_', " "), *quantity, "u"))
                .unwrap();
        }

        let menu = Arc::new(MenuCatalog::open(Arc::new(InMemoryDocumentStore::new())).unwrap());
        for item in menu_items() {
            menu.create(item).unwrap();
        }

        let orders = Arc::new(OrderLedger::open(orders_store.clone()).unwrap());
        let engine = FulfillmentEngine::new(orders.clone(), menu.clone(), inventory.clone());
        let reporting = Reporting::new(orders.clone(), menu.clone());

        Self {
            inventory_store,
            orders_store,
            inventory,
            menu,
            orders,
            engine,
            reporting,
        }
    }

    /// The standard starter stock.
    pub fn seeded() -> Self {
        Self::with_stock(&[
            ("espresso_shot", 500.0),
            ("milk", 5000.0),
            ("flour", 10000.0),
            ("blueberries", 2000.0),
            ("sugar", 5000.0),
        ])
    }

    pub fn stock(&self, id: &str) -> f64 {
        self.inventory
            .get_by_id(&IngredientId::new(id))
            .unwrap()
            .quantity
    }
}

pub fn menu_items() -> Vec<MenuItem> {
    vec![
        MenuItem::new(
            "latte",
            "Caffe Latte",
            "Espresso with steamed milk",
            3.5,
            vec![
                RecipeIngredient::new("espresso_shot", 1.0),
                RecipeIngredient::new("milk", 200.0),
            ],
        ),
        MenuItem::new(
            "muffin",
            "Blueberry Muffin",
            "Freshly baked muffin with blueberries",
            2.0,
            vec![
                RecipeIngredient::new("flour", 100.0),
                RecipeIngredient::new("blueberries", 20.0),
                RecipeIngredient::new("sugar", 30.0),
            ],
        ),
        MenuItem::new(
            "espresso",
            "Espresso",
            "Strong and bold coffee",
            2.5,
            vec![RecipeIngredient::new("espresso_shot", 1.0)],
        ),
    ]
}
