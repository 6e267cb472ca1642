//! Data directory bootstrap and starter fixture.

use std::fs;
use std::path::Path;

use cafe_core::{DomainError, DomainResult, save_records};
use cafe_inventory::{INVENTORY_COLLECTION, InventoryItem};
use cafe_menu::{MENU_COLLECTION, MenuItem, RecipeIngredient};
use cafe_orders::{ORDERS_COLLECTION, Order};

use crate::store::JsonFileStore;

#[derive(Debug)]
pub struct BootstrapReport {
    pub store: JsonFileStore,
    /// Collections written from the starter fixture on this run.
    pub seeded: Vec<&'static str>,
}

/// Prepare `dir` for serving.
///
/// Creates the directory if needed and seeds every collection that has no
/// file yet. Existing collections are left alone unless `reset` is set, in
/// which case the directory is wiped first.
pub fn bootstrap(dir: &Path, reset: bool) -> DomainResult<BootstrapReport> {
    let io_err = |action: &str, e: std::io::Error| {
        DomainError::persistence(format!("{action} {}: {e}", dir.display()))
    };

    if reset && dir.exists() {
        tracing::warn!(dir = %dir.display(), "resetting data directory");
        fs::remove_dir_all(dir).map_err(|e| io_err("remove", e))?;
    }
    fs::create_dir_all(dir).map_err(|e| io_err("create", e))?;

    let store = JsonFileStore::new(dir);
    let mut seeded = Vec::new();

    if !store.exists(INVENTORY_COLLECTION) {
        save_records(&store, INVENTORY_COLLECTION, &seed_inventory())?;
        seeded.push(INVENTORY_COLLECTION);
    }
    if !store.exists(MENU_COLLECTION) {
        save_records(&store, MENU_COLLECTION, &seed_menu())?;
        seeded.push(MENU_COLLECTION);
    }
    if !store.exists(ORDERS_COLLECTION) {
        save_records::<Order, _>(&store, ORDERS_COLLECTION, &[])?;
        seeded.push(ORDERS_COLLECTION);
    }

    tracing::info!(dir = %dir.display(), seeded = ?seeded, "data directory ready");
    Ok(BootstrapReport { store, seeded })
}

pub fn seed_inventory() -> Vec<InventoryItem> {
    vec![
        InventoryItem::new("espresso_shot", "Espresso Shot", 500.0, "shots"),
        InventoryItem::new("milk", "Milk", 5000.0, "ml"),
        InventoryItem::new("flour", "Flour", 10000.0, "g"),
        InventoryItem::new("blueberries", "Blueberries", 2000.0, "g"),
        InventoryItem::new("sugar", "Sugar", 5000.0, "g"),
    ]
}

pub fn seed_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::new(
            "latte",
            "Caffe Latte",
            "Espresso with steamed milk",
            3.50,
            vec![
                RecipeIngredient::new("espresso_shot", 1.0),
                RecipeIngredient::new("milk", 200.0),
            ],
        ),
        MenuItem::new(
            "muffin",
            "Blueberry Muffin",
            "Freshly baked muffin with blueberries",
            2.00,
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
            2.50,
            vec![RecipeIngredient::new("espresso_shot", 1.0)],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use cafe_core::{DocumentStore, IngredientId};
    use cafe_inventory::InventoryLedger;
    use cafe_menu::MenuCatalog;
    use cafe_orders::OrderLedger;
    use serde_json::json;

    use super::*;

    #[test]
    fn fresh_directory_gets_the_starter_fixture() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("data");

        let report = bootstrap(&dir, false).unwrap();
        assert_eq!(
            report.seeded,
            vec![INVENTORY_COLLECTION, MENU_COLLECTION, ORDERS_COLLECTION]
        );

        let inventory = InventoryLedger::open(report.store.clone()).unwrap();
        assert_eq!(inventory.get_all().unwrap().len(), 5);
        assert_eq!(
            inventory
                .get_by_id(&IngredientId::new("milk"))
                .unwrap()
                .quantity,
            5000.0
        );
        assert_eq!(MenuCatalog::open(report.store.clone()).unwrap().get_all().unwrap().len(), 3);
        assert!(OrderLedger::open(report.store).unwrap().get_all().is_err());
    }

    #[test]
    fn existing_collections_are_kept() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("data");
        let first = bootstrap(&dir, false).unwrap();
        first.store.save(INVENTORY_COLLECTION, &json!([])).unwrap();

        let second = bootstrap(&dir, false).unwrap();
        assert!(second.seeded.is_empty());
        assert_eq!(second.store.load(INVENTORY_COLLECTION).unwrap(), Some(json!([])));
    }

    #[test]
    fn reset_wipes_and_reseeds() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("data");
        let first = bootstrap(&dir, false).unwrap();
        first.store.save(INVENTORY_COLLECTION, &json!([])).unwrap();
        fs::write(dir.join("stray.txt"), "x").unwrap();

        let second = bootstrap(&dir, true).unwrap();
        assert_eq!(second.seeded.len(), 3);
        assert!(!dir.join("stray.txt").exists());
        let inventory = InventoryLedger::open(second.store).unwrap();
        assert_eq!(inventory.get_all().unwrap().len(), 5);
    }
}
