use std::sync::RwLockReadGuard;

use cafe_core::{DocumentStore, DomainError, DomainResult, Ledger, ProductId, Records};
use cafe_inventory::{StockDirection, StockTransaction};

use crate::item::MenuItem;

/// Name of the persisted menu collection.
pub const MENU_COLLECTION: &str = "menu_items";

/// Menu catalog: owns product definitions and translates "N units of
/// product P" into ingredient movements against the inventory.
#[derive(Debug)]
pub struct MenuCatalog<S> {
    ledger: Ledger<MenuItem, S>,
}

impl<S> MenuCatalog<S>
where
    S: DocumentStore,
{
    pub fn open(store: S) -> DomainResult<Self> {
        Ok(Self {
            ledger: Ledger::open(MENU_COLLECTION, store)?,
        })
    }

    pub fn create(&self, item: MenuItem) -> DomainResult<()> {
        item.validate()?;
        let id = item.product_id.clone();
        self.ledger.mutate(|items| items.insert(item))?;
        tracing::info!(product_id = %id, "menu item created");
        Ok(())
    }

    pub fn get_all(&self) -> DomainResult<Vec<MenuItem>> {
        self.ledger.get_all("menu")
    }

    pub fn get_by_id(&self, id: &ProductId) -> DomainResult<MenuItem> {
        self.ledger.get_by_id(id)
    }

    pub fn update(&self, item: MenuItem, id: &ProductId) -> DomainResult<()> {
        if item.product_id != *id {
            return Err(DomainError::identity_mismatch(format!(
                "path id {id} does not match product_id {}",
                item.product_id
            )));
        }
        item.validate()?;
        self.ledger.mutate(|items| items.replace(id, item))?;
        tracing::info!(product_id = %id, "menu item updated");
        Ok(())
    }

    pub fn delete(&self, id: &ProductId) -> DomainResult<()> {
        self.ledger.mutate(|items| items.remove(id))?;
        tracing::info!(product_id = %id, "menu item deleted");
        Ok(())
    }

    pub fn exists_by_id(&self, id: &ProductId) -> DomainResult<bool> {
        self.ledger.exists(id)
    }

    pub fn price_of(&self, id: &ProductId) -> DomainResult<f64> {
        self.view()?.price_of(id)
    }

    /// Hold the catalog read lock across several lookups.
    ///
    /// Order operations take one view for their whole validate+commit pass
    /// so recipes cannot change underneath them.
    pub fn view(&self) -> DomainResult<MenuView<'_>> {
        Ok(MenuView {
            items: self.ledger.read()?,
        })
    }
}

/// Read-locked snapshot of the catalog.
pub struct MenuView<'a> {
    items: RwLockReadGuard<'a, Records<MenuItem>>,
}

impl MenuView<'_> {
    pub fn exists_by_id(&self, id: &ProductId) -> bool {
        self.items.contains(id)
    }

    pub fn get(&self, id: &ProductId) -> Option<&MenuItem> {
        self.items.get(id)
    }

    pub fn price_of(&self, id: &ProductId) -> DomainResult<f64> {
        self.items
            .get(id)
            .map(|item| item.price)
            .ok_or_else(|| DomainError::not_found(id.to_string()))
    }

    /// Check every recipe ingredient of `units` × `product_id` against the
    /// transaction's speculative balances.
    ///
    /// Fails on the first ingredient that would go negative. Successful
    /// checks stay drawn in the transaction, so checking several products in
    /// one pass accounts for ingredients they share.
    pub fn validate_stock_for<S: DocumentStore>(
        &self,
        txn: &mut StockTransaction<'_, S>,
        product_id: &ProductId,
        units: f64,
    ) -> DomainResult<()> {
        let item = self
            .items
            .get(product_id)
            .ok_or_else(|| DomainError::not_found(product_id.to_string()))?;

        for line in &item.ingredients {
            if !txn.check_sufficient(&line.ingredient_id, line.quantity_per_unit * units) {
                return Err(DomainError::insufficient(format!(
                    "not enough {} for {} x {}",
                    line.ingredient_id, units, product_id
                )));
            }
        }
        Ok(())
    }

    /// Stage the recipe movements for `units` × `product_id`.
    ///
    /// `restocking` returns ingredients instead of drawing them. Products
    /// no longer on the menu have no recipe to apply and are skipped.
    pub fn apply_stock_for<S: DocumentStore>(
        &self,
        txn: &mut StockTransaction<'_, S>,
        product_id: &ProductId,
        units: f64,
        restocking: bool,
    ) {
        let Some(item) = self.items.get(product_id) else {
            tracing::warn!(product_id = %product_id, restocking, "no recipe for product; skipping stock movement");
            return;
        };

        let direction = if restocking {
            StockDirection::Restock
        } else {
            StockDirection::Consume
        };
        for line in &item.ingredients {
            txn.stage(&line.ingredient_id, line.quantity_per_unit * units, direction);
        }
    }
}
