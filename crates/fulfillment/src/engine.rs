//! Check-then-commit order fulfillment.
//!
//! Every mutating call runs as one pass:
//!
//! 1. take the order write lock (`OrderBook`), a menu view and an inventory
//!    `StockTransaction`, in that order;
//! 2. stage restocks for lines being given back and check every new line
//!    against the speculative balances;
//! 3. commit the stock journal in one write;
//! 4. write the order record, reverting the committed stock if that fails.
//!
//! Nothing reaches durable state unless every check passed, so a rejected
//! call leaves inventory exactly as it found it.

use std::sync::Arc;

use cafe_core::{DocumentStore, DomainError, DomainResult, OrderId};
use cafe_inventory::{InventoryLedger, StockReceipt, StockTransaction};
use cafe_menu::{MenuCatalog, MenuView};
use cafe_orders::{Order, OrderLedger, OrderLine, OrderRequest};

pub struct FulfillmentEngine<S> {
    orders: Arc<OrderLedger<S>>,
    menu: Arc<MenuCatalog<S>>,
    inventory: Arc<InventoryLedger<S>>,
}

impl<S> Clone for FulfillmentEngine<S> {
    fn clone(&self) -> Self {
        Self {
            orders: self.orders.clone(),
            menu: self.menu.clone(),
            inventory: self.inventory.clone(),
        }
    }
}

impl<S> FulfillmentEngine<S>
where
    S: DocumentStore,
{
    pub fn new(
        orders: Arc<OrderLedger<S>>,
        menu: Arc<MenuCatalog<S>>,
        inventory: Arc<InventoryLedger<S>>,
    ) -> Self {
        Self {
            orders,
            menu,
            inventory,
        }
    }

    /// Place a new order, drawing its ingredients from stock.
    pub fn create(&self, request: OrderRequest) -> DomainResult<Order> {
        request.check_new()?;

        let mut book = self.orders.book()?;
        let menu = self.menu.view()?;
        let mut txn = self.inventory.begin()?;

        ensure_on_menu(&menu, &request.items)?;
        consume(&menu, &mut txn, &request.items)?;
        let receipt = txn.commit()?;

        let order = book
            .create(request.customer_name, request.items)
            .or_else(|e| undo(receipt, e))?;
        tracing::info!(order_id = %order.order_id, lines = order.items.len(), "order created");
        Ok(order)
    }

    /// Replace the lines of an open order.
    ///
    /// The old lines are given back and the new lines drawn in the same
    /// stock transaction, so the new lines are checked against stock that
    /// already includes what the old lines return.
    pub fn update(&self, id: &OrderId, request: OrderRequest) -> DomainResult<Order> {
        request.check_update(id)?;

        let mut book = self.orders.book()?;
        let existing = book.get(id)?.clone();
        if existing.status.is_closed() {
            return Err(DomainError::already_closed(id.to_string()));
        }
        if existing.customer_name != request.customer_name {
            return Err(DomainError::customer_name_immutable(id.to_string()));
        }

        let menu = self.menu.view()?;
        let mut txn = self.inventory.begin()?;
        restock(&menu, &mut txn, &existing.items);

        request.validate_lines()?;
        ensure_on_menu(&menu, &request.items)?;
        consume(&menu, &mut txn, &request.items)?;
        let receipt = txn.commit()?;

        let order = book
            .replace_items(id, request.items)
            .or_else(|e| undo(receipt, e))?;
        tracing::info!(order_id = %id, lines = order.items.len(), "order updated");
        Ok(order)
    }

    /// Delete an open order and give its ingredients back.
    pub fn delete(&self, id: &OrderId) -> DomainResult<()> {
        let mut book = self.orders.book()?;
        let existing = book.get(id)?;
        if existing.status.is_closed() {
            return Err(DomainError::cannot_delete_closed(id.to_string()));
        }
        let lines = existing.items.clone();

        let menu = self.menu.view()?;
        let mut txn = self.inventory.begin()?;
        restock(&menu, &mut txn, &lines);
        let receipt = txn.commit()?;

        book.remove(id).or_else(|e| undo(receipt, e))?;
        tracing::info!(order_id = %id, "order deleted");
        Ok(())
    }

    /// Close an order. Stock was settled when the order was placed.
    pub fn close(&self, id: &OrderId) -> DomainResult<()> {
        self.orders.update_status(id)?;
        tracing::info!(order_id = %id, "order closed");
        Ok(())
    }

    pub fn get_all(&self) -> DomainResult<Vec<Order>> {
        self.orders.get_all()
    }

    pub fn get_by_id(&self, id: &OrderId) -> DomainResult<Order> {
        self.orders.get_by_id(id)
    }
}

fn ensure_on_menu(menu: &MenuView<'_>, lines: &[OrderLine]) -> DomainResult<()> {
    match lines.iter().find(|line| !menu.exists_by_id(&line.product_id)) {
        Some(line) => Err(DomainError::not_found(line.product_id.to_string())),
        None => Ok(()),
    }
}

/// Check every line, then stage every line. Nothing is staged if any check fails.
fn consume<S: DocumentStore>(
    menu: &MenuView<'_>,
    txn: &mut StockTransaction<'_, S>,
    lines: &[OrderLine],
) -> DomainResult<()> {
    for line in lines {
        if let Err(e) = menu.validate_stock_for(txn, &line.product_id, line.units()) {
            tracing::warn!(product_id = %line.product_id, quantity = line.quantity, error = %e, "stock check rejected order");
            return Err(e);
        }
    }
    for line in lines {
        menu.apply_stock_for(txn, &line.product_id, line.units(), false);
    }
    Ok(())
}

fn restock<S: DocumentStore>(
    menu: &MenuView<'_>,
    txn: &mut StockTransaction<'_, S>,
    lines: &[OrderLine],
) {
    for line in lines {
        menu.apply_stock_for(txn, &line.product_id, line.units(), true);
    }
}

/// Roll back committed stock after the order write failed, then report the
/// order write error.
fn undo<S: DocumentStore, T>(receipt: StockReceipt<'_, S>, error: DomainError) -> DomainResult<T> {
    tracing::warn!(error = %error, movements = receipt.journal().len(), "order write failed; reverting stock");
    if let Err(revert) = receipt.revert() {
        tracing::error!(error = %revert, "stock revert failed; inventory and orders disagree");
    }
    Err(error)
}
