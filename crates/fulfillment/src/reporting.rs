//! Read-side aggregates over orders and menu prices.

use std::sync::Arc;

use cafe_core::{DocumentStore, DomainError, DomainResult, ProductId};
use cafe_menu::MenuCatalog;
use cafe_orders::{ORDERS_COLLECTION, OrderLedger};

pub struct Reporting<S> {
    orders: Arc<OrderLedger<S>>,
    menu: Arc<MenuCatalog<S>>,
}

impl<S> Clone for Reporting<S> {
    fn clone(&self) -> Self {
        Self {
            orders: self.orders.clone(),
            menu: self.menu.clone(),
        }
    }
}

impl<S> Reporting<S>
where
    S: DocumentStore,
{
    pub fn new(orders: Arc<OrderLedger<S>>, menu: Arc<MenuCatalog<S>>) -> Self {
        Self { orders, menu }
    }

    /// Sum of `price × quantity` over every line of every order, open or closed.
    ///
    /// Prices are read from the current menu; a line whose product is no
    /// longer on the menu fails the whole report with `NotFound`.
    pub fn total_sales(&self) -> DomainResult<f64> {
        let orders = self.orders.read()?;
        if orders.is_empty() {
            return Err(DomainError::empty_collection(ORDERS_COLLECTION));
        }
        let menu = self.menu.view()?;

        let mut total = 0.0;
        for line in orders.iter().flat_map(|order| order.items.iter()) {
            total += menu.price_of(&line.product_id)? * line.units();
        }
        Ok(total)
    }

    /// Product of the single largest order line.
    ///
    /// Ranks individual lines, not per-product totals. Ties go to the line
    /// seen first in storage order.
    pub fn most_popular_item(&self) -> DomainResult<ProductId> {
        let orders = self.orders.read()?;
        if orders.is_empty() {
            return Err(DomainError::empty_collection(ORDERS_COLLECTION));
        }

        let mut best: Option<(&ProductId, i64)> = None;
        for line in orders.iter().flat_map(|order| order.items.iter()) {
            if best.is_none_or(|(_, quantity)| line.quantity > quantity) {
                best = Some((&line.product_id, line.quantity));
            }
        }

        best.map(|(product_id, _)| product_id.clone())
            .ok_or_else(|| DomainError::empty_collection("order items"))
    }
}
