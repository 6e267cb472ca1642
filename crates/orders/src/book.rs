//! Write session over the order ledger.

use std::sync::RwLockWriteGuard;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

use cafe_core::{DocumentStore, DomainError, DomainResult, Ledger, OrderId, Records};

use crate::order::{Order, OrderLine, OrderStatus};

/// Holds the order write lock until dropped.
///
/// The fulfillment engine keeps one book open across a whole
/// stock-check/commit pass so no other order mutation can interleave.
pub struct OrderBook<'a, S: DocumentStore> {
    ledger: &'a Ledger<Order, S>,
    orders: RwLockWriteGuard<'a, Records<Order>>,
    next_sequence: &'a AtomicU64,
}

impl<'a, S> OrderBook<'a, S>
where
    S: DocumentStore,
{
    pub(crate) fn new(
        ledger: &'a Ledger<Order, S>,
        orders: RwLockWriteGuard<'a, Records<Order>>,
        next_sequence: &'a AtomicU64,
    ) -> Self {
        Self {
            ledger,
            orders,
            next_sequence,
        }
    }

    pub fn get(&self, id: &OrderId) -> DomainResult<&Order> {
        self.orders
            .get(id)
            .ok_or_else(|| DomainError::not_found(id.to_string()))
    }

    /// Record a new open order under the next `order<N>` id.
    pub fn create(&mut self, customer_name: String, items: Vec<OrderLine>) -> DomainResult<Order> {
        let sequence = self.next_sequence.load(Ordering::SeqCst);
        let order = Order {
            order_id: OrderId::from_sequence(sequence),
            customer_name,
            items,
            status: OrderStatus::Open,
            created_at: Utc::now(),
        };

        let stored = order.clone();
        self.ledger
            .mutate_locked(&mut self.orders, |orders| orders.insert(stored))?;
        // Only a persisted order consumes its sequence number.
        self.next_sequence.store(sequence + 1, Ordering::SeqCst);
        Ok(order)
    }

    /// Replace the lines of order `id`, refreshing its timestamp.
    ///
    /// Id, customer and status are kept as stored.
    pub fn replace_items(&mut self, id: &OrderId, items: Vec<OrderLine>) -> DomainResult<Order> {
        let mut order = self.get(id)?.clone();
        order.items = items;
        order.created_at = Utc::now();

        let stored = order.clone();
        self.ledger
            .mutate_locked(&mut self.orders, |orders| orders.replace(id, stored))?;
        Ok(order)
    }

    pub fn remove(&mut self, id: &OrderId) -> DomainResult<Order> {
        self.ledger
            .mutate_locked(&mut self.orders, |orders| orders.remove(id))
    }

    /// Open → Closed.
    pub fn close(&mut self, id: &OrderId) -> DomainResult<()> {
        if self.get(id)?.status.is_closed() {
            return Err(DomainError::already_closed(id.to_string()));
        }
        self.ledger.mutate_locked(&mut self.orders, |orders| {
            if let Some(order) = orders.get_mut(id) {
                order.status = OrderStatus::Closed;
            }
            Ok(())
        })
    }
}
