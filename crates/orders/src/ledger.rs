use std::sync::RwLockReadGuard;
use std::sync::atomic::AtomicU64;

use cafe_core::{DocumentStore, DomainError, DomainResult, Ledger, OrderId, Records};

use crate::book::OrderBook;
use crate::order::{Order, OrderLine};

/// Name of the persisted order collection.
pub const ORDERS_COLLECTION: &str = "orders";

/// Order ledger: owns order records and hands out order ids.
///
/// Ids continue from the highest `order<N>` found in storage, so a restart
/// never reissues an id that is already persisted.
#[derive(Debug)]
pub struct OrderLedger<S> {
    ledger: Ledger<Order, S>,
    next_sequence: AtomicU64,
}

impl<S> OrderLedger<S>
where
    S: DocumentStore,
{
    pub fn open(store: S) -> DomainResult<Self> {
        let ledger: Ledger<Order, S> = Ledger::open(ORDERS_COLLECTION, store)?;
        let highest = ledger
            .read()?
            .iter()
            .filter_map(|order| order.order_id.sequence())
            .max()
            .unwrap_or(0);

        tracing::debug!(next = highest + 1, "order sequence restored");
        Ok(Self {
            ledger,
            next_sequence: AtomicU64::new(highest + 1),
        })
    }

    /// Take the order write lock for a multi-step mutation.
    pub fn book(&self) -> DomainResult<OrderBook<'_, S>> {
        Ok(OrderBook::new(
            &self.ledger,
            self.ledger.write()?,
            &self.next_sequence,
        ))
    }

    /// Shared read access for reports.
    pub fn read(&self) -> DomainResult<RwLockReadGuard<'_, Records<Order>>> {
        self.ledger.read()
    }

    pub fn create(&self, customer_name: String, items: Vec<OrderLine>) -> DomainResult<Order> {
        self.book()?.create(customer_name, items)
    }

    pub fn get_all(&self) -> DomainResult<Vec<Order>> {
        self.ledger.get_all(ORDERS_COLLECTION)
    }

    pub fn get_by_id(&self, id: &OrderId) -> DomainResult<Order> {
        if id.is_blank() {
            return Err(DomainError::malformed("order id cannot be empty"));
        }
        self.ledger.get_by_id(id)
    }

    pub fn update(&self, id: &OrderId, items: Vec<OrderLine>) -> DomainResult<Order> {
        self.book()?.replace_items(id, items)
    }

    pub fn delete(&self, id: &OrderId) -> DomainResult<Order> {
        self.book()?.remove(id)
    }

    /// Close order `id`. Fails `NotFound` or `AlreadyClosed`.
    pub fn update_status(&self, id: &OrderId) -> DomainResult<()> {
        self.book()?.close(id)
    }
}
