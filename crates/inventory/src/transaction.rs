//! Check-then-commit stock transactions.
//!
//! A `StockTransaction` holds the inventory write lock for its whole life.
//! Checks run against speculative balances (durable quantity, plus staged
//! restocks, minus what earlier checks in the same pass already drew).
//! Staged movements only reach durable state in `commit`, which applies the
//! whole journal at once and persists a single time.

use std::collections::HashMap;
use std::sync::RwLockWriteGuard;

use cafe_core::{DocumentStore, DomainError, DomainResult, IngredientId, Ledger, Records};

use crate::item::InventoryItem;

/// Tolerance for float drift when comparing balances against zero.
pub const STOCK_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockDirection {
    /// Decrement stock (an order draws ingredients).
    Consume,
    /// Increment stock (a previous draw is returned).
    Restock,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StockMovement {
    pub ingredient_id: IngredientId,
    pub amount: f64,
    pub direction: StockDirection,
}

impl StockMovement {
    fn signed_amount(&self) -> f64 {
        match self.direction {
            StockDirection::Consume => -self.amount,
            StockDirection::Restock => self.amount,
        }
    }
}

pub struct StockTransaction<'a, S: DocumentStore> {
    ledger: &'a Ledger<InventoryItem, S>,
    items: RwLockWriteGuard<'a, Records<InventoryItem>>,
    credits: HashMap<IngredientId, f64>,
    drawn: HashMap<IngredientId, f64>,
    journal: Vec<StockMovement>,
}

impl<'a, S> StockTransaction<'a, S>
where
    S: DocumentStore,
{
    pub(crate) fn new(
        ledger: &'a Ledger<InventoryItem, S>,
        items: RwLockWriteGuard<'a, Records<InventoryItem>>,
    ) -> Self {
        Self {
            ledger,
            items,
            credits: HashMap::new(),
            drawn: HashMap::new(),
            journal: Vec::new(),
        }
    }

    /// Speculative balance of one ingredient, or `None` if it is not stocked.
    pub fn available(&self, id: &IngredientId) -> Option<f64> {
        let durable = self.items.get(id)?.quantity;
        let credit = self.credits.get(id).copied().unwrap_or(0.0);
        let drawn = self.drawn.get(id).copied().unwrap_or(0.0);
        Some(durable + credit - drawn)
    }

    /// Would drawing `amount` of `id` keep the speculative balance at or above zero?
    ///
    /// A successful check draws `amount` from the speculative balance so the
    /// next check in the same pass sees it. A failed check discards every
    /// speculative draw, so the next validation pass starts from durable
    /// state plus staged restocks. Unknown ingredients are never sufficient.
    pub fn check_sufficient(&mut self, id: &IngredientId, amount: f64) -> bool {
        let sufficient = match self.available(id) {
            Some(balance) => balance - amount >= -STOCK_EPSILON,
            None => false,
        };

        if sufficient {
            *self.drawn.entry(id.clone()).or_insert(0.0) += amount;
        } else {
            tracing::debug!(ingredient_id = %id, amount, "stock check failed");
            self.drawn.clear();
        }
        sufficient
    }

    /// Record a movement to apply on commit.
    ///
    /// Restocks immediately raise the speculative balance seen by later
    /// checks. Consumption is expected to have been checked already.
    pub fn stage(&mut self, id: &IngredientId, amount: f64, direction: StockDirection) {
        if direction == StockDirection::Restock {
            *self.credits.entry(id.clone()).or_insert(0.0) += amount;
        }
        self.journal.push(StockMovement {
            ingredient_id: id.clone(),
            amount,
            direction,
        });
    }

    pub fn journal(&self) -> &[StockMovement] {
        &self.journal
    }

    /// Apply every staged movement and persist once.
    ///
    /// Nothing is applied if any ingredient would end below zero. If the
    /// write fails, in-memory stock is restored. Movements against
    /// ingredients that no longer exist are skipped.
    pub fn commit(self) -> DomainResult<StockReceipt<'a, S>> {
        let Self {
            ledger,
            mut items,
            journal,
            ..
        } = self;

        let mut next: HashMap<IngredientId, f64> = HashMap::new();
        for movement in &journal {
            let Some(item) = items.get(&movement.ingredient_id) else {
                tracing::warn!(
                    ingredient_id = %movement.ingredient_id,
                    "skipping stock movement for unknown ingredient"
                );
                continue;
            };
            *next
                .entry(movement.ingredient_id.clone())
                .or_insert(item.quantity) += movement.signed_amount();
        }

        if let Some((id, _)) = next.iter().find(|(_, q)| **q < -STOCK_EPSILON) {
            return Err(DomainError::insufficient(format!(
                "{id} would drop below zero"
            )));
        }

        let backup = (*items).clone();
        for (id, quantity) in next {
            if let Some(item) = items.get_mut(&id) {
                item.quantity = quantity.max(0.0);
            }
        }

        if let Err(e) = ledger.persist(&items) {
            *items = backup;
            return Err(e);
        }

        Ok(StockReceipt {
            ledger,
            items,
            backup,
            journal,
        })
    }
}

/// Proof of a committed stock transaction.
///
/// Keeps the inventory write lock until dropped so a caller can make a
/// dependent write (e.g. the order record) and revert the stock if that
/// write fails.
pub struct StockReceipt<'a, S: DocumentStore> {
    ledger: &'a Ledger<InventoryItem, S>,
    items: RwLockWriteGuard<'a, Records<InventoryItem>>,
    backup: Records<InventoryItem>,
    journal: Vec<StockMovement>,
}

impl<S> StockReceipt<'_, S>
where
    S: DocumentStore,
{
    pub fn journal(&self) -> &[StockMovement] {
        &self.journal
    }

    /// Restore stock to its state before the commit, in memory and on disk.
    pub fn revert(mut self) -> DomainResult<()> {
        let committed = std::mem::replace(&mut *self.items, self.backup.clone());
        if let Err(e) = self.ledger.persist(&self.items) {
            // Keep memory in line with what is on disk.
            *self.items = committed;
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cafe_core::InMemoryDocumentStore;

    use crate::ledger::InventoryLedger;

    use super::*;

    fn ledger_with(items: &[(&str, f64)]) -> (Arc<InMemoryDocumentStore>, InventoryLedger<Arc<InMemoryDocumentStore>>) {
        let store = Arc::new(InMemoryDocumentStore::new());
        let ledger = InventoryLedger::open(store.clone()).unwrap();
        for (id, q) in items {
            ledger
                .create(InventoryItem::new(*id, id.to_uppercase(), *q, "u"))
                .unwrap();
        }
        (store, ledger)
    }

    fn id(s: &str) -> IngredientId {
        IngredientId::new(s)
    }

    #[test]
    fn checks_drain_the_speculative_balance_within_one_pass() {
        let (_store, ledger) = ledger_with(&[("espresso_shot", 3.0)]);
        let mut txn = ledger.begin().unwrap();

        assert!(txn.check_sufficient(&id("espresso_shot"), 2.0));
        assert_eq!(txn.available(&id("espresso_shot")), Some(1.0));
        assert!(!txn.check_sufficient(&id("espresso_shot"), 2.0));
    }

    #[test]
    fn failed_check_resets_speculative_balance() {
        let (_store, ledger) = ledger_with(&[("milk", 500.0)]);
        let mut txn = ledger.begin().unwrap();

        assert!(txn.check_sufficient(&id("milk"), 400.0));
        assert!(!txn.check_sufficient(&id("milk"), 400.0));
        assert_eq!(txn.available(&id("milk")), Some(500.0));
        assert!(txn.check_sufficient(&id("milk"), 400.0));
    }

    #[test]
    fn unknown_ingredient_is_never_sufficient() {
        let (_store, ledger) = ledger_with(&[]);
        let mut txn = ledger.begin().unwrap();
        assert!(!txn.check_sufficient(&id("saffron"), 0.1));
    }

    #[test]
    fn staged_restock_is_visible_to_later_checks() {
        let (_store, ledger) = ledger_with(&[("sugar", 10.0)]);
        let mut txn = ledger.begin().unwrap();

        txn.stage(&id("sugar"), 30.0, StockDirection::Restock);
        assert!(txn.check_sufficient(&id("sugar"), 40.0));
    }

    #[test]
    fn dropping_a_transaction_leaves_stock_untouched() {
        let (_store, ledger) = ledger_with(&[("flour", 100.0)]);
        {
            let mut txn = ledger.begin().unwrap();
            assert!(txn.check_sufficient(&id("flour"), 100.0));
            txn.stage(&id("flour"), 100.0, StockDirection::Consume);
        }
        assert_eq!(ledger.get_by_id(&id("flour")).unwrap().quantity, 100.0);
    }

    #[test]
    fn commit_applies_the_whole_journal() {
        let (store, ledger) = ledger_with(&[("espresso_shot", 500.0), ("milk", 5000.0)]);
        let mut txn = ledger.begin().unwrap();
        txn.stage(&id("espresso_shot"), 1.0, StockDirection::Consume);
        txn.stage(&id("milk"), 200.0, StockDirection::Consume);
        let receipt = txn.commit().unwrap();
        assert_eq!(receipt.journal().len(), 2);
        drop(receipt);

        assert_eq!(ledger.get_by_id(&id("espresso_shot")).unwrap().quantity, 499.0);
        assert_eq!(ledger.get_by_id(&id("milk")).unwrap().quantity, 4800.0);

        let reopened = InventoryLedger::open(store).unwrap();
        assert_eq!(reopened.get_by_id(&id("milk")).unwrap().quantity, 4800.0);
    }

    #[test]
    fn commit_refuses_to_go_negative() {
        let (_store, ledger) = ledger_with(&[("blueberries", 10.0)]);
        let mut txn = ledger.begin().unwrap();
        txn.stage(&id("blueberries"), 11.0, StockDirection::Consume);

        let err = txn.commit().err().unwrap();
        assert!(matches!(err, DomainError::InsufficientIngredients(_)));
        assert_eq!(ledger.get_by_id(&id("blueberries")).unwrap().quantity, 10.0);
    }

    #[test]
    fn commit_restores_stock_when_the_write_fails() {
        let (store, ledger) = ledger_with(&[("milk", 1000.0)]);
        store.fail_writes(true);

        let mut txn = ledger.begin().unwrap();
        txn.stage(&id("milk"), 200.0, StockDirection::Consume);
        let err = txn.commit().err().unwrap();

        assert!(matches!(err, DomainError::Persistence(_)));
        assert_eq!(ledger.get_by_id(&id("milk")).unwrap().quantity, 1000.0);
    }

    #[test]
    fn receipt_revert_undoes_a_committed_transaction() {
        let (store, ledger) = ledger_with(&[("milk", 1000.0)]);
        let mut txn = ledger.begin().unwrap();
        txn.stage(&id("milk"), 200.0, StockDirection::Consume);
        txn.commit().unwrap().revert().unwrap();

        assert_eq!(ledger.get_by_id(&id("milk")).unwrap().quantity, 1000.0);
        let reopened = InventoryLedger::open(store).unwrap();
        assert_eq!(reopened.get_by_id(&id("milk")).unwrap().quantity, 1000.0);
    }

    #[test]
    fn movements_for_deleted_ingredients_are_skipped() {
        let (_store, ledger) = ledger_with(&[("milk", 10.0)]);
        let mut txn = ledger.begin().unwrap();
        txn.stage(&id("ghost"), 5.0, StockDirection::Restock);
        txn.stage(&id("milk"), 5.0, StockDirection::Restock);
        txn.commit().unwrap();

        assert_eq!(ledger.get_by_id(&id("milk")).unwrap().quantity, 15.0);
        assert!(ledger.get_by_id(&id("ghost")).is_err());
    }
}
