use cafe_core::{DocumentStore, DomainError, DomainResult, IngredientId, Ledger};

use crate::item::InventoryItem;
use crate::transaction::{StockDirection, StockTransaction};

/// Name of the persisted inventory collection.
pub const INVENTORY_COLLECTION: &str = "inventory";

/// Inventory ledger: owns ingredient stock and its durable document.
#[derive(Debug)]
pub struct InventoryLedger<S> {
    ledger: Ledger<InventoryItem, S>,
}

impl<S> InventoryLedger<S>
where
    S: DocumentStore,
{
    pub fn open(store: S) -> DomainResult<Self> {
        Ok(Self {
            ledger: Ledger::open(INVENTORY_COLLECTION, store)?,
        })
    }

    pub fn create(&self, item: InventoryItem) -> DomainResult<()> {
        item.validate()?;
        let id = item.ingredient_id.clone();
        self.ledger.mutate(|items| items.insert(item))?;
        tracing::info!(ingredient_id = %id, "inventory item created");
        Ok(())
    }

    pub fn get_all(&self) -> DomainResult<Vec<InventoryItem>> {
        self.ledger.get_all(INVENTORY_COLLECTION)
    }

    pub fn get_by_id(&self, id: &IngredientId) -> DomainResult<InventoryItem> {
        self.ledger.get_by_id(id)
    }

    /// Replace the record stored under `id`. The body cannot rename the id.
    pub fn update(&self, item: InventoryItem, id: &IngredientId) -> DomainResult<()> {
        if item.ingredient_id != *id {
            return Err(DomainError::identity_mismatch(format!(
                "path id {id} does not match ingredient_id {}",
                item.ingredient_id
            )));
        }
        item.validate()?;
        self.ledger.mutate(|items| items.replace(id, item))?;
        tracing::info!(ingredient_id = %id, "inventory item updated");
        Ok(())
    }

    pub fn delete(&self, id: &IngredientId) -> DomainResult<()> {
        self.ledger.mutate(|items| items.remove(id))?;
        tracing::info!(ingredient_id = %id, "inventory item deleted");
        Ok(())
    }

    /// Open a check-then-commit transaction holding the inventory write lock.
    pub fn begin(&self) -> DomainResult<StockTransaction<'_, S>> {
        Ok(StockTransaction::new(&self.ledger, self.ledger.write()?))
    }

    /// One-off dry run: could `amount` of `id` be drawn right now?
    pub fn check_sufficient(&self, id: &IngredientId, amount: f64) -> DomainResult<bool> {
        Ok(self.begin()?.check_sufficient(id, amount))
    }

    /// One-off committed movement against a single ingredient.
    pub fn adjust(
        &self,
        id: &IngredientId,
        amount: f64,
        direction: StockDirection,
    ) -> DomainResult<()> {
        let mut txn = self.begin()?;
        if txn.available(id).is_none() {
            return Err(DomainError::not_found(id.to_string()));
        }
        txn.stage(id, amount, direction);
        txn.commit()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cafe_core::InMemoryDocumentStore;
    use proptest::prelude::*;

    use super::*;

    fn ledger() -> InventoryLedger<InMemoryDocumentStore> {
        InventoryLedger::open(InMemoryDocumentStore::new()).unwrap()
    }

    fn id(s: &str) -> IngredientId {
        IngredientId::new(s)
    }

    #[test]
    fn create_rejects_duplicate_id_and_name() {
        let ledger = ledger();
        ledger.create(InventoryItem::new("milk", "Milk", 10.0, "ml")).unwrap();

        let err = ledger
            .create(InventoryItem::new("milk", "Oat Milk", 10.0, "ml"))
            .unwrap_err();
        assert_eq!(err, DomainError::duplicate_id("milk"));

        let err = ledger
            .create(InventoryItem::new("oat_milk", "Milk", 10.0, "ml"))
            .unwrap_err();
        assert_eq!(err, DomainError::duplicate_name("Milk"));
    }

    #[test]
    fn get_all_on_empty_inventory_is_empty_collection() {
        assert!(matches!(
            ledger().get_all().unwrap_err(),
            DomainError::EmptyCollection(_)
        ));
    }

    #[test]
    fn get_all_preserves_insertion_order() {
        let ledger = ledger();
        ledger.create(InventoryItem::new("sugar", "Sugar", 1.0, "g")).unwrap();
        ledger.create(InventoryItem::new("flour", "Flour", 1.0, "g")).unwrap();

        let ids: Vec<String> = ledger
            .get_all()
            .unwrap()
            .into_iter()
            .map(|i| i.ingredient_id.to_string())
            .collect();
        assert_eq!(ids, vec!["sugar", "flour"]);
    }

    #[test]
    fn update_replaces_the_record_and_guards_identity() {
        let ledger = ledger();
        ledger.create(InventoryItem::new("milk", "Milk", 10.0, "ml")).unwrap();
        ledger.create(InventoryItem::new("sugar", "Sugar", 10.0, "g")).unwrap();

        ledger
            .update(InventoryItem::new("milk", "Whole Milk", 20.0, "ml"), &id("milk"))
            .unwrap();
        let milk = ledger.get_by_id(&id("milk")).unwrap();
        assert_eq!(milk.name, "Whole Milk");
        assert_eq!(milk.quantity, 20.0);

        let err = ledger
            .update(InventoryItem::new("milk", "Sugar", 20.0, "ml"), &id("milk"))
            .unwrap_err();
        assert_eq!(err, DomainError::duplicate_name("Sugar"));

        let err = ledger
            .update(InventoryItem::new("cream", "Cream", 1.0, "ml"), &id("milk"))
            .unwrap_err();
        assert!(matches!(err, DomainError::IdentityMismatch(_)));

        let err = ledger
            .update(InventoryItem::new("cream", "Cream", 1.0, "ml"), &id("cream"))
            .unwrap_err();
        assert_eq!(err, DomainError::not_found("cream"));
    }

    #[test]
    fn delete_removes_and_reports_missing() {
        let ledger = ledger();
        ledger.create(InventoryItem::new("milk", "Milk", 10.0, "ml")).unwrap();

        ledger.delete(&id("milk")).unwrap();
        assert_eq!(ledger.delete(&id("milk")).unwrap_err(), DomainError::not_found("milk"));
    }

    #[test]
    fn one_off_check_does_not_mutate() {
        let ledger = ledger();
        ledger.create(InventoryItem::new("milk", "Milk", 10.0, "ml")).unwrap();

        assert!(ledger.check_sufficient(&id("milk"), 10.0).unwrap());
        assert!(!ledger.check_sufficient(&id("milk"), 10.5).unwrap());
        assert_eq!(ledger.get_by_id(&id("milk")).unwrap().quantity, 10.0);
    }

    #[test]
    fn adjust_commits_consume_and_restock() {
        let ledger = ledger();
        ledger.create(InventoryItem::new("milk", "Milk", 10.0, "ml")).unwrap();

        ledger.adjust(&id("milk"), 4.0, StockDirection::Consume).unwrap();
        ledger.adjust(&id("milk"), 1.5, StockDirection::Restock).unwrap();
        assert_eq!(ledger.get_by_id(&id("milk")).unwrap().quantity, 7.5);

        assert_eq!(
            ledger.adjust(&id("cream"), 1.0, StockDirection::Restock).unwrap_err(),
            DomainError::not_found("cream")
        );
    }

    #[test]
    fn persistence_failure_leaves_ledger_unchanged() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let ledger = InventoryLedger::open(store.clone()).unwrap();
        ledger.create(InventoryItem::new("milk", "Milk", 10.0, "ml")).unwrap();

        store.fail_writes(true);
        let err = ledger.create(InventoryItem::new("sugar", "Sugar", 1.0, "g")).unwrap_err();
        assert!(matches!(err, DomainError::Persistence(_)));
        assert_eq!(ledger.get_all().unwrap().len(), 1);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Draw(f64),
        Return(f64),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0.5f64..300.0).prop_map(Op::Draw),
            (0.5f64..300.0).prop_map(Op::Return),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: check-then-commit never drives stock below zero.
        #[test]
        fn checked_draws_never_go_negative(
            start in 1.0f64..1000.0,
            ops in prop::collection::vec(op(), 1..40)
        ) {
            let ledger = ledger();
            ledger.create(InventoryItem::new("milk", "Milk", start, "ml")).unwrap();
            let milk = id("milk");

            for op in ops {
                {
                    let mut txn = ledger.begin().unwrap();
                    match op {
                        Op::Draw(amount) => {
                            if txn.check_sufficient(&milk, amount) {
                                txn.stage(&milk, amount, StockDirection::Consume);
                                txn.commit().unwrap();
                            }
                        }
                        Op::Return(amount) => {
                            txn.stage(&milk, amount, StockDirection::Restock);
                            txn.commit().unwrap();
                        }
                    }
                }
                prop_assert!(ledger.get_by_id(&milk).unwrap().quantity >= 0.0);
            }
        }
    }
}
