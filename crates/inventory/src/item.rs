use serde::{Deserialize, Serialize};

use cafe_core::{DomainError, DomainResult, Entity, IngredientId};

/// A stocked ingredient.
///
/// `quantity` is a real number in `unit`s and never goes below zero once a
/// mutation is committed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryItem {
    pub ingredient_id: IngredientId,
    pub name: String,
    pub quantity: f64,
    pub unit: String,
}

impl InventoryItem {
    pub fn new(
        ingredient_id: impl Into<IngredientId>,
        name: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            ingredient_id: ingredient_id.into(),
            name: name.into(),
            quantity,
            unit: unit.into(),
        }
    }

    /// Field-level validation applied on create and update.
    pub fn validate(&self) -> DomainResult<()> {
        if self.ingredient_id.is_blank() {
            return Err(DomainError::malformed("ingredient_id is required"));
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::malformed("name is required"));
        }
        if self.unit.trim().is_empty() {
            return Err(DomainError::malformed("unit is required"));
        }
        if !self.quantity.is_finite() || self.quantity <= 0.0 {
            return Err(DomainError::quantity_invalid(format!(
                "quantity of {} must be positive",
                self.ingredient_id
            )));
        }
        Ok(())
    }
}

impl Entity for InventoryItem {
    type Id = IngredientId;

    fn id(&self) -> &IngredientId {
        &self.ingredient_id
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_item_passes() {
        InventoryItem::new("milk", "Milk", 5000.0, "ml").validate().unwrap();
    }

    #[test]
    fn missing_fields_are_malformed() {
        let err = InventoryItem::new("", "Milk", 1.0, "ml").validate().unwrap_err();
        assert!(matches!(err, DomainError::MalformedRequest(_)));

        let err = InventoryItem::new("milk", " ", 1.0, "ml").validate().unwrap_err();
        assert!(matches!(err, DomainError::MalformedRequest(_)));

        let err = InventoryItem::new("milk", "Milk", 1.0, "").validate().unwrap_err();
        assert!(matches!(err, DomainError::MalformedRequest(_)));
    }

    #[test]
    fn non_positive_quantity_is_rejected() {
        for q in [0.0, -3.0, f64::NAN] {
            let err = InventoryItem::new("milk", "Milk", q, "ml").validate().unwrap_err();
            assert!(matches!(err, DomainError::QuantityInvalid(_)));
        }
    }

    #[test]
    fn missing_json_fields_deserialize_to_blank_values() {
        let item: InventoryItem = serde_json::from_str(r#"{"name":"Milk"}"#).unwrap();
        assert!(item.ingredient_id.is_blank());
        assert!(matches!(item.validate(), Err(DomainError::MalformedRequest(_))));
    }
}
