use serde::{Deserialize, Serialize};

use cafe_core::{DomainError, DomainResult, Entity, IngredientId, ProductId};

/// One recipe line: how much of an ingredient a single unit of a product needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeIngredient {
    pub ingredient_id: IngredientId,
    #[serde(rename = "quantity")]
    pub quantity_per_unit: f64,
}

impl RecipeIngredient {
    pub fn new(ingredient_id: impl Into<IngredientId>, quantity_per_unit: f64) -> Self {
        Self {
            ingredient_id: ingredient_id.into(),
            quantity_per_unit,
        }
    }
}

/// A sellable product and its recipe.
///
/// Ingredient ids are not checked against inventory when the menu is
/// written; a dangling reference surfaces as insufficient stock when an
/// order asks for the product.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuItem {
    pub product_id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub ingredients: Vec<RecipeIngredient>,
}

impl MenuItem {
    pub fn new(
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        ingredients: Vec<RecipeIngredient>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            description: description.into(),
            price,
            ingredients,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.product_id.is_blank() {
            return Err(DomainError::malformed("product_id is required"));
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::malformed("name is required"));
        }
        if self.description.trim().is_empty() {
            return Err(DomainError::malformed("description is required"));
        }
        if self.ingredients.is_empty() {
            return Err(DomainError::malformed("ingredients cannot be empty"));
        }
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(DomainError::price_invalid(format!(
                "price of {} must be positive",
                self.product_id
            )));
        }

        for line in &self.ingredients {
            if line.ingredient_id.is_blank() {
                return Err(DomainError::malformed("ingredient_id is required"));
            }
            if !line.quantity_per_unit.is_finite() || line.quantity_per_unit <= 0.0 {
                return Err(DomainError::quantity_invalid(format!(
                    "{} needs a positive quantity of {}",
                    self.product_id, line.ingredient_id
                )));
            }
        }
        Ok(())
    }
}

impl Entity for MenuItem {
    type Id = ProductId;

    fn id(&self) -> &ProductId {
        &self.product_id
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}
