use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cafe_core::{DomainError, DomainResult, Entity, OrderId, ProductId};

/// One order line: `quantity` units of a menu product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: i64,
}

impl OrderLine {
    pub fn new(product_id: impl Into<ProductId>, quantity: i64) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }

    /// Unit count as used for recipe arithmetic.
    pub fn units(&self) -> f64 {
        self.quantity as f64
    }
}

/// Order lifecycle. The only transition is Open → Closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    #[serde(alias = "Open")]
    Open,
    #[serde(alias = "Close", alias = "Closed")]
    Closed,
}

impl OrderStatus {
    pub fn is_closed(self) -> bool {
        self == Self::Closed
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Open => f.write_str("open"),
            Self::Closed => f.write_str("closed"),
        }
    }
}

/// A persisted customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub customer_name: String,
    pub items: Vec<OrderLine>,
    pub status: OrderStatus,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
}

/// Accepts RFC 3339 and the older `YYYY-MM-DD HH:MM:SS` form, read as UTC.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, de::Error};

    const LEGACY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if let Ok(ts) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(ts.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&raw, LEGACY_FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(|e| D::Error::custom(format!("invalid created_at {raw:?}: {e}")))
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &OrderId {
        &self.order_id
    }
}

/// Order as submitted by a caller.
///
/// `order_id`, `status` and `created_at` are server-owned; they are only
/// present here so that a caller supplying them can be rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<OrderId>,
    pub customer_name: String,
    pub items: Vec<OrderLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

fn supplied(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|v| !v.trim().is_empty())
}

impl OrderRequest {
    pub fn new(customer_name: impl Into<String>, items: Vec<OrderLine>) -> Self {
        Self {
            customer_name: customer_name.into(),
            items,
            ..Self::default()
        }
    }

    pub fn with_order_id(mut self, id: impl Into<OrderId>) -> Self {
        self.order_id = Some(id.into());
        self
    }

    /// Preconditions of a new order.
    pub fn check_new(&self) -> DomainResult<()> {
        if let Some(id) = self.order_id.as_ref().filter(|id| !id.is_blank()) {
            return Err(DomainError::identity_mismatch(format!(
                "order_id {id} is assigned by the server"
            )));
        }
        self.check_server_fields()?;
        self.validate_lines()
    }

    /// Preconditions of a change to order `id` that can be checked without
    /// looking at the stored order.
    pub fn check_update(&self, id: &OrderId) -> DomainResult<()> {
        if self.order_id.as_ref() != Some(id) {
            return Err(DomainError::identity_mismatch(format!(
                "path id {id} does not match order_id {}",
                self.order_id.as_ref().map(OrderId::as_str).unwrap_or("")
            )));
        }
        self.check_server_fields()
    }

    fn check_server_fields(&self) -> DomainResult<()> {
        if supplied(&self.status) {
            return Err(DomainError::malformed("status is set by the server"));
        }
        if supplied(&self.created_at) {
            return Err(DomainError::malformed("created_at is set by the server"));
        }
        Ok(())
    }

    /// Customer and line checks shared by create and update.
    pub fn validate_lines(&self) -> DomainResult<()> {
        if self.customer_name.trim().is_empty() {
            return Err(DomainError::malformed("customer_name is required"));
        }
        if self.items.is_empty() {
            return Err(DomainError::malformed("items cannot be empty"));
        }
        for line in &self.items {
            if line.quantity <= 0 {
                return Err(DomainError::quantity_invalid(format!(
                    "quantity of {} must be positive",
                    line.product_id
                )));
            }
            if line.product_id.is_blank() {
                return Err(DomainError::malformed("product_id is required"));
            }
        }
        Ok(())
    }
}
