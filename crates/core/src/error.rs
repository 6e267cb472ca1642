//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every kind is returned unmodified to the immediate caller; nothing in the
/// domain layer retries. The HTTP boundary decides how each kind is rendered.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A record with the same identifier already exists.
    #[error("duplicate id: {0}")]
    DuplicateId(String),

    /// A record with the same name already exists.
    #[error("duplicate name: {0}")]
    DuplicateName(String),

    /// A lookup by identifier missed.
    #[error("not found: {0}")]
    NotFound(String),

    /// Listing a collection that holds no records.
    #[error("{0} has no items")]
    EmptyCollection(String),

    /// Required fields are missing or server-owned fields were supplied.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// A quantity is zero or negative.
    #[error("invalid quantity: {0}")]
    QuantityInvalid(String),

    /// A price is zero or negative.
    #[error("invalid price: {0}")]
    PriceInvalid(String),

    /// Path identifier and body identifier disagree, or an identifier was
    /// supplied where the server assigns it.
    #[error("identity mismatch: {0}")]
    IdentityMismatch(String),

    /// Stock check failed for at least one ingredient.
    #[error("insufficient ingredients: {0}")]
    InsufficientIngredients(String),

    /// The order is already closed.
    #[error("order already closed: {0}")]
    AlreadyClosed(String),

    /// Closed orders are kept as history and cannot be deleted.
    #[error("cannot delete closed order: {0}")]
    CannotDeleteClosed(String),

    /// The customer on an order cannot be changed.
    #[error("customer name cannot be changed: {0}")]
    CustomerNameImmutable(String),

    /// Durable read/write failed, or internal state is unusable.
    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl DomainError {
    pub fn duplicate_id(id: impl Into<String>) -> Self {
        Self::DuplicateId(id.into())
    }

    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName(name.into())
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    pub fn empty_collection(collection: impl Into<String>) -> Self {
        Self::EmptyCollection(collection.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedRequest(msg.into())
    }

    pub fn quantity_invalid(msg: impl Into<String>) -> Self {
        Self::QuantityInvalid(msg.into())
    }

    pub fn price_invalid(msg: impl Into<String>) -> Self {
        Self::PriceInvalid(msg.into())
    }

    pub fn identity_mismatch(msg: impl Into<String>) -> Self {
        Self::IdentityMismatch(msg.into())
    }

    pub fn insufficient(msg: impl Into<String>) -> Self {
        Self::InsufficientIngredients(msg.into())
    }

    pub fn already_closed(order_id: impl Into<String>) -> Self {
        Self::AlreadyClosed(order_id.into())
    }

    pub fn cannot_delete_closed(order_id: impl Into<String>) -> Self {
        Self::CannotDeleteClosed(order_id.into())
    }

    pub fn customer_name_immutable(order_id: impl Into<String>) -> Self {
        Self::CustomerNameImmutable(order_id.into())
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Stable snake_case code for this kind (used in API error bodies).
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateId(_) => "duplicate_id",
            Self::DuplicateName(_) => "duplicate_name",
            Self::NotFound(_) => "not_found",
            Self::EmptyCollection(_) => "empty_collection",
            Self::MalformedRequest(_) => "malformed_request",
            Self::QuantityInvalid(_) => "quantity_invalid",
            Self::PriceInvalid(_) => "price_invalid",
            Self::IdentityMismatch(_) => "identity_mismatch",
            Self::InsufficientIngredients(_) => "insufficient_ingredients",
            Self::AlreadyClosed(_) => "already_closed",
            Self::CannotDeleteClosed(_) => "cannot_delete_closed",
            Self::CustomerNameImmutable(_) => "customer_name_immutable",
            Self::Persistence(_) => "persistence_failure",
        }
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(value: serde_json::Error) -> Self {
        Self::Persistence(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_snake_case_and_distinct() {
        let all = [
            DomainError::duplicate_id("x"),
            DomainError::duplicate_name("x"),
            DomainError::not_found("x"),
            DomainError::empty_collection("x"),
            DomainError::malformed("x"),
            DomainError::quantity_invalid("x"),
            DomainError::price_invalid("x"),
            DomainError::identity_mismatch("x"),
            DomainError::insufficient("x"),
            DomainError::already_closed("x"),
            DomainError::cannot_delete_closed("x"),
            DomainError::customer_name_immutable("x"),
            DomainError::persistence("x"),
        ];

        let mut codes: Vec<&str> = all.iter().map(DomainError::code).collect();
        assert!(codes.iter().all(|c| c.chars().all(|ch| ch.is_ascii_lowercase() || ch == '_')));
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), all.len());
    }

    #[test]
    fn empty_collection_message_names_the_collection() {
        let err = DomainError::empty_collection("menu");
        assert_eq!(err.to_string(), "menu has no items");
    }
}
