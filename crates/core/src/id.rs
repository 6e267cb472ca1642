//! Strongly-typed identifiers used across the domain.
//!
//! All identifiers are caller-visible strings (`"espresso_shot"`, `"latte"`,
//! `"order7"`), so they wrap `String` rather than a generated UUID.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of an inventory ingredient.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientId(String);

/// Identifier of a menu product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

/// Identifier of a customer order (server-assigned, `order<N>`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

macro_rules! impl_string_id {
    ($t:ty) => {
        impl $t {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// True when the identifier is empty or whitespace only.
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $t {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl core::borrow::Borrow<str> for $t {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

impl_string_id!(IngredientId);
impl_string_id!(ProductId);
impl_string_id!(OrderId);

const ORDER_PREFIX: &str = "order";

impl OrderId {
    /// Build the id for the `n`th order.
    pub fn from_sequence(n: u64) -> Self {
        Self(format!("{ORDER_PREFIX}{n}"))
    }

    /// Numeric suffix of an `order<N>` id, if the id has that shape.
    pub fn sequence(&self) -> Option<u64> {
        self.0.strip_prefix(ORDER_PREFIX)?.parse().ok()
    }
}

impl FromStr for OrderId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(DomainError::malformed("order id cannot be empty"));
        }
        Ok(Self(s.to_string()))
    }
}
