//! Order fulfillment.
//!
//! [`FulfillmentEngine`] sequences order mutations across the inventory,
//! menu and order ledgers under a check-then-commit protocol. [`Reporting`]
//! aggregates over orders and menu prices without mutating anything.
//!
//! Locks are always taken in the order orders → menu → inventory.

pub mod engine;
pub mod reporting;

#[cfg(test)]
mod fixture;

pub use engine::FulfillmentEngine;
pub use reporting::Reporting;
