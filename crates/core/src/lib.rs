//! `cafe-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by every ledger:
//! the error taxonomy, typed identifiers, the ordered record collection and
//! the document storage port (plus an in-memory adapter for tests).

pub mod entity;
pub mod error;
pub mod id;
pub mod ledger;
pub mod records;
pub mod store;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{IngredientId, OrderId, ProductId};
pub use ledger::Ledger;
pub use records::Records;
pub use store::{DocumentStore, InMemoryDocumentStore, load_records, save_records};
