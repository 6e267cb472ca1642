//! Order ledger.
//!
//! Owns order records and their Open → Closed lifecycle. Stock effects of
//! creating, changing or deleting an order are not handled here; see
//! `cafe-fulfillment`.

pub mod book;
pub mod ledger;
pub mod order;

pub use book::OrderBook;
pub use ledger::{ORDERS_COLLECTION, OrderLedger};
pub use order::{Order, OrderLine, OrderRequest, OrderStatus};
