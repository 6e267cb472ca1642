//! Inventory ledger.
//!
//! Owns ingredient stock records and exposes the two halves of every stock
//! change: a speculative check and a committed adjustment, tied together by
//! [`StockTransaction`].

pub mod item;
pub mod ledger;
pub mod transaction;

pub use item::InventoryItem;
pub use ledger::{INVENTORY_COLLECTION, InventoryLedger};
pub use transaction::{StockDirection, StockMovement, StockReceipt, StockTransaction, STOCK_EPSILON};
