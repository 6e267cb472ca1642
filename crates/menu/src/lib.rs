//! Menu catalog.
//!
//! Products, their prices and recipes. The catalog does not own stock; it
//! delegates every recipe-driven stock check and movement to an inventory
//! [`StockTransaction`](cafe_inventory::StockTransaction) supplied by the caller.

pub mod catalog;
pub mod item;

pub use catalog::{MENU_COLLECTION, MenuCatalog, MenuView};
pub use item::{MenuItem, RecipeIngredient};
