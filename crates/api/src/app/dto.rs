//! Response envelopes.
//!
//! Request bodies deserialize straight into the domain shapes
//! (`InventoryItem`, `MenuItem`, `OrderRequest`); only the wrappers around
//! responses live here.

use serde::Serialize;

use cafe_core::{OrderId, ProductId};
use cafe_inventory::InventoryItem;
use cafe_menu::MenuItem;
use cafe_orders::Order;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderCreatedResponse {
    pub message: String,
    pub order_id: OrderId,
}

#[derive(Debug, Serialize)]
pub struct InventoryListResponse {
    pub inventory: Vec<InventoryItem>,
}

#[derive(Debug, Serialize)]
pub struct MenuListResponse {
    pub menu: Vec<MenuItem>,
}

#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub orders: Vec<Order>,
}

#[derive(Debug, Serialize)]
pub struct TotalSalesResponse {
    pub total_sales: f64,
}

#[derive(Debug, Serialize)]
pub struct PopularItemResponse {
    pub popular_item: ProductId,
}
