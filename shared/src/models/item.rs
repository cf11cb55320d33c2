//! Inventory Item Model

use serde::{Deserialize, Serialize};

/// One stocked item. `name` is the unique key, case-sensitive as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub name: String,
    pub qty: u32,
}
