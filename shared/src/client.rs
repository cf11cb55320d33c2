//! Client-related types shared between server and client
//!
//! Request/response DTOs for the store API. Validation constraints mirror
//! the server-side contract: blank names are rejected, increment amounts
//! start at 1, absolute quantities start at 0.

use serde::{Deserialize, Serialize};
use validator::Validate;

// =============================================================================
// Inventory API DTOs
// =============================================================================

/// Create an item or bump its quantity
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddOrIncrementRequest {
    #[validate(length(min = 1, message = "item name is required"))]
    pub name: String,
    #[validate(range(min = 1, message = "amount must be at least 1"))]
    pub amount: u32,
}

/// Absolute quantity set. Setting 0 keeps the item; delete is separate.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SetQuantityRequest {
    #[validate(length(min = 1, message = "item name is required"))]
    pub name: String,
    pub qty: u32,
}

// =============================================================================
// Queue API DTOs
// =============================================================================

/// Append a customer to the queue tail
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EnqueueRequest {
    #[validate(length(min = 1, message = "customer name is required"))]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// User information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub username: String,
    #[serde(default)]
    pub role: String,
}
