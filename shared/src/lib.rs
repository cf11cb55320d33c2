//! Shared types for the Farmstand dashboard
//!
//! Wire models and request/response DTOs used by the API client and any
//! service implementing the same store contract.

pub mod client;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};
