//! Farmstand Client - HTTP client for the remote store
//!
//! Typed calls against the store REST API, write-then-reload state
//! synchronization, and pure derived views over the fetched snapshots.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod session;
pub mod store;
pub mod view;

pub use api::StoreClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};
pub use session::{Session, SessionState};
pub use store::StoreSync;

// Re-export shared types for convenience
pub use shared::models::{Customer, InventoryItem};
