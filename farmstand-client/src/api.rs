//! Typed store API surface
//!
//! One method per remote operation, each performing exactly one HTTP
//! request. Request DTOs are validated before any network I/O; a
//! validation failure means nothing was sent.

use crate::http::{HttpClient, NetworkHttpClient};
use crate::session::Session;
use crate::{ClientConfig, ClientError, ClientResult};
use shared::client::{
    AddOrIncrementRequest, EnqueueRequest, LoginRequest, LoginResponse, SetQuantityRequest,
};
use shared::models::{Customer, InventoryItem};
use validator::Validate;

/// Typed client for the remote store
#[derive(Debug, Clone)]
pub struct StoreClient<C> {
    http: C,
}

impl StoreClient<NetworkHttpClient> {
    /// Create a network client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self {
            http: NetworkHttpClient::new(config)?,
        })
    }
}

impl<C: HttpClient> StoreClient<C> {
    /// Wrap an existing transport
    pub fn with_transport(http: C) -> Self {
        Self { http }
    }

    /// Get the current bearer token
    pub fn token(&self) -> Option<&str> {
        self.http.token()
    }

    // ========== Inventory API ==========

    /// Fetch all items
    pub async fn inventory(&self) -> ClientResult<Vec<InventoryItem>> {
        self.http.get("/api/inventory").await
    }

    /// Create `name` or bump its quantity by `amount`
    pub async fn add_or_increment(&self, req: &AddOrIncrementRequest) -> ClientResult<()> {
        req.validate()?;
        tracing::debug!(name = %req.name, amount = req.amount, "add or increment item");
        self.http.post("/api/inventory/addOrIncrement", req).await
    }

    /// Set an absolute quantity. Setting 0 keeps the item; use
    /// [`delete_item`](Self::delete_item) to remove it.
    pub async fn set_quantity(&self, req: &SetQuantityRequest) -> ClientResult<()> {
        req.validate()?;
        tracing::debug!(name = %req.name, qty = req.qty, "set item quantity");
        self.http.put("/api/inventory/setQuantity", req).await
    }

    /// Remove an item entirely
    pub async fn delete_item(&self, name: &str) -> ClientResult<()> {
        if name.is_empty() {
            return Err(ClientError::Validation("item name is required".into()));
        }
        tracing::debug!(name = %name, "delete item");
        let path = format!("/api/inventory/{}", urlencoding::encode(name));
        self.http.delete(&path).await
    }

    // ========== Queue API ==========

    /// Fetch the queue snapshot, head first
    pub async fn queue(&self) -> ClientResult<Vec<Customer>> {
        self.http.get("/api/queue").await
    }

    /// Append a customer to the tail
    pub async fn enqueue(&self, req: &EnqueueRequest) -> ClientResult<()> {
        req.validate()?;
        tracing::debug!(name = %req.name, "enqueue customer");
        self.http.post("/api/queue/enqueue", req).await
    }

    /// Serve the head of the queue. Returns the served customer when the
    /// store reports one.
    pub async fn dequeue(&self) -> ClientResult<Option<Customer>> {
        tracing::debug!("dequeue customer");
        self.http.post_empty("/api/queue/dequeue").await
    }

    /// Remove every waiting customer
    pub async fn clear_queue(&self) -> ClientResult<()> {
        tracing::debug!("clear queue");
        self.http.delete("/api/queue").await
    }

    // ========== Auth API ==========

    /// Login against the auth collaborator. The returned token is attached
    /// to every subsequent request on this client.
    pub async fn login(&mut self, username: &str, password: &str) -> ClientResult<Session> {
        let req = LoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        req.validate()?;

        let resp: LoginResponse = self.http.post("/api/auth/login", &req).await?;
        self.http.set_token(Some(resp.token.clone()));
        Ok(Session {
            username: resp.user.username,
            role: resp.user.role,
            token: resp.token,
        })
    }

    /// Logout. The bearer token is dropped locally whether or not the
    /// store acknowledged the request.
    pub async fn logout(&mut self) -> ClientResult<()> {
        let result: ClientResult<()> = self.http.post_empty("/api/auth/logout").await;
        self.http.set_token(None);
        result
    }
}
