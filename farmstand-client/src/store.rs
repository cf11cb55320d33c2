//! Synchronization layer: write, then reload
//!
//! Every mutation is followed by a refetch of the affected collection and
//! a wholesale replacement of the local cache, so the dashboard never
//! shows a state the store has not confirmed. A failed request leaves the
//! cache stale but consistent.

use crate::api::StoreClient;
use crate::http::HttpClient;
use crate::session::{Session, SessionState};
use crate::{ClientError, ClientResult};
use shared::client::{AddOrIncrementRequest, EnqueueRequest, SetQuantityRequest};
use shared::models::{Customer, InventoryItem};

/// Client-side mirror of the remote store
///
/// `items` and `queue` always hold the last successful fetch; nothing in
/// this layer patches them locally.
pub struct StoreSync<C: HttpClient> {
    client: StoreClient<C>,
    session: SessionState,
    items: Vec<InventoryItem>,
    queue: Vec<Customer>,
    last_served: Option<Customer>,
}

impl<C: HttpClient> StoreSync<C> {
    pub fn new(client: StoreClient<C>) -> Self {
        Self {
            client,
            session: SessionState::default(),
            items: Vec::new(),
            queue: Vec::new(),
            last_served: None,
        }
    }

    /// Last fetched inventory snapshot
    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    /// Last fetched queue snapshot, head first
    pub fn queue(&self) -> &[Customer] {
        &self.queue
    }

    /// The customer served by the most recent dequeue
    pub fn last_served(&self) -> Option<&Customer> {
        self.last_served.as_ref()
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    // ========== Loading ==========

    /// Initial load: both collections fetched concurrently. Either failure
    /// aborts the load with the caches untouched - the caller shows a
    /// "cannot reach backend" state instead of an empty dashboard.
    pub async fn load(&mut self) -> ClientResult<()> {
        let (items, queue) = tokio::try_join!(self.client.inventory(), self.client.queue())?;
        self.items = items;
        self.queue = queue;
        tracing::debug!(
            items = self.items.len(),
            queue = self.queue.len(),
            "loaded store snapshot"
        );
        Ok(())
    }

    async fn reload_inventory(&mut self) -> ClientResult<()> {
        self.items = self.client.inventory().await?;
        Ok(())
    }

    async fn reload_queue(&mut self) -> ClientResult<()> {
        self.queue = self.client.queue().await?;
        Ok(())
    }

    // ========== Inventory mutations ==========

    /// Create an item or bump its quantity. Amounts are clamped to at
    /// least 1 before sending.
    pub async fn add_or_increment(&mut self, name: &str, amount: u32) -> ClientResult<()> {
        let name = required_name(name, "item name is required")?;
        let req = AddOrIncrementRequest {
            name,
            amount: amount.max(1),
        };
        self.client.add_or_increment(&req).await?;
        self.reload_inventory().await
    }

    /// Set an absolute quantity. Setting 0 keeps the item.
    pub async fn set_quantity(&mut self, name: &str, qty: u32) -> ClientResult<()> {
        let name = required_name(name, "item name is required")?;
        let req = SetQuantityRequest { name, qty };
        self.client.set_quantity(&req).await?;
        self.reload_inventory().await
    }

    /// Remove an item entirely
    pub async fn delete_item(&mut self, name: &str) -> ClientResult<()> {
        let name = required_name(name, "item name is required")?;
        self.client.delete_item(&name).await?;
        self.reload_inventory().await
    }

    // ========== Queue mutations ==========

    /// Append a customer to the tail. A blank note is sent as no note.
    pub async fn enqueue(&mut self, name: &str, note: &str) -> ClientResult<()> {
        let name = required_name(name, "customer name is required")?;
        let note = note.trim();
        let req = EnqueueRequest {
            name,
            note: (!note.is_empty()).then(|| note.to_string()),
        };
        self.client.enqueue(&req).await?;
        self.reload_queue().await
    }

    /// Serve the head of the queue. Callers disable this action while the
    /// local snapshot is empty; the store's answer still wins.
    pub async fn dequeue(&mut self) -> ClientResult<Option<Customer>> {
        let served = self.client.dequeue().await?;
        self.reload_queue().await?;
        if served.is_some() {
            self.last_served = served.clone();
        }
        Ok(served)
    }

    /// Remove every waiting customer. Follows the same write-then-reload
    /// protocol as every other mutation - the local queue is only emptied
    /// once the store confirms it is.
    pub async fn clear_queue(&mut self) -> ClientResult<()> {
        self.client.clear_queue().await?;
        self.reload_queue().await
    }

    // ========== Auth ==========

    /// Login through the auth collaborator. Moves the session through
    /// `Authenticating`; a failure lands back on `Unauthenticated`.
    pub async fn login(&mut self, username: &str, password: &str) -> ClientResult<Session> {
        self.session = SessionState::Authenticating;
        match self.client.login(username, password).await {
            Ok(session) => {
                tracing::debug!(username = %session.username, "logged in");
                self.session = SessionState::Authenticated(session.clone());
                Ok(session)
            }
            Err(e) => {
                self.session = SessionState::Unauthenticated;
                Err(e)
            }
        }
    }

    /// Logout always resets local auth state and discards the cached
    /// snapshots; a failed logout request is logged and swallowed.
    pub async fn logout(&mut self) {
        if let Err(e) = self.client.logout().await {
            tracing::warn!("logout request failed: {}", e);
        }
        self.session = SessionState::Unauthenticated;
        self.items.clear();
        self.queue.clear();
        self.last_served = None;
    }
}

fn required_name(raw: &str, message: &str) -> ClientResult<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ClientError::Validation(message.to_string()));
    }
    Ok(trimmed.to_string())
}
