// farmstand-client/tests/store_sync.rs
// Integration tests against an in-memory stub of the remote store.
//
// The stub implements the store HTTP contract on an ephemeral local port;
// its state stays shared with the test for seeding, fault injection, and
// request counting. Everything goes through the real network client.

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};

use farmstand_client::{ClientConfig, ClientError, NetworkHttpClient, StoreClient, StoreSync};
use shared::client::{AddOrIncrementRequest, EnqueueRequest, LoginRequest, LoginResponse, SetQuantityRequest, UserInfo};
use shared::models::{Customer, InventoryItem};

const TEST_TOKEN: &str = "token-farmstand-test";

/// In-memory remote store
#[derive(Default)]
struct StubStore {
    items: Vec<InventoryItem>,
    queue: Vec<Customer>,
    /// When set, every mutation answers 500 without touching state
    fail_writes: bool,
    inventory_gets: usize,
    queue_gets: usize,
    writes: usize,
    last_auth_header: Option<String>,
}

type Shared = Arc<Mutex<StubStore>>;

async fn start_stub() -> (Shared, String) {
    let store: Shared = Arc::new(Mutex::new(StubStore::default()));
    let app = router(store.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve stub");
    });
    (store, format!("http://{}", addr))
}

fn router(store: Shared) -> Router {
    Router::new()
        .route("/api/inventory", get(list_inventory))
        .route("/api/inventory/addOrIncrement", post(add_or_increment))
        .route("/api/inventory/setQuantity", put(set_quantity))
        .route("/api/inventory/{name}", delete(delete_item))
        .route("/api/queue", get(list_queue).delete(clear_queue))
        .route("/api/queue/enqueue", post(enqueue))
        .route("/api/queue/dequeue", post(dequeue))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .with_state(store)
}

async fn list_inventory(State(store): State<Shared>, headers: HeaderMap) -> Json<Vec<InventoryItem>> {
    let mut s = store.lock().unwrap();
    s.inventory_gets += 1;
    s.last_auth_header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    Json(s.items.clone())
}

async fn add_or_increment(
    State(store): State<Shared>,
    Json(req): Json<AddOrIncrementRequest>,
) -> StatusCode {
    let mut s = store.lock().unwrap();
    s.writes += 1;
    if s.fail_writes {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    match s.items.iter_mut().find(|i| i.name == req.name) {
        Some(item) => item.qty += req.amount,
        None => s.items.push(InventoryItem {
            name: req.name,
            qty: req.amount,
        }),
    }
    StatusCode::NO_CONTENT
}

async fn set_quantity(State(store): State<Shared>, Json(req): Json<SetQuantityRequest>) -> StatusCode {
    let mut s = store.lock().unwrap();
    s.writes += 1;
    if s.fail_writes {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    match s.items.iter_mut().find(|i| i.name == req.name) {
        Some(item) => {
            item.qty = req.qty;
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

async fn delete_item(State(store): State<Shared>, Path(name): Path<String>) -> StatusCode {
    let mut s = store.lock().unwrap();
    s.writes += 1;
    if s.fail_writes {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    let before = s.items.len();
    s.items.retain(|i| i.name != name);
    if s.items.len() < before {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

async fn list_queue(State(store): State<Shared>) -> Json<Vec<Customer>> {
    let mut s = store.lock().unwrap();
    s.queue_gets += 1;
    Json(s.queue.clone())
}

async fn enqueue(State(store): State<Shared>, Json(req): Json<EnqueueRequest>) -> StatusCode {
    let mut s = store.lock().unwrap();
    s.writes += 1;
    if s.fail_writes {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    s.queue.push(Customer {
        name: req.name,
        note: req.note,
    });
    StatusCode::NO_CONTENT
}

async fn dequeue(State(store): State<Shared>) -> Result<Json<Customer>, StatusCode> {
    let mut s = store.lock().unwrap();
    s.writes += 1;
    if s.fail_writes {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    if s.queue.is_empty() {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(s.queue.remove(0)))
}

async fn clear_queue(State(store): State<Shared>) -> StatusCode {
    let mut s = store.lock().unwrap();
    s.writes += 1;
    if s.fail_writes {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    s.queue.clear();
    StatusCode::NO_CONTENT
}

async fn login(Json(req): Json<LoginRequest>) -> Result<Json<LoginResponse>, StatusCode> {
    if req.password == "wrong" {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(Json(LoginResponse {
        token: TEST_TOKEN.to_string(),
        user: UserInfo {
            username: req.username,
            role: "manager".to_string(),
        },
    }))
}

async fn logout() -> StatusCode {
    StatusCode::NO_CONTENT
}

fn connect(base_url: &str) -> StoreSync<NetworkHttpClient> {
    let config = ClientConfig::new(base_url).with_timeout(5);
    StoreSync::new(StoreClient::new(&config).expect("build client"))
}

fn item(name: &str, qty: u32) -> InventoryItem {
    InventoryItem {
        name: name.into(),
        qty,
    }
}

// ========== Inventory ==========

#[tokio::test]
async fn add_to_empty_inventory_shows_confirmed_state() {
    let (_store, base) = start_stub().await;
    let mut sync = connect(&base);
    sync.load().await.unwrap();
    assert!(sync.items().is_empty());

    sync.add_or_increment("eggs", 12).await.unwrap();
    assert_eq!(sync.items(), &[item("eggs", 12)]);
}

#[tokio::test]
async fn repeated_increments_accumulate() {
    let (store, base) = start_stub().await;
    store.lock().unwrap().items = vec![item("milk", 2)];

    let mut sync = connect(&base);
    sync.load().await.unwrap();
    for _ in 0..3 {
        sync.add_or_increment("milk", 1).await.unwrap();
    }
    assert_eq!(sync.items(), &[item("milk", 5)]);
    assert_eq!(store.lock().unwrap().items, vec![item("milk", 5)]);
}

#[tokio::test]
async fn amount_is_clamped_to_at_least_one() {
    let (_store, base) = start_stub().await;
    let mut sync = connect(&base);
    sync.add_or_increment("eggs", 0).await.unwrap();
    assert_eq!(sync.items(), &[item("eggs", 1)]);
}

#[tokio::test]
async fn set_quantity_to_zero_keeps_the_item() {
    let (store, base) = start_stub().await;
    store.lock().unwrap().items = vec![item("eggs", 12)];

    let mut sync = connect(&base);
    sync.load().await.unwrap();
    sync.set_quantity("eggs", 0).await.unwrap();
    assert_eq!(sync.items(), &[item("eggs", 0)]);
}

#[tokio::test]
async fn deleted_item_is_absent_after_reload() {
    let (store, base) = start_stub().await;
    store.lock().unwrap().items = vec![item("eggs", 12), item("milk", 2)];

    let mut sync = connect(&base);
    sync.load().await.unwrap();
    sync.delete_item("eggs").await.unwrap();
    assert_eq!(sync.items(), &[item("milk", 2)]);
}

#[tokio::test]
async fn delete_percent_encodes_the_name_segment() {
    let (store, base) = start_stub().await;
    store.lock().unwrap().items = vec![item("brown eggs", 6)];

    let mut sync = connect(&base);
    sync.load().await.unwrap();
    sync.delete_item("brown eggs").await.unwrap();
    assert!(sync.items().is_empty());
}

// ========== Queue ==========

#[tokio::test]
async fn enqueue_appends_to_the_tail() {
    let (_store, base) = start_stub().await;
    let mut sync = connect(&base);

    sync.enqueue("Alice", "pickup order").await.unwrap();
    sync.enqueue("Bob", "   ").await.unwrap();

    assert_eq!(
        sync.queue(),
        &[
            Customer::with_note("Alice", "pickup order"),
            Customer::new("Bob"),
        ]
    );
}

#[tokio::test]
async fn dequeue_serves_the_head_and_preserves_order() {
    let (store, base) = start_stub().await;
    store.lock().unwrap().queue = vec![Customer::new("Alice"), Customer::new("Bob")];

    let mut sync = connect(&base);
    sync.load().await.unwrap();

    let served = sync.dequeue().await.unwrap();
    assert_eq!(served, Some(Customer::new("Alice")));
    assert_eq!(sync.last_served(), Some(&Customer::new("Alice")));
    assert_eq!(sync.queue(), &[Customer::new("Bob")]);
}

#[tokio::test]
async fn clear_queue_reloads_instead_of_clearing_locally() {
    let (store, base) = start_stub().await;
    store.lock().unwrap().queue = vec![
        Customer::new("Alice"),
        Customer::new("Bob"),
        Customer::new("Cara"),
    ];

    let mut sync = connect(&base);
    sync.load().await.unwrap();
    let gets_before = store.lock().unwrap().queue_gets;

    sync.clear_queue().await.unwrap();

    assert!(sync.queue().is_empty());
    // The empty queue came from a refetch, not a local clear.
    assert_eq!(store.lock().unwrap().queue_gets, gets_before + 1);
}

// ========== Failure handling ==========

#[tokio::test]
async fn failed_write_leaves_local_state_untouched() {
    let (store, base) = start_stub().await;
    store.lock().unwrap().items = vec![item("eggs", 12)];
    store.lock().unwrap().queue = vec![Customer::new("Alice")];

    let mut sync = connect(&base);
    sync.load().await.unwrap();
    store.lock().unwrap().fail_writes = true;

    let err = sync.add_or_increment("eggs", 1).await.unwrap_err();
    match err {
        ClientError::Api { status, .. } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR)
        }
        other => panic!("expected Api error, got {other:?}"),
    }

    let err = sync.clear_queue().await.unwrap_err();
    assert!(matches!(err, ClientError::Api { .. }));

    assert_eq!(sync.items(), &[item("eggs", 12)]);
    assert_eq!(sync.queue(), &[Customer::new("Alice")]);
}

#[tokio::test]
async fn unreachable_store_surfaces_a_transport_error() {
    // Nothing listens here; the load must fail loudly, not render empty.
    let mut sync = connect("http://127.0.0.1:9");
    let err = sync.load().await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
    assert!(sync.items().is_empty());
    assert!(sync.queue().is_empty());
}

#[tokio::test]
async fn blank_names_are_rejected_before_any_request() {
    let (store, base) = start_stub().await;
    let mut sync = connect(&base);

    let err = sync.add_or_increment("   ", 3).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    let err = sync.enqueue("", "note").await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    let err = sync.delete_item(" ").await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));

    assert_eq!(store.lock().unwrap().writes, 0);
}

// ========== Auth ==========

#[tokio::test]
async fn login_attaches_the_bearer_token() {
    let (store, base) = start_stub().await;
    let mut sync = connect(&base);

    let session = sync.login("ana", "secret").await.unwrap();
    assert_eq!(session.username, "ana");
    assert!(sync.session().is_authenticated());

    sync.load().await.unwrap();
    assert_eq!(
        store.lock().unwrap().last_auth_header.as_deref(),
        Some(format!("Bearer {TEST_TOKEN}").as_str())
    );

    sync.logout().await;
    assert!(!sync.session().is_authenticated());
    assert!(sync.items().is_empty());

    sync.load().await.unwrap();
    assert_eq!(store.lock().unwrap().last_auth_header, None);
}

#[tokio::test]
async fn failed_login_returns_to_unauthenticated() {
    let (_store, base) = start_stub().await;
    let mut sync = connect(&base);

    let err = sync.login("ana", "wrong").await.unwrap_err();
    match err {
        ClientError::Api { status, .. } => assert_eq!(status, StatusCode::UNAUTHORIZED),
        other => panic!("expected Api error, got {other:?}"),
    }
    assert!(!sync.session().is_authenticated());
}
