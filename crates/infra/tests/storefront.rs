use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use rocketshoes_cart::{
    AmountUpdate, CART_STORAGE_KEY, Cart, CartError, CartStore, ProductCatalog, ServiceError,
    StockService,
};
use rocketshoes_core::ProductId;
use rocketshoes_infra::{HttpStorefront, MemoryStorage, SqliteStorage};

type StockLevels = Arc<Mutex<HashMap<u64, i64>>>;

/// Ids with special behaviour in the fake catalog.
const BROKEN_PRODUCT: u64 = 13;
const GARBLED_PRODUCT: u64 = 14;
const SLOW_STOCK: u64 = 99;

async fn stock(State(levels): State<StockLevels>, Path(id): Path<u64>) -> Response {
    if id == SLOW_STOCK {
        tokio::time::sleep(Duration::from_secs(2)).await;
    }
    let amount = levels.lock().unwrap().get(&id).copied();
    match amount {
        Some(amount) => Json(json!({ "id": id, "amount": amount })).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({}))).into_response(),
    }
}

async fn product(Path(id): Path<u64>) -> Response {
    match id {
        BROKEN_PRODUCT => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        GARBLED_PRODUCT => (StatusCode::OK, "<html>not a product</html>").into_response(),
        1..=6 => Json(json!({
            "id": id,
            "title": format!("Tênis {id}"),
            "price": 139.9 + id as f64,
            "image": format!("https://cdn.rocketshoes.dev/{id}.jpg"),
            "brand": "rocket"
        }))
        .into_response(),
        _ => (StatusCode::NOT_FOUND, Json(json!({}))).into_response(),
    }
}

struct TestServer {
    base_url: String,
    levels: StockLevels,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        let levels: StockLevels = Arc::new(Mutex::new(HashMap::new()));
        let app = Router::new()
            .route("/stock/:id", get(stock))
            .route("/products/:id", get(product))
            .with_state(levels.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            levels,
            handle,
        }
    }

    fn set_stock(&self, id: u64, amount: i64) {
        self.levels.lock().unwrap().insert(id, amount);
    }

    fn storefront(&self) -> HttpStorefront {
        HttpStorefront::new(format!("{}/", self.base_url)).unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn pid(id: u64) -> ProductId {
    ProductId::new(id)
}

#[tokio::test]
async fn fetches_stock_and_products() {
    let server = TestServer::spawn().await;
    server.set_stock(1, 3);
    let api = server.storefront();
    assert_eq!(api.base_url(), server.base_url);

    let stock = api.stock(pid(1)).await.unwrap();
    assert_eq!(stock.amount, 3);
    assert_eq!(stock.id, Some(pid(1)));

    let product = api.product(pid(2)).await.unwrap();
    assert_eq!(product.id, pid(2));
    assert_eq!(product.title, "Tênis 2");
    assert_eq!(product.attribute("brand"), Some(&json!("rocket")));
}

#[tokio::test]
async fn maps_http_failures() {
    let server = TestServer::spawn().await;
    let api = server.storefront();

    assert_eq!(
        api.stock(pid(42)).await.unwrap_err(),
        ServiceError::NotFound(pid(42))
    );
    assert_eq!(
        api.product(pid(42)).await.unwrap_err(),
        ServiceError::NotFound(pid(42))
    );
    assert_eq!(
        api.product(pid(BROKEN_PRODUCT)).await.unwrap_err(),
        ServiceError::Api(500, "boom".to_string())
    );
    assert!(matches!(
        api.product(pid(GARBLED_PRODUCT)).await.unwrap_err(),
        ServiceError::Parse(_)
    ));
}

#[tokio::test]
async fn slow_responses_time_out() {
    let server = TestServer::spawn().await;
    server.set_stock(SLOW_STOCK, 1);
    let api = HttpStorefront::with_timeout(server.base_url.clone(), Duration::from_millis(200))
        .unwrap();

    let err = api.stock(pid(SLOW_STOCK)).await.unwrap_err();
    assert!(matches!(err, ServiceError::Network(_)));
}

#[tokio::test]
async fn unreachable_api_is_a_network_error() {
    let server = TestServer::spawn().await;
    let base_url = server.base_url.clone();
    drop(server);
    // Give the aborted server task time to release the listener.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let api = HttpStorefront::new(base_url).unwrap();
    let err = api.stock(pid(1)).await.unwrap_err();
    assert!(matches!(err, ServiceError::Network(_)));
}

#[tokio::test]
async fn cart_scenario_over_http() {
    let server = TestServer::spawn().await;
    server.set_stock(1, 5);
    let api = Arc::new(server.storefront());
    let storage = Arc::new(MemoryStorage::new());

    let store = CartStore::builder(api.clone(), api.clone(), storage.clone())
        .open()
        .await
        .unwrap();

    for _ in 0..4 {
        store.add_product(pid(1)).await.unwrap();
    }
    assert_eq!(store.cart().amount_of(pid(1)), 4);

    store
        .update_product_amount(AmountUpdate::new(pid(1), 5))
        .await
        .unwrap();
    let err = store
        .update_product_amount(AmountUpdate::new(pid(1), 6))
        .await
        .unwrap_err();
    assert!(err.is_stock_exceeded());

    let persisted = Cart::from_snapshot(&storage.get(CART_STORAGE_KEY).unwrap()).unwrap();
    assert_eq!(persisted, store.cart());
    assert_eq!(persisted.amount_of(pid(1)), 5);
    assert_eq!(
        persisted.items()[0].product.attribute("brand"),
        Some(&json!("rocket"))
    );

    store.remove_product(pid(1)).await.unwrap();
    assert!(store.cart().is_empty());
}

#[tokio::test]
async fn stock_drop_between_calls_is_respected() {
    let server = TestServer::spawn().await;
    server.set_stock(3, 2);
    let api = Arc::new(server.storefront());
    let store = CartStore::builder(api.clone(), api.clone(), Arc::new(MemoryStorage::new()))
        .open()
        .await
        .unwrap();

    store.add_product(pid(3)).await.unwrap();
    server.set_stock(3, 1);

    let err = store.add_product(pid(3)).await.unwrap_err();
    assert_eq!(
        err,
        CartError::StockExceeded {
            product_id: pid(3),
            requested: 2,
            available: 1,
        }
    );
}

#[tokio::test]
async fn cart_survives_reopen_with_sqlite() {
    let server = TestServer::spawn().await;
    server.set_stock(2, 4);
    let api = Arc::new(server.storefront());
    let storage = Arc::new(SqliteStorage::in_memory().await.unwrap());

    {
        let store = CartStore::builder(api.clone(), api.clone(), storage.clone())
            .open()
            .await
            .unwrap();
        store.add_product(pid(2)).await.unwrap();
        store.add_product(pid(2)).await.unwrap();
    }

    let reopened = CartStore::builder(api.clone(), api.clone(), storage)
        .open()
        .await
        .unwrap();
    assert_eq!(reopened.cart().amount_of(pid(2)), 2);
    assert_eq!(reopened.cart().items()[0].product.title, "Tênis 2");
}
