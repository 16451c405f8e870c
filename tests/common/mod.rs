#![allow(dead_code)]

pub mod mock_tron_node;

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use serde_json::Value;
use std::{
    sync::{Arc, LazyLock, Mutex},
    time::Duration,
};
use tower::ServiceExt;
use tron_address_api::{
    config::Config,
    db::{Db, IN_MEMORY, QueryStore, StoreError},
    models::{AddressQuery, NewAddressQuery},
    server::{build_router, state::AppState},
    tron::{Account, AccountResource, TronClient, TronError},
    types::{LogLevel, Network},
};

pub const ADDRESS: &str = "TJRabPrwbZy45sbavfcjinPJC18kjpRTv8";
pub const USDT_CONTRACT: &str = "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t";

static INIT_LOGGING: LazyLock<()> = LazyLock::new(|| {
    tracing_subscriber::fmt::init();
});

pub fn initialize_logging() {
    let _ = *INIT_LOGGING;
}

pub fn test_config() -> Arc<Config> {
    let config = Config {
        server_address: "127.0.0.1".parse().unwrap(),
        server_port: 8000,
        log_level: LogLevel::Info.into(),
        network: Network::Shasta,
        node_endpoint: Network::Shasta.default_endpoint().parse().unwrap(),
        api_key: None,
        request_timeout: Duration::from_secs(5),
        database_url: IN_MEMORY.to_string(),
        max_db_connections: 1,
    };

    Arc::new(config)
}

/// Scripted node: answers every call with the configured result and records it.
#[derive(Default)]
pub struct FakeTron {
    pub account: Option<Result<Account, TronError>>,
    pub resource: Option<Result<AccountResource, TronError>>,
    calls: Mutex<Vec<String>>,
}

impl FakeTron {
    pub fn with_account(balance: i64, resource: AccountResource) -> Self {
        Self {
            account: Some(Ok(Account {
                address: Some(ADDRESS.to_string()),
                balance: Some(balance),
            })),
            resource: Some(Ok(resource)),
            ..Default::default()
        }
    }

    pub fn failing(error: TronError) -> Self {
        Self {
            account: Some(Err(error)),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TronClient for FakeTron {
    async fn get_account(&self, address: &str) -> Result<Account, TronError> {
        self.calls.lock().unwrap().push(format!("getaccount {address}"));
        self.account.clone().unwrap_or(Ok(Account::default()))
    }

    async fn get_account_resource(&self, address: &str) -> Result<AccountResource, TronError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("getaccountresource {address}"));
        self.resource.clone().unwrap_or(Ok(AccountResource::default()))
    }
}

pub struct FailingStore;

#[async_trait]
impl QueryStore for FailingStore {
    async fn insert(&self, _record: NewAddressQuery) -> Result<AddressQuery, StoreError> {
        Err(StoreError::Pool("disk I/O error".to_string()))
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Err(StoreError::Pool("disk I/O error".to_string()))
    }

    async fn list_page(&self, _offset: i64, _limit: i64) -> Result<Vec<AddressQuery>, StoreError> {
        Err(StoreError::Pool("disk I/O error".to_string()))
    }
}

pub fn sample_resource() -> AccountResource {
    AccountResource {
        free_net_limit: Some(1500),
        free_net_used: Some(900),
        energy_limit: Some(1000),
        energy_used: Some(1000),
    }
}

pub async fn memory_store() -> Arc<Db> {
    Arc::new(Db::new(IN_MEMORY, 1).await.expect("in-memory database"))
}

pub fn build_app(tron: Arc<dyn TronClient>, store: Arc<dyn QueryStore>) -> Router {
    build_router(AppState::new(test_config(), tron, store))
}

pub async fn send(app: &Router, request: Request<Body>) -> (Response<Body>, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("request should be handled");
    let (parts, body) = response.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.expect("readable body");
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (Response::from_parts(parts, Body::empty()), json)
}

pub fn post_address(address: &str) -> Request<Body> {
    post_body(serde_json::json!({ "address": address }).to_string())
}

pub fn post_body(body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/addresses")
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}
