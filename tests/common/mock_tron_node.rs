use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// A request seen by the mock node.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub path: String,
    pub api_key: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    account: Value,
    resource: Value,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

pub struct MockTronNode {
    pub url: String,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl MockTronNode {
    pub async fn responding(account: Value, resource: Value) -> Self {
        Self::start(StatusCode::OK, account, resource).await
    }

    pub async fn failing(status: StatusCode, body: Value) -> Self {
        Self::start(status, body.clone(), body).await
    }

    async fn start(status: StatusCode, account: Value, resource: Value) -> Self {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            status,
            account,
            resource,
            seen: seen.clone(),
        };

        let mock_app = Router::new()
            .route("/wallet/getaccount", post(get_account))
            .route("/wallet/getaccountresource", post(get_account_resource))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let url = format!("http://{addr}");

        tokio::spawn(async move {
            axum::serve(listener, mock_app).await.unwrap();
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;

        Self { url, seen }
    }

    pub fn unreachable() -> Self {
        Self {
            url: "http://127.0.0.1:1".to_string(),
            seen: Arc::default(),
        }
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

fn record(state: &MockState, path: &str, headers: &HeaderMap, body: Value) {
    let api_key = headers
        .get("TRON-PRO-API-KEY")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    state.seen.lock().unwrap().push(SeenRequest {
        path: path.to_string(),
        api_key,
        body,
    });
}

async fn get_account(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    record(&state, "/wallet/getaccount", &headers, body);
    (state.status, Json(state.account.clone()))
}

async fn get_account_resource(
    State(state): State<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    record(&state, "/wallet/getaccountresource", &headers, body);
    (state.status, Json(state.resource.clone()))
}
