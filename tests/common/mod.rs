//! Shared integration-test harness: an in-process axum fixture API the
//! runner executes plans against.

#![allow(dead_code)]

use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;

/// Bearer token issued by the fixture's `/login` endpoint.
pub const FIXTURE_TOKEN: &str = "tok-fixture-secret";

/// A running fixture API server on an ephemeral local port.
///
/// The serve task is aborted on drop.
pub struct TestServer {
    /// Base URL of the fixture, e.g. `http://127.0.0.1:49152`.
    pub base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Binds the fixture API on an ephemeral port and starts serving.
    pub async fn spawn() -> Self {
        let app = Router::new()
            .route("/login", post(login))
            .route("/login-numeric", post(login_numeric))
            .route("/api/users", get(list_users).post(create_user))
            .route("/api/users/{id}", get(get_user))
            .route("/api/private", get(private))
            .route("/api/text", get(plain_text));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind fixture server");
        let addr = listener.local_addr().expect("no local addr");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fixture serve failed");
        });

        Self {
            base_url: format!("http://{addr}"),
            handle,
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body.get("username").is_some() && body.get("password").is_some() {
        (StatusCode::OK, Json(json!({ "token": FIXTURE_TOKEN })))
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "missing credentials" })),
        )
    }
}

async fn login_numeric(Json(_body): Json<Value>) -> Json<Value> {
    Json(json!({ "token": 9_876_512 }))
}

async fn list_users() -> Json<Value> {
    Json(json!({
        "ids": [1, 2, 3],
        "users": [
            { "id": 1, "name": "alice" },
            { "id": 2, "name": "bob" },
            { "id": 3, "name": "carol" }
        ]
    }))
}

async fn get_user(Path(id): Path<u64>) -> Json<Value> {
    Json(json!({ "id": id, "name": format!("user-{id}") }))
}

async fn create_user(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::CREATED,
        Json(json!({ "id": 42, "echo": body })),
    )
}

async fn private(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {FIXTURE_TOKEN}"));

    if authorized {
        (StatusCode::OK, Json(json!({ "ok": true })))
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({ "ok": false })))
    }
}

async fn plain_text() -> &'static str {
    "hello, definitely not json"
}
