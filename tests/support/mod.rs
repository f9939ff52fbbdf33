// Shared bootstrapping for integration tests: a fake token API plus redemption servers.

use axum::{Json, Router, http::HeaderMap, http::StatusCode, response::IntoResponse, routing::post};
use redemption_server::ServerSettings;
use serde_json::{Value, json};
use std::{
    sync::{Arc, Mutex, OnceLock},
    time::Duration,
};

const TEST_API_KEY: &str = "test-key";

// Voucher codes the fake token API has seen.
static UPSTREAM_CALLS: Mutex<Vec<String>> = Mutex::new(Vec::new());

static UPSTREAM_URL: OnceLock<String> = OnceLock::new();
static CONFIGURED_URL: OnceLock<String> = OnceLock::new();
static UNCONFIGURED_URL: OnceLock<String> = OnceLock::new();

// Base URL of a redemption server wired to the fake token API.
pub fn ensure_server() -> &'static str {
    CONFIGURED_URL
        .get_or_init(|| {
            let upstream = ensure_upstream();
            spawn_server(ServerSettings {
                api_key: Some(TEST_API_KEY.to_string()),
                api_url: Some(format!("{upstream}/v1/redemption-tokens")),
                redeem_base_url: "https://orcune.shop".to_string(),
            })
        })
        .as_str()
}

// Base URL of a redemption server with no token API configuration.
#[allow(dead_code)]
pub fn ensure_unconfigured_server() -> &'static str {
    UNCONFIGURED_URL
        .get_or_init(|| {
            spawn_server(ServerSettings {
                api_key: None,
                api_url: None,
                redeem_base_url: "https://orcune.shop".to_string(),
            })
        })
        .as_str()
}

#[allow(dead_code)]
pub fn upstream_saw(voucher_code: &str) -> bool {
    UPSTREAM_CALLS
        .lock()
        .expect("upstream calls mutex poisoned")
        .iter()
        .any(|seen| seen == voucher_code)
}

pub fn unique_voucher(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4())
}

fn ensure_upstream() -> &'static str {
    UPSTREAM_URL
        .get_or_init(|| {
            spawn_on_own_runtime(|listener| async move {
                let app = Router::new().route("/v1/redemption-tokens", post(fake_issue_token));
                axum::serve(listener, app).await
            })
        })
        .as_str()
}

fn spawn_server(settings: ServerSettings) -> String {
    spawn_on_own_runtime(move |listener| redemption_server::run_with_settings(listener, settings))
}

// Behavior keyed on the voucher code prefix so tests can run in parallel.
async fn fake_issue_token(headers: HeaderMap, Json(body): Json<Value>) -> impl IntoResponse {
    let voucher_code = body["voucherCode"].as_str().unwrap_or_default().to_string();
    UPSTREAM_CALLS
        .lock()
        .expect("upstream calls mutex poisoned")
        .push(voucher_code.clone());

    if headers.get("x-api-key").and_then(|v| v.to_str().ok()) != Some(TEST_API_KEY) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid API key" })),
        )
            .into_response();
    }

    if voucher_code.starts_with("redeemed") {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "message": "Voucher already redeemed" })),
        )
            .into_response();
    }

    if voucher_code.starts_with("unknown") {
        return (StatusCode::NOT_FOUND, Json(json!({}))).into_response();
    }

    if voucher_code.starts_with("missing") {
        return (StatusCode::NOT_FOUND, Json(json!("Voucher not found"))).into_response();
    }

    if voucher_code.starts_with("outage") {
        return (StatusCode::BAD_GATEWAY, "<html>upstream down</html>").into_response();
    }

    Json(json!({
        "token": format!("tok-{}", body["customerId"].as_str().unwrap_or_default()),
        "expiresAt": "2030-01-01T00:00:00Z"
    }))
    .into_response()
}

// Spawn an OS thread so each server outlives individual `#[tokio::test]` runtimes.
fn spawn_on_own_runtime<F, Fut>(serve: F) -> String
where
    F: FnOnce(tokio::net::TcpListener) -> Fut + Send + 'static,
    Fut: std::future::Future<Output = std::io::Result<()>>,
{
    let published_url = Arc::new(OnceLock::<String>::new());
    let published_url_thread = Arc::clone(&published_url);

    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().expect("test runtime");
        runtime.block_on(async move {
            // Bind to an ephemeral port to avoid collisions with local services.
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("bind ephemeral test port");
            let addr = listener.local_addr().expect("get local addr");
            let _ = published_url_thread.set(format!("http://{}", addr));
            serve(listener).await.expect("server failed");
        });
    });

    wait_for_url_and_readiness(published_url)
}

// Wait for URL publication and then for the socket to accept TCP connections.
fn wait_for_url_and_readiness(published_url: Arc<OnceLock<String>>) -> String {
    let base_url = loop {
        if let Some(url) = published_url.get() {
            break url.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };

    let addr = base_url
        .strip_prefix("http://")
        .expect("base url should use http://");

    for _ in 0..100 {
        if std::net::TcpStream::connect(addr).is_ok() {
            return base_url;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    panic!("server did not become ready in time");
}
