// Framework bootstrap for the redemption server runtime.

use crate::domain::TokenIssuer;
use crate::frameworks::config;
use crate::interface_adapters::clients::OrcuneClient;
use crate::interface_adapters::routes;
use crate::interface_adapters::state::AppState;

use std::io::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use url::Url;

// Settings the server is built from; `from_env` is what the binary uses.
#[derive(Clone, Debug)]
pub struct ServerSettings {
    pub api_key: Option<String>,
    pub api_url: Option<String>,
    pub redeem_base_url: String,
}

impl ServerSettings {
    pub fn from_env() -> Self {
        Self {
            api_key: config::orcune_api_key(),
            api_url: config::orcune_api_url(),
            redeem_base_url: config::redeem_base_url(),
        }
    }
}

fn init_runtime() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run(listener: tokio::net::TcpListener) -> Result<()> {
    run_with_settings(listener, ServerSettings::from_env()).await
}

pub async fn run_with_settings(
    listener: tokio::net::TcpListener,
    settings: ServerSettings,
) -> Result<()> {
    let address = listener.local_addr()?;
    let state = build_state(settings)?;

    // Start the web server with the HTTP routes wired up.
    let app = routes::app(state);

    tracing::info!(%address, "listening");

    // Serve app and report errors rather than panicking.
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let address = SocketAddr::from(([0, 0, 0, 0], config::http_port()));

    // Bind TCP listener with error handling.
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener).await
}

fn build_state(settings: ServerSettings) -> Result<Arc<AppState>> {
    let redeem_base_url = Url::parse(&settings.redeem_base_url).map_err(|e| {
        std::io::Error::other(format!(
            "invalid redeem base url {}: {e}",
            settings.redeem_base_url
        ))
    })?;

    let issuer = match (settings.api_url, settings.api_key) {
        (Some(api_url), Some(api_key)) => {
            tracing::debug!(api_url = %api_url, "token api client configured.");
            Some(Arc::new(OrcuneClient::new(api_url, api_key)) as Arc<dyn TokenIssuer>)
        }
        _ => {
            tracing::warn!("ORCUNE_API_KEY or ORCUNE_API_URL not set; token requests will fail.");
            None
        }
    };

    Ok(Arc::new(AppState {
        issuer,
        redeem_base_url,
    }))
}
