use crate::interface_adapters::handlers::assets::redeem_script;
use crate::interface_adapters::handlers::health::health;
use crate::interface_adapters::handlers::page::redeem_page;
use crate::interface_adapters::handlers::token::create_token;
use crate::interface_adapters::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

pub fn app(state: Arc<AppState>) -> Router {
    // Wire the HTTP routes to their handlers.
    Router::new()
        .route("/api/create-orcune-token", post(create_token))
        .route("/redeem", get(redeem_page))
        .route("/assets/redeem.js", get(redeem_script))
        .route("/health", get(health))
        .with_state(state)
}
