use crate::domain::TokenIssuer;
use std::sync::Arc;
use url::Url;

#[derive(Clone)]
pub struct AppState {
    // We use Arc<dyn Trait> to hold any implementation (dependency injection).
    // `None` when the API key or URL is missing; reported per request.
    pub issuer: Option<Arc<dyn TokenIssuer>>,
    // Host serving the hosted redemption page.
    pub redeem_base_url: Url,
}
