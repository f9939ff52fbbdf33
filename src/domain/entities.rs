use serde::{Deserialize, Serialize};
use serde_json::Value;

// The serialization within this layer is a dependency leak, but its a pragmatic approach
// Payload forwarded to the token-issuing API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedemptionRequest {
    pub voucher_code: String,
    pub customer_id: String,
}

// Token minted by the token-issuing API.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedToken {
    pub token: String,
    // Passed through untouched; the upstream owns its timestamp format.
    #[serde(default)]
    pub expires_at: Value,
}

// What the browser side gets back from the proxy.
#[derive(Clone, Debug, PartialEq)]
pub struct RedemptionGrant {
    pub token: Option<String>,
    pub expires_at: Value,
    pub redemption_url: Option<String>,
}
