use serde::{Deserialize, Serialize};
use serde_json::Value;

// Request payload for the token proxy route.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTokenRequest {
    #[serde(default)]
    pub voucher_code: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
}

// Response payload for a freshly minted redemption token.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTokenResponse {
    pub success: bool,
    pub token: String,
    pub expires_at: Value,
    pub redemption_url: String,
}
