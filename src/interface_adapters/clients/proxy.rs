use crate::domain::{RedemptionGrant, TokenProxy};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const CREATE_TOKEN_PATH: &str = "/api/create-orcune-token";
const PROXY_FALLBACK_MESSAGE: &str = "Failed to create token";

// Page-side client for the token proxy route.
#[derive(Clone)]
pub struct ProxyClient {
    http: Client,
    pub base_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProxyRequest<'a> {
    voucher_code: &'a str,
    customer_id: &'a str,
}

// Loose view over both success and error bodies of the proxy.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProxyResponse {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    expires_at: Value,
    #[serde(default)]
    redemption_url: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ProxyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl TokenProxy for ProxyClient {
    async fn create_token(
        &self,
        voucher_code: &str,
        customer_id: &str,
    ) -> Result<RedemptionGrant, String> {
        let url = format!("{}{}", self.base_url, CREATE_TOKEN_PATH);
        let res = self
            .http
            .post(url)
            .json(&ProxyRequest {
                voucher_code,
                customer_id,
            })
            .send()
            .await
            .map_err(|err| err.to_string())?;
        let status = res.status();

        let body = res
            .json::<ProxyResponse>()
            .await
            .map_err(|err| err.to_string())?;

        if !status.is_success() {
            return Err(body
                .error
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| PROXY_FALLBACK_MESSAGE.to_string()));
        }

        Ok(RedemptionGrant {
            token: body.token,
            expires_at: body.expires_at,
            redemption_url: body.redemption_url,
        })
    }
}
