use crate::domain::{IssueTokenError, IssuedToken, RedemptionRequest, TokenIssuer};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::fmt;

pub const API_KEY_HEADER: &str = "X-API-Key";

// Thin wrapper around reqwest for the token-issuing API.
#[derive(Clone)]
pub struct OrcuneClient {
    http: Client,
    api_url: String,
    api_key: String,
}

#[derive(Debug)]
pub enum OrcuneClientError {
    Transport(reqwest::Error),
    Upstream {
        status: StatusCode,
        message: Option<String>,
    },
    Decode(reqwest::Error),
}

impl fmt::Display for OrcuneClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrcuneClientError::Transport(err) => write!(f, "token api transport error: {err}"),
            OrcuneClientError::Upstream { status, message } => {
                if let Some(message) = message {
                    write!(f, "token api upstream error {status}: {message}")
                } else {
                    write!(f, "token api upstream error {status}")
                }
            }
            OrcuneClientError::Decode(err) => write!(f, "token api response decode error: {err}"),
        }
    }
}

impl std::error::Error for OrcuneClientError {}

impl From<OrcuneClientError> for IssueTokenError {
    fn from(err: OrcuneClientError) -> Self {
        match err {
            OrcuneClientError::Upstream { status, message } => IssueTokenError::Rejected {
                status: status.as_u16(),
                message,
            },
            other => IssueTokenError::Failed(other.to_string()),
        }
    }
}

impl OrcuneClient {
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }

    async fn request_token(
        &self,
        request: &RedemptionRequest,
    ) -> Result<IssuedToken, OrcuneClientError> {
        let res = self
            .http
            .post(self.api_url.as_str())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(request)
            .send()
            .await
            .map_err(OrcuneClientError::Transport)?;
        let status = res.status();

        // Keep upstream status/message so the proxy can pass them through.
        // A non-JSON error body is a decode failure, not an upstream message.
        if !status.is_success() {
            let payload = res
                .json::<Value>()
                .await
                .map_err(OrcuneClientError::Decode)?;
            let message = error_message(&payload);
            return Err(OrcuneClientError::Upstream { status, message });
        }

        res.json::<IssuedToken>()
            .await
            .map_err(OrcuneClientError::Decode)
    }
}

// Only a non-empty string `message` on an object body counts.
fn error_message(payload: &Value) -> Option<String> {
    payload
        .get("message")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl TokenIssuer for OrcuneClient {
    async fn issue_token(&self, request: RedemptionRequest) -> Result<IssuedToken, IssueTokenError> {
        self.request_token(&request).await.map_err(|err| {
            tracing::warn!(error = %err, "token api call failed");
            IssueTokenError::from(err)
        })
    }
}
