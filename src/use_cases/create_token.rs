use serde_json::Value;
use url::Url;

use crate::domain::entities::RedemptionRequest;
use crate::domain::errors::{IssueTokenError, RedemptionError};
use crate::domain::ports::TokenIssuer;

pub const UPSTREAM_FALLBACK_MESSAGE: &str = "Failed to create redemption token";

// Response returned by the create token use case.
#[derive(Debug)]
pub struct CreatedToken {
    pub token: String,
    pub expires_at: Value,
    pub redemption_url: String,
}

// Token creation use case. `issuer` is `None` when the API key or URL is not configured.
pub struct CreateTokenUseCase<I> {
    pub issuer: Option<I>,
    pub redeem_base_url: Url,
}

impl<I> CreateTokenUseCase<I>
where
    I: TokenIssuer,
{
    pub async fn execute(
        &self,
        voucher_code: Option<String>,
        customer_id: Option<String>,
    ) -> Result<CreatedToken, RedemptionError> {
        let (Some(voucher_code), Some(customer_id)) = (present(voucher_code), present(customer_id))
        else {
            return Err(RedemptionError::MissingFields);
        };

        let issuer = self
            .issuer
            .as_ref()
            .ok_or(RedemptionError::MissingConfiguration)?;

        let issued = issuer
            .issue_token(RedemptionRequest {
                voucher_code,
                customer_id,
            })
            .await
            .map_err(|err| match err {
                IssueTokenError::Rejected { status, message } => RedemptionError::Upstream {
                    status,
                    message: message.unwrap_or_else(|| UPSTREAM_FALLBACK_MESSAGE.to_string()),
                },
                IssueTokenError::Failed(detail) => RedemptionError::Internal(detail),
            })?;

        let redemption_url = build_redemption_url(&self.redeem_base_url, &issued.token);

        Ok(CreatedToken {
            token: issued.token,
            expires_at: issued.expires_at,
            redemption_url,
        })
    }
}

// `<base>/redeem?token=<token>`, keeping any path prefix on the base.
// The token is appended as issued, without query encoding.
pub fn build_redemption_url(base: &Url, token: &str) -> String {
    let mut url = base.clone();
    let path = format!("{}/redeem", base.path().trim_end_matches('/'));
    url.set_path(&path);
    url.set_query(None);
    url.set_fragment(None);
    format!("{url}?token={token}")
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
