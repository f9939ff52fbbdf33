use crate::domain::RedemptionError;
use crate::interface_adapters::http::ErrorResponse;
use crate::interface_adapters::protocol::{CreateTokenRequest, CreateTokenResponse};
use crate::interface_adapters::state::AppState;
use crate::use_cases::CreateTokenUseCase;
use axum::{Json, body::Bytes, extract::State, http::StatusCode};
use std::sync::Arc;

pub const MISSING_FIELDS_MESSAGE: &str = "voucherCode and customerId are required";
pub const MISSING_CONFIGURATION_MESSAGE: &str = "Missing Orcune API configuration";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

// Mint a redemption token through the token API.
// The body is parsed by hand so malformed JSON lands in the generic 500 path.
#[tracing::instrument(name = "create_orcune_token", skip_all)]
pub async fn create_token(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<CreateTokenResponse>, (StatusCode, Json<ErrorResponse>)> {
    let payload: CreateTokenRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::error!(error = %e, "failed to parse token request body.");
        error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
    })?;

    let use_case = CreateTokenUseCase {
        issuer: state.issuer.clone(),
        redeem_base_url: state.redeem_base_url.clone(),
    };

    let created = use_case
        .execute(payload.voucher_code, payload.customer_id)
        .await
        .map_err(map_redemption_error)?;

    tracing::info!("redemption token created.");

    Ok(Json(CreateTokenResponse {
        success: true,
        token: created.token,
        expires_at: created.expires_at,
        redemption_url: created.redemption_url,
    }))
}

// Helper to build a JSON error response.
fn error_response(status: StatusCode, message: &str) -> (StatusCode, Json<ErrorResponse>) {
    (status, Json(ErrorResponse::new(message)))
}

fn map_redemption_error(err: RedemptionError) -> (StatusCode, Json<ErrorResponse>) {
    match err {
        RedemptionError::MissingFields => {
            tracing::info!("token request rejected: missing fields.");
            error_response(StatusCode::BAD_REQUEST, MISSING_FIELDS_MESSAGE)
        }
        RedemptionError::MissingConfiguration => {
            tracing::error!("ORCUNE_API_KEY or ORCUNE_API_URL is not configured.");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, MISSING_CONFIGURATION_MESSAGE)
        }
        RedemptionError::Upstream { status, message } => {
            tracing::warn!(status, message = %message, "token api rejected the request.");
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            (status, Json(ErrorResponse::new(message)))
        }
        RedemptionError::Internal(detail) => {
            tracing::error!(error = %detail, "failed to create redemption token.");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
        }
    }
}
