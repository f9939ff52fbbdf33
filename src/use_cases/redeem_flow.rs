use serde_json::Value;
use std::fmt;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, warn};

use crate::domain::completion::{WindowMessage, completion_voucher};
use crate::domain::page::{
    MISSING_PARAMS_NOTICE, MISSING_PARAMS_ON_REDEEM, Notification, PageParams,
    REDEEM_FALLBACK_ERROR, REDEEM_SUCCESS_NOTICE,
};
use crate::domain::ports::{Notifier, PopupOpener, PopupWindow, TokenProxy};

pub const POPUP_NAME: &str = "OrcuneRedeem";
pub const POPUP_FEATURES: &str = "width=500,height=600,scrollbars=yes";

// Errors that end a redemption attempt.
#[derive(Debug)]
pub enum RedeemError {
    MissingParameters,
    // Proxy call failed; holds the message for the user.
    Proxy(String),
    MissingRedemptionUrl,
    PopupBlocked,
    // The message source went away before a completion message arrived.
    ListenerClosed,
}

impl fmt::Display for RedeemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedeemError::MissingParameters => f.write_str(MISSING_PARAMS_ON_REDEEM),
            RedeemError::Proxy(message) => f.write_str(message),
            RedeemError::MissingRedemptionUrl => {
                f.write_str("No redemptionUrl returned from backend")
            }
            RedeemError::PopupBlocked => f.write_str("Popup was blocked"),
            RedeemError::ListenerClosed => {
                f.write_str("Redemption window closed before completion")
            }
        }
    }
}

impl std::error::Error for RedeemError {}

// Everything the widget needs, passed in explicitly at init.
pub struct WidgetConfig<P, O> {
    pub proxy: P,
    pub popups: O,
    // Source of cross-window messages delivered to the opener.
    pub messages: broadcast::Sender<WindowMessage>,
    // When set, messages from any other origin are ignored.
    pub trusted_origin: Option<String>,
}

pub struct RedemptionWidget<P, O> {
    config: WidgetConfig<P, O>,
}

impl<P, O> RedemptionWidget<P, O>
where
    P: TokenProxy,
    O: PopupOpener,
{
    pub fn init(config: WidgetConfig<P, O>) -> Self {
        Self { config }
    }

    // Mint a token through the proxy and open the hosted redemption page.
    pub async fn redeem(
        &self,
        voucher_code: &str,
        customer_id: &str,
    ) -> Result<PendingRedemption, RedeemError> {
        let grant = self
            .config
            .proxy
            .create_token(voucher_code, customer_id)
            .await
            .map_err(RedeemError::Proxy)?;

        let redemption_url = grant
            .redemption_url
            .filter(|url| !url.is_empty())
            .ok_or(RedeemError::MissingRedemptionUrl)?;

        // Subscribe before opening so an immediate reply is not lost.
        let messages = self.config.messages.subscribe();

        let popup = self
            .config
            .popups
            .open(&redemption_url, POPUP_NAME, POPUP_FEATURES)
            .ok_or(RedeemError::PopupBlocked)?;

        debug!(%redemption_url, "redemption popup opened");

        Ok(PendingRedemption {
            popup,
            messages,
            trusted_origin: self.config.trusted_origin.clone(),
            redemption_url,
            token: grant.token,
            expires_at: grant.expires_at,
        })
    }
}

// An open popup waiting for its completion message.
// Dropping it unsubscribes from the message source.
pub struct PendingRedemption {
    popup: Box<dyn PopupWindow>,
    messages: broadcast::Receiver<WindowMessage>,
    trusted_origin: Option<String>,
    redemption_url: String,
    token: Option<String>,
    expires_at: Value,
}

impl PendingRedemption {
    pub fn redemption_url(&self) -> &str {
        &self.redemption_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    // Passed through from the proxy untouched; `Null` when it sent none.
    pub fn expires_at(&self) -> &Value {
        &self.expires_at
    }

    // Wait for the first completion message, close the popup and return the voucher payload.
    pub async fn wait_for_completion(mut self) -> Result<Value, RedeemError> {
        loop {
            match self.messages.recv().await {
                Ok(message) => {
                    if !self.accepts_origin(&message.origin) {
                        debug!(origin = %message.origin, "ignoring message from untrusted origin");
                        continue;
                    }
                    if let Some(voucher) = completion_voucher(&message.data) {
                        self.popup.close();
                        return Ok(voucher);
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "message listener lagged");
                }
                Err(RecvError::Closed) => return Err(RedeemError::ListenerClosed),
            }
        }
    }

    fn accepts_origin(&self, origin: &str) -> bool {
        self.trusted_origin
            .as_deref()
            .is_none_or(|trusted| trusted == origin)
    }
}

// The redemption page: URL params, the widget and the toast sink.
pub struct RedemptionPage<P, O, N> {
    params: PageParams,
    widget: RedemptionWidget<P, O>,
    notifier: N,
}

impl<P, O, N> RedemptionPage<P, O, N>
where
    P: TokenProxy,
    O: PopupOpener,
    N: Notifier,
{
    pub fn new(params: PageParams, widget: RedemptionWidget<P, O>, notifier: N) -> Self {
        Self {
            params,
            widget,
            notifier,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.params.is_valid()
    }

    pub fn button_label(&self) -> &'static str {
        self.params.button_label()
    }

    // On-load check for the URL parameters.
    pub fn load(&self) {
        if !self.params.is_valid() {
            self.notifier
                .notify(Notification::Error(MISSING_PARAMS_NOTICE.to_string()));
        }
    }

    // Run one redemption attempt; raises exactly one notification.
    pub async fn click(&self) -> Result<Value, RedeemError> {
        let Some((voucher_code, customer_id)) = self.params.credentials() else {
            self.notifier
                .notify(Notification::Error(MISSING_PARAMS_ON_REDEEM.to_string()));
            return Err(RedeemError::MissingParameters);
        };

        let outcome = match self.widget.redeem(voucher_code, customer_id).await {
            Ok(pending) => pending.wait_for_completion().await,
            Err(err) => Err(err),
        };

        match &outcome {
            Ok(_) => self
                .notifier
                .notify(Notification::Success(REDEEM_SUCCESS_NOTICE.to_string())),
            Err(err) => self.notifier.notify(Notification::Error(error_notice(err))),
        }

        outcome
    }
}

fn error_notice(err: &RedeemError) -> String {
    let message = err.to_string();
    if message.is_empty() {
        REDEEM_FALLBACK_ERROR.to_string()
    } else {
        message
    }
}
