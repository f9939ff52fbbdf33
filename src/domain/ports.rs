use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::entities::{IssuedToken, RedemptionGrant, RedemptionRequest};
use crate::domain::errors::IssueTokenError;
use crate::domain::page::Notification;

// Port for the third-party API that mints redemption tokens.
// The proxy handler depends on this trait, not the concrete client.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    async fn issue_token(&self, request: RedemptionRequest) -> Result<IssuedToken, IssueTokenError>;
}

#[async_trait]
impl<T: TokenIssuer + ?Sized> TokenIssuer for Arc<T> {
    async fn issue_token(&self, request: RedemptionRequest) -> Result<IssuedToken, IssueTokenError> {
        (**self).issue_token(request).await
    }
}

// Port for the page-side call to our own proxy route.
// Errors carry the message meant for the user.
#[async_trait]
pub trait TokenProxy: Send + Sync {
    async fn create_token(
        &self,
        voucher_code: &str,
        customer_id: &str,
    ) -> Result<RedemptionGrant, String>;
}

// Opens the hosted redemption page. `None` means the popup was blocked.
pub trait PopupOpener: Send + Sync {
    fn open(&self, url: &str, name: &str, features: &str) -> Option<Box<dyn PopupWindow>>;
}

pub trait PopupWindow: Send + Sync {
    fn close(&self);
}

// Sink for toast-style notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
