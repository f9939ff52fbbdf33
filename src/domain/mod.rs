// Domain layer: redemption entities, errors and ports.

pub mod completion;
pub mod entities;
pub mod errors;
pub mod page;
pub mod ports;

pub use completion::{COMPLETION_MESSAGE_TYPE, WindowMessage, completion_voucher};
pub use entities::{IssuedToken, RedemptionGrant, RedemptionRequest};
pub use errors::{IssueTokenError, RedemptionError};
pub use page::{Notification, PageParams};
pub use ports::{Notifier, PopupOpener, PopupWindow, TokenIssuer, TokenProxy};
