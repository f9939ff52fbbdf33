// Use cases: proxy-side token creation and the page-side redemption flow.

pub mod create_token;
pub mod redeem_flow;


pub use create_token::{CreateTokenUseCase, CreatedToken, build_redemption_url};
pub use redeem_flow::{PendingRedemption, RedeemError, RedemptionPage, RedemptionWidget, WidgetConfig};
