use crate::domain::PageParams;
use crate::domain::page::MISSING_PARAMS_NOTICE;
use askama::Template;
use askama_web::WebTemplate;
use axum::extract::RawQuery;

#[derive(Template, WebTemplate)]
#[template(path = "redeem.html")]
pub struct RedeemPageTemplate {
    pub is_valid: bool,
    pub button_label: &'static str,
    pub missing_notice: &'static str,
}

impl From<&PageParams> for RedeemPageTemplate {
    fn from(params: &PageParams) -> Self {
        Self {
            is_valid: params.is_valid(),
            button_label: params.button_label(),
            missing_notice: MISSING_PARAMS_NOTICE,
        }
    }
}

// Server-rendered redemption page. The button state comes from the query string.
// Read raw so repeated keys behave like `URLSearchParams::get` in the script.
#[tracing::instrument(name = "redeem_page", skip_all)]
pub async fn redeem_page(RawQuery(query): RawQuery) -> RedeemPageTemplate {
    let params = PageParams::from_query(query.as_deref());
    RedeemPageTemplate::from(&params)
}
