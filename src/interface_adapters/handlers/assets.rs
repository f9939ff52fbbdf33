use axum::http::header;
use axum::response::IntoResponse;

// Browser half of the redemption page: proxy call, popup and completion listener.
pub async fn redeem_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        include_str!("../../../assets/redeem.js"),
    )
}
