use std::env;

// Runtime/server settings read from the environment.

pub const DEFAULT_REDEEM_BASE_URL: &str = "https://orcune.shop";

pub fn http_port() -> u16 {
    env::var("REDEMPTION_SERVER_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000)
}

// Secret for the token API. Absence is reported per request, not at startup.
pub fn orcune_api_key() -> Option<String> {
    non_empty_var("ORCUNE_API_KEY")
}

pub fn orcune_api_url() -> Option<String> {
    non_empty_var("ORCUNE_API_URL")
}

// Host of the hosted redemption page embedded in redemption URLs.
pub fn redeem_base_url() -> String {
    non_empty_var("ORCUNE_REDEEM_BASE_URL").unwrap_or_else(|| DEFAULT_REDEEM_BASE_URL.to_string())
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
