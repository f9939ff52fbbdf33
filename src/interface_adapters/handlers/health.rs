// Liveness probe.
pub async fn health() -> &'static str {
    "ok"
}
