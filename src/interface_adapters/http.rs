// Shared HTTP response types for consistent API error payloads.

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    // Human-readable error string for consistent JSON error responses.
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
