// Domain-level errors for the token proxy.
#[derive(Debug)]
pub enum RedemptionError {
    MissingFields,
    MissingConfiguration,
    // Non-success answer from the token API, status kept verbatim.
    Upstream { status: u16, message: String },
    // Anything unexpected; the detail is for logs only.
    Internal(String),
}

// Failures reported by a token issuer.
#[derive(Clone, Debug)]
pub enum IssueTokenError {
    Rejected { status: u16, message: Option<String> },
    Failed(String),
}
