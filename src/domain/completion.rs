use serde_json::Value;

// Message type the hosted redemption page posts back to its opener.
pub const COMPLETION_MESSAGE_TYPE: &str = "ORCUNE_REDEMPTION_COMPLETE";

// A cross-window message as seen by the opener.
#[derive(Clone, Debug)]
pub struct WindowMessage {
    pub origin: String,
    pub data: Value,
}

impl WindowMessage {
    pub fn new(origin: impl Into<String>, data: Value) -> Self {
        Self {
            origin: origin.into(),
            data,
        }
    }
}

// Returns the opaque voucher payload when `data` is a completion message.
// A completion message without a voucher yields `Value::Null`.
pub fn completion_voucher(data: &Value) -> Option<Value> {
    let kind = data.get("type")?.as_str()?;
    if kind != COMPLETION_MESSAGE_TYPE {
        return None;
    }
    Some(data.get("voucher").cloned().unwrap_or(Value::Null))
}
