use url::form_urlencoded;

pub const MISSING_PARAMS_NOTICE: &str = "Missing voucher code or customer ID in URL parameters";
pub const MISSING_PARAMS_ON_REDEEM: &str = "Please provide voucherCode and customerId in URL";
pub const REDEEM_SUCCESS_NOTICE: &str = "Voucher redeemed successfully!";
pub const REDEEM_FALLBACK_ERROR: &str = "An error occurred during redemption";

pub const REDEEM_LABEL: &str = "Redeem Gift Card";
pub const INVALID_PARAMS_LABEL: &str = "Invalid URL Parameters";

// Query parameters of the redemption page.
#[derive(Clone, Debug, Default)]
pub struct PageParams {
    pub voucher_code: Option<String>,
    pub customer_id: Option<String>,
}

impl PageParams {
    pub fn new(voucher_code: Option<&str>, customer_id: Option<&str>) -> Self {
        Self {
            voucher_code: voucher_code.map(str::to_string),
            customer_id: customer_id.map(str::to_string),
        }
    }

    // Reads a raw query string. The first occurrence of a repeated key wins.
    pub fn from_query(query: Option<&str>) -> Self {
        let mut params = Self::default();
        let Some(query) = query else {
            return params;
        };

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "voucherCode" => &mut params.voucher_code,
                "customerId" => &mut params.customer_id,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }

    // Both values, when both are present and non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let voucher_code = self.voucher_code.as_deref().filter(|v| !v.is_empty())?;
        let customer_id = self.customer_id.as_deref().filter(|v| !v.is_empty())?;
        Some((voucher_code, customer_id))
    }

    pub fn is_valid(&self) -> bool {
        self.credentials().is_some()
    }

    pub fn button_label(&self) -> &'static str {
        if self.is_valid() {
            REDEEM_LABEL
        } else {
            INVALID_PARAMS_LABEL
        }
    }
}

// Transient notice shown to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
}
