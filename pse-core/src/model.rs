use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend identifier of a bank; the API has used both numbers and strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BankId {
    Number(i64),
    Text(String),
}

impl fmt::Display for BankId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A bank offered for PSE transfers, in the order the backend returned it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bank {
    pub id: BankId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "codigoach")]
    pub code: String,
}

/// Order reference sent to the payment backend: the order group plus a fixed suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderReference(String);

impl OrderReference {
    #[must_use]
    pub fn from_group(group: &str, suffix: &str) -> Self {
        Self(format!("{group}{suffix}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The shopper's bank choice for the current order. Doubles as the
/// `/payment-url` request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedBank {
    pub order: String,
    pub bank_code: String,
    pub bank_name: String,
}

impl SelectedBank {
    #[must_use]
    pub fn new(order: &OrderReference, code: &str, name: &str) -> Self {
        Self {
            order: order.as_str().to_string(),
            bank_code: code.to_string(),
            bank_name: name.to_string(),
        }
    }

    /// Payment may only be requested when every field is present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.order.is_empty() && !self.bank_code.is_empty() && !self.bank_name.is_empty()
    }
}

/// Record kept in local storage so a choice survives a redirect or reload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredBank {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl StoredBank {
    #[must_use]
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            code: Some(code.to_string()),
        }
    }

    /// Returns `(code, name)` when both are present and non-empty.
    #[must_use]
    pub fn usable(&self) -> Option<(&str, &str)> {
        match (self.code.as_deref(), self.name.as_deref()) {
            (Some(code), Some(name)) if !code.is_empty() && !name.is_empty() => Some((code, name)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BankListResponse {
    #[serde(default)]
    pub data: Option<Vec<Bank>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderInfoRequest<'a> {
    pub order_group: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct OrderInfo {
    #[serde(default)]
    pub needs_to_process: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct OrderInfoResponse {
    pub data: OrderInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PaymentUrlData {
    #[serde(default)]
    pub url_payment: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PaymentUrlResponse {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub data: Option<PaymentUrlData>,
}

impl PaymentUrlResponse {
    /// The redirect target, only for a `200` status carrying a non-empty URL.
    #[must_use]
    pub fn redirect_url(&self) -> Option<&str> {
        if self.status != Some(200) {
            return None;
        }
        self.data
            .as_ref()
            .and_then(|data| data.url_payment.as_deref())
            .filter(|url| !url.is_empty())
    }
}
