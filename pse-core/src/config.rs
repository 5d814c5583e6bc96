//! Widget configuration passed explicitly to the API client and the web front end.
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default backend base URL. Builds may override it with `PSE_API_BASE_URL`.
pub const DEFAULT_BASE_URL: &str = match option_env!("PSE_API_BASE_URL") {
    Some(url) => url,
    None => "https://dev.paymentsya.com/api",
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Runtime settings for one mounted widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    /// Tenant identifier sent on every backend request.
    pub tenant: String,
    pub tenant_header: String,
    pub order_query_param: String,
    pub order_suffix: String,
    pub storage_key: String,
    /// Class-name substring of the host container that receives the retry button.
    pub retry_container_class: String,
    pub locale: String,
    pub cart_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            tenant: String::new(),
            tenant_header: "account".to_string(),
            order_query_param: "og".to_string(),
            order_suffix: "-01".to_string(),
            storage_key: "bank".to_string(),
            retry_container_class: "orderOptionsWrapper".to_string(),
            locale: "es".to_string(),
            cart_url: "/checkout/#/cart".to_string(),
        }
    }
}

impl ClientConfig {
    /// Parse a configuration document; absent fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a valid JSON object.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn with_tenant(mut self, tenant: impl Into<String>) -> Self {
        self.tenant = tenant.into();
        self
    }

    /// Join the base URL and an endpoint path with exactly one separator.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = ClientConfig::from_json(r#"{"tenant":"mystore"}"#).unwrap();
        assert_eq!(cfg.tenant, "mystore");
        assert_eq!(cfg.tenant_header, "account");
        assert_eq!(cfg.order_suffix, "-01");
        assert_eq!(cfg.storage_key, "bank");
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            ClientConfig::from_json("{tenant"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn endpoint_joins_with_single_slash() {
        let mut cfg = ClientConfig::default();
        cfg.base_url = "https://api.example.com/api/".to_string();
        assert_eq!(cfg.endpoint("/banks"), "https://api.example.com/api/banks");
        assert_eq!(
            cfg.endpoint("order-info"),
            "https://api.example.com/api/order-info"
        );
    }

    #[test]
    fn with_tenant_overrides_only_tenant() {
        let cfg = ClientConfig::default().with_tenant("acme");
        assert_eq!(cfg.tenant, "acme");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    }
}
