//! Capabilities the widget needs from the storefront page it is embedded in.
//!
//! The host markup is not owned by the widget; every capability must treat a
//! missing element as a no-op rather than an error.
use thiserror::Error;

/// Class added to the injected button, also used to detect an earlier injection.
pub const RETRY_BUTTON_CLASS: &str = "retry-payment-btn";
pub const RETRY_BUTTON_COLOR: &str = "#134cd8";
pub const RETRY_BUTTON_HOVER_COLOR: &str = "#0C389F";

/// Inline style of the retry button, as `(property, value)` pairs.
pub const RETRY_BUTTON_STYLE: &[(&str, &str)] = &[
    ("height", "39px"),
    ("background-color", RETRY_BUTTON_COLOR),
    ("border", "1px solid #134cd8"),
    ("color", "#fff"),
    (
        "font-family",
        "Fabriga, -apple-system, BlinkMacSystemFont, \"avenir next\", avenir, \"helvetica neue\", helvetica, ubuntu, roboto, noto, \"segoe ui\", arial, sans-serif",
    ),
    ("font-weight", "500"),
    ("font-size", "1rem"),
    ("text-transform", "uppercase"),
    ("letter-spacing", "0"),
    ("padding-left", "1.5rem"),
    ("padding-right", "1.5rem"),
    ("border-width", "0.125rem"),
    ("border-radius", "0.25rem"),
    ("border-style", "solid"),
    ("display", "flex"),
    ("align-items", "center"),
    ("justify-content", "center"),
    ("cursor", "pointer"),
    ("transition", "background-color 0.3s ease"),
];

/// Marker id of the injected `<style>` element.
pub const PAGE_STYLE_ID: &str = "pse-page-overrides";

/// Hides the order-placed header and cancel button, restyles the modal backdrop.
pub const PAGE_STYLE_OVERRIDES: &str = r#"
header[class*="orderPlacedHeader"] {
  display: none;
}
.pse-modal__overlay {
  background-color: #EFF4FF !important;
}
.pse-modal__modal {
  border-radius: 2.1875rem;
}
div[class*="cancelOrderButton"] {
  display: none;
}
"#;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("DOM error: {0}")]
    Dom(String),
    #[error("Navigation failed: {0}")]
    Navigation(String),
}

pub trait HostPage {
    /// Add the retry button to the host container.
    ///
    /// Returns `Ok(false)` when the container is absent or already decorated.
    ///
    /// # Errors
    ///
    /// Returns an error if the container exists but cannot be modified.
    fn inject_retry_action(&self) -> Result<bool, HostError>;

    /// Install page-wide style overrides. Repeated calls are no-ops.
    ///
    /// # Errors
    ///
    /// Returns an error if the style element cannot be created or attached.
    fn apply_page_style_overrides(&self) -> Result<(), HostError>;

    /// Whether the referrer shares the current page's host name. Pages with
    /// no usable referrer count as arriving from the store.
    fn arrived_from_store(&self) -> bool;

    /// Full-page navigation away from the checkout.
    ///
    /// # Errors
    ///
    /// Returns an error if the browser refuses the navigation.
    fn navigate(&self, url: &str) -> Result<(), HostError>;
}

/// Host name of an absolute URL, without port or credentials.
#[must_use]
pub fn host_name(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next()?;
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
    let host = if host_port.starts_with('[') {
        host_port.split_once(']').map(|(h, _)| &host_port[..=h.len()])?
    } else {
        host_port.split(':').next()?
    };
    (!host.is_empty()).then_some(host)
}

/// Whether a referrer marks an arrival from the storefront itself.
///
/// Host names compare case-insensitively. An empty or unparsable referrer
/// gives no evidence either way and keeps the storefront default.
#[must_use]
pub fn referred_by_store(referrer: &str, current_host: &str) -> bool {
    host_name(referrer).is_none_or(|host| host.eq_ignore_ascii_case(current_host))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_name_strips_path_port_and_credentials() {
        assert_eq!(host_name("https://shop.example.com/cart?x=1"), Some("shop.example.com"));
        assert_eq!(host_name("http://user:pw@shop.example.com:8080/"), Some("shop.example.com"));
        assert_eq!(host_name("https://[::1]:443/x"), Some("[::1]"));
        assert_eq!(host_name("not a url"), None);
        assert_eq!(host_name("https:///path"), None);
    }

    #[test]
    fn referrer_comparison() {
        assert!(referred_by_store("https://Shop.example.com/checkout", "shop.example.com"));
        assert!(!referred_by_store("https://bank.example.org/return", "shop.example.com"));
    }

    #[test]
    fn missing_referrer_keeps_storefront_title() {
        assert!(referred_by_store("", "shop.example.com"));
        assert!(referred_by_store("about:blank", "shop.example.com"));
    }

    #[test]
    fn overrides_target_host_markup() {
        assert!(PAGE_STYLE_OVERRIDES.contains("orderPlacedHeader"));
        assert!(PAGE_STYLE_OVERRIDES.contains("cancelOrderButton"));
        assert!(RETRY_BUTTON_STYLE.iter().any(|(k, _)| *k == "background-color"));
    }
}
