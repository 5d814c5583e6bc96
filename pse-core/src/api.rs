//! JSON client for the payment backend.
//!
//! The client owns no I/O of its own: requests are handed to a [`Transport`],
//! which the browser front end implements over `fetch` and tests implement
//! with scripted responses.
use crate::config::ClientConfig;
use crate::model::{
    Bank, BankListResponse, OrderInfo, OrderInfoRequest, OrderInfoResponse, PaymentUrlResponse,
    SelectedBank,
};
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub const BANKS_PATH: &str = "/banks";
pub const ORDER_INFO_PATH: &str = "/order-info";
pub const PAYMENT_URL_PATH: &str = "/payment-url";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl ApiRequest {
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Request encoding error: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("JSON parsing error: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Sends one request and returns the raw response.
///
/// No timeout or retry is expected; a failure surfaces as [`ApiError::Network`].
#[async_trait(?Send)]
pub trait Transport {
    /// # Errors
    ///
    /// Returns an error when the request cannot be delivered or the body cannot be read.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

pub struct ApiClient<T: Transport> {
    config: ClientConfig,
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub const fn new(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    fn build_request(&self, path: &str, body: Option<String>, method: HttpMethod) -> ApiRequest {
        ApiRequest {
            method,
            url: self.config.endpoint(path),
            headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                (
                    self.config.tenant_header.clone(),
                    self.config.tenant.clone(),
                ),
            ],
            body,
        }
    }

    /// Issue a request and parse the response body as JSON whatever its status.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be encoded, the transport fails,
    /// or the response is not the expected JSON shape.
    pub async fn call<B, R>(
        &self,
        path: &str,
        body: Option<&B>,
        method: HttpMethod,
    ) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let payload = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(ApiError::Encode)?;
        let request = self.build_request(path, payload, method);
        log::debug!("{} {}", method.as_str(), request.url);
        let response = self.transport.send(request).await?;
        log::debug!("{path} responded with HTTP {}", response.status);
        serde_json::from_str(&response.body).map_err(ApiError::Decode)
    }

    /// Fetch the bank list; a missing `data` array yields an empty list.
    ///
    /// # Errors
    ///
    /// Propagates transport and decoding failures.
    pub async fn banks(&self) -> Result<Vec<Bank>, ApiError> {
        let response: BankListResponse = self
            .call::<(), _>(BANKS_PATH, None, HttpMethod::Get)
            .await?;
        Ok(response.data.unwrap_or_default())
    }

    /// # Errors
    ///
    /// Propagates transport failures, and decoding failures including a missing `data` object.
    pub async fn order_info(&self, order_group: &str) -> Result<OrderInfo, ApiError> {
        let body = OrderInfoRequest { order_group };
        let response: OrderInfoResponse = self
            .call(ORDER_INFO_PATH, Some(&body), HttpMethod::Post)
            .await?;
        Ok(response.data)
    }

    /// Request a payment URL. Callers inspect the returned `status` field.
    ///
    /// # Errors
    ///
    /// Propagates transport and decoding failures.
    pub async fn payment_url(&self, selected: &SelectedBank) -> Result<PaymentUrlResponse, ApiError> {
        self.call(PAYMENT_URL_PATH, Some(selected), HttpMethod::Post)
            .await
    }
}
