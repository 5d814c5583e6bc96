//! Browser implementations of the core I/O traits.
use crate::dom;
use async_trait::async_trait;
use pse_core::{ApiError, ApiRequest, ApiResponse, BankMemory, Transport};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, Response};

/// Sends backend requests with `window.fetch`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        fetch(&request)
            .await
            .map_err(|err| ApiError::Network(dom::js_error_message(&err)))
    }
}

#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
async fn fetch(request: &ApiRequest) -> Result<ApiResponse, JsValue> {
    let headers = Headers::new()?;
    for (name, value) in &request.headers {
        headers.set(name, value)?;
    }

    let init = RequestInit::new();
    init.set_method(request.method.as_str());
    init.set_headers(&headers);
    if let Some(body) = request.body.as_deref() {
        init.set_body(&JsValue::from_str(body));
    }

    let js_request = Request::new_with_str_and_init(&request.url, &init)?;
    let window = dom::window().ok_or_else(|| JsValue::from_str("window unavailable"))?;
    let response: Response = JsFuture::from(window.fetch_with_request(&js_request))
        .await?
        .dyn_into()?;
    let text = JsFuture::from(response.text()?).await?;

    Ok(ApiResponse {
        status: response.status(),
        body: text.as_string().unwrap_or_default(),
    })
}

/// Remembered bank choice under a single `localStorage` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalStorageMemory {
    key: String,
}

impl LocalStorageMemory {
    #[must_use]
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl BankMemory for LocalStorageMemory {
    fn load(&self) -> Option<String> {
        dom::local_storage()
            .ok()?
            .get_item(&self.key)
            .ok()
            .flatten()
    }

    fn store(&self, value: &str) {
        let result = dom::local_storage().and_then(|storage| storage.set_item(&self.key, value));
        if let Err(err) = result {
            log::warn!("Could not store bank record: {}", dom::js_error_message(&err));
        }
    }

    fn clear(&self) {
        let result = dom::local_storage().and_then(|storage| storage.remove_item(&self.key));
        if let Err(err) = result {
            log::warn!("Could not clear bank record: {}", dom::js_error_message(&err));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_keeps_configured_key() {
        assert_eq!(LocalStorageMemory::new("bank").key(), "bank");
    }
}
