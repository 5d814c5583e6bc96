#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod components;
pub mod dom;
pub mod host;
pub mod i18n;
pub mod logging;
pub mod state;
pub mod transport;

#[cfg(target_arch = "wasm32")]
mod entry {
    use super::*;
    use crate::components::payment_validator::{PaymentValidator, Props};
    use anyhow::{Context, anyhow};
    use pse_core::ClientConfig;
    use std::rc::Rc;

    fn read_config(config: JsValue) -> anyhow::Result<ClientConfig> {
        if config.is_undefined() || config.is_null() {
            return Ok(ClientConfig::default());
        }
        serde_wasm_bindgen::from_value(config).map_err(|err| anyhow!(err.to_string()))
    }

    fn mount_inner(element_id: &str, config: JsValue) -> anyhow::Result<()> {
        let config = read_config(config).context("invalid widget configuration")?;
        i18n::set_lang(&config.locale);
        let order_group = dom::query_param(&config.order_query_param).unwrap_or_default();
        if order_group.is_empty() {
            log::warn!("Page URL has no `{}` parameter", config.order_query_param);
        }
        let root = dom::document()
            .and_then(|doc| doc.get_element_by_id(element_id))
            .ok_or_else(|| anyhow!("mount element #{element_id} not found"))?;
        let props = Props {
            config: Rc::new(config),
            order_group: order_group.into(),
        };
        yew::Renderer::<PaymentValidator>::with_root_and_props(root, props).render();
        Ok(())
    }

    /// Mount the widget into the element with id `element_id`.
    ///
    /// # Errors
    /// Returns a message when the configuration is malformed or the element is missing.
    #[wasm_bindgen]
    pub fn mount(element_id: &str, config: JsValue) -> Result<(), JsValue> {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();
        logging::init(log::LevelFilter::Info);
        mount_inner(element_id, config).map_err(|err| JsValue::from_str(&format!("{err:#}")))
    }

    /// Remember a bank choice so the next checkout load submits it automatically.
    ///
    /// Called by the storefront's payment step before it redirects.
    #[wasm_bindgen(js_name = rememberBank)]
    pub fn remember_bank(code: &str, name: &str, storage_key: Option<String>) {
        let key = storage_key.unwrap_or_else(|| ClientConfig::default().storage_key);
        pse_core::remember(&transport::LocalStorageMemory::new(&key), code, name);
    }
}

#[cfg(target_arch = "wasm32")]
pub use entry::{mount, remember_bank};
