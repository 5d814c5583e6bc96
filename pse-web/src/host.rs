//! DOM adapter for the storefront page hosting the widget.
use crate::{dom, i18n};
use pse_core::ClientConfig;
use pse_core::host::{
    HostError, HostPage, PAGE_STYLE_ID, PAGE_STYLE_OVERRIDES, RETRY_BUTTON_CLASS,
    RETRY_BUTTON_COLOR, RETRY_BUTTON_HOVER_COLOR, RETRY_BUTTON_STYLE, referred_by_store,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, CssStyleDeclaration, HtmlElement};

/// Fired on `window` when the injected retry button is clicked.
pub const RETRY_EVENT: &str = "pse:retry";

/// Widget component styles, installed with the page overrides.
pub const WIDGET_CSS: &str = include_str!("../static/pse.css");

fn dom_error(err: &JsValue) -> HostError {
    HostError::Dom(dom::js_error_message(err))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomHostPage {
    container_class: String,
}

impl DomHostPage {
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            container_class: config.retry_container_class.clone(),
        }
    }

    #[must_use]
    pub fn container_selector(&self) -> String {
        format!("div[class*=\"{}\"]", self.container_class)
    }
}

fn set_background(style: &CssStyleDeclaration, color: &'static str) -> Closure<dyn FnMut()> {
    let style = style.clone();
    Closure::new(move || {
        let _ = style.set_property("background-color", color);
    })
}

fn build_retry_button() -> Result<HtmlElement, HostError> {
    let document = dom::document().ok_or_else(|| HostError::Dom("document unavailable".into()))?;
    let button: HtmlElement = document
        .create_element("button")
        .map_err(|err| dom_error(&err))?
        .dyn_into()
        .map_err(|_| HostError::Dom("button is not an HtmlElement".into()))?;
    button.set_inner_text(&i18n::t("retry.button"));
    button
        .class_list()
        .add_1(RETRY_BUTTON_CLASS)
        .map_err(|err| dom_error(&err))?;

    let style = button.style();
    for (property, value) in RETRY_BUTTON_STYLE {
        style
            .set_property(property, value)
            .map_err(|err| dom_error(&err))?;
    }

    // Handlers share the button's page lifetime.
    let hover = set_background(&style, RETRY_BUTTON_HOVER_COLOR);
    button.set_onmouseover(Some(hover.as_ref().unchecked_ref()));
    hover.forget();
    let leave = set_background(&style, RETRY_BUTTON_COLOR);
    button.set_onmouseout(Some(leave.as_ref().unchecked_ref()));
    leave.forget();

    let click = Closure::<dyn FnMut()>::new(|| {
        if let Err(err) = dom::emit(RETRY_EVENT) {
            log::error!("Retry event failed: {}", dom::js_error_message(&err));
        }
    });
    button
        .add_event_listener_with_callback("click", click.as_ref().unchecked_ref())
        .map_err(|err| dom_error(&err))?;
    click.forget();

    Ok(button)
}

impl HostPage for DomHostPage {
    fn inject_retry_action(&self) -> Result<bool, HostError> {
        let Some(document) = dom::document() else {
            return Ok(false);
        };
        let Some(container) = document
            .query_selector(&self.container_selector())
            .map_err(|err| dom_error(&err))?
        else {
            return Ok(false);
        };
        let existing = container
            .query_selector(&format!(".{RETRY_BUTTON_CLASS}"))
            .map_err(|err| dom_error(&err))?;
        if existing.is_some() {
            return Ok(false);
        }

        let button = build_retry_button()?;
        container
            .append_child(&button)
            .map_err(|err| dom_error(&err))?;
        Ok(true)
    }

    fn apply_page_style_overrides(&self) -> Result<(), HostError> {
        let Some(document) = dom::document() else {
            return Ok(());
        };
        if document.get_element_by_id(PAGE_STYLE_ID).is_some() {
            return Ok(());
        }
        let Some(head) = document.head() else {
            return Ok(());
        };
        let style = document
            .create_element("style")
            .map_err(|err| dom_error(&err))?;
        style.set_id(PAGE_STYLE_ID);
        style.set_text_content(Some(&format!("{PAGE_STYLE_OVERRIDES}\n{WIDGET_CSS}")));
        head.append_child(&style).map_err(|err| dom_error(&err))?;
        Ok(())
    }

    fn arrived_from_store(&self) -> bool {
        let Some(document) = dom::document() else {
            return true;
        };
        let current = dom::window()
            .and_then(|win| win.location().hostname().ok())
            .unwrap_or_default();
        referred_by_store(&document.referrer(), &current)
    }

    fn navigate(&self, url: &str) -> Result<(), HostError> {
        dom::window()
            .ok_or_else(|| HostError::Navigation("window unavailable".into()))?
            .location()
            .set_href(url)
            .map_err(|err| HostError::Navigation(dom::js_error_message(&err)))
    }
}

/// Run `callback` once the host document has been parsed.
///
/// Runs immediately when the document is past `loading`, otherwise on the
/// first `DOMContentLoaded`.
pub fn on_page_ready(callback: impl FnOnce() + 'static) {
    let Some(document) = dom::document() else {
        return;
    };
    if document.ready_state() != "loading" {
        callback();
        return;
    }
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    let handler = Closure::once_into_js(callback);
    if let Err(err) = document.add_event_listener_with_callback_and_add_event_listener_options(
        "DOMContentLoaded",
        handler.unchecked_ref(),
        &options,
    ) {
        log::error!("Could not wait for page ready: {}", dom::js_error_message(&err));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_matches_class_substring() {
        let host = DomHostPage::new(&ClientConfig::default());
        assert_eq!(
            host.container_selector(),
            "div[class*=\"orderOptionsWrapper\"]"
        );
    }

    #[test]
    fn widget_css_styles_dropdown() {
        assert!(WIDGET_CSS.contains(".pse-select"));
    }
}
