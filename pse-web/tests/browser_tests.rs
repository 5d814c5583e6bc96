#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use pse_core::host::{HostPage, PAGE_STYLE_ID, RETRY_BUTTON_CLASS};
use pse_core::{BankMemory, BankSelection, ClientConfig};
use pse_web::components::bank_select::{BankSelect, Props as BankSelectProps};
use pse_web::dom;
use pse_web::host::DomHostPage;
use pse_web::transport::LocalStorageMemory;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{EventTarget, MouseEvent, MouseEventInit};
use yew::Callback;

wasm_bindgen_test_configure!(run_in_browser);

fn add_container(class: &str) -> web_sys::Element {
    let doc = dom::document().expect("document");
    let container = doc.create_element("div").expect("create container");
    container.set_class_name(class);
    doc.body()
        .expect("document body")
        .append_child(&container)
        .expect("append container");
    container
}

#[wasm_bindgen_test]
fn retry_button_is_injected_once() {
    let container = add_container("vtex-orderOptionsWrapper-xyz");
    let host = DomHostPage::new(&ClientConfig::default());

    assert_eq!(host.inject_retry_action(), Ok(true));
    assert_eq!(host.inject_retry_action(), Ok(false));
    let buttons = container
        .query_selector_all(&format!(".{RETRY_BUTTON_CLASS}"))
        .expect("query buttons");
    assert_eq!(buttons.length(), 1);
    container.remove();
}

#[wasm_bindgen_test]
fn missing_container_is_a_no_op() {
    let mut config = ClientConfig::default();
    config.retry_container_class = "doesNotExist".to_string();
    let host = DomHostPage::new(&config);
    assert_eq!(host.inject_retry_action(), Ok(false));
}

#[wasm_bindgen_test]
fn page_overrides_are_idempotent() {
    let host = DomHostPage::new(&ClientConfig::default());
    host.apply_page_style_overrides().expect("first apply");
    host.apply_page_style_overrides().expect("second apply");
    let doc = dom::document().expect("document");
    let styles = doc
        .query_selector_all(&format!("#{PAGE_STYLE_ID}"))
        .expect("query styles");
    assert_eq!(styles.length(), 1);
}

#[wasm_bindgen_test]
fn local_storage_memory_round_trip() {
    let memory = LocalStorageMemory::new("pse-test-bank");
    memory.clear();
    pse_core::remember(&memory, "001", "Banco A");
    let stored = pse_core::recover(&memory).expect("stored bank");
    assert_eq!(stored.usable(), Some(("001", "Banco A")));
    memory.clear();
    assert!(memory.load().is_none());
}

async fn next_tick() {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        dom::window()
            .expect("window")
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, 0)
            .expect("schedule tick");
    });
    JsFuture::from(promise).await.expect("tick");
}

fn press(target: &EventTarget) {
    let init = MouseEventInit::new();
    init.set_bubbles(true);
    let event = MouseEvent::new_with_mouse_event_init_dict("mousedown", &init).expect("mousedown");
    target.dispatch_event(&event).expect("dispatch mousedown");
}

#[wasm_bindgen_test]
async fn pointer_down_outside_closes_dropdown_until_unmounted() {
    let root = add_container("pse-select-host");
    let dismissed = Rc::new(Cell::new(0u32));
    let mut selection = BankSelection::default();
    selection.toggle_dropdown();
    let props = BankSelectProps {
        selection,
        on_toggle: Callback::noop(),
        on_select: Callback::noop(),
        on_dismiss: {
            let dismissed = dismissed.clone();
            Callback::from(move |()| dismissed.set(dismissed.get() + 1))
        },
    };
    let app = yew::Renderer::<BankSelect>::with_root_and_props(root.clone(), props).render();
    next_tick().await;

    let inside = root
        .query_selector(".pse-select__value")
        .expect("query dropdown")
        .expect("dropdown rendered");
    press(&inside);
    assert_eq!(dismissed.get(), 0);

    let body = dom::document().expect("document").body().expect("document body");
    press(&body);
    assert_eq!(dismissed.get(), 1);

    app.destroy();
    next_tick().await;
    press(&body);
    assert_eq!(dismissed.get(), 1);
    root.remove();
}
