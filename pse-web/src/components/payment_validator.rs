use crate::components::bank_select::BankChoice;
use crate::components::payment_modal::PaymentModal;
use crate::components::spinner::Spinner;
use crate::host::{DomHostPage, RETRY_EVENT, on_page_ready};
use crate::state::{SessionState, dispatch_fn, use_session};
use crate::transport::{FetchTransport, LocalStorageMemory};
use pse_core::{ApiClient, CheckoutFlow, ClientConfig, HostPage, PaymentOutcome, SessionAction};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use yew::prelude::*;

pub type WebCheckoutFlow = CheckoutFlow<FetchTransport, LocalStorageMemory, DomHostPage>;

/// Set while a payment request is in flight. Render snapshots lag behind the
/// reducer, so this is what stops a second click from sending another request.
type InFlight = Rc<RefCell<bool>>;

fn begin_payment(in_flight: &InFlight) -> bool {
    let mut busy = in_flight.borrow_mut();
    if *busy {
        return false;
    }
    *busy = true;
    true
}

fn finish_payment(in_flight: &InFlight, outcome: &PaymentOutcome) {
    if !matches!(outcome, PaymentOutcome::Redirected(_)) {
        *in_flight.borrow_mut() = false;
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub config: Rc<ClientConfig>,
    /// Order group read from the page URL at mount.
    pub order_group: AttrValue,
}

#[must_use]
pub fn build_flow(config: &ClientConfig) -> WebCheckoutFlow {
    CheckoutFlow::new(
        ApiClient::new(config.clone(), FetchTransport),
        LocalStorageMemory::new(&config.storage_key),
        DomHostPage::new(config),
    )
}

#[hook]
fn use_checkout_start(
    flow: Rc<WebCheckoutFlow>,
    order_group: AttrValue,
    session: &UseReducerHandle<SessionState>,
    booting: &UseStateHandle<bool>,
) {
    let dispatcher = session.dispatcher();
    let booting = booting.clone();
    use_effect_with((), move |()| {
        wasm_bindgen_futures::spawn_local(async move {
            let dispatch = dispatch_fn(dispatcher);
            flow.start(&order_group, &dispatch).await;
            booting.set(false);
        });
        || {}
    });
}

/// Page decoration waits for the host document; it is independent of the modal.
#[hook]
fn use_page_ready(flow: Rc<WebCheckoutFlow>, session: &UseReducerHandle<SessionState>) {
    let dispatcher = session.dispatcher();
    use_effect_with((), move |()| {
        on_page_ready(move || {
            if let Err(err) = flow.host().apply_page_style_overrides() {
                log::warn!("Could not apply page styles: {err}");
            }
            dispatcher.dispatch(SessionAction::ArrivedFromStore(
                flow.host().arrived_from_store(),
            ));
        });
        || {}
    });
}

/// Listens for the injected retry button for the component's lifetime.
#[hook]
fn use_retry_listener(flow: Rc<WebCheckoutFlow>, session: &UseReducerHandle<SessionState>) {
    let dispatcher = session.dispatcher();
    use_effect_with((), move |()| {
        let listener = crate::dom::window().map(|window| {
            let closure = Closure::<dyn Fn()>::new(move || {
                let flow = flow.clone();
                let dispatch = dispatch_fn(dispatcher.clone());
                wasm_bindgen_futures::spawn_local(async move {
                    flow.retry(&dispatch).await;
                });
            });
            if let Err(err) = window
                .add_event_listener_with_callback(RETRY_EVENT, closure.as_ref().unchecked_ref())
            {
                log::warn!(
                    "Could not listen for {RETRY_EVENT}: {}",
                    crate::dom::js_error_message(&err)
                );
            }
            (window, closure)
        });
        move || {
            if let Some((window, closure)) = listener {
                let _ = window.remove_event_listener_with_callback(
                    RETRY_EVENT,
                    closure.as_ref().unchecked_ref(),
                );
            }
        }
    });
}

/// Submits a remembered choice as soon as it is restored into a complete selection.
#[hook]
fn use_auto_pay(
    flow: Rc<WebCheckoutFlow>,
    session: &UseReducerHandle<SessionState>,
    in_flight: InFlight,
) {
    let dispatcher = session.dispatcher();
    let snapshot = (**session).clone();
    use_effect_with(snapshot.selection.selected.clone(), move |_| {
        if snapshot.selection.can_submit() && begin_payment(&in_flight) {
            wasm_bindgen_futures::spawn_local(async move {
                let dispatch = dispatch_fn(dispatcher);
                let outcome = flow.auto_pay(&snapshot, &dispatch).await;
                finish_payment(&in_flight, &outcome);
            });
        }
        || {}
    });
}

/// Root widget: checks the order on mount and runs the bank-selection modal.
#[function_component(PaymentValidator)]
pub fn payment_validator(props: &Props) -> Html {
    let session = use_session(&props.order_group, &props.config.order_suffix);
    let booting = use_state(|| true);
    let in_flight: InFlight = use_mut_ref(|| false);
    let flow = {
        let config = props.config.clone();
        use_memo((), move |()| build_flow(&config))
    };

    use_checkout_start(flow.clone(), props.order_group.clone(), &session, &booting);
    use_page_ready(flow.clone(), &session);
    use_retry_listener(flow.clone(), &session);
    use_auto_pay(flow.clone(), &session, in_flight.clone());

    let on_toggle = {
        let dispatcher = session.dispatcher();
        Callback::from(move |()| dispatcher.dispatch(SessionAction::ToggleDropdown))
    };
    let on_dismiss = {
        let dispatcher = session.dispatcher();
        Callback::from(move |()| dispatcher.dispatch(SessionAction::CloseDropdown))
    };
    let on_select = {
        let dispatcher = session.dispatcher();
        Callback::from(move |choice: BankChoice| {
            let (code, name) = choice.map_or((None, String::new()), |(code, name)| {
                (Some(code), name)
            });
            dispatcher.dispatch(SessionAction::SelectBank { code, name });
        })
    };
    let on_continue = {
        let dispatcher = session.dispatcher();
        let snapshot = (*session).0.clone();
        let flow = flow.clone();
        let in_flight = in_flight.clone();
        Callback::from(move |()| {
            if snapshot.phase.is_loading() || !begin_payment(&in_flight) {
                return;
            }
            let flow = flow.clone();
            let snapshot = snapshot.clone();
            let in_flight = in_flight.clone();
            let dispatch = dispatch_fn(dispatcher.clone());
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = flow.pay(&snapshot, &dispatch).await;
                finish_payment(&in_flight, &outcome);
            });
        })
    };

    let loading = *booting || session.phase.is_loading();

    html! {
        <>
            { if loading { html! { <Spinner /> } } else { Html::default() } }
            <PaymentModal
                session={(*session).0.clone()}
                cart_url={AttrValue::from(props.config.cart_url.clone())}
                {on_toggle}
                {on_select}
                {on_dismiss}
                {on_continue}
            />
        </>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_one_payment_in_flight() {
        let in_flight: InFlight = Rc::default();
        assert!(begin_payment(&in_flight));
        assert!(!begin_payment(&in_flight));

        finish_payment(&in_flight, &PaymentOutcome::Failed("status 500".to_string()));
        assert!(begin_payment(&in_flight));

        finish_payment(&in_flight, &PaymentOutcome::Redirected("https://pay".to_string()));
        assert!(!begin_payment(&in_flight));
    }
}
