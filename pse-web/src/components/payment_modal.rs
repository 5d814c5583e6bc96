use crate::components::bank_select::{BankChoice, BankSelect};
use crate::components::modal::Modal;
use crate::i18n;
use pse_core::CheckoutSession;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub session: CheckoutSession,
    pub cart_url: AttrValue,
    pub on_toggle: Callback<()>,
    pub on_select: Callback<BankChoice>,
    pub on_dismiss: Callback<()>,
    pub on_continue: Callback<()>,
}

#[must_use]
pub fn modal_title(from_store: bool) -> String {
    if from_store {
        i18n::t("modal.title_from_store")
    } else {
        i18n::t("modal.title_returning")
    }
}

/// Bank selection dialog with the back link and continue action.
#[function_component(PaymentModal)]
pub fn payment_modal(props: &Props) -> Html {
    let session = &props.session;
    let has_selection = session.selection.selected.is_some();

    let on_continue = {
        let on_continue = props.on_continue.clone();
        Callback::from(move |_: MouseEvent| on_continue.emit(()))
    };
    let continue_class = classes!(
        "pse-continue",
        (!has_selection).then_some("pse-continue--disabled")
    );

    html! {
        <Modal
            open={session.phase.modal_open()}
            title={modal_title(session.from_store)}
            description={AttrValue::from(i18n::t("modal.explanation"))}
        >
            <div class="pse-body">
                <BankSelect
                    selection={session.selection.clone()}
                    on_toggle={props.on_toggle.clone()}
                    on_select={props.on_select.clone()}
                    on_dismiss={props.on_dismiss.clone()}
                />
                { session.phase.error().map(|_| html! {
                    <p class="pse-error" role="alert">{ i18n::t("error.generic") }</p>
                }).unwrap_or_default() }
                <div class="pse-actions">
                    <a href={props.cart_url.clone()} class="pse-back-link">
                        { i18n::t("actions.back") }
                    </a>
                    <div class={continue_class} role="button"
                         aria-disabled={(!has_selection).to_string()}
                         onclick={on_continue}>
                        <span>{ i18n::t("actions.continue") }</span>
                    </div>
                </div>
            </div>
        </Modal>
    }
}
