use pse_core::BankSelection;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{MouseEvent, Node};
use yew::prelude::*;

/// `(code, name)` of the chosen bank; `None` resets to the placeholder.
pub type BankChoice = Option<(String, String)>;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub selection: BankSelection,
    pub on_toggle: Callback<()>,
    pub on_select: Callback<BankChoice>,
    /// Pointer-down outside the dropdown.
    pub on_dismiss: Callback<()>,
}

fn option_callback(on_select: &Callback<BankChoice>, choice: BankChoice) -> Callback<MouseEvent> {
    let on_select = on_select.clone();
    Callback::from(move |e: MouseEvent| {
        // Keep the container's toggle from reopening the list.
        e.stop_propagation();
        on_select.emit(choice.clone());
    })
}

/// Custom dropdown listing banks in backend order.
#[function_component(BankSelect)]
pub fn bank_select(props: &Props) -> Html {
    let container_ref = use_node_ref();

    {
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with(container_ref.clone(), move |container_ref| {
            let container_ref = container_ref.clone();
            let listener = crate::dom::document().map(|document| {
                let closure = Closure::<dyn Fn(MouseEvent)>::new(move |event: MouseEvent| {
                    let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
                    if let Some(container) = container_ref.get()
                        && !container.contains(target.as_ref())
                    {
                        on_dismiss.emit(());
                    }
                });
                if let Err(err) = document
                    .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())
                {
                    log::warn!(
                        "Could not listen for outside clicks: {}",
                        crate::dom::js_error_message(&err)
                    );
                }
                (document, closure)
            });
            move || {
                if let Some((document, closure)) = listener {
                    let _ = document.remove_event_listener_with_callback(
                        "mousedown",
                        closure.as_ref().unchecked_ref(),
                    );
                }
            }
        });
    }

    let toggle = {
        let on_toggle = props.on_toggle.clone();
        Callback::from(move |_: MouseEvent| on_toggle.emit(()))
    };
    let placeholder = crate::i18n::t("select.placeholder");
    let selection = &props.selection;

    let mut options_class = classes!("pse-select__options");
    if selection.dropdown_open {
        options_class.push("pse-select__options--open");
    }

    html! {
        <div class="pse-select" ref={container_ref} onclick={toggle}
             role="listbox" aria-expanded={selection.dropdown_open.to_string()}>
            <div class="pse-select__value">
                { match selection.display_label() {
                    Some(name) => html! { { name.to_string() } },
                    None => html! { <span class="pse-select__placeholder">{ placeholder.clone() }</span> },
                } }
            </div>
            <div class={options_class}>
                <div class="pse-select__option" role="option"
                     onclick={option_callback(&props.on_select, None)}>
                    { placeholder }
                </div>
                { for selection.banks.iter().map(|bank| {
                    let mut class = classes!("pse-select__option");
                    let highlighted = selection.is_highlighted(&bank.code);
                    if highlighted {
                        class.push("pse-select__option--selected");
                    }
                    let choice = Some((bank.code.clone(), bank.name.clone()));
                    html! {
                        <div key={bank.id.to_string()} class={class} role="option"
                             aria-selected={highlighted.to_string()}
                             onclick={option_callback(&props.on_select, choice)}>
                            { bank.name.clone() }
                        </div>
                    }
                }) }
            </div>
        </div>
    }
}
