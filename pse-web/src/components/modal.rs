use std::sync::atomic::{AtomicUsize, Ordering};
use yew::prelude::*;

static MODAL_IDS: AtomicUsize = AtomicUsize::new(0);

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    pub open: bool,
    pub title: AttrValue,
    #[prop_or_default]
    pub description: Option<AttrValue>,
    #[prop_or_default]
    pub children: Children,
}

/// Blocking dialog: no close icon, and the overlay ignores clicks.
#[function_component(Modal)]
pub fn modal(props: &Props) -> Html {
    let modal_id = use_state(|| MODAL_IDS.fetch_add(1, Ordering::Relaxed));
    let container_ref = use_node_ref();

    {
        let container_ref = container_ref.clone();
        use_effect_with(props.open, move |is_open| {
            if *is_open && let Some(el) = container_ref.cast::<web_sys::HtmlElement>() {
                let _ = el.set_attribute("tabindex", "-1");
                let _ = el.focus();
            }
            || {}
        });
    }

    if !props.open {
        return Html::default();
    }

    let title_id = format!("pse-modal-title-{}", *modal_id);
    let desc_id: Option<String> = props
        .description
        .as_ref()
        .map(|_| format!("pse-modal-desc-{}", *modal_id));

    html! {
        <div class="pse-modal__overlay" role="presentation">
            <div
                class="pse-modal__modal"
                role="dialog"
                aria-modal="true"
                aria-labelledby={title_id.clone()}
                aria-describedby={desc_id.clone().unwrap_or_default()}
                ref={container_ref}
            >
                <div class="pse-logo">
                    <img src="/arquivos/mobile-payment.svg" alt={crate::i18n::t("modal.logo_alt")} />
                </div>
                <div class="pse-title">
                    <h1 id={title_id}>{ props.title.clone() }</h1>
                </div>
                { props.description.as_ref().map(|desc| {
                    let id = desc_id.clone().unwrap_or_default();
                    html! {
                        <div class="pse-explanation"><p id={id}>{ desc.clone() }</p></div>
                    }
                }).unwrap_or_default() }
                <div class="pse-modal__body">
                    { for props.children.iter() }
                </div>
            </div>
        </div>
    }
}
