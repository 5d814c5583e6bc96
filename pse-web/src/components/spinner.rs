use yew::prelude::*;

#[derive(Properties, PartialEq, Clone, Default)]
pub struct Props {
    #[prop_or_default]
    pub label: Option<AttrValue>,
}

/// Full-screen loading overlay.
#[function_component(Spinner)]
pub fn spinner(props: &Props) -> Html {
    let label = props
        .label
        .clone()
        .unwrap_or_else(|| AttrValue::from(crate::i18n::t("loading")));
    html! {
        <div class="pse-spinner-overlay" role="status" aria-live="polite" aria-label={label}>
            <span class="pse-spinner"></span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use yew::LocalServerRenderer;

    #[test]
    fn spinner_renders_overlay() {
        let html = block_on(LocalServerRenderer::<Spinner>::new().render());
        assert!(html.contains("pse-spinner-overlay"));
        assert!(html.contains("Cargando"));
    }
}
