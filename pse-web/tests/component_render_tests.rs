use futures::executor::block_on;
use pse_core::{Bank, BankId, CheckoutSession, ClientConfig, Phase, SessionAction, SessionEvent};
use pse_web::components::bank_select::{BankSelect, Props as BankSelectProps};
use pse_web::components::modal::{Modal, Props as ModalProps};
use pse_web::components::payment_modal::{PaymentModal, Props as PaymentModalProps, modal_title};
use pse_web::components::payment_validator::{PaymentValidator, Props as ValidatorProps};
use std::rc::Rc;
use yew::html::ChildrenRenderer;
use yew::{AttrValue, Callback, LocalServerRenderer};

fn banks() -> Vec<Bank> {
    vec![
        Bank {
            id: BankId::Number(1),
            name: "Banco A".to_string(),
            code: "001".to_string(),
        },
        Bank {
            id: BankId::Number(2),
            name: "Banco B".to_string(),
            code: "002".to_string(),
        },
    ]
}

fn selecting_session() -> CheckoutSession {
    CheckoutSession::new("123", "-01")
        .reduce(SessionAction::Event(SessionEvent::Start))
        .reduce(SessionAction::Event(SessionEvent::OrderChecked {
            needs_processing: true,
        }))
        .reduce(SessionAction::BanksLoaded(banks()))
}

fn modal_props(session: CheckoutSession) -> PaymentModalProps {
    PaymentModalProps {
        session,
        cart_url: AttrValue::from("/checkout/#/cart"),
        on_toggle: Callback::noop(),
        on_select: Callback::noop(),
        on_dismiss: Callback::noop(),
        on_continue: Callback::noop(),
    }
}

#[test]
fn modal_renders_when_open_and_skips_when_closed() {
    let open_props = ModalProps {
        open: true,
        title: AttrValue::from("Title"),
        description: Some(AttrValue::from("Desc")),
        children: ChildrenRenderer::default(),
    };
    let html = block_on(LocalServerRenderer::<Modal>::with_props(open_props).render());
    assert!(html.contains("pse-modal__overlay"));
    assert!(html.contains("Desc"));
    assert!(!html.contains("close"));

    let closed_props = ModalProps {
        open: false,
        title: AttrValue::from("Title"),
        description: None,
        children: ChildrenRenderer::default(),
    };
    let html = block_on(LocalServerRenderer::<Modal>::with_props(closed_props).render());
    assert!(!html.contains("pse-modal__overlay"));
}

#[test]
fn bank_select_shows_placeholder_and_backend_order() {
    let mut selection = selecting_session().selection;
    selection.dropdown_open = true;
    let props = BankSelectProps {
        selection,
        on_toggle: Callback::noop(),
        on_select: Callback::noop(),
        on_dismiss: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<BankSelect>::with_props(props).render());
    assert!(html.contains("pse-select__placeholder"));
    assert!(html.contains("pse-select__options--open"));
    let a = html.find("Banco A").expect("Banco A listed");
    let b = html.find("Banco B").expect("Banco B listed");
    assert!(a < b);
    assert!(!html.contains("pse-select__option--selected"));
}

#[test]
fn bank_select_highlights_current_choice() {
    let session = selecting_session().reduce(SessionAction::SelectBank {
        code: Some("002".to_string()),
        name: "Banco B".to_string(),
    });
    let props = BankSelectProps {
        selection: session.selection,
        on_toggle: Callback::noop(),
        on_select: Callback::noop(),
        on_dismiss: Callback::noop(),
    };
    let html = block_on(LocalServerRenderer::<BankSelect>::with_props(props).render());
    assert!(html.contains("pse-select__option--selected"));
    assert!(!html.contains("pse-select__placeholder"));
    assert!(!html.contains("pse-select__options--open"));
}

#[test]
fn payment_modal_reflects_phase_and_selection() {
    let html =
        block_on(LocalServerRenderer::<PaymentModal>::with_props(modal_props(selecting_session())).render());
    assert!(html.contains("Selecciona tu banco para continuar"));
    assert!(html.contains("pse-continue--disabled"));
    assert!(html.contains("Regresar al comercio"));
    assert!(html.contains("/checkout/#/cart"));

    let chosen = selecting_session().reduce(SessionAction::SelectBank {
        code: Some("001".to_string()),
        name: "Banco A".to_string(),
    });
    let html = block_on(LocalServerRenderer::<PaymentModal>::with_props(modal_props(chosen)).render());
    assert!(!html.contains("pse-continue--disabled"));

    let idle = CheckoutSession::new("123", "-01");
    assert_eq!(idle.phase, Phase::Idle);
    let html = block_on(LocalServerRenderer::<PaymentModal>::with_props(modal_props(idle)).render());
    assert!(!html.contains("pse-modal__overlay"));
}

#[test]
fn payment_modal_surfaces_failures() {
    let failed = selecting_session()
        .reduce(SessionAction::SelectBank {
            code: Some("001".to_string()),
            name: "Banco A".to_string(),
        })
        .reduce(SessionAction::Event(SessionEvent::Submit))
        .reduce(SessionAction::Event(SessionEvent::PaymentFailed {
            reason: "status 500".to_string(),
        }));
    let html = block_on(LocalServerRenderer::<PaymentModal>::with_props(modal_props(failed)).render());
    assert!(html.contains("pse-error"));
    assert!(!html.contains("status 500"));
}

#[test]
fn returning_shoppers_get_the_retry_title() {
    let mut session = selecting_session();
    session.apply(SessionAction::ArrivedFromStore(false));
    assert_eq!(modal_title(false), "Selecciona de nuevo tu banco para continuar");
    let html = block_on(LocalServerRenderer::<PaymentModal>::with_props(modal_props(session)).render());
    assert!(html.contains("Selecciona de nuevo tu banco para continuar"));
}

#[test]
fn validator_starts_behind_the_spinner() {
    let props = ValidatorProps {
        config: Rc::new(ClientConfig::default().with_tenant("acme")),
        order_group: AttrValue::from("123"),
    };
    let html = block_on(LocalServerRenderer::<PaymentValidator>::with_props(props).render());
    assert!(html.contains("pse-spinner-overlay"));
    assert!(!html.contains("pse-modal__overlay"));
}
