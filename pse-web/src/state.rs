use pse_core::{CheckoutSession, SessionAction};
use std::ops::Deref;
use std::rc::Rc;
use yew::prelude::*;

/// [`CheckoutSession`] adapted to `use_reducer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState(pub CheckoutSession);

impl Deref for SessionState {
    type Target = CheckoutSession;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Reducible for SessionState {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(Self(self.0.clone().reduce(action)))
    }
}

#[hook]
pub fn use_session(order_group: &str, order_suffix: &str) -> UseReducerHandle<SessionState> {
    let order_group = order_group.to_string();
    let order_suffix = order_suffix.to_string();
    use_reducer(move || SessionState(CheckoutSession::new(order_group, order_suffix)))
}

/// Wrap a reducer dispatcher as the plain function the core flow expects.
#[must_use]
pub fn dispatch_fn(dispatcher: UseReducerDispatcher<SessionState>) -> impl Fn(SessionAction) {
    move |action| dispatcher.dispatch(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pse_core::{Phase, SessionEvent};

    #[test]
    fn reducer_applies_actions() {
        let state = Rc::new(SessionState(CheckoutSession::new("12", "-01")));
        let state = state.reduce(SessionAction::Event(SessionEvent::Start));
        assert_eq!(state.phase, Phase::CheckingOrder);
        let state = state.reduce(SessionAction::SelectBank {
            code: Some("001".into()),
            name: "Banco A".into(),
        });
        assert_eq!(
            state.selection.display_label(),
            Some("Banco A")
        );
    }
}
