//! Checkout session state: the modal lifecycle as an explicit state machine,
//! plus the bank selection it drives.
use crate::model::{Bank, OrderReference};
use crate::selection::BankSelection;
use thiserror::Error;

/// Where the widget is in the checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Phase {
    /// No modal. Initial state, and the resting state when the order needs nothing.
    #[default]
    Idle,
    /// Asking the backend whether the order still awaits bank selection.
    CheckingOrder,
    /// Modal open; banks loading or loaded.
    Selecting,
    /// Payment URL request in flight.
    Submitting,
    /// Browser navigation to the payment page has been issued. Terminal.
    Redirected { url: String },
    /// Modal open with an error from the last bank load or payment attempt.
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Start,
    OrderChecked { needs_processing: bool },
    CheckFailed { reason: String },
    RetryRequested,
    BanksFailed { reason: String },
    Submit,
    PaymentRedirect { url: String },
    PaymentFailed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("event {event:?} is not valid in phase {phase:?}")]
pub struct TransitionError {
    pub phase: Phase,
    pub event: SessionEvent,
}

impl Phase {
    /// Compute the next phase, rejecting transitions the checkout never makes.
    ///
    /// # Errors
    ///
    /// Returns a [`TransitionError`] when `event` is not legal in this phase.
    pub fn transition(&self, event: &SessionEvent) -> Result<Self, TransitionError> {
        use SessionEvent as E;
        let next = match (self, event) {
            (Self::Idle, E::Start) => Self::CheckingOrder,
            (Self::CheckingOrder, E::OrderChecked { needs_processing }) => {
                if *needs_processing {
                    Self::Selecting
                } else {
                    Self::Idle
                }
            }
            (Self::CheckingOrder, E::CheckFailed { .. }) => Self::Idle,
            (Self::Idle | Self::Selecting | Self::Failed { .. }, E::RetryRequested) => {
                Self::Selecting
            }
            (Self::Selecting | Self::Failed { .. }, E::BanksFailed { reason }) => Self::Failed {
                reason: reason.clone(),
            },
            (Self::Selecting | Self::Failed { .. }, E::Submit) => Self::Submitting,
            (Self::Submitting, E::PaymentRedirect { url }) => Self::Redirected { url: url.clone() },
            (Self::Submitting, E::PaymentFailed { reason }) => Self::Failed {
                reason: reason.clone(),
            },
            _ => {
                return Err(TransitionError {
                    phase: self.clone(),
                    event: event.clone(),
                });
            }
        };
        Ok(next)
    }

    #[must_use]
    pub const fn modal_open(&self) -> bool {
        matches!(
            self,
            Self::Selecting | Self::Submitting | Self::Failed { .. }
        )
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(
            self,
            Self::CheckingOrder | Self::Submitting | Self::Redirected { .. }
        )
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { reason } => Some(reason),
            _ => None,
        }
    }
}

/// Everything that can change a [`CheckoutSession`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    Event(SessionEvent),
    BanksLoaded(Vec<Bank>),
    SelectBank { code: Option<String>, name: String },
    ToggleDropdown,
    CloseDropdown,
    ArrivedFromStore(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    pub phase: Phase,
    pub selection: BankSelection,
    pub order_group: String,
    pub order_suffix: String,
    /// Whether the shopper reached this page from the store itself.
    pub from_store: bool,
}

impl CheckoutSession {
    #[must_use]
    pub fn new(order_group: impl Into<String>, order_suffix: impl Into<String>) -> Self {
        Self {
            phase: Phase::Idle,
            selection: BankSelection::default(),
            order_group: order_group.into(),
            order_suffix: order_suffix.into(),
            from_store: true,
        }
    }

    #[must_use]
    pub fn order_reference(&self) -> OrderReference {
        OrderReference::from_group(&self.order_group, &self.order_suffix)
    }

    /// Apply an action in place. Illegal phase transitions are logged and ignored.
    pub fn apply(&mut self, action: SessionAction) {
        match action {
            SessionAction::Event(event) => match self.phase.transition(&event) {
                Ok(next) => {
                    log::debug!("checkout phase {:?} -> {next:?}", self.phase);
                    self.phase = next;
                }
                Err(err) => log::warn!("{err}"),
            },
            SessionAction::BanksLoaded(banks) => self.selection.set_banks(banks),
            SessionAction::SelectBank { code, name } => {
                let order = self.order_reference();
                self.selection.select_bank(code.as_deref(), &name, &order);
            }
            SessionAction::ToggleDropdown => self.selection.toggle_dropdown(),
            SessionAction::CloseDropdown => self.selection.close_dropdown(),
            SessionAction::ArrivedFromStore(from_store) => self.from_store = from_store,
        }
    }

    #[must_use]
    pub fn reduce(mut self, action: SessionAction) -> Self {
        self.apply(action);
        self
    }
}
