//! The checkout sequence: order check, bank listing, and payment redirect.
//!
//! Flow operations never hold session state across an await. They report
//! progress by dispatching [`SessionAction`]s, so the same code drives a
//! yew reducer in the browser and a plain `RefCell` in tests.
use crate::api::{ApiClient, ApiError, Transport};
use crate::config::ClientConfig;
use crate::host::HostPage;
use crate::memory::{self, BankMemory};
use crate::session::{CheckoutSession, SessionAction, SessionEvent, TransitionError};

/// Result of a payment attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// The selection was incomplete; no request was made.
    Skipped,
    /// The session could not enter submission from its current phase; no request was made.
    Rejected(TransitionError),
    Redirected(String),
    Failed(String),
}

/// How [`CheckoutFlow::start`] settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// The order still awaits a bank; the modal was opened.
    Selecting,
    /// Nothing to do for this order.
    NotNeeded,
    /// The order check itself failed.
    CheckFailed,
}

pub struct CheckoutFlow<T: Transport, M: BankMemory, H: HostPage> {
    api: ApiClient<T>,
    memory: M,
    host: H,
}

impl<T, M, H> CheckoutFlow<T, M, H>
where
    T: Transport,
    M: BankMemory,
    H: HostPage,
{
    pub const fn new(api: ApiClient<T>, memory: M, host: H) -> Self {
        Self { api, memory, host }
    }

    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        self.api.config()
    }

    #[must_use]
    pub const fn api(&self) -> &ApiClient<T> {
        &self.api
    }

    #[must_use]
    pub const fn memory(&self) -> &M {
        &self.memory
    }

    #[must_use]
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Check the order and, if it still needs a bank, restore any remembered
    /// choice, open the modal, and load the banks.
    ///
    /// The retry action is injected into the host page whatever the order
    /// status, and loading always ends.
    pub async fn start(
        &self,
        order_group: &str,
        dispatch: &dyn Fn(SessionAction),
    ) -> StartOutcome {
        dispatch(SessionAction::Event(SessionEvent::Start));
        let outcome = match self.api.order_info(order_group).await {
            Ok(info) if info.needs_to_process => {
                log::info!("order group {order_group} awaits bank selection");
                dispatch(SessionAction::Event(SessionEvent::OrderChecked {
                    needs_processing: true,
                }));
                self.restore_selection(dispatch);
                self.load_banks(dispatch).await;
                StartOutcome::Selecting
            }
            Ok(_) => {
                log::info!("order group {order_group} needs no processing");
                dispatch(SessionAction::Event(SessionEvent::OrderChecked {
                    needs_processing: false,
                }));
                StartOutcome::NotNeeded
            }
            Err(err) => {
                log::error!("Order status check failed: {err}");
                dispatch(SessionAction::Event(SessionEvent::CheckFailed {
                    reason: err.to_string(),
                }));
                StartOutcome::CheckFailed
            }
        };
        self.inject_retry_action();
        outcome
    }

    /// Reopen the modal and reload the banks for another attempt.
    pub async fn retry(&self, dispatch: &dyn Fn(SessionAction)) {
        dispatch(SessionAction::Event(SessionEvent::RetryRequested));
        self.load_banks(dispatch).await;
    }

    /// Fetch the bank list into the session.
    pub async fn load_banks(&self, dispatch: &dyn Fn(SessionAction)) {
        match self.api.banks().await {
            Ok(banks) => {
                log::debug!("loaded {} banks", banks.len());
                dispatch(SessionAction::BanksLoaded(banks));
            }
            Err(err) => {
                log::error!("Bank list request failed: {err}");
                dispatch(SessionAction::Event(SessionEvent::BanksFailed {
                    reason: err.to_string(),
                }));
            }
        }
    }

    /// Request a payment URL for a complete selection and navigate to it.
    ///
    /// Only a session whose phase accepts [`SessionEvent::Submit`] reaches the
    /// network; an idle or already submitting session is rejected untouched.
    pub async fn pay(
        &self,
        session: &CheckoutSession,
        dispatch: &dyn Fn(SessionAction),
    ) -> PaymentOutcome {
        let Some(selected) = session.selection.complete_selection() else {
            return PaymentOutcome::Skipped;
        };
        if let Err(err) = session.phase.transition(&SessionEvent::Submit) {
            log::warn!("Payment not submitted: {err}");
            return PaymentOutcome::Rejected(err);
        }
        dispatch(SessionAction::Event(SessionEvent::Submit));

        let result = self
            .api
            .payment_url(selected)
            .await
            .map_err(|err: ApiError| err.to_string())
            .and_then(|response| {
                response.redirect_url().map(str::to_string).ok_or_else(|| {
                    format!(
                        "payment URL unavailable (status {})",
                        response
                            .status
                            .map_or_else(|| "missing".to_string(), |s| s.to_string())
                    )
                })
            })
            .and_then(|url| {
                self.host
                    .navigate(&url)
                    .map(|()| url)
                    .map_err(|err| err.to_string())
            });

        match result {
            Ok(url) => {
                log::info!("redirecting to payment page");
                dispatch(SessionAction::Event(SessionEvent::PaymentRedirect {
                    url: url.clone(),
                }));
                PaymentOutcome::Redirected(url)
            }
            Err(reason) => {
                log::warn!("Payment request failed: {reason}");
                dispatch(SessionAction::Event(SessionEvent::PaymentFailed {
                    reason: reason.clone(),
                }));
                PaymentOutcome::Failed(reason)
            }
        }
    }

    /// Submit a restored choice without user interaction.
    ///
    /// Fires only when the selection is complete, the phase accepts a submit,
    /// and a remembered record is still stored. The record is cleared first so
    /// a reload cannot resubmit.
    pub async fn auto_pay(
        &self,
        session: &CheckoutSession,
        dispatch: &dyn Fn(SessionAction),
    ) -> PaymentOutcome {
        if !session.selection.can_submit() || !memory::has_record(&self.memory) {
            return PaymentOutcome::Skipped;
        }
        if let Err(err) = session.phase.transition(&SessionEvent::Submit) {
            log::debug!("remembered choice kept; {err}");
            return PaymentOutcome::Rejected(err);
        }
        self.memory.clear();
        log::info!("submitting remembered bank choice");
        self.pay(session, dispatch).await
    }

    fn restore_selection(&self, dispatch: &dyn Fn(SessionAction)) {
        let Some(stored) = memory::recover(&self.memory) else {
            return;
        };
        if let Some((code, name)) = stored.usable() {
            log::debug!("restoring remembered bank {code}");
            dispatch(SessionAction::SelectBank {
                code: Some(code.to_string()),
                name: name.to_string(),
            });
        }
    }

    fn inject_retry_action(&self) {
        match self.host.inject_retry_action() {
            Ok(true) => log::debug!("retry action injected"),
            Ok(false) => log::debug!("retry action not injected; container absent or decorated"),
            Err(err) => log::warn!("Could not inject retry action: {err}"),
        }
    }
}
