//! PSE Checkout Core
//!
//! Platform-agnostic logic for the PSE bank-transfer checkout widget: the
//! backend client, remembered bank choice, bank selection, the checkout
//! session state machine, and the flow that ties them together.
//! This crate has no browser dependencies; the web front end supplies
//! [`Transport`], [`BankMemory`], and [`HostPage`] implementations.

pub mod api;
pub mod config;
pub mod flow;
pub mod host;
pub mod memory;
pub mod model;
pub mod selection;
pub mod session;

// Re-export commonly used types
pub use api::{ApiClient, ApiError, ApiRequest, ApiResponse, HttpMethod, Transport};
pub use config::{ClientConfig, ConfigError};
pub use flow::{CheckoutFlow, PaymentOutcome, StartOutcome};
pub use host::{HostError, HostPage};
pub use memory::{BankMemory, InMemoryBankMemory, recover, remember};
pub use model::{Bank, BankId, OrderReference, SelectedBank, StoredBank};
pub use selection::BankSelection;
pub use session::{CheckoutSession, Phase, SessionAction, SessionEvent, TransitionError};
