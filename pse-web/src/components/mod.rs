pub mod bank_select;
pub mod modal;
pub mod payment_modal;
pub mod payment_validator;
pub mod spinner;
