//! Remembered bank choice that outlives a page reload or a redirect.
use crate::model::StoredBank;
use std::cell::RefCell;

/// A single-key string store, `localStorage` in the browser.
///
/// Access is synchronous and unguarded; concurrent tabs are last-writer-wins.
pub trait BankMemory {
    fn load(&self) -> Option<String>;
    fn store(&self, value: &str);
    fn clear(&self);
}

/// Whether any record is stored, parsable or not.
pub fn has_record(memory: &impl BankMemory) -> bool {
    memory.load().is_some()
}

/// Read back a stored choice when both its code and name are present.
///
/// Malformed records are treated as absent.
pub fn recover(memory: &impl BankMemory) -> Option<StoredBank> {
    let raw = memory.load()?;
    match serde_json::from_str::<StoredBank>(&raw) {
        Ok(stored) if stored.usable().is_some() => Some(stored),
        Ok(_) => {
            log::debug!("Stored bank record is incomplete; ignoring it");
            None
        }
        Err(err) => {
            log::warn!("Stored bank record is not valid JSON: {err}");
            None
        }
    }
}

/// Persist a choice so the next page load can submit it automatically.
pub fn remember(memory: &impl BankMemory, code: &str, name: &str) {
    match serde_json::to_string(&StoredBank::new(code, name)) {
        Ok(json) => memory.store(&json),
        Err(err) => log::error!("Failed to serialize bank record: {err}"),
    }
}

/// In-process memory for hosts without browser storage, and for tests.
#[derive(Debug, Default)]
pub struct InMemoryBankMemory {
    value: RefCell<Option<String>>,
}

impl InMemoryBankMemory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_value(value: &str) -> Self {
        Self {
            value: RefCell::new(Some(value.to_string())),
        }
    }
}

impl BankMemory for InMemoryBankMemory {
    fn load(&self) -> Option<String> {
        self.value.borrow().clone()
    }

    fn store(&self, value: &str) {
        *self.value.borrow_mut() = Some(value.to_string());
    }

    fn clear(&self) {
        *self.value.borrow_mut() = None;
    }
}
