use crate::model::{Bank, OrderReference, SelectedBank};

/// Dropdown state for choosing a bank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BankSelection {
    pub banks: Vec<Bank>,
    pub selected: Option<SelectedBank>,
    pub dropdown_open: bool,
}

impl BankSelection {
    /// Replace the listing; the backend order is kept as-is.
    pub fn set_banks(&mut self, banks: Vec<Bank>) {
        self.banks = banks;
    }

    /// Apply a choice. `None` clears any selection. Always closes the dropdown.
    pub fn select_bank(&mut self, code: Option<&str>, name: &str, order: &OrderReference) {
        self.dropdown_open = false;
        self.selected = code.map(|code| SelectedBank::new(order, code, name));
    }

    pub fn toggle_dropdown(&mut self) {
        self.dropdown_open = !self.dropdown_open;
    }

    pub fn close_dropdown(&mut self) {
        self.dropdown_open = false;
    }

    #[must_use]
    pub fn is_highlighted(&self, code: &str) -> bool {
        self.selected
            .as_ref()
            .is_some_and(|selected| selected.bank_code == code)
    }

    /// Bank name to show in the closed dropdown, `None` for the placeholder.
    #[must_use]
    pub fn display_label(&self) -> Option<&str> {
        self.selected
            .as_ref()
            .map(|selected| selected.bank_name.as_str())
    }

    #[must_use]
    pub fn complete_selection(&self) -> Option<&SelectedBank> {
        self.selected
            .as_ref()
            .filter(|selected| selected.is_complete())
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.complete_selection().is_some()
    }
}
