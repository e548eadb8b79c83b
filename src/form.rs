//! Submitted form data.

use serde::{Deserialize, Serialize};

/// One signer's submitted form values.
///
/// All values are raw, unvalidated strings. Empty fields are legal and are
/// simply skipped during composition; validation of id formats or dates is
/// the template's problem (the sheet is checked by a human anyway).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormData {
    pub name: String,
    pub id_number: String,
    pub birth_date: String,
    pub address: String,
}

impl FormData {
    /// True when every field is empty, i.e. there is nothing to generate.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.id_number.is_empty()
            && self.birth_date.is_empty()
            && self.address.is_empty()
    }

    /// Look up a field value by its wire name as used in template configs.
    ///
    /// Returns `None` for field names this form does not carry.
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => Some(&self.name),
            "idNumber" => Some(&self.id_number),
            "birthDate" => Some(&self.birth_date),
            "address" => Some(&self.address),
            _ => None,
        }
    }
}
