//! The medicine batch record stored in the inventory.

use crate::types::ExpiryDate;

/// Details of one batch of medicine.
///
/// The batch ID is not part of the record; it is the key the record is
/// stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Medicine {
    /// Name of the medicine.
    pub name: String,
    /// Physical stock count in this batch.
    pub quantity: u32,
    /// Expiry date.
    pub expiry: ExpiryDate,
    /// Shelf or fridge location, e.g. `Shelf A01`.
    pub location: String,
}

impl Medicine {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        quantity: u32,
        expiry: ExpiryDate,
        location: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            quantity,
            expiry,
            location: location.into(),
        }
    }
}
