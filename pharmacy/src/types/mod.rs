//! Domain types for the pharmacy inventory.

mod batch_id;
mod expiry;
mod medicine;

pub use batch_id::{BatchId, BatchIdError};
pub use expiry::{ExpiryDate, ExpiryDateError, MONTHS};
pub use medicine::Medicine;
