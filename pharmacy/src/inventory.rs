//! Medicine batch inventory.
//!
//! Thin layer over [`OrderedMap`] keyed by [`BatchId`]. It decides how
//! duplicate batches are reported; the tree itself only rejects them.

use crate::tree::{Iter, Mode, OrderedMap};
use crate::types::{BatchId, ExpiryDate, Medicine};

/// Whether a rejected duplicate batch should be logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reporting {
    /// Log a warning for every rejected duplicate.
    Warn,
    /// Reject duplicates silently (bulk loads with random IDs).
    Quiet,
}

/// Batches preloaded by [`Inventory::with_sample_data`]:
/// `(batch_id, name, quantity, expiry, location)`.
pub const SAMPLE_BATCHES: [(&str, &str, u32, &str, &str); 3] = [
    ("B303", "Ascorbic Acid 1000mg", 100, "03-MAR-2027", "Shelf A01"),
    ("B101", "Insulin Pen U-100", 20, "01-JAN-2027", "Fridge FR01"),
    ("B505", "Paracetamol 500mg", 500, "05-MAY-2027", "Shelf P02"),
];

/// The set of medicine batches currently in stock.
#[derive(Debug, Default)]
pub struct Inventory {
    batches: OrderedMap<BatchId, Medicine>,
}

impl Inventory {
    /// Create an empty inventory backed by a tree in the given mode.
    #[must_use]
    pub const fn new(mode: Mode) -> Self {
        Self {
            batches: OrderedMap::new(mode),
        }
    }

    /// Create an inventory preloaded with [`SAMPLE_BATCHES`].
    #[must_use]
    pub fn with_sample_data(mode: Mode) -> Self {
        let mut inventory = Self::new(mode);
        for (id, name, quantity, expiry, location) in SAMPLE_BATCHES {
            // Sample IDs and dates are literals covered by test_sample_data_loads.
            #[allow(clippy::expect_used)]
            let id = BatchId::new(id).expect("sample batch ID is valid");
            #[allow(clippy::expect_used)]
            let expiry = ExpiryDate::parse(expiry).expect("sample expiry date is valid");
            inventory.add(id, Medicine::new(name, quantity, expiry, location), Reporting::Warn);
        }
        inventory
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.batches.mode()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.batches.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Height of the backing tree.
    #[must_use]
    pub fn height(&self) -> usize {
        self.batches.height()
    }

    /// Add a batch. Returns `false` if the batch ID is already in stock, in
    /// which case the existing batch is kept unchanged.
    pub fn add(&mut self, id: BatchId, medicine: Medicine, reporting: Reporting) -> bool {
        match self.batches.insert(id, medicine) {
            Ok(()) => true,
            Err(duplicate) => {
                if reporting == Reporting::Warn {
                    tracing::warn!(batch_id = %duplicate.key, "batch ID already exists");
                }
                false
            }
        }
    }

    /// Look up a batch by ID.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Medicine> {
        self.batches.find(id)
    }

    /// Remove a batch. Removing an unknown ID does nothing and returns
    /// `false`.
    pub fn remove(&mut self, id: &str) -> bool {
        let removed = self.batches.remove(id);
        if removed {
            tracing::debug!(batch_id = id, "removed batch");
        }
        removed
    }

    /// All batches in ascending batch ID order.
    #[must_use]
    pub fn batches(&self) -> Iter<'_, BatchId, Medicine> {
        self.batches.iter()
    }

    /// Drop every batch.
    pub fn clear(&mut self) {
        self.batches.clear();
    }
}
