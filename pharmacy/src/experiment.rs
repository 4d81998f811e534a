//! Performance experiment: bulk insert and search timing.
//!
//! Generates `n` synthetic batches whose IDs are drawn uniformly from
//! `B0..B{2n}`, so roughly a fifth of them collide and are rejected as
//! duplicates. All of them are then searched for again with the same IDs.
//! Averages are per generated record, not per stored record.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use rand::Rng;

use crate::inventory::{Inventory, Reporting};
use crate::tree::Mode;
use crate::types::{BatchId, ExpiryDate, Medicine};

/// Fixed fields shared by every synthetic record.
const SYNTHETIC_QUANTITY: u32 = 10;
const SYNTHETIC_EXPIRY: &str = "01-JAN-2027";
const SYNTHETIC_LOCATION: &str = "Shelf";

/// Timings collected by [`run_experiment`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentReport {
    /// Tree mode the inventory was running in.
    pub mode: Mode,
    /// Number of generated records.
    pub size: usize,
    /// Number of records actually stored after duplicates were rejected.
    pub stored: usize,
    /// Number of searches that found their batch.
    pub hits: usize,
    /// Wall time for inserting every generated record.
    pub total_insert: Duration,
    /// Wall time for searching every generated ID.
    pub total_search: Duration,
}

impl ExperimentReport {
    /// Average insert latency in microseconds.
    #[must_use]
    pub fn avg_insert_micros(&self) -> f64 {
        average_micros(self.total_insert, self.size)
    }

    /// Average search latency in microseconds.
    #[must_use]
    pub fn avg_search_micros(&self) -> f64 {
        average_micros(self.total_search, self.size)
    }

    /// Write the averages in the results-file format:
    ///
    /// ```text
    /// Avg Insert Time: <microseconds>
    /// Avg Search Time: <microseconds>
    /// ```
    pub fn write_summary<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Avg Insert Time: {}", self.avg_insert_micros())?;
        writeln!(out, "Avg Search Time: {}", self.avg_search_micros())?;
        Ok(())
    }

    /// Create (or truncate) `path` and write the summary into it.
    pub fn write_report(&self, path: &Path) -> Result<(), ExperimentError> {
        let mut out = BufWriter::new(File::create(path)?);
        self.write_summary(&mut out)?;
        out.flush()?;
        tracing::info!(path = %path.display(), "wrote experiment report");
        Ok(())
    }
}

impl fmt::Display for ExperimentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "--- {} Analysis Report Data (Size: {}) ---",
            self.mode, self.size
        )?;
        writeln!(f, "Avg Insert Time: {} microseconds", self.avg_insert_micros())?;
        writeln!(f, "Avg Search Time: {} microseconds", self.avg_search_micros())?;
        write!(
            f,
            "Total Time: {} (Insert) / {} (Search) microseconds",
            self.total_insert.as_micros(),
            self.total_search.as_micros()
        )
    }
}

#[allow(clippy::cast_precision_loss)] // Sizes and nanosecond totals are far below 2^52
fn average_micros(total: Duration, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    total.as_nanos() as f64 / 1_000.0 / count as f64
}

/// Generate `n` synthetic records with IDs drawn from `B0..B{2n}`.
///
/// IDs may repeat; record `i` is named `Med i`.
pub fn generate_dataset<R: Rng>(n: usize, rng: &mut R) -> Vec<(BatchId, Medicine)> {
    // The date is a literal covered by test_generate_dataset_shape.
    #[allow(clippy::expect_used)]
    let expiry = ExpiryDate::parse(SYNTHETIC_EXPIRY).expect("synthetic expiry date is valid");
    let id_range = n.saturating_mul(2).max(1);

    (0..n)
        .map(|i| {
            let id = BatchId::numbered(rng.random_range(0..id_range));
            let medicine = Medicine::new(
                format!("Med {i}"),
                SYNTHETIC_QUANTITY,
                expiry.clone(),
                SYNTHETIC_LOCATION,
            );
            (id, medicine)
        })
        .collect()
}

/// Clear `inventory`, bulk-load `n` synthetic records into it and time
/// inserting and then searching for every one of them.
///
/// Duplicate IDs are rejected quietly. The inventory is left holding the
/// generated data.
pub fn run_experiment<R: Rng>(
    inventory: &mut Inventory,
    n: usize,
    rng: &mut R,
) -> Result<ExperimentReport, ExperimentError> {
    if n == 0 {
        return Err(ExperimentError::EmptyDataset);
    }

    inventory.clear();
    tracing::info!(size = n, mode = %inventory.mode(), "starting experiment");

    let dataset = generate_dataset(n, rng);
    let ids: Vec<BatchId> = dataset.iter().map(|(id, _)| id.clone()).collect();

    let start = Instant::now();
    for (id, medicine) in dataset {
        inventory.add(id, medicine, Reporting::Quiet);
    }
    let total_insert = start.elapsed();

    let start = Instant::now();
    let hits = ids
        .iter()
        .filter(|id| inventory.find(id.as_str()).is_some())
        .count();
    let total_search = start.elapsed();

    let report = ExperimentReport {
        mode: inventory.mode(),
        size: n,
        stored: inventory.len(),
        hits,
        total_insert,
        total_search,
    };
    tracing::info!(
        stored = report.stored,
        height = inventory.height(),
        avg_insert_us = report.avg_insert_micros(),
        avg_search_us = report.avg_search_micros(),
        "experiment finished"
    );
    Ok(report)
}

/// Errors that can occur while running an experiment.
#[derive(Debug)]
pub enum ExperimentError {
    /// The requested dataset size was zero.
    EmptyDataset,
    /// Writing the results file failed.
    Io(io::Error),
}

impl fmt::Display for ExperimentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDataset => write!(f, "dataset size must be at least 1"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for ExperimentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EmptyDataset => None,
            Self::Io(e) => Some(e),
        }
    }
}

impl From<io::Error> for ExperimentError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
