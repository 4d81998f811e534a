//! Fixed-width table rendering for batch listings.

use std::fmt::Write;

use crate::types::{BatchId, Medicine};

/// Column widths: batch ID, name, quantity, expiry, location.
const WIDTHS: [usize; 5] = [15, 25, 10, 15, 20];
const RULE_WIDTH: usize = 85;

/// Message shown instead of a table when there is nothing to list.
pub const EMPTY_INVENTORY: &str = "No medicines in the system.";

/// Render batches as a left-aligned table with a header and a rule.
///
/// Columns are padded, never truncated, so an overlong name pushes the
/// rest of its row to the right.
#[must_use]
pub fn render_table<'a, I>(batches: I) -> String
where
    I: IntoIterator<Item = (&'a BatchId, &'a Medicine)>,
{
    let mut rows = batches.into_iter().peekable();
    if rows.peek().is_none() {
        return format!("{EMPTY_INVENTORY}\n");
    }

    let mut out = String::new();
    push_row(&mut out, ["Batch ID", "Name", "Quantity", "Expiry", "Location"]);
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');

    for (id, medicine) in rows {
        let quantity = medicine.quantity.to_string();
        push_row(
            &mut out,
            [
                id.as_str(),
                &medicine.name,
                &quantity,
                medicine.expiry.as_str(),
                &medicine.location,
            ],
        );
    }
    out
}

/// Render the detail block for a single batch.
#[must_use]
pub fn render_details(id: &str, medicine: &Medicine) -> String {
    format!(
        "Batch ID: {id}\nName:     {}\nQuantity: {}\nExpiry:   {}\nLocation: {}\n",
        medicine.name, medicine.quantity, medicine.expiry, medicine.location
    )
}

fn push_row(out: &mut String, cells: [&str; 5]) {
    for (cell, width) in cells.iter().zip(WIDTHS) {
        // Writing to a String cannot fail.
        let _ = write!(out, "{cell:<width$}");
    }
    // Drop the padding of the last column.
    let trimmed = out.trim_end_matches(' ').len();
    out.truncate(trimmed);
    out.push('\n');
}
