//! Interactive menu over any line-based input and output.
//!
//! The menu owns the [`Inventory`] and runs one operation per selection
//! until the user exits or input ends. Every operation reports how long the
//! inventory call itself took.

use std::fmt;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use rand::rngs::StdRng;

use crate::display::{render_details, render_table};
use crate::experiment::run_experiment;
use crate::inventory::{Inventory, Reporting};
use crate::types::{BatchId, ExpiryDate, Medicine};

/// A main-menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Add,
    Search,
    DisplayAll,
    Delete,
    Experiment,
    Exit,
}

impl Choice {
    /// Parse the number typed at the main menu.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().parse::<u8>().ok()? {
            1 => Some(Self::Add),
            2 => Some(Self::Search),
            3 => Some(Self::DisplayAll),
            4 => Some(Self::Delete),
            5 => Some(Self::Experiment),
            6 => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Whether the loop keeps going after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// The interactive menu driver.
pub struct Menu<R, W> {
    input: R,
    output: W,
    inventory: Inventory,
    results_path: PathBuf,
    rng: StdRng,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    #[must_use]
    pub const fn new(
        input: R,
        output: W,
        inventory: Inventory,
        results_path: PathBuf,
        rng: StdRng,
    ) -> Self {
        Self {
            input,
            output,
            inventory,
            results_path,
            rng,
        }
    }

    /// Run until the user picks Exit or input is exhausted.
    pub fn run(&mut self) -> Result<(), MenuError> {
        loop {
            self.print_menu()?;
            let Some(line) = self.prompt("Enter your choice: ")? else {
                break;
            };

            let flow = match Choice::parse(&line) {
                Some(Choice::Add) => self.add_batch()?,
                Some(Choice::Search) => self.search_batch()?,
                Some(Choice::DisplayAll) => self.display_all()?,
                Some(Choice::Delete) => self.delete_batch()?,
                Some(Choice::Experiment) => self.experiment()?,
                Some(Choice::Exit) => {
                    writeln!(self.output, "Exiting... Goodbye!")?;
                    Flow::Exit
                }
                None => {
                    tracing::debug!(input = %line.trim(), "invalid menu choice");
                    writeln!(self.output, "Invalid choice. Please enter a number from 1 to 6.")?;
                    Flow::Continue
                }
            };

            if flow == Flow::Exit {
                break;
            }
        }
        self.output.flush()?;
        Ok(())
    }

    /// Give back the inventory, e.g. to inspect it after a scripted run.
    #[must_use]
    pub fn into_inventory(self) -> Inventory {
        self.inventory
    }

    fn print_menu(&mut self) -> Result<(), MenuError> {
        let mode = self.inventory.mode();
        writeln!(self.output)?;
        writeln!(self.output, "=== Medicine Management System ({mode}) ===")?;
        writeln!(self.output, "1. Add New Medicine Batch")?;
        writeln!(self.output, "2. Search by Batch ID")?;
        writeln!(self.output, "3. Display All Batches")?;
        writeln!(self.output, "4. Delete Batch")?;
        writeln!(self.output, "5. Analysis Report: Run Performance Experiment")?;
        writeln!(self.output, "6. Exit")?;
        Ok(())
    }

    fn add_batch(&mut self) -> Result<Flow, MenuError> {
        writeln!(self.output, "\n--- Add Medicine Batch ---")?;

        let id = loop {
            let Some(line) = self.prompt("Enter Batch ID (e.g., B202): ")? else {
                return Ok(Flow::Exit);
            };
            match BatchId::new(&line) {
                Ok(id) => break id,
                Err(e) => writeln!(self.output, "Invalid batch ID: {e}.")?,
            }
        };

        let Some(name) = self.prompt("Enter Medicine Name: ")? else {
            return Ok(Flow::Exit);
        };

        let Some(mut line) = self.prompt("Enter Quantity: ")? else {
            return Ok(Flow::Exit);
        };
        let quantity = loop {
            if let Ok(quantity) = line.trim().parse::<u32>() {
                break quantity;
            }
            let Some(retry) = self.prompt("Invalid input. Please enter a number: ")? else {
                return Ok(Flow::Exit);
            };
            line = retry;
        };

        let expiry = loop {
            let Some(line) = self.prompt("Enter Expiry Date (DD-MMM-YYYY, e.g., 01-JAN-2027): ")?
            else {
                return Ok(Flow::Exit);
            };
            match ExpiryDate::parse(line.trim()) {
                Ok(expiry) => break expiry,
                Err(e) => {
                    tracing::debug!(error = %e, "rejected expiry date");
                    writeln!(
                        self.output,
                        "Invalid format! Please use DD-MMM-YYYY (e.g., 01-JAN-2027)."
                    )?;
                }
            }
        };

        let Some(location) = self.prompt("Enter Location (e.g., Shelf A01): ")? else {
            return Ok(Flow::Exit);
        };

        let medicine = Medicine::new(name.trim(), quantity, expiry, location.trim());
        let display_id = id.to_string();

        let start = Instant::now();
        let added = self.inventory.add(id, medicine, Reporting::Warn);
        let elapsed = start.elapsed();

        if added {
            writeln!(self.output, "Batch added successfully!")?;
            writeln!(self.output, "Execution Time: {} nanoseconds", elapsed.as_nanos())?;
        } else {
            writeln!(self.output, "Error: Batch ID {display_id} already exists.")?;
        }
        Ok(Flow::Continue)
    }

    fn search_batch(&mut self) -> Result<Flow, MenuError> {
        writeln!(self.output, "\n--- Search Medicine ---")?;
        let Some(line) = self.prompt("Enter Batch ID to search: ")? else {
            return Ok(Flow::Exit);
        };
        let id = line.trim();

        let start = Instant::now();
        let found = self.inventory.find(id);
        let elapsed = start.elapsed();

        match found {
            Some(medicine) => {
                writeln!(self.output, "\n[FOUND] Batch Details:")?;
                write!(self.output, "{}", render_details(id, medicine))?;
            }
            None => {
                writeln!(self.output, "\n[NOT FOUND] Batch {id} does not exist.")?;
            }
        }
        writeln!(self.output, "Execution Time: {} nanoseconds", elapsed.as_nanos())?;
        Ok(Flow::Continue)
    }

    fn display_all(&mut self) -> Result<Flow, MenuError> {
        writeln!(self.output, "\n--- All Medicine Batches ---")?;

        let start = Instant::now();
        let table = render_table(self.inventory.batches());
        let elapsed = start.elapsed();

        write!(self.output, "{table}")?;
        writeln!(self.output, "Execution Time: {} nanoseconds", elapsed.as_nanos())?;
        Ok(Flow::Continue)
    }

    fn delete_batch(&mut self) -> Result<Flow, MenuError> {
        writeln!(self.output, "\n--- Delete Batch ---")?;
        let Some(line) = self.prompt("Enter Batch ID to delete: ")? else {
            return Ok(Flow::Exit);
        };

        let start = Instant::now();
        let removed = self.inventory.remove(line.trim());
        let elapsed = start.elapsed();

        if removed {
            writeln!(self.output, "Delete operation completed.")?;
        } else {
            writeln!(self.output, "Batch {} not found; nothing deleted.", line.trim())?;
        }
        writeln!(self.output, "Execution Time: {} nanoseconds", elapsed.as_nanos())?;
        Ok(Flow::Continue)
    }

    fn experiment(&mut self) -> Result<Flow, MenuError> {
        writeln!(self.output, "\n--- Performance Experiment ---")?;
        let Some(line) = self.prompt("Enter dataset size N (e.g. 1000, 5000, 10000): ")? else {
            return Ok(Flow::Exit);
        };

        let size = match line.trim().parse::<usize>() {
            Ok(size) if size > 0 => size,
            _ => {
                writeln!(self.output, "Invalid number.")?;
                return Ok(Flow::Continue);
            }
        };

        writeln!(self.output, "\nCreating {size} random medicines...")?;
        let report = match run_experiment(&mut self.inventory, size, &mut self.rng) {
            Ok(report) => report,
            Err(e) => {
                writeln!(self.output, "Experiment failed: {e}")?;
                return Ok(Flow::Continue);
            }
        };

        writeln!(self.output, "\n{report}")?;
        if let Err(e) = report.write_report(&self.results_path) {
            tracing::warn!(path = %self.results_path.display(), error = %e, "failed to write report");
            writeln!(self.output, "Could not write {}: {e}", self.results_path.display())?;
        }
        Ok(Flow::Continue)
    }

    /// Print `text` without a newline and read one line of input.
    ///
    /// Returns `None` at end of input. The trailing line terminator is
    /// stripped.
    fn prompt(&mut self, text: &str) -> Result<Option<String>, MenuError> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(len);
        Ok(Some(line))
    }
}

/// Errors that end the menu loop.
#[derive(Debug)]
pub enum MenuError {
    /// Reading input or writing output failed.
    Io(io::Error),
}

impl fmt::Display for MenuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "terminal I/O error: {e}"),
        }
    }
}

impl std::error::Error for MenuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
        }
    }
}

impl From<io::Error> for MenuError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rand::SeedableRng;
    use tempfile::tempdir;

    use super::*;
    use crate::tree::Mode;

    /// Run a scripted session and return the inventory and everything
    /// printed.
    fn run_script(script: &str, inventory: Inventory, results_path: PathBuf) -> (Inventory, String) {
        let mut output = Vec::new();
        let mut menu = Menu::new(
            Cursor::new(script.as_bytes().to_vec()),
            &mut output,
            inventory,
            results_path,
            StdRng::seed_from_u64(3),
        );
        menu.run().expect("menu run");
        let inventory = menu.into_inventory();
        (inventory, String::from_utf8(output).expect("utf-8 output"))
    }

    #[test]
    fn test_choice_parse() {
        assert_eq!(Choice::parse("1"), Some(Choice::Add));
        assert_eq!(Choice::parse(" 6 "), Some(Choice::Exit));
        assert_eq!(Choice::parse("7"), None);
        assert_eq!(Choice::parse("abc"), None);
        assert_eq!(Choice::parse(""), None);
    }

    #[test]
    fn test_add_with_reprompts() {
        let script = "1\nB202\nAmoxicillin 250mg\nlots\n-3\n40\n2027-01-01\n01-FEB-2027\nShelf B02\n6\n";
        let (inventory, output) =
            run_script(script, Inventory::new(Mode::Avl), PathBuf::from("unused.txt"));

        let medicine = inventory.find("B202").expect("B202 added");
        assert_eq!(medicine.name, "Amoxicillin 250mg");
        assert_eq!(medicine.quantity, 40);
        assert_eq!(medicine.expiry.as_str(), "01-FEB-2027");
        assert_eq!(medicine.location, "Shelf B02");

        assert_eq!(output.matches("Invalid input. Please enter a number: ").count(), 2);
        assert!(output.contains("Invalid format! Please use DD-MMM-YYYY"));
        assert!(output.contains("Batch added successfully!"));
        assert!(output.contains("Exiting... Goodbye!"));
    }

    #[test]
    fn test_add_duplicate_reports_error() {
        let script = "1\nB101\nOther\n1\n01-JAN-2028\nShelf Z\n6\n";
        let (inventory, output) = run_script(
            script,
            Inventory::with_sample_data(Mode::Bst),
            PathBuf::from("unused.txt"),
        );

        assert!(output.contains("Error: Batch ID B101 already exists."));
        assert_eq!(
            inventory.find("B101").map(|m| m.name.as_str()),
            Some("Insulin Pen U-100")
        );
    }

    #[test]
    fn test_search_display_and_delete() {
        let script = "2\nB505\n2\nB999\n4\nB303\n4\nB303\n3\n6\n";
        let (inventory, output) = run_script(
            script,
            Inventory::with_sample_data(Mode::Avl),
            PathBuf::from("unused.txt"),
        );

        assert!(output.contains("[FOUND] Batch Details:"));
        assert!(output.contains("Name:     Paracetamol 500mg"));
        assert!(output.contains("[NOT FOUND] Batch B999 does not exist."));
        assert!(output.contains("Delete operation completed."));
        assert!(output.contains("Batch B303 not found; nothing deleted."));
        assert!(output.contains("Execution Time: "));

        let table_start = output.find("Batch ID       Name").expect("table header");
        let table = &output[table_start..];
        assert!(table.contains("B101"));
        assert!(table.contains("B505"));
        assert!(!table.contains("B303"));
        assert_eq!(inventory.len(), 2);
    }

    #[test]
    fn test_invalid_choice_then_eof_exits_cleanly() {
        let (inventory, output) = run_script(
            "9\nhello\n",
            Inventory::with_sample_data(Mode::Avl),
            PathBuf::from("unused.txt"),
        );
        assert_eq!(
            output.matches("Invalid choice. Please enter a number from 1 to 6.").count(),
            2
        );
        assert!(!output.contains("Goodbye"));
        assert_eq!(inventory.len(), 3);
    }

    #[test]
    fn test_eof_in_the_middle_of_add() {
        let (inventory, _) = run_script(
            "1\nB777\nHalf entered\n",
            Inventory::new(Mode::Avl),
            PathBuf::from("unused.txt"),
        );
        assert!(inventory.is_empty());
    }

    #[test]
    fn test_experiment_writes_results_file() {
        let dir = tempdir().expect("create temp dir");
        let path = dir.path().join("bst_results.txt");
        let (inventory, output) =
            run_script("5\n200\n6\n", Inventory::with_sample_data(Mode::Bst), path.clone());

        assert!(output.contains("Creating 200 random medicines..."));
        assert!(output.contains("--- BST Analysis Report Data (Size: 200) ---"));
        assert!(!inventory.is_empty());
        assert!(inventory.len() <= 200);

        let contents = std::fs::read_to_string(&path).expect("results file");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Avg Insert Time: "));
        assert!(lines[1].starts_with("Avg Search Time: "));
    }

    #[test]
    fn test_experiment_rejects_bad_size() {
        let (inventory, output) = run_script(
            "5\n0\n5\nmany\n6\n",
            Inventory::with_sample_data(Mode::Avl),
            PathBuf::from("unused.txt"),
        );
        assert_eq!(output.matches("Invalid number.").count(), 2);
        assert_eq!(inventory.len(), 3);
    }

    #[test]
    fn test_menu_error_display() {
        let err = MenuError::from(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
        assert_eq!(err.to_string(), "terminal I/O error: pipe closed");
    }
}
