use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use clap::Subcommand;
use rust_decimal::Decimal;
use tracing::info;

use crate::{
    csv_utils::{read_csv, write_csv},
    dto::{to_minor_units, ExpenseRow, ImportRow},
    stores::KeyValueStore,
    Config, Error, ExpenseRecord, ExpenseStore,
};

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// List expenses in display order
    List,
    /// Add an expense
    Add {
        name: String,
        category: String,
        /// Amount in major units, e.g. 3.50
        amount: Decimal,
    },
    /// Remove expenses by position, as shown by `list`
    Remove {
        #[arg(required = true, num_args = 1..)]
        positions: Vec<usize>,
    },
    /// Remove all expenses
    Clear,
    /// Write all expenses as CSV
    Export,
    /// Add expenses from a CSV file with columns name,type,amount
    Import { path: PathBuf },
}

/// Runs a single command against the store and writes its output to the provided writer.
///
/// # Errors
/// Returns an error if:
/// * The amount of an added or imported expense is negative or out of range
/// * The import file cannot be read or contains a malformed row
/// * Writing to the output fails
pub fn run<S, W>(
    command: Command,
    store: &mut ExpenseStore<S>,
    config: &Config,
    mut writer: W,
) -> Result<(), Error>
where
    S: KeyValueStore,
    W: Write,
{
    match command {
        Command::List => {
            if store.is_empty() {
                writeln!(writer, "No expenses.")?;
                return Ok(());
            }
            for (position, record) in store.records().iter().enumerate() {
                writeln!(
                    writer,
                    "{}\t{}\t{}\t{}",
                    position,
                    record.name,
                    record.category,
                    config.format_amount(record.amount)
                )?;
            }
            writeln!(writer, "Total\t{}", config.format_amount(store.total()))?;
        }
        Command::Add {
            name,
            category,
            amount,
        } => {
            let record = ExpenseRecord::new(name, category, to_minor_units(amount)?);
            let record = store.add(record)?;
            writeln!(writer, "{}", record.id)?;
        }
        Command::Remove { positions } => {
            let removed = store.remove_at(positions);
            writeln!(writer, "Removed {}", removed.len())?;
        }
        Command::Clear => {
            let removed = store.clear();
            writeln!(writer, "Removed {}", removed)?;
        }
        Command::Export => {
            write_csv(writer, store.records().iter().map(ExpenseRow::from))?;
        }
        Command::Import { path } => {
            let file = File::open(&path)?;
            let mut imported = 0;
            for row in read_csv::<ImportRow, _>(file) {
                // A bad row stops the import; earlier rows are already saved
                store.add(row?.into_record()?)?;
                imported += 1;
            }
            info!(path = %path.display(), imported, "imported expenses");
            writeln!(writer, "Imported {}", imported)?;
        }
    }
    Ok(())
}
