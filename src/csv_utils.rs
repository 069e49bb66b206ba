//! CSV serialization and deserialization utilities.
//!
//! Provides generic functions for reading and writing CSV data, used by the
//! import and export commands.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::{Read, Write};

/// Creates an iterator that reads CSV records from a reader.
/// Each record is deserialized into type T.
pub fn read_csv<T, R>(reader: R) -> impl Iterator<Item = csv::Result<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .into_deserialize()
}

/// Writes an iterator of records to a CSV writer.
/// Each record must implement Serialize.
pub fn write_csv<T, W>(writer: W, records: impl Iterator<Item = T>) -> csv::Result<()>
where
    T: Serialize,
    W: Write,
{
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}
