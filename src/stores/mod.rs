//! Key-value backends for the expense store. Provides:
//! - A file-backed store, one JSON file per key ([`FileStore`])
//! - An in-memory store for tests and ephemeral sessions ([`MemoryStore`])
//!
//! Values are opaque byte blobs; encoding is the caller's concern.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::Error;

pub trait KeyValueStore {
    /// Returns the blob stored under `key`, or `None` if nothing is stored.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Error>;

    /// Overwrites the blob stored under `key`.
    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), Error>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), Error>;
}
