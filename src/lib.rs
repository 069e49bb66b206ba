pub mod config;
mod csv_utils;
mod dto;
mod error;
mod expenses;
mod runner;
pub mod stores;

pub use config::Config;
pub use dto::{ExpenseRecord, ExpenseRow, ImportRow};
pub use error::Error;
pub use expenses::ExpenseStore;
pub use runner::{run, Command};
pub use stores::{FileStore, KeyValueStore, MemoryStore};
