//! The expense record store.
//!
//! Holds the ordered list of records in memory and mirrors it to a single key
//! of a [`KeyValueStore`]. The list is read once on open, then every mutation
//! rewrites the whole list before returning. Storage failures are logged and
//! otherwise ignored: a broken blob loads as an empty list, a failed write
//! leaves the in-memory list ahead of storage until the next successful one.

use std::collections::{BTreeSet, HashSet};

use tracing::{debug, info, warn};

use crate::stores::KeyValueStore;
use crate::{Error, ExpenseRecord};

type Observer = Box<dyn FnMut(&[ExpenseRecord])>;

pub struct ExpenseStore<S: KeyValueStore> {
    items: Vec<ExpenseRecord>,
    backend: S,
    key: String,
    observers: Vec<Observer>,
}

impl<S: KeyValueStore> ExpenseStore<S> {
    /// Opens the store, loading whatever is saved under `key`.
    /// Never fails; missing or undecodable data yields an empty store.
    pub fn open(backend: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let items = load(&backend, &key);
        Self {
            items,
            backend,
            key,
            observers: Vec::new(),
        }
    }

    /// Discards the in-memory list and loads it again from storage.
    pub fn reload(&mut self) {
        self.items = load(&self.backend, &self.key);
    }

    pub fn records(&self) -> &[ExpenseRecord] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&ExpenseRecord> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all amounts in minor units, saturating at the `i64` bounds.
    pub fn total(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, record| acc.saturating_add(record.amount))
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Registers a callback run after every mutation, once the new list has
    /// been persisted.
    pub fn subscribe(&mut self, observer: impl FnMut(&[ExpenseRecord]) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Appends a record to the end of the list.
    /// Returns an error if a record with the same id is already stored.
    pub fn add(&mut self, record: ExpenseRecord) -> Result<&ExpenseRecord, Error> {
        if self.items.iter().any(|existing| existing.id == record.id) {
            return Err(Error::DuplicateRecord(record.id));
        }
        let index = self.items.len();
        self.mutate(|items| items.push(record));
        Ok(&self.items[index])
    }

    /// Removes the records at `positions`, all taken against the list as it is
    /// before the call. Out-of-range positions are skipped.
    /// Returns the removed records in list order.
    pub fn remove_at<I>(&mut self, positions: I) -> Vec<ExpenseRecord>
    where
        I: IntoIterator<Item = usize>,
    {
        let len = self.items.len();
        let (positions, out_of_range): (BTreeSet<usize>, BTreeSet<usize>) =
            positions.into_iter().partition(|&pos| pos < len);
        if !out_of_range.is_empty() {
            warn!(?out_of_range, len, "ignoring out-of-range positions");
        }

        self.mutate(|items| {
            let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(items)
                .into_iter()
                .enumerate()
                .partition(|(index, _)| positions.contains(index));
            *items = kept.into_iter().map(|(_, record)| record).collect();
            removed.into_iter().map(|(_, record)| record).collect()
        })
    }

    /// Removes every record. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        self.mutate(|items| {
            let count = items.len();
            items.clear();
            count
        })
    }

    /// Single entry point for every change to `items`: apply, persist, notify.
    fn mutate<R>(&mut self, change: impl FnOnce(&mut Vec<ExpenseRecord>) -> R) -> R {
        let result = change(&mut self.items);
        self.save();
        for observer in self.observers.iter_mut() {
            observer(&self.items);
        }
        result
    }

    fn save(&mut self) {
        match self.persist() {
            Ok(()) => debug!(key = %self.key, count = self.items.len(), "saved expenses"),
            Err(e) => warn!(key = %self.key, error = %e, "failed to save expenses"),
        }
    }

    fn persist(&mut self) -> Result<(), Error> {
        let blob = serde_json::to_vec(&self.items)?;
        self.backend.set(&self.key, &blob)
    }
}

fn load<S: KeyValueStore>(backend: &S, key: &str) -> Vec<ExpenseRecord> {
    let blob = match backend.get(key) {
        Ok(Some(blob)) => blob,
        Ok(None) => {
            debug!(key, "no saved expenses, starting empty");
            return Vec::new();
        }
        Err(e) => {
            warn!(key, error = %e, "failed to read saved expenses, starting empty");
            return Vec::new();
        }
    };

    let mut items: Vec<ExpenseRecord> = match serde_json::from_slice(&blob) {
        Ok(items) => items,
        Err(e) => {
            warn!(key, error = %e, "saved expenses are not decodable, starting empty");
            return Vec::new();
        }
    };

    // Ids must stay unique; keep the first occurrence
    let mut seen = HashSet::new();
    let decoded = items.len();
    items.retain(|record| seen.insert(record.id));
    if items.len() != decoded {
        warn!(key, dropped = decoded - items.len(), "dropped records with duplicate ids");
    }

    info!(key, count = items.len(), "loaded expenses");
    items
}
