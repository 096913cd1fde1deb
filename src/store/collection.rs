//! Id-keyed collection backing each entity list in the store.

use super::patch::Record;
use tracing::{debug, warn};

/// What `Collection::add` did with the record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddOutcome {
    /// The id was new; the record was appended
    Inserted,
    /// The id already existed; the old record was replaced in place
    Replaced,
}

/// An unordered set of records keyed by id.
///
/// Insertion order is kept only because records live in a `Vec`; callers that
/// display records sort them first. No two records ever share an id.
#[derive(Clone, Debug, PartialEq)]
pub struct Collection<T> {
    records: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: Record> Collection<T> {
    /// Creates an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Builds a collection from hydrated rows. Repeated ids collapse to the
    /// last value seen, at the position of the first.
    pub fn from_records(records: impl IntoIterator<Item = T>) -> Self {
        let mut collection = Self::new();
        for record in records {
            collection.add(record);
        }
        collection
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|record| record.id() == id)
    }

    /// Inserts `record`, replacing any record that already has its id.
    pub fn add(&mut self, record: T) -> AddOutcome {
        if let Some(index) = self.position(record.id()) {
            warn!("{} {} already present; replacing it", T::KIND, record.id());
            self.records[index] = record;
            AddOutcome::Replaced
        } else {
            debug!("{} {} added", T::KIND, record.id());
            self.records.push(record);
            AddOutcome::Inserted
        }
    }

    /// Applies `patch` to the record with `id`. Returns `false` (and changes
    /// nothing) when there is no such record.
    pub fn update(&mut self, id: &str, patch: T::Patch) -> bool {
        match self.records.iter_mut().find(|record| record.id() == id) {
            Some(record) => {
                record.apply(patch);
                debug!("{} {} updated", T::KIND, id);
                true
            }
            None => {
                debug!("{} {} not present; update ignored", T::KIND, id);
                false
            }
        }
    }

    /// Removes and returns the record with `id`, if any.
    pub fn remove(&mut self, id: &str) -> Option<T> {
        let index = self.position(id)?;
        debug!("{} {} removed", T::KIND, id);
        Some(self.records.remove(index))
    }

    /// Look up an entry by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// Whether an entry with `id` is held.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing is held
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    /// Read-only snapshot of every record.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.records
    }
}
