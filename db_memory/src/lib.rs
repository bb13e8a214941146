// in-memory implementation of the store port
//
// The service treats persistence as an opaque document store addressed by
// collection and key. This adapter keeps the collections in process
// memory, which is all the command orchestrators and the test harness
// need; consistency across collections is their job, not ours.

mod race_results;
mod raceplans;
mod races;
mod start_entries;
mod startlists;
mod time_events;

use dashmap::DashMap;
use race_core::StorePort;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// One document collection. Rows remember their insertion sequence so
/// that unsorted reads come back in natural insertion order.
pub(crate) struct Collection<T> {
    rows: DashMap<Uuid, Row<T>>,
    seq: AtomicU64,
}

struct Row<T> {
    seq: u64,
    doc: T,
}

impl<T: Clone> Collection<T> {
    fn new() -> Self {
        Collection {
            rows: DashMap::new(),
            seq: AtomicU64::new(0),
        }
    }

    pub(crate) fn insert(&self, id: Uuid, doc: T) {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        self.rows.insert(id, Row { seq, doc });
    }

    pub(crate) fn get(&self, id: Uuid) -> Option<T> {
        self.rows.get(&id).map(|row| row.doc.clone())
    }

    /// no-op returning false on an unknown id
    pub(crate) fn replace(&self, id: Uuid, doc: T) -> bool {
        match self.rows.get_mut(&id) {
            Some(mut row) => {
                row.doc = doc;
                true
            }
            None => false,
        }
    }

    pub(crate) fn delete(&self, id: Uuid) -> bool {
        self.rows.remove(&id).is_some()
    }

    pub(crate) fn find_where(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        let mut hits: Vec<(u64, T)> = self
            .rows
            .iter()
            .filter(|row| predicate(&row.doc))
            .map(|row| (row.seq, row.doc.clone()))
            .collect();
        hits.sort_by_key(|(seq, _)| *seq);
        hits.into_iter().map(|(_, doc)| doc).collect()
    }

    pub(crate) fn all(&self) -> Vec<T> {
        self.find_where(|_| true)
    }
}

impl<T: Clone> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The six collections of the race service.
#[derive(Default)]
pub struct MemStore {
    pub(crate) raceplans: Collection<race_core::Raceplan>,
    pub(crate) races: Collection<race_core::Race>,
    pub(crate) startlists: Collection<race_core::Startlist>,
    pub(crate) start_entries: Collection<race_core::StartEntry>,
    pub(crate) time_events: Collection<race_core::TimeEvent>,
    pub(crate) race_results: Collection<race_core::RaceResult>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorePort for MemStore {}
