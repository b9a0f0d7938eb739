//! Shared helpers for the integration tests
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use front_desk::mock_behaviour::MockBehaviour;
use front_desk::traits::{TableRecord, TableSource};
use front_desk::{ClientDraft, ClientRecord, ListView, MemoryTable, SearchFilter, StoreResult};

pub fn client_draft(n: usize) -> ClientDraft {
    ClientDraft {
        name: format!("Client {}", n),
        company: format!("Company {}", n),
        email: format!("client{}@example.test", n),
        phone: "+56 9 8765 4321".to_string(),
        tax_id: format!("11.111.11{}-1", n % 10),
    }
}

pub fn client(id: i64) -> ClientRecord {
    ClientRecord::from_draft(id, &client_draft(id as usize))
}

/// Rows `Client 1` .. `Client {count}`, with matching ids
pub fn seeded_rows(count: usize) -> Vec<ClientRecord> {
    (1..=count).map(|n| client(n as i64)).collect()
}

pub fn seeded_table(count: usize) -> MemoryTable<ClientRecord> {
    MemoryTable::new_with_rows(seeded_rows(count), count as i64 + 1)
}

/// A seeded table plus a handle to script its failures from the test side
pub fn seeded_table_with_behaviour(
    count: usize,
) -> (MemoryTable<ClientRecord>, Arc<Mutex<MockBehaviour>>) {
    let mut table = seeded_table(count);
    let behaviour = Arc::new(Mutex::new(MockBehaviour::new()));
    table.set_mock_behaviour(Some(behaviour.clone()));
    (table, behaviour)
}

/// A view over a seeded table, not refreshed yet
pub fn seeded_view(count: usize) -> ListView<ClientRecord, MemoryTable<ClientRecord>> {
    ListView::new(seeded_table(count))
}

/// A table that remembers the arguments of every count and range read it serves.
///
/// The filter is recorded as its raw term, to keep assertions short.
pub struct RecordingTable {
    inner: MemoryTable<ClientRecord>,
    pub counts: Mutex<Vec<Option<String>>>,
    pub reads: Mutex<Vec<(usize, usize, Option<String>)>>,
}

impl RecordingTable {
    pub fn seeded(count: usize) -> Self {
        Self {
            inner: seeded_table(count),
            counts: Mutex::new(Vec::new()),
            reads: Mutex::new(Vec::new()),
        }
    }

    pub fn reads(&self) -> Vec<(usize, usize, Option<String>)> {
        self.reads.lock().unwrap().clone()
    }

    pub fn last_read(&self) -> (usize, usize, Option<String>) {
        self.reads().last().cloned().unwrap()
    }
}

#[async_trait]
impl TableSource<ClientRecord> for RecordingTable {
    async fn count_matching(&self, filter: Option<&SearchFilter>) -> StoreResult<usize> {
        self.counts
            .lock()
            .unwrap()
            .push(filter.map(|f| f.term().to_string()));
        self.inner.count_matching(filter).await
    }

    async fn read_range(
        &self,
        filter: Option<&SearchFilter>,
        start: usize,
        end: usize,
    ) -> StoreResult<Vec<ClientRecord>> {
        self.reads
            .lock()
            .unwrap()
            .push((start, end, filter.map(|f| f.term().to_string())));
        self.inner.read_range(filter, start, end).await
    }

    async fn insert(&self, draft: &ClientDraft) -> StoreResult<ClientRecord> {
        self.inner.insert(draft).await
    }

    async fn update(&self, id: &i64, draft: &ClientDraft) -> StoreResult<ClientRecord> {
        self.inner.update(id, draft).await
    }

    async fn delete(&self, id: &i64) -> StoreResult<()> {
        self.inner.delete(id).await
    }
}
