//! An in-process table source
//!
//! [`MemoryTable`] serves the same interface as the hosted store from a plain `Vec`:
//! it assigns ids, answers filtered counts and range reads, and can be scripted to
//! fail through a shared [`MockBehaviour`]. Integration tests and demos use it to
//! stand in for the remote service.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::{StoreError, StoreResult};
use crate::mock_behaviour::MockBehaviour;
use crate::pager::SearchFilter;
use crate::traits::{TableRecord, TableSource};

/// A table held in memory, keyed like the hosted store would key it
#[derive(Debug)]
pub struct MemoryTable<R: TableRecord> {
    rows: Mutex<Vec<R>>,
    next_id: AtomicI64,
    mock_behaviour: Option<Arc<Mutex<MockBehaviour>>>,
}

impl<R: TableRecord> MemoryTable<R> {
    /// An empty table that will assign ids starting at 1
    pub fn new() -> Self {
        Self::new_with_rows(Vec::new(), 1)
    }

    /// A table that already holds `rows`; `next_id` must be beyond every seeded id
    pub fn new_with_rows(rows: Vec<R>, next_id: i64) -> Self {
        Self {
            rows: Mutex::new(rows),
            next_id: AtomicI64::new(next_id),
            mock_behaviour: None,
        }
    }

    /// Hook a shared behaviour script into this table.
    ///
    /// Keep a clone of the `Arc` on the test side to reprogram failures while the
    /// table is owned by the component under test.
    pub fn set_mock_behaviour(&mut self, behaviour: Option<Arc<Mutex<MockBehaviour>>>) {
        self.mock_behaviour = behaviour;
    }

    /// A snapshot of every row, in store order
    pub fn all_rows(&self) -> Vec<R> {
        self.rows.lock().unwrap().clone()
    }

    /// How many rows the table holds, unfiltered
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn matching(rows: &[R], filter: Option<&SearchFilter>) -> Vec<R> {
        rows.iter()
            .filter(|row| filter.map(|f| f.matches(*row)).unwrap_or(true))
            .cloned()
            .collect()
    }
}

impl<R: TableRecord> Default for MemoryTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R> TableSource<R> for MemoryTable<R>
where
    R: TableRecord,
    R::Id: From<i64>,
{
    async fn count_matching(&self, filter: Option<&SearchFilter>) -> StoreResult<usize> {
        if let Some(behaviour) = &self.mock_behaviour {
            behaviour.lock().unwrap().can_count_matching()?;
        }

        let rows = self.rows.lock().unwrap();
        Ok(Self::matching(&rows, filter).len())
    }

    async fn read_range(
        &self,
        filter: Option<&SearchFilter>,
        start: usize,
        end: usize,
    ) -> StoreResult<Vec<R>> {
        if let Some(behaviour) = &self.mock_behaviour {
            behaviour.lock().unwrap().can_read_range()?;
        }

        let rows = self.rows.lock().unwrap();
        Ok(Self::matching(&rows, filter)
            .into_iter()
            .skip(start)
            .take(end.saturating_sub(start) + 1)
            .collect())
    }

    async fn insert(&self, draft: &R::Draft) -> StoreResult<R> {
        if let Some(behaviour) = &self.mock_behaviour {
            behaviour.lock().unwrap().can_insert()?;
        }

        let id = R::Id::from(self.next_id.fetch_add(1, Ordering::SeqCst));
        let row = R::from_draft(id, draft);
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: &R::Id, draft: &R::Draft) -> StoreResult<R> {
        if let Some(behaviour) = &self.mock_behaviour {
            behaviour.lock().unwrap().can_update()?;
        }

        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|row| row.id() == id) {
            Some(row) => {
                *row = R::from_draft(id.clone(), draft);
                Ok(row.clone())
            }
            None => Err(StoreError::NotFound),
        }
    }

    async fn delete(&self, id: &R::Id) -> StoreResult<()> {
        if let Some(behaviour) = &self.mock_behaviour {
            behaviour.lock().unwrap().can_delete()?;
        }

        let mut rows = self.rows.lock().unwrap();
        if let Some(position) = rows.iter().position(|row| row.id() == id) {
            rows.remove(position);
        }
        Ok(())
    }
}
