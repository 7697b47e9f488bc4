//! In-process store used for dry runs and tests.
//!
//! The table is a vector behind a mutex; every statement takes the lock once,
//! so a statement sees and mutates a consistent table just like a single
//! autocommitted statement would on the server.

use crate::error::WorkloadError;
use crate::store::{ClimateStore, StoreConnector, TABLE_NAME};
use async_trait::async_trait;
use climate_generator::{ClimateRecord, Predicate, UpdateRule};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Shared in-memory `ClimateData` table.
#[derive(Debug, Clone, Default)]
pub struct MemoryTable {
    rows: Arc<Mutex<Vec<ClimateRecord>>>,
    capacity: Option<usize>,
}

impl MemoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(rows: Vec<ClimateRecord>) -> Self {
        Self {
            rows: Arc::new(Mutex::new(rows)),
            capacity: None,
        }
    }

    /// Reject inserts once the table holds `capacity` rows.
    pub fn with_capacity_limit(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Copy of the current rows.
    pub fn snapshot(&self) -> Vec<ClimateRecord> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ClimateRecord>> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Hands out stores that all share one [`MemoryTable`].
#[derive(Debug, Clone, Default)]
pub struct MemoryConnector {
    table: MemoryTable,
}

impl MemoryConnector {
    pub fn new(table: MemoryTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &MemoryTable {
        &self.table
    }
}

#[async_trait]
impl StoreConnector for MemoryConnector {
    type Store = MemoryStore;

    async fn connect(&self) -> Result<MemoryStore, WorkloadError> {
        Ok(MemoryStore {
            table: self.table.clone(),
        })
    }
}

pub struct MemoryStore {
    table: MemoryTable,
}

#[async_trait]
impl ClimateStore for MemoryStore {
    async fn ensure_table(&mut self) -> Result<(), WorkloadError> {
        Ok(())
    }

    async fn insert(&mut self, record: &ClimateRecord) -> Result<(), WorkloadError> {
        let mut rows = self.table.lock();
        if let Some(capacity) = self.table.capacity {
            if rows.len() >= capacity {
                return Err(WorkloadError::TableFull {
                    table: TABLE_NAME,
                    capacity,
                });
            }
        }
        rows.push(record.clone());
        Ok(())
    }

    async fn select_where(
        &mut self,
        predicate: &Predicate,
        limit: usize,
    ) -> Result<usize, WorkloadError> {
        let rows = self.table.lock();
        Ok(rows.iter().filter(|r| predicate.matches(r)).take(limit).count())
    }

    async fn update_where(&mut self, rule: &UpdateRule) -> Result<u64, WorkloadError> {
        let mut rows = self.table.lock();
        let mut affected = 0;
        for row in rows.iter_mut() {
            if rule.apply(row) {
                affected += 1;
            }
        }
        Ok(affected)
    }

    async fn close(self) -> Result<(), WorkloadError> {
        Ok(())
    }
}
