//! In-process store. Rows are kept ordered by identifier; the lock is never held across an await.

use super::{missing_key, RecordStore};
use crate::error::AppError;
use crate::records::{Record, RecordId};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

struct Inner<R: Record> {
    rows: BTreeMap<R::Id, R>,
    last_id: i64,
}

pub struct MemoryStore<R: Record> {
    inner: RwLock<Inner<R>>,
}

impl<R: Record> Default for MemoryStore<R> {
    fn default() -> Self {
        MemoryStore {
            inner: RwLock::new(Inner {
                rows: BTreeMap::new(),
                last_id: 0,
            }),
        }
    }
}

impl<R: Record> MemoryStore<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, AppError> {
        Ok(self.read()?.rows.len())
    }

    pub fn is_empty(&self) -> Result<bool, AppError> {
        Ok(self.read()?.rows.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner<R>>, AppError> {
        self.inner
            .read()
            .map_err(|_| AppError::Internal(format!("{} store lock poisoned", R::TYPE_NAME)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner<R>>, AppError> {
        self.inner
            .write()
            .map_err(|_| AppError::Internal(format!("{} store lock poisoned", R::TYPE_NAME)))
    }
}

#[async_trait]
impl<R: Record> RecordStore<R> for MemoryStore<R> {
    async fn find_by_id(&self, id: &R::Id) -> Result<Option<R>, AppError> {
        Ok(self.read()?.rows.get(id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<R>, AppError> {
        Ok(self.read()?.rows.values().cloned().collect())
    }

    async fn save(&self, mut record: R) -> Result<R, AppError> {
        let mut inner = self.write()?;
        let id = match record.id().cloned() {
            Some(id) => id,
            None => {
                let next = inner.last_id + 1;
                let id = R::Id::from_sequence(next).ok_or_else(missing_key::<R>)?;
                inner.last_id = next;
                record.set_id(id.clone());
                id
            }
        };
        tracing::debug!(record_type = R::TYPE_NAME, id = %id, "memory save");
        inner.rows.insert(id, record.clone());
        Ok(record)
    }

    async fn delete(&self, id: &R::Id) -> Result<(), AppError> {
        tracing::debug!(record_type = R::TYPE_NAME, id = %id, "memory delete");
        self.write()?.rows.remove(id);
        Ok(())
    }
}
