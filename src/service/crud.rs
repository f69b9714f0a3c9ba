//! Generic authorized CRUD over any record type and store.
//!
//! Store access goes through [`Reader`] and [`Writer`], which only [`CrudService::reader`] and
//! [`CrudService::writer`] hand out after the caller's capability is checked. Id-addressed
//! operations resolve the record through [`CrudService::lookup`], the single source of the
//! not-found error.

use crate::auth::{authorize, Caller, Capability};
use crate::error::AppError;
use crate::records::Record;
use crate::store::RecordStore;
use std::marker::PhantomData;

pub struct CrudService;

impl CrudService {
    /// Check the `user` capability and hand out read access to `store`.
    pub fn reader<'a, R: Record, S: RecordStore<R> + ?Sized>(
        store: &'a S,
        caller: Option<&Caller>,
    ) -> Result<Reader<'a, R, S>, AppError> {
        authorize(caller, Capability::User)?;
        Ok(Reader {
            store,
            _record: PhantomData,
        })
    }

    /// Check the `admin` capability and hand out write access to `store`.
    pub fn writer<'a, R: Record, S: RecordStore<R> + ?Sized>(
        store: &'a S,
        caller: Option<&Caller>,
    ) -> Result<Writer<'a, R, S>, AppError> {
        authorize(caller, Capability::Admin)?;
        Ok(Writer {
            store,
            _record: PhantomData,
        })
    }

    /// Resolve an identifier or fail with `NotFound(type, id)`.
    pub async fn lookup<R: Record, S: RecordStore<R> + ?Sized>(store: &S, id: &R::Id) -> Result<R, AppError> {
        store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(R::TYPE_NAME, id))
    }
}

/// Read access granted to a caller holding the `user` capability.
pub struct Reader<'a, R, S: ?Sized> {
    store: &'a S,
    _record: PhantomData<fn() -> R>,
}

impl<'a, R: Record, S: RecordStore<R> + ?Sized> Reader<'a, R, S> {
    /// Every record, in store order.
    pub async fn list(&self) -> Result<Vec<R>, AppError> {
        self.store.find_all().await
    }

    pub async fn get(&self, id: &R::Id) -> Result<R, AppError> {
        CrudService::lookup(self.store, id).await
    }
}

/// Write access granted to a caller holding the `admin` capability.
pub struct Writer<'a, R, S: ?Sized> {
    store: &'a S,
    _record: PhantomData<fn() -> R>,
}

impl<'a, R: Record, S: RecordStore<R> + ?Sized> Writer<'a, R, S> {
    /// Persist a new record. Surrogate ids are assigned by the store; a natural key that already
    /// exists is overwritten.
    pub async fn create(&self, record: R) -> Result<R, AppError> {
        let saved = self.store.save(record).await?;
        tracing::info!(
            record_type = R::TYPE_NAME,
            id = %display_id(&saved),
            "created"
        );
        Ok(saved)
    }

    /// Merge `incoming` onto the stored record (per the type's update policy) and persist it.
    /// The identifier always comes from `id`, never from the payload.
    pub async fn update(&self, id: &R::Id, incoming: R) -> Result<R, AppError> {
        let mut record = CrudService::lookup(self.store, id).await?;
        record.apply_update(incoming);
        record.set_id(id.clone());
        let saved = self.store.save(record).await?;
        tracing::info!(record_type = R::TYPE_NAME, id = %id, "updated");
        Ok(saved)
    }

    /// Remove the record and return the confirmation message.
    pub async fn delete(&self, id: &R::Id) -> Result<String, AppError> {
        CrudService::lookup(self.store, id).await?;
        self.store.delete(id).await?;
        tracing::info!(record_type = R::TYPE_NAME, id = %id, "deleted");
        Ok(format!("{} with id {} deleted", R::TYPE_NAME, id))
    }
}

fn display_id<R: Record>(record: &R) -> String {
    record.id().map(|id| id.to_string()).unwrap_or_default()
}
