//! Record stores: the only owner of record instances. Handlers borrow records for one request.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, PgStore};

use crate::error::AppError;
use crate::records::Record;
use async_trait::async_trait;

#[async_trait]
pub trait RecordStore<R: Record>: Send + Sync {
    async fn find_by_id(&self, id: &R::Id) -> Result<Option<R>, AppError>;

    /// Every record in store-native order.
    async fn find_all(&self) -> Result<Vec<R>, AppError>;

    /// Insert or replace by identifier. A record without an identifier gets the next value of
    /// the store's sequence; natural-key records must carry their key.
    async fn save(&self, record: R) -> Result<R, AppError>;

    async fn delete(&self, id: &R::Id) -> Result<(), AppError>;
}

pub(crate) fn missing_key<R: Record>() -> AppError {
    AppError::Validation(format!("{} is required", R::ID_FIELD))
}
