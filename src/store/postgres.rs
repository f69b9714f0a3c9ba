//! PostgreSQL-backed store: one table per record type, columns named in snake_case.

use super::{missing_key, RecordStore};
use crate::case::object_keys_to_camel_case;
use crate::error::AppError;
use crate::records::{Record, RecordId};
use crate::sql::{bind_text, delete, select_all, select_by_id, upsert, QueryBuf};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{ConnectOptions, PgPool, Postgres};
use std::marker::PhantomData;
use std::str::FromStr;

pub struct PgStore<R: Record> {
    pool: PgPool,
    schema: String,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> Clone for PgStore<R> {
    fn clone(&self) -> Self {
        PgStore {
            pool: self.pool.clone(),
            schema: self.schema.clone(),
            _record: PhantomData,
        }
    }
}

impl<R: Record> PgStore<R> {
    pub fn new(pool: PgPool, schema: impl Into<String>) -> Self {
        PgStore {
            pool,
            schema: schema.into(),
            _record: PhantomData,
        }
    }

    async fn fetch_optional(&self, q: &QueryBuf) -> Result<Option<R>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind_all(q).fetch_optional(&self.pool).await?;
        row.as_ref().map(row_to_record::<R>).transpose()
    }

    async fn fetch_all(&self, q: &QueryBuf) -> Result<Vec<R>, AppError> {
        tracing::debug!(sql = %q.sql, "query");
        let rows = bind_all(q).fetch_all(&self.pool).await?;
        rows.iter().map(row_to_record::<R>).collect()
    }
}

#[async_trait]
impl<R: Record> RecordStore<R> for PgStore<R> {
    async fn find_by_id(&self, id: &R::Id) -> Result<Option<R>, AppError> {
        let q = select_by_id::<R>(&self.schema, id).map_err(|e| AppError::Internal(e.to_string()))?;
        self.fetch_optional(&q).await
    }

    async fn find_all(&self) -> Result<Vec<R>, AppError> {
        self.fetch_all(&select_all::<R>(&self.schema)).await
    }

    async fn save(&self, record: R) -> Result<R, AppError> {
        if record.id().is_none() && R::Id::is_natural() {
            return Err(missing_key::<R>());
        }
        let row = match serde_json::to_value(&record).map_err(|e| AppError::Internal(e.to_string()))? {
            Value::Object(map) => map,
            _ => return Err(AppError::Internal(format!("{} did not serialize to an object", R::TYPE_NAME))),
        };
        let q = upsert::<R>(&self.schema, &row);
        self.fetch_optional(&q)
            .await?
            .ok_or_else(|| AppError::Internal(format!("{} upsert returned no row", R::TYPE_NAME)))
    }

    async fn delete(&self, id: &R::Id) -> Result<(), AppError> {
        let q = delete::<R>(&self.schema, id).map_err(|e| AppError::Internal(e.to_string()))?;
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        bind_all(&q).execute(&self.pool).await?;
        Ok(())
    }
}

fn bind_all(q: &QueryBuf) -> Query<'_, Postgres, PgArguments> {
    let mut query = sqlx::query(&q.sql);
    for p in &q.params {
        query = query.bind(bind_text(p));
    }
    query
}

fn row_to_record<R: Record>(row: &PgRow) -> Result<R, AppError> {
    serde_json::from_value(row_to_json(row)).map_err(|e| {
        AppError::Internal(format!("{} row does not match record: {}", R::TYPE_NAME, e))
    })
}

fn row_to_json(row: &PgRow) -> Value {
    use sqlx::Column;
    use sqlx::Row;
    let mut map = serde_json::Map::new();
    for col in row.columns() {
        let name = col.name();
        map.insert(name.to_string(), cell_to_value(row, name));
    }
    object_keys_to_camel_case(&mut map);
    Value::Object(map)
}

fn cell_to_value(row: &PgRow, name: &str) -> Value {
    use sqlx::Row;
    if let Ok(Some(n)) = row.try_get::<Option<i32>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(b)) = row.try_get::<Option<bool>, _>(name) {
        return Value::Bool(b);
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::NaiveDateTime>, _>(name) {
        return serde_json::to_value(d).unwrap_or(Value::Null);
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return Value::String(s);
    }
    Value::Null
}

/// Create the database named in `database_url` if it does not exist, connecting through the
/// `postgres` maintenance database.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", crate::sql::quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| AppError::BadRequest("DATABASE_URL: no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres", base), db_name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_database_name_from_url() {
        let (admin, name) = parse_db_name_from_url("postgres://app:pw@localhost:5432/campus?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://app:pw@localhost:5432/postgres");
        assert_eq!(name, "campus");
    }
}
