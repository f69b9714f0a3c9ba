//! Record CRUD handlers, written once and instantiated per record type.
//!
//! Each handler checks the caller's capability before it parses any input, so an
//! unauthenticated or unprivileged request never sees a validation error or touches a store.

use crate::error::AppError;
use crate::extractors::CurrentCaller;
use crate::records::Record;
use crate::response::{generic_message, success_many, success_one};
use crate::service::{CrudService, RequestValidator};
use crate::state::{AppState, HasStore};
use axum::{
    body::Bytes,
    extract::{Query, State},
    response::IntoResponse,
};
use serde_json::Value;
use std::collections::HashMap;

/// Identifier from the query string (`?id=7`, `?orgCode=ZPR`).
fn parse_id<R: Record>(params: &HashMap<String, String>) -> Result<R::Id, AppError> {
    let raw = params
        .get(R::ID_FIELD)
        .ok_or_else(|| AppError::Validation(format!("{} is required", R::ID_FIELD)))?;
    raw.trim()
        .parse::<R::Id>()
        .map_err(|_| AppError::BadRequest(format!("invalid {}: {}", R::ID_FIELD, raw)))
}

fn parse_body(body: &Bytes) -> Result<Value, AppError> {
    serde_json::from_slice(body).map_err(|e| AppError::BadRequest(format!("invalid JSON body: {}", e)))
}

pub async fn list<R: Record>(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
) -> Result<impl IntoResponse, AppError>
where
    AppState: HasStore<R>,
{
    let reader = CrudService::reader::<R, _>(HasStore::<R>::store(&state), caller.as_ref())?;
    let rows = reader.list().await?;
    Ok(success_many(rows))
}

pub async fn read<R: Record>(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError>
where
    AppState: HasStore<R>,
{
    let reader = CrudService::reader::<R, _>(HasStore::<R>::store(&state), caller.as_ref())?;
    let id = parse_id::<R>(&params)?;
    let row = reader.get(&id).await?;
    Ok(success_one(row))
}

/// Fields arrive as query parameters, e.g. `POST /api/ucsbdiningcommonsmenuitem/post?diningCommonsCode=DLG&...`.
pub async fn create<R: Record>(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError>
where
    AppState: HasStore<R>,
{
    let writer = CrudService::writer::<R, _>(HasStore::<R>::store(&state), caller.as_ref())?;
    let record = RequestValidator::from_query::<R>(&params)?;
    let row = writer.create(record).await?;
    Ok(success_one(row))
}

pub async fn update<R: Record>(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Query(params): Query<HashMap<String, String>>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError>
where
    AppState: HasStore<R>,
{
    let writer = CrudService::writer::<R, _>(HasStore::<R>::store(&state), caller.as_ref())?;
    let id = parse_id::<R>(&params)?;
    let incoming = RequestValidator::from_body::<R>(parse_body(&body)?)?;
    let row = writer.update(&id, incoming).await?;
    Ok(success_one(row))
}

pub async fn delete<R: Record>(
    State(state): State<AppState>,
    CurrentCaller(caller): CurrentCaller,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError>
where
    AppState: HasStore<R>,
{
    let writer = CrudService::writer::<R, _>(HasStore::<R>::store(&state), caller.as_ref())?;
    let id = parse_id::<R>(&params)?;
    let message = writer.delete(&id).await?;
    Ok(generic_message(message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{UCSBDiningCommonsMenuItem, UCSBOrganization};

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn parses_ids_by_record_key_type() {
        assert_eq!(parse_id::<UCSBDiningCommonsMenuItem>(&params(&[("id", "15")])).unwrap(), 15);
        assert_eq!(
            parse_id::<UCSBOrganization>(&params(&[("orgCode", "FIR")])).unwrap(),
            "FIR"
        );
    }

    #[test]
    fn rejects_missing_or_malformed_ids() {
        let err = parse_id::<UCSBDiningCommonsMenuItem>(&params(&[])).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        let err = parse_id::<UCSBDiningCommonsMenuItem>(&params(&[("id", "abc")])).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
