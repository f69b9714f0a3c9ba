//! Extract the authenticated caller from the `Authorization: Bearer <token>` header.

use crate::auth::Caller;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

pub const AUTHORIZATION_SCHEME: &str = "Bearer";

/// Caller resolved by the state's identity provider. `None` when the header is missing,
/// malformed, or names an unknown token; the guard turns that into `Unauthenticated`.
#[derive(Clone, Debug)]
pub struct CurrentCaller(pub Option<Caller>);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentCaller
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().strip_prefix(AUTHORIZATION_SCHEME))
            .map(str::trim)
            .filter(|t| !t.is_empty());
        let Some(token) = token else {
            return Ok(CurrentCaller(None));
        };
        let state = AppState::from_ref(state);
        let caller = state.identity.resolve(token);
        if caller.is_none() {
            tracing::warn!("unrecognised bearer token");
        }
        Ok(CurrentCaller(caller))
    }
}
