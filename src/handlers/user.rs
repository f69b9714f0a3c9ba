//! Who is calling: the authenticated caller's identity and roles.

use crate::auth::{authorize, Capability, Role};
use crate::error::AppError;
use crate::extractors::CurrentCaller;
use axum::Json;
use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct CurrentUserBody {
    pub email: String,
    pub roles: Vec<Role>,
    pub admin: bool,
}

pub async fn current_user(CurrentCaller(caller): CurrentCaller) -> Result<Json<CurrentUserBody>, AppError> {
    authorize(caller.as_ref(), Capability::User)?;
    let caller = caller.ok_or(AppError::Unauthenticated)?;
    Ok(Json(CurrentUserBody {
        admin: caller.is_admin(),
        roles: caller.roles.into_iter().collect(),
        email: caller.email,
    }))
}
