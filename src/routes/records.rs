//! Record CRUD routes. Every record type gets the same five endpoints under `/api/<path>`:
//! `GET /all`, `POST /post`, and `GET`/`PUT`/`DELETE` on the bare prefix addressed by query id.

use crate::handlers::{create, current_user, delete as delete_handler, list, read, update};
use crate::records::{
    HelpRequest, MenuItemReview, RecommendationRequest, Record, UCSBDiningCommonsMenuItem, UCSBOrganization,
};
use crate::state::{AppState, HasStore};
use axum::{routing::get, routing::post, Router};

fn resource_routes<R: Record>() -> Router<AppState>
where
    AppState: HasStore<R>,
{
    let base = format!("/api/{}", R::PATH);
    Router::new()
        .route(&format!("{}/all", base), get(list::<R>))
        .route(&format!("{}/post", base), post(create::<R>))
        .route(&base, get(read::<R>).put(update::<R>).delete(delete_handler::<R>))
}

pub fn record_routes(state: AppState) -> Router {
    Router::new()
        .merge(resource_routes::<UCSBDiningCommonsMenuItem>())
        .merge(resource_routes::<RecommendationRequest>())
        .merge(resource_routes::<HelpRequest>())
        .merge(resource_routes::<UCSBOrganization>())
        .merge(resource_routes::<MenuItemReview>())
        .route("/api/currentUser", get(current_user))
        .with_state(state)
}
