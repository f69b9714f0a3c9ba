//! Router builders.

mod common;
mod records;
pub use common::common_routes;
pub use records::record_routes;

use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Full application: common routes plus record routes, with a body size limit and request tracing.
pub fn app(state: AppState, request_body_limit: usize) -> Router {
    Router::new()
        .merge(common_routes())
        .merge(record_routes(state))
        .layer(RequestBodyLimitLayer::new(request_body_limit))
        .layer(TraceLayer::new_for_http())
}
