//! Campus CRUD: role-gated REST endpoints over dining commons menu items, recommendation
//! requests, help requests, student organizations and menu item reviews.

pub mod auth;
pub mod case;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod records;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use auth::{authorize, Caller, Capability, IdentityProvider, Role, StaticTokens};
pub use config::Settings;
pub use error::{AppError, ConfigError};
pub use migration::apply_migrations;
pub use records::{
    HelpRequest, MenuItemReview, RecommendationRequest, Record, RecordId, UCSBDiningCommonsMenuItem,
    UCSBOrganization,
};
pub use response::{generic_message, success_many, success_one, MessageBody};
pub use routes::{app, common_routes, record_routes};
pub use service::{CrudService, RequestValidator};
pub use state::{AppState, HasStore};
pub use store::{ensure_database_exists, MemoryStore, PgStore, RecordStore};
