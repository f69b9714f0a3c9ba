//! Shared application state for all routes: one store per record type plus the identity provider.

use crate::auth::IdentityProvider;
use crate::config::Settings;
use crate::error::AppError;
use crate::migration::apply_migrations;
use crate::records::{
    HelpRequest, MenuItemReview, RecommendationRequest, Record, UCSBDiningCommonsMenuItem, UCSBOrganization,
};
use crate::store::{ensure_database_exists, MemoryStore, PgStore, RecordStore};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<dyn IdentityProvider>,
    pub menu_items: Arc<dyn RecordStore<UCSBDiningCommonsMenuItem>>,
    pub recommendation_requests: Arc<dyn RecordStore<RecommendationRequest>>,
    pub help_requests: Arc<dyn RecordStore<HelpRequest>>,
    pub organizations: Arc<dyn RecordStore<UCSBOrganization>>,
    pub menu_item_reviews: Arc<dyn RecordStore<MenuItemReview>>,
}

impl AppState {
    /// Postgres stores when `DATABASE_URL` is configured (creating the database and tables as
    /// needed), in-memory stores otherwise. Callers are resolved from `API_TOKENS`.
    pub async fn from_settings(settings: &Settings) -> Result<Self, AppError> {
        let identity: Arc<dyn IdentityProvider> = Arc::new(settings.api_tokens.clone());
        let Some(database_url) = settings.database_url.as_deref() else {
            tracing::info!("using in-memory stores");
            return Ok(Self::in_memory(identity));
        };
        ensure_database_exists(database_url).await?;
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .connect(database_url)
            .await?;
        apply_migrations(&pool, &settings.database_schema).await?;
        tracing::info!(schema = %settings.database_schema, "using postgres stores");
        Ok(Self::postgres(pool, &settings.database_schema, identity))
    }

    /// Every record type backed by a fresh in-process store.
    pub fn in_memory(identity: Arc<dyn IdentityProvider>) -> Self {
        AppState {
            identity,
            menu_items: Arc::new(MemoryStore::new()),
            recommendation_requests: Arc::new(MemoryStore::new()),
            help_requests: Arc::new(MemoryStore::new()),
            organizations: Arc::new(MemoryStore::new()),
            menu_item_reviews: Arc::new(MemoryStore::new()),
        }
    }

    /// Every record type backed by a table in `schema`. Run `apply_migrations` first.
    pub fn postgres(pool: PgPool, schema: &str, identity: Arc<dyn IdentityProvider>) -> Self {
        AppState {
            identity,
            menu_items: Arc::new(PgStore::new(pool.clone(), schema)),
            recommendation_requests: Arc::new(PgStore::new(pool.clone(), schema)),
            help_requests: Arc::new(PgStore::new(pool.clone(), schema)),
            organizations: Arc::new(PgStore::new(pool.clone(), schema)),
            menu_item_reviews: Arc::new(PgStore::new(pool, schema)),
        }
    }
}

/// Selects the store for one record type, so handlers can be written once for every type.
pub trait HasStore<R: Record> {
    fn store(&self) -> &dyn RecordStore<R>;
}

macro_rules! has_store {
    ($record:ty, $field:ident) => {
        impl HasStore<$record> for AppState {
            fn store(&self) -> &dyn RecordStore<$record> {
                self.$field.as_ref()
            }
        }
    };
}

has_store!(UCSBDiningCommonsMenuItem, menu_items);
has_store!(RecommendationRequest, recommendation_requests);
has_store!(HelpRequest, help_requests);
has_store!(UCSBOrganization, organizations);
has_store!(MenuItemReview, menu_item_reviews);
