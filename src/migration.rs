//! Create the schema and one table per record type. Idempotent (IF NOT EXISTS throughout).

use crate::error::AppError;
use crate::records::{
    HelpRequest, MenuItemReview, RecommendationRequest, Record, UCSBDiningCommonsMenuItem, UCSBOrganization,
};
use crate::sql::{create_table, quoted};
use sqlx::PgPool;

pub async fn apply_migrations(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(schema)))
        .execute(pool)
        .await?;

    for ddl in [
        create_table::<UCSBDiningCommonsMenuItem>(schema),
        create_table::<RecommendationRequest>(schema),
        create_table::<HelpRequest>(schema),
        create_table::<UCSBOrganization>(schema),
        create_table::<MenuItemReview>(schema),
    ] {
        tracing::debug!(sql = %ddl, "ddl");
        sqlx::query(&ddl).execute(pool).await?;
    }
    tracing::info!(
        schema,
        tables = ?[
            UCSBDiningCommonsMenuItem::TABLE,
            RecommendationRequest::TABLE,
            HelpRequest::TABLE,
            UCSBOrganization::TABLE,
            MenuItemReview::TABLE,
        ],
        "migrations applied"
    );
    Ok(())
}
