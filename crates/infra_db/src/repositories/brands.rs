//! Brand repository implementation

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

/// Database row for a brand
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BrandRow {
    pub brand_id: Uuid,
    pub name: String,
    pub default_notification: Option<String>,
}

/// Database row for a localized brand notice
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BrandNotificationRow {
    pub brand_id: Uuid,
    pub language: String,
    pub content: String,
}

/// Repository for brands and their notices
#[derive(Debug, Clone)]
pub struct BrandRepository {
    pool: PgPool,
}

impl BrandRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves all brands ordered by name
    pub async fn list(&self) -> Result<Vec<BrandRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, BrandRow>(
            "SELECT brand_id, name, default_notification FROM brands ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Retrieves the notices written in `language`
    pub async fn notifications_for_language(
        &self,
        language: &str,
    ) -> Result<Vec<BrandNotificationRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, BrandNotificationRow>(
            r#"
            SELECT brand_id, language, content
            FROM brand_notifications
            WHERE lower(language) = lower($1)
            "#,
        )
        .bind(language)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
