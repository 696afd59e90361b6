//! Claims repository implementation
//!
//! SQL access to the `warranty_claims` table.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::error::DatabaseError;

const CLAIM_COLUMNS: &str = r#"
    claim_id, order_number, email, name, street, postal_code, city,
    phone_number, brand, problem_description, status, submission_date
"#;

/// Claim status as stored in PostgreSQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "claim_status", rename_all = "snake_case")]
pub enum ClaimStatus {
    Pending,
    InProgress,
    Resolved,
    Rejected,
}

/// Database row for a warranty claim
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClaimRow {
    pub claim_id: Uuid,
    pub order_number: String,
    pub email: String,
    pub name: String,
    pub street: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub phone_number: String,
    pub brand: String,
    pub problem_description: String,
    pub status: ClaimStatus,
    pub submission_date: DateTime<Utc>,
}

/// Row filter; every populated field must hold
#[derive(Debug, Clone, Default)]
pub struct ClaimRowFilter {
    pub status: Option<ClaimStatus>,
    pub order_number_contains: Option<String>,
    pub order_number: Option<String>,
    pub email: Option<String>,
}

/// Repository for warranty claim rows
#[derive(Debug, Clone)]
pub struct ClaimsRepository {
    pool: PgPool,
}

impl ClaimsRepository {
    /// Creates a new ClaimsRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Retrieves a claim by its identifier
    ///
    /// # Returns
    ///
    /// The claim record or NotFound error
    pub async fn get_by_id(&self, claim_id: Uuid) -> Result<ClaimRow, DatabaseError> {
        let sql = format!("SELECT {} FROM warranty_claims WHERE claim_id = $1", CLAIM_COLUMNS);

        sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(claim_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Claim", claim_id))
    }

    /// Retrieves claims matching the filter, oldest submission first
    pub async fn find(&self, filter: &ClaimRowFilter) -> Result<Vec<ClaimRow>, DatabaseError> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new("SELECT ");
        query.push(CLAIM_COLUMNS);
        query.push(" FROM warranty_claims WHERE TRUE");

        if let Some(status) = filter.status {
            query.push(" AND status = ").push_bind(status);
        }
        if let Some(ref needle) = filter.order_number_contains {
            // strpos keeps % and _ in the search text literal
            query
                .push(" AND strpos(lower(order_number), lower(")
                .push_bind(needle.clone())
                .push(")) > 0");
        }
        if let Some(ref order_number) = filter.order_number {
            query.push(" AND order_number = ").push_bind(order_number.clone());
        }
        if let Some(ref email) = filter.email {
            query
                .push(" AND lower(btrim(email)) = lower(btrim(")
                .push_bind(email.clone())
                .push("))");
        }
        query.push(" ORDER BY submission_date, claim_id");

        let rows = query
            .build_query_as::<ClaimRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Updates a claim's status in a single statement
    ///
    /// # Returns
    ///
    /// The updated claim record or NotFound error
    pub async fn update_status(
        &self,
        claim_id: Uuid,
        status: ClaimStatus,
    ) -> Result<ClaimRow, DatabaseError> {
        let sql = format!(
            "UPDATE warranty_claims SET status = $2, updated_at = $3 WHERE claim_id = $1 RETURNING {}",
            CLAIM_COLUMNS
        );

        sqlx::query_as::<_, ClaimRow>(&sql)
            .bind(claim_id)
            .bind(status)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Claim", claim_id))
    }
}
