use std::fmt;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::LeadRecord;

#[derive(Debug)]
pub enum StorageError {
    Database(sqlx::Error),
    /// Store could not be reached or refused the write.
    Unavailable(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Database(e) => write!(f, "Database error: {}", e),
            StorageError::Unavailable(msg) => write!(f, "Store unavailable: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        StorageError::Database(err)
    }
}

/// Append-only record of submitted leads.
#[async_trait]
pub trait LeadStore: Send + Sync + 'static {
    async fn append(&self, record: &LeadRecord) -> Result<(), StorageError>;
}

/// Lead store writing to the `emails` table.
pub struct PgLeadStore {
    pool: PgPool,
}

impl PgLeadStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeadStore for PgLeadStore {
    async fn append(&self, record: &LeadRecord) -> Result<(), StorageError> {
        let id = Uuid::new_v4();
        let lead = &record.lead;

        sqlx::query(
            r#"
            INSERT INTO emails (
                id,
                first_name,
                last_name,
                email,
                phone,
                how_did_you_hear,
                how_can_we_help,
                sent_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(id)
        .bind(&lead.first_name)
        .bind(&lead.last_name)
        .bind(&lead.email)
        .bind(&lead.phone)
        .bind(&lead.how_did_you_hear)
        .bind(&lead.how_can_we_help)
        .bind(record.sent_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!("Stored lead record {}", id);
        Ok(())
    }
}
