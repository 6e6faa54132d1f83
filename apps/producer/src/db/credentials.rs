//! Stored AWS credential used to open the queue session.

use crate::Result;
use sqlx::{PgPool, Row};

#[derive(Clone)]
pub struct AwsCredential {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region_name: String,
}

impl std::fmt::Debug for AwsCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsCredential")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("region_name", &self.region_name)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct CredentialRepository {
    pool: PgPool,
}

impl CredentialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Read the single row of `aws_credentials`.
    ///
    /// An empty table is an error. Extra rows are ignored with a warning.
    pub async fn aws_credential(&self) -> Result<AwsCredential> {
        let rows = sqlx::query(
            r#"
            SELECT aws_access_key_id, aws_secret_access_key, region_name
            FROM aws_credentials
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(crate::Error::Database)?;

        if rows.len() > 1 {
            tracing::warn!(
                rows = rows.len(),
                "aws_credentials holds more than one row, using the first"
            );
        }

        let row = rows.first().ok_or(crate::Error::MissingCredentials)?;

        Ok(AwsCredential {
            access_key_id: row.try_get("aws_access_key_id")?,
            secret_access_key: row.try_get("aws_secret_access_key")?,
            region_name: row.try_get("region_name")?,
        })
    }
}
