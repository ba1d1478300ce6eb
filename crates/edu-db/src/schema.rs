//! Schema bootstrap.
//!
//! Embeds `migrations/schema.sql` at compile time and executes it on every
//! open. All statements use `IF NOT EXISTS`, so re-running is a no-op.

use crate::EduDb;
use crate::error::DatabaseError;

/// Three document tables sharing one shape, the posts table, and their indexes.
const SCHEMA: &str = include_str!("../migrations/schema.sql");

impl EduDb {
    pub(crate) async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(SCHEMA)
            .await
            .map_err(|e| DatabaseError::Schema(e.to_string()))?;
        Ok(())
    }
}
