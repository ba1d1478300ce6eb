//! # edu-db
//!
//! libSQL storage for edushare.
//!
//! Holds the three document collections (papers, syllabi, study materials)
//! and the blog posts. One [`EduDb`] is opened at startup and shared by every
//! request handler; tests open `":memory:"` instead.
//!
//! Counter updates (`views`, `likes`, `dislikes`) are single
//! `UPDATE ... SET col = col + 1 ... RETURNING` statements, so concurrent
//! increments never lose an update.

pub mod error;
pub mod helpers;
pub mod repos;
mod schema;

use edu_config::DatabaseConfig;
use error::DatabaseError;
use libsql::Builder;
use tracing::info;

/// Central database handle for all edushare state.
pub struct EduDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl EduDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Creates the schema on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or the schema
    /// cannot be created.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        let edu_db = Self { db, conn };
        edu_db.ensure_schema().await?;
        Ok(edu_db)
    }

    /// Open a remote libSQL database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection or schema setup fails.
    pub async fn open_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await?;
        let conn = db.connect()?;

        let edu_db = Self { db, conn };
        edu_db.ensure_schema().await?;
        Ok(edu_db)
    }

    /// Open whichever database the configuration points at.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if opening fails.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        if config.is_remote() {
            info!(url = %config.url, "Opening remote database");
            Self::open_remote(&config.url, &config.auth_token).await
        } else {
            info!(path = %config.path, "Opening local database");
            Self::open_local(&config.path).await
        }
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"pst-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query(
                &format!("SELECT '{prefix}-' || lower(hex(randomblob(4)))"),
                (),
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    async fn test_db() -> EduDb {
        EduDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        for table in ["papers", "syllabi", "study_materials", "posts"] {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn schema_is_idempotent() {
        let db = test_db().await;
        db.ensure_schema().await.unwrap();
    }

    #[tokio::test]
    async fn open_from_config_uses_local_path() {
        let config = DatabaseConfig {
            path: ":memory:".into(),
            ..Default::default()
        };
        let db = EduDb::open(&config).await.unwrap();
        assert!(db.generate_id("tst").await.is_ok());
    }

    #[tokio::test]
    async fn local_file_persists_between_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edushare.db");
        let path = path.to_str().unwrap();

        {
            let db = EduDb::open_local(path).await.unwrap();
            db.conn()
                .execute(
                    "INSERT INTO posts (id, title, content) VALUES ('pst-00000001', 'T', 'C')",
                    (),
                )
                .await
                .unwrap();
        }

        let db = EduDb::open_local(path).await.unwrap();
        let mut rows = db
            .conn()
            .query("SELECT title FROM posts WHERE id = 'pst-00000001'", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();
        assert_eq!(row.get::<String>(0).unwrap(), "T");
    }

    #[tokio::test]
    async fn generate_id_correct_format() {
        let db = test_db().await;
        let id = db.generate_id("pst").await.unwrap();
        assert!(
            edu_core::ids::has_prefix(&id, edu_core::ids::PREFIX_POST),
            "unexpected id shape: {id}"
        );
    }

    #[tokio::test]
    async fn generate_id_all_prefixes() {
        let db = test_db().await;
        for prefix in [
            edu_core::ids::PREFIX_PAPER,
            edu_core::ids::PREFIX_SYLLABUS,
            edu_core::ids::PREFIX_STUDY_MATERIAL,
            edu_core::ids::PREFIX_POST,
        ] {
            let id = db.generate_id(prefix).await.unwrap();
            assert!(id.starts_with(&format!("{prefix}-")));
        }
    }

    #[tokio::test]
    async fn generate_id_uniqueness() {
        let db = test_db().await;
        let mut ids = HashSet::new();
        for _ in 0..100 {
            let id = db.generate_id("tst").await.unwrap();
            assert!(ids.insert(id.clone()), "Duplicate ID generated: {id}");
        }
    }

    #[tokio::test]
    async fn branch_year_check_constraint() {
        let db = test_db().await;
        let result = db
            .conn()
            .execute(
                "INSERT INTO papers (id, title, stream, branch, branch_year, view_url, download_url)
                 VALUES ('ppr-00000001', 'T', 'B.Tech', 'CSE', 'Fifth Year', 'v', 'd')",
                (),
            )
            .await;
        assert!(result.is_err(), "unknown branch year should be rejected");
    }

    #[tokio::test]
    async fn post_title_unique_constraint() {
        let db = test_db().await;
        db.conn()
            .execute(
                "INSERT INTO posts (id, title, content) VALUES ('pst-00000001', 'Same', 'a')",
                (),
            )
            .await
            .unwrap();
        let err = db
            .conn()
            .execute(
                "INSERT INTO posts (id, title, content) VALUES ('pst-00000002', 'Same', 'b')",
                (),
            )
            .await
            .unwrap_err();
        assert!(helpers::is_unique_violation(&err), "{err}");
    }
}
