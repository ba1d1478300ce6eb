//! Post repository: create, list, lookup, atomic counters, categories.

use chrono::Utc;
use tracing::debug;

use edu_core::entities::{NewPost, Post};
use edu_core::enums::Reaction;
use edu_core::errors::CoreError;
use edu_core::ids::{PREFIX_POST, has_prefix};

use crate::EduDb;
use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, is_unique_violation, parse_datetime};

const POST_COLUMNS: &str =
    "id, title, content, author, category, views, likes, dislikes, created_at, updated_at";

const DUPLICATE_TITLE: &str = "A post with this title already exists";

fn row_to_post(row: &libsql::Row) -> Result<Post, DatabaseError> {
    Ok(Post {
        id: row.get::<String>(0)?,
        title: row.get::<String>(1)?,
        content: row.get::<String>(2)?,
        author: get_opt_string(row, 3)?,
        category: get_opt_string(row, 4)?,
        views: row.get::<i64>(5)?,
        likes: row.get::<i64>(6)?,
        dislikes: row.get::<i64>(7)?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
        updated_at: parse_datetime(&row.get::<String>(9)?)?,
    })
}

impl EduDb {
    /// Create a post. Titles are unique.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidRequest` (wrapped) if title or content is
    /// blank, `CoreError::Conflict` if the title is taken, or `DatabaseError`
    /// if the INSERT fails.
    pub async fn create_post(&self, post: &NewPost) -> Result<Post, DatabaseError> {
        post.validate()?;

        if self.find_post_by_title(&post.title).await?.is_some() {
            return Err(CoreError::Conflict(DUPLICATE_TITLE.to_string()).into());
        }

        let now = Utc::now();
        let id = self.generate_id(PREFIX_POST).await?;

        let inserted = self
            .conn()
            .execute(
                "INSERT INTO posts (id, title, content, author, category, views, likes, dislikes, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, 0, 0, 0, ?6, ?7)",
                libsql::params![
                    id.as_str(),
                    post.title.as_str(),
                    post.content.as_str(),
                    post.author.as_deref(),
                    post.category.as_deref(),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await;

        // Another request may have taken the title between the check and the insert.
        match inserted {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                return Err(CoreError::Conflict(DUPLICATE_TITLE.to_string()).into());
            }
            Err(e) => return Err(e.into()),
        }

        Ok(Post {
            id,
            title: post.title.clone(),
            content: post.content.clone(),
            author: post.author.clone(),
            category: post.category.clone(),
            views: 0,
            likes: 0,
            dislikes: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// All posts, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_posts(&self) -> Result<Vec<Post>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {POST_COLUMNS} FROM posts ORDER BY created_at DESC, rowid DESC"),
                (),
            )
            .await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(row_to_post(&row)?);
        }
        Ok(results)
    }

    /// # Errors
    ///
    /// Returns `CoreError::NotFound` (wrapped) if no post has this id.
    pub async fn get_post(&self, id: &str) -> Result<Post, DatabaseError> {
        if !has_prefix(id, PREFIX_POST) {
            return Err(CoreError::not_found("post", id).into());
        }

        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {POST_COLUMNS} FROM posts WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| CoreError::not_found("post", id))?;
        row_to_post(&row)
    }

    pub async fn find_post_by_title(&self, title: &str) -> Result<Option<Post>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {POST_COLUMNS} FROM posts WHERE title = ?1"),
                [title],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_post(&row)?)),
            None => Ok(None),
        }
    }

    /// Fetch a post and count the view, in one statement.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` (wrapped) if no post has this id.
    pub async fn view_post(&self, id: &str) -> Result<Post, DatabaseError> {
        self.increment_post_counter(id, "views").await
    }

    /// Add one like or dislike, in one statement.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` (wrapped) if no post has this id.
    pub async fn react_to_post(
        &self,
        id: &str,
        reaction: Reaction,
    ) -> Result<Post, DatabaseError> {
        debug!(id, %reaction, "Recording reaction");
        self.increment_post_counter(id, reaction.column()).await
    }

    /// Distinct non-empty categories, sorted.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn distinct_categories(&self) -> Result<Vec<String>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT DISTINCT category FROM posts
                 WHERE category IS NOT NULL AND category != ''
                 ORDER BY category",
                (),
            )
            .await?;
        let mut results = Vec::new();
        while let Some(row) = rows.next().await? {
            results.push(row.get::<String>(0)?);
        }
        Ok(results)
    }

    /// `column` must be one of the post counter columns; it is interpolated.
    async fn increment_post_counter(
        &self,
        id: &str,
        column: &str,
    ) -> Result<Post, DatabaseError> {
        debug_assert!(matches!(column, "views" | "likes" | "dislikes"));

        if !has_prefix(id, PREFIX_POST) {
            return Err(CoreError::not_found("post", id).into());
        }

        let sql = format!(
            "UPDATE posts SET {column} = {column} + 1, updated_at = ?2
             WHERE id = ?1
             RETURNING {POST_COLUMNS}"
        );
        let mut rows = self
            .conn()
            .query(&sql, libsql::params![id, Utc::now().to_rfc3339()])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| CoreError::not_found("post", id))?;
        row_to_post(&row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;
    use std::sync::Arc;

    async fn test_db() -> EduDb {
        EduDb::open_local(":memory:").await.unwrap()
    }

    fn new_post(title: &str, category: Option<&str>) -> NewPost {
        NewPost {
            title: title.to_string(),
            content: format!("content of {title}"),
            author: Some("editor".to_string()),
            category: category.map(String::from),
        }
    }

    #[tokio::test]
    async fn create_then_view() {
        let db = test_db().await;
        let created = db
            .create_post(&NewPost {
                title: "T".into(),
                content: "C".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(created.id.starts_with("pst-"));

        let viewed = db.view_post(&created.id).await.unwrap();
        assert_eq!(viewed.title, "T");
        assert_eq!(viewed.content, "C");
        assert_eq!(viewed.likes, 0);
        assert_eq!(viewed.dislikes, 0);
        assert_eq!(viewed.views, 1);
        assert_eq!(viewed.author, None);
    }

    #[tokio::test]
    async fn get_does_not_count_view() {
        let db = test_db().await;
        let created = db.create_post(&new_post("quiet", None)).await.unwrap();
        let fetched = db.get_post(&created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.views, 0);
    }

    #[tokio::test]
    async fn duplicate_title_conflicts() {
        let db = test_db().await;
        db.create_post(&new_post("same", None)).await.unwrap();
        let err = db.create_post(&new_post("same", None)).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Core(CoreError::Conflict(_))));
        assert_eq!(db.list_posts().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_content_rejected() {
        let db = test_db().await;
        let err = db
            .create_post(&NewPost {
                title: "no body".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::Core(CoreError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn unknown_post_not_found() {
        let db = test_db().await;
        for result in [
            db.get_post("pst-00000000").await,
            db.view_post("pst-00000000").await,
            db.react_to_post("pst-00000000", Reaction::Like).await,
        ] {
            assert!(matches!(
                result,
                Err(DatabaseError::Core(CoreError::NotFound { .. }))
            ));
        }
    }

    #[tokio::test]
    async fn sequential_likes_accumulate() {
        let db = test_db().await;
        let post = db.create_post(&new_post("liked", None)).await.unwrap();

        db.react_to_post(&post.id, Reaction::Like).await.unwrap();
        let after = db.react_to_post(&post.id, Reaction::Like).await.unwrap();
        assert_eq!(after.likes, 2);
        assert_eq!(after.dislikes, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_likes_are_not_lost() {
        const LIKERS: i64 = 50;

        let db = Arc::new(test_db().await);
        let post = db.create_post(&new_post("race", None)).await.unwrap();

        let handles: Vec<_> = (0..LIKERS)
            .map(|_| {
                let db = Arc::clone(&db);
                let id = post.id.clone();
                tokio::spawn(async move { db.react_to_post(&id, Reaction::Like).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let after = db.get_post(&post.id).await.unwrap();
        assert_eq!(after.likes, LIKERS);
        assert_eq!(after.dislikes, 0);
    }

    #[tokio::test]
    async fn malformed_id_is_not_found() {
        let db = test_db().await;
        db.create_post(&new_post("exists", None)).await.unwrap();
        for id in ["", "42", "ppr-00000000", "pst-nothex!!"] {
            assert!(
                matches!(
                    db.react_to_post(id, Reaction::Like).await,
                    Err(DatabaseError::Core(CoreError::NotFound { .. }))
                ),
                "{id}"
            );
            assert!(matches!(
                db.get_post(id).await,
                Err(DatabaseError::Core(CoreError::NotFound { .. }))
            ));
        }
    }

    #[tokio::test]
    async fn dislike_only_touches_dislikes() {
        let db = test_db().await;
        let post = db.create_post(&new_post("meh", None)).await.unwrap();
        let after = db.react_to_post(&post.id, Reaction::Dislike).await.unwrap();
        assert_eq!(after.dislikes, 1);
        assert_eq!(after.likes, 0);
        assert_eq!(after.views, 0);
        assert!(after.updated_at >= post.updated_at);
    }

    #[tokio::test]
    async fn categories_are_distinct() {
        let db = test_db().await;
        for (title, category) in [
            ("a", Some("tech")),
            ("b", Some("tech")),
            ("c", Some("life")),
            ("d", None),
        ] {
            db.create_post(&new_post(title, category)).await.unwrap();
        }

        let categories: HashSet<String> =
            db.distinct_categories().await.unwrap().into_iter().collect();
        let expected: HashSet<String> = ["tech", "life"].into_iter().map(String::from).collect();
        assert_eq!(categories, expected);
    }

    #[tokio::test]
    async fn categories_empty_without_posts() {
        let db = test_db().await;
        assert!(db.distinct_categories().await.unwrap().is_empty());
    }
}
