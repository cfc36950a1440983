//! SQLite database layer (embedded, no external dependencies)
//!
//! Each operation opens its own connection, runs exactly one statement and
//! closes the connection before returning. Statements auto-commit.

use anyhow::{Context, Result};
use async_trait::async_trait;
use blog_core::{BlogError, Post, PostStore, ValidDraft};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};
use tracing::debug;

pub struct Database {
    options: SqliteConnectOptions,
}

impl Database {
    pub async fn new(database_path: &str) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_path);

        // Create parent directory if needed
        if let Some(parent) = std::path::Path::new(database_path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create database directory: {}", parent.display())
                })?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true);

        let db = Self { options };

        db.run_migrations()
            .await
            .context("Failed to run database migrations")?;

        tracing::info!("Database initialization complete");

        Ok(db)
    }

    async fn run_migrations(&self) -> Result<()> {
        let mut conn = self
            .options
            .connect()
            .await
            .context("Failed to connect to SQLite database")?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS posts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                content TEXT
            )
            "#,
        )
        .execute(&mut conn)
        .await?;

        conn.close().await?;

        Ok(())
    }

    async fn connect(&self) -> blog_core::Result<SqliteConnection> {
        self.options.connect().await.map_err(db_err)
    }
}

#[async_trait]
impl PostStore for Database {
    async fn fetch_all(&self) -> blog_core::Result<Vec<Post>> {
        let mut conn = self.connect().await?;

        let rows: Vec<PostRow> = sqlx::query_as(
            r#"
            SELECT id, title, content FROM posts
            ORDER BY id
            "#,
        )
        .fetch_all(&mut conn)
        .await
        .map_err(db_err)?;

        conn.close().await.map_err(db_err)?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn fetch_one(&self, id: i64) -> blog_core::Result<Post> {
        let mut conn = self.connect().await?;

        let row: Option<PostRow> = sqlx::query_as(
            r#"
            SELECT id, title, content FROM posts WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut conn)
        .await
        .map_err(db_err)?;

        conn.close().await.map_err(db_err)?;

        row.map(Post::from).ok_or(BlogError::PostNotFound(id))
    }

    async fn insert(&self, draft: &ValidDraft) -> blog_core::Result<i64> {
        let mut conn = self.connect().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO posts (title, content) VALUES (?1, ?2)
            "#,
        )
        .bind(draft.title())
        .bind(draft.content())
        .execute(&mut conn)
        .await
        .map_err(db_err)?;

        conn.close().await.map_err(db_err)?;

        Ok(result.last_insert_rowid())
    }

    async fn update(&self, id: i64, draft: &ValidDraft) -> blog_core::Result<()> {
        let mut conn = self.connect().await?;

        let result = sqlx::query(
            r#"
            UPDATE posts SET title = ?1, content = ?2
            WHERE id = ?3
            "#,
        )
        .bind(draft.title())
        .bind(draft.content())
        .bind(id)
        .execute(&mut conn)
        .await
        .map_err(db_err)?;

        conn.close().await.map_err(db_err)?;

        debug!("Updated post {} ({} rows)", id, result.rows_affected());
        Ok(())
    }

    async fn delete(&self, id: i64) -> blog_core::Result<()> {
        let mut conn = self.connect().await?;

        let result = sqlx::query(
            r#"
            DELETE FROM posts WHERE id = ?1
            "#,
        )
        .bind(id)
        .execute(&mut conn)
        .await
        .map_err(db_err)?;

        conn.close().await.map_err(db_err)?;

        debug!("Deleted post {} ({} rows)", id, result.rows_affected());
        Ok(())
    }
}

fn db_err(e: sqlx::Error) -> BlogError {
    BlogError::Storage(e.to_string())
}

// Helper struct for sqlx query_as
#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: Option<String>,
}

impl From<PostRow> for Post {
    fn from(r: PostRow) -> Self {
        Post {
            id: r.id,
            title: r.title,
            content: r.content.unwrap_or_default(),
        }
    }
}
