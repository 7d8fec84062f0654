use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

use crate::config::Config;
use crate::models::{BlogInput, BlogPost};

const CREATE_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS blogs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date TEXT,
    title TEXT,
    content TEXT,
    image TEXT
)
"#;

/// One row of the `blogs` table
///
/// Text columns are nullable in the schema; rows written by this service
/// never hold NULL, but anything else touching the file might.
#[derive(Debug, sqlx::FromRow)]
struct BlogRow {
    id: i64,
    date: Option<String>,
    title: Option<String>,
    content: Option<String>,
    image: Option<String>,
}

impl From<BlogRow> for BlogPost {
    fn from(row: BlogRow) -> Self {
        BlogPost {
            id: row.id.to_string(),
            date: row.date.unwrap_or_default(),
            title: row.title.unwrap_or_default(),
            content: row.content.unwrap_or_default(),
            image: row.image.unwrap_or_default(),
        }
    }
}

/// Shareable handle to the blog table for use across async handlers
///
/// Wraps the process-wide SQLite pool. Every method runs exactly one
/// statement; concurrency is left to the pool and SQLite itself.
#[derive(Clone)]
pub struct BlogStore {
    pool: SqlitePool,
}

impl BlogStore {
    /// Open the database named by the config and make sure the table exists
    ///
    /// The database file is created when missing.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.database_url)
            .with_context(|| format!("Invalid DATABASE_URL: {}", config.database_url))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database_max_connections)
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open database: {}", config.database_url))?;

        tracing::info!("Successfully connected to database: {}", config.database_url);

        let store = Self { pool };
        store.ensure_table_exists().await?;
        Ok(store)
    }

    /// Create the `blogs` table if it is not there yet
    pub async fn ensure_table_exists(&self) -> Result<()> {
        sqlx::query(CREATE_TABLE_SQL)
            .execute(&self.pool)
            .await
            .context("Failed to create blogs table")?;

        tracing::info!("Table 'blogs' is ready");
        Ok(())
    }

    /// All rows in storage order
    pub async fn list(&self) -> Result<Vec<BlogPost>> {
        let rows = sqlx::query_as::<_, BlogRow>("SELECT id, date, title, content, image FROM blogs")
            .fetch_all(&self.pool)
            .await
            .context("Failed to query blogs")?;

        tracing::debug!("Listed {} blogs", rows.len());
        Ok(rows.into_iter().map(BlogPost::from).collect())
    }

    /// Look up a single row
    ///
    /// # Returns
    /// * `Ok(Some(post))` - Row found
    /// * `Ok(None)` - No row has this id
    /// * `Err(_)` - Query failed
    pub async fn get(&self, id: i64) -> Result<Option<BlogPost>> {
        let row = sqlx::query_as::<_, BlogRow>("SELECT id, date, title, content, image FROM blogs WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to query blog")?;

        tracing::debug!("Read blog with id {}: found = {}", id, row.is_some());
        Ok(row.map(BlogPost::from))
    }

    /// Insert a new row and return it with the id SQLite assigned
    pub async fn create(&self, input: BlogInput) -> Result<BlogPost> {
        let result = sqlx::query("INSERT INTO blogs (date, title, content, image) VALUES (?, ?, ?, ?)")
            .bind(input.date.as_str())
            .bind(input.title.as_str())
            .bind(input.content.as_str())
            .bind(input.image.as_str())
            .execute(&self.pool)
            .await
            .context("Failed to insert blog")?;

        let id = result.last_insert_rowid();
        tracing::debug!("Inserted blog with id: {}", id);
        Ok(BlogPost::from_input(id.to_string(), input))
    }

    /// Overwrite all four mutable fields of a row
    ///
    /// Returns the number of rows affected, which is 0 when the id does not exist.
    pub async fn update(&self, id: i64, input: &BlogInput) -> Result<u64> {
        let result = sqlx::query("UPDATE blogs SET date = ?, title = ?, content = ?, image = ? WHERE id = ?")
            .bind(input.date.as_str())
            .bind(input.title.as_str())
            .bind(input.content.as_str())
            .bind(input.image.as_str())
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to update blog")?;

        tracing::debug!("Updated blog with id {}: {} row(s) affected", id, result.rows_affected());
        Ok(result.rows_affected())
    }

    /// Remove a row if present
    ///
    /// Returns the number of rows affected, which is 0 when the id does not exist.
    pub async fn delete(&self, id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete blog")?;

        tracing::debug!("Deleted blog with id {}: {} row(s) affected", id, result.rows_affected());
        Ok(result.rows_affected())
    }

    /// Perform a health check by executing a simple query
    pub async fn health_check(&self) -> Result<()> {
        let one = sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("Failed to execute health check query")?;

        if one == 1 {
            tracing::debug!("Health check query succeeded");
            Ok(())
        } else {
            Err(anyhow::anyhow!("Health check query returned {}", one))
        }
    }

    /// Close every pooled connection; later calls fail
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Database connections closed");
    }

    /// Fresh store over a private in-memory database
    #[cfg(test)]
    pub async fn in_memory() -> Self {
        let config = Config {
            database_url: "sqlite::memory:".to_string(),
            database_max_connections: 1,
            service_port: 8080,
            service_host: "127.0.0.1".to_string(),
        };

        Self::from_config(&config)
            .await
            .expect("Failed to open in-memory database")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str) -> BlogInput {
        BlogInput {
            date: "2024-01-01".to_string(),
            title: title.to_string(),
            content: format!("{} content", title),
            image: format!("/img/{}.png", title),
        }
    }

    #[test]
    fn test_store_is_clonable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<BlogStore>();
    }

    #[test]
    fn test_store_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BlogStore>();
    }

    #[tokio::test]
    async fn test_ensure_table_idempotent() {
        let store = BlogStore::in_memory().await;
        store.create(input("kept")).await.unwrap();

        store.ensure_table_exists().await.unwrap();

        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_file_database_created_when_missing() {
        let path = std::env::temp_dir().join(format!("blog-api-store-{}.db", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let config = Config {
            database_url: format!("sqlite://{}", path.display()),
            database_max_connections: 2,
            service_port: 8080,
            service_host: "127.0.0.1".to_string(),
        };

        let store = BlogStore::from_config(&config).await.unwrap();
        let created = store.create(input("persisted")).await.unwrap();
        store.close().await;

        let reopened = BlogStore::from_config(&config).await.unwrap();
        let id: i64 = created.id.parse().unwrap();
        assert_eq!(reopened.get(id).await.unwrap(), Some(created));
        reopened.close().await;

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_list_empty() {
        let store = BlogStore::in_memory().await;
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_assigns_unique_ids() {
        let store = BlogStore::in_memory().await;

        let first = store.create(input("first")).await.unwrap();
        let second = store.create(input("second")).await.unwrap();

        assert_eq!(first.id, "1");
        assert_eq!(second.id, "2");
        assert_eq!(first.title, "first");

        let listed = store.list().await.unwrap();
        assert_eq!(listed, vec![first, second]);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let store = BlogStore::in_memory().await;

        let first = store.create(input("first")).await.unwrap();
        store.delete(first.id.parse().unwrap()).await.unwrap();
        let second = store.create(input("second")).await.unwrap();

        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let store = BlogStore::in_memory().await;
        assert_eq!(store.get(42).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_and_delete_row_counts() {
        let store = BlogStore::in_memory().await;
        let created = store.create(input("original")).await.unwrap();
        let id: i64 = created.id.parse().unwrap();

        assert_eq!(store.update(id, &input("changed")).await.unwrap(), 1);
        assert_eq!(store.update(999, &input("ghost")).await.unwrap(), 0);
        assert_eq!(store.get(id).await.unwrap().unwrap().title, "changed");

        assert_eq!(store.delete(id).await.unwrap(), 1);
        assert_eq!(store.delete(id).await.unwrap(), 0);
        assert_eq!(store.get(id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_null_columns_read_as_empty() {
        let store = BlogStore::in_memory().await;
        sqlx::query("INSERT INTO blogs (title) VALUES ('only title')")
            .execute(&store.pool)
            .await
            .unwrap();

        let post = store.get(1).await.unwrap().unwrap();
        assert_eq!(post.title, "only title");
        assert_eq!(post.date, "");
        assert_eq!(post.content, "");
        assert_eq!(post.image, "");
    }

    #[tokio::test]
    async fn test_health_check() {
        let store = BlogStore::in_memory().await;
        store.health_check().await.unwrap();

        store.close().await;
        assert!(store.health_check().await.is_err());
    }

    #[tokio::test]
    async fn test_closed_store_returns_errors() {
        let store = BlogStore::in_memory().await;
        store.close().await;

        assert!(store.list().await.is_err());
        assert!(store.get(1).await.is_err());
        assert!(store.create(input("late")).await.is_err());
    }
}
