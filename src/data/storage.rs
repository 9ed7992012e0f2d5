use {
    crate::config::{DF, PERSISTENCE},
    anyhow::{Context, Result},
    async_trait::async_trait,
    serde_json::Value,
    sqlx::{
        ConnectOptions, Pool, Row, Sqlite,
        sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous},
    },
    std::{str::FromStr, time::Duration},
};

/// A stored document and its id within a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub body: Value,
}

/// Abstract interface for the document database.
/// Constructed once and handed to whatever needs persistence.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn initialize(&self) -> Result<()>;
    /// Insert or replace.
    async fn upsert(&self, collection: &str, id: &str, body: &Value) -> Result<()>;
    /// Insert unless the id already exists. Returns whether a row was written.
    async fn insert_if_absent(&self, collection: &str, id: &str, body: &Value) -> Result<bool>;
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>>;
    async fn delete(&self, collection: &str, id: &str) -> Result<bool>;
    /// All documents of a collection, oldest write first.
    async fn list(&self, collection: &str) -> Result<Vec<Document>>;
    /// Documents whose top-level string `field` equals `value`.
    async fn find_by_field(&self, collection: &str, field: &str, value: &str)
    -> Result<Vec<Document>>;
    /// Sets one top-level field. Returns false if the document doesn't exist.
    async fn set_field(&self, collection: &str, id: &str, field: &str, value: &Value)
    -> Result<bool>;
}

pub struct SqliteDocumentStore {
    pool: Pool<Sqlite>,
}

impl SqliteDocumentStore {
    pub async fn new(db_path: &str) -> Result<Self> {
        let cfg = &PERSISTENCE.database;
        let connection_options = SqliteConnectOptions::from_str(&format!("sqlite://{}", db_path))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(cfg.busy_timeout_secs))
            .synchronous(SqliteSynchronous::Normal)
            .log_slow_statements(
                log::LevelFilter::Warn,
                Duration::from_secs(cfg.slow_statement_secs),
            );

        let pool = SqlitePoolOptions::new()
            .max_connections(cfg.max_connections)
            .connect_with(connection_options)
            .await
            .with_context(|| format!("Failed to open document store at {}", db_path))?;

        let store = Self { pool };
        store.initialize().await?;
        Ok(store)
    }

    /// Private database that lives as long as the store. Used by tests and dry runs.
    pub async fn in_memory() -> Result<Self> {
        let connection_options = SqliteConnectOptions::from_str("sqlite::memory:")?;

        // Every connection to :memory: is its own database, so keep exactly one alive.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(connection_options)
            .await?;

        let store = Self { pool };
        store.initialize().await?;
        Ok(store)
    }

    fn decode_rows(rows: &[sqlx::sqlite::SqliteRow]) -> Result<Vec<Document>> {
        rows.iter()
            .map(|row| {
                let id: String = row.try_get("id")?;
                let body: String = row.try_get("body")?;
                let body = serde_json::from_str(&body)
                    .with_context(|| format!("Corrupt document body for {}", id))?;
                Ok(Document { id, body })
            })
            .collect()
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn initialize(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                collection TEXT NOT NULL,
                id TEXT NOT NULL,
                body TEXT NOT NULL,
                PRIMARY KEY (collection, id)
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create documents table")?;

        Ok(())
    }

    async fn upsert(&self, collection: &str, id: &str, body: &Value) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, body) VALUES (?, ?, ?)
            ON CONFLICT (collection, id) DO UPDATE SET body = excluded.body
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(serde_json::to_string(body)?)
        .execute(&self.pool)
        .await?;

        if DF.log_store {
            log::info!("STORE: upsert {}/{}", collection, id);
        }
        Ok(())
    }

    async fn insert_if_absent(&self, collection: &str, id: &str, body: &Value) -> Result<bool> {
        let result =
            sqlx::query("INSERT OR IGNORE INTO documents (collection, id, body) VALUES (?, ?, ?)")
                .bind(collection)
                .bind(id)
                .bind(serde_json::to_string(body)?)
                .execute(&self.pool)
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>> {
        let row = sqlx::query("SELECT body FROM documents WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(r) => {
                let body: String = r.try_get("body")?;
                Ok(Some(serde_json::from_str(&body)?))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>> {
        let rows = sqlx::query(
            r#"
            SELECT id, body
            FROM documents
            WHERE collection = ?
            ORDER BY rowid ASC
            "#,
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;

        Self::decode_rows(&rows)
    }

    async fn find_by_field(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>> {
        let rows = sqlx::query(
            r#"
            SELECT id, body
            FROM documents
            WHERE collection = ? AND json_extract(body, ?) = ?
            ORDER BY rowid ASC
            "#,
        )
        .bind(collection)
        .bind(json_path(field))
        .bind(value)
        .fetch_all(&self.pool)
        .await?;

        Self::decode_rows(&rows)
    }

    async fn set_field(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        value: &Value,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE documents
            SET body = json_set(body, ?, json(?))
            WHERE collection = ? AND id = ?
            "#,
        )
        .bind(json_path(field))
        .bind(serde_json::to_string(value)?)
        .bind(collection)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Top-level JSON path for a field name, quoted so dots and spaces stay literal.
fn json_path(field: &str) -> String {
    format!("$.\"{}\"", field.replace('"', ""))
}
