//! # Storage Handle
//!
//! One live SQLite connection and the primitives every record and report
//! is built from.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Store (one connection)                         │
//! │                                                                         │
//! │  StoreConfig::new(path) ← Configure location and flags                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Store::connect(config).await ← Open eagerly + bootstrap schema        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌──────────────────────────────────────────┐                          │
//! │  │  SqliteConnection (exactly one, no pool) │                          │
//! │  └──────────────────────────────────────────┘                          │
//! │       │                                                                 │
//! │       │ &mut Store: one statement in flight at a time                  │
//! │       ▼                                                                 │
//! │  execute ──► BEGIN (if none pending) ──► statement                     │
//! │          └─► statement fails ──► ROLLBACK (if BEGIN was ours)         │
//! │  commit  ──► COMMIT (if pending)                                       │
//! │  query_one / query_many ──► read, no transaction opened                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  close() ← Release; a second close fails with DbError::Closed          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serial Use
//! Every operation takes `&mut self`, so two statements can never be in
//! flight on the same handle. Sharing a handle across tasks needs an
//! external lock (e.g. `tokio::sync::Mutex<Store>`).

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use sqlx::query::{Query, QueryAs};
use sqlx::sqlite::{
    SqliteArguments, SqliteConnectOptions, SqliteJournalMode, SqliteRow, SqliteSynchronous,
};
use sqlx::{ConnectOptions, Connection, FromRow, Sqlite, SqliteConnection};
use tracing::{debug, info, warn};

use crate::config::StoreConfig;
use crate::error::{DbError, DbResult};
use crate::schema;

/// The storage handle: sole gateway to persisted inventory state.
///
/// ## Usage
/// ```rust,ignore
/// let mut store = Store::connect(StoreConfig::new("./inventory.db")).await?;
///
/// Product::new("Widget", "Hardware", Money::from_cents(1999), 10)
///     .add(&mut store)
///     .await?;
///
/// store.close().await?;
/// ```
pub struct Store {
    /// `None` once the handle has been closed.
    conn: Option<SqliteConnection>,

    /// A `BEGIN` has been issued and not yet committed.
    in_transaction: bool,

    database_path: PathBuf,
}

impl Store {
    /// Opens the connection described by `config`.
    ///
    /// ## What This Does
    /// 1. Opens (and optionally creates) the database file
    /// 2. Configures SQLite:
    ///    - WAL mode and NORMAL synchronous for file-backed stores
    ///    - Foreign keys per `config.foreign_keys`
    /// 3. Creates missing tables when `config.bootstrap_schema` is set
    ///
    /// ## Errors
    /// `DbError::ConnectionFailed` when the database cannot be opened.
    pub async fn connect(config: StoreConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Opening store connection"
        );

        let base = if config.is_in_memory() {
            // Fresh private database per connection
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        } else {
            SqliteConnectOptions::new()
                .filename(&config.database_path)
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
        };

        let options = base
            .create_if_missing(config.create_if_missing)
            .foreign_keys(config.foreign_keys);

        let mut conn = options
            .connect()
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        if config.bootstrap_schema {
            schema::bootstrap(&mut conn).await?;
        }

        info!("Store connection ready");

        Ok(Store {
            conn: Some(conn),
            in_transaction: false,
            database_path: config.database_path,
        })
    }

    /// Runs a write statement, opening a transaction first if none is
    /// pending. The write is not durable until [`commit`](Self::commit).
    ///
    /// ## Returns
    /// Number of rows affected.
    ///
    /// ## Example
    /// ```rust,ignore
    /// store
    ///     .execute(sqlx::query("UPDATE products SET stock_level = ? WHERE name = ?").bind(7).bind("Widget"))
    ///     .await?;
    /// store.commit().await?;
    /// ```
    pub async fn execute<'q>(
        &mut self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
    ) -> DbResult<u64> {
        let conn = self.conn.as_mut().ok_or(DbError::Closed)?;

        let opened_here = !self.in_transaction;
        if opened_here {
            sqlx::query("BEGIN").execute(&mut *conn).await?;
            self.in_transaction = true;
        }

        let outcome = query.execute(&mut *conn).await;
        match outcome {
            Ok(result) => {
                debug!(rows = result.rows_affected(), "Statement executed");
                Ok(result.rows_affected())
            }
            Err(e) => {
                // Earlier pending writes belong to the caller; only undo our own BEGIN
                if opened_here {
                    if let Err(rollback_err) = self.rollback().await {
                        warn!(error = %rollback_err, "Rollback after failed statement failed");
                    }
                }
                Err(e.into())
            }
        }
    }

    /// Runs a statement expected to return at most one row.
    ///
    /// Extra rows are ignored; only the first is decoded.
    pub async fn query_one<'q, T>(
        &mut self,
        query: QueryAs<'q, Sqlite, T, SqliteArguments<'q>>,
    ) -> DbResult<Option<T>>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let conn = self.connection()?;
        Ok(query.fetch_optional(conn).await?)
    }

    /// Runs a statement returning zero or more rows.
    pub async fn query_many<'q, T>(
        &mut self,
        query: QueryAs<'q, Sqlite, T, SqliteArguments<'q>>,
    ) -> DbResult<Vec<T>>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let conn = self.connection()?;
        let rows = query.fetch_all(conn).await?;
        debug!(count = rows.len(), "Query returned rows");
        Ok(rows)
    }

    /// Makes pending writes durable.
    ///
    /// A no-op when nothing has been executed since the last commit.
    ///
    /// ## Errors
    /// `DbError::CommitFailed` if SQLite refuses the `COMMIT`; the writes
    /// stay pending in that case.
    pub async fn commit(&mut self) -> DbResult<()> {
        let conn = self.conn.as_mut().ok_or(DbError::Closed)?;

        if !self.in_transaction {
            return Ok(());
        }

        sqlx::query("COMMIT")
            .execute(&mut *conn)
            .await
            .map_err(|e| DbError::CommitFailed(e.to_string()))?;
        self.in_transaction = false;

        debug!("Committed");
        Ok(())
    }

    /// Discards pending writes and releases SQLite's write lock.
    ///
    /// A no-op when nothing is pending.
    pub async fn rollback(&mut self) -> DbResult<()> {
        let conn = self.conn.as_mut().ok_or(DbError::Closed)?;

        if !self.in_transaction {
            return Ok(());
        }

        // SQLite may already have ended the transaction on its own, so the
        // flag is cleared whatever ROLLBACK reports
        self.in_transaction = false;
        sqlx::query("ROLLBACK").execute(&mut *conn).await?;

        debug!("Rolled back");
        Ok(())
    }

    /// Releases the connection.
    ///
    /// Writes that were executed but never committed are discarded.
    ///
    /// ## Errors
    /// `DbError::Closed` when called on an already closed handle.
    pub async fn close(&mut self) -> DbResult<()> {
        let conn = self.conn.take().ok_or(DbError::Closed)?;

        if self.in_transaction {
            warn!(
                path = %self.database_path.display(),
                "Closing store with uncommitted writes; they will be discarded"
            );
            self.in_transaction = false;
        }

        info!("Closing store connection");
        conn.close()
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))
    }

    /// Whether `execute` has run since the last commit.
    pub fn has_pending_writes(&self) -> bool {
        self.in_transaction
    }

    pub fn is_closed(&self) -> bool {
        self.conn.is_none()
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }

    /// Checks if the store can execute queries.
    pub async fn health_check(&mut self) -> bool {
        match self.conn.as_mut() {
            Some(conn) => sqlx::query("SELECT 1").execute(conn).await.is_ok(),
            None => false,
        }
    }

    /// Expected tables that are absent from the database.
    pub async fn missing_tables(&mut self) -> DbResult<Vec<&'static str>> {
        let conn = self.connection()?;
        schema::missing_tables(conn).await
    }

    fn connection(&mut self) -> DbResult<&mut SqliteConnection> {
        self.conn.as_mut().ok_or(DbError::Closed)
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("database_path", &self.database_path)
            .field("open", &self.conn.is_some())
            .field("in_transaction", &self.in_transaction)
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[derive(Debug, sqlx::FromRow)]
    struct CountRow {
        n: i64,
    }

    async fn count_products(store: &mut Store) -> i64 {
        store
            .query_one(sqlx::query_as::<_, CountRow>(
                "SELECT COUNT(*) AS n FROM products",
            ))
            .await
            .unwrap()
            .unwrap()
            .n
    }

    #[tokio::test]
    async fn test_in_memory_store() {
        let mut store = Store::connect(StoreConfig::in_memory()).await.unwrap();

        assert!(store.health_check().await);
        assert!(store.missing_tables().await.unwrap().is_empty());
        assert!(!store.has_pending_writes());
    }

    #[tokio::test]
    async fn test_without_bootstrap_tables_are_missing() {
        let mut store = Store::connect(StoreConfig::in_memory().bootstrap_schema(false))
            .await
            .unwrap();

        assert_eq!(
            store.missing_tables().await.unwrap(),
            vec!["products", "sales", "suppliers"]
        );
    }

    #[tokio::test]
    async fn test_unreachable_path_is_connection_error() {
        let config = StoreConfig::new("/nonexistent-dir/for/sure/inventory.db")
            .create_if_missing(false);

        let err = Store::connect(config).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Connection);
    }

    #[tokio::test]
    async fn test_execute_then_commit() {
        let mut store = Store::connect(StoreConfig::in_memory()).await.unwrap();

        let rows = store
            .execute(
                sqlx::query(
                    "INSERT INTO products (name, category, price_cents, stock_level) VALUES (?, ?, ?, ?)",
                )
                .bind("Widget")
                .bind("Hardware")
                .bind(1999_i64)
                .bind(10_i64),
            )
            .await
            .unwrap();

        assert_eq!(rows, 1);
        assert!(store.has_pending_writes());

        store.commit().await.unwrap();
        assert!(!store.has_pending_writes());
        assert_eq!(count_products(&mut store).await, 1);
    }

    #[tokio::test]
    async fn test_commit_without_writes_is_noop() {
        let mut store = Store::connect(StoreConfig::in_memory()).await.unwrap();
        store.commit().await.unwrap();
        store.commit().await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_sql_is_query_error() {
        let mut store = Store::connect(StoreConfig::in_memory()).await.unwrap();

        let err = store
            .execute(sqlx::query("INSERT INTO nowhere VALUES (1)"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Query);
    }

    #[tokio::test]
    async fn test_failed_statement_releases_its_transaction() {
        let mut store = Store::connect(StoreConfig::in_memory()).await.unwrap();

        store
            .execute(sqlx::query("INSERT INTO nowhere VALUES (1)"))
            .await
            .unwrap_err();

        assert!(!store.has_pending_writes());
    }

    #[tokio::test]
    async fn test_failed_statement_keeps_earlier_pending_writes() {
        let mut store = Store::connect(StoreConfig::in_memory()).await.unwrap();

        store
            .execute(
                sqlx::query(
                    "INSERT INTO products (name, category, price_cents, stock_level) VALUES ('Widget', 'Misc', 100, 1)",
                ),
            )
            .await
            .unwrap();
        store
            .execute(sqlx::query("INSERT INTO nowhere VALUES (1)"))
            .await
            .unwrap_err();

        assert!(store.has_pending_writes());
        store.commit().await.unwrap();
        assert_eq!(count_products(&mut store).await, 1);
    }

    #[tokio::test]
    async fn test_rollback_discards_pending_writes() {
        let mut store = Store::connect(StoreConfig::in_memory()).await.unwrap();

        store
            .execute(
                sqlx::query(
                    "INSERT INTO products (name, category, price_cents, stock_level) VALUES ('Widget', 'Misc', 100, 1)",
                ),
            )
            .await
            .unwrap();
        store.rollback().await.unwrap();

        assert!(!store.has_pending_writes());
        assert_eq!(count_products(&mut store).await, 0);

        // Nothing pending: no-op
        store.rollback().await.unwrap();
    }

    #[tokio::test]
    async fn test_query_many_empty() {
        let mut store = Store::connect(StoreConfig::in_memory()).await.unwrap();

        let rows = store
            .query_many(sqlx::query_as::<_, CountRow>(
                "SELECT id AS n FROM products",
            ))
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_close_twice_fails() {
        let mut store = Store::connect(StoreConfig::in_memory()).await.unwrap();

        store.close().await.unwrap();
        assert!(store.is_closed());
        assert!(!store.health_check().await);

        let err = store.close().await.unwrap_err();
        assert!(matches!(err, DbError::Closed));
    }

    #[tokio::test]
    async fn test_operations_after_close_fail() {
        let mut store = Store::connect(StoreConfig::in_memory()).await.unwrap();
        store.close().await.unwrap();

        let err = store.execute(sqlx::query("SELECT 1")).await.unwrap_err();
        assert!(matches!(err, DbError::Closed));

        let err = store.commit().await.unwrap_err();
        assert!(matches!(err, DbError::Closed));
    }

    #[tokio::test]
    async fn test_file_store_persists_committed_writes_only() {
        let dir = std::env::temp_dir().join(format!(
            "stockroom-store-test-{}-{}",
            std::process::id(),
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("inventory.db");

        let insert = |name: &'static str| {
            sqlx::query(
                "INSERT INTO products (name, category, price_cents, stock_level) VALUES (?, 'Misc', 100, 1)",
            )
            .bind(name)
        };

        let mut store = Store::connect(StoreConfig::new(&path)).await.unwrap();
        store.execute(insert("kept")).await.unwrap();
        store.commit().await.unwrap();
        store.execute(insert("dropped")).await.unwrap();
        store.close().await.unwrap();

        let mut reopened = Store::connect(StoreConfig::new(&path)).await.unwrap();
        assert_eq!(count_products(&mut reopened).await, 1);
        reopened.close().await.unwrap();

        let _ = std::fs::remove_dir_all(&dir);
    }
}
