//! # Database Error Types
//!
//! Error types for store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)   ValidationError   io::Error (notifier)   │
//! │       │                             │                │                  │
//! │       ▼                             ▼                ▼                  │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Caller (nothing is caught or retried on the way up)                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Taxonomy
//! Every variant belongs to one [`ErrorKind`]:
//!
//! | Kind         | Variants                                               |
//! |--------------|--------------------------------------------------------|
//! | `Connection` | `ConnectionFailed`                                     |
//! | `Query`      | `QueryFailed`, `UniqueViolation`, `ForeignKeyViolation`|
//! | `Commit`     | `CommitFailed`                                         |
//! | `Lookup`     | `NotFound`                                             |
//! | `Validation` | `Validation`                                           |
//! | `Notify`     | `NotifyFailed`                                         |
//! | `Closed`     | `Closed`                                               |
//! | `Internal`   | `Internal`                                             |

use stockroom_core::ValidationError;
use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Expected row absent.
    ///
    /// ## When This Occurs
    /// - Recording a sale against a product id that does not exist
    /// - Adjusting stock for a product name that does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Inserting a product whose name already exists
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Foreign key constraint violation.
    ///
    /// ## When This Occurs
    /// - Inserting a sale that references a missing product row
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// The store could not be opened.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and `create_if_missing` is off
    /// - File permissions issue
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Statement execution failed (malformed SQL, type mismatch, ...).
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pending writes could not be committed.
    #[error("Commit failed: {0}")]
    CommitFailed(String),

    /// The handle was already released with `close()`.
    #[error("Store connection is closed")]
    Closed,

    /// Record rejected before reaching the database.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A restock notifier could not deliver its announcement.
    #[error("Notification failed: {0}")]
    NotifyFailed(#[from] std::io::Error),

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Coarse classification of a [`DbError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Connection,
    Query,
    Commit,
    Lookup,
    Validation,
    Notify,
    Closed,
    Internal,
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Creates a UniqueViolation error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DbError::ConnectionFailed(_) => ErrorKind::Connection,
            DbError::QueryFailed(_)
            | DbError::UniqueViolation { .. }
            | DbError::ForeignKeyViolation { .. } => ErrorKind::Query,
            DbError::CommitFailed(_) => ErrorKind::Commit,
            DbError::NotFound { .. } => ErrorKind::Lookup,
            DbError::Validation(_) => ErrorKind::Validation,
            DbError::NotifyFailed(_) => ErrorKind::Notify,
            DbError::Closed => ErrorKind::Closed,
            DbError::Internal(_) => ErrorKind::Internal,
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → Analyze message for constraint type
/// sqlx::Error::ColumnDecode   → DbError::QueryFailed (type mismatch)
/// sqlx::Error::Io / Tls       → DbError::ConnectionFailed
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite constraint messages:
                // UNIQUE constraint: "UNIQUE constraint failed: <table>.<column>"
                // FK constraint: "FOREIGN KEY constraint failed"
                if let Some(field) = msg.strip_prefix("UNIQUE constraint failed: ") {
                    DbError::duplicate(field, "unknown")
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::TypeNotFound { .. } => DbError::QueryFailed(err.to_string()),

            sqlx::Error::Io(_) | sqlx::Error::Tls(_) => DbError::ConnectionFailed(err.to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DbError::not_found("Product", 42);
        assert_eq!(err.to_string(), "Product not found: 42");

        let err = DbError::duplicate("products.name", "Widget");
        assert_eq!(
            err.to_string(),
            "Duplicate products.name: 'Widget' already exists"
        );
    }

    #[test]
    fn test_kinds_follow_taxonomy() {
        assert_eq!(DbError::not_found("Product", 1).kind(), ErrorKind::Lookup);
        assert_eq!(
            DbError::duplicate("products.name", "x").kind(),
            ErrorKind::Query
        );
        assert_eq!(
            DbError::ConnectionFailed("nope".into()).kind(),
            ErrorKind::Connection
        );
        assert_eq!(DbError::CommitFailed("busy".into()).kind(), ErrorKind::Commit);
        assert_eq!(DbError::Closed.kind(), ErrorKind::Closed);

        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed");
        assert_eq!(DbError::from(io).kind(), ErrorKind::Notify);
    }

    #[test]
    fn test_validation_converts() {
        let err: DbError = ValidationError::required("name").into();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "Validation error: name is required");
    }

    #[test]
    fn test_row_not_found_maps_to_lookup() {
        let err: DbError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.kind(), ErrorKind::Lookup);
    }
}
