use std::path::PathBuf;

use rusqlite::ErrorCode;
use thiserror::Error;

/// Terminal state a failed [`insert_pair`](crate::insert_pair) call ended in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxOutcome {
    /// No transaction was ever opened.
    NotStarted,
    /// The transaction was rolled back; nothing was written.
    RolledBack,
    /// Commit failed. Whether anything was persisted is up to the store.
    CommitFailed,
}

/// Failures of the transactional double insert.
#[derive(Debug, Error)]
pub enum TxError {
    #[error("failed to begin transaction")]
    TransactionStart(#[source] rusqlite::Error),

    #[error("failed to prepare insert statement")]
    Prepare(#[source] rusqlite::Error),

    #[error("failed to insert record {id}")]
    Insert {
        id: i64,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to commit transaction")]
    Commit(#[source] rusqlite::Error),
}

impl TxError {
    /// Terminal state the transaction reached before this error was returned.
    pub fn outcome(&self) -> TxOutcome {
        match self {
            TxError::TransactionStart(_) => TxOutcome::NotStarted,
            TxError::Prepare(_) | TxError::Insert { .. } => TxOutcome::RolledBack,
            TxError::Commit(_) => TxOutcome::CommitFailed,
        }
    }

    /// True when SQLite reported a constraint violation at any step.
    ///
    /// Covers a rejected insert such as a duplicate id, and also a `Commit`
    /// failing on a deferred constraint (e.g. a deferred foreign key).
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self.sqlite_error(),
            rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
        )
    }

    /// The underlying rusqlite error, whichever step produced it.
    pub fn sqlite_error(&self) -> &rusqlite::Error {
        match self {
            TxError::TransactionStart(e) | TxError::Prepare(e) | TxError::Commit(e) => e,
            TxError::Insert { source, .. } => source,
        }
    }
}

/// Failures of the store outside the write path.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open database at {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("failed to create schema")]
    Schema(#[source] rusqlite::Error),

    #[error("query failed")]
    Query(#[from] rusqlite::Error),

    #[error("failed to remove database file {path}")]
    Reset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
