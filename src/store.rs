//! The database-access collaborator, as seen by the write path.
//!
//! Errors stay `rusqlite::Error` at this seam: the only production
//! implementation is SQLite, and the writer classifies failures by the step
//! that produced them, not by their contents.

use crate::record::Record;

/// Something that can open a write transaction.
pub trait Transactional {
    type Tx<'tx>: WriteTransaction + 'tx
    where
        Self: 'tx;

    fn begin(&mut self) -> rusqlite::Result<Self::Tx<'_>>;
}

/// An open transaction. Consumed by `commit` or `rollback`.
pub trait WriteTransaction: Sized {
    type Stmt<'stmt>: InsertStatement + 'stmt
    where
        Self: 'stmt;

    fn prepare(&self, sql: &str) -> rusqlite::Result<Self::Stmt<'_>>;

    fn commit(self) -> rusqlite::Result<()>;

    fn rollback(self) -> rusqlite::Result<()>;
}

/// A prepared insert taking `(id, name)` as positional parameters.
pub trait InsertStatement {
    /// Returns the number of rows changed.
    fn exec(&mut self, record: &Record) -> rusqlite::Result<usize>;
}
