use std::io;
use std::path::{Path, PathBuf};

use rusqlite::{params, params_from_iter, Connection, Statement, Transaction};
use tracing::{debug, info, info_span};

use crate::error::StoreError;
use crate::record::Record;
use crate::store::{InsertStatement, Transactional, WriteTransaction};

/// Creates `foo` and clears any rows left from a previous run.
pub const CREATE_TABLE_SQL: &str =
    "create table foo (id integer not null primary key, name text); delete from foo;";

const SELECT_ALL_SQL: &str = "SELECT id, name FROM foo ORDER BY id";

/// SQLite store configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SqliteConfig {
    /// Path to the SQLite database file
    pub db_path: PathBuf,
}

impl SqliteConfig {
    /// Create a new SQLite config for the given path
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }
}

/// Removes the database file at `path` so the next open starts empty.
///
/// A missing file is not an error.
pub fn reset_database_file(path: &Path) -> Result<(), StoreError> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed database file");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(StoreError::Reset {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// An open handle to the embedded database.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database file named by the config
    pub fn open(config: &SqliteConfig) -> Result<Self, StoreError> {
        info!(path = %config.db_path.display(), "opening sqlite store");
        let conn = Connection::open(&config.db_path).map_err(|source| StoreError::Open {
            path: config.db_path.clone(),
            source,
        })?;
        Ok(Self { conn })
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|source| StoreError::Open {
            path: PathBuf::from(":memory:"),
            source,
        })?;
        Ok(Self { conn })
    }

    pub fn create_table(&self) -> Result<(), StoreError> {
        let _span = info_span!("create_table").entered();
        self.conn
            .execute_batch(CREATE_TABLE_SQL)
            .map_err(StoreError::Schema)
    }

    /// All rows of `foo`, ordered by id.
    pub fn records(&self) -> Result<Vec<Record>, StoreError> {
        let _span = info_span!("select_all").entered();
        let mut stmt = self.conn.prepare(SELECT_ALL_SQL)?;
        collect_records(&mut stmt, params![])
    }

    /// Rows whose id is one of `ids`, ordered by id.
    pub fn records_with_ids(&self, ids: &[i64]) -> Result<Vec<Record>, StoreError> {
        let _span = info_span!("select_in", ids = ids.len()).entered();
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!("SELECT id, name FROM foo WHERE id IN ({placeholders}) ORDER BY id");
        let mut stmt = self.conn.prepare(&sql)?;
        collect_records(&mut stmt, params_from_iter(ids.iter()))
    }

    /// Underlying connection, for setup and assertions outside the write path.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn close(self) -> Result<(), StoreError> {
        self.conn.close().map_err(|(_, e)| StoreError::Query(e))
    }
}

fn collect_records<P: rusqlite::Params>(
    stmt: &mut Statement<'_>,
    params: P,
) -> Result<Vec<Record>, StoreError> {
    let rows = stmt.query_map(params, Record::from_row)?;
    let records = rows.collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(records)
}

impl Transactional for SqliteStore {
    type Tx<'tx> = Transaction<'tx>
    where
        Self: 'tx;

    fn begin(&mut self) -> rusqlite::Result<Self::Tx<'_>> {
        self.conn.transaction()
    }
}

impl<'conn> WriteTransaction for Transaction<'conn> {
    type Stmt<'stmt> = Statement<'stmt>
    where
        Self: 'stmt;

    fn prepare(&self, sql: &str) -> rusqlite::Result<Self::Stmt<'_>> {
        Connection::prepare(self, sql)
    }

    fn commit(self) -> rusqlite::Result<()> {
        Transaction::commit(self)
    }

    fn rollback(self) -> rusqlite::Result<()> {
        Transaction::rollback(self)
    }
}

impl InsertStatement for Statement<'_> {
    fn exec(&mut self, record: &Record) -> rusqlite::Result<usize> {
        self.execute(params![record.id, record.name])
    }
}
