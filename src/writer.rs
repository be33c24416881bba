//! Transactional writer: two inserts, committed together or not at all.
//!
//! ```text
//! Idle -> TxOpen -> A inserted -> B inserted -> Committed
//!            \           \            \
//!             +-----------+------------+--> RolledBack
//!                                     commit error --> CommitFailed
//! ```
//!
//! A failed commit is reported as is. No rollback follows it: once SQLite has
//! been asked to commit, the outcome is the store's to decide.

use tracing::{debug, field, info, info_span, instrument, warn};

use crate::error::TxError;
use crate::record::Record;
use crate::store::{InsertStatement, Transactional, WriteTransaction};

/// The only statement the writer issues.
pub const INSERT_FOO_SQL: &str = "insert into foo(id, name) values(?1, ?2)";

/// Inserts `a` then `b` in a single transaction.
///
/// `b` is never attempted if `a` fails. Any failure before commit rolls the
/// transaction back and returns the first error. Reporting that error is
/// left to the caller.
#[instrument(name = "insert_pair", skip_all, fields(a = a.id, b = b.id))]
pub fn insert_pair<S>(store: &mut S, a: &Record, b: &Record) -> Result<(), TxError>
where
    S: Transactional,
{
    let tx = store.begin().map_err(TxError::TransactionStart)?;
    debug!("transaction open");

    if let Err(e) = write_both(&tx, a, b) {
        roll_back(tx, &e);
        return Err(e);
    }

    tx.commit().map_err(TxError::Commit)?;
    info!("committed");
    Ok(())
}

// The statement borrows the transaction and is released on return, before
// the transaction is committed or rolled back.
fn write_both<T: WriteTransaction>(tx: &T, a: &Record, b: &Record) -> Result<(), TxError> {
    let mut stmt = tx.prepare(INSERT_FOO_SQL).map_err(TxError::Prepare)?;
    insert_one(&mut stmt, a)?;
    insert_one(&mut stmt, b)
}

fn insert_one<S: InsertStatement>(stmt: &mut S, record: &Record) -> Result<(), TxError> {
    let span = info_span!("insert", id = record.id, status = field::Empty);
    let _enter = span.enter();
    match stmt.exec(record) {
        Ok(_) => {
            span.record("status", "ok");
            Ok(())
        }
        Err(source) => {
            span.record("status", "error");
            warn!(error = %source, "insert failed");
            Err(TxError::Insert {
                id: record.id,
                source,
            })
        }
    }
}

fn roll_back<T: WriteTransaction>(tx: T, cause: &TxError) {
    match tx.rollback() {
        Ok(()) => debug!(cause = %cause, "rolled back"),
        // the first error still wins
        Err(e) => warn!(error = %e, cause = %cause, "rollback failed"),
    }
}
