//! Transactional SQLite writes for the Runar ecosystem.
//!
//! # Intention
//!
//! - Write two related records atomically: both land or neither does.
//! - Keep the write path generic over the database-access collaborator so the
//!   failure discipline can be exercised without a real database.
//!
//! # Architectural Boundaries
//!
//! - `store` declares the collaborator traits, `sqlite` implements them with
//!   rusqlite. `writer` only talks to the traits.
//! - No filesystem side effects in the write path. Resetting the database
//!   file is an explicit setup step owned by the caller.

pub mod error;
pub mod record;
pub mod sqlite;
pub mod store;
pub mod telemetry;
pub mod writer;

pub use error::{StoreError, TxError, TxOutcome};
pub use record::Record;
pub use sqlite::{reset_database_file, SqliteConfig, SqliteStore};
pub use store::{InsertStatement, Transactional, WriteTransaction};
pub use writer::{insert_pair, INSERT_FOO_SQL};
