use rusqlite::Row;
use serde::Serialize;

/// A row of the `foo` table.
///
/// The id is supplied by the caller and is expected to be unique; the store's
/// primary key enforces that, not this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub id: i64,
    pub name: String,
}

impl Record {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// The pair the demo writes.
    pub fn sample_pair() -> (Self, Self) {
        (Self::new(1, "Cha Cha Cha"), Self::new(2, "Mambo italiano"))
    }

    /// Maps a row selected as `id, name`.
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
        })
    }
}
