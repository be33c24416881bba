// Store that records every call it receives and fails on demand.
#![allow(dead_code)]

use std::cell::RefCell;

use rusqlite::ffi;
use rust_sqlite_tx::{InsertStatement, Record, Transactional, WriteTransaction, INSERT_FOO_SQL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Begin,
    Prepare,
    Exec(i64),
    Commit,
    Rollback,
}

#[derive(Default)]
pub struct FakeStore {
    calls: RefCell<Vec<Step>>,
    fail_at: Vec<Step>,
}

impl FakeStore {
    pub fn failing_at(steps: &[Step]) -> Self {
        Self {
            calls: RefCell::default(),
            fail_at: steps.to_vec(),
        }
    }

    fn call(&self, step: Step) -> rusqlite::Result<()> {
        self.calls.borrow_mut().push(step);
        if self.fail_at.contains(&step) {
            Err(injected())
        } else {
            Ok(())
        }
    }

    pub fn calls(&self) -> Vec<Step> {
        self.calls.borrow().clone()
    }
}

fn injected() -> rusqlite::Error {
    rusqlite::Error::SqliteFailure(
        ffi::Error::new(ffi::SQLITE_BUSY),
        Some("injected failure".to_string()),
    )
}

pub struct FakeTx<'a> {
    store: &'a FakeStore,
}

pub struct FakeStmt<'a> {
    store: &'a FakeStore,
}

impl Transactional for FakeStore {
    type Tx<'tx> = FakeTx<'tx>
    where
        Self: 'tx;

    fn begin(&mut self) -> rusqlite::Result<Self::Tx<'_>> {
        self.call(Step::Begin)?;
        Ok(FakeTx { store: &*self })
    }
}

impl<'a> WriteTransaction for FakeTx<'a> {
    type Stmt<'stmt> = FakeStmt<'stmt>
    where
        Self: 'stmt;

    fn prepare(&self, sql: &str) -> rusqlite::Result<Self::Stmt<'_>> {
        assert_eq!(sql, INSERT_FOO_SQL);
        self.store.call(Step::Prepare)?;
        Ok(FakeStmt { store: self.store })
    }

    fn commit(self) -> rusqlite::Result<()> {
        self.store.call(Step::Commit)
    }

    fn rollback(self) -> rusqlite::Result<()> {
        self.store.call(Step::Rollback)
    }
}

impl InsertStatement for FakeStmt<'_> {
    fn exec(&mut self, record: &Record) -> rusqlite::Result<usize> {
        self.store.call(Step::Exec(record.id))?;
        Ok(1)
    }
}
