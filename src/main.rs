use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rust_sqlite_tx::{
    insert_pair, reset_database_file, telemetry, Record, SqliteConfig, SqliteStore, StoreError,
};
use tracing::{error, info, info_span};

/// Opens a fresh SQLite file, writes two records in one transaction and reads them back.
#[derive(Debug, Parser)]
#[command(name = "sqlite-tx-demo", version, about)]
struct Cli {
    /// Database file. Removed before the run.
    #[arg(long, env = "FOO_DB_PATH", default_value = "./foo.db")]
    db_path: PathBuf,

    /// Keep the database file after the run.
    #[arg(long)]
    keep: bool,

    /// Print selected records as JSON lines on stdout.
    #[arg(long)]
    json: bool,

    /// Tracing filter directive.
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    log_filter: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init(&cli.log_filter)?;

    let config = SqliteConfig::new(&cli.db_path);
    reset_database_file(&config.db_path)?;

    let result = run(&cli, &config);

    if cli.keep {
        return result;
    }
    finish(result, reset_database_file(&config.db_path))
}

/// Returns the run's error over a cleanup error; the latter is only logged then.
fn finish(result: Result<()>, cleanup: Result<(), StoreError>) -> Result<()> {
    match (result, cleanup) {
        (result, Ok(())) => result,
        (Ok(()), Err(e)) => Err(e.into()),
        (Err(e), Err(cleanup_err)) => {
            error!(error = %cleanup_err, "failed to remove database file");
            Err(e)
        }
    }
}

fn run(cli: &Cli, config: &SqliteConfig) -> Result<()> {
    let _span = info_span!("sqlite_tx_demo").entered();

    let mut store = SqliteStore::open(config)?;
    store.create_table().context("failed to create foo table")?;

    let (a, b) = Record::sample_pair();
    if let Err(e) = insert_pair(&mut store, &a, &b) {
        error!(error = %e, "error with double insert");
    }

    let all = store.records().context("failed to select all records")?;
    report(cli, &all)?;

    let selected = store
        .records_with_ids(&[2])
        .context("failed to select records by id")?;
    report(cli, &selected)?;

    store.close()?;
    Ok(())
}

fn report(cli: &Cli, records: &[Record]) -> Result<()> {
    for record in records {
        if cli.json {
            println!("{}", serde_json::to_string(record)?);
        } else {
            info!(id = record.id, name = %record.name, "record");
        }
    }
    Ok(())
}
