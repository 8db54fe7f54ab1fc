//! Prints an `INSERT` statement granting the superuser permission set.
//!
//! This binary delegates to `grant_sql::cli` for help, settings resolution,
//! rendering and error reporting, keeping the behaviour testable without
//! spawning a process. Logs go to stderr so stdout carries only SQL.
//!
//! # Examples
//! ```sh
//! cargo run -p grant-sql > grant_superuser.sql
//! GRANT_SQL_SEED=2026 cargo run -p grant-sql -- --output seed/grants.sql
//! ```

use std::env;
use std::io;
use std::process::ExitCode;

use grant_sql::cli::{execute, load_settings, write_error};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let result =
        load_settings(env::args_os()).and_then(|outcome| execute(&outcome, io::stdout().lock()));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            write_error(&err, io::stderr().lock());
            ExitCode::FAILURE
        }
    }
}
