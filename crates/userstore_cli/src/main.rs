//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `userstore_core` linkage and that a store can be opened.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Usage: `userstore_cli [DB_PATH]`. Without a path the default per-user
//! location is used.

use std::path::PathBuf;
use std::process::ExitCode;
use userstore_core::{SqliteUserStore, StoreLocation, UserRepository};

fn main() -> ExitCode {
    println!("userstore_core version={}", userstore_core::core_version());

    let location = match std::env::args_os().nth(1) {
        Some(path) => StoreLocation::File(PathBuf::from(path)),
        None => StoreLocation::Default,
    };

    let mut store = match SqliteUserStore::open(&location) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let result = store.fetch_all_users();
    if let Err(err) = store.close() {
        eprintln!("warning: {err}");
    }

    match result {
        Ok(users) => {
            println!("userstore_core records={}", users.len());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
