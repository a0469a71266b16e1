//! Command implementations for the lightbnb CLI

pub mod properties;
pub mod reservations;
pub mod user;

use anyhow::Result;
use serde::Serialize;

use crate::backend::Backend;

/// Pretty-print a value as JSON on stdout.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub async fn run_migrate(backend: &Backend) -> Result<()> {
    backend.postgres()?.migrate().await?;
    eprintln!("Schema is up to date");
    Ok(())
}
