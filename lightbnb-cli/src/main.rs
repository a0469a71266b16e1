//! lightbnb CLI - operator tool for the LightBnB query layer
//!
//! Runs the store operations from the command line and prints rows as JSON:
//! - user lookup and registration (`user`)
//! - guest reservations (`reservations`)
//! - listing search and insertion (`properties`)
//! - schema creation (`migrate`)
//!
//! Connects to PostgreSQL by default; `--memory <dir>` serves the same
//! commands from JSON fixtures instead.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod backend;
mod commands;
mod tracing_setup;

use backend::Backend;

#[derive(Parser, Debug)]
#[command(
    name = "lightbnb",
    author,
    version,
    about = "Query users, reservations and property listings in the LightBnB database"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// PostgreSQL connection string (overrides ~/.lightbnb/config.toml)
    #[arg(long, global = true, env = "DATABASE_URL", hide_env_values = true)]
    database_url: Option<String>,

    /// Serve from JSON fixtures in this directory instead of PostgreSQL
    #[arg(long, global = true, value_name = "DIR")]
    memory: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the LightBnB tables if they don't exist
    Migrate,
    /// Look up or register users
    User(commands::user::UserArgs),
    /// List reservations made by a guest
    Reservations(commands::reservations::ReservationsArgs),
    /// Search or add property listings
    Properties(commands::properties::PropertiesArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env files (~/.lightbnb/.env, then cwd) before clap reads env vars
    if let Some(home) = dirs::home_dir() {
        let _ = dotenvy::from_path(home.join(".lightbnb/.env"));
    }
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    let backend = Backend::open(cli.database_url.as_deref(), cli.memory.as_deref()).await?;

    let outcome = match cli.command {
        Commands::Migrate => commands::run_migrate(&backend).await,
        Commands::User(args) => commands::user::run_user(backend.store(), args).await,
        Commands::Reservations(args) => {
            commands::reservations::run_reservations(backend.store(), args).await
        }
        Commands::Properties(args) => {
            commands::properties::run_properties(backend.store(), args).await
        }
    };

    backend.shutdown().await;
    outcome
}
