//! Store selection for the CLI

use std::path::Path;

use anyhow::{bail, Context, Result};
use lightbnb_db::{DbConfig, MemoryStore, PgStore, Store};

/// The store a command runs against
pub enum Backend {
    Postgres(PgStore),
    Memory(MemoryStore),
}

impl Backend {
    /// Open the fixture store when `memory` is given, otherwise connect to
    /// PostgreSQL using the config file with `database_url` on top.
    pub async fn open(database_url: Option<&str>, memory: Option<&Path>) -> Result<Self> {
        if let Some(dir) = memory {
            tracing::debug!(dir = %dir.display(), "using memory store");
            let store = MemoryStore::from_json_dir(dir)
                .with_context(|| format!("Failed to load fixtures from {}", dir.display()))?;
            return Ok(Self::Memory(store));
        }

        let mut config = DbConfig::load().context("Failed to load database config")?;
        if let Some(url) = database_url {
            config.database_url = Some(url.to_string());
        }
        let store = PgStore::connect(&config)
            .await
            .context("Failed to connect to PostgreSQL")?;
        Ok(Self::Postgres(store))
    }

    pub fn store(&self) -> &dyn Store {
        match self {
            Self::Postgres(store) => store,
            Self::Memory(store) => store,
        }
    }

    pub fn postgres(&self) -> Result<&PgStore> {
        match self {
            Self::Postgres(store) => Ok(store),
            Self::Memory(_) => bail!("this command requires PostgreSQL; drop --memory"),
        }
    }

    /// Drain the pool, if any.
    pub async fn shutdown(self) {
        if let Self::Postgres(store) = self {
            store.close().await;
        }
    }
}
