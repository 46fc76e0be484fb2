//! Store configuration.
//!
//! Read from the environment:
//!
//! - `USE_PERSISTENT_STORES`: `true`/`1` selects Postgres (default: in-memory)
//! - `DATABASE_URL`: required when persistent
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default: 5)
//! - `RUN_MIGRATIONS`: apply pending migrations on connect (default: false)

use std::sync::Arc;

use anyhow::{Context, bail};
use serde::Deserialize;
use tracing::info;

use crate::dao::{InMemoryOrderTableDao, OrderTableDao, PostgresOrderTableDao};

fn default_max_connections() -> u32 {
    5
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub use_persistent_stores: bool,
    #[serde(default)]
    pub database_url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default)]
    pub run_migrations: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            use_persistent_stores: false,
            database_url: None,
            max_connections: default_max_connections(),
            run_migrations: false,
        }
    }
}

impl StoreConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source (the environment, a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let use_persistent_stores = match lookup("USE_PERSISTENT_STORES") {
            Some(value) => parse_flag("USE_PERSISTENT_STORES", &value)?,
            None => false,
        };
        let run_migrations = match lookup("RUN_MIGRATIONS") {
            Some(value) => parse_flag("RUN_MIGRATIONS", &value)?,
            None => false,
        };
        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(value) => value
                .trim()
                .parse()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS is not a number: {value}"))?,
            None => default_max_connections(),
        };

        let config = Self {
            use_persistent_stores,
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            max_connections,
            run_migrations,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.use_persistent_stores && self.database_url.is_none() {
            bail!("DATABASE_URL must be set when USE_PERSISTENT_STORES=true");
        }
        if self.max_connections == 0 {
            bail!("DATABASE_MAX_CONNECTIONS must be at least 1");
        }
        Ok(())
    }
}

fn parse_flag(name: &str, value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        other => bail!("{name} must be a boolean, got {other:?}"),
    }
}

/// Build the `order_table` store selected by `config`.
pub async fn connect_order_table_dao(
    config: &StoreConfig,
) -> anyhow::Result<Arc<dyn OrderTableDao>> {
    config.validate()?;

    if !config.use_persistent_stores {
        info!("using in-memory order table store");
        return Ok(Arc::new(InMemoryOrderTableDao::new()));
    }

    let url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set when USE_PERSISTENT_STORES=true")?;
    let dao = PostgresOrderTableDao::connect(url, config.max_connections)
        .await
        .context("failed to connect to Postgres")?;
    if config.run_migrations {
        dao.migrate().await.context("failed to run migrations")?;
    }

    info!(max_connections = config.max_connections, "using Postgres order table store");
    Ok(Arc::new(dao))
}
