use anyhow::{bail, Context};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_POOL_SIZE: u32 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// The only origin allowed to make cross-origin requests.
    pub cors_origin: Option<String>,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    Memory,
    Sqlite { url: String, pool_size: u32 },
}

impl Config {
    /// Reads the process environment. Call `dotenv::dotenv()` first to pick
    /// up a `.env` file.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match var("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT: {port}"))?,
            None => DEFAULT_PORT,
        };

        let database_url = var("DATABASE_URL");
        let storage = match var("STORAGE").as_deref().map(str::trim) {
            Some("memory") => StorageConfig::Memory,
            Some("sqlite") => sqlite_config(database_url, var("DATABASE_POOL_SIZE"))?,
            Some(other) => bail!("Unknown STORAGE backend: {other}"),
            None if database_url.is_some() => {
                sqlite_config(database_url, var("DATABASE_POOL_SIZE"))?
            }
            None => StorageConfig::Memory,
        };

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            cors_origin: var("CORS_ORIGIN"),
            storage,
        })
    }
}

fn sqlite_config(url: Option<String>, pool_size: Option<String>) -> anyhow::Result<StorageConfig> {
    let url = url.context("DATABASE_URL not found")?;
    let pool_size = match pool_size {
        Some(size) => size
            .trim()
            .parse()
            .with_context(|| format!("Invalid DATABASE_POOL_SIZE: {size}"))?,
        None => DEFAULT_POOL_SIZE,
    };
    Ok(StorageConfig::Sqlite { url, pool_size })
}
