use crate::error::{Error, Result};
use crate::storage::StorageBackend;
use crate::telegram_auth::BotToken;
use dotenvy::dotenv;
use secrecy::SecretString;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug)]
pub struct Config {
    pub server_address: String,
    /// `None` leaves every authenticated route answering `MISSING_BOT_TOKEN`.
    pub telegram_bot_token: Option<BotToken>,
    pub telegram_webhook_secret: Option<SecretString>,
    pub webapp_url: Option<String>,
    pub storage_backend: StorageBackend,
    pub storage_path: PathBuf,
    pub catalog_api_url: String,
    pub catalog_api_key: Option<SecretString>,
    pub catalog_cache_ttl: Duration,
    pub catalog_timeout: Duration,
    pub wishlist_max_items: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let storage_backend: StorageBackend = get_env_parse_or("STORAGE_BACKEND", StorageBackend::Json)?;
        let storage_path = get_env_opt("STORAGE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| storage_backend.default_path());

        Ok(Self {
            server_address: get_env_opt("SERVER_ADDRESS").unwrap_or_else(|| "0.0.0.0:8080".to_string()),
            telegram_bot_token: get_env_opt("TELEGRAM_BOT_TOKEN")
                .map(BotToken::new)
                .transpose()?,
            telegram_webhook_secret: get_env_opt("TELEGRAM_WEBHOOK_SECRET").map(SecretString::from),
            webapp_url: get_env_opt("WEBAPP_URL"),
            storage_backend,
            storage_path,
            catalog_api_url: get_env("CATALOG_API_URL")?
                .trim_end_matches('/')
                .to_string(),
            catalog_api_key: get_env_opt("CATALOG_API_KEY").map(SecretString::from),
            catalog_cache_ttl: Duration::from_secs(get_env_parse_or("CATALOG_CACHE_TTL_SECS", 300)?),
            catalog_timeout: Duration::from_secs(get_env_parse_or("CATALOG_TIMEOUT_SECS", 10)?),
            wishlist_max_items: get_env_parse_or("WISHLIST_MAX_ITEMS", 200)?,
        })
    }

    /// One line per setting, secrets reduced to set/unset.
    pub fn redacted_summary(&self) -> Vec<String> {
        let flag = |set: bool| if set { "set" } else { "unset" };
        vec![
            format!("server_address = {}", self.server_address),
            format!("telegram_bot_token = {}", flag(self.telegram_bot_token.is_some())),
            format!(
                "telegram_webhook_secret = {}",
                flag(self.telegram_webhook_secret.is_some())
            ),
            format!("webapp_url = {}", self.webapp_url.as_deref().unwrap_or("unset")),
            format!("storage_backend = {}", self.storage_backend),
            format!("storage_path = {}", self.storage_path.display()),
            format!("catalog_api_url = {}", self.catalog_api_url),
            format!("catalog_api_key = {}", flag(self.catalog_api_key.is_some())),
            format!("catalog_cache_ttl_secs = {}", self.catalog_cache_ttl.as_secs()),
            format!("catalog_timeout_secs = {}", self.catalog_timeout.as_secs()),
            format!("wishlist_max_items = {}", self.wishlist_max_items),
        ]
    }
}

fn get_env(name: &str) -> Result<String> {
    get_env_opt(name).ok_or_else(|| Error::Config(format!("Missing environment variable: {}", name)))
}

/// Unset and blank are the same thing.
fn get_env_opt(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match get_env_opt(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        None => Ok(default),
    }
}
