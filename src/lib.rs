pub mod bot;
pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod storage;
pub mod telegram_auth;
pub mod utils;

use std::sync::Arc;

use crate::bot::BotService;
use crate::config::Config;
use crate::error::Result;
use crate::services::{
    catalog_service::CatalogService, telegram_api::TelegramApi,
    wishlist_service::WishlistService,
};
use crate::storage::KeyValueStore;
use crate::telegram_auth::InitDataAuthenticator;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// `None` when no bot token is configured.
    pub authenticator: Option<Arc<InitDataAuthenticator>>,
    pub store: Arc<dyn KeyValueStore>,
    pub wishlist_service: WishlistService,
    pub catalog_service: CatalogService,
    pub bot: BotService,
    pub telegram_api: Option<TelegramApi>,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let authenticator = config
            .telegram_bot_token
            .as_ref()
            .map(InitDataAuthenticator::new)
            .transpose()?
            .map(Arc::new);

        let http_client = reqwest::Client::builder()
            .timeout(config.catalog_timeout)
            .build()?;
        let telegram_api = config
            .telegram_bot_token
            .clone()
            .map(|token| TelegramApi::new(http_client, token));

        let wishlist_service = WishlistService::new(store.clone(), config.wishlist_max_items);
        let catalog_service = CatalogService::new(&config)?;
        let bot = BotService::new(
            wishlist_service.clone(),
            catalog_service.clone(),
            config.webapp_url.clone(),
        );

        Ok(Self {
            config: Arc::new(config),
            authenticator,
            store,
            wishlist_service,
            catalog_service,
            bot,
            telegram_api,
        })
    }
}
