#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Request, Response},
    Router,
};
use hmac::{Hmac, Mac};
use secrecy::SecretString;
use sha2::Sha256;

use tobacco_wishlist::{
    config::Config,
    routes,
    storage::{JsonFileStore, StorageBackend},
    telegram_auth::BotToken,
    AppState,
};

pub const BOT_TOKEN: &str = "test-bot-token";
pub const WEBHOOK_SECRET: &str = "whsec_test";
pub const INIT_DATA_HEADER: &str = "x-telegram-init-data";

pub fn test_config(dir: &Path, bot_token: Option<&str>) -> Config {
    Config {
        server_address: "127.0.0.1:0".to_string(),
        telegram_bot_token: bot_token.map(|t| BotToken::new(t).unwrap()),
        telegram_webhook_secret: Some(SecretString::from(WEBHOOK_SECRET.to_string())),
        webapp_url: Some("https://app.example.com".to_string()),
        storage_backend: StorageBackend::Json,
        storage_path: dir.join("wishlist.json"),
        // Nothing listens on the discard port.
        catalog_api_url: "http://127.0.0.1:9".to_string(),
        catalog_api_key: None,
        catalog_cache_ttl: Duration::from_secs(60),
        catalog_timeout: Duration::from_secs(2),
        wishlist_max_items: 3,
    }
}

pub async fn setup_app(bot_token: Option<&str>) -> (Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = test_config(dir.path(), bot_token);
    let store = JsonFileStore::open(&config.storage_path)
        .await
        .expect("store");
    let state = AppState::new(config, Arc::new(store)).expect("state");
    (routes::router(state), dir)
}

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Signs decoded key/value pairs the way a Telegram client does and returns
/// the url-encoded init-data string.
pub fn sign_init_data(bot_token: &str, pairs: &[(&str, &str)]) -> String {
    let mut sorted: Vec<_> = pairs.to_vec();
    sorted.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
    let check_string = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("\n");

    let mut secret = Hmac::<Sha256>::new_from_slice(b"WebAppData").unwrap();
    secret.update(bot_token.as_bytes());
    let secret_key = secret.finalize().into_bytes();

    let mut mac = Hmac::<Sha256>::new_from_slice(&secret_key).unwrap();
    mac.update(check_string.as_bytes());
    let hash = hex::encode(mac.finalize().into_bytes());

    let mut parts: Vec<String> = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect();
    parts.push(format!("hash={}", hash));
    parts.join("&")
}

pub fn user_json(id: i64) -> String {
    format!(r#"{{"id":{},"first_name":"Test","username":"testuser"}}"#, id)
}

pub fn valid_init_data(user_id: i64) -> String {
    sign_init_data(
        BOT_TOKEN,
        &[
            ("user", &user_json(user_id)),
            ("auth_date", &now().to_string()),
            ("query_id", "AAHdF6IQAAAAAN0XohDhrOrc"),
        ],
    )
}

pub fn get(uri: &str, init_data: Option<&str>) -> Request<Body> {
    request("GET", uri, init_data, None)
}

pub fn request(
    method: &str,
    uri: &str,
    init_data: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(init_data) = init_data {
        builder = builder.header(INIT_DATA_HEADER, init_data);
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
