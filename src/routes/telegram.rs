use axum::{extract::State, http::HeaderMap, response::IntoResponse, Json};
use secrecy::ExposeSecret;
use serde_json::json;
use subtle::ConstantTimeEq;

use crate::{
    dto::telegram_dto::TelegramUpdate,
    error::{Error, Result},
    telegram_auth::AuthError,
    AppState,
};

pub const WEBHOOK_SECRET_HEADER: &str = "x-telegram-bot-api-secret-token";

#[axum::debug_handler]
pub async fn handle_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(update): Json<TelegramUpdate>,
) -> Result<impl IntoResponse> {
    verify_secret(&state, &headers)?;
    let Some(api) = state.telegram_api.as_ref() else {
        return Err(AuthError::MissingBotToken.into());
    };

    tracing::info!(update_id = update.update_id, "Received Telegram webhook update");
    if let Some(reply) = state.bot.handle_update(&update).await {
        // The update is acknowledged even when the reply cannot be delivered.
        if let Err(e) = api.send_message(&reply).await {
            tracing::warn!(error = %e, chat_id = reply.chat_id, "Failed to deliver bot reply");
        }
    }

    Ok(Json(json!({ "ok": true })))
}

fn verify_secret(state: &AppState, headers: &HeaderMap) -> Result<()> {
    let Some(expected) = state.config.telegram_webhook_secret.as_ref() else {
        return Ok(());
    };
    let Some(secret_hdr) = headers.get(WEBHOOK_SECRET_HEADER) else {
        return Err(Error::Unauthorized("missing_webhook_secret".into()));
    };
    let provided = secret_hdr
        .to_str()
        .map_err(|_| Error::Unauthorized("invalid_secret_header".into()))?;
    if ConstantTimeEq::ct_eq(provided.as_bytes(), expected.expose_secret().as_bytes()).into() {
        Ok(())
    } else {
        Err(Error::Unauthorized("invalid_webhook_secret".into()))
    }
}
