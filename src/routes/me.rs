use axum::{response::IntoResponse, Extension, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::Result;
use crate::telegram_auth::{Authenticated, TelegramIdentity};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user_id: i64,
    pub user: TelegramIdentity,
    pub auth_date: i64,
}

#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "The authenticated Telegram user", body = MeResponse),
        (status = 401, description = "Init data missing, forged or expired")
    ),
    security(("telegram_init_data" = []))
)]
#[axum::debug_handler]
pub async fn me(Extension(auth): Extension<Authenticated>) -> Result<impl IntoResponse> {
    Ok(Json(MeResponse {
        user_id: auth.user_id,
        user: auth.identity,
        auth_date: auth.auth_date,
    }))
}
