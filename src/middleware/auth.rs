use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::Error;
use crate::telegram_auth::AuthError;
use crate::AppState;

/// Header the Mini App client puts its raw `initData` string in.
pub const INIT_DATA_HEADER: &str = "x-telegram-init-data";
/// Query-string fallback for clients that cannot set headers.
pub const INIT_DATA_QUERY_PARAM: &str = "initData";

/// Gate for every Mini App route. On success the [`Authenticated`] principal
/// is available to handlers as `Extension<Authenticated>`.
///
/// [`Authenticated`]: crate::telegram_auth::Authenticated
pub async fn require_telegram_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(authenticator) = state.authenticator.as_ref() else {
        tracing::error!("Rejecting request: TELEGRAM_BOT_TOKEN is not configured");
        return Error::from(AuthError::MissingBotToken).into_response();
    };

    let init_data = extract_init_data(&req);
    match authenticator.authenticate(init_data.as_deref()) {
        Ok(authenticated) => {
            tracing::debug!(user_id = authenticated.user_id, "Init data accepted");
            req.extensions_mut().insert(authenticated);
            next.run(req).await
        }
        Err(err) => {
            tracing::debug!(
                code = err.code(),
                stage = %err.stage(),
                path = %req.uri().path(),
                "Init data rejected"
            );
            Error::from(err).into_response()
        }
    }
}

pub fn extract_init_data(req: &Request) -> Option<String> {
    let header = req
        .headers()
        .get(INIT_DATA_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let query = req.uri().query().and_then(|query| {
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == INIT_DATA_QUERY_PARAM)
            .map(|(_, value)| value.into_owned())
    });

    select_init_data(header, query)
}

/// The header wins over the query parameter; blank values count as absent.
pub fn select_init_data(header: Option<String>, query: Option<String>) -> Option<String> {
    header
        .filter(|value| !value.trim().is_empty())
        .or_else(|| query.filter(|value| !value.trim().is_empty()))
}
