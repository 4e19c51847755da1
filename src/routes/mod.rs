pub mod docs;
pub mod health;
pub mod me;
pub mod search;
pub mod telegram;
pub mod wishlist;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::middleware::{auth::require_telegram_auth, cors::mini_app_cors};
use crate::AppState;

pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(health::health))
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        .route("/api/webhook/telegram", post(telegram::handle_webhook));

    let mini_app = Router::new()
        .route("/api/me", get(me::me))
        .route(
            "/api/wishlist",
            get(wishlist::list_wishlist)
                .post(wishlist::add_to_wishlist)
                .delete(wishlist::clear_wishlist),
        )
        .route(
            "/api/wishlist/:tobacco_id",
            delete(wishlist::remove_from_wishlist),
        )
        .route("/api/search", get(search::search))
        .route("/api/tobaccos/:id", get(search::get_tobacco))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_telegram_auth,
        ));

    public
        .merge(mini_app)
        .with_state(state)
        .layer(mini_app_cors())
        .layer(TraceLayer::new_for_http())
}
