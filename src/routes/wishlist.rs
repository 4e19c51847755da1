use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};

use crate::{
    dto::wishlist_dto::{
        AddWishlistItemPayload, AddWishlistItemResponse, ClearWishlistResponse, WishlistResponse,
    },
    error::Result,
    models::wishlist_item::WishlistItem,
    telegram_auth::Authenticated,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/wishlist",
    responses(
        (status = 200, description = "Wishlist, newest first", body = WishlistResponse),
        (status = 401, description = "Init data missing, forged or expired")
    ),
    security(("telegram_init_data" = []))
)]
#[axum::debug_handler]
pub async fn list_wishlist(
    State(state): State<AppState>,
    Extension(auth): Extension<Authenticated>,
) -> Result<impl IntoResponse> {
    let items = state.wishlist_service.list(auth.user_id).await?;
    Ok(Json(WishlistResponse::from(items)))
}

#[utoipa::path(
    post,
    path = "/api/wishlist",
    request_body = AddWishlistItemPayload,
    responses(
        (status = 201, description = "Item added", body = AddWishlistItemResponse),
        (status = 200, description = "Item was already on the wishlist", body = AddWishlistItemResponse),
        (status = 400, description = "Invalid payload or wishlist is full")
    ),
    security(("telegram_init_data" = []))
)]
#[axum::debug_handler]
pub async fn add_to_wishlist(
    State(state): State<AppState>,
    Extension(auth): Extension<Authenticated>,
    Json(payload): Json<AddWishlistItemPayload>,
) -> Result<impl IntoResponse> {
    let (item, created) = state.wishlist_service.add(auth.user_id, payload).await?;
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(AddWishlistItemResponse { item, created })))
}

#[utoipa::path(
    delete,
    path = "/api/wishlist/{tobacco_id}",
    params(
        ("tobacco_id" = String, Path, description = "Catalog tobacco ID")
    ),
    responses(
        (status = 200, description = "Item removed", body = WishlistItem),
        (status = 404, description = "Item is not on the wishlist")
    ),
    security(("telegram_init_data" = []))
)]
#[axum::debug_handler]
pub async fn remove_from_wishlist(
    State(state): State<AppState>,
    Extension(auth): Extension<Authenticated>,
    Path(tobacco_id): Path<String>,
) -> Result<impl IntoResponse> {
    let removed = state
        .wishlist_service
        .remove(auth.user_id, &tobacco_id)
        .await?;
    Ok(Json(removed))
}

#[utoipa::path(
    delete,
    path = "/api/wishlist",
    responses(
        (status = 200, description = "Wishlist cleared", body = ClearWishlistResponse)
    ),
    security(("telegram_init_data" = []))
)]
#[axum::debug_handler]
pub async fn clear_wishlist(
    State(state): State<AppState>,
    Extension(auth): Extension<Authenticated>,
) -> Result<impl IntoResponse> {
    let removed = state.wishlist_service.clear(auth.user_id).await?;
    Ok(Json(ClearWishlistResponse { removed }))
}
