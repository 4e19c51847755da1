use axum::{response::IntoResponse, Json};
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};

use crate::{
    dto::{
        catalog_dto::{SearchResponse, SearchResultItem},
        wishlist_dto::{
            AddWishlistItemPayload, AddWishlistItemResponse, ClearWishlistResponse,
            WishlistResponse,
        },
    },
    middleware::auth::INIT_DATA_HEADER,
    models::{
        tobacco::{CatalogPage, Tobacco},
        wishlist_item::WishlistItem,
    },
    routes::{health, me, search, wishlist},
    telegram_auth::TelegramIdentity,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        me::me,
        wishlist::list_wishlist,
        wishlist::add_to_wishlist,
        wishlist::remove_from_wishlist,
        wishlist::clear_wishlist,
        search::search,
        search::get_tobacco,
    ),
    components(schemas(
        me::MeResponse,
        TelegramIdentity,
        Tobacco,
        CatalogPage,
        WishlistItem,
        AddWishlistItemPayload,
        AddWishlistItemResponse,
        WishlistResponse,
        ClearWishlistResponse,
        SearchResultItem,
        SearchResponse,
    )),
    modifiers(&InitDataSecurity),
    tags((name = "tobacco-wishlist", description = "Tobacco catalog search and wishlists for Telegram Mini App users"))
)]
pub struct ApiDoc;

struct InitDataSecurity;

impl Modify for InitDataSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "telegram_init_data",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(INIT_DATA_HEADER))),
            );
        }
    }
}

#[axum::debug_handler]
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
