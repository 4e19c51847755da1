use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Extension, Json,
};

use crate::{
    dto::catalog_dto::{SearchQuery, SearchResponse, SearchResultItem},
    error::Result,
    services::catalog_service::normalize_query,
    models::tobacco::Tobacco,
    telegram_auth::Authenticated,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Catalog matches annotated with wishlist membership", body = SearchResponse),
        (status = 400, description = "Empty or overlong query"),
        (status = 502, description = "Catalog is unavailable")
    ),
    security(("telegram_init_data" = []))
)]
#[axum::debug_handler]
pub async fn search(
    State(state): State<AppState>,
    Extension(auth): Extension<Authenticated>,
    Query(params): Query<SearchQuery>,
) -> Result<impl IntoResponse> {
    let query = normalize_query(params.q.as_deref().unwrap_or_default())?;
    let (page, limit) = state
        .catalog_service
        .search(&query, params.page, params.limit)
        .await?;
    let saved = state.wishlist_service.tobacco_ids(auth.user_id).await?;

    let items = page
        .items
        .into_iter()
        .map(|tobacco| SearchResultItem {
            in_wishlist: saved.contains(&tobacco.id),
            tobacco,
        })
        .collect();

    Ok(Json(SearchResponse {
        query,
        items,
        total: page.total,
        page: page.page,
        limit,
    }))
}

#[utoipa::path(
    get,
    path = "/api/tobaccos/{id}",
    params(
        ("id" = String, Path, description = "Catalog tobacco ID")
    ),
    responses(
        (status = 200, description = "Tobacco details", body = Tobacco),
        (status = 404, description = "Unknown tobacco"),
        (status = 502, description = "Catalog is unavailable")
    ),
    security(("telegram_init_data" = []))
)]
#[axum::debug_handler]
pub async fn get_tobacco(
    State(state): State<AppState>,
    Extension(_auth): Extension<Authenticated>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let tobacco = state.catalog_service.get_tobacco(&id).await?;
    Ok(Json(tobacco))
}
