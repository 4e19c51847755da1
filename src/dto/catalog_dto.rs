use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::tobacco::Tobacco;

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Free-text search over brand and flavor names.
    pub q: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultItem {
    #[serde(flatten)]
    pub tobacco: Tobacco,
    pub in_wishlist: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub query: String,
    pub items: Vec<SearchResultItem>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}
