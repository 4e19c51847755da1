use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::wishlist_item::WishlistItem;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddWishlistItemPayload {
    #[validate(length(min = 1, max = 128))]
    pub tobacco_id: String,
    #[validate(length(max = 200))]
    pub brand: Option<String>,
    #[validate(length(max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 500))]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WishlistResponse {
    pub items: Vec<WishlistItem>,
    pub total: usize,
}

impl From<Vec<WishlistItem>> for WishlistResponse {
    fn from(items: Vec<WishlistItem>) -> Self {
        Self {
            total: items.len(),
            items,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddWishlistItemResponse {
    pub item: WishlistItem,
    /// False when the tobacco was already on the wishlist.
    pub created: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClearWishlistResponse {
    pub removed: usize,
}
