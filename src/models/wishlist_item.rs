use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub tobacco_id: String,
    pub brand: Option<String>,
    pub name: Option<String>,
    pub note: Option<String>,
    pub added_at: DateTime<Utc>,
}
