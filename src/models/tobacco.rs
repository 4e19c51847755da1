use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

// The catalog has returned ids both as numbers and as strings.
fn deserialize_id_flexible<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdOrInt {
        Int(i64),
        String(String),
    }

    match IdOrInt::deserialize(deserializer)? {
        IdOrInt::Int(i) => Ok(i.to_string()),
        IdOrInt::String(s) if !s.trim().is_empty() => Ok(s),
        IdOrInt::String(_) => Err(serde::de::Error::custom("empty tobacco id")),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tobacco {
    #[serde(deserialize_with = "deserialize_id_flexible")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub line: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub strength: Option<String>,
    #[serde(default)]
    pub flavors: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

/// One page of catalog search results as the upstream returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPage {
    #[serde(default)]
    pub items: Vec<Tobacco>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "first_page")]
    pub page: u32,
}

fn first_page() -> u32 {
    1
}
