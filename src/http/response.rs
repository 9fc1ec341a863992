use serde::{Deserialize, Serialize};

/// Listing-endpoint view of a product, before its detail page is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDescriptor {
    pub slug: String,
    #[serde(default)]
    pub manufacturer_name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingResponse {
    #[serde(default)]
    pub data: ListingData,
    #[serde(default)]
    pub meta: ListingMeta,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub skus: Vec<ProductDescriptor>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingMeta {
    #[serde(default)]
    pub total_count: u64,
}
