use serde::{Deserialize, Serialize};

// -------------------------
// Records
// -------------------------

/// One listing found on the source page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub title: Option<String>,
    /// Absolute detail url; dedup key.
    pub link: String,
    pub image: Option<String>,
    pub price: Option<f64>,
    pub price_text: Option<String>,
    pub rarity: Option<String>,
    pub popularity: Option<String>,
    pub rating: Option<String>,
    pub external_market_link: Option<String>,
}

impl ItemRecord {
    /// Record carrying only what the keyword fallback can see.
    pub fn minimal(title: String, link: String, external_market_link: Option<String>) -> Self {
        Self {
            title: Some(title),
            link,
            image: None,
            price: None,
            price_text: None,
            rarity: None,
            popularity: None,
            rating: None,
            external_market_link,
        }
    }
}

// -------------------------
// Request / Response Types
// -------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeResult {
    pub count: usize,
    pub external_market_link: Option<String>,
    pub items: Vec<ItemRecord>,
}

impl ScrapeResult {
    pub fn new(external_market_link: Option<String>, items: Vec<ItemRecord>) -> Self {
        Self {
            count: items.len(),
            external_market_link,
            items,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Price,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDir {
    Asc,
    #[default]
    Desc,
}

/// Body of `POST /api/export`: the client's current result set plus its view.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReq {
    #[serde(default)]
    pub items: Vec<ItemRecord>,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub sort_key: SortKey,
    #[serde(default)]
    pub sort_dir: SortDir,
}
