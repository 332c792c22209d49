use serde::{Deserialize, Serialize};

/// One ranked item, already validated by the fetcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// 1-based position in the ranking.
    pub rank: u32,
    pub name: String,
    pub item_url: String,
    /// Price in yen.
    pub price: u64,
    pub image_urls: Vec<String>,
    pub shop_name: String,
    /// Affiliate link; equals `item_url` when the API supplied none.
    pub affiliate_url: String,
}

impl Product {
    pub fn primary_image(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }
}
