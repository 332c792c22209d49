use ranking_core::Product;
use serde::Deserialize;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("invalid ranking json: {0}")]
    Json(String),
    #[error("item {position} has an empty {field}")]
    EmptyField {
        position: usize,
        field: &'static str,
    },
    #[error("rank out of sequence at item {position}: expected {expected}, found {found}")]
    RankOutOfSequence {
        position: usize,
        expected: u32,
        found: u32,
    },
}

#[derive(Debug, Deserialize)]
struct RankingResponse {
    #[serde(rename = "Items")]
    items: Vec<WireEntry>,
}

/// `formatVersion=1` wraps every item in `{"Item": {...}}`; version 2 does not.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireEntry {
    Wrapped {
        #[serde(rename = "Item")]
        item: WireItem,
    },
    Flat(WireItem),
}

impl WireEntry {
    fn into_item(self) -> WireItem {
        match self {
            WireEntry::Wrapped { item } | WireEntry::Flat(item) => item,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireItem {
    rank: u32,
    item_name: String,
    item_url: String,
    item_price: u64,
    #[serde(default)]
    medium_image_urls: Vec<WireImage>,
    shop_name: String,
    #[serde(default)]
    affiliate_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireImage {
    Url(String),
    Object {
        #[serde(rename = "imageUrl")]
        image_url: String,
    },
}

impl WireImage {
    fn into_url(self) -> String {
        match self {
            WireImage::Url(url) | WireImage::Object { image_url: url } => url,
        }
    }
}

/// Decode a ranking response body, rejecting it whole if any item is invalid.
///
/// Items must arrive with ranks `1, 2, .., n` in that order.
pub fn decode_ranking(bytes: &[u8]) -> Result<Vec<Product>, PayloadError> {
    let response: RankingResponse =
        serde_json::from_slice(bytes).map_err(|err| PayloadError::Json(err.to_string()))?;

    response
        .items
        .into_iter()
        .map(WireEntry::into_item)
        .enumerate()
        .map(|(position, item)| into_product(position, item))
        .collect()
}

fn into_product(position: usize, item: WireItem) -> Result<Product, PayloadError> {
    let expected = u32::try_from(position + 1).unwrap_or(u32::MAX);
    if item.rank != expected {
        return Err(PayloadError::RankOutOfSequence {
            position,
            expected,
            found: item.rank,
        });
    }
    if item.item_name.trim().is_empty() {
        return Err(PayloadError::EmptyField {
            position,
            field: "itemName",
        });
    }
    if item.item_url.trim().is_empty() {
        return Err(PayloadError::EmptyField {
            position,
            field: "itemUrl",
        });
    }

    let affiliate_url = item
        .affiliate_url
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| item.item_url.clone());

    Ok(Product {
        rank: item.rank,
        name: item.item_name,
        item_url: item.item_url,
        price: item.item_price,
        image_urls: item
            .medium_image_urls
            .into_iter()
            .map(WireImage::into_url)
            .collect(),
        shop_name: item.shop_name,
        affiliate_url,
    })
}
