use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of ranking categories, in selector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Reserved genre meaning "all categories".
    #[default]
    All,
    Fashion,
    Cosmetics,
    Food,
    Sweets,
    Baby,
    Electronics,
    DailyGoods,
    Books,
    Toys,
    Interior,
    Kitchen,
    Sports,
    Gift,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl Category {
    pub const ALL_CATEGORIES: [Category; 14] = [
        Category::All,
        Category::Fashion,
        Category::Cosmetics,
        Category::Food,
        Category::Sweets,
        Category::Baby,
        Category::Electronics,
        Category::DailyGoods,
        Category::Books,
        Category::Toys,
        Category::Interior,
        Category::Kitchen,
        Category::Sports,
        Category::Gift,
    ];

    /// Genre id sent to the ranking API.
    pub fn genre_id(self) -> &'static str {
        match self {
            Category::All => "0",
            Category::Fashion => "100371",
            Category::Cosmetics => "100939",
            Category::Food => "100227",
            Category::Sweets => "100236",
            Category::Baby => "100533",
            Category::Electronics => "562630",
            Category::DailyGoods => "215783",
            Category::Books => "100033",
            Category::Toys => "101164",
            Category::Interior => "100804",
            Category::Kitchen => "558944",
            Category::Sports => "101070",
            Category::Gift => "101438",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::All => "総合",
            Category::Fashion => "ファッション",
            Category::Cosmetics => "コスメ",
            Category::Food => "食品",
            Category::Sweets => "スイーツ",
            Category::Baby => "ベビー",
            Category::Electronics => "家電",
            Category::DailyGoods => "日用品",
            Category::Books => "本・雑誌",
            Category::Toys => "おもちゃ",
            Category::Interior => "インテリア",
            Category::Kitchen => "キッチン",
            Category::Sports => "スポーツ",
            Category::Gift => "ギフト",
        }
    }

    /// Icon hint for renderers (Font Awesome class name).
    pub fn icon(self) -> &'static str {
        match self {
            Category::All => "fa-trophy",
            Category::Fashion => "fa-tshirt",
            Category::Cosmetics => "fa-magic",
            Category::Food => "fa-utensils",
            Category::Sweets => "fa-cookie",
            Category::Baby => "fa-baby",
            Category::Electronics => "fa-laptop",
            Category::DailyGoods => "fa-shopping-cart",
            Category::Books => "fa-book",
            Category::Toys => "fa-gamepad",
            Category::Interior => "fa-couch",
            Category::Kitchen => "fa-blender",
            Category::Sports => "fa-running",
            Category::Gift => "fa-gift",
        }
    }

    /// Lower-case ASCII name, matching the serde representation.
    pub fn slug(self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Fashion => "fashion",
            Category::Cosmetics => "cosmetics",
            Category::Food => "food",
            Category::Sweets => "sweets",
            Category::Baby => "baby",
            Category::Electronics => "electronics",
            Category::DailyGoods => "daily_goods",
            Category::Books => "books",
            Category::Toys => "toys",
            Category::Interior => "interior",
            Category::Kitchen => "kitchen",
            Category::Sports => "sports",
            Category::Gift => "gift",
        }
    }

    pub fn from_genre_id(genre_id: &str) -> Option<Category> {
        Self::ALL_CATEGORIES
            .into_iter()
            .find(|category| category.genre_id() == genre_id)
    }

    fn from_slug(slug: &str) -> Option<Category> {
        let normalized = slug.replace('-', "_");
        Self::ALL_CATEGORIES
            .into_iter()
            .find(|category| category.slug().eq_ignore_ascii_case(&normalized))
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Accepts a slug (`daily-goods`, `DAILY_GOODS`) or a genre id (`215783`).
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        Self::from_slug(raw)
            .or_else(|| Self::from_genre_id(raw))
            .ok_or_else(|| UnknownCategory(raw.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}
