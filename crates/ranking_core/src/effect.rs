use crate::{Category, RequestToken};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the ranking for `category`; the completion must carry `token` back.
    FetchRanking {
        token: RequestToken,
        category: Category,
    },
}
