use chrono::{DateTime, Local};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a category tab.
    CategorySelected(crate::Category),
    /// User asked to reload the current category.
    RefreshClicked,
    /// Fetch completion for a previously issued request.
    FetchCompleted {
        token: crate::RequestToken,
        result: Result<Vec<crate::Product>, crate::ErrorKind>,
        completed_at: DateTime<Local>,
    },
}
