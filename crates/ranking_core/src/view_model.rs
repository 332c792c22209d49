use chrono::{DateTime, Local};

use crate::{Category, ErrorKind, LoadPhase, Product, RequestToken};

/// Read-only snapshot handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadState {
    pub current_category: Category,
    pub products: Vec<Product>,
    pub is_loading: bool,
    pub last_updated_at: Option<DateTime<Local>>,
    pub last_error: Option<ErrorKind>,
    pub phase: LoadPhase,
    pub current_token: RequestToken,
}

impl LoadState {
    /// Update time in the `H:MM:SS` form shown in the header.
    pub fn last_updated_label(&self) -> Option<String> {
        self.last_updated_at
            .map(|at| at.format("%-H:%M:%S").to_string())
    }
}
