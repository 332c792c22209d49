use std::fmt;

use chrono::{DateTime, Local};

use crate::view_model::LoadState;
use crate::{Category, Product};

/// Issuance counter for load requests. `RequestToken::default()` means nothing was issued yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No response, timeout, or non-success status.
    Network,
    /// Malformed or internally inconsistent payload.
    Parse,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Network => write!(f, "network error"),
            ErrorKind::Parse => write!(f, "parse error"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    /// No request issued yet.
    #[default]
    Idle,
    /// The current token's request is outstanding.
    Loading,
    /// The current token's request succeeded.
    Ready,
    /// The current token's request failed; earlier products stay visible.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    category: Category,
    current_token: RequestToken,
    products: Vec<Product>,
    last_updated_at: Option<DateTime<Local>>,
    last_error: Option<ErrorKind>,
    phase: LoadPhase,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> LoadState {
        LoadState {
            current_category: self.category,
            products: self.products.clone(),
            is_loading: self.phase == LoadPhase::Loading,
            last_updated_at: self.last_updated_at,
            last_error: self.last_error,
            phase: self.phase,
            current_token: self.current_token,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn current_token(&self) -> RequestToken {
        self.current_token
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.phase != LoadPhase::Idle && token == self.current_token
    }

    /// Returns whether the snapshot changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Issues a new token for `category`; any outstanding token becomes stale.
    pub(crate) fn begin_load(&mut self, category: Category) -> RequestToken {
        let token = self.current_token.next();
        self.current_token = token;
        self.category = category;
        self.phase = LoadPhase::Loading;
        self.dirty = true;
        token
    }

    /// Applies a successful result. Returns `false` (and changes nothing) for stale tokens.
    pub(crate) fn apply_success(
        &mut self,
        token: RequestToken,
        products: Vec<Product>,
        completed_at: DateTime<Local>,
    ) -> bool {
        if !self.is_current(token) || self.phase != LoadPhase::Loading {
            return false;
        }
        self.products = products;
        self.last_updated_at = Some(completed_at);
        self.last_error = None;
        self.phase = LoadPhase::Ready;
        self.dirty = true;
        true
    }

    /// Records a failure without touching products or the update time.
    pub(crate) fn apply_failure(&mut self, token: RequestToken, kind: ErrorKind) -> bool {
        if !self.is_current(token) || self.phase != LoadPhase::Loading {
            return false;
        }
        self.last_error = Some(kind);
        self.phase = LoadPhase::Failed;
        self.dirty = true;
        true
    }
}
