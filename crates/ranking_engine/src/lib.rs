//! Ranking engine: HTTP fetcher, payload validation and the load controller runtime.
mod controller;
mod engine;
mod fetch;
mod payload;
mod types;

pub use controller::LoadController;
pub use engine::EngineHandle;
pub use fetch::{FetchSettings, RankingFetcher, ReqwestRankingFetcher, DEFAULT_ENDPOINT};
pub use payload::{decode_ranking, PayloadError};
pub use types::{EngineEvent, FailureKind, FetchError};
