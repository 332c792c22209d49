use std::time::Duration;

use futures_util::StreamExt;
use ranking_core::{Category, Product};
use ranking_logging::{rank_debug, rank_trace};

use crate::payload::decode_ranking;
use crate::{FailureKind, FetchError};

pub const DEFAULT_ENDPOINT: &str =
    "https://app.rakuten.co.jp/services/api/IchibaItem/Ranking/20220601";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub endpoint: String,
    pub application_id: String,
    pub affiliate_id: Option<String>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            application_id: String::new(),
            affiliate_id: None,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 2 * 1024 * 1024,
        }
    }
}

/// One request/response exchange per call; no retries.
#[async_trait::async_trait]
pub trait RankingFetcher: Send + Sync {
    async fn fetch(&self, category: Category) -> Result<Vec<Product>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestRankingFetcher {
    settings: FetchSettings,
}

impl ReqwestRankingFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, FetchError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }

    fn request_url(&self, category: Category) -> Result<reqwest::Url, FetchError> {
        let mut url = reqwest::Url::parse(&self.settings.endpoint)
            .map_err(|err| FetchError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("applicationId", &self.settings.application_id);
            if let Some(affiliate_id) = self.settings.affiliate_id.as_deref() {
                query.append_pair("affiliateId", affiliate_id);
            }
            query
                .append_pair("genreId", category.genre_id())
                .append_pair("format", "json")
                .append_pair("formatVersion", "2");
        }
        Ok(url)
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, FetchError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, Some(content_len)));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, Some(next_len)));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl RankingFetcher for ReqwestRankingFetcher {
    async fn fetch(&self, category: Category) -> Result<Vec<Product>, FetchError> {
        let url = self.request_url(category)?;
        let client = self.build_client()?;
        // The query carries the application id; log the path only.
        rank_debug!("GET {} genreId={}", url.path(), category.genre_id());

        let response = client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let bytes = self.read_body(response).await?;
        rank_trace!("ranking body for {} is {} bytes", category, bytes.len());

        decode_ranking(&bytes).map_err(|err| FetchError::new(FailureKind::Malformed, err.to_string()))
    }
}

fn too_large(max_bytes: u64, actual: Option<u64>) -> FetchError {
    FetchError::new(
        FailureKind::TooLarge { max_bytes, actual },
        "response too large",
    )
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    // Keep the application id out of error messages.
    let err = err.without_url();
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
