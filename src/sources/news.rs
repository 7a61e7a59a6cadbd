//! CryptoCompare news feed fetcher

use crate::{constants::NEWS_URL, error::FetchError, feed::NewsFeed, types::NewsItem};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Wrapper around the CryptoCompare news payload; the article array sits
/// under a capitalized `"Data"` key.
#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(rename = "Data")]
    data: Vec<NewsItem>,
}

/// CryptoCompare news data source
pub struct CryptoCompareNewsSource {
    client: Client,
}

impl CryptoCompareNewsSource {
    pub fn new() -> Result<Self, FetchError> {
        Ok(Self {
            client: super::build_client()?,
        })
    }
}

#[async_trait]
impl NewsFeed for CryptoCompareNewsSource {
    async fn fetch_news(&self) -> Result<Vec<NewsItem>, FetchError> {
        let response = super::get_checked(&self.client, NEWS_URL).await?;

        let wrapper: NewsResponse = response
            .json()
            .await
            .map_err(|e| FetchError::decode(format!("CryptoCompare news payload: {e}")))?;

        tracing::debug!(count = wrapper.data.len(), "Fetched news articles");
        Ok(wrapper.data)
    }
}
