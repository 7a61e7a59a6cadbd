//! alternative.me Fear & Greed index fetcher

use crate::{
    constants::FEAR_GREED_URL,
    error::FetchError,
    feed::SentimentFeed,
    types::FearGreedReading,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Wrapper around the `/fng` payload; `limit=1` means `data` holds at most
/// the latest reading.
#[derive(Debug, Deserialize)]
struct FearGreedResponse {
    data: Vec<FearGreedReading>,
}

/// alternative.me Fear & Greed data source
pub struct FearGreedSource {
    client: Client,
}

impl FearGreedSource {
    pub fn new() -> Result<Self, FetchError> {
        Ok(Self {
            client: super::build_client()?,
        })
    }
}

#[async_trait]
impl SentimentFeed for FearGreedSource {
    async fn fetch_fear_greed(&self) -> Result<FearGreedReading, FetchError> {
        let response = super::get_checked(&self.client, FEAR_GREED_URL).await?;

        let wrapper: FearGreedResponse = response
            .json()
            .await
            .map_err(|e| FetchError::decode(format!("Fear & Greed payload: {e}")))?;

        wrapper
            .data
            .into_iter()
            .next()
            .ok_or_else(|| FetchError::decode("Fear & Greed payload: empty data array"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapper_takes_first_reading() {
        let json = r#"{"data": [
            {"value": "42", "value_classification": "Fear"},
            {"value": "55", "value_classification": "Neutral"}
        ]}"#;
        let wrapper: FearGreedResponse = serde_json::from_str(json).unwrap();
        let latest = wrapper.data.into_iter().next().unwrap();
        assert_eq!(latest.value, "42");
        assert_eq!(latest.value_classification, "Fear");
        assert_eq!(latest.score(), Some(42));
    }
}
