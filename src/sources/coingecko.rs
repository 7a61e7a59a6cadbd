//! CoinGecko fetchers: market listing, global stats, 7-day charts

use crate::{
    constants::{
        CHART_DAYS, COINGECKO_API_URL, COINGECKO_GLOBAL_ENDPOINT, COINGECKO_MARKETS_ENDPOINT,
        MARKETS_ORDER, MARKETS_PER_PAGE, VS_CURRENCY,
    },
    error::FetchError,
    feed::{CoinFeed, GlobalFeed},
    types::{ChartSeries, GlobalStats, MarketCoin},
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Wrapper around the `/global` payload
#[derive(Debug, Deserialize)]
struct GlobalResponse {
    data: GlobalStats,
}

/// CoinGecko data source
///
/// Covers the three CoinGecko endpoints the aggregator consumes. Query
/// parameters are fixed templates: USD quotes, top 100 by market cap,
/// 7-day chart lookback.
pub struct CoinGeckoSource {
    client: Client,
}

impl CoinGeckoSource {
    /// Creates a new CoinGecko source with its own HTTP client
    pub fn new() -> Result<Self, FetchError> {
        Ok(Self {
            client: super::build_client()?,
        })
    }

    fn markets_url(&self) -> String {
        format!(
            "{}{}?vs_currency={}&order={}&per_page={}&page=1&sparkline=false",
            COINGECKO_API_URL,
            COINGECKO_MARKETS_ENDPOINT,
            VS_CURRENCY,
            MARKETS_ORDER,
            MARKETS_PER_PAGE
        )
    }

    fn global_url(&self) -> String {
        format!("{}{}", COINGECKO_API_URL, COINGECKO_GLOBAL_ENDPOINT)
    }

    fn chart_url(&self, coin_id: &str) -> String {
        format!(
            "{}/coins/{}/market_chart?vs_currency={}&days={}",
            COINGECKO_API_URL, coin_id, VS_CURRENCY, CHART_DAYS
        )
    }
}

#[async_trait]
impl CoinFeed for CoinGeckoSource {
    async fn fetch_coins(&self) -> Result<Vec<MarketCoin>, FetchError> {
        let response = super::get_checked(&self.client, &self.markets_url()).await?;

        let coins: Vec<MarketCoin> = response
            .json()
            .await
            .map_err(|e| FetchError::decode(format!("CoinGecko markets payload: {e}")))?;

        tracing::debug!(count = coins.len(), "Fetched coin listing");
        Ok(coins)
    }

    async fn fetch_chart(&self, coin_id: &str) -> Result<ChartSeries, FetchError> {
        if coin_id.is_empty() || coin_id.contains(['/', '?', '&']) {
            return Err(FetchError::BadUrl(format!("invalid coin id: {coin_id:?}")));
        }

        let response = super::get_checked(&self.client, &self.chart_url(coin_id)).await?;

        response
            .json()
            .await
            .map_err(|e| FetchError::decode(format!("CoinGecko chart payload: {e}")))
    }
}

#[async_trait]
impl GlobalFeed for CoinGeckoSource {
    async fn fetch_global_stats(&self) -> Result<GlobalStats, FetchError> {
        let response = super::get_checked(&self.client, &self.global_url()).await?;

        let wrapper: GlobalResponse = response
            .json()
            .await
            .map_err(|e| FetchError::decode(format!("CoinGecko global payload: {e}")))?;

        Ok(wrapper.data)
    }
}
