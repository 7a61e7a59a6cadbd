//! Feed abstractions over the external market data APIs
//!
//! Each trait covers one concern the aggregator consumes. Concrete
//! implementations live in `sources`; tests substitute the mocks below
//! through the same seams.

use crate::{
    error::FetchError,
    types::{ChartSeries, FearGreedReading, GlobalStats, MarketCoin, NewsItem},
};
use async_trait::async_trait;

/// Source of the ranked coin listing and per-coin chart data
#[async_trait]
pub trait CoinFeed: Send + Sync {
    /// Fetches the top-ranked market listing (market-cap descending)
    async fn fetch_coins(&self) -> Result<Vec<MarketCoin>, FetchError>;

    /// Fetches the 7-day price chart for a single coin
    async fn fetch_chart(&self, coin_id: &str) -> Result<ChartSeries, FetchError>;
}

/// Source of global market statistics
#[async_trait]
pub trait GlobalFeed: Send + Sync {
    async fn fetch_global_stats(&self) -> Result<GlobalStats, FetchError>;
}

/// Source of the latest Fear & Greed sentiment reading
#[async_trait]
pub trait SentimentFeed: Send + Sync {
    async fn fetch_fear_greed(&self) -> Result<FearGreedReading, FetchError>;
}

/// Source of the news article feed
#[async_trait]
pub trait NewsFeed: Send + Sync {
    async fn fetch_news(&self) -> Result<Vec<NewsItem>, FetchError>;
}
