//! # CoinTrack Core
//!
//! Multi-source market data aggregation core for the CoinTrack app:
//! cryptocurrency prices, global market statistics, Fear & Greed sentiment,
//! and news, merged into one observable view state.
//!
//! The presentation layer triggers a refresh; the aggregator fans out to
//! the HTTP fetchers concurrently, joins the results with an all-or-nothing
//! commit, intersects the listing with the on-device portfolio, evaluates
//! swing alerts, and hands the snapshot back.
//!
//! ## Usage
//!
//! Construct the sources once at startup and inject them explicitly:
//!
//! ```no_run
//! use cointrack_core::{
//!     Aggregator, CoinGeckoSource, FearGreedSource, SelectionStore, SpotlightPicker,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let coingecko = Arc::new(CoinGeckoSource::new()?);
//! let aggregator = Aggregator::new(
//!     coingecko.clone(),
//!     coingecko,
//!     Arc::new(FearGreedSource::new()?),
//!     Arc::new(SelectionStore::load("portfolio.json").await?),
//!     Arc::new(SpotlightPicker::load("spotlight.json").await?),
//! );
//!
//! let state = aggregator.refresh_all().await?;
//! for coin in aggregator.filtered_coins("btc").await {
//!     println!("{}: ${:.2}", coin.name, coin.current_price);
//! }
//! # let _ = state;
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod alerts;
pub mod constants;
pub mod debounce;
pub mod error;
pub mod feed;
pub mod sources;
pub mod spotlight;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use aggregator::{AggregateState, Aggregator, ListTab, StateEvent};
pub use alerts::AlertEvaluator;
pub use debounce::SearchDebouncer;
pub use error::{FetchError, StoreError};
pub use feed::{CoinFeed, GlobalFeed, NewsFeed, SentimentFeed};
pub use sources::{CoinGeckoSource, CryptoCompareNewsSource, FearGreedSource};
pub use spotlight::SpotlightPicker;
pub use store::SelectionStore;
pub use types::{
    AlertDirection, AlertEvent, ChartSeries, FearGreedReading, GlobalStats, MarketCoin, NewsItem,
    PortfolioSelection, SpotlightSelection,
};
