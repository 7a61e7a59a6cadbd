//! Constants for the CoinTrack aggregation core
//!
//! All configuration is centralized here as compile-time constants. The
//! endpoints are fixed string templates; only the file paths of the durable
//! stores are injected at construction time.

/// CoinGecko API base URL
pub const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

/// CoinGecko markets endpoint (top 100 by market cap, USD)
pub const COINGECKO_MARKETS_ENDPOINT: &str = "/coins/markets";

/// CoinGecko global stats endpoint
pub const COINGECKO_GLOBAL_ENDPOINT: &str = "/global";

/// Quote currency for every price query
pub const VS_CURRENCY: &str = "usd";

/// Listing order for the markets endpoint
pub const MARKETS_ORDER: &str = "market_cap_desc";

/// Page size for the markets endpoint
pub const MARKETS_PER_PAGE: u32 = 100;

/// Lookback window for chart queries (in days)
pub const CHART_DAYS: u32 = 7;

/// alternative.me Fear & Greed endpoint (limit=1 returns only the latest reading)
pub const FEAR_GREED_URL: &str = "https://api.alternative.me/fng/?limit=1";

/// CryptoCompare news endpoint (no API key required)
pub const NEWS_URL: &str = "https://min-api.cryptocompare.com/data/v2/news/?lang=EN";

/// Base URL used to absolutize site-relative news image paths
pub const NEWS_IMAGE_BASE_URL: &str = "https://www.cryptocompare.com";

/// HTTP request timeout when fetching (in seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// User agent for HTTP requests
pub const USER_AGENT: &str = "CoinTrackCore/0.1.0";

/// Portfolio alert threshold: 24h change magnitude must strictly exceed this
pub const ALERT_THRESHOLD_PCT: f64 = 5.0;

/// Delay before a search input is considered settled (in milliseconds)
pub const SEARCH_DEBOUNCE_MS: u64 = 250;
