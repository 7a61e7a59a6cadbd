//! Types for the CoinTrack aggregation core

use crate::constants::NEWS_IMAGE_BASE_URL;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use uuid::Uuid;

/// One coin from the ranked market listing
///
/// Immutable snapshot; the whole listing is replaced per refresh, no field
/// is ever mutated in place. Serde names match the CoinGecko
/// `/coins/markets` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketCoin {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub image: String,
    pub current_price: f64,
    /// Absent on some feeds; "unknown" rather than an error
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub high_24h: Option<f64>,
    #[serde(default)]
    pub low_24h: Option<f64>,
    #[serde(default)]
    pub total_volume: Option<f64>,
}

impl MarketCoin {
    /// Case-insensitive substring match against name or symbol
    pub fn matches_query(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        self.name.to_lowercase().contains(&q) || self.symbol.to_lowercase().contains(&q)
    }
}

/// Global market statistics from the CoinGecko `/global` endpoint
///
/// The wire format keys every figure by currency (or asset); only USD and
/// BTC dominance are consumed downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalStats {
    pub total_market_cap: HashMap<String, f64>,
    pub total_volume: HashMap<String, f64>,
    pub market_cap_percentage: HashMap<String, f64>,
}

impl GlobalStats {
    /// Total market cap in USD
    pub fn market_cap_usd(&self) -> f64 {
        self.total_market_cap.get("usd").copied().unwrap_or(0.0)
    }

    /// Total volume in USD
    pub fn volume_usd(&self) -> f64 {
        self.total_volume.get("usd").copied().unwrap_or(0.0)
    }

    /// Bitcoin's share of total market capitalization, in percent
    pub fn btc_dominance(&self) -> f64 {
        self.market_cap_percentage.get("btc").copied().unwrap_or(0.0)
    }
}

/// Latest Fear & Greed index reading
///
/// The score arrives string-encoded; only the newest reading is retained,
/// no history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FearGreedReading {
    pub value: String,
    pub value_classification: String,
}

impl FearGreedReading {
    /// The sentiment score as an integer (0-100), if the value parses
    pub fn score(&self) -> Option<u8> {
        self.value.parse().ok()
    }
}

/// One news article from the CryptoCompare feed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub source: String,
    pub url: Option<String>,
    pub image_url: Option<String>,
    /// Unix seconds
    pub published_on: Option<i64>,
}

impl NewsItem {
    /// Absolute image URL, normalizing protocol-relative and site-relative
    /// forms; `None` when no usable image is present
    pub fn image_link(&self) -> Option<String> {
        let raw = self.image_url.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Some(raw.to_string())
        } else if raw.starts_with("//") {
            Some(format!("https:{raw}"))
        } else {
            Some(format!("{NEWS_IMAGE_BASE_URL}{raw}"))
        }
    }
}

// The feed is inconsistent about the id field: sometimes a number,
// sometimes a string, occasionally missing. Decode tolerantly, defaulting
// every optional field instead of failing the whole batch.
impl<'de> Deserialize<'de> for NewsItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawNewsItem {
            #[serde(default)]
            id: Option<Value>,
            #[serde(default)]
            title: Option<String>,
            #[serde(default)]
            source: Option<String>,
            #[serde(default)]
            url: Option<String>,
            #[serde(default, rename = "imageurl")]
            imageurl: Option<String>,
            #[serde(default)]
            published_on: Option<i64>,
        }

        let raw = RawNewsItem::deserialize(deserializer)?;

        let id = match raw.id {
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) => s,
            _ => Uuid::new_v4().to_string(),
        };

        Ok(NewsItem {
            id,
            title: raw.title.unwrap_or_else(|| "No Title Provided".to_string()),
            source: raw.source.unwrap_or_else(|| "Unknown Source".to_string()),
            url: raw.url,
            image_url: raw.imageurl.map(|u| u.trim().to_string()),
            published_on: raw.published_on,
        })
    }
}

/// 7-day price chart for a single coin
///
/// Each point is (timestamp in milliseconds, price in USD); only the price
/// component is consumed downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub prices: Vec<(f64, f64)>,
}

impl ChartSeries {
    /// The price components, in chart order
    pub fn price_points(&self) -> Vec<f64> {
        self.prices.iter().map(|(_, price)| *price).collect()
    }
}

/// One starred coin in the user's portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSelection {
    pub coin_id: String,
    pub added_at: DateTime<Utc>,
}

impl PortfolioSelection {
    pub fn new(coin_id: impl Into<String>) -> Self {
        Self {
            coin_id: coin_id.into(),
            added_at: Utc::now(),
        }
    }
}

/// The persisted coin-of-the-day choice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotlightSelection {
    pub coin_id: String,
    /// Device-local calendar day the choice was made
    pub chosen_on: NaiveDate,
}

/// Direction of a 24h portfolio price swing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertDirection {
    Increase,
    Decrease,
}

/// A portfolio coin moved past the alert threshold over the last 24h
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEvent {
    pub coin_id: String,
    pub name: String,
    pub direction: AlertDirection,
    /// Absolute 24h change, in percent
    pub magnitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn news_id_decodes_from_integer() {
        let item: NewsItem =
            serde_json::from_str(r#"{"id": 12345, "title": "t", "source": "s"}"#).unwrap();
        assert_eq!(item.id, "12345");
    }

    #[test]
    fn news_id_decodes_from_string() {
        let item: NewsItem =
            serde_json::from_str(r#"{"id": "abc-1", "title": "t", "source": "s"}"#).unwrap();
        assert_eq!(item.id, "abc-1");
    }

    #[test]
    fn news_missing_fields_default() {
        let item: NewsItem = serde_json::from_str(r#"{}"#).unwrap();
        assert!(!item.id.is_empty());
        assert_eq!(item.title, "No Title Provided");
        assert_eq!(item.source, "Unknown Source");
        assert!(item.url.is_none());
        assert!(item.image_link().is_none());
    }

    #[test]
    fn news_image_link_normalizes() {
        let absolute: NewsItem = serde_json::from_str(
            r#"{"id": 1, "imageurl": "https://example.com/a.png"}"#,
        )
        .unwrap();
        assert_eq!(
            absolute.image_link().as_deref(),
            Some("https://example.com/a.png")
        );

        let protocol_relative: NewsItem =
            serde_json::from_str(r#"{"id": 2, "imageurl": "//cdn.example.com/b.png"}"#).unwrap();
        assert_eq!(
            protocol_relative.image_link().as_deref(),
            Some("https://cdn.example.com/b.png")
        );

        let site_relative: NewsItem =
            serde_json::from_str(r#"{"id": 3, "imageurl": "/media/c.png"}"#).unwrap();
        assert_eq!(
            site_relative.image_link().as_deref(),
            Some("https://www.cryptocompare.com/media/c.png")
        );

        let empty: NewsItem =
            serde_json::from_str(r#"{"id": 4, "imageurl": "   "}"#).unwrap();
        assert!(empty.image_link().is_none());
    }

    #[test]
    fn global_stats_helpers_default_to_zero() {
        let stats = GlobalStats {
            total_market_cap: HashMap::from([("usd".to_string(), 1.5e12)]),
            total_volume: HashMap::new(),
            market_cap_percentage: HashMap::from([("btc".to_string(), 48.2)]),
        };
        assert_eq!(stats.market_cap_usd(), 1.5e12);
        assert_eq!(stats.volume_usd(), 0.0);
        assert_eq!(stats.btc_dominance(), 48.2);
    }

    #[test]
    fn fear_greed_score_parses() {
        let reading = FearGreedReading {
            value: "72".to_string(),
            value_classification: "Greed".to_string(),
        };
        assert_eq!(reading.score(), Some(72));

        let bad = FearGreedReading {
            value: "n/a".to_string(),
            value_classification: "Unknown".to_string(),
        };
        assert_eq!(bad.score(), None);
    }

    #[test]
    fn chart_series_keeps_price_order() {
        let series: ChartSeries =
            serde_json::from_str(r#"{"prices": [[1000.0, 42.5], [2000.0, 43.1]]}"#).unwrap();
        assert_eq!(series.price_points(), vec![42.5, 43.1]);
    }

    #[test]
    fn market_coin_matches_query_case_insensitive() {
        let coin: MarketCoin = serde_json::from_str(
            r#"{"id":"bitcoin","symbol":"btc","name":"Bitcoin","image":"","current_price":65000.0}"#,
        )
        .unwrap();
        assert!(coin.matches_query("BIT"));
        assert!(coin.matches_query("btC"));
        assert!(!coin.matches_query("eth"));
        assert_eq!(coin.price_change_percentage_24h, None);
    }
}
