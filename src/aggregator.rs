//! Market data aggregator
//!
//! Owns the unified view state. A refresh fans out to the coin listing,
//! global stats, and Fear & Greed fetchers concurrently and commits
//! all-or-nothing: either every field of the snapshot swaps at once or the
//! prior snapshot stays visible alongside an error message. Consumers
//! subscribe to a broadcast channel for change notification instead of any
//! UI framework's reactivity.

use crate::{
    alerts::AlertEvaluator,
    error::{FetchError, StoreError},
    feed::{CoinFeed, GlobalFeed, SentimentFeed},
    spotlight::SpotlightPicker,
    store::SelectionStore,
    types::{AlertEvent, ChartSeries, FearGreedReading, GlobalStats, MarketCoin},
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

/// Capacity of the state-change broadcast channel
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Which coin list the UI is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListTab {
    AllCoins,
    Portfolio,
}

/// The unified view state, replaced wholesale on each successful refresh
#[derive(Debug, Clone, Default)]
pub struct AggregateState {
    pub coins: Vec<MarketCoin>,
    pub global_stats: Option<GlobalStats>,
    pub fear_greed: Option<FearGreedReading>,
    pub spotlight: Option<MarketCoin>,
    pub error_message: Option<String>,
    pub last_refreshed: Option<DateTime<Utc>>,
}

/// State-change notifications delivered to subscribers
#[derive(Debug, Clone)]
pub enum StateEvent {
    /// A refresh committed a new snapshot
    Refreshed { at: DateTime<Utc> },
    /// A refresh failed; prior snapshot is still showing
    RefreshFailed { message: String },
    /// A portfolio coin crossed the 24h swing threshold
    Alert(AlertEvent),
}

/// Aggregates the external feeds into a single observable state
pub struct Aggregator {
    coin_feed: Arc<dyn CoinFeed>,
    global_feed: Arc<dyn GlobalFeed>,
    sentiment_feed: Arc<dyn SentimentFeed>,
    portfolio: Arc<SelectionStore>,
    spotlight: Arc<SpotlightPicker>,
    evaluator: AlertEvaluator,
    state: RwLock<AggregateState>,
    event_tx: broadcast::Sender<StateEvent>,
}

impl Aggregator {
    /// Creates an aggregator over explicitly injected feeds and stores
    pub fn new(
        coin_feed: Arc<dyn CoinFeed>,
        global_feed: Arc<dyn GlobalFeed>,
        sentiment_feed: Arc<dyn SentimentFeed>,
        portfolio: Arc<SelectionStore>,
        spotlight: Arc<SpotlightPicker>,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            coin_feed,
            global_feed,
            sentiment_feed,
            portfolio,
            spotlight,
            evaluator: AlertEvaluator::default(),
            state: RwLock::new(AggregateState::default()),
            event_tx,
        }
    }

    /// Replaces the default alert evaluator
    pub fn with_evaluator(mut self, evaluator: AlertEvaluator) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Subscribes to state-change notifications
    pub fn subscribe(&self) -> broadcast::Receiver<StateEvent> {
        self.event_tx.subscribe()
    }

    /// A cloned snapshot of the current state
    pub async fn state(&self) -> AggregateState {
        self.state.read().await.clone()
    }

    /// Refreshes the whole snapshot from all three feeds
    ///
    /// The three fetches run concurrently and join before any mutation. If
    /// every one succeeds the snapshot is swapped atomically, the spotlight
    /// recomputed, and portfolio alerts broadcast. If any fails, no field
    /// besides `error_message` changes and the first failure (in feed
    /// order: coins, global, sentiment) is returned.
    pub async fn refresh_all(&self) -> Result<AggregateState, FetchError> {
        // The error banner clears as soon as a retry starts.
        self.state.write().await.error_message = None;

        let (coins_res, global_res, sentiment_res) = tokio::join!(
            self.coin_feed.fetch_coins(),
            self.global_feed.fetch_global_stats(),
            self.sentiment_feed.fetch_fear_greed(),
        );

        // First failure in feed order wins; successful partial results are
        // discarded rather than mixed into the prior snapshot.
        let joined = coins_res.and_then(|coins| {
            let global = global_res?;
            let sentiment = sentiment_res?;
            Ok((coins, global, sentiment))
        });

        let (coins, global_stats, fear_greed) = match joined {
            Ok(parts) => parts,
            Err(err) => {
                tracing::warn!(error = %err, "Refresh failed, keeping prior snapshot");

                let message = err.to_string();
                self.state.write().await.error_message = Some(message.clone());
                let _ = self.event_tx.send(StateEvent::RefreshFailed { message });

                return Err(err);
            }
        };

        let spotlight = match self.spotlight.pick(&coins).await {
            Ok(pick) => pick,
            Err(e) => {
                // A broken spotlight file should not block market data.
                tracing::warn!(error = %e, "Spotlight pick failed");
                None
            }
        };

        let portfolio_ids = self.portfolio.ids().await;
        let alerts = self.evaluator.evaluate(&coins, &portfolio_ids);

        let now = Utc::now();
        let snapshot = {
            let mut state = self.state.write().await;
            state.coins = coins;
            state.global_stats = Some(global_stats);
            state.fear_greed = Some(fear_greed);
            state.spotlight = spotlight;
            state.error_message = None;
            state.last_refreshed = Some(now);
            state.clone()
        };

        tracing::debug!(
            coins = snapshot.coins.len(),
            alerts = alerts.len(),
            "Refresh committed"
        );

        for alert in alerts {
            let _ = self.event_tx.send(StateEvent::Alert(alert));
        }
        let _ = self.event_tx.send(StateEvent::Refreshed { at: now });

        Ok(snapshot)
    }

    /// Coins matching `search` case-insensitively by name or symbol; an
    /// empty search is a pass-through preserving server order
    pub async fn filtered_coins(&self, search: &str) -> Vec<MarketCoin> {
        let state = self.state.read().await;
        Self::filter(&state.coins, search)
    }

    /// Coins for a tab, search-filtered first, then intersected with the
    /// portfolio set when the Portfolio tab is selected
    pub async fn coins_for_tab(&self, tab: ListTab, search: &str) -> Vec<MarketCoin> {
        let filtered = self.filtered_coins(search).await;
        match tab {
            ListTab::AllCoins => filtered,
            ListTab::Portfolio => {
                let ids = self.portfolio.ids().await;
                filtered.into_iter().filter(|c| ids.contains(&c.id)).collect()
            }
        }
    }

    fn filter(coins: &[MarketCoin], search: &str) -> Vec<MarketCoin> {
        if search.is_empty() {
            return coins.to_vec();
        }
        coins
            .iter()
            .filter(|c| c.matches_query(search))
            .cloned()
            .collect()
    }

    /// Stars or unstars a coin depending on its current membership
    pub async fn toggle_portfolio(&self, coin_id: &str) -> Result<(), StoreError> {
        if self.portfolio.contains(coin_id).await {
            self.portfolio.remove(coin_id).await
        } else {
            self.portfolio.add(coin_id).await
        }
    }

    /// Whether a coin is currently in the portfolio
    pub async fn is_in_portfolio(&self, coin_id: &str) -> bool {
        self.portfolio.contains(coin_id).await
    }

    /// 7-day chart for a single coin, fetched on demand
    pub async fn chart_for(&self, coin_id: &str) -> Result<ChartSeries, FetchError> {
        self.coin_feed.fetch_chart(coin_id).await
    }
}
