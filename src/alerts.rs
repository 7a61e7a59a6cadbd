//! Portfolio swing alert evaluator
//!
//! Stateless scan of the latest listing: every portfolio coin whose 24h
//! change magnitude strictly exceeds the threshold yields one event. There
//! is no de-duplication against earlier refreshes; the delivery layer owns
//! idempotency if it wants it.

use crate::{
    constants::ALERT_THRESHOLD_PCT,
    types::{AlertDirection, AlertEvent, MarketCoin},
};
use std::collections::HashSet;

/// Evaluates portfolio coins against a 24h swing threshold
pub struct AlertEvaluator {
    threshold: f64,
}

impl Default for AlertEvaluator {
    fn default() -> Self {
        Self::new(ALERT_THRESHOLD_PCT)
    }
}

impl AlertEvaluator {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// One event per portfolio coin whose 24h change magnitude is strictly
    /// greater than the threshold. Coins without a 24h change never alert.
    pub fn evaluate(
        &self,
        coins: &[MarketCoin],
        portfolio_ids: &HashSet<String>,
    ) -> Vec<AlertEvent> {
        coins
            .iter()
            .filter(|coin| portfolio_ids.contains(&coin.id))
            .filter_map(|coin| {
                let change = coin.price_change_percentage_24h?;
                if change.abs() <= self.threshold {
                    return None;
                }
                Some(AlertEvent {
                    coin_id: coin.id.clone(),
                    name: coin.name.clone(),
                    direction: if change >= 0.0 {
                        AlertDirection::Increase
                    } else {
                        AlertDirection::Decrease
                    },
                    magnitude: change.abs(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coin(id: &str, change: Option<f64>) -> MarketCoin {
        MarketCoin {
            id: id.to_string(),
            symbol: id.to_string(),
            name: id.to_string(),
            image: String::new(),
            current_price: 100.0,
            price_change_percentage_24h: change,
            market_cap: None,
            market_cap_rank: None,
            high_24h: None,
            low_24h: None,
            total_volume: None,
        }
    }

    fn portfolio(ids: &[&str]) -> HashSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bitcoin_up_six_point_two_alerts_once() {
        let evaluator = AlertEvaluator::default();
        let coins = vec![coin("bitcoin", Some(6.2))];

        let events = evaluator.evaluate(&coins, &portfolio(&["bitcoin"]));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].coin_id, "bitcoin");
        assert_eq!(events[0].direction, AlertDirection::Increase);
        assert_eq!(events[0].magnitude, 6.2);
    }

    #[test]
    fn threshold_is_strict() {
        let evaluator = AlertEvaluator::default();
        let ids = portfolio(&["a", "b"]);

        let at_threshold = vec![coin("a", Some(5.0)), coin("b", Some(-5.0))];
        assert!(evaluator.evaluate(&at_threshold, &ids).is_empty());

        let past_threshold = vec![coin("a", Some(5.01)), coin("b", Some(-5.01))];
        let events = evaluator.evaluate(&past_threshold, &ids);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].direction, AlertDirection::Increase);
        assert_eq!(events[1].direction, AlertDirection::Decrease);
        assert_eq!(events[1].magnitude, 5.01);
    }

    #[test]
    fn non_portfolio_coins_never_alert() {
        let evaluator = AlertEvaluator::default();
        let coins = vec![coin("bitcoin", Some(12.0))];
        assert!(evaluator.evaluate(&coins, &portfolio(&["ethereum"])).is_empty());
    }

    #[test]
    fn missing_change_never_alerts() {
        let evaluator = AlertEvaluator::default();
        let coins = vec![coin("bitcoin", None)];
        assert!(evaluator.evaluate(&coins, &portfolio(&["bitcoin"])).is_empty());
    }

    #[test]
    fn reevaluation_refires_while_condition_holds() {
        // No dedup by design: the same breach alerts on every refresh.
        let evaluator = AlertEvaluator::default();
        let coins = vec![coin("bitcoin", Some(7.5))];
        let ids = portfolio(&["bitcoin"]);

        assert_eq!(evaluator.evaluate(&coins, &ids).len(), 1);
        assert_eq!(evaluator.evaluate(&coins, &ids).len(), 1);
    }
}
