//! Daily spotlight picker
//!
//! Chooses one "coin of the day" uniformly at random and keeps the choice
//! for the rest of the local calendar day, persisted across runs. A stored
//! choice whose coin has dropped out of the current listing yields no
//! spotlight for that cycle; it is not re-rolled.

use crate::{
    error::StoreError,
    types::{MarketCoin, SpotlightSelection},
};
use chrono::{Local, NaiveDate};
use rand::seq::SliceRandom;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Persisted coin-of-the-day picker
pub struct SpotlightPicker {
    path: PathBuf,
    current: Mutex<Option<SpotlightSelection>>,
}

impl SpotlightPicker {
    /// Opens the picker state at `path`; a missing file means no prior
    /// selection.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let current = match tokio::fs::read(&path).await {
            Ok(bytes) => Some(
                serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupt(e.to_string()))?,
            ),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(StoreError::Io(e)),
        };

        Ok(Self {
            path,
            current: Mutex::new(current),
        })
    }

    /// Picks today's spotlight from `coins` using the device-local calendar
    pub async fn pick(&self, coins: &[MarketCoin]) -> Result<Option<MarketCoin>, StoreError> {
        self.pick_on(coins, Local::now().date_naive()).await
    }

    /// Date-injectable core of `pick`
    ///
    /// Re-rolls if and only if the stored day is absent or strictly before
    /// `today`. Otherwise the stored ID is looked up verbatim; a miss is
    /// "no spotlight", never a re-roll.
    pub async fn pick_on(
        &self,
        coins: &[MarketCoin],
        today: NaiveDate,
    ) -> Result<Option<MarketCoin>, StoreError> {
        let mut current = self.current.lock().await;

        let needs_refresh = match current.as_ref() {
            Some(selection) => selection.chosen_on < today,
            None => true,
        };

        if !needs_refresh {
            let stored_id = &current.as_ref().unwrap().coin_id;
            return Ok(coins.iter().find(|c| &c.id == stored_id).cloned());
        }

        let Some(chosen) = coins.choose(&mut rand::thread_rng()) else {
            return Ok(None);
        };

        let selection = SpotlightSelection {
            coin_id: chosen.id.clone(),
            chosen_on: today,
        };
        let bytes = serde_json::to_vec_pretty(&selection)
            .map_err(|e| StoreError::Corrupt(e.to_string()))?;
        tokio::fs::write(&self.path, bytes).await?;

        tracing::info!(coin_id = %selection.coin_id, "New spotlight coin selected");
        *current = Some(selection);

        Ok(Some(chosen.clone()))
    }

    /// The currently stored selection, if any
    pub async fn stored(&self) -> Option<SpotlightSelection> {
        self.current.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_state_path() -> PathBuf {
        std::env::temp_dir().join(format!("cointrack-spotlight-{}.json", Uuid::new_v4()))
    }

    fn coin(id: &str) -> MarketCoin {
        MarketCoin {
            id: id.to_string(),
            symbol: id[..3.min(id.len())].to_string(),
            name: id.to_string(),
            image: String::new(),
            current_price: 1.0,
            price_change_percentage_24h: None,
            market_cap: None,
            market_cap_rank: None,
            high_24h: None,
            low_24h: None,
            total_volume: None,
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn first_pick_chooses_and_persists() {
        let path = temp_state_path();
        let picker = SpotlightPicker::load(&path).await.unwrap();
        let coins = vec![coin("bitcoin"), coin("ethereum")];

        let today = day(2026, 8, 26);
        let picked = picker.pick_on(&coins, today).await.unwrap().unwrap();
        assert!(coins.iter().any(|c| c.id == picked.id));

        let stored = picker.stored().await.unwrap();
        assert_eq!(stored.coin_id, picked.id);
        assert_eq!(stored.chosen_on, today);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn stale_selection_rerolls_and_updates_date() {
        let path = temp_state_path();
        let picker = SpotlightPicker::load(&path).await.unwrap();
        let coins = vec![coin("bitcoin")];

        picker.pick_on(&coins, day(2026, 8, 25)).await.unwrap();

        let today = day(2026, 8, 26);
        let picked = picker.pick_on(&coins, today).await.unwrap().unwrap();
        assert_eq!(picked.id, "bitcoin");
        assert_eq!(picker.stored().await.unwrap().chosen_on, today);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn same_day_returns_stored_coin() {
        let path = temp_state_path();
        let picker = SpotlightPicker::load(&path).await.unwrap();
        let coins = vec![coin("bitcoin"), coin("ethereum"), coin("solana")];

        let today = day(2026, 8, 26);
        let first = picker.pick_on(&coins, today).await.unwrap().unwrap();
        let second = picker.pick_on(&coins, today).await.unwrap().unwrap();
        assert_eq!(first.id, second.id);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn lookup_miss_yields_none_without_reroll() {
        let path = temp_state_path();
        let picker = SpotlightPicker::load(&path).await.unwrap();

        let today = day(2026, 8, 26);
        picker.pick_on(&[coin("bitcoin")], today).await.unwrap();

        // The stored coin vanished from the refreshed listing.
        let refreshed = vec![coin("ethereum"), coin("solana")];
        let picked = picker.pick_on(&refreshed, today).await.unwrap();
        assert!(picked.is_none());

        // Stored selection is untouched; no re-roll happened.
        assert_eq!(picker.stored().await.unwrap().coin_id, "bitcoin");

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn selection_survives_reopen() {
        let path = temp_state_path();
        let today = day(2026, 8, 26);
        {
            let picker = SpotlightPicker::load(&path).await.unwrap();
            picker.pick_on(&[coin("bitcoin")], today).await.unwrap();
        }

        let reopened = SpotlightPicker::load(&path).await.unwrap();
        let stored = reopened.stored().await.unwrap();
        assert_eq!(stored.coin_id, "bitcoin");
        assert_eq!(stored.chosen_on, today);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn empty_listing_yields_none() {
        let path = temp_state_path();
        let picker = SpotlightPicker::load(&path).await.unwrap();
        let picked = picker.pick_on(&[], day(2026, 8, 26)).await.unwrap();
        assert!(picked.is_none());
        assert!(picker.stored().await.is_none());
    }
}
