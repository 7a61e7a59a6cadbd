//! Concrete HTTP fetchers for the external market data APIs

pub mod coingecko;
pub mod fear_greed;
pub mod news;

pub use coingecko::CoinGeckoSource;
pub use fear_greed::FearGreedSource;
pub use news::CryptoCompareNewsSource;

use crate::constants::{REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::error::FetchError;
use reqwest::Client;
use std::time::Duration;

/// Builds the shared reqwest client: per-request timeout plus the app's
/// User-Agent header on every outbound call.
pub(crate) fn build_client() -> Result<Client, FetchError> {
    Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()
        .map_err(FetchError::Transport)
}

/// Issues a single GET and enforces the status-200 contract shared by all
/// sources. No retry, no backoff; every call is a fresh round trip.
pub(crate) async fn get_checked(
    client: &Client,
    url: &str,
) -> Result<reqwest::Response, FetchError> {
    tracing::debug!(url, "Fetching");

    let response = client.get(url).send().await.map_err(FetchError::Transport)?;

    let status = response.status().as_u16();
    if status != 200 {
        return Err(FetchError::bad_response(status));
    }

    Ok(response)
}
