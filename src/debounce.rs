//! Search input debouncer
//!
//! Timer-reset-on-input: each keystroke aborts any pending delivery and
//! schedules a new one; only the latest input survives the settle delay.
//! The filter itself is synchronous and pure; this exists solely to avoid
//! redundant downstream re-evaluation while the user is typing. No network
//! call is involved.

use crate::constants::SEARCH_DEBOUNCE_MS;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Debounces search text changes
pub struct SearchDebouncer {
    delay: Duration,
    out_tx: mpsc::UnboundedSender<String>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl SearchDebouncer {
    /// Creates a debouncer with the default settle delay, returning the
    /// receiver on which settled inputs are delivered
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        Self::with_delay(Duration::from_millis(SEARCH_DEBOUNCE_MS))
    }

    /// Creates a debouncer with a custom settle delay
    pub fn with_delay(delay: Duration) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (out_tx, out_rx) = mpsc::unbounded_channel();
        (
            Self {
                delay,
                out_tx,
                pending: Mutex::new(None),
            },
            out_rx,
        )
    }

    /// Registers a keystroke, resetting the settle timer
    ///
    /// Must be called from within a tokio runtime.
    pub fn input(&self, text: impl Into<String>) {
        let text = text.into();
        let delay = self.delay;
        let tx = self.out_tx.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the consumer shut down; nothing to do.
            let _ = tx.send(text);
        });

        let mut pending = self.pending.lock().unwrap();
        if let Some(previous) = pending.replace(handle) {
            previous.abort();
        }
    }
}
