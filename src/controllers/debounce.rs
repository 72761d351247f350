//! Debounce for free-text input.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::trace;

/// Settled view of a raw text channel.
///
/// The settled value follows the raw value once the raw value has been unchanged for
/// the quiet period. An empty (after trim) raw value settles immediately. Dropping
/// this handle stops the background task.
pub struct Debounced {
    tx: Arc<watch::Sender<String>>,
    settled: watch::Receiver<String>,
    task: JoinHandle<()>,
}

impl Debounced {
    /// Latest settled value.
    pub fn current(&self) -> String {
        self.settled.borrow().clone()
    }

    /// Receiver notified once per settled value.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.settled.clone()
    }

    /// Overwrites the settled value now, notifying subscribers even when it is unchanged.
    ///
    /// A later settle on the previous value is then published again.
    pub fn reset(&self, value: impl Into<String>) {
        let value = value.into();
        trace!("debounce reset to {value:?}");
        self.tx.send_replace(value);
    }
}

impl Drop for Debounced {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Starts debouncing `input` with the given quiet period.
///
/// Must be called from within a Tokio runtime.
pub fn debounce(mut input: watch::Receiver<String>, quiet: Duration) -> Debounced {
    let initial = input.borrow_and_update().clone();
    let tx = Arc::new(watch::Sender::new(initial));
    let settled = tx.subscribe();

    let shared = Arc::clone(&tx);
    let task = tokio::spawn(async move {
        let tx = shared;
        while input.changed().await.is_ok() {
            loop {
                let raw = input.borrow_and_update().clone();
                if raw.trim().is_empty() {
                    publish(&tx, raw);
                    break;
                }
                match tokio::time::timeout(quiet, input.changed()).await {
                    // Another keystroke inside the window restarts it
                    Ok(Ok(())) => continue,
                    Ok(Err(_)) => {
                        publish(&tx, raw);
                        return;
                    }
                    Err(_) => {
                        publish(&tx, raw);
                        break;
                    }
                }
            }
        }
    });

    Debounced { tx, settled, task }
}

fn publish(tx: &watch::Sender<String>, value: String) {
    tx.send_if_modified(|current| {
        if *current == value {
            false
        } else {
            trace!("debounce settled on {value:?}");
            *current = value;
            true
        }
    });
}
