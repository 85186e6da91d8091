//! Trailing-edge debouncing of search input.
//!
//! Every keystroke is sent into the channel; the receiving side yields a value only
//! once no newer value has arrived for the configured window. Only the filtering
//! pipeline sits behind this, network fetches are never debounced.

use std::time::Duration;
use tokio::sync::mpsc;

/// Sending half: push each raw input value as it happens.
pub type DebounceSender<T> = mpsc::UnboundedSender<T>;

/// Receiving half yielding coalesced values.
pub struct Debounced<T> {
    rx: mpsc::UnboundedReceiver<T>,
    window: Duration,
}

/// Creates a debounced channel with the given quiet window.
pub fn debounced<T>(window: Duration) -> (DebounceSender<T>, Debounced<T>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (tx, Debounced { rx, window })
}

impl<T> Debounced<T> {
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Waits for the next burst of input and returns its last value.
    ///
    /// A burst ends when `window` passes without a new value, or when every sender
    /// is dropped. Returns `None` once the channel is closed and drained.
    pub async fn next(&mut self) -> Option<T> {
        let mut latest = self.rx.recv().await?;
        loop {
            tokio::select! {
                newer = self.rx.recv() => match newer {
                    Some(value) => latest = value,
                    None => return Some(latest),
                },
                _ = tokio::time::sleep(self.window) => return Some(latest),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{sleep, Instant};

    const WINDOW: Duration = Duration::from_millis(300);

    #[tokio::test(start_paused = true)]
    async fn test_rapid_keystrokes_coalesce() {
        let (tx, mut rx) = debounced(WINDOW);
        let start = Instant::now();
        tokio::spawn(async move {
            for query in ["k", "kt", "kte", "ktes", "ktest"] {
                tx.send(query.to_string()).unwrap();
                sleep(Duration::from_millis(50)).await;
            }
            sleep(Duration::from_secs(5)).await;
        });

        assert_eq!(rx.next().await.as_deref(), Some("ktest"));
        // Last keystroke at 200ms, then a full quiet window.
        assert!(start.elapsed() >= Duration::from_millis(500));
        assert!(start.elapsed() < Duration::from_millis(600));
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts() {
        let (tx, mut rx) = debounced(WINDOW);
        tokio::spawn(async move {
            tx.send("chi").unwrap();
            sleep(Duration::from_millis(100)).await;
            tx.send("chicago").unwrap();
            sleep(Duration::from_millis(400)).await;
            tx.send("ams").unwrap();
        });

        assert_eq!(rx.next().await, Some("chicago"));
        assert_eq!(rx.next().await, Some("ams"));
        assert_eq!(rx.next().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_channel_flushes_pending_value() {
        let (tx, mut rx) = debounced(WINDOW);
        tx.send(1).unwrap();
        tx.send(2).unwrap();
        drop(tx);
        let start = Instant::now();
        assert_eq!(rx.next().await, Some(2));
        assert!(start.elapsed() < WINDOW);
        assert_eq!(rx.next().await, None);
    }
}
