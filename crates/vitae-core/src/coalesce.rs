//! Request coalescing
//!
//! Trailing-edge debounce for bursty event sources: pointer/touch
//! double-fires on visibility toggles, resize storms from the
//! rendering surface. A burst of values arriving within `window` of
//! one another collapses to its last value before reaching the sink.
//!
//! This lives at the boundary between input events and their
//! consumers; the store itself stays unconditionally safe under rapid
//! calls and never depends on coalescing for correctness.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Spawn a task that forwards only the trailing value of each burst.
///
/// A burst ends when `window` elapses with no new value. Closing the
/// channel flushes the pending value (if any) and ends the task.
pub fn spawn_coalesced<T, F>(
    window: Duration,
    mut rx: mpsc::UnboundedReceiver<T>,
    mut sink: F,
) -> JoinHandle<()>
where
    T: Send + 'static,
    F: FnMut(T) + Send + 'static,
{
    tokio::spawn(async move {
        while let Some(first) = rx.recv().await {
            let mut latest = first;
            loop {
                tokio::select! {
                    next = rx.recv() => match next {
                        Some(value) => latest = value,
                        None => {
                            sink(latest);
                            return;
                        }
                    },
                    _ = tokio::time::sleep(window) => break,
                }
            }
            sink(latest);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn collector() -> (Arc<Mutex<Vec<u32>>>, impl FnMut(u32) + Send + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink_seen = Arc::clone(&seen);
        (seen, move |v| sink_seen.lock().unwrap().push(v))
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_collapses_to_last_value() {
        let (seen, sink) = collector();
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = spawn_coalesced(Duration::from_millis(10), rx, sink);

        tx.send(1).unwrap();
        tx.send(2).unwrap();
        tx.send(3).unwrap();
        drop(tx);

        handle.await.unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_bursts_each_forwarded() {
        let (seen, sink) = collector();
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = spawn_coalesced(Duration::from_millis(10), rx, sink);

        tx.send(1).unwrap();
        // Quiet period longer than the window: first burst settles
        tokio::time::sleep(Duration::from_millis(50)).await;

        tx.send(2).unwrap();
        tx.send(3).unwrap();
        drop(tx);

        handle.await.unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![1, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_channel_forwards_nothing() {
        let (seen, sink) = collector();
        let (tx, rx) = mpsc::unbounded_channel::<u32>();
        let handle = spawn_coalesced(Duration::from_millis(10), rx, sink);

        drop(tx);
        handle.await.unwrap();
        assert!(seen.lock().unwrap().is_empty());
    }
}
