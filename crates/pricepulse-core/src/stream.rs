// ── Snapshot streams ──
//
// Subscription handle vended by the stores. Observers only ever see whole
// snapshots.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// A subscription to one store's snapshot.
///
/// Provides point-in-time access and change notification via `changed()`
/// or by converting to a `Stream`.
pub struct SnapshotStream<T: Send + Sync + 'static> {
    current: Arc<T>,
    receiver: watch::Receiver<Arc<T>>,
}

impl<T: Send + Sync + 'static> SnapshotStream<T> {
    pub(crate) fn new(receiver: watch::Receiver<Arc<T>>) -> Self {
        let current = receiver.borrow().clone();
        Self { current, receiver }
    }

    /// The snapshot seen at creation or at the last `changed()`.
    pub fn current(&self) -> &Arc<T> {
        &self.current
    }

    /// The latest published snapshot.
    pub fn latest(&self) -> Arc<T> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next publish, returning the new snapshot.
    /// Returns `None` once the store has been dropped.
    pub async fn changed(&mut self) -> Option<Arc<T>> {
        self.receiver.changed().await.ok()?;
        let snap = self.receiver.borrow_and_update().clone();
        self.current = snap.clone();
        Some(snap)
    }

    /// Convert into a `Stream` that yields the current snapshot first, then
    /// every later one.
    pub fn into_stream(self) -> SnapshotWatchStream<T> {
        SnapshotWatchStream {
            inner: WatchStream::new(self.receiver),
        }
    }
}

/// `Stream` adapter backed by a `watch::Receiver`.
pub struct SnapshotWatchStream<T: Send + Sync + 'static> {
    inner: WatchStream<Arc<T>>,
}

impl<T: Send + Sync + 'static> Stream for SnapshotWatchStream<T> {
    type Item = Arc<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        // WatchStream is Unpin.
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tokio_stream::StreamExt;

    use super::*;

    #[tokio::test]
    async fn into_stream_yields_current_then_later_snapshots() {
        let (tx, rx) = watch::channel(Arc::new(1_u32));
        let mut stream = SnapshotStream::new(rx).into_stream();

        assert_eq!(*stream.next().await.unwrap(), 1);

        tx.send(Arc::new(2)).unwrap();
        assert_eq!(*stream.next().await.unwrap(), 2);

        drop(tx);
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn changed_tracks_current_until_sender_drops() {
        let (tx, rx) = watch::channel(Arc::new(1_u32));
        let mut snapshots = SnapshotStream::new(rx);
        assert_eq!(**snapshots.current(), 1);

        tx.send(Arc::new(5)).unwrap();
        assert_eq!(**snapshots.current(), 1);
        assert_eq!(*snapshots.latest(), 5);

        assert_eq!(*snapshots.changed().await.unwrap(), 5);
        assert_eq!(**snapshots.current(), 5);

        drop(tx);
        assert!(snapshots.changed().await.is_none());
    }
}
