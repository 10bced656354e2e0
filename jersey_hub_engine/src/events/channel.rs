//! The transport between a collection backend and a catalog subscriber.
//!
//! A backend holds the [`SnapshotSender`] and publishes either a complete product list or a single, terminal
//! error. The subscription manager drains the matching [`SnapshotFeed`]. The channel is bounded mpsc, so a slow
//! consumer applies backpressure to the poller rather than piling up stale snapshots.
use log::*;
use tokio::sync::mpsc;

use crate::{catalog_types::Product, traits::ProductCollectionError};

#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// The complete materialized product list as of this delivery. Never a diff.
    Snapshot(Vec<Product>),
    /// Terminal. Nothing follows an error on the same feed.
    Error(ProductCollectionError),
}

pub fn snapshot_channel(buffer_size: usize) -> (SnapshotSender, SnapshotFeed) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (SnapshotSender { sender }, SnapshotFeed { receiver })
}

#[derive(Clone)]
pub struct SnapshotSender {
    sender: mpsc::Sender<FeedEvent>,
}

impl SnapshotSender {
    /// Publish a full snapshot. Returns false if the consumer has gone away.
    pub async fn publish_snapshot(&self, products: Vec<Product>) -> bool {
        if let Err(e) = self.sender.send(FeedEvent::Snapshot(products)).await {
            trace!("📬️ Snapshot consumer has gone away: {e}");
            return false;
        }
        true
    }

    /// Publish a terminal error. The sender is consumed; the feed contract forbids anything after an error.
    pub async fn publish_error(self, error: ProductCollectionError) -> bool {
        if let Err(e) = self.sender.send(FeedEvent::Error(error)).await {
            trace!("📬️ Snapshot consumer has gone away: {e}");
            return false;
        }
        true
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

pub struct SnapshotFeed {
    receiver: mpsc::Receiver<FeedEvent>,
}

impl SnapshotFeed {
    /// The next event on the feed, or `None` once the backend has dropped its sender.
    pub async fn next_event(&mut self) -> Option<FeedEvent> {
        self.receiver.recv().await
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::sample_product;

    #[tokio::test]
    async fn events_arrive_in_order() {
        let (tx, mut feed) = snapshot_channel(4);
        assert!(tx.publish_snapshot(vec![]).await);
        assert!(tx.publish_snapshot(vec![sample_product("p1", "Home Kit", "RedFC")]).await);
        let Some(FeedEvent::Snapshot(first)) = feed.next_event().await else {
            panic!("expected a snapshot");
        };
        assert!(first.is_empty());
        let Some(FeedEvent::Snapshot(second)) = feed.next_event().await else {
            panic!("expected a snapshot");
        };
        assert_eq!(second.len(), 1);
    }

    #[tokio::test]
    async fn error_consumes_the_sender() {
        let (tx, mut feed) = snapshot_channel(4);
        assert!(tx.publish_error(ProductCollectionError::Network("connection reset".into())).await);
        assert!(matches!(feed.next_event().await, Some(FeedEvent::Error(_))));
        // Sender gone: the feed ends.
        assert!(feed.next_event().await.is_none());
    }

    #[tokio::test]
    async fn publish_to_dropped_feed_reports_closure() {
        let (tx, feed) = snapshot_channel(4);
        drop(feed);
        assert!(tx.is_closed());
        assert!(!tx.publish_snapshot(vec![]).await);
    }
}
