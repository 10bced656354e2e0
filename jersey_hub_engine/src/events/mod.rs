//! Snapshot feed plumbing
//!
//! The channel pair that carries full-catalog snapshots from a collection backend to the subscription manager.
mod channel;

pub use channel::{snapshot_channel, FeedEvent, SnapshotFeed, SnapshotSender};
