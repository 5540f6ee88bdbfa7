//! In-process sync hub over a tokio broadcast channel.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tracing::{debug, warn};

use super::{Presence, SyncGateway};
use crate::core::Result;
use crate::snapshot::GameSnapshot;

#[derive(Clone, Debug)]
struct Envelope {
    origin: u64,
    snapshot: Arc<GameSnapshot>,
}

/// Fan-out point connecting sessions in one process.
///
/// ## Example
///
/// ```
/// use rust_bingo::snapshot::GameSnapshot;
/// use rust_bingo::sync::{LocalSyncHub, SyncGateway};
///
/// let hub = LocalSyncHub::new(16);
/// let mut alice = hub.connect();
/// let mut bob = hub.connect();
///
/// alice.publish(&GameSnapshot::default()).unwrap();
///
/// assert!(bob.poll().is_some());
/// assert!(alice.poll().is_none());
/// ```
#[derive(Clone, Debug)]
pub struct LocalSyncHub {
    sender: broadcast::Sender<Envelope>,
    next_peer: Arc<AtomicU64>,
}

impl LocalSyncHub {
    /// Create a hub buffering up to `capacity` snapshots per link.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            next_peer: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Connect a new session.
    #[must_use]
    pub fn connect(&self) -> SyncLink {
        let peer = self.next_peer.fetch_add(1, Ordering::Relaxed);
        debug!(peer, "sync link connected");
        SyncLink {
            peer,
            sender: self.sender.clone(),
            receiver: self.sender.subscribe(),
        }
    }

    /// Number of connected links.
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// One session's connection to a `LocalSyncHub`.
///
/// A link never receives its own publications. When a link falls more than
/// the hub capacity behind, the oldest snapshots are skipped.
#[derive(Debug)]
pub struct SyncLink {
    peer: u64,
    sender: broadcast::Sender<Envelope>,
    receiver: broadcast::Receiver<Envelope>,
}

impl SyncLink {
    /// Identifier of this link within its hub.
    #[must_use]
    pub fn peer_id(&self) -> u64 {
        self.peer
    }

    /// Wait until another link publishes a snapshot.
    ///
    /// Returns `None` if the channel has closed.
    pub async fn recv(&mut self) -> Option<GameSnapshot> {
        loop {
            match self.receiver.recv().await {
                Ok(envelope) if envelope.origin == self.peer => continue,
                Ok(envelope) => return Some(envelope.snapshot.as_ref().clone()),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(peer = self.peer, skipped, "sync link lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }
}

impl SyncGateway for SyncLink {
    fn publish(&mut self, snapshot: &GameSnapshot) -> Result<()> {
        let envelope = Envelope {
            origin: self.peer,
            snapshot: Arc::new(snapshot.clone()),
        };
        // Our own receiver keeps the channel open, so send only fails if
        // nobody is listening at all.
        if self.sender.send(envelope).is_err() {
            debug!(peer = self.peer, "no sync peers listening");
        }
        Ok(())
    }

    fn poll(&mut self) -> Option<GameSnapshot> {
        loop {
            match self.receiver.try_recv() {
                Ok(envelope) if envelope.origin == self.peer => continue,
                Ok(envelope) => return Some(envelope.snapshot.as_ref().clone()),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(peer = self.peer, skipped, "sync link lagged");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }

    fn presence(&self) -> Presence {
        Presence {
            online_peers: self.sender.receiver_count().saturating_sub(1),
        }
    }
}
