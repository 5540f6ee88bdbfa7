//! Multi-session sync tests.
//!
//! Two controllers share a `LocalSyncHub`. Saves on one side arrive on the
//! other as remote snapshots, applied last-writer-wins.

use rust_bingo::core::GameConfig;
use rust_bingo::persistence::MemoryStore;
use rust_bingo::pool::PropositionPool;
use rust_bingo::session::{GameSession, SessionController, SessionState};
use rust_bingo::snapshot::GameSnapshot;
use rust_bingo::sync::{LocalSyncHub, SyncGateway};

fn controller(hub: &LocalSyncHub, seed: u64) -> SessionController<MemoryStore> {
    let session = GameSession::new(
        GameConfig::new().with_seed(seed).with_auto_save(false),
        PropositionPool::from_texts((1..=10).map(|i| format!("Item {}", i))),
    );
    SessionController::start(session, MemoryStore::new()).with_sync(hub.connect())
}

/// A save on one session is applied on the other as a dirty, unloaded game.
#[test]
fn test_save_propagates() {
    let hub = LocalSyncHub::new(16);
    let mut alice = controller(&hub, 1);
    let mut bob = controller(&hub, 2);

    let player = alice.edit(|s| s.add_player()).unwrap();
    alice.edit(|s| s.update_player_name(player, "Alice"));
    alice.handle_save_game().unwrap();

    assert_eq!(bob.poll_sync(), 1);
    assert_eq!(bob.session().player(player).unwrap().name, "Alice");
    assert_eq!(bob.session().state(), SessionState::Dirty);
    assert!(!bob.session().flags().is_loaded_game);

    // Nothing echoes back to the publisher
    assert_eq!(alice.poll_sync(), 0);
    assert_eq!(alice.session().state(), SessionState::Clean);
}

/// Remote pushes replace local edits wholesale.
#[test]
fn test_last_applied_wins() {
    let hub = LocalSyncHub::new(16);
    let mut alice = controller(&hub, 1);
    let mut bob = controller(&hub, 2);

    bob.edit(|s| s.add_proposition("bob only"));

    alice.edit(|s| s.add_player()).unwrap();
    alice.handle_save_game().unwrap();
    alice.edit(|s| s.add_player()).unwrap();
    alice.handle_save_game().unwrap();

    assert_eq!(bob.poll_sync(), 2);
    assert_eq!(bob.session().to_snapshot(), alice.session().to_snapshot());
    assert!(bob
        .session()
        .pool()
        .iter()
        .all(|p| p.text != "bob only"));
}

/// Auto-saves publish too.
#[test]
fn test_auto_save_publishes() {
    let hub = LocalSyncHub::new(16);
    let session = GameSession::new(
        GameConfig::new().with_seed(4),
        PropositionPool::from_texts((1..=6).map(|i| i.to_string())),
    );
    let mut alice = SessionController::start(session, MemoryStore::new()).with_sync(hub.connect());
    let mut watcher = hub.connect();

    alice.edit(|s| s.add_player()).unwrap();

    let pushed = watcher.poll().expect("auto-save should publish");
    assert_eq!(pushed.players.len(), 1);
}

/// Presence counts the other connected sessions.
#[test]
fn test_presence() {
    let hub = LocalSyncHub::new(16);
    let alice = controller(&hub, 1);
    assert_eq!(alice.presence().map(|p| p.online_peers), Some(0));

    let bob = controller(&hub, 2);
    assert!(alice.presence().unwrap().is_online());
    drop(bob);
    assert!(!alice.presence().unwrap().is_online());

    let loner = SessionController::new(
        GameSession::new(GameConfig::new(), PropositionPool::new()),
        MemoryStore::new(),
    );
    assert_eq!(loner.presence(), None);
}

/// A structurally broken push is rejected and the session keeps its state.
#[test]
fn test_bad_push_rejected() {
    let hub = LocalSyncHub::new(16);
    let mut bob = controller(&hub, 2);
    bob.edit(|s| s.add_player()).unwrap();
    let before = bob.session().to_snapshot();

    let mut broken = before.clone();
    broken.players.push(broken.players[0].clone());
    let mut mallory = hub.connect();
    mallory.publish(&broken).unwrap();

    assert_eq!(bob.poll_sync(), 0);
    assert_eq!(bob.session().to_snapshot(), before);
}

/// Async delivery feeds the same entry point.
#[tokio::test]
async fn test_async_delivery() {
    let hub = LocalSyncHub::new(16);
    let mut link = hub.connect();
    let mut bob = controller(&hub, 2);

    let mut publisher = hub.connect();
    publisher.publish(&GameSnapshot::default()).unwrap();

    let snapshot = link.recv().await.expect("snapshot should arrive");
    bob.handle_remote_snapshot(&snapshot).unwrap();
    assert!(bob.session().players().is_empty());
    assert_eq!(bob.session().state(), SessionState::Dirty);
}
