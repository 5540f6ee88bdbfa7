//! File store tests.
//!
//! These run the JSON file store against a temporary directory, directly
//! and through the session controller.

use std::fs;

use rust_bingo::core::{GameConfig, GameError};
use rust_bingo::persistence::{FileStoreConfig, JsonFileStore, PersistenceGateway};
use rust_bingo::pool::PropositionPool;
use rust_bingo::session::{GameSession, SessionController, SessionState};
use rust_bingo::snapshot::GameSnapshot;

fn store(dir: &tempfile::TempDir) -> JsonFileStore {
    JsonFileStore::new(FileStoreConfig::new(dir.path())).expect("store should open")
}

fn session() -> GameSession {
    GameSession::new(
        GameConfig::new().with_seed(21).with_auto_save(false),
        PropositionPool::from_texts((1..=8).map(|i| format!("Event {}", i))),
    )
}

/// An empty store has no last game.
#[test]
fn test_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(&dir);

    assert_eq!(store.load_last(), Ok(None));
    assert!(store.history().unwrap().is_empty());
}

/// The newest save is the last game, and history lists newest first.
#[test]
fn test_save_and_history() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = store(&dir);

    let mut s = session();
    s.add_player().unwrap();
    let first = s.to_snapshot();
    s.add_player().unwrap();
    let second = s.to_snapshot();

    store.save(&first).unwrap();
    store.save(&second).unwrap();

    assert_eq!(store.load_last(), Ok(Some(second.clone())));

    let history = store.history().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].snapshot, second);
    assert_eq!(history[1].snapshot, first);
    assert!(history[0].saved_at >= history[1].saved_at);
}

/// Saves beyond the history limit are pruned oldest first.
#[test]
fn test_history_limit() {
    let dir = tempfile::tempdir().unwrap();
    let mut store =
        JsonFileStore::new(FileStoreConfig::new(dir.path()).with_history_limit(2)).unwrap();

    let mut s = session();
    for _ in 0..4 {
        s.add_proposition("more");
        store.save(&s.to_snapshot()).unwrap();
    }

    let history = store.history().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].snapshot.propositions.len(), 12);
    assert_eq!(history[1].snapshot.propositions.len(), 11);
}

/// Downloads land in the downloads directory and load back.
#[test]
fn test_download_and_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = store(&dir);

    let mut s = session();
    let player = s.add_player().unwrap();
    s.update_player_name(player, "Noor");
    let snapshot = s.to_snapshot();

    let path = store.download(&snapshot).unwrap();
    assert!(path.starts_with(dir.path().join("downloads")));
    assert_eq!(store.load_from_file(&path), Ok(snapshot));

    // Downloads are not saves
    assert_eq!(store.load_last(), Ok(None));
}

/// Malformed files fail with a parse error; missing files with persistence.
#[test]
fn test_load_from_bad_files() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(&dir);

    let bad = dir.path().join("bad.json");
    fs::write(&bad, "{ \"players\": [").unwrap();
    assert!(matches!(store.load_from_file(&bad), Err(GameError::Parse(_))));

    let missing = dir.path().join("missing.json");
    assert!(matches!(
        store.load_from_file(&missing),
        Err(GameError::Persistence { .. })
    ));
}

/// Files written by other clients in the shared format load as-is.
#[test]
fn test_load_foreign_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = store(&dir);

    let path = dir.path().join("shared.json");
    fs::write(
        &path,
        r#"{"players":[{"id":1700000000001,"name":"Ana","grid":[1,2,3,4,5,6],
             "validatedItems":[[2,1700000000500]]}],
            "propositions":[{"id":1,"text":"A"},{"id":2,"text":"B"},{"id":3,"text":"C"},
                            {"id":4,"text":"D"},{"id":5,"text":"E"},{"id":6,"text":"F"}]}"#,
    )
    .unwrap();

    let snapshot = store.load_from_file(&path).unwrap();
    assert_eq!(snapshot.players[0].name, "Ana");
    assert!(snapshot.stale_references().is_empty());
}

/// Full controller cycle over the file store, across restarts.
#[test]
fn test_controller_round_trip_across_restart() {
    let dir = tempfile::tempdir().unwrap();

    let mut controller = SessionController::start(session(), store(&dir));
    let player = controller.edit(|s| s.add_player()).unwrap();
    controller.edit(|s| s.validate_item(player, 1)).unwrap();
    controller.handle_save_game().unwrap();
    let saved = controller.session().to_snapshot();

    let restarted = SessionController::start(session(), store(&dir));
    assert_eq!(restarted.session().to_snapshot(), saved);
    assert_eq!(restarted.session().state(), SessionState::Clean);
    assert_eq!(restarted.saved_games().unwrap().len(), 1);
}

/// A malformed import is rejected and nothing is applied.
#[test]
fn test_controller_rejects_bad_import() {
    let dir = tempfile::tempdir().unwrap();
    let bad = dir.path().join("bad.json");
    fs::write(&bad, "not a game").unwrap();

    let mut controller = SessionController::new(session(), store(&dir));
    controller.edit(|s| s.add_player()).unwrap();
    let before = controller.session().to_snapshot();

    assert!(matches!(
        controller.handle_load_game(&bad),
        Err(GameError::Parse(_))
    ));
    assert_eq!(controller.session().to_snapshot(), before);
    assert_eq!(controller.session().state(), SessionState::Dirty);
}

/// A good import is flagged as a loaded game.
#[test]
fn test_controller_import_marks_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = store(&dir);

    let mut other = session();
    other.add_player().unwrap();
    let path = store.download(&other.to_snapshot()).unwrap();

    let mut controller = SessionController::new(session(), store);
    controller.handle_load_game(&path).unwrap();

    assert_eq!(controller.session().state(), SessionState::LoadedDirty);
    assert_eq!(controller.session().players().len(), 1);
}

/// An unreadable last save falls back to fresh grids.
#[test]
fn test_corrupt_last_save_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let saves = dir.path().join("saves");
    fs::create_dir_all(&saves).unwrap();
    fs::write(saves.join("game-1700000000000.json"), "garbage").unwrap();

    let controller = SessionController::start(session(), store(&dir));
    assert!(controller.session().players().is_empty());
    assert_eq!(controller.session().state(), SessionState::Clean);

    // History skips the unreadable file
    assert!(controller.saved_games().unwrap().is_empty());
}

/// Snapshot JSON written by the store is the shared wire format.
#[test]
fn test_written_format() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = store(&dir);

    let mut s = session();
    let player = s.add_player().unwrap();
    s.validate_item(player, 0).unwrap();
    store.save(&s.to_snapshot()).unwrap();

    let file = fs::read_dir(dir.path().join("saves"))
        .unwrap()
        .next()
        .unwrap()
        .unwrap()
        .path();
    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(file).unwrap()).unwrap();

    assert!(value["players"][0]["grid"].is_array());
    assert_eq!(value["players"][0]["validatedItems"][0][0], 0);
    assert!(value["players"][0]["validatedItems"][0][1].is_i64());
    assert_eq!(value["propositions"].as_array().unwrap().len(), 8);

    let parsed = GameSnapshot::from_json(&value.to_string()).unwrap();
    assert_eq!(parsed, s.to_snapshot());
}
