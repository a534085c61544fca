use std::sync::Arc;

use quiz_storage::storage::{
    create_storage, create_storage_by_name, InMemorySessionStore, MemorySink, SessionId, Storage,
    StorageBackend,
};
use quiz_storage::{
    GameRecord, GameRecordService, GameState, GameStateService, StorageConfig, StorageHandles,
    StorageType,
};

fn handles() -> (StorageHandles, InMemorySessionStore, SessionId, Arc<MemorySink>) {
    let config = StorageConfig::default();
    let sessions = config.session_store();
    let session = SessionId::new();
    let sink = Arc::new(MemorySink::new());
    let handles = StorageHandles::from_config(&config, &sessions, session)
        .unwrap()
        .with_diagnostics(sink.clone());
    (handles, sessions, session, sink)
}

fn game(score: u32, won: bool) -> GameRecord {
    GameRecord::new(score, 100, 10, won)
}

#[test]
fn roundtrip_on_both_backends() {
    let (handles, _, _, sink) = handles();

    for kind in [StorageType::Local, StorageType::Session] {
        let storage: StorageBackend<Vec<GameRecord>> = create_storage(kind, &handles);
        let records = vec![game(10, true), game(20, false)];

        assert_eq!(storage.load("history"), None);
        storage.save("history", &records);
        assert_eq!(storage.load("history"), Some(records));

        storage.remove("history");
        storage.remove("history");
        assert_eq!(storage.load("history"), None);
    }

    assert!(sink.is_empty());
}

#[test]
fn clear_wipes_keys_of_every_service() {
    let (handles, _, _, _) = handles();
    let records = GameRecordService::with_defaults(&handles);
    let state = GameStateService::with_defaults(&handles);

    records.save_record(game(40, true));
    state.set_mini_game_won();

    let raw: StorageBackend<serde_json::Value> = create_storage(StorageType::Local, &handles);
    raw.clear();

    assert_eq!(records.get_total_games(), 0);
    assert!(!state.has_mini_game_won());
    assert!(handles.local.is_empty());
}

#[test]
fn unknown_backend_name_matches_local() {
    let (handles, _, _, _) = handles();
    let unknown: StorageBackend<u32> = create_storage_by_name("cloud", &handles);
    let local: StorageBackend<u32> = create_storage(StorageType::Local, &handles);

    unknown.save("n", &7);
    assert_eq!(local.load("n"), Some(7));

    local.save("n", &8);
    assert_eq!(unknown.load("n"), Some(8));
}

#[test]
fn quiz_flow_through_mini_game() {
    let (handles, _, _, sink) = handles();
    let records = GameRecordService::with_defaults(&handles);
    let state = GameStateService::new(StorageType::Session, &handles);

    // player leaves for the mini-game halfway through
    let snapshot = GameState {
        current_question: 4,
        score: 40,
        lives: 1,
        answered: false,
        selected_answer: None,
        questions: vec![serde_json::json!({"q": "2 + 2?"})],
    };
    state.save_game_state(&snapshot);
    state.set_mini_game_won();

    // and comes back
    let restored = state.load_game_state().unwrap();
    assert_eq!(restored, snapshot);
    assert!(state.has_mini_game_won());

    records.save_record(game(restored.score + 10, true));
    state.clear_game_state();

    assert_eq!(state.load_game_state(), None);
    assert!(!state.has_mini_game_won());
    assert_eq!(records.get_best_score(), 50);
    assert_eq!(records.get_win_streak(), 1);
    assert!(sink.is_empty());
}

#[test]
fn session_data_ends_with_the_session() {
    let (handles, sessions, session, _) = handles();
    let state = GameStateService::new(StorageType::Session, &handles);
    let records = GameRecordService::with_defaults(&handles);

    state.set_mini_game_won();
    records.save_record(game(10, true));

    sessions.end_session(session);

    assert!(!state.has_mini_game_won());
    assert_eq!(records.get_total_games(), 1);

    // a new session starts empty
    let next = StorageHandles::from_config(&StorageConfig::default(), &sessions, SessionId::new()).unwrap();
    assert!(!GameStateService::new(StorageType::Session, &next).has_mini_game_won());
}

#[test]
fn quota_failure_keeps_history_intact() {
    let config = StorageConfig {
        local_quota: Some(400),
        ..StorageConfig::default()
    };
    let sessions = config.session_store();
    let sink = Arc::new(MemorySink::new());
    let handles = StorageHandles::from_config(&config, &sessions, SessionId::new())
        .unwrap()
        .with_diagnostics(sink.clone());
    let records = GameRecordService::with_defaults(&handles);

    // each record takes 91 units of JSON, so four fit under the quota
    for score in 0..10 {
        records.save_record(GameRecord::with_date(score, 100, 10, true, "2025-01-01T00:00:00Z"));
    }

    let scores: Vec<u32> = records.get_all_records().iter().map(|r| r.score).collect();
    assert_eq!(scores, vec![0, 1, 2, 3]);
    assert_eq!(sink.len(), 6);
}

#[cfg(feature = "sqlite_local_store")]
#[test]
fn local_history_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig {
        local_path: Some(dir.path().join("quiz.db")),
        ..StorageConfig::default()
    };

    {
        let sessions = config.session_store();
        let handles = StorageHandles::from_config(&config, &sessions, SessionId::new()).unwrap();
        let records = GameRecordService::with_defaults(&handles);
        for score in [10, 50, 30] {
            records.save_record(game(score, true));
        }
    }

    let sessions = config.session_store();
    let handles = StorageHandles::from_config(&config, &sessions, SessionId::new()).unwrap();
    let records = GameRecordService::with_defaults(&handles);

    assert_eq!(records.get_total_games(), 3);
    assert_eq!(records.get_best_score(), 50);
    assert_eq!(records.get_average_score(), 30);
    assert_eq!(records.get_win_streak(), 3);
}
