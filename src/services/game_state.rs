use crate::models::{GameState, MiniGameFlag};
use crate::storage::{create_storage, Storage, StorageHandles, StorageType};

/// Key holding the in-progress game snapshot.
pub const GAME_STATE_KEY: &str = "gameStateBackup";
/// Key holding the mini-game flag.
pub const MINI_GAME_KEY: &str = "miniGameWon";

/// Backs up the running game while the player is away in the mini-game.
pub struct GameStateService {
    state: Box<dyn Storage<GameState>>,
    flag: Box<dyn Storage<MiniGameFlag>>,
}

impl GameStateService {
    pub fn new(kind: StorageType, handles: &StorageHandles) -> Self {
        Self::with_storage(
            Box::new(create_storage::<GameState>(kind, handles)),
            Box::new(create_storage::<MiniGameFlag>(kind, handles)),
        )
    }

    /// Uses local storage.
    pub fn with_defaults(handles: &StorageHandles) -> Self {
        Self::new(StorageType::default(), handles)
    }

    /// Both storages are expected to point at the same backend.
    pub fn with_storage(state: Box<dyn Storage<GameState>>, flag: Box<dyn Storage<MiniGameFlag>>) -> Self {
        Self { state, flag }
    }

    /// Stores `state`, replacing any earlier snapshot.
    pub fn save_game_state(&self, state: &GameState) {
        self.state.save(GAME_STATE_KEY, state);
    }

    pub fn load_game_state(&self) -> Option<GameState> {
        self.state.load(GAME_STATE_KEY)
    }

    /// Drops the snapshot and the mini-game flag. Each key is removed on its own.
    pub fn clear_game_state(&self) {
        self.state.remove(GAME_STATE_KEY);
        self.flag.remove(MINI_GAME_KEY);
    }

    pub fn set_mini_game_won(&self) {
        self.flag.save(MINI_GAME_KEY, &MiniGameFlag { won: true });
    }

    /// True only when the flag exists and says `won: true`.
    pub fn has_mini_game_won(&self) -> bool {
        self.flag.load(MINI_GAME_KEY).is_some_and(|f| f.won)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{StorageError, StorageResult};
    use crate::storage::{MemorySink, StorageArea, StorageOperation};
    use serde_json::json;
    use std::sync::Arc;

    fn snapshot(question: usize) -> GameState {
        GameState {
            current_question: question,
            score: 30,
            lives: 2,
            answered: true,
            selected_answer: Some(1),
            questions: vec![json!({"q": "capital of Peru?", "a": ["Lima", "Cusco"]})],
        }
    }

    fn service() -> (GameStateService, StorageHandles, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let handles = StorageHandles::in_memory().with_diagnostics(sink.clone());
        (GameStateService::with_defaults(&handles), handles, sink)
    }

    #[test]
    fn no_snapshot_initially() {
        let (service, _, _) = service();
        assert_eq!(service.load_game_state(), None);
    }

    #[test]
    fn save_overwrites_previous_snapshot() {
        let (service, handles, _) = service();
        service.save_game_state(&snapshot(1));
        service.save_game_state(&snapshot(4));

        assert_eq!(service.load_game_state(), Some(snapshot(4)));
        assert_eq!(handles.local.keys(), vec![GAME_STATE_KEY.to_string()]);
    }

    #[test]
    fn mini_game_flag_lifecycle() {
        let (service, _, _) = service();
        assert!(!service.has_mini_game_won());

        service.set_mini_game_won();
        assert!(service.has_mini_game_won());

        service.clear_game_state();
        assert!(!service.has_mini_game_won());
    }

    #[test]
    fn clear_removes_both_keys_only() {
        let (service, handles, _) = service();
        handles.local.set_item("gameRecords", "[]").unwrap();
        service.save_game_state(&snapshot(2));
        service.set_mini_game_won();

        service.clear_game_state();

        assert_eq!(service.load_game_state(), None);
        assert_eq!(handles.local.keys(), vec!["gameRecords".to_string()]);
    }

    #[test]
    fn flag_must_be_exactly_true() {
        let (service, handles, sink) = service();

        handles.local.set_item(MINI_GAME_KEY, r#"{"won":false}"#).unwrap();
        assert!(!service.has_mini_game_won());

        handles.local.set_item(MINI_GAME_KEY, r#"{"won":"yes"}"#).unwrap();
        assert!(!service.has_mini_game_won());

        handles.local.set_item(MINI_GAME_KEY, "true").unwrap();
        assert!(!service.has_mini_game_won());

        // malformed values are reported, a plain `false` is not
        assert_eq!(sink.len(), 2);
    }

    /// Area whose removals of one key fail.
    struct StickyKey {
        inner: crate::storage::InMemoryLocalArea,
        sticky: &'static str,
    }

    impl StorageArea for StickyKey {
        fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
            self.inner.get_item(key)
        }
        fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
            self.inner.set_item(key, value)
        }
        fn remove_item(&self, key: &str) -> StorageResult<()> {
            if key == self.sticky {
                return Err(StorageError::Unavailable("locked".into()));
            }
            self.inner.remove_item(key)
        }
        fn clear(&self) -> StorageResult<()> {
            self.inner.clear()
        }
        fn len(&self) -> usize {
            self.inner.len()
        }
        fn keys(&self) -> Vec<String> {
            self.inner.keys()
        }
    }

    #[test]
    fn failed_state_removal_still_clears_flag() {
        let sink = Arc::new(MemorySink::new());
        let area = Arc::new(StickyKey {
            inner: crate::storage::InMemoryLocalArea::new(),
            sticky: GAME_STATE_KEY,
        });
        let handles = StorageHandles::new(area.clone(), area, sink.clone());
        let service = GameStateService::new(StorageType::Session, &handles);

        service.save_game_state(&snapshot(0));
        service.set_mini_game_won();
        service.clear_game_state();

        assert!(service.load_game_state().is_some());
        assert!(!service.has_mini_game_won());

        let entries = sink.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, StorageOperation::Remove);
        assert_eq!(entries[0].key.as_deref(), Some(GAME_STATE_KEY));
    }
}
