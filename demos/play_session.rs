//! Plays a few rounds against the configured storage and prints the stats.
//!
//! ```text
//! RUST_LOG=debug QUIZ_STORAGE_PATH=quiz.db cargo run --example play_session
//! ```
use quiz_storage::storage::{InMemorySessionStore, SessionId};
use quiz_storage::{GameRecord, GameRecordService, GameState, GameStateService, StorageConfig, StorageHandles};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = StorageConfig::from_env();
    let sessions: InMemorySessionStore = config.session_store();
    let session = SessionId::new();
    let handles = StorageHandles::from_config(&config, &sessions, session)?;

    let records = GameRecordService::new(config.default_type, &handles);
    let state = GameStateService::new(config.default_type, &handles);

    state.save_game_state(&GameState {
        current_question: 2,
        score: 20,
        lives: 2,
        answered: false,
        selected_answer: None,
        questions: vec![],
    });
    state.set_mini_game_won();

    if let Some(restored) = state.load_game_state() {
        let bonus = if state.has_mini_game_won() { 10 } else { 0 };
        records.save_record(GameRecord::new(restored.score + bonus, 50, 5, true));
    }
    state.clear_game_state();

    let summary = records.get_summary();
    println!(
        "{} games ({} won), best {}, average {}, streak {}",
        summary.total_games, summary.total_wins, summary.best_score, summary.average_score, summary.win_streak
    );

    sessions.end_session(session);
    Ok(())
}
