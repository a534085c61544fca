use crate::models::GameRecord;
use crate::storage::{create_storage, Storage, StorageHandles, StorageType};

/// Key holding the list of finished games.
pub const RECORDS_KEY: &str = "gameRecords";

/// Aggregates over every stored record, computed from a single load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordSummary {
    pub total_games: usize,
    pub total_wins: usize,
    pub best_score: u32,
    pub average_score: u32,
    pub win_streak: usize,
}

/// Keeps the history of finished games.
///
/// `save_record` is a load-append-save sequence; share one service between
/// threads only behind a lock.
pub struct GameRecordService {
    storage: Box<dyn Storage<Vec<GameRecord>>>,
}

impl GameRecordService {
    pub fn new(kind: StorageType, handles: &StorageHandles) -> Self {
        Self::with_storage(Box::new(create_storage::<Vec<GameRecord>>(kind, handles)))
    }

    /// Uses local storage.
    pub fn with_defaults(handles: &StorageHandles) -> Self {
        Self::new(StorageType::default(), handles)
    }

    pub fn with_storage(storage: Box<dyn Storage<Vec<GameRecord>>>) -> Self {
        Self { storage }
    }

    /// Appends `record` to the stored history.
    pub fn save_record(&self, record: GameRecord) {
        let mut records = self.get_all_records();
        records.push(record);
        self.storage.save(RECORDS_KEY, &records);
    }

    /// All records in play order; empty when nothing was stored.
    pub fn get_all_records(&self) -> Vec<GameRecord> {
        self.storage.load(RECORDS_KEY).unwrap_or_default()
    }

    pub fn get_best_score(&self) -> u32 {
        best_score(&self.get_all_records())
    }

    /// Mean score rounded to the nearest integer.
    pub fn get_average_score(&self) -> u32 {
        average_score(&self.get_all_records())
    }

    pub fn get_total_games(&self) -> usize {
        self.get_all_records().len()
    }

    /// Number of consecutive wins ending with the most recent game.
    pub fn get_win_streak(&self) -> usize {
        win_streak(&self.get_all_records())
    }

    pub fn get_summary(&self) -> RecordSummary {
        let records = self.get_all_records();
        RecordSummary {
            total_games: records.len(),
            total_wins: records.iter().filter(|r| r.won).count(),
            best_score: best_score(&records),
            average_score: average_score(&records),
            win_streak: win_streak(&records),
        }
    }

    /// Removes the history. Other keys in the backend are left alone.
    pub fn clear_all_records(&self) {
        self.storage.remove(RECORDS_KEY);
    }
}

fn best_score(records: &[GameRecord]) -> u32 {
    records.iter().map(|r| r.score).max().unwrap_or(0)
}

fn average_score(records: &[GameRecord]) -> u32 {
    if records.is_empty() {
        return 0;
    }
    let total: u64 = records.iter().map(|r| u64::from(r.score)).sum();
    (total as f64 / records.len() as f64).round() as u32
}

fn win_streak(records: &[GameRecord]) -> usize {
    records.iter().rev().take_while(|r| r.won).count()
}
