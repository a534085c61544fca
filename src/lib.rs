pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

pub use config::StorageConfig;
pub use errors::{StorageError, StorageResult};
pub use models::{GameRecord, GameState, MiniGameFlag};
pub use services::{GameRecordService, GameStateService, RecordSummary};
pub use storage::{StorageHandles, StorageType};
