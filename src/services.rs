//! Game-facing services built on the storage capability.
//!
//! Each service owns a fixed set of keys inside whichever backend it was
//! built with. Neither reports errors: failed writes are dropped and failed
//! reads look like missing data, with details going to the diagnostic sink.

/// History of finished games.
pub mod game_record;
/// Backup of the game in progress.
pub mod game_state;

pub use game_record::{GameRecordService, RecordSummary, RECORDS_KEY};
pub use game_state::{GameStateService, GAME_STATE_KEY, MINI_GAME_KEY};
