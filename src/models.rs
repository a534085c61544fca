use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// One finished game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub score: u32,
    /// Highest score reachable in that game
    pub max_score: u32,
    /// RFC 3339 timestamp
    pub date: String,
    pub questions_answered: u32,
    pub won: bool,
}

impl GameRecord {
    /// Creates a record stamped with the current UTC time.
    pub fn new(score: u32, max_score: u32, questions_answered: u32, won: bool) -> Self {
        let date = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default();
        Self::with_date(score, max_score, questions_answered, won, date)
    }

    pub fn with_date(
        score: u32,
        max_score: u32,
        questions_answered: u32,
        won: bool,
        date: impl Into<String>,
    ) -> Self {
        Self {
            score,
            max_score,
            date: date.into(),
            questions_answered,
            won,
        }
    }

    /// Parses [`GameRecord::date`], if it is a valid RFC 3339 timestamp.
    pub fn played_at(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::parse(&self.date, &Rfc3339).ok()
    }
}

/// Snapshot of a game in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub current_question: usize,
    pub score: u32,
    pub lives: u32,
    pub answered: bool,
    /// Index of the chosen answer, `None` while nothing is selected
    #[serde(default)]
    pub selected_answer: Option<usize>,
    /// Question payloads, owned by the UI
    #[serde(default)]
    pub questions: Vec<serde_json::Value>,
}

/// Marker persisted once the mini-game has been won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiniGameFlag {
    pub won: bool,
}
