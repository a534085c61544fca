use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which backend a service persists into.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum StorageType {
    /// Persists across sessions.
    #[default]
    Local,
    /// Scoped to the current session (tab).
    Session,
}

impl StorageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageType::Local => "local",
            StorageType::Session => "session",
        }
    }

    /// Resolves a backend name. Anything unrecognized selects [`StorageType::Local`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "local" => StorageType::Local,
            "session" => StorageType::Session,
            other => {
                log::debug!("unknown storage type {other:?}, using local storage");
                StorageType::Local
            }
        }
    }
}

impl FromStr for StorageType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl From<&str> for StorageType {
    fn from(s: &str) -> Self {
        Self::from_name(s)
    }
}

impl From<String> for StorageType {
    fn from(s: String) -> Self {
        Self::from_name(&s)
    }
}

impl Display for StorageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
