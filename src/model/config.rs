use serde::{Deserialize, Serialize};

/// Configuration from board.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    pub board: BoardInfo,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardInfo {
    pub name: String,
}

/// Which store backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// Guest mode: one shared local board file
    Local,
    /// Authenticated mode: board file scoped to an account
    Account,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_mode")]
    pub mode: StorageMode,
    /// Account name, required when mode = "account"
    #[serde(default)]
    pub account: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            mode: StorageMode::Local,
            account: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// How many times a failed store write is retried before the change
    /// is reported as unsaved
    #[serde(default = "default_retries")]
    pub retries: u32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            retries: default_retries(),
        }
    }
}

fn default_mode() -> StorageMode {
    StorageMode::Local
}

fn default_retries() -> u32 {
    3
}
