use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate};

use crate::io::local::JsonStore;
use crate::io::store::{SyncError, TaskStore};
use crate::model::config::{BoardConfig, BoardInfo, StorageConfig, StorageMode, SyncConfig};
use crate::model::task::{Status, Task};

/// Error type for board setup and config I/O
#[derive(Debug, thiserror::Error)]
pub enum BoardIoError {
    #[error("not a slate board: no .slate/ directory found")]
    NotABoard,
    #[error("a board already exists at {0}")]
    AlreadyExists(PathBuf),
    #[error("storage mode is \"account\" but no account is configured")]
    MissingAccount,
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse board.toml: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("could not serialize board.toml: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
    #[error(transparent)]
    Sync(#[from] SyncError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Discover the board by walking up from the given directory, looking for
/// a `.slate/` directory with a board.toml.
pub fn discover_board(start: &Path) -> Result<PathBuf, BoardIoError> {
    let mut current = start.to_path_buf();
    loop {
        let data_dir = current.join(".slate");
        if data_dir.is_dir() && data_dir.join("board.toml").exists() {
            return Ok(data_dir);
        }
        if !current.pop() {
            return Err(BoardIoError::NotABoard);
        }
    }
}

/// Read and parse board.toml from the data directory
pub fn load_config(data_dir: &Path) -> Result<BoardConfig, BoardIoError> {
    let path = data_dir.join("board.toml");
    let text = fs::read_to_string(&path).map_err(|e| BoardIoError::Read {
        path: path.clone(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}

pub fn save_config(data_dir: &Path, config: &BoardConfig) -> Result<(), BoardIoError> {
    let text = toml::to_string_pretty(config)?;
    fs::write(data_dir.join("board.toml"), text)?;
    Ok(())
}

/// Open the store the config selects: one shared local file in guest
/// mode, an account-scoped file in authenticated mode. The core is
/// agnostic to which one is active.
pub fn open_store(data_dir: &Path, config: &BoardConfig) -> Result<JsonStore, BoardIoError> {
    match config.storage.mode {
        StorageMode::Local => Ok(JsonStore::local(data_dir)),
        StorageMode::Account => {
            let account = config
                .storage
                .account
                .as_deref()
                .ok_or(BoardIoError::MissingAccount)?;
            Ok(JsonStore::account(data_dir, account))
        }
    }
}

/// Create a new board: `.slate/` with board.toml and, unless `empty`,
/// a small demo board to drag around.
pub fn init_board(
    root: &Path,
    name: &str,
    account: Option<&str>,
    empty: bool,
    today: NaiveDate,
) -> Result<PathBuf, BoardIoError> {
    let data_dir = root.join(".slate");
    if data_dir.join("board.toml").exists() {
        return Err(BoardIoError::AlreadyExists(data_dir));
    }
    fs::create_dir_all(&data_dir)?;

    let config = BoardConfig {
        board: BoardInfo {
            name: name.to_string(),
        },
        storage: StorageConfig {
            mode: if account.is_some() {
                StorageMode::Account
            } else {
                StorageMode::Local
            },
            account: account.map(str::to_string),
        },
        sync: SyncConfig::default(),
    };
    save_config(&data_dir, &config)?;

    if !empty {
        let mut store = open_store(&data_dir, &config)?;
        store.write_tasks(&demo_tasks(today))?;
    }
    Ok(data_dir)
}

/// The starter tasks a fresh board ships with
fn demo_tasks(today: NaiveDate) -> Vec<Task> {
    vec![
        Task::new(
            "Go to the gym".into(),
            today + Duration::days(7),
            Status::NotStarted,
        ),
        Task::new(
            "Learn drag and drop".into(),
            today + Duration::days(2),
            Status::NotStarted,
        ),
        Task::new("Play Fortnite".into(), today, Status::InProgress),
        Task::new(
            "Call mom".into(),
            today - Duration::days(8),
            Status::Done,
        ),
    ]
}
