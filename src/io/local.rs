use std::fs;
use std::path::{Path, PathBuf};

use crate::io::store::{SyncError, TaskStore};
use crate::model::task::{Status, Task};

/// File-backed task store. Guest mode writes one shared board file;
/// authenticated mode scopes the file to an account directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Guest mode: `<data_dir>/board.json`
    pub fn local(data_dir: &Path) -> Self {
        JsonStore {
            path: data_dir.join("board.json"),
        }
    }

    /// Authenticated mode: `<data_dir>/accounts/<account>/board.json`
    pub fn account(data_dir: &Path, account: &str) -> Self {
        JsonStore {
            path: data_dir.join("accounts").join(account).join("board.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_tasks(&self) -> Result<Vec<Task>, SyncError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let text = fs::read_to_string(&self.path).map_err(|e| SyncError::Read {
            path: self.path.clone(),
            source: e,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Write the full task list atomically (temp file + rename).
    fn write_file(&self, tasks: &[Task]) -> Result<(), SyncError> {
        let parent = self.path.parent().unwrap_or(Path::new("."));
        fs::create_dir_all(parent).map_err(|e| SyncError::Write {
            path: parent.to_path_buf(),
            source: e,
        })?;
        let json = serde_json::to_string_pretty(tasks)?;
        let tmp = tempfile::NamedTempFile::new_in(parent).map_err(|e| SyncError::Write {
            path: self.path.clone(),
            source: e,
        })?;
        fs::write(tmp.path(), json).map_err(|e| SyncError::Write {
            path: tmp.path().to_path_buf(),
            source: e,
        })?;
        tmp.persist(&self.path).map_err(|e| SyncError::Write {
            path: self.path.clone(),
            source: e.error,
        })?;
        Ok(())
    }
}

impl TaskStore for JsonStore {
    /// Missing file reads as an empty board (first run).
    fn load(&self) -> Result<Vec<Task>, SyncError> {
        self.read_tasks()
    }

    /// Keyed write: patch the one task in the file. A stale ID (task no
    /// longer in the file) leaves the file unchanged.
    fn write_status(&mut self, id: &str, status: Status) -> Result<(), SyncError> {
        let mut tasks = self.read_tasks()?;
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(());
        };
        task.status = status;
        self.write_file(&tasks)
    }

    /// Rewrite the file in the given order. IDs the file no longer has
    /// are skipped; file tasks missing from `ids` keep their relative
    /// order at the tail.
    fn write_order(&mut self, ids: &[String]) -> Result<(), SyncError> {
        let mut tasks = self.read_tasks()?;
        let mut ordered = Vec::with_capacity(tasks.len());
        for id in ids {
            if let Some(pos) = tasks.iter().position(|t| &t.id == id) {
                ordered.push(tasks.remove(pos));
            }
        }
        ordered.append(&mut tasks);
        self.write_file(&ordered)
    }

    fn write_tasks(&mut self, tasks: &[Task]) -> Result<(), SyncError> {
        self.write_file(tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn due(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, day).unwrap()
    }

    fn sample_tasks() -> Vec<Task> {
        vec![
            Task::with_id("1", "Go to the Gym", due(25), Status::NotStarted),
            Task::with_id("2", "Learn dnd", due(20), Status::NotStarted),
            Task::with_id("3", "Call mom", due(10), Status::Done),
        ]
    }

    #[test]
    fn load_missing_file_is_empty_board() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::local(dir.path());
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn write_then_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonStore::local(dir.path());
        store.write_tasks(&sample_tasks()).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, sample_tasks());
    }

    #[test]
    fn write_status_patches_one_task() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonStore::local(dir.path());
        store.write_tasks(&sample_tasks()).unwrap();

        store.write_status("1", Status::Done).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded[0].status, Status::Done);
        // Everything else untouched, order included
        assert_eq!(loaded[0].title, "Go to the Gym");
        assert_eq!(loaded[1], sample_tasks()[1]);
    }

    #[test]
    fn write_status_with_stale_id_is_harmless() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonStore::local(dir.path());
        store.write_tasks(&sample_tasks()).unwrap();
        store.write_status("gone", Status::Done).unwrap();
        assert_eq!(store.load().unwrap(), sample_tasks());
    }

    #[test]
    fn write_order_reorders_file() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonStore::local(dir.path());
        store.write_tasks(&sample_tasks()).unwrap();

        let order: Vec<String> = ["3", "1", "2"].iter().map(|s| s.to_string()).collect();
        store.write_order(&order).unwrap();
        let ids: Vec<String> = store.load().unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, order);
    }

    #[test]
    fn account_store_is_scoped_per_account() {
        let dir = TempDir::new().unwrap();
        let mut ren = JsonStore::account(dir.path(), "ren");
        let mut kai = JsonStore::account(dir.path(), "kai");

        ren.write_tasks(&sample_tasks()).unwrap();
        assert_eq!(ren.load().unwrap().len(), 3);
        assert!(kai.load().unwrap().is_empty());

        kai.write_tasks(&sample_tasks()[..1]).unwrap();
        assert_eq!(ren.load().unwrap().len(), 3);
        assert_eq!(kai.load().unwrap().len(), 1);
    }

    #[test]
    fn malformed_file_is_a_sync_error() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::local(dir.path());
        fs::write(store.path(), "not json {{{").unwrap();
        assert!(matches!(store.load(), Err(SyncError::Malformed(_))));
    }
}
