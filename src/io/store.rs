use std::thread;
use std::time::Duration;

use crate::model::task::{Status, Task};

/// Error from the persistence boundary
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("could not read {path}: {source}")]
    Read {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    #[error("malformed board data: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// The persistence boundary for board changes.
///
/// Writes follow the optimistic-update contract: the in-memory board is
/// already correct before any of these are called, a failed write never
/// rolls it back, and a later write for the same task supersedes an
/// earlier one (last-write-wins).
pub trait TaskStore {
    /// Initial ordered task sequence; its order seeds the global order.
    fn load(&self) -> Result<Vec<Task>, SyncError>;

    /// Record a status change for one task.
    fn write_status(&mut self, id: &str, status: Status) -> Result<(), SyncError>;

    /// Record a new global order.
    fn write_order(&mut self, ids: &[String]) -> Result<(), SyncError>;

    /// Record a full snapshot (task created, edited, or deleted).
    fn write_tasks(&mut self, tasks: &[Task]) -> Result<(), SyncError>;
}

/// Wraps a store and retries failed writes a bounded number of times
/// before giving up. After exhaustion the error is surfaced to the caller,
/// which reports the change as unsaved — never rolled back.
pub struct RetryStore {
    inner: Box<dyn TaskStore>,
    retries: u32,
}

impl RetryStore {
    pub fn new(inner: Box<dyn TaskStore>, retries: u32) -> Self {
        RetryStore { inner, retries }
    }

    fn with_retry<F>(&mut self, what: &str, mut write: F) -> Result<(), SyncError>
    where
        F: FnMut(&mut dyn TaskStore) -> Result<(), SyncError>,
    {
        let mut attempt = 0;
        loop {
            match write(self.inner.as_mut()) {
                Ok(()) => return Ok(()),
                Err(e) if attempt < self.retries => {
                    attempt += 1;
                    log::warn!("{} write failed (attempt {}): {}", what, attempt, e);
                    thread::sleep(Duration::from_millis(25 << attempt.min(6)));
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl TaskStore for RetryStore {
    fn load(&self) -> Result<Vec<Task>, SyncError> {
        self.inner.load()
    }

    fn write_status(&mut self, id: &str, status: Status) -> Result<(), SyncError> {
        self.with_retry("status", |s| s.write_status(id, status))
    }

    fn write_order(&mut self, ids: &[String]) -> Result<(), SyncError> {
        self.with_retry("order", |s| s.write_order(ids))
    }

    fn write_tasks(&mut self, tasks: &[Task]) -> Result<(), SyncError> {
        self.with_retry("snapshot", |s| s.write_tasks(tasks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Store that fails the first `fail_count` writes, then succeeds.
    struct FlakyStore {
        fail_count: Rc<Cell<u32>>,
        calls: Rc<Cell<u32>>,
    }

    fn io_err() -> SyncError {
        SyncError::Write {
            path: "flaky".into(),
            source: std::io::Error::other("simulated outage"),
        }
    }

    impl TaskStore for FlakyStore {
        fn load(&self) -> Result<Vec<Task>, SyncError> {
            Ok(Vec::new())
        }

        fn write_status(&mut self, _id: &str, _status: Status) -> Result<(), SyncError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail_count.get() > 0 {
                self.fail_count.set(self.fail_count.get() - 1);
                return Err(io_err());
            }
            Ok(())
        }

        fn write_order(&mut self, _ids: &[String]) -> Result<(), SyncError> {
            self.write_status("", Status::Done)
        }

        fn write_tasks(&mut self, _tasks: &[Task]) -> Result<(), SyncError> {
            self.write_status("", Status::Done)
        }
    }

    fn flaky(failures: u32) -> (RetryStore, Rc<Cell<u32>>) {
        let calls = Rc::new(Cell::new(0));
        let store = FlakyStore {
            fail_count: Rc::new(Cell::new(failures)),
            calls: calls.clone(),
        };
        (RetryStore::new(Box::new(store), 2), calls)
    }

    #[test]
    fn retries_until_success() {
        let (mut store, calls) = flaky(2);
        store.write_status("1", Status::Done).unwrap();
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn gives_up_after_bounded_attempts() {
        let (mut store, calls) = flaky(10);
        assert!(store.write_status("1", Status::Done).is_err());
        // 1 initial attempt + 2 retries
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn no_retry_on_immediate_success() {
        let (mut store, calls) = flaky(0);
        store.write_order(&[]).unwrap();
        assert_eq!(calls.get(), 1);
    }
}
