use chrono::NaiveDate;

use crate::io::store::TaskStore;
use crate::model::board::{Board, BoardError};
use crate::model::task::{Status, Task, TaskPatch};

/// Error type for task CRUD operations
#[derive(Debug, thiserror::Error)]
pub enum TaskOpError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Create a task at the end of the global order. Returns the new ID and
/// whether the snapshot reached the store.
pub fn add_task(
    board: &mut Board,
    store: &mut dyn TaskStore,
    title: &str,
    due: NaiveDate,
    status: Status,
) -> Result<(String, bool), TaskOpError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(TaskOpError::EmptyTitle);
    }
    let task = Task::new(title.to_string(), due, status);
    let id = task.id.clone();
    board.insert(task)?;
    Ok((id, persist(board, store)))
}

/// Edit a task's title and/or due date. Status is not editable here —
/// only drag commits change status.
pub fn edit_task(
    board: &mut Board,
    store: &mut dyn TaskStore,
    id: &str,
    title: Option<&str>,
    due: Option<NaiveDate>,
) -> Result<bool, TaskOpError> {
    let title = match title {
        Some(t) if t.trim().is_empty() => return Err(TaskOpError::EmptyTitle),
        Some(t) => Some(t.trim().to_string()),
        None => None,
    };
    board.update(
        id,
        TaskPatch {
            title,
            due,
            status: None,
        },
    )?;
    Ok(persist(board, store))
}

/// Delete a task. Idempotent on absence, like the repository itself.
pub fn delete_task(board: &mut Board, store: &mut dyn TaskStore, id: &str) -> bool {
    board.remove(id);
    persist(board, store)
}

/// Write the board snapshot to the store. The board is already correct;
/// a failed write is reported as unsynced, never rolled back.
fn persist(board: &Board, store: &mut dyn TaskStore) -> bool {
    let snapshot: Vec<Task> = board.iter().cloned().collect();
    match store.write_tasks(&snapshot) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("board snapshot not saved: {}", e);
            false
        }
    }
}
