use indexmap::IndexMap;

use super::task::{Task, TaskPatch};

/// Error type for board repository operations
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("task not found: {0}")]
    NotFound(String),
    #[error("duplicate task id: {0}")]
    DuplicateId(String),
    #[error("order invariant violated: {0}")]
    InvariantViolation(String),
}

/// The task repository: every task on the board, in one global display
/// order. Column views are derived by filtering this sequence — no column
/// keeps an order of its own.
///
/// Owned by the application root; mutated only through these methods.
#[derive(Debug, Clone, Default)]
pub struct Board {
    /// id → task, in global order (IndexMap preserves insertion order)
    tasks: IndexMap<String, Task>,
}

impl Board {
    pub fn new() -> Self {
        Board::default()
    }

    /// Build a board from a seed sequence (initial load from the store).
    /// The sequence order becomes the global order.
    pub fn from_tasks(tasks: Vec<Task>) -> Result<Self, BoardError> {
        let mut board = Board::new();
        for task in tasks {
            board.insert(task)?;
        }
        Ok(board)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Look up a task by ID
    pub fn get(&self, id: &str) -> Result<&Task, BoardError> {
        self.tasks
            .get(id)
            .ok_or_else(|| BoardError::NotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tasks.contains_key(id)
    }

    /// All tasks in global order
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    /// All task IDs in global order
    pub fn order(&self) -> Vec<String> {
        self.tasks.keys().cloned().collect()
    }

    /// Global-order index of a task, if present
    pub fn position(&self, id: &str) -> Option<usize> {
        self.tasks.get_index_of(id)
    }

    /// Append a task to the end of the global order.
    /// Fails with `DuplicateId` if the ID is already on the board.
    pub fn insert(&mut self, task: Task) -> Result<(), BoardError> {
        if self.tasks.contains_key(&task.id) {
            return Err(BoardError::DuplicateId(task.id));
        }
        self.tasks.insert(task.id.clone(), task);
        Ok(())
    }

    /// Merge the provided fields into an existing task. The ID never
    /// changes and the task keeps its global-order position.
    pub fn update(&mut self, id: &str, patch: TaskPatch) -> Result<&Task, BoardError> {
        let task = self
            .tasks
            .get_mut(id)
            .ok_or_else(|| BoardError::NotFound(id.to_string()))?;
        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(due) = patch.due {
            task.due = due;
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        Ok(task)
    }

    /// Remove a task. Idempotent on absence: removing an ID that is not
    /// on the board is not an error (deletions are user-triggered and may
    /// race a stale view).
    pub fn remove(&mut self, id: &str) {
        self.tasks.shift_remove(id);
    }

    /// Replace the global order with a new sequence of IDs.
    ///
    /// The new sequence must be a permutation of the current ID set — no
    /// task added, removed, or duplicated. On violation the board is left
    /// untouched.
    pub fn replace_order(&mut self, new_order: &[String]) -> Result<(), BoardError> {
        if new_order.len() != self.tasks.len() {
            return Err(BoardError::InvariantViolation(format!(
                "expected {} ids, got {}",
                self.tasks.len(),
                new_order.len()
            )));
        }
        let mut reordered: IndexMap<String, Task> = IndexMap::with_capacity(new_order.len());
        for id in new_order {
            let task = self
                .tasks
                .get(id)
                .ok_or_else(|| BoardError::InvariantViolation(format!("unknown id {}", id)))?;
            if reordered.insert(id.clone(), task.clone()).is_some() {
                return Err(BoardError::InvariantViolation(format!("duplicate id {}", id)));
            }
        }
        self.tasks = reordered;
        Ok(())
    }
}
