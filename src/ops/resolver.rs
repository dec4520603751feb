use crate::io::store::TaskStore;
use crate::model::board::Board;
use crate::model::task::{Status, TaskPatch};
use crate::ops::drag::{DragSession, DropTarget, PendingDrop};
use crate::ops::partition::column_order;

/// What a committed gesture did to the board.
///
/// `synced` is false when the store write failed after retries; the
/// in-memory change stands either way (optimistic update) and the caller
/// surfaces a non-blocking "not saved" indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Commit {
    /// Nothing changed: drop on the task's own column, a stale target,
    /// or a cancelled gesture
    Noop,
    /// The dragged task changed column; its global-order position did not
    StatusChanged {
        task_id: String,
        status: Status,
        synced: bool,
    },
    /// Tasks moved within a column
    Reordered { synced: bool },
}

impl Commit {
    /// False only when a real change failed to reach the store
    pub fn synced(&self) -> bool {
        match self {
            Commit::Noop => true,
            Commit::StatusChanged { synced, .. } | Commit::Reordered { synced } => *synced,
        }
    }
}

/// Resolve a committed drop against the board.
///
/// The board is mutated first; the store write is the final action and is
/// never consulted for in-memory correctness. Stale references (dragged or
/// target task deleted mid-gesture) resolve to `Noop` — drag gestures
/// routinely hit stale elements, so these are silent, not errors.
pub fn resolve_drop(board: &mut Board, store: &mut dyn TaskStore, drop: &PendingDrop) -> Commit {
    let Ok(dragged) = board.get(&drop.task_id) else {
        return Commit::Noop;
    };
    let dragged_status = dragged.status;

    match &drop.target {
        DropTarget::Column(status) => {
            if dragged_status == *status {
                return Commit::Noop;
            }
            change_status(board, store, &drop.task_id, *status)
        }
        DropTarget::Task(other_id) => {
            let Ok(other) = board.get(other_id) else {
                // Target vanished mid-drag: treat as cancel
                return Commit::Noop;
            };
            let other_status = other.status;
            if dragged_status == other_status {
                reorder_within_column(board, store, &drop.task_id, other_id, dragged_status)
            } else {
                // Cross-column drop onto a task: membership only, the
                // target's index is ignored
                change_status(board, store, &drop.task_id, other_status)
            }
        }
    }
}

/// Drive a gesture release end to end: consume the session and, if the
/// release commits, resolve the drop.
pub fn finish_drag(
    session: &mut DragSession,
    board: &mut Board,
    store: &mut dyn TaskStore,
    committed: bool,
) -> Commit {
    match session.handle_drag_end(committed) {
        Some(drop) => resolve_drop(board, store, &drop),
        None => Commit::Noop,
    }
}

/// Set the dragged task's status, leaving its global-order position
/// untouched, then notify the store.
fn change_status(
    board: &mut Board,
    store: &mut dyn TaskStore,
    task_id: &str,
    status: Status,
) -> Commit {
    let patch = TaskPatch {
        status: Some(status),
        ..Default::default()
    };
    if board.update(task_id, patch).is_err() {
        return Commit::Noop;
    }
    let synced = match store.write_status(task_id, status) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("status change for {} not saved: {}", task_id, e);
            false
        }
    };
    Commit::StatusChanged {
        task_id: task_id.to_string(),
        status,
        synced,
    }
}

/// Move `dragged` to `target`'s index within their shared column (a
/// single-element move, not a swap), then splice the recomputed column
/// back into the global order at the position where the column's first
/// task originally sat.
fn reorder_within_column(
    board: &mut Board,
    store: &mut dyn TaskStore,
    dragged_id: &str,
    target_id: &str,
    status: Status,
) -> Commit {
    let mut column = column_order(board, status);
    let (Some(from), Some(to)) = (
        column.iter().position(|id| id == dragged_id),
        column.iter().position(|id| id == target_id),
    ) else {
        return Commit::Noop;
    };
    if from == to {
        return Commit::Noop;
    }
    let moved = column.remove(from);
    column.insert(to, moved);

    let mut new_order = Vec::with_capacity(board.len());
    let mut spliced = false;
    for task in board.iter() {
        if task.status == status {
            if !spliced {
                new_order.extend(column.iter().cloned());
                spliced = true;
            }
        } else {
            new_order.push(task.id.clone());
        }
    }

    if let Err(e) = board.replace_order(&new_order) {
        // A non-permutation here is a core defect, never a user error.
        // The board stays at its last good state.
        log::error!("reorder rejected, keeping previous order: {}", e);
        return Commit::Noop;
    }

    let synced = match store.write_order(&new_order) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("new order not saved: {}", e);
            false
        }
    };
    Commit::Reordered { synced }
}
