use indexmap::IndexMap;

use crate::model::board::Board;
use crate::model::task::{Status, Task};

/// Split the board's global order into per-column views.
///
/// Pure projection: every task lands in exactly one column, and the order
/// within a column is the relative order of those tasks in the global
/// sequence. Recomputed on every call — the result always reflects the
/// board as it is now.
pub fn partition<'a>(board: &'a Board, statuses: &[Status]) -> IndexMap<Status, Vec<&'a Task>> {
    let mut columns: IndexMap<Status, Vec<&Task>> = IndexMap::with_capacity(statuses.len());
    for status in statuses {
        columns.insert(*status, Vec::new());
    }
    for task in board.iter() {
        if let Some(column) = columns.get_mut(&task.status) {
            column.push(task);
        }
    }
    columns
}

/// The IDs of one column, in column-local order
pub fn column_order(board: &Board, status: Status) -> Vec<String> {
    board
        .iter()
        .filter(|t| t.status == status)
        .map(|t| t.id.clone())
        .collect()
}
