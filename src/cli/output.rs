use chrono::NaiveDate;
use serde::Serialize;

use crate::model::task::{Status, Task};
use crate::ops::filter::DueStatus;
use crate::ops::partition::partition;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub id: String,
    pub title: String,
    pub due: String,
    pub status: Status,
    pub due_label: String,
}

#[derive(Serialize)]
pub struct ColumnJson {
    pub key: &'static str,
    pub title: &'static str,
    pub tasks: Vec<TaskJson>,
}

#[derive(Serialize)]
pub struct BoardJson {
    pub board: String,
    pub columns: Vec<ColumnJson>,
}

pub fn task_json(task: &Task, today: NaiveDate) -> TaskJson {
    TaskJson {
        id: task.id.clone(),
        title: task.title.clone(),
        due: task.due.format("%Y-%m-%d").to_string(),
        status: task.status,
        due_label: due_label(task, today),
    }
}

/// Done tasks celebrate instead of counting days
pub fn due_label(task: &Task, today: NaiveDate) -> String {
    if task.status == Status::Done {
        "Well done!".to_string()
    } else {
        DueStatus::of(task.due, today).label()
    }
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// A task ID shortened for display; full IDs still work everywhere
pub fn short_id(id: &str) -> &str {
    &id[..id.len().min(8)]
}

pub fn print_task_line(task: &Task, today: NaiveDate) {
    println!(
        "  {}  {}  ({})",
        short_id(&task.id),
        task.title,
        due_label(task, today)
    );
}

pub fn print_board(name: &str, board: &crate::model::board::Board, today: NaiveDate) {
    println!("{}", name);
    for (status, tasks) in partition(board, &Status::ALL) {
        println!();
        println!("{} ({})", status.column_title(), tasks.len());
        if tasks.is_empty() {
            println!("  (empty)");
        }
        for task in tasks {
            print_task_line(task, today);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, d).unwrap()
    }

    #[test]
    fn done_tasks_celebrate() {
        let task = Task::with_id("1", "Ship it", day(10), Status::Done);
        assert_eq!(due_label(&task, day(18)), "Well done!");
    }

    #[test]
    fn pending_tasks_count_days() {
        let task = Task::with_id("1", "Ship it", day(21), Status::InProgress);
        assert_eq!(due_label(&task, day(18)), "3 days remaining");
    }

    #[test]
    fn short_id_handles_short_inputs() {
        assert_eq!(short_id("abcdefgh-rest"), "abcdefgh");
        assert_eq!(short_id("ab"), "ab");
    }
}
