use chrono::NaiveDate;

use crate::model::board::Board;
use crate::model::task::{Status, Task};

/// How a due date reads relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    /// Due in n days (n > 0)
    Remaining(i64),
    DueToday,
    /// Due n days ago (n > 0)
    Overdue(i64),
}

impl DueStatus {
    pub fn of(due: NaiveDate, today: NaiveDate) -> DueStatus {
        let diff = (due - today).num_days();
        if diff > 0 {
            DueStatus::Remaining(diff)
        } else if diff == 0 {
            DueStatus::DueToday
        } else {
            DueStatus::Overdue(-diff)
        }
    }

    pub fn label(&self) -> String {
        match self {
            DueStatus::Remaining(days) => format!("{} days remaining", days),
            DueStatus::DueToday => "Due today".to_string(),
            DueStatus::Overdue(days) => format!("Due {} days ago", days),
        }
    }
}

/// The time- and status-based view tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewFilter {
    /// Due exactly today
    Today,
    /// Due within the next seven days (today included)
    Week,
    /// Due more than a week out
    Upcoming,
    /// Not yet done, any due date
    Pending,
    /// Done, any due date
    Completed,
}

impl ViewFilter {
    pub fn key(self) -> &'static str {
        match self {
            ViewFilter::Today => "today",
            ViewFilter::Week => "week",
            ViewFilter::Upcoming => "upcoming",
            ViewFilter::Pending => "pending",
            ViewFilter::Completed => "completed",
        }
    }

    pub fn from_key(key: &str) -> Option<ViewFilter> {
        match key {
            "today" => Some(ViewFilter::Today),
            "week" => Some(ViewFilter::Week),
            "upcoming" => Some(ViewFilter::Upcoming),
            "pending" => Some(ViewFilter::Pending),
            "completed" => Some(ViewFilter::Completed),
            _ => None,
        }
    }

    fn matches(self, task: &Task, today: NaiveDate) -> bool {
        let diff = (task.due - today).num_days();
        match self {
            ViewFilter::Today => diff == 0,
            ViewFilter::Week => (0..=7).contains(&diff),
            ViewFilter::Upcoming => diff > 7,
            ViewFilter::Pending => task.status != Status::Done,
            ViewFilter::Completed => task.status == Status::Done,
        }
    }
}

/// Tasks matching a view filter, in global order. A pure derived view —
/// never an independent order.
pub fn filter_tasks(board: &Board, filter: ViewFilter, today: NaiveDate) -> Vec<&Task> {
    board.iter().filter(|t| filter.matches(t, today)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, d).unwrap()
    }

    fn sample_board() -> Board {
        Board::from_tasks(vec![
            Task::with_id("overdue", "Call mom", day(10), Status::NotStarted),
            Task::with_id("today", "Play Fortnite", day(18), Status::InProgress),
            Task::with_id("soon", "Learn dnd", day(20), Status::NotStarted),
            Task::with_id("later", "Go to the Gym", day(28), Status::NotStarted),
            Task::with_id("done", "Ship it", day(17), Status::Done),
        ])
        .unwrap()
    }

    fn ids<'a>(tasks: &'a [&'a Task]) -> Vec<&'a str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn due_status_buckets() {
        let today = day(18);
        assert_eq!(DueStatus::of(day(21), today), DueStatus::Remaining(3));
        assert_eq!(DueStatus::of(day(18), today), DueStatus::DueToday);
        assert_eq!(DueStatus::of(day(15), today), DueStatus::Overdue(3));
    }

    #[test]
    fn due_status_labels() {
        assert_eq!(DueStatus::Remaining(3).label(), "3 days remaining");
        assert_eq!(DueStatus::DueToday.label(), "Due today");
        assert_eq!(DueStatus::Overdue(8).label(), "Due 8 days ago");
    }

    #[test]
    fn today_filter() {
        let board = sample_board();
        assert_eq!(
            ids(&filter_tasks(&board, ViewFilter::Today, day(18))),
            vec!["today"]
        );
    }

    #[test]
    fn week_filter_includes_today_through_seventh_day() {
        let board = sample_board();
        assert_eq!(
            ids(&filter_tasks(&board, ViewFilter::Week, day(18))),
            vec!["today", "soon"]
        );
        // "later" (day 28) is 10 days out, "overdue" is behind us
    }

    #[test]
    fn upcoming_filter() {
        let board = sample_board();
        assert_eq!(
            ids(&filter_tasks(&board, ViewFilter::Upcoming, day(18))),
            vec!["later"]
        );
    }

    #[test]
    fn pending_and_completed_split_by_status() {
        let board = sample_board();
        assert_eq!(
            ids(&filter_tasks(&board, ViewFilter::Pending, day(18))),
            vec!["overdue", "today", "soon", "later"]
        );
        assert_eq!(
            ids(&filter_tasks(&board, ViewFilter::Completed, day(18))),
            vec!["done"]
        );
    }

    #[test]
    fn filter_key_round_trip() {
        for filter in [
            ViewFilter::Today,
            ViewFilter::Week,
            ViewFilter::Upcoming,
            ViewFilter::Pending,
            ViewFilter::Completed,
        ] {
            assert_eq!(ViewFilter::from_key(filter.key()), Some(filter));
        }
        assert_eq!(ViewFilter::from_key("someday"), None);
    }
}
