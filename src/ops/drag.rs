use crate::model::board::Board;
use crate::model::task::Status;

/// A drop target, as resolved by the UI layer's hit-testing.
/// The core never does collision geometry — it only consumes these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// A column header or empty column region
    Column(Status),
    /// Another task's card
    Task(String),
}

/// Lifecycle of a single drag gesture
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Gesture started over a task, no target seen yet
    Dragging { task_id: String, origin: Status },
    /// Pointer is over the board; `target` is `None` while over no
    /// droppable region
    Hovering {
        task_id: String,
        origin: Status,
        target: Option<DropTarget>,
    },
}

/// A committed gesture, ready for the resolver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDrop {
    pub task_id: String,
    pub target: DropTarget,
}

/// Tracks one drag gesture at a time. Ephemeral: created idle, consumed
/// on release, never persisted. Driven synchronously by discrete pointer
/// events — each transition completes before the next event is accepted.
#[derive(Debug, Default)]
pub struct DragSession {
    state: DragState,
}

impl DragSession {
    pub fn new() -> Self {
        DragSession::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == DragState::Idle
    }

    /// ID of the task being dragged, if a gesture is active
    pub fn dragged_id(&self) -> Option<&str> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging { task_id, .. } | DragState::Hovering { task_id, .. } => {
                Some(task_id)
            }
        }
    }

    /// Gesture start. Fails silently (stays idle) when the pointer is not
    /// over a task the board knows, or while another gesture is active —
    /// the UI enforces one pointer capture, so the latter is defensive
    /// only in the sense that we ignore it rather than panic.
    pub fn handle_drag_start(&mut self, board: &Board, task_id: &str) {
        if !self.is_idle() {
            return;
        }
        if let Ok(task) = board.get(task_id) {
            self.state = DragState::Dragging {
                task_id: task.id.clone(),
                origin: task.status,
            };
        }
    }

    /// Pointer moved over a (possibly absent) droppable region.
    /// Ignored while idle.
    pub fn handle_drag_over(&mut self, target: Option<DropTarget>) {
        let (task_id, origin) = match &self.state {
            DragState::Idle => return,
            DragState::Dragging { task_id, origin }
            | DragState::Hovering { task_id, origin, .. } => (task_id.clone(), *origin),
        };
        self.state = DragState::Hovering {
            task_id,
            origin,
            target,
        };
    }

    /// Gesture release. Returns the drop to commit, or `None` when the
    /// gesture cancels: released with no target, released before any
    /// hover, or an uncommitted release reported by the UI.
    pub fn handle_drag_end(&mut self, committed: bool) -> Option<PendingDrop> {
        let state = std::mem::take(&mut self.state);
        if !committed {
            return None;
        }
        match state {
            DragState::Hovering {
                task_id,
                target: Some(target),
                ..
            } => Some(PendingDrop { task_id, target }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Task;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn due(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, day).unwrap()
    }

    fn sample_board() -> Board {
        Board::from_tasks(vec![
            Task::with_id("1", "Go to the Gym", due(25), Status::NotStarted),
            Task::with_id("2", "Play Fortnite", due(18), Status::InProgress),
        ])
        .unwrap()
    }

    #[test]
    fn start_over_task_begins_dragging() {
        let board = sample_board();
        let mut session = DragSession::new();
        session.handle_drag_start(&board, "1");
        assert_eq!(
            session.state(),
            &DragState::Dragging {
                task_id: "1".into(),
                origin: Status::NotStarted,
            }
        );
        assert_eq!(session.dragged_id(), Some("1"));
    }

    #[test]
    fn start_over_nothing_stays_idle() {
        let board = sample_board();
        let mut session = DragSession::new();
        session.handle_drag_start(&board, "missing");
        assert!(session.is_idle());
    }

    #[test]
    fn start_during_active_gesture_is_ignored() {
        let board = sample_board();
        let mut session = DragSession::new();
        session.handle_drag_start(&board, "1");
        session.handle_drag_start(&board, "2");
        assert_eq!(session.dragged_id(), Some("1"));
    }

    #[test]
    fn hover_tracks_latest_target() {
        let board = sample_board();
        let mut session = DragSession::new();
        session.handle_drag_start(&board, "1");

        session.handle_drag_over(Some(DropTarget::Column(Status::Done)));
        session.handle_drag_over(Some(DropTarget::Task("2".into())));
        assert_eq!(
            session.state(),
            &DragState::Hovering {
                task_id: "1".into(),
                origin: Status::NotStarted,
                target: Some(DropTarget::Task("2".into())),
            }
        );

        // Pointer left all droppable regions
        session.handle_drag_over(None);
        assert_eq!(
            session.state(),
            &DragState::Hovering {
                task_id: "1".into(),
                origin: Status::NotStarted,
                target: None,
            }
        );
    }

    #[test]
    fn hover_while_idle_is_ignored() {
        let mut session = DragSession::new();
        session.handle_drag_over(Some(DropTarget::Column(Status::Done)));
        assert!(session.is_idle());
    }

    #[test]
    fn release_with_target_commits() {
        let board = sample_board();
        let mut session = DragSession::new();
        session.handle_drag_start(&board, "1");
        session.handle_drag_over(Some(DropTarget::Column(Status::Done)));

        let drop = session.handle_drag_end(true);
        assert_eq!(
            drop,
            Some(PendingDrop {
                task_id: "1".into(),
                target: DropTarget::Column(Status::Done),
            })
        );
        assert!(session.is_idle());
    }

    #[test]
    fn release_with_no_target_cancels() {
        let board = sample_board();
        let mut session = DragSession::new();
        session.handle_drag_start(&board, "1");
        session.handle_drag_over(None);
        assert_eq!(session.handle_drag_end(true), None);
        assert!(session.is_idle());
    }

    #[test]
    fn release_before_any_hover_cancels() {
        let board = sample_board();
        let mut session = DragSession::new();
        session.handle_drag_start(&board, "1");
        assert_eq!(session.handle_drag_end(true), None);
        assert!(session.is_idle());
    }

    #[test]
    fn uncommitted_release_cancels_even_over_a_target() {
        let board = sample_board();
        let mut session = DragSession::new();
        session.handle_drag_start(&board, "1");
        session.handle_drag_over(Some(DropTarget::Column(Status::Done)));
        assert_eq!(session.handle_drag_end(false), None);
        assert!(session.is_idle());
    }
}
