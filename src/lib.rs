//! slate — a personal task board.
//!
//! Tasks live in one global order; status columns (Not Started,
//! In Progress, Done) are derived views over it. The core is the drag
//! engine: a [`ops::drag::DragSession`] state machine turns pointer
//! events into committed drops, and the [`ops::resolver`] turns a drop
//! into a status change or an intra-column reorder, applied to the
//! in-memory [`model::board::Board`] first and synced to a
//! [`io::store::TaskStore`] after (optimistic updates, never rolled
//! back).

pub mod cli;
pub mod io;
pub mod model;
pub mod ops;
