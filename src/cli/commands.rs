use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "slate", about = concat!("slate v", env!("CARGO_PKG_VERSION"), " - your tasks in columns"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different board directory
    #[arg(short = 'C', long = "board-dir", global = true)]
    pub board_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new board in the current directory
    Init(InitArgs),
    /// Show the board as status columns
    Board,
    /// List tasks, optionally through a view filter
    List(ListArgs),
    /// Add a task
    Add(AddArgs),
    /// Edit a task's title or due date
    Edit(EditArgs),
    /// Delete a task
    Rm(RmArgs),
    /// Drop a task onto a column or onto another task
    Move(MoveArgs),
}

#[derive(Args)]
pub struct InitArgs {
    /// Board name
    #[arg(default_value = "personal")]
    pub name: String,

    /// Store tasks under an account instead of the shared local file
    #[arg(long)]
    pub account: Option<String>,

    /// Start with no tasks instead of the demo board
    #[arg(long)]
    pub empty: bool,
}

#[derive(Args)]
pub struct ListArgs {
    /// View filter: today | week | upcoming | pending | completed
    #[arg(long)]
    pub filter: Option<String>,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,

    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: String,

    /// Starting column (default: not-started)
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task ID (a unique prefix is enough)
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    /// New due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<String>,
}

#[derive(Args)]
pub struct RmArgs {
    /// Task ID (a unique prefix is enough)
    pub id: String,
}

#[derive(Args)]
pub struct MoveArgs {
    /// Task to drag (a unique prefix is enough)
    pub id: String,

    /// Drop target: a column key (not-started | in-progress | done) or
    /// another task's ID
    pub target: String,
}
