use std::error::Error;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::store::{RetryStore, TaskStore};
use crate::model::board::Board;
use crate::model::config::BoardConfig;
use crate::model::task::Status;
use crate::ops::drag::{DragSession, DropTarget};
use crate::ops::filter::{ViewFilter, filter_tasks};
use crate::ops::resolver::{Commit, finish_drag};
use crate::ops::task_ops;

/// Everything a command needs: the config, the live board, and the store
/// it syncs to
struct BoardContext {
    config: BoardConfig,
    board: Board,
    store: RetryStore,
}

fn load_context(board_dir: Option<&str>) -> Result<BoardContext, Box<dyn Error>> {
    let start = match board_dir {
        Some(dir) => std::fs::canonicalize(dir)
            .map_err(|e| format!("cannot resolve -C path '{}': {}", dir, e))?,
        None => std::env::current_dir()?,
    };
    let data_dir = config_io::discover_board(&start)?;
    let config = config_io::load_config(&data_dir)?;
    let store = RetryStore::new(
        Box::new(config_io::open_store(&data_dir, &config)?),
        config.sync.retries,
    );
    let board = Board::from_tasks(store.load()?)?;
    Ok(BoardContext {
        config,
        board,
        store,
    })
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn Error>> {
    let json = cli.json;
    match cli.command {
        // Init runs before board discovery
        Commands::Init(args) => cmd_init(args, cli.board_dir.as_deref()),
        Commands::Board => cmd_board(load_context(cli.board_dir.as_deref())?, json),
        Commands::List(args) => cmd_list(load_context(cli.board_dir.as_deref())?, args, json),
        Commands::Add(args) => cmd_add(load_context(cli.board_dir.as_deref())?, args, json),
        Commands::Edit(args) => cmd_edit(load_context(cli.board_dir.as_deref())?, args),
        Commands::Rm(args) => cmd_rm(load_context(cli.board_dir.as_deref())?, args),
        Commands::Move(args) => cmd_move(load_context(cli.board_dir.as_deref())?, args, json),
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_init(args: InitArgs, board_dir: Option<&str>) -> Result<(), Box<dyn Error>> {
    let root = match board_dir {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir()?,
    };
    let data_dir = config_io::init_board(
        &root,
        &args.name,
        args.account.as_deref(),
        args.empty,
        today(),
    )?;
    println!("created board '{}' in {}", args.name, data_dir.display());
    Ok(())
}

fn cmd_board(ctx: BoardContext, json: bool) -> Result<(), Box<dyn Error>> {
    if json {
        let columns = crate::ops::partition::partition(&ctx.board, &Status::ALL)
            .into_iter()
            .map(|(status, tasks)| ColumnJson {
                key: status.key(),
                title: status.column_title(),
                tasks: tasks.iter().map(|t| task_json(t, today())).collect(),
            })
            .collect();
        let out = BoardJson {
            board: ctx.config.board.name.clone(),
            columns,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_board(&ctx.config.board.name, &ctx.board, today());
    }
    Ok(())
}

fn cmd_list(ctx: BoardContext, args: ListArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let filter = match args.filter.as_deref() {
        Some(key) => Some(
            ViewFilter::from_key(key)
                .ok_or_else(|| format!("unknown filter '{}' (try today, week, upcoming, pending, completed)", key))?,
        ),
        None => None,
    };
    let tasks: Vec<_> = match filter {
        Some(f) => filter_tasks(&ctx.board, f, today()),
        None => ctx.board.iter().collect(),
    };

    if json {
        let out: Vec<TaskJson> = tasks.iter().map(|t| task_json(t, today())).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if tasks.is_empty() {
        println!("no tasks here");
    } else {
        for task in tasks {
            print_task_line(task, today());
        }
    }
    Ok(())
}

fn cmd_add(mut ctx: BoardContext, args: AddArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let due = parse_due(&args.due)?;
    let status = match args.status.as_deref() {
        Some(key) => parse_column(key)?,
        None => Status::NotStarted,
    };
    let (id, synced) = task_ops::add_task(&mut ctx.board, &mut ctx.store, &args.title, due, status)?;
    if json {
        println!("{}", serde_json::json!({ "id": id, "synced": synced }));
    } else {
        println!("added {} ({})", short_id(&id), status.column_title());
    }
    warn_unsaved(synced);
    Ok(())
}

fn cmd_edit(mut ctx: BoardContext, args: EditArgs) -> Result<(), Box<dyn Error>> {
    if args.title.is_none() && args.due.is_none() {
        return Err("nothing to edit: pass --title and/or --due".into());
    }
    let id = resolve_id(&ctx.board, &args.id)?;
    let due = args.due.as_deref().map(parse_due).transpose()?;
    let synced = task_ops::edit_task(
        &mut ctx.board,
        &mut ctx.store,
        &id,
        args.title.as_deref(),
        due,
    )?;
    println!("updated {}", short_id(&id));
    warn_unsaved(synced);
    Ok(())
}

fn cmd_rm(mut ctx: BoardContext, args: RmArgs) -> Result<(), Box<dyn Error>> {
    let id = resolve_id(&ctx.board, &args.id)?;
    let synced = task_ops::delete_task(&mut ctx.board, &mut ctx.store, &id);
    println!("removed {}", short_id(&id));
    warn_unsaved(synced);
    Ok(())
}

/// The drag gesture, driven from the command line: start over the task,
/// hover the resolved target, release.
fn cmd_move(mut ctx: BoardContext, args: MoveArgs, json: bool) -> Result<(), Box<dyn Error>> {
    let dragged = resolve_id(&ctx.board, &args.id)?;
    let target = match Status::from_key(&args.target) {
        Some(status) => DropTarget::Column(status),
        None => DropTarget::Task(resolve_id(&ctx.board, &args.target).map_err(|_| {
            format!(
                "no column or task matching '{}' (columns: not-started, in-progress, done)",
                args.target
            )
        })?),
    };

    let mut session = DragSession::new();
    session.handle_drag_start(&ctx.board, &dragged);
    session.handle_drag_over(Some(target));
    let commit = finish_drag(&mut session, &mut ctx.board, &mut ctx.store, true);

    if json {
        let result = match &commit {
            Commit::Noop => "no-change",
            Commit::StatusChanged { .. } => "status-changed",
            Commit::Reordered { .. } => "reordered",
        };
        println!(
            "{}",
            serde_json::json!({ "result": result, "synced": commit.synced() })
        );
    } else {
        match &commit {
            Commit::Noop => println!("no change"),
            Commit::StatusChanged { status, .. } => {
                println!("moved {} to {}", short_id(&dragged), status.column_title())
            }
            Commit::Reordered { .. } => println!("reordered {}", short_id(&dragged)),
        }
    }
    warn_unsaved(commit.synced());
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Accept a full task ID or any unique prefix of one
fn resolve_id(board: &Board, prefix: &str) -> Result<String, String> {
    if board.contains(prefix) {
        return Ok(prefix.to_string());
    }
    let matches: Vec<&str> = board
        .iter()
        .filter(|t| t.id.starts_with(prefix))
        .map(|t| t.id.as_str())
        .collect();
    match matches.as_slice() {
        [] => Err(format!("no task matching '{}'", prefix)),
        [id] => Ok(id.to_string()),
        _ => Err(format!("'{}' matches {} tasks, be more specific", prefix, matches.len())),
    }
}

fn parse_due(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{}', expected YYYY-MM-DD", s))
}

fn parse_column(key: &str) -> Result<Status, String> {
    Status::from_key(key).ok_or_else(|| {
        format!(
            "unknown column '{}' (columns: not-started, in-progress, done)",
            key
        )
    })
}

fn warn_unsaved(synced: bool) {
    if !synced {
        eprintln!("warning: change applied locally but not saved");
    }
}
