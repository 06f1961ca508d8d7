//! Command-line front end for the task board.
//!
//! Usage:
//!
//! ```text
//! kanbaner [--data-dir DIR] [--config FILE] [-v] <command>
//! ```
//!
//! Commands are `list`, `add`, `edit`, `delete` and `move`. Tasks are
//! addressed by stage and the index shown by `list`. The board is kept in
//! `<DIR>/<storage_key>.json`; `DIR` defaults to `KANBANER_DATA_DIR` or the
//! current directory.

mod render;

use std::io::{Read, Write};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use clap::{Parser, Subcommand};
use eyre::{WrapErr, bail};
use kanbaner::board::{
    adapters::FileStorage,
    domain::{Stage, Task, TaskId},
    ports::BoardStorage,
    services::{
        BoardConfig, BoardStore, BoardStoreError, DeleteRequest, EditSession, LoadOutcome,
        MoveOutcome, SessionError, Submitted,
    },
};
use mockable::{Clock, DefaultClock};
use tracing::warn;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "kanbaner")]
#[command(about = "Three-stage task board kept in a local JSON store")]
struct Cli {
    /// Directory holding the board file
    #[arg(long, env = "KANBANER_DATA_DIR", value_name = "DIR")]
    data_dir: Option<Utf8PathBuf>,

    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<Utf8PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show every stage
    List,
    /// Add a task to the tail of a stage
    Add {
        /// Stage: todo, progress or done
        stage: Stage,
        /// Task title
        title: String,
        /// Optional description
        description: Option<String>,
    },
    /// Replace title and description of a task
    Edit {
        /// Stage holding the task
        stage: Stage,
        /// Index shown by `list`
        index: usize,
        /// New title
        title: String,
        /// New description
        description: Option<String>,
    },
    /// Delete a task
    Delete {
        /// Stage holding the task
        stage: Stage,
        /// Index shown by `list`
        index: usize,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Move a task to the tail of another stage
    Move {
        /// Stage holding the task
        from: Stage,
        /// Index shown by `list`
        index: usize,
        /// Target stage
        to: Stage,
    },
}

fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => BoardConfig::default(),
    };
    let data_dir = cli.data_dir.unwrap_or_else(|| Utf8PathBuf::from("."));
    let storage = FileStorage::open(&data_dir)
        .wrap_err_with(|| format!("failed to open data directory {data_dir}"))?;

    let mut store = BoardStore::new(storage, DefaultClock, config);
    match store.load() {
        Ok(LoadOutcome::Restored {
            persisted: false, ..
        }) => warn!("upgraded board could not be saved, changes will retry the write"),
        Ok(_) => {}
        Err(err) => warn!(error = %err, "continuing with an empty board"),
    }

    let mut out = std::io::stdout().lock();
    run(cli.command, &mut store, &mut out)
}

fn run<S, C>(
    command: Command,
    store: &mut BoardStore<S, C>,
    out: &mut impl Write,
) -> eyre::Result<()>
where
    S: BoardStorage,
    C: Clock,
{
    let mut session = EditSession::new();
    match command {
        Command::List => {
            let now = store.clock().local();
            render::render_board(out, store.board(), &now)?;
        }
        Command::Add {
            stage,
            title,
            description,
        } => {
            session.begin_create(stage);
            let submitted = session.submit(store, &title, description.as_deref().unwrap_or(""));
            report_submit(out, submitted)?;
        }
        Command::Edit {
            stage,
            index,
            title,
            description,
        } => {
            let id = task_id_at(store, stage, index)?;
            session.begin_edit(stage, id);
            let submitted = session.submit(store, &title, description.as_deref().unwrap_or(""));
            report_submit(out, submitted)?;
        }
        Command::Delete { stage, index, yes } => {
            let id = task_id_at(store, stage, index)?;
            let removed = match session.request_delete(store, stage, id)? {
                DeleteRequest::Deleted(task) => task,
                DeleteRequest::AwaitingConfirmation if yes => session.confirm_delete(store)?,
                DeleteRequest::AwaitingConfirmation => {
                    bail!("refusing to delete without confirmation, pass --yes")
                }
            };
            writeln!(out, "deleted '{}' from {stage}", removed.title())?;
        }
        Command::Move { from, index, to } => {
            let position = store.position(from, index)?;
            match store.move_task(position, to)? {
                MoveOutcome::SameStage => writeln!(out, "task already in {to}")?,
                MoveOutcome::Moved(_) => writeln!(out, "moved task {index} from {from} to {to}")?,
            }
        }
    }
    Ok(())
}

fn task_id_at<S, C>(
    store: &BoardStore<S, C>,
    stage: Stage,
    index: usize,
) -> Result<TaskId, BoardStoreError>
where
    S: BoardStorage,
    C: Clock,
{
    let tasks = store.tasks(stage);
    tasks
        .get(index)
        .map(Task::id)
        .ok_or(BoardStoreError::OutOfRange {
            stage,
            index,
            len: tasks.len(),
        })
}

fn report_submit(
    out: &mut impl Write,
    submitted: Result<Submitted, SessionError>,
) -> eyre::Result<()> {
    match submitted? {
        Submitted::Created(id) => writeln!(out, "created task {id}")?,
        Submitted::Updated(id) => writeln!(out, "updated task {id}")?,
    }
    Ok(())
}

fn load_config(path: &Utf8Path) -> eyre::Result<BoardConfig> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| eyre::eyre!("config path {path} has no file name"))?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())
        .wrap_err_with(|| format!("failed to open config directory {parent}"))?;
    let mut raw = String::new();
    dir.open(file_name)
        .and_then(|mut file| file.read_to_string(&mut raw))
        .wrap_err_with(|| format!("failed to read config {path}"))?;
    BoardConfig::from_json(&raw).wrap_err_with(|| format!("failed to parse config {path}"))
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("KANBANER_LOG").unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("kanbaner=debug,warn")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
