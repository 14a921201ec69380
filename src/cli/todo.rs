//! notebook todo command implementations.

use std::path::PathBuf;

use crate::book::Notebook;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::todo::Task;

pub struct AddOptions {
    pub description: String,
    pub dir: PathBuf,
    pub json: bool,
    pub quiet: bool,
}

pub struct LsOptions {
    pub dir: PathBuf,
    pub json: bool,
    pub quiet: bool,
}

/// Options shared by `todo done` and `todo rm`
pub struct SelectOptions {
    /// Positions as typed (1-based)
    pub positions: Vec<usize>,
    /// Positions converted to list indices
    pub indices: Vec<usize>,
    pub dir: PathBuf,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct AddReport<'a> {
    position: usize,
    task: &'a Task,
}

#[derive(serde::Serialize)]
struct LsReport<'a> {
    tasks: &'a [Task],
    done: usize,
}

#[derive(serde::Serialize)]
struct DoneReport {
    requested: usize,
    applied: usize,
    ignored: Vec<usize>,
}

#[derive(serde::Serialize)]
struct RmReport {
    removed: Vec<Task>,
    ignored: Vec<usize>,
    remaining: usize,
}

fn out_of_range(positions: &[usize], len: usize) -> Vec<usize> {
    let mut ignored: Vec<usize> = positions
        .iter()
        .copied()
        .filter(|pos| *pos == 0 || *pos > len)
        .collect();
    ignored.sort_unstable();
    ignored.dedup();
    ignored
}

fn join_positions(positions: &[usize]) -> String {
    positions
        .iter()
        .map(|pos| pos.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn run_add(options: AddOptions) -> Result<()> {
    let mut book = Notebook::open(&options.dir)?;
    let task = book.tasks.add(&options.description)?.clone();
    let position = book.tasks.len();

    let mut human = HumanOutput::new(format!("Task added: {}", task.description));
    human.push_summary("position", position.to_string());
    human.push_summary("id", task.id.clone());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "todo add",
        &AddReport {
            position,
            task: &task,
        },
        Some(&human),
    )
}

pub fn run_ls(options: LsOptions) -> Result<()> {
    let book = Notebook::open(&options.dir)?;
    let tasks = book.tasks.list();
    let done = tasks.iter().filter(|task| task.done).count();

    let header = if tasks.is_empty() {
        "To-do: empty".to_string()
    } else {
        format!("To-do ({done}/{} done)", tasks.len())
    };
    let mut human = HumanOutput::new(header);
    for (idx, task) in tasks.iter().enumerate() {
        human.push_detail(format!("{}. {}", idx + 1, task));
    }
    if tasks.is_empty() {
        human.push_next_step("notebook todo add <task>");
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "todo ls",
        &LsReport { tasks, done },
        Some(&human),
    )
}

pub fn run_done(options: SelectOptions) -> Result<()> {
    let mut book = Notebook::open(&options.dir)?;
    let ignored = out_of_range(&options.positions, book.tasks.len());
    let applied = book.tasks.mark_done(&options.indices)?;

    let mut human = HumanOutput::new(format!("Marked {applied} task(s) done"));
    if !ignored.is_empty() {
        human.push_warning(format!(
            "ignored positions not in the list: {}",
            join_positions(&ignored)
        ));
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "todo done",
        &DoneReport {
            requested: options.positions.len(),
            applied,
            ignored,
        },
        Some(&human),
    )
}

pub fn run_rm(options: SelectOptions) -> Result<()> {
    let mut book = Notebook::open(&options.dir)?;
    let ignored = out_of_range(&options.positions, book.tasks.len());
    let removed = book.tasks.delete(&options.indices)?;

    let mut human = HumanOutput::new(format!("Deleted {} task(s)", removed.len()));
    for task in &removed {
        human.push_detail(task.to_string());
    }
    if !ignored.is_empty() {
        human.push_warning(format!(
            "ignored positions not in the list: {}",
            join_positions(&ignored)
        ));
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "todo rm",
        &RmReport {
            removed,
            ignored,
            remaining: book.tasks.len(),
        },
        Some(&human),
    )
}
