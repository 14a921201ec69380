//! Command-line interface for notebook
//!
//! This module defines the CLI structure using clap derive macros.
//! Each command group is implemented in its own submodule.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::Result;

mod calc;
mod note;
mod search;
mod todo;

/// notebook - Digital Notebook
///
/// Notes, a to-do list, keyword search and a calculator, saved to JSON files
/// in the data directory.
#[derive(Parser, Debug)]
#[command(name = "notebook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data directory holding notes.json and todos.json (defaults to current directory)
    #[arg(long, global = true, env = "NOTEBOOK_DIR")]
    pub dir: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug) logging when RUST_LOG is unset
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save, show, delete and list notes
    #[command(subcommand)]
    Note(NoteCommands),

    /// Manage the to-do list
    #[command(subcommand)]
    Todo(TodoCommands),

    /// Search notes by keyword (case-insensitive, title and content)
    Search {
        /// Keyword to look for
        keyword: String,
    },

    /// Evaluate an arithmetic expression (+ - * / and parentheses)
    Calc {
        /// Expression, e.g. "2+3*4"; several arguments are joined with spaces
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        expression: Vec<String>,
    },

    /// Open the tabbed terminal interface
    Ui,
}

/// Note subcommands
#[derive(Subcommand, Debug)]
pub enum NoteCommands {
    /// Save a note, replacing any note with the same title
    Save {
        /// Note title
        title: String,

        /// Note content
        content: Option<String>,

        /// Read the content from a file
        #[arg(short = 'F', long, conflicts_with = "content")]
        file: Option<PathBuf>,
    },

    /// Print a note's content
    Show {
        /// Note title
        title: String,
    },

    /// Delete a note
    Rm {
        /// Note title
        title: String,
    },

    /// List saved note titles
    Ls,
}

/// To-do subcommands
#[derive(Subcommand, Debug)]
pub enum TodoCommands {
    /// Add a task
    Add {
        /// Task description
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
    },

    /// List tasks with their positions
    Ls,

    /// Mark tasks done by position (1-based; unknown positions are ignored)
    Done {
        #[arg(required = true)]
        positions: Vec<usize>,
    },

    /// Delete tasks by position (1-based; unknown positions are ignored)
    Rm {
        #[arg(required = true)]
        positions: Vec<usize>,
    },
}

/// Data directory from `--dir`/`NOTEBOOK_DIR`, else the current directory
fn resolve_dir(dir: Option<PathBuf>) -> Result<PathBuf> {
    match dir {
        Some(path) => Ok(path),
        None => Ok(std::env::current_dir()?),
    }
}

/// Convert 1-based CLI positions into list indices; 0 can never match
fn to_indices(positions: &[usize]) -> Vec<usize> {
    positions
        .iter()
        .filter_map(|pos| pos.checked_sub(1))
        .collect()
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let dir = resolve_dir(self.dir)?;
        match self.command {
            Commands::Note(cmd) => match cmd {
                NoteCommands::Save {
                    title,
                    content,
                    file,
                } => note::run_save(note::SaveOptions {
                    title,
                    content,
                    file,
                    dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                NoteCommands::Show { title } => note::run_show(note::ShowOptions {
                    title,
                    dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                NoteCommands::Rm { title } => note::run_rm(note::RmOptions {
                    title,
                    dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                NoteCommands::Ls => note::run_ls(note::LsOptions {
                    dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
            },
            Commands::Todo(cmd) => match cmd {
                TodoCommands::Add { description } => todo::run_add(todo::AddOptions {
                    description: description.join(" "),
                    dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TodoCommands::Ls => todo::run_ls(todo::LsOptions {
                    dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TodoCommands::Done { positions } => todo::run_done(todo::SelectOptions {
                    indices: to_indices(&positions),
                    positions,
                    dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
                TodoCommands::Rm { positions } => todo::run_rm(todo::SelectOptions {
                    indices: to_indices(&positions),
                    positions,
                    dir,
                    json: self.json,
                    quiet: self.quiet,
                }),
            },
            Commands::Search { keyword } => search::run(search::SearchOptions {
                keyword,
                dir,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Calc { expression } => calc::run(calc::CalcOptions {
                expression: expression.join(" "),
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Ui => {
                let book = crate::book::Notebook::open(dir)?;
                crate::ui::run(book)
            }
        }
    }
}
