//! notebook - notes, to-dos, search and a calculator
//!
//! This library holds the core of the notebook tool. The CLI and the terminal
//! UI are thin layers over it.
//!
//! # Core Concepts
//!
//! - **Notes**: free text keyed by a unique title, kept in insertion order
//! - **Tasks**: an ordered to-do list with a done flag per entry
//! - **Search**: case-insensitive substring match over note titles and content
//! - **Calculator**: a small arithmetic evaluator that answers `Error` on bad input
//!
//! # Module Organization
//!
//! - `book`: the notebook facade that opens everything from a data directory
//! - `calc`: expression tokenizer, parser and the calculator entry buffer
//! - `cli`: command-line interface using clap
//! - `config`: configuration loading from `.notebook.toml`
//! - `error`: error types and result aliases
//! - `notes`: the note store
//! - `output`: human and JSON output for commands
//! - `search`: keyword search and snippets
//! - `storage`: JSON load/save with atomic replacement
//! - `todo`: the task list
//! - `ui`: ratatui front end

pub mod book;
pub mod calc;
pub mod cli;
pub mod config;
pub mod error;
pub mod notes;
pub mod output;
pub mod search;
pub mod storage;
pub mod todo;
pub mod ui;

pub use book::Notebook;
pub use error::{Error, Result};
