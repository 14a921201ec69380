//! notebook note command implementations.

use std::path::PathBuf;

use crate::book::Notebook;
use crate::error::Result;
use crate::output::{emit_plain, emit_success, HumanOutput, OutputOptions};

pub struct SaveOptions {
    pub title: String,
    pub content: Option<String>,
    pub file: Option<PathBuf>,
    pub dir: PathBuf,
    pub json: bool,
    pub quiet: bool,
}

pub struct ShowOptions {
    pub title: String,
    pub dir: PathBuf,
    pub json: bool,
    pub quiet: bool,
}

pub struct RmOptions {
    pub title: String,
    pub dir: PathBuf,
    pub json: bool,
    pub quiet: bool,
}

pub struct LsOptions {
    pub dir: PathBuf,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct SaveReport {
    title: String,
    created: bool,
    total: usize,
}

#[derive(serde::Serialize)]
struct ShowReport<'a> {
    title: &'a str,
    content: &'a str,
}

#[derive(serde::Serialize)]
struct RmReport {
    title: String,
    total: usize,
}

#[derive(serde::Serialize)]
struct LsReport<'a> {
    titles: Vec<&'a str>,
}

pub fn run_save(options: SaveOptions) -> Result<()> {
    let mut book = Notebook::open(&options.dir)?;

    let raw = match (&options.content, &options.file) {
        (_, Some(path)) => std::fs::read_to_string(path)?,
        (Some(content), None) => content.clone(),
        (None, None) => String::new(),
    };
    let content = raw.trim();
    let title = options.title.trim().to_string();
    let created = !book.notes.notes().contains(&title);

    book.notes.put(&title, content)?;

    let report = SaveReport {
        title: title.clone(),
        created,
        total: book.notes.len(),
    };

    let mut human = HumanOutput::new(format!("Note '{title}' saved successfully!"));
    human.push_summary("notes", book.notes.len().to_string());
    if !created {
        human.push_warning("replaced existing note with the same title");
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "note save",
        &report,
        Some(&human),
    )
}

pub fn run_show(options: ShowOptions) -> Result<()> {
    let book = Notebook::open(&options.dir)?;
    let title = options.title.trim();
    let content = book.notes.get(title)?;

    emit_plain(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "note show",
        &ShowReport { title, content },
        content,
    )
}

pub fn run_rm(options: RmOptions) -> Result<()> {
    let mut book = Notebook::open(&options.dir)?;
    let title = options.title.trim().to_string();

    book.notes.delete(&title)?;

    let report = RmReport {
        title: title.clone(),
        total: book.notes.len(),
    };

    let mut human = HumanOutput::new(format!("Note '{title}' deleted."));
    human.push_summary("notes", book.notes.len().to_string());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "note rm",
        &report,
        Some(&human),
    )
}

pub fn run_ls(options: LsOptions) -> Result<()> {
    let book = Notebook::open(&options.dir)?;
    let titles = book.notes.list();

    let header = if titles.is_empty() {
        "Saved notes: none".to_string()
    } else {
        format!("Saved notes ({})", titles.len())
    };
    let mut human = HumanOutput::new(header);
    for title in &titles {
        human.push_detail(*title);
    }
    if titles.is_empty() {
        human.push_next_step("notebook note save <title> <content>");
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "note ls",
        &LsReport { titles },
        Some(&human),
    )
}
