//! Shared output formatting for notebook CLI commands.

use serde::Serialize;

use crate::error::{exit_codes, Error, Result};

pub const SCHEMA_VERSION: &str = "notebook.v1";

#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub json: bool,
    pub quiet: bool,
}

#[derive(Debug, Clone)]
pub struct HumanOutput {
    header: String,
    summary: Vec<(String, String)>,
    details: Vec<String>,
    warnings: Vec<String>,
    next_steps: Vec<String>,
}

impl HumanOutput {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            summary: Vec::new(),
            details: Vec::new(),
            warnings: Vec::new(),
            next_steps: Vec::new(),
        }
    }

    pub fn push_summary(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.summary.push((key.into(), value.into()));
    }

    pub fn push_detail(&mut self, value: impl Into<String>) {
        self.details.push(value.into());
    }

    pub fn push_warning(&mut self, value: impl Into<String>) {
        self.warnings.push(value.into());
    }

    pub fn push_next_step(&mut self, value: impl Into<String>) {
        self.next_steps.push(value.into());
    }
}

/// JSON envelope shared by success and error output
#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    schema_version: &'static str,
    command: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorBody>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    next_steps: Vec<String>,
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    code: i32,
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

fn print_envelope<T: Serialize>(envelope: &Envelope<'_, T>) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(envelope)?);
    Ok(())
}

pub fn emit_success<T: Serialize>(
    options: OutputOptions,
    command: &str,
    data: &T,
    human: Option<&HumanOutput>,
) -> Result<()> {
    if options.json {
        return print_envelope(&Envelope {
            schema_version: SCHEMA_VERSION,
            command,
            status: "success",
            data: Some(data),
            error: None,
            warnings: human.map(|h| h.warnings.clone()).unwrap_or_default(),
            next_steps: human.map(|h| h.next_steps.clone()).unwrap_or_default(),
        });
    }

    match human {
        Some(human) if !options.quiet => println!("{}", format_human(human)),
        _ => {}
    }
    Ok(())
}

/// Print raw text (note content, calculator result) unless quiet or JSON
pub fn emit_plain<T: Serialize>(
    options: OutputOptions,
    command: &str,
    data: &T,
    text: &str,
) -> Result<()> {
    if options.json {
        return emit_success(options, command, data, None);
    }
    if !options.quiet {
        println!("{text}");
    }
    Ok(())
}

pub fn emit_error(command: &str, err: &Error, json: bool) -> Result<()> {
    let next_steps = error_next_steps(err);
    if json {
        return print_envelope::<()>(&Envelope {
            schema_version: SCHEMA_VERSION,
            command,
            status: "error",
            data: None,
            error: Some(ErrorBody {
                message: err.to_string(),
                code: err.exit_code(),
                kind: error_kind(err),
                details: err.details(),
            }),
            warnings: Vec::new(),
            next_steps,
        });
    }

    eprintln!("error: {err}");
    if let Some(hint) = next_steps.first() {
        eprintln!("hint: {hint}");
    }
    Ok(())
}

/// Header, then each non-empty section as a titled bullet list
pub fn format_human(output: &HumanOutput) -> String {
    let summary: Vec<String> = output
        .summary
        .iter()
        .map(|(key, value)| format!("{key}: {value}"))
        .collect();
    let sections = [
        ("Summary", summary.as_slice()),
        ("Details", output.details.as_slice()),
        ("Warnings", output.warnings.as_slice()),
        ("Next steps", output.next_steps.as_slice()),
    ];

    let mut text = output.header.clone();
    for (title, items) in sections {
        if items.is_empty() {
            continue;
        }
        text.push_str("\n\n");
        text.push_str(title);
        text.push(':');
        for item in items {
            text.push_str("\n- ");
            text.push_str(item);
        }
    }
    text
}

pub fn infer_command_name_from_args() -> String {
    command_name_from(std::env::args().skip(1))
}

/// Envelope command label: the subcommand, plus its action for grouped
/// commands (`note save`, `todo done`).
pub fn command_name_from<I>(args: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let mut skip_value = false;
    let mut command = None;

    for arg in args.by_ref() {
        if skip_value {
            skip_value = false;
            continue;
        }
        if arg == "--dir" {
            skip_value = true;
            continue;
        }
        if arg.starts_with('-') {
            continue;
        }
        command = Some(arg);
        break;
    }

    let command = match command {
        Some(cmd) => cmd,
        None => return "notebook".to_string(),
    };

    if matches!(command.as_str(), "note" | "todo") {
        if let Some(sub) = args.find(|arg| !arg.starts_with('-')) {
            return format!("{command} {sub}");
        }
    }

    command
}

fn error_kind(err: &Error) -> &'static str {
    match err {
        Error::Validation(_) => "validation",
        Error::NoteNotFound(_) => "not_found",
        _ if err.exit_code() == exit_codes::USER_ERROR => "user_error",
        _ => "operation_failed",
    }
}

fn error_next_steps(err: &Error) -> Vec<String> {
    match err {
        Error::NoteNotFound(_) => vec!["notebook note ls".to_string()],
        Error::InvalidConfig(_) => vec!["fix .notebook.toml then retry".to_string()],
        Error::Parse { path, .. } => vec![format!("repair or move aside {}", path.display())],
        _ => Vec::new(),
    }
}
