//! notebook calc command implementation.

use crate::calc;
use crate::error::Result;
use crate::output::{emit_plain, OutputOptions};

pub struct CalcOptions {
    pub expression: String,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct CalcReport<'a> {
    expression: &'a str,
    result: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub fn run(options: CalcOptions) -> Result<()> {
    let (result, error) = match calc::try_evaluate(&options.expression) {
        Ok(value) => (value.to_string(), None),
        Err(err) => (calc::ERROR.to_string(), Some(err.to_string())),
    };

    emit_plain(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "calc",
        &CalcReport {
            expression: &options.expression,
            result: result.clone(),
            error,
        },
        &result,
    )
}
