mod check;
mod compile;
mod format;
mod validate;

pub(crate) use check::cmd_check;
pub(crate) use compile::cmd_compile;
pub(crate) use format::cmd_format;
pub(crate) use validate::cmd_validate;

use std::io::Read;
use std::path::Path;
use std::process;

use crate::{report_error, OutputFormat};

/// Read the whole input file, or stdin for "-". Exits with status 1 on
/// failure.
fn read_input(path: &Path, output: OutputFormat, quiet: bool) -> String {
    let result = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map(|_| buf)
    } else {
        std::fs::read_to_string(path)
    };
    match result {
        Ok(s) => {
            tracing::debug!(path = %path.display(), bytes = s.len(), "input read");
            s
        }
        Err(e) => {
            let msg = format!("error reading file '{}': {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }
}

/// Print a compile or decode error and exit with status 1. JSON output is
/// always written; text output respects `--quiet`.
fn fail_with(error_json: serde_json::Value, text: String, output: OutputFormat, quiet: bool) -> ! {
    match output {
        OutputFormat::Json => {
            let err_json = serde_json::to_string_pretty(&error_json).unwrap_or(text);
            eprintln!("{}", err_json);
        }
        OutputFormat::Text => {
            if !quiet {
                eprintln!("error: {}", text);
            }
        }
    }
    process::exit(1);
}
