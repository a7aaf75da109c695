use std::path::Path;

use serde::Serialize;

use super::{fail_with, read_input};
use crate::OutputFormat;

#[derive(Serialize)]
struct CheckReport {
    valid: bool,
    replicas: usize,
    selectors: usize,
    filters: usize,
}

/// Decoding JSON never checks references; this runs the same validator the
/// text path uses.
pub(crate) fn cmd_check(file: &Path, output: OutputFormat, quiet: bool) {
    let doc = read_input(file, output, quiet);
    let policy = match placement_interchange::from_json(doc.as_bytes()) {
        Ok(p) => p,
        Err(e) => fail_with(e.to_json_value(), e.to_string(), output, quiet),
    };

    if let Err(e) = placement_core::validate(&policy) {
        fail_with(e.to_json_value(), e.to_string(), output, quiet);
    }

    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => println!("valid"),
        OutputFormat::Json => {
            let report = CheckReport {
                valid: true,
                replicas: policy.replicas.len(),
                selectors: policy.selectors.len(),
                filters: policy.filters.len(),
            };
            println!("{}", serde_json::to_string(&report).unwrap_or_default());
        }
    }
}
