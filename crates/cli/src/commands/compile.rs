use std::path::Path;

use super::{fail_with, read_input};
use crate::OutputFormat;

pub(crate) fn cmd_compile(file: &Path, output: OutputFormat, quiet: bool) {
    let src = read_input(file, output, quiet);
    match placement_core::parse(&src) {
        Ok(policy) => {
            let value = placement_interchange::to_value(&policy);
            let pretty = serde_json::to_string_pretty(&value)
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            println!("{}", pretty);
        }
        Err(e) => fail_with(e.to_json_value(), e.to_string(), output, quiet),
    }
}
