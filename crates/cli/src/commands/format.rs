use std::path::Path;

use super::{fail_with, read_input};
use crate::OutputFormat;

pub(crate) fn cmd_format(file: &Path, output: OutputFormat, quiet: bool) {
    let doc = read_input(file, output, quiet);
    match placement_interchange::from_json(doc.as_bytes()) {
        Ok(policy) => println!("{}", placement_core::format_policy(&policy)),
        Err(e) => fail_with(e.to_json_value(), e.to_string(), output, quiet),
    }
}
