//! Turns an export holding one JSON object per line into a JSON array.
//!
//! No parsing happens here: lines are patched as text and the consumer of
//! the output is the first thing to validate it.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{RepairError, Result};

const SEPARATOR: char = ',';
const OPEN: char = '[';
const CLOSE: char = ']';

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepairReport {
    /// Lines read from the source, blank ones included.
    pub lines: usize,
    /// Non-blank lines that are not bare brackets.
    pub objects: usize,
    /// Whether `[`/`]` framing had to be added around the content.
    pub framed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repaired {
    pub text: String,
    pub report: RepairReport,
}

fn needs_separator(line: &str) -> bool {
    !line.is_empty() && !line.ends_with([SEPARATOR, OPEN, CLOSE])
}

fn is_bracket_line(line: &str) -> bool {
    line == "[" || line == "]"
}

pub fn repair_text(input: &str) -> Repaired {
    let mut report = RepairReport::default();
    let mut fixed: Vec<String> = Vec::new();
    let mut last_content: Option<usize> = None;

    for raw in input.lines() {
        report.lines += 1;
        let mut line = raw.trim().to_string();

        if line.starts_with(CLOSE) {
            // The entry before a closing bracket must not keep a separator.
            if let Some(index) = last_content {
                let previous = &mut fixed[index];
                if previous.ends_with(SEPARATOR) {
                    previous.pop();
                }
            }
        }

        if !line.is_empty() && !is_bracket_line(&line) {
            report.objects += 1;
        }
        if needs_separator(&line) {
            line.push(SEPARATOR);
        }
        if !line.is_empty() {
            last_content = Some(fixed.len());
        }
        fixed.push(line);
    }

    let joined = fixed.join("\n");
    let body = joined.trim_end_matches([SEPARATOR, '\n']);
    let already_framed = fixed
        .iter()
        .find(|line| !line.is_empty())
        .is_some_and(|line| line.starts_with(OPEN));
    report.framed = !already_framed;

    let mut text = String::with_capacity(body.len() + 4);
    if report.framed {
        text.push(OPEN);
        text.push('\n');
        if !body.is_empty() {
            text.push_str(body);
            text.push('\n');
        }
        text.push(CLOSE);
    } else {
        text.push_str(body);
    }
    text.push('\n');

    Repaired { text, report }
}

/// `raw_receipts.json` becomes `formatted_receipts.json`; any other name
/// gains a `formatted_` prefix. The directory is kept.
pub fn default_output_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let formatted = match name.strip_prefix("raw_") {
        Some(rest) => format!("formatted_{rest}"),
        None => format!("formatted_{name}"),
    };
    input.with_file_name(formatted)
}

pub fn repair_file(input: &Path, output: &Path) -> Result<RepairReport> {
    if !input.exists() {
        return Err(RepairError::SourceNotFound(input.to_path_buf()));
    }

    let source = fs::read_to_string(input).map_err(|source| RepairError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let repaired = repair_text(&source);
    debug!(
        input = %input.display(),
        bytes = repaired.text.len(),
        "writing repaired export"
    );
    fs::write(output, repaired.text).map_err(|source| RepairError::Write {
        path: output.to_path_buf(),
        source,
    })?;

    Ok(repaired.report)
}
