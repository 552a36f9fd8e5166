// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Line-preserving import path rewriting.
//!
//! Only import declarations are touched. For every [`AliasEntry`] in table order, the
//! first occurrence of its search pattern on the line is replaced. Replacements are
//! sequential: an entry sees the output of the entries before it.
//!
//! A transformed line must still be exactly one line. Line numbers reported by the
//! generator (and by debuggers) have to stay valid across the remap round trip, so a
//! replacement that adds a `\n` or `\r` is a hard error. Line breaks already present
//! in the input (a bare `\r` from old Mac line endings) pass through.
//!
//! [`AliasEntry`]: crate::docify::AliasEntry

use crate::docify::{
    error::{DocifyError, DocifyResult},
    types::AliasTable,
};
use regex::Regex;
use std::sync::LazyLock;

/// Leading whitespace, then `import` (any case), then a space.
static IMPORT_LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*import ").expect("Invalid import line regex"));

#[must_use]
pub fn is_import_line(line: &str) -> bool { IMPORT_LINE_REGEX.is_match(line) }

/// Apply `table` to a single line. Search patterns are literal substrings.
///
/// This does not check the single-line postcondition; use [`remap_line`] for that.
#[must_use]
pub fn transform_line(line: &str, table: &AliasTable) -> String {
    if !is_import_line(line) {
        return line.to_string();
    }

    table.iter().fold(line.to_string(), |acc, entry| {
        if acc.contains(entry.search.as_str()) {
            acc.replacen(entry.search.as_str(), &entry.replacement, 1)
        } else {
            acc
        }
    })
}

/// Apply `table` to a single line and enforce that the result is still one line.
///
/// # Errors
///
/// Returns [`DocifyError::LineExpansion`] if the result has more line breaks than
/// `line`.
pub fn remap_line(line: &str, line_number: usize, table: &AliasTable) -> DocifyResult<String> {
    let output = transform_line(line, table);
    if line_break_count(&output) > line_break_count(line) {
        return Err(DocifyError::LineExpansion {
            line_number,
            output,
        });
    }
    Ok(output)
}

fn line_break_count(line: &str) -> usize {
    line.chars().filter(|it| matches!(it, '\n' | '\r')).count()
}

/// Apply `table` to every line of `content`.
///
/// Lines are split on `\r?\n` and joined with `\n`, so the line count (including a
/// trailing empty line) is unchanged.
///
/// # Errors
///
/// Returns [`DocifyError::LineExpansion`] for the first line that would be split.
pub fn transform_content(content: &str, table: &AliasTable) -> DocifyResult<String> {
    let lines = content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .enumerate()
        .map(|(index, line)| remap_line(line, index + 1, table))
        .collect::<DocifyResult<Vec<_>>>()?;

    Ok(lines.join("\n"))
}

/// Number of lines as counted by [`transform_content`].
#[must_use]
pub fn line_count(content: &str) -> usize { content.split('\n').count() }
