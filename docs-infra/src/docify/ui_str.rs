// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! User-facing strings and messages.

use crate::docify::{file_remapper::RestoreOutcome, pipeline::PipelineReport};
use std::path::Path;

pub const DRY_RUN_HEADER: &str = "Dry-run mode: nothing will be modified.";
pub const GENERATOR_PROBLEMS: &str =
    "The documentation generator reported problems (see log above).";
pub const PRUNE_PROBLEMS: &str = "Some excluded pages could not be deleted.";

#[must_use]
pub fn format_remap_target(path: &Path) -> String {
    format!("Would remap imports in: {}", path.display())
}

#[must_use]
pub fn format_generator_command(command: &str) -> String {
    format!("Would run: {command}")
}

#[must_use]
pub fn format_prune_target(path: &Path) -> String {
    format!("Would delete: {}", path.display())
}

#[must_use]
pub fn format_restore(path: &Path, outcome: RestoreOutcome) -> String {
    match outcome {
        RestoreOutcome::Reversed => format!("Restored: {}", path.display()),
        RestoreOutcome::FromSnapshot => {
            format!("Restored from snapshot: {}", path.display())
        }
    }
}

/// Format summary message.
#[must_use]
pub fn format_summary(report: &PipelineReport) -> String {
    format!(
        "Remapped {} files, generated {} documents, deleted {} excluded paths, {} errors",
        report.remapped_files.len(),
        report.generated_documents,
        report.prune.deleted.len(),
        report.prune.failures.len()
    )
}
