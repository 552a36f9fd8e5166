// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Delete generated pages that should not be published.
//!
//! The exclusion list (`docs/.docignore`) holds one path per line, relative to the
//! input directory. Each entry maps to the same relative path under the output
//! directory; a trailing source extension (`.sol`) becomes the output extension
//! (`.md`). Existing targets are removed recursively.
//!
//! A failed deletion is recorded in the [`PruneReport`] and the loop moves on.

use crate::docify::{
    config::DocifyConfig,
    error::{DocifyError, DocifyResult},
};
use std::path::{Component, Path, PathBuf};

/// Parse exclusion list text into relative path fragments.
///
/// `\r` is stripped, blank lines and `#` comments are skipped, and a leading `/` or
/// `./` is dropped so that every fragment stays relative.
#[must_use]
pub fn parse_exclusion_list(content: &str) -> Vec<PathBuf> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| {
            let line = line.trim_start_matches("./").trim_start_matches('/');
            PathBuf::from(line)
        })
        .filter(|fragment| !fragment.as_os_str().is_empty())
        .collect()
}

/// Map an exclusion fragment to the generated output path it produced.
#[must_use]
pub fn map_to_output_path(
    fragment: &Path,
    output_dir: &Path,
    source_extension: &str,
    output_extension: &str,
) -> PathBuf {
    let target = output_dir.join(fragment);
    if target
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(source_extension))
    {
        target.with_extension(output_extension)
    } else {
        target
    }
}

/// A fragment that climbs out of the output directory is never deleted.
fn escapes_output_dir(fragment: &Path) -> bool {
    fragment
        .components()
        .any(|component| !matches!(component, Component::Normal(_) | Component::CurDir))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneFailure {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneReport {
    pub deleted: Vec<PathBuf>,
    /// Targets that were not generated in the first place.
    pub missing: Vec<PathBuf>,
    pub failures: Vec<PruneFailure>,
}

impl PruneReport {
    #[must_use]
    pub fn has_failures(&self) -> bool { !self.failures.is_empty() }
}

/// Read the exclusion list and pair each fragment with its output path.
fn load_targets(config: &DocifyConfig) -> DocifyResult<Vec<(PathBuf, PathBuf)>> {
    let ignore_file = config.ignore_file();
    let content = std::fs::read_to_string(&ignore_file)
        .map_err(|source| DocifyError::read_file(&ignore_file, source))?;

    let output_dir = config.output_dir();
    Ok(parse_exclusion_list(&content)
        .into_iter()
        .map(|fragment| {
            let target = map_to_output_path(
                &fragment,
                &output_dir,
                &config.source_extension,
                &config.output_extension,
            );
            (fragment, target)
        })
        .collect())
}

/// Output paths the exclusion list would delete, in list order.
///
/// # Errors
///
/// Returns an error if the exclusion list cannot be read.
pub fn plan_prune(config: &DocifyConfig) -> DocifyResult<Vec<PathBuf>> {
    Ok(load_targets(config)?
        .into_iter()
        .map(|(_, target)| target)
        .collect())
}

/// Delete every generated path named by the exclusion list.
///
/// # Errors
///
/// Returns an error only if the exclusion list cannot be read. Per-path failures are
/// collected in the returned [`PruneReport`].
pub fn prune_output(config: &DocifyConfig) -> DocifyResult<PruneReport> {
    let mut report = PruneReport::default();

    for (fragment, target) in load_targets(config)? {
        if escapes_output_dir(&fragment) {
            // % is Display, ? is Debug.
            tracing::warn!(message = "Refusing to delete outside output dir", path = ?target);
            report.failures.push(PruneFailure {
                path: target,
                reason: "path escapes the output directory".to_string(),
            });
            continue;
        }

        if !target.exists() {
            tracing::debug!(message = "Nothing to delete", path = ?target);
            report.missing.push(target);
            continue;
        }

        match remove_path(&target) {
            Ok(()) => {
                tracing::info!(message = "Deleted excluded output", path = ?target);
                report.deleted.push(target);
            }
            Err(error) => {
                tracing::error!(
                    message = "Error while deleting excluded output",
                    path = ?target,
                    error = %error
                );
                report.failures.push(PruneFailure {
                    path: target,
                    reason: error.to_string(),
                });
            }
        }
    }

    Ok(report)
}

fn remove_path(path: &Path) -> std::io::Result<()> {
    if path.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    }
}
