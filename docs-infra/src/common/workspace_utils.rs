// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Project discovery utilities.
//!
//! Find the Foundry project root and collect generated documents.

use crate::docify::{DocifyError, DocifyResult};
use miette::IntoDiagnostic;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Files that mark the root of a Foundry project.
pub const PROJECT_ROOT_MARKERS: [&str; 2] = ["remappings.txt", "foundry.toml"];

/// Find the project root by searching for a marker file, starting at `start` and
/// walking up to the filesystem root.
///
/// # Errors
///
/// Returns [`DocifyError::ProjectRootNotFound`] if no ancestor contains a marker.
pub fn find_project_root(start: &Path) -> DocifyResult<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if PROJECT_ROOT_MARKERS
            .iter()
            .any(|marker| current.join(marker).is_file())
        {
            return Ok(current);
        }

        if !current.pop() {
            return Err(DocifyError::ProjectRootNotFound {
                start: start.to_path_buf(),
            });
        }
    }
}

/// [`find_project_root`] starting from the current directory.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined or no project root
/// is found.
pub fn get_project_root() -> miette::Result<PathBuf> {
    let current = std::env::current_dir().into_diagnostic()?;
    Ok(find_project_root(&current)?)
}

/// Find all generated documents (files with `extension`) under `output_dir`, sorted.
/// A missing output directory yields an empty list.
#[must_use]
pub fn find_generated_documents(output_dir: &Path, extension: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(output_dir)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| path.extension().is_some_and(|ext| ext == extension))
        .collect();

    files.sort();
    files
}
