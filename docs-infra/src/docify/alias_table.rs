// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Load the remapping manifest (`remappings.txt`) into an [`AliasTable`].
//!
//! Each non-empty line has the form `alias=resolved_path`. The reverse table is built
//! from the same lines by rotating the `=` separated segments so that the resolved
//! path moves to the front and becomes the search pattern.
//!
//! The manifest is read fresh on every call. Nothing is cached across runs.

use crate::docify::{
    error::{DocifyError, DocifyResult},
    types::{AliasEntry, AliasTable, RemapDirection},
};
use std::path::Path;

/// Read and parse the manifest at `manifest_path`.
///
/// # Errors
///
/// Returns an error if the manifest cannot be read, or if a line is malformed (see
/// [`parse_manifest`]).
pub fn load_alias_table(
    manifest_path: &Path,
    direction: RemapDirection,
) -> DocifyResult<AliasTable> {
    let content = std::fs::read_to_string(manifest_path)
        .map_err(|source| DocifyError::read_file(manifest_path, source))?;
    let table = parse_manifest(&content, manifest_path, direction)?;

    // % is Display, ? is Debug.
    tracing::debug!(
        message = "Loaded alias table",
        manifest = ?manifest_path,
        direction = ?direction,
        entries = table.len()
    );

    Ok(table)
}

/// Parse manifest text. `manifest_path` is only used in error messages.
///
/// - Lines that are empty after trimming are skipped.
/// - Each segment is trimmed.
/// - Lines with fewer than two segments, or an empty segment, are malformed.
/// - Lines with more than two segments are rejected: the reverse rotation has no single
///   "search then replace with alias" meaning for them.
///
/// # Errors
///
/// Returns [`DocifyError::MalformedManifestEntry`] or
/// [`DocifyError::AmbiguousManifestEntry`] with the 1-based line number.
pub fn parse_manifest(
    content: &str,
    manifest_path: &Path,
    direction: RemapDirection,
) -> DocifyResult<AliasTable> {
    let mut entries = Vec::new();

    for (index, raw_line) in content.split('\n').enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        let line_number = index + 1;

        let mut segments: Vec<&str> = line.split('=').map(str::trim).collect();

        if segments.len() > 2 {
            return Err(DocifyError::AmbiguousManifestEntry {
                path: manifest_path.to_path_buf(),
                line_number,
                segment_count: segments.len(),
            });
        }

        if segments.len() < 2 || segments.iter().any(|segment| segment.is_empty()) {
            return Err(DocifyError::MalformedManifestEntry {
                path: manifest_path.to_path_buf(),
                line_number,
                line: line.to_string(),
            });
        }

        if direction == RemapDirection::Reverse {
            // Last segment (the resolved path) moves to the front.
            segments.rotate_right(1);
        }

        entries.push(AliasEntry::new(segments[0], segments[1]));
    }

    Ok(AliasTable::new(direction, entries))
}
