// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Error types for the `docify` pipeline.
//!
//! | Variant                     | Raised by                                | Fatal |
//! |-----------------------------|------------------------------------------|-------|
//! | [`ReadFile`]                | manifest, exclusion list, remap targets  | Yes   |
//! | [`WriteFile`]               | remap targets                            | Yes   |
//! | [`MalformedManifestEntry`]  | alias table loader                       | Yes   |
//! | [`AmbiguousManifestEntry`]  | alias table loader                       | Yes   |
//! | [`LineExpansion`]           | line transformer                         | Yes   |
//! | [`GeneratorSpawn`]          | generator runner                         | Yes   |
//! | [`GeneratorFailed`]         | generator runner, only when configured   | Yes   |
//! | [`SerializeSettings`]       | generator runner                         | Yes   |
//! | [`RenderHelpers`]           | template helpers module writer           | Yes   |
//! | [`ConfigParse`]             | `docify.json5` loader                    | Yes   |
//! | [`ProjectRootNotFound`]     | project root discovery                   | Yes   |
//!
//! Output pruning failures are not errors; they are collected per path in
//! [`PruneReport`].
//!
//! [`AmbiguousManifestEntry`]: DocifyError::AmbiguousManifestEntry
//! [`ConfigParse`]: DocifyError::ConfigParse
//! [`GeneratorFailed`]: DocifyError::GeneratorFailed
//! [`GeneratorSpawn`]: DocifyError::GeneratorSpawn
//! [`LineExpansion`]: DocifyError::LineExpansion
//! [`MalformedManifestEntry`]: DocifyError::MalformedManifestEntry
//! [`ProjectRootNotFound`]: DocifyError::ProjectRootNotFound
//! [`PruneReport`]: crate::docify::PruneReport
//! [`ReadFile`]: DocifyError::ReadFile
//! [`RenderHelpers`]: DocifyError::RenderHelpers
//! [`SerializeSettings`]: DocifyError::SerializeSettings
//! [`WriteFile`]: DocifyError::WriteFile

use std::path::PathBuf;

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum DocifyError {
    #[error("📑 Could not read file: '{}'", .path.display())]
    #[diagnostic(code(docs_infra::docify::read_file))]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("💾 Could not write file: '{}'", .path.display())]
    #[diagnostic(code(docs_infra::docify::write_file))]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("🔍 Malformed remapping at {}:{line_number}: {line:?}", .path.display())]
    #[diagnostic(
        code(docs_infra::docify::malformed_manifest_entry),
        help("Each non-empty line must have the form `alias=resolved_path`.")
    )]
    MalformedManifestEntry {
        path: PathBuf,
        line_number: usize,
        line: String,
    },

    #[error(
        "🔀 Remapping at {}:{line_number} has {segment_count} `=` separated segments",
        .path.display()
    )]
    #[diagnostic(
        code(docs_infra::docify::ambiguous_manifest_entry),
        help(
            "The reverse mapping is only well defined for `alias=resolved_path`. \
             Split this line into separate two-segment entries."
        )
    )]
    AmbiguousManifestEntry {
        path: PathBuf,
        line_number: usize,
        segment_count: usize,
    },

    #[error("📏 Line processor cannot create new lines (line {line_number})")]
    #[diagnostic(
        code(docs_infra::docify::line_expansion),
        help(
            "Line numbers must be preserved across the remap round trip. \
             An alias table entry injected a newline or carriage return."
        )
    )]
    LineExpansion { line_number: usize, output: String },

    #[error("🚀 Could not start documentation generator: '{program}'")]
    #[diagnostic(
        code(docs_infra::docify::generator_spawn),
        help("Check that `node` is on PATH and `npm install` has been run.")
    )]
    GeneratorSpawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("📄 Documentation generator failed with exit code {exit_code:?}\n{stderr}")]
    #[diagnostic(code(docs_infra::docify::generator_failed))]
    GeneratorFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("⚙️ Could not serialize compiler settings")]
    #[diagnostic(code(docs_infra::docify::serialize_settings))]
    SerializeSettings {
        #[source]
        source: serde_json::Error,
    },

    #[error("🧩 Could not render template helpers module: '{}'", .path.display())]
    #[diagnostic(code(docs_infra::docify::render_helpers))]
    RenderHelpers {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("⚙️ Could not parse config file: '{}'", .path.display())]
    #[diagnostic(
        code(docs_infra::docify::config_parse),
        help("The config file is json5; unknown keys are rejected.")
    )]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: json5::Error,
    },

    #[error("🏠 Could not find project root above '{}'", .start.display())]
    #[diagnostic(
        code(docs_infra::docify::project_root_not_found),
        help(
            "Run from inside a Foundry project (a directory containing \
             `remappings.txt` or `foundry.toml`), or pass --project-root."
        )
    )]
    ProjectRootNotFound { start: PathBuf },
}

pub type DocifyResult<T> = Result<T, DocifyError>;

impl DocifyError {
    pub(crate) fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteFile {
            path: path.into(),
            source,
        }
    }
}
