// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Pipeline configuration.
//!
//! Every directory and file the pipeline touches is a named field on [`DocifyConfig`].
//! Values are layered:
//!
//! 1. [`DocifyConfig::default`] - the layout of a stock Foundry project with
//!    `solidity-docgen` installed under `node_modules/`.
//! 2. `docify.json5` in the project root, if present (or the file passed with
//!    `--config`). Missing keys keep their defaults.
//! 3. Command line overrides, see [`CLIArg::apply_overrides`].
//!
//! Relative paths are resolved against [`DocifyConfig::project_root`].
//!
//! ```json5
//! {
//!   output_dir: "docs/pages",
//!   remap_targets: ["lib/forge-std/src/Test.sol"],
//!   optimizer: { enabled: true, runs: 200 },
//!   excluded_functions: ["initialize"],
//! }
//! ```
//!
//! [`CLIArg::apply_overrides`]: crate::docify::CLIArg::apply_overrides

use crate::docify::error::{DocifyError, DocifyResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "docify.json5";

/// Compiler optimizer settings forwarded to the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptimizerSettings {
    pub enabled: bool,
    pub runs: u32,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            runs: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocifyConfig {
    /// Base for every relative path below. Not read from the config file.
    #[serde(skip)]
    pub project_root: PathBuf,

    /// Program used to run the generator script.
    pub node_binary: String,
    pub generator_script: PathBuf,
    pub solc_module: PathBuf,

    pub input_dir: PathBuf,
    pub templates_dir: PathBuf,
    pub output_dir: PathBuf,
    pub helpers_file: PathBuf,
    /// Exclusion list: one path per line, relative to `input_dir`.
    pub ignore_file: PathBuf,
    /// Remapping manifest: one `alias=resolved_path` per line.
    pub remappings_file: PathBuf,
    /// Passed to the generator as `--exclude`.
    pub exclude_dir: PathBuf,
    /// Source files whose imports are remapped around the generator run.
    pub remap_targets: Vec<PathBuf>,

    /// Extension of excluded source files, rewritten to `output_extension`.
    pub source_extension: String,
    pub output_extension: String,

    pub optimizer: OptimizerSettings,

    /// Function names hidden from the generated docs by the `filter` helper.
    pub excluded_functions: Vec<String>,
    /// Write `helpers_file` from [`TemplateHelpers`] before running the generator.
    ///
    /// [`TemplateHelpers`]: crate::docify::TemplateHelpers
    pub write_helpers_module: bool,

    /// Turn a generator failure into an error. The sources are restored either way.
    pub fail_on_generator_error: bool,
}

impl Default for DocifyConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            node_binary: "node".to_string(),
            generator_script: PathBuf::from("node_modules/solidity-docgen/dist/cli.js"),
            solc_module: PathBuf::from("node_modules/solc"),
            input_dir: PathBuf::from("src"),
            templates_dir: PathBuf::from("docs"),
            output_dir: PathBuf::from("docs/pages"),
            helpers_file: PathBuf::from("docs/helpers.js"),
            ignore_file: PathBuf::from("docs/.docignore"),
            remappings_file: PathBuf::from("remappings.txt"),
            exclude_dir: PathBuf::from("src/test"),
            remap_targets: vec![PathBuf::from("lib/forge-std/src/Test.sol")],
            source_extension: "sol".to_string(),
            output_extension: "md".to_string(),
            optimizer: OptimizerSettings::default(),
            excluded_functions: Vec::new(),
            write_helpers_module: false,
            fail_on_generator_error: false,
        }
    }
}

impl DocifyConfig {
    /// Parse json5 config text. Keys that are absent keep their default values.
    ///
    /// # Errors
    ///
    /// Returns [`DocifyError::ConfigParse`] on invalid json5 or unknown keys.
    pub fn parse(content: &str, source_path: &Path) -> DocifyResult<Self> {
        json5::from_str(content).map_err(|source| DocifyError::ConfigParse {
            path: source_path.to_path_buf(),
            source,
        })
    }

    /// Load the config for `project_root`.
    ///
    /// With `explicit_path`, that file must exist. Otherwise `docify.json5` in the
    /// project root is used when present, and the defaults when it is not.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed.
    pub fn load(project_root: &Path, explicit_path: Option<&Path>) -> DocifyResult<Self> {
        let config_path = match explicit_path {
            Some(path) => Some(path.to_path_buf()),
            None => {
                let candidate = project_root.join(CONFIG_FILE_NAME);
                candidate.is_file().then_some(candidate)
            }
        };

        let mut config = match config_path {
            Some(path) => {
                let content = std::fs::read_to_string(&path)
                    .map_err(|source| DocifyError::read_file(&path, source))?;
                // % is Display, ? is Debug.
                tracing::debug!(message = "Loaded config file", path = ?path);
                Self::parse(&content, &path)?
            }
            None => Self::default(),
        };

        config.project_root = project_root.to_path_buf();
        Ok(config)
    }

    /// Resolve `path` against the project root. Absolute paths are returned as is.
    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }

    #[must_use]
    pub fn input_dir(&self) -> PathBuf { self.resolve(&self.input_dir) }

    #[must_use]
    pub fn output_dir(&self) -> PathBuf { self.resolve(&self.output_dir) }

    #[must_use]
    pub fn ignore_file(&self) -> PathBuf { self.resolve(&self.ignore_file) }

    #[must_use]
    pub fn remappings_file(&self) -> PathBuf { self.resolve(&self.remappings_file) }

    #[must_use]
    pub fn helpers_file(&self) -> PathBuf { self.resolve(&self.helpers_file) }

    #[must_use]
    pub fn remap_targets(&self) -> Vec<PathBuf> {
        self.remap_targets
            .iter()
            .map(|path| self.resolve(path))
            .collect()
    }
}
