// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Run the external documentation generator (`solidity-docgen`).
//!
//! The generator is a blocking child process. stdin and stdout are inherited so its
//! progress shows up in the terminal, stderr is captured and logged.

use crate::docify::{
    config::{DocifyConfig, OptimizerSettings},
    error::{DocifyError, DocifyResult},
    types::AliasTable,
};
use serde::Serialize;
use std::{path::PathBuf,
          process::{Command, Stdio}};

/// The `--solc-settings` JSON blob.
#[derive(Debug, Serialize)]
struct SolcSettings<'a> {
    optimizer: &'a OptimizerSettings,
    remappings: Vec<String>,
}

/// A fully resolved generator command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorCommand {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

impl GeneratorCommand {
    /// Build the command line from `config`. The compiler remappings come from the
    /// forward alias table, so they always match `remappings.txt`.
    ///
    /// # Errors
    ///
    /// Returns [`DocifyError::SerializeSettings`] if the settings blob cannot be
    /// serialized.
    pub fn from_config(config: &DocifyConfig, forward: &AliasTable) -> DocifyResult<Self> {
        let settings = SolcSettings {
            optimizer: &config.optimizer,
            remappings: forward.to_compiler_remappings(),
        };
        let settings_json = serde_json::to_string(&settings)
            .map_err(|source| DocifyError::SerializeSettings { source })?;

        let path_arg =
            |flag: &str, path: &PathBuf| format!("--{flag}={}", config.resolve(path).display());

        let args = vec![
            config.resolve(&config.generator_script).display().to_string(),
            path_arg("input", &config.input_dir),
            path_arg("output", &config.output_dir),
            path_arg("templates", &config.templates_dir),
            path_arg("helpers", &config.helpers_file),
            path_arg("exclude", &config.exclude_dir),
            path_arg("solc-module", &config.solc_module),
            format!("--solc-settings={settings_json}"),
        ];

        Ok(Self {
            program: config.node_binary.clone(),
            args,
            working_dir: config.project_root.clone(),
        })
    }

    /// Run the generator and wait for it to exit.
    ///
    /// A non-zero exit is not an error here; see [`GeneratorOutcome::into_result`].
    ///
    /// # Errors
    ///
    /// Returns [`DocifyError::GeneratorSpawn`] if the process cannot be started.
    pub fn run(&self) -> DocifyResult<GeneratorOutcome> {
        // % is Display, ? is Debug.
        tracing::info!(message = "Running documentation generator", command = %self);

        let output = Command::new(&self.program)
            .args(&self.args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| DocifyError::GeneratorSpawn {
                program: self.program.clone(),
                source,
            })?;

        let outcome = GeneratorOutcome {
            exit_code: output.status.code(),
            success: output.status.success(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if outcome.is_clean() {
            tracing::info!(message = "Documentation generator finished");
        } else {
            tracing::warn!(
                message = "Documentation generator reported problems",
                exit_code = ?outcome.exit_code,
                stderr = %outcome.stderr.trim()
            );
        }

        Ok(outcome)
    }
}

impl std::fmt::Display for GeneratorCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Exit status and captured stderr of a generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOutcome {
    pub exit_code: Option<i32>,
    pub success: bool,
    pub stderr: String,
}

impl GeneratorOutcome {
    /// Exited successfully and wrote nothing to stderr.
    #[must_use]
    pub fn is_clean(&self) -> bool { self.success && self.stderr.trim().is_empty() }

    /// With `fail_on_error`, anything but a clean run becomes
    /// [`DocifyError::GeneratorFailed`]. Otherwise the outcome is passed through.
    ///
    /// # Errors
    ///
    /// See above.
    pub fn into_result(self, fail_on_error: bool) -> DocifyResult<Self> {
        if fail_on_error && !self.is_clean() {
            return Err(DocifyError::GeneratorFailed {
                exit_code: self.exit_code,
                stderr: self.stderr,
            });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docify::types::{AliasEntry, RemapDirection};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn forward() -> AliasTable {
        AliasTable::new(
            RemapDirection::Forward,
            vec![
                AliasEntry::new("forge-std/", "lib/forge-std/src/"),
                AliasEntry::new(
                    "openzeppelin-contracts/contracts/",
                    "lib/openzeppelin-contracts/contracts/",
                ),
            ],
        )
    }

    fn config_in(root: &std::path::Path) -> DocifyConfig {
        DocifyConfig {
            project_root: root.to_path_buf(),
            ..DocifyConfig::default()
        }
    }

    #[test]
    fn test_command_line() {
        let root = PathBuf::from("/work/project");
        let command = GeneratorCommand::from_config(&config_in(&root), &forward()).unwrap();

        assert_eq!(command.program, "node");
        assert_eq!(command.working_dir, root);
        assert_eq!(
            command.args,
            vec![
                "/work/project/node_modules/solidity-docgen/dist/cli.js".to_string(),
                "--input=/work/project/src".to_string(),
                "--output=/work/project/docs/pages".to_string(),
                "--templates=/work/project/docs".to_string(),
                "--helpers=/work/project/docs/helpers.js".to_string(),
                "--exclude=/work/project/src/test".to_string(),
                "--solc-module=/work/project/node_modules/solc".to_string(),
                "--solc-settings={\"optimizer\":{\"enabled\":true,\"runs\":200},\
                 \"remappings\":[\"forge-std/:lib/forge-std/src/\",\
                 \"openzeppelin-contracts/contracts/:lib/openzeppelin-contracts/contracts/\"]}"
                    .to_string(),
            ]
        );
    }

    #[test]
    fn test_display_joins_args() {
        let command = GeneratorCommand {
            program: "node".to_string(),
            args: vec!["cli.js".to_string(), "--input=src".to_string()],
            working_dir: PathBuf::from("."),
        };
        assert_eq!(command.to_string(), "node cli.js --input=src");
    }

    #[test]
    fn test_outcome_into_result() {
        let failed = GeneratorOutcome {
            exit_code: Some(1),
            success: false,
            stderr: "ParserError".to_string(),
        };
        assert!(failed.clone().into_result(false).is_ok());
        assert!(matches!(
            failed.into_result(true),
            Err(DocifyError::GeneratorFailed {
                exit_code: Some(1),
                ..
            })
        ));

        let noisy = GeneratorOutcome {
            exit_code: Some(0),
            success: true,
            stderr: "warning: unreachable code\n".to_string(),
        };
        assert!(!noisy.is_clean());
    }

    #[test]
    fn test_run_captures_stderr_and_exit_code() {
        let dir = TempDir::new().unwrap();
        let script = dir.path().join("fake-docgen.sh");
        std::fs::write(&script, "echo \"bad input: $1\" >&2\nexit 3\n").unwrap();

        let config = DocifyConfig {
            node_binary: "sh".to_string(),
            generator_script: script,
            ..config_in(dir.path())
        };
        let outcome = GeneratorCommand::from_config(&config, &forward())
            .unwrap()
            .run()
            .unwrap();

        assert_eq!(outcome.exit_code, Some(3));
        assert!(!outcome.success);
        assert!(outcome.stderr.contains("bad input: --input="));
    }

    #[test]
    fn test_run_missing_program() {
        let dir = TempDir::new().unwrap();
        let config = DocifyConfig {
            node_binary: "docify-no-such-program".to_string(),
            ..config_in(dir.path())
        };
        let error = GeneratorCommand::from_config(&config, &forward())
            .unwrap()
            .run()
            .unwrap_err();
        assert!(matches!(error, DocifyError::GeneratorSpawn { .. }));
    }
}
