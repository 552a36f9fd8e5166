// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Command-line argument parsing for docify.

use crate::docify::config::DocifyConfig;
use clap::Parser;
use std::path::PathBuf;

/// Generate Solidity API docs with aliased imports remapped around the generator.
#[derive(Debug, Parser)]
#[command(
    name = "docify",
    about = "Generate Solidity API docs with solidity-docgen",
    long_about = "Rewrites aliased imports (from remappings.txt) into resolved paths, runs \
                  solidity-docgen, deletes the pages listed in docs/.docignore, and then \
                  restores the original imports.\n\n\
                  With no arguments, runs the whole pipeline for the Foundry project that \
                  contains the current directory, using docify.json5 if present.",
    version
)]
pub struct CLIArg {
    /// Project root (defaults to the nearest ancestor with remappings.txt or
    /// foundry.toml)
    #[arg(long, value_name = "DIR")]
    pub project_root: Option<PathBuf>,

    /// Config file (defaults to docify.json5 in the project root, if present)
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the generated docs directory
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Exit with an error when the generator fails (sources are restored either way)
    #[arg(long)]
    pub fail_on_generator_error: bool,

    /// Print what would be remapped, run, and deleted, without touching anything
    #[arg(long)]
    pub dry_run: bool,

    /// Verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl CLIArg {
    /// Apply the flags that override config file values.
    pub fn apply_overrides(&self, config: &mut DocifyConfig) {
        if let Some(output_dir) = &self.output_dir {
            config.output_dir.clone_from(output_dir);
        }
        if self.fail_on_generator_error {
            config.fail_on_generator_error = true;
        }
    }
}
