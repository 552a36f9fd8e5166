// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Solidity documentation pipeline.
//!
//! `solidity-docgen` cannot resolve import aliases such as `forge-std/`, so the
//! aliased imports of selected source files are rewritten into resolved paths before
//! the generator runs and rewritten back afterwards. Excluded pages are deleted from
//! the output in between.

pub mod alias_table;
pub mod cli_arg;
pub mod config;
pub mod error;
pub mod file_remapper;
pub mod generator;
pub mod line_transformer;
pub mod output_pruner;
pub mod pipeline;
pub mod template_helpers;
pub mod types;
pub mod ui_str;

#[cfg(test)]
pub mod validation_tests;

// Re-export public API for flat module interface.
pub use alias_table::*;
pub use cli_arg::*;
pub use config::*;
pub use error::*;
pub use file_remapper::*;
pub use generator::*;
pub use line_transformer::*;
pub use output_pruner::*;
pub use pipeline::*;
pub use template_helpers::*;
pub use types::*;
pub use ui_str::*;
