// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

//! # Docs Infrastructure
//!
//! Documentation build tools for Foundry smart-contract projects.
//!
//! ## docify
//!
//! Runs [`solidity-docgen`] over a project's `src/` directory. The generator cannot
//! resolve import aliases like `forge-std/`, so `docify` temporarily rewrites them.
//!
//! ### What It Does
//!
//! 1. **Remap**: Load `remappings.txt` and rewrite aliased imports in the configured
//!    source files into resolved paths.
//! 2. **Generate**: Run `node node_modules/solidity-docgen/dist/cli.js` as a blocking
//!    child process. Compiler remappings are derived from the same manifest.
//! 3. **Prune**: Delete the generated pages listed in `docs/.docignore`.
//! 4. **Restore**: Rewrite the imports back into their aliased form. This happens on
//!    every exit path, including a failing generator.
//!
//! **Before** (`lib/forge-std/src/Test.sol`):
//! ```text
//! import {console} from "forge-std/console.sol";
//! ```
//!
//! **While the generator runs:**
//! ```text
//! import {console} from "lib/forge-std/src/console.sol";
//! ```
//!
//! Only import lines are touched and the line count never changes, so line numbers
//! in generator errors point at the right place in the original file.
//!
//! ### Usage Examples
//!
//! **Run the whole pipeline** (from anywhere inside the project):
//! ```bash
//! docify
//! ```
//!
//! **Show what would happen**:
//! ```bash
//! docify --dry-run
//! ```
//!
//! **Fail the build when the generator fails** (useful for CI):
//! ```bash
//! docify --fail-on-generator-error
//! ```
//!
//! ### Configuration
//!
//! Every path is a field on [`DocifyConfig`] with a default for the stock Foundry
//! layout. Put overrides in `docify.json5` at the project root:
//!
//! ```json5
//! {
//!   remap_targets: ["lib/forge-std/src/Test.sol"],
//!   output_dir: "docs/pages",
//!   excluded_functions: ["initialize"],
//!   write_helpers_module: true,
//! }
//! ```
//!
//! ### Architecture
//!
//! **Module structure:**
//! - `src/lib.rs` - Library root
//! - `src/bin/docify.rs` - Binary entry point
//! - `src/docify/` - Tool implementation
//!   - `alias_table.rs` - Parse `remappings.txt` (forward and reverse)
//!   - `line_transformer.rs` - Line-preserving import rewriting
//!   - `file_remapper.rs` - In-place remap and the restoring `RemapGuard`
//!   - `generator.rs` - Build and run the `solidity-docgen` command line
//!   - `output_pruner.rs` - Delete excluded pages
//!   - `template_helpers.rs` - `filter`, `formatDescription`, `gt`
//!   - `pipeline.rs` - Orchestrate one run
//!   - `config.rs`, `cli_arg.rs` - Configuration layers
//!   - `error.rs`, `types.rs`, `ui_str.rs` - Shared types and messages
//! - `src/common/` - Shared utilities
//!   - `logging.rs` - Tracing subscriber setup
//!   - `workspace_utils.rs` - Project root discovery and file finding
//!
//! [`DocifyConfig`]: crate::docify::DocifyConfig
//! [`solidity-docgen`]: https://github.com/OpenZeppelin/solidity-docgen

// Attach all modules.
pub mod common;
pub mod docify;

// Re-export commonly used items.
pub use common::*;
