// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! End-to-end validation tests for `docify`.
//!
//! Unit tests next to each module cover single lines, single entries, and error
//! variants with minimal hardcoded strings. The tests here run complete fixtures from
//! `test_data/project/` (a forge-std style `Test.sol`, its expected remapped form, a
//! `remappings.txt`, and an exclusion list) through the same code paths the pipeline
//! uses.
