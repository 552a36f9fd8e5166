// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Remap import paths in source files on disk.
//!
//! [`preprocess`] and [`postprocess`] are the two in-place operations: forward table
//! before the generator runs, reverse table afterwards. Both are built on
//! [`RemappedFile`], which separates the pure transform from the write.
//!
//! The pipeline does not call them directly. It holds a [`RemapGuard`] per target
//! file, so the reverse step runs on every exit path, including early returns and
//! panics.

use crate::docify::{
    error::{DocifyError, DocifyResult},
    line_transformer,
    types::AliasTable,
};
use std::path::{Path, PathBuf};

/// The result of transforming a file in memory. Nothing is written until
/// [`RemappedFile::apply`] is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemappedFile {
    pub path: PathBuf,
    pub original: String,
    pub remapped: String,
}

impl RemappedFile {
    /// Read `path` and transform its content with `table`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, or a line would be split.
    pub fn plan(path: &Path, table: &AliasTable) -> DocifyResult<Self> {
        let original = read_source(path)?;
        let remapped = line_transformer::transform_content(&original, table)?;
        Ok(Self {
            path: path.to_path_buf(),
            original,
            remapped,
        })
    }

    #[must_use]
    pub fn is_changed(&self) -> bool { self.original != self.remapped }

    /// Write the remapped content back to the file. Returns `true` if the file
    /// content changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn apply(&self) -> DocifyResult<bool> {
        if !self.is_changed() {
            return Ok(false);
        }
        write_source(&self.path, &self.remapped)?;
        Ok(true)
    }
}

/// Rewrite aliased imports in `path` into resolved paths, in place.
///
/// # Errors
///
/// Returns an error if the file cannot be read or written, or a line would be split.
pub fn preprocess(path: &Path, forward: &AliasTable) -> DocifyResult<bool> {
    RemappedFile::plan(path, forward)?.apply()
}

/// Rewrite resolved imports in `path` back into their aliases, in place.
///
/// # Errors
///
/// Returns an error if the file cannot be read or written, or a line would be split.
pub fn postprocess(path: &Path, reverse: &AliasTable) -> DocifyResult<bool> {
    RemappedFile::plan(path, reverse)?.apply()
}

/// How a [`RemapGuard`] put the file back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// The reverse table reproduced the original content exactly.
    Reversed,
    /// The reverse table did not reproduce the original (or failed), so the snapshot
    /// taken before the forward remap was written back instead.
    FromSnapshot,
}

/// Keeps a source file remapped for as long as it lives.
///
/// [`RemapGuard::acquire`] applies the forward table. [`RemapGuard::restore`] applies
/// the reverse table. If the guard is dropped without an explicit restore, the restore
/// happens in [`Drop`] and failures are logged.
#[derive(Debug)]
pub struct RemapGuard {
    path: PathBuf,
    snapshot: String,
    reverse: AliasTable,
    restored: bool,
}

impl RemapGuard {
    /// Apply `forward` to `path` and return a guard that will undo it.
    ///
    /// If the transform fails, the file is left untouched and no guard is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or written, or a line would be split.
    pub fn acquire(
        path: &Path,
        forward: &AliasTable,
        reverse: &AliasTable,
    ) -> DocifyResult<Self> {
        let planned = RemappedFile::plan(path, forward)?;
        let changed = planned.apply()?;

        // % is Display, ? is Debug.
        tracing::info!(message = "Remapped imports", path = ?path, changed = changed);

        Ok(Self {
            path: planned.path,
            snapshot: planned.original,
            reverse: reverse.clone(),
            restored: false,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path { &self.path }

    /// Restore the file now.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written back.
    pub fn restore(mut self) -> DocifyResult<RestoreOutcome> {
        self.restored = true;
        self.restore_in_place()
    }

    fn restore_in_place(&self) -> DocifyResult<RestoreOutcome> {
        let reversed = read_source(&self.path).and_then(|current| {
            line_transformer::transform_content(&current, &self.reverse)
        });

        match reversed {
            Ok(content) if content == self.snapshot => {
                write_source(&self.path, &content)?;
                tracing::info!(message = "Restored imports", path = ?self.path);
                Ok(RestoreOutcome::Reversed)
            }
            Ok(_) => {
                tracing::warn!(
                    message = "Reverse remap did not reproduce the original, writing snapshot",
                    path = ?self.path
                );
                write_source(&self.path, &self.snapshot)?;
                Ok(RestoreOutcome::FromSnapshot)
            }
            Err(error) => {
                tracing::warn!(
                    message = "Reverse remap failed, writing snapshot",
                    path = ?self.path,
                    error = %error
                );
                write_source(&self.path, &self.snapshot)?;
                Ok(RestoreOutcome::FromSnapshot)
            }
        }
    }
}

impl Drop for RemapGuard {
    fn drop(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;
        if let Err(error) = self.restore_in_place() {
            tracing::error!(
                message = "Could not restore remapped file",
                path = ?self.path,
                error = %error
            );
        }
    }
}

fn read_source(path: &Path) -> DocifyResult<String> {
    std::fs::read_to_string(path).map_err(|source| DocifyError::read_file(path, source))
}

fn write_source(path: &Path, content: &str) -> DocifyResult<()> {
    std::fs::write(path, content).map_err(|source| DocifyError::write_file(path, source))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docify::types::{AliasEntry, RemapDirection};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const SOURCE: &str = "pragma solidity ^0.8.13;\n\
                          import \"forge-std/Test.sol\";\n\
                          contract CounterTest is Test {}\n";

    fn forward() -> AliasTable {
        AliasTable::new(
            RemapDirection::Forward,
            vec![AliasEntry::new("forge-std/", "lib/forge-std/src/")],
        )
    }

    fn write_fixture(dir: &TempDir) -> PathBuf {
        let path = dir.path().join("Counter.t.sol");
        std::fs::write(&path, SOURCE).unwrap();
        path
    }

    #[test]
    fn test_plan_does_not_write() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir);
        let planned = RemappedFile::plan(&path, &forward()).unwrap();
        assert!(planned.is_changed());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), SOURCE);
    }

    #[test]
    fn test_apply_unchanged_is_noop() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Plain.sol");
        std::fs::write(&path, "contract Plain {}\n").unwrap();
        let planned = RemappedFile::plan(&path, &forward()).unwrap();
        assert!(!planned.apply().unwrap());
    }

    #[test]
    fn test_preprocess_then_postprocess() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir);

        assert!(preprocess(&path, &forward()).unwrap());
        let remapped = std::fs::read_to_string(&path).unwrap();
        assert!(remapped.contains("import \"lib/forge-std/src/Test.sol\";"));
        assert_eq!(remapped.lines().count(), SOURCE.lines().count());

        assert!(postprocess(&path, &forward().reversed()).unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), SOURCE);
    }

    #[test]
    fn test_preprocess_missing_file() {
        let dir = TempDir::new().unwrap();
        let error = preprocess(&dir.path().join("Missing.sol"), &forward()).unwrap_err();
        assert!(matches!(error, DocifyError::ReadFile { .. }));
    }

    #[test]
    fn test_guard_explicit_restore() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir);

        let guard = RemapGuard::acquire(&path, &forward(), &forward().reversed()).unwrap();
        assert_ne!(std::fs::read_to_string(&path).unwrap(), SOURCE);
        assert_eq!(guard.restore().unwrap(), RestoreOutcome::Reversed);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), SOURCE);
    }

    #[test]
    fn test_guard_restores_on_drop() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir);

        {
            let _guard =
                RemapGuard::acquire(&path, &forward(), &forward().reversed()).unwrap();
            assert_ne!(std::fs::read_to_string(&path).unwrap(), SOURCE);
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), SOURCE);
    }

    #[test]
    fn test_guard_restores_on_panic() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir);
        let path_clone = path.clone();

        let result = std::panic::catch_unwind(move || {
            let _guard =
                RemapGuard::acquire(&path_clone, &forward(), &forward().reversed()).unwrap();
            panic!("generator blew up");
        });
        assert!(result.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), SOURCE);
    }

    #[test]
    fn test_guard_falls_back_to_snapshot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Mixed.sol");
        let oz = AliasTable::new(
            RemapDirection::Forward,
            vec![AliasEntry::new("@oz/", "lib/openzeppelin-contracts/contracts/")],
        );
        // Already in resolved form: the reverse table would turn it into an alias.
        let source = "import \"lib/openzeppelin-contracts/contracts/A.sol\";\n\
                      import \"@oz/B.sol\";";
        std::fs::write(&path, source).unwrap();

        let guard = RemapGuard::acquire(&path, &oz, &oz.reversed()).unwrap();
        assert_eq!(guard.restore().unwrap(), RestoreOutcome::FromSnapshot);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), source);
    }

    #[test]
    fn test_guard_keeps_crlf_original() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Windows.sol");
        let source = "import \"forge-std/Test.sol\";\r\ncontract W {}\r\n";
        std::fs::write(&path, source).unwrap();

        let guard = RemapGuard::acquire(&path, &forward(), &forward().reversed()).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "import \"lib/forge-std/src/Test.sol\";\ncontract W {}\n"
        );
        assert_eq!(guard.restore().unwrap(), RestoreOutcome::FromSnapshot);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), source);
    }

    #[test]
    fn test_acquire_failure_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let path = write_fixture(&dir);
        let bad = AliasTable::new(
            RemapDirection::Forward,
            vec![AliasEntry::new("forge-std/", "lib/\nforge-std/")],
        );
        assert!(RemapGuard::acquire(&path, &bad, &bad.reversed()).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), SOURCE);
    }
}
