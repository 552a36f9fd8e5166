// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Type definitions for import remapping.

/// Which way an [`AliasTable`] rewrites import paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemapDirection {
    /// `alias` → `resolved_path`, applied before the generator runs.
    Forward,
    /// `resolved_path` → `alias`, applied afterwards to restore the sources.
    Reverse,
}

/// One row of an [`AliasTable`]: replace `search` with `replacement`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasEntry {
    pub search: String,
    pub replacement: String,
}

impl AliasEntry {
    pub fn new(search: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            search: search.into(),
            replacement: replacement.into(),
        }
    }
}

/// Ordered remapping entries. Entries are applied in manifest order, each one to the
/// output of the previous one, so order is significant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    pub direction: RemapDirection,
    pub entries: Vec<AliasEntry>,
}

impl AliasTable {
    #[must_use]
    pub fn new(direction: RemapDirection, entries: Vec<AliasEntry>) -> Self {
        Self { direction, entries }
    }

    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn iter(&self) -> std::slice::Iter<'_, AliasEntry> { self.entries.iter() }

    /// Swap search and replacement on every entry, keeping order.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let direction = match self.direction {
            RemapDirection::Forward => RemapDirection::Reverse,
            RemapDirection::Reverse => RemapDirection::Forward,
        };
        let entries = self
            .entries
            .iter()
            .map(|entry| AliasEntry::new(&entry.replacement, &entry.search))
            .collect();
        Self { direction, entries }
    }

    /// Render the table in the compiler's `alias:resolved_path` remapping form. A
    /// [`RemapDirection::Reverse`] table renders the same lines as its forward twin.
    #[must_use]
    pub fn to_compiler_remappings(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| match self.direction {
                RemapDirection::Forward => format!("{}:{}", entry.search, entry.replacement),
                RemapDirection::Reverse => format!("{}:{}", entry.replacement, entry.search),
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a AliasTable {
    type Item = &'a AliasEntry;
    type IntoIter = std::slice::Iter<'a, AliasEntry>;

    fn into_iter(self) -> Self::IntoIter { self.entries.iter() }
}
