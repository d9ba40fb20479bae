// SPDX-License-Identifier: MPL-2.0
//! Ordered collection of loaded files with a selection cursor.
//!
//! # Invariant
//!
//! The selection is `None` exactly when the catalog is empty; otherwise it
//! points at a valid index. Every mutating operation restores this before it
//! returns, and out-of-range requests leave the catalog untouched.
//!
//! # Example
//!
//! ```
//! use cropdeck::domain::catalog::{Catalog, FileEntry};
//!
//! let mut catalog = Catalog::new();
//! catalog.append(vec![FileEntry::new("/a.png"), FileEntry::new("/b.png")]);
//! assert_eq!(catalog.selected_index(), Some(0));
//!
//! catalog.remove(0).unwrap();
//! assert_eq!(catalog.selected_entry().map(|e| e.name.as_str()), Some("b.png"));
//! ```

mod entry;

pub use entry::FileEntry;

use std::fmt;

// =============================================================================
// CatalogError
// =============================================================================

/// Errors raised by index-based catalog operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogError {
    /// The index does not address an entry.
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// Number of entries at the time of the call.
        len: usize,
    },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::IndexOutOfRange { index, len } => {
                write!(f, "index {index} is out of range for {len} files")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

// =============================================================================
// Catalog
// =============================================================================

/// Result of removing an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    /// The removed entry.
    pub entry: FileEntry,
    /// Whether the selection now points at a different file (or nothing).
    pub selection_changed: bool,
}

/// Ordered file list plus selection cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<FileEntry>,
    selected: Option<usize>,
}

impl Catalog {
    /// Creates an empty catalog with nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the selected entry, `None` when the catalog is empty.
    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// The selected entry, if any.
    #[must_use]
    pub fn selected_entry(&self) -> Option<&FileEntry> {
        self.selected.and_then(|index| self.entries.get(index))
    }

    /// Ordered copy of every entry's path.
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.path.clone()).collect()
    }

    /// Appends entries, preserving their order.
    ///
    /// Selects the first entry when the catalog was empty and at least one
    /// entry was added. Returns `true` if the selection changed.
    pub fn append(&mut self, entries: Vec<FileEntry>) -> bool {
        let was_empty = self.entries.is_empty();
        self.entries.extend(entries);
        if was_empty && !self.entries.is_empty() {
            self.selected = Some(0);
            return true;
        }
        false
    }

    /// Removes the entry at `index` and repairs the selection.
    ///
    /// Removing an entry before the selected one keeps the same file
    /// selected. Removing the selected entry selects whatever now sits at
    /// that index, clamped to the last entry.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::IndexOutOfRange`] without modifying the
    /// catalog if `index` is not a valid position.
    pub fn remove(&mut self, index: usize) -> Result<Removal, CatalogError> {
        let len = self.entries.len();
        if index >= len {
            return Err(CatalogError::IndexOutOfRange { index, len });
        }

        let entry = self.entries.remove(index);
        let previous = self.selected;
        self.selected = match previous {
            _ if self.entries.is_empty() => None,
            Some(selected) if index < selected => Some(selected - 1),
            Some(selected) => Some(selected.min(self.entries.len() - 1)),
            // Non-empty catalogs always have a selection.
            None => Some(0),
        };

        Ok(Removal {
            entry,
            selection_changed: previous == Some(index) || self.selected.is_none(),
        })
    }

    /// Removes every entry and clears the selection.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.selected = None;
    }

    /// Moves the selection to `index`.
    ///
    /// Returns `true` if the selection moved.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::IndexOutOfRange`] without modifying the
    /// selection if `index` is not a valid position.
    pub fn select(&mut self, index: usize) -> Result<bool, CatalogError> {
        let len = self.entries.len();
        if index >= len {
            return Err(CatalogError::IndexOutOfRange { index, len });
        }
        let moved = self.selected != Some(index);
        self.selected = Some(index);
        Ok(moved)
    }

    /// Checks the selection invariant.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        match self.selected {
            None => self.entries.is_empty(),
            Some(index) => index < self.entries.len(),
        }
    }
}
