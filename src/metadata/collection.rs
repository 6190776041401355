use std::collections::BTreeMap;

use log::debug;

use super::directory::{Directory, DirectoryKind};

/// The result of an extraction: at most one [`Directory`] per kind.
///
/// Directories are created on first request and live as long as the
/// `Metadata` itself.
#[derive(Debug, Default)]
pub struct Metadata {
    directories: BTreeMap<DirectoryKind, Directory>,
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the directory of `kind`, creating an empty one on first use.
    pub fn get_directory(&mut self, kind: DirectoryKind) -> &mut Directory {
        self.directories.entry(kind).or_insert_with(|| {
            debug!("Creating directory: {}", kind);
            Directory::new(kind)
        })
    }

    /// Returns the directory of `kind` without creating it.
    pub fn directory(&self, kind: DirectoryKind) -> Option<&Directory> {
        self.directories.get(&kind)
    }

    pub fn contains_directory(&self, kind: DirectoryKind) -> bool {
        self.directories.contains_key(&kind)
    }

    /// Iterates over all created directories, ordered by kind.
    pub fn directories(&self) -> impl Iterator<Item = &Directory> + Clone + '_ {
        self.directories.values()
    }

    pub fn directory_count(&self) -> usize {
        self.directories.len()
    }

    /// Returns `true` if no directory holds any tag.
    pub fn is_empty(&self) -> bool {
        self.directories.values().all(Directory::is_empty)
    }

    /// Returns `true` if any directory recorded an error during extraction.
    pub fn has_errors(&self) -> bool {
        self.directories.values().any(Directory::has_errors)
    }
}
