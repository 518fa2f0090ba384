//! Interface to the size index that `duls` renders from.
//!
//! The index itself is built elsewhere; this module defines the record types
//! and the cursor traits the renderer consumes, plus the snapshot-backed
//! provider in [`snapshot`].

pub mod snapshot;

use serde::Deserialize;
use thiserror::Error;

/// Measurement used when reporting an entry's size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Metric {
    /// Number of items below the entry.
    Count,
    /// Apparent size as reported by the filesystem.
    Apparent,
    /// Actual disk usage.
    #[default]
    Actual,
}

/// Order in which a cursor yields a directory's entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Largest first under the active metric.
    #[default]
    Size,
    /// Ascending by entry name.
    Name,
}

/// Classification of an indexed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Dir,
    #[default]
    File,
    Other,
}

/// An entry's size under every metric the index tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizeRecord {
    pub actual: u64,
    pub apparent: u64,
    pub count: u64,
}

impl SizeRecord {
    /// Project the record onto a single metric.
    pub fn get(&self, metric: Metric) -> u64 {
        match metric {
            Metric::Count => self.count,
            Metric::Apparent => self.apparent,
            Metric::Actual => self.actual,
        }
    }
}

/// One child record of an indexed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub kind: EntryKind,
    pub size: SizeRecord,
}

impl Entry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }
}

/// Errors surfaced by an index provider.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The requested path has no record in the index.
    #[error("path '{path}' is not present in the index")]
    PathNotFound { path: String },

    /// The requested path resolves to a record that is not a directory.
    #[error("'{path}' is not indexed as a directory")]
    NotADirectory { path: String },

    #[error("failed to read index snapshot")]
    Io(#[from] std::io::Error),

    #[error("malformed index snapshot")]
    Malformed(#[from] serde_json::Error),
}

/// Iterator over one directory's entries.
///
/// Cursors are opened and closed in strict stack order matching recursion
/// depth; dropping the cursor releases it. The metric and sort order are
/// fixed for a whole invocation, so a cursor may compute its ordering once
/// on the first [`read`](DirCursor::read) and keep it for later rewinds.
pub trait DirCursor: std::fmt::Debug {
    /// Yield the next entry under the given metric and sort order, or `None`
    /// once the directory is exhausted.
    fn read(&mut self, metric: Metric, sort: SortOrder) -> Option<Entry>;

    /// Reset iteration to the first entry.
    fn rewind(&mut self);

    /// Total number of entries in the directory, before any filtering.
    fn entry_count(&self) -> usize;

    /// The directory's own precomputed aggregate size.
    fn aggregate_size(&self) -> SizeRecord;

    /// Open a cursor over a directory entry of this directory.
    fn open_child(&self, entry: &Entry) -> Result<Box<dyn DirCursor>, IndexError>;
}

/// A read-only view of a previously built size index.
pub trait SizeIndex {
    /// Open a cursor over the directory record stored for `path`.
    fn open(&self, path: &str) -> Result<Box<dyn DirCursor>, IndexError>;
}
