//! JSON snapshot provider for the [`SizeIndex`] traits.
//!
//! A snapshot is the serialized form of a previously built index: a list of
//! indexed roots, each a tree of named size records. The whole file is loaded
//! into memory up front; cursors then serve reads without touching the disk.

use std::fs;
use std::path::Path;
use std::rc::Rc;

use log::debug;
use serde::Deserialize;

use super::{DirCursor, Entry, EntryKind, IndexError, Metric, SizeIndex, SizeRecord, SortOrder};

/// Raw node exactly as it appears in the snapshot file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RawNode {
    name: String,
    kind: EntryKind,
    actual: u64,
    apparent: u64,
    count: u64,
    children: Vec<RawNode>,
}

#[derive(Debug, Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    version: u32,
    #[serde(default)]
    roots: Vec<RawNode>,
}

const SNAPSHOT_VERSION: u32 = 1;

/// Resolved in-memory node. Children are reference counted so a cursor can
/// outlive the borrow it was opened through.
#[derive(Debug)]
struct Node {
    name: String,
    kind: EntryKind,
    size: SizeRecord,
    children: Vec<Rc<Node>>,
}

impl Node {
    fn from_raw(raw: RawNode) -> Rc<Self> {
        Rc::new(Node {
            name: raw.name,
            kind: raw.kind,
            size: SizeRecord {
                actual: raw.actual,
                apparent: raw.apparent,
                count: raw.count,
            },
            children: raw.children.into_iter().map(Node::from_raw).collect(),
        })
    }

    fn entry(&self) -> Entry {
        Entry {
            name: self.name.clone(),
            kind: self.kind,
            size: self.size,
        }
    }
}

/// An index snapshot loaded into memory.
#[derive(Debug)]
pub struct SnapshotIndex {
    roots: Vec<Rc<Node>>,
}

impl SnapshotIndex {
    /// Load a snapshot from a JSON file on disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, IndexError> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    /// Parse a snapshot from its JSON text.
    pub fn from_json(text: &str) -> Result<Self, IndexError> {
        let raw: RawSnapshot = serde_json::from_str(text)?;
        if raw.version > SNAPSHOT_VERSION {
            debug!("snapshot declares version {}, reading as version 1", raw.version);
        }
        Ok(SnapshotIndex {
            roots: raw.roots.into_iter().map(Node::from_raw).collect(),
        })
    }

    /// Walk from an indexed root to the node stored for `path`.
    fn resolve(&self, path: &str) -> Option<Rc<Node>> {
        let path = normalize(path);
        for root in &self.roots {
            let root_name = normalize(&root.name);
            let Some(rest) = strip_root(&path, &root_name) else {
                continue;
            };
            let mut node = Rc::clone(root);
            let mut found = true;
            for component in rest.split('/').filter(|c| !c.is_empty() && *c != ".") {
                match node.children.iter().find(|c| c.name == component) {
                    Some(child) => node = Rc::clone(child),
                    None => {
                        found = false;
                        break;
                    }
                }
            }
            if found {
                return Some(node);
            }
        }
        None
    }
}

impl SizeIndex for SnapshotIndex {
    fn open(&self, path: &str) -> Result<Box<dyn DirCursor>, IndexError> {
        let node = self
            .resolve(path)
            .or_else(|| {
                // A relative target may be indexed under its absolute path.
                let absolute = fs::canonicalize(path).ok()?;
                self.resolve(&absolute.to_string_lossy())
            })
            .ok_or_else(|| IndexError::PathNotFound {
                path: path.to_string(),
            })?;
        if node.kind != EntryKind::Dir {
            return Err(IndexError::NotADirectory {
                path: path.to_string(),
            });
        }
        Ok(Box::new(SnapshotCursor::new(node)))
    }
}

/// Strip a root prefix from a normalized path, returning the remainder.
fn strip_root<'a>(path: &'a str, root: &str) -> Option<&'a str> {
    if path == root {
        return Some("");
    }
    let rest = path.strip_prefix(root)?;
    if root.ends_with('/') || rest.starts_with('/') {
        Some(rest)
    } else {
        None
    }
}

/// Trim trailing slashes, keeping a bare "/" intact.
fn normalize(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Cursor over one snapshot directory.
///
/// The child ordering is computed on the first read and reused across
/// rewinds; the metric and sort order never change within an invocation.
#[derive(Debug)]
struct SnapshotCursor {
    node: Rc<Node>,
    order: Option<Vec<usize>>,
    pos: usize,
}

impl SnapshotCursor {
    fn new(node: Rc<Node>) -> Self {
        SnapshotCursor {
            node,
            order: None,
            pos: 0,
        }
    }

    fn sorted_order(&self, metric: Metric, sort: SortOrder) -> Vec<usize> {
        let children = &self.node.children;
        let mut order: Vec<usize> = (0..children.len()).collect();
        match sort {
            SortOrder::Size => order.sort_by(|&a, &b| {
                children[b]
                    .size
                    .get(metric)
                    .cmp(&children[a].size.get(metric))
                    .then_with(|| children[a].name.cmp(&children[b].name))
            }),
            SortOrder::Name => order.sort_by(|&a, &b| children[a].name.cmp(&children[b].name)),
        }
        order
    }
}

impl DirCursor for SnapshotCursor {
    fn read(&mut self, metric: Metric, sort: SortOrder) -> Option<Entry> {
        if self.order.is_none() {
            self.order = Some(self.sorted_order(metric, sort));
        }
        let order = self.order.as_ref()?;
        let index = *order.get(self.pos)?;
        self.pos += 1;
        Some(self.node.children[index].entry())
    }

    fn rewind(&mut self) {
        self.pos = 0;
    }

    fn entry_count(&self) -> usize {
        self.node.children.len()
    }

    fn aggregate_size(&self) -> SizeRecord {
        self.node.size
    }

    fn open_child(&self, entry: &Entry) -> Result<Box<dyn DirCursor>, IndexError> {
        let child = self
            .node
            .children
            .iter()
            .find(|c| c.kind == EntryKind::Dir && c.name == entry.name)
            .ok_or_else(|| IndexError::NotADirectory {
                path: entry.name.clone(),
            })?;
        Ok(Box::new(SnapshotCursor::new(Rc::clone(child))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SnapshotIndex {
        SnapshotIndex::from_json(
            r#"{
                "version": 1,
                "roots": [{
                    "name": "/data", "kind": "dir",
                    "actual": 40, "apparent": 44, "count": 3,
                    "children": [
                        {"name": "a.txt", "kind": "file", "actual": 10, "apparent": 12, "count": 1},
                        {"name": "sub", "kind": "dir", "actual": 30, "apparent": 32, "count": 2,
                         "children": [
                            {"name": "inner.bin", "kind": "file", "actual": 30, "apparent": 32, "count": 1}
                         ]}
                    ]
                }]
            }"#,
        )
        .expect("parses")
    }

    #[test]
    fn opens_root_and_nested_paths() {
        let index = sample();
        let root = index.open("/data").expect("root opens");
        assert_eq!(root.entry_count(), 2);
        assert_eq!(root.aggregate_size().actual, 40);

        let sub = index.open("/data/sub").expect("nested opens");
        assert_eq!(sub.entry_count(), 1);
    }

    #[test]
    fn trailing_slash_is_ignored() {
        let index = sample();
        assert!(index.open("/data/sub/").is_ok());
    }

    #[test]
    fn missing_path_reports_not_found() {
        let index = sample();
        match index.open("/data/nope") {
            Err(IndexError::PathNotFound { path }) => assert_eq!(path, "/data/nope"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn file_record_is_not_a_directory() {
        let index = sample();
        assert!(matches!(
            index.open("/data/a.txt"),
            Err(IndexError::NotADirectory { .. })
        ));
    }

    #[test]
    fn size_sort_is_descending_under_the_active_metric() {
        let index = sample();
        let mut cursor = index.open("/data").expect("opens");
        let first = cursor.read(Metric::Actual, SortOrder::Size).expect("first");
        let second = cursor.read(Metric::Actual, SortOrder::Size).expect("second");
        assert_eq!(first.name, "sub");
        assert_eq!(second.name, "a.txt");
        assert!(cursor.read(Metric::Actual, SortOrder::Size).is_none());
    }

    #[test]
    fn name_sort_is_ascending() {
        let index = sample();
        let mut cursor = index.open("/data").expect("opens");
        let first = cursor.read(Metric::Actual, SortOrder::Name).expect("first");
        assert_eq!(first.name, "a.txt");
    }

    #[test]
    fn rewind_restarts_iteration() {
        let index = sample();
        let mut cursor = index.open("/data").expect("opens");
        let first = cursor.read(Metric::Actual, SortOrder::Size).expect("first");
        cursor.rewind();
        let again = cursor.read(Metric::Actual, SortOrder::Size).expect("again");
        assert_eq!(first, again);
    }

    #[test]
    fn open_child_descends_into_directories() {
        let index = sample();
        let mut cursor = index.open("/data").expect("opens");
        let entry = cursor.read(Metric::Actual, SortOrder::Size).expect("entry");
        assert!(entry.is_dir());
        let child = cursor.open_child(&entry).expect("child opens");
        assert_eq!(child.aggregate_size().actual, 30);
    }
}
