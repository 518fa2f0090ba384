//! Measurement pass over one directory's entries.

use unicode_width::UnicodeWidthStr;

use crate::index::{DirCursor, Entry};

use super::RenderOptions;

/// Result of one measurement pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct Measure {
    /// Largest entry size under the active metric.
    pub max_size: u64,
    /// Widest entry name in terminal columns, plus the reserved classify
    /// column when classification is enabled.
    pub max_name_width: usize,
    /// Entries surviving the directories-only filter; sibling positions for
    /// connector codes are counted against this.
    pub visible: usize,
}

impl Measure {
    /// Fold one entry into the running maxima.
    pub fn account(&mut self, entry: &Entry, metric: crate::index::Metric) {
        self.visible += 1;
        let size = entry.size.get(metric);
        if size > self.max_size {
            self.max_size = size;
        }
        let width = display_width(&entry.name);
        if width > self.max_name_width {
            self.max_name_width = width;
        }
    }
}

/// Terminal cell width of an entry name.
///
/// Falls back to the byte length when the width computation yields nothing
/// usable for a non-empty name.
pub fn display_width(name: &str) -> usize {
    let width = name.width();
    if width == 0 { name.len() } else { width }
}

/// Iterate every entry of `cursor` once, computing the maxima the formatter
/// aligns against. The directories-only filter applies here exactly as it
/// does to the formatting pass, so filtered entries contribute nothing.
pub fn measure(cursor: &mut dyn DirCursor, opts: &RenderOptions) -> Measure {
    let mut measure = Measure::default();
    while let Some(entry) = cursor.read(opts.metric, opts.sort) {
        if opts.dirs_only && !entry.is_dir() {
            continue;
        }
        measure.account(&entry, opts.metric);
    }
    if opts.classify {
        measure.max_name_width += 1;
    }
    measure
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::snapshot::SnapshotIndex;
    use crate::index::{EntryKind, Metric, SizeIndex, SizeRecord};

    fn entry(name: &str, actual: u64) -> Entry {
        Entry {
            name: name.to_string(),
            kind: EntryKind::File,
            size: SizeRecord {
                actual,
                apparent: actual,
                count: 1,
            },
        }
    }

    #[test]
    fn display_width_counts_terminal_columns() {
        assert_eq!(display_width("plain"), 5);
        // Fullwidth CJK characters occupy two columns each.
        assert_eq!(display_width("日本"), 4);
    }

    #[test]
    fn account_tracks_maxima() {
        let mut measure = Measure::default();
        measure.account(&entry("short", 10), Metric::Actual);
        measure.account(&entry("much-longer-name", 3), Metric::Actual);
        assert_eq!(measure.max_size, 10);
        assert_eq!(measure.max_name_width, 16);
        assert_eq!(measure.visible, 2);
    }

    #[test]
    fn empty_directory_measures_to_zero() {
        let index = SnapshotIndex::from_json(
            r#"{"roots": [{"name": "/empty", "kind": "dir", "children": []}]}"#,
        )
        .expect("parses");
        let mut cursor = index.open("/empty").expect("opens");
        let measure = measure(cursor.as_mut(), &RenderOptions::default());
        assert_eq!(measure.max_size, 0);
        assert_eq!(measure.max_name_width, 0);
        assert_eq!(measure.visible, 0);
    }

    #[test]
    fn dirs_only_filter_excludes_files_from_maxima() {
        let index = SnapshotIndex::from_json(
            r#"{"roots": [{"name": "/mix", "kind": "dir", "children": [
                {"name": "huge-file-with-a-long-name", "kind": "file", "actual": 900},
                {"name": "d", "kind": "dir", "actual": 5}
            ]}]}"#,
        )
        .expect("parses");
        let mut cursor = index.open("/mix").expect("opens");
        let opts = RenderOptions {
            dirs_only: true,
            ..RenderOptions::default()
        };
        let measure = measure(cursor.as_mut(), &opts);
        assert_eq!(measure.max_size, 5);
        assert_eq!(measure.max_name_width, 1);
        assert_eq!(measure.visible, 1);
    }

    #[test]
    fn classify_reserves_a_suffix_column() {
        let index = SnapshotIndex::from_json(
            r#"{"roots": [{"name": "/one", "kind": "dir", "children": [
                {"name": "abc", "kind": "file", "actual": 1}
            ]}]}"#,
        )
        .expect("parses");
        let mut cursor = index.open("/one").expect("opens");
        let opts = RenderOptions {
            classify: true,
            ..RenderOptions::default()
        };
        assert_eq!(measure(cursor.as_mut(), &opts).max_name_width, 4);
    }
}
