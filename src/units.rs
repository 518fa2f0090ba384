//! Human-readable presentation of raw index values.

use crate::index::{EntryKind, Metric, SizeRecord};

const SUFFIXES: [&str; 6] = ["K", "M", "G", "T", "P", "E"];

/// Format a size record under the active metric.
///
/// Item counts and exact-byte mode print the raw integer; everything else is
/// binary scaled to one decimal with a `K`/`M`/`G`/... suffix. Values below
/// one kibibyte stay unscaled so small directories read as plain numbers.
pub fn human_size(size: &SizeRecord, metric: Metric, exact: bool) -> String {
    let value = size.get(metric);
    if exact || metric == Metric::Count {
        return value.to_string();
    }
    if value < 1024 {
        return value.to_string();
    }
    let mut scaled = value as f64 / 1024.0;
    let mut suffix = 0;
    while scaled >= 1024.0 && suffix + 1 < SUFFIXES.len() {
        scaled /= 1024.0;
        suffix += 1;
    }
    format!("{scaled:.1}{}", SUFFIXES[suffix])
}

/// One-character classification suffix for an entry.
///
/// Regular files map to a space so the reserved classify column stays
/// aligned with suffixed entries.
pub fn type_char(kind: EntryKind) -> char {
    match kind {
        EntryKind::Dir => '/',
        EntryKind::File => ' ',
        EntryKind::Other => '@',
    }
}
