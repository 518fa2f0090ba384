//! The listing renderer: measurement, tree drawing, and deferred error
//! reporting over an opened size index.

mod connector;
mod entry;
mod missing;
mod path;
mod tree;
mod width;

pub use connector::{Connector, MAX_DEPTH};
pub use missing::MissingTargets;
pub use path::{PATH_CAPACITY, PathAccumulator};
pub use tree::{RenderError, Renderer};
pub use width::{Measure, display_width, measure};

use crate::index::{Metric, SortOrder};

/// Invocation-wide rendering configuration, fixed before any rendering
/// begins.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub metric: Metric,
    pub sort: SortOrder,
    /// User-facing depth cutoff for recursive listing.
    pub levels: usize,
    pub recursive: bool,
    /// Draw the tree with ASCII connectors instead of Unicode box drawing.
    pub ascii: bool,
    /// Show sizes in exact bytes, widening the size field.
    pub bytes: bool,
    /// Append a one-character type indicator to every entry.
    pub classify: bool,
    pub color: bool,
    /// Draw a proportional bar graph after each entry.
    pub graph: bool,
    /// Print the accumulated ancestor path instead of tree connectors.
    pub full_path: bool,
    /// List only directories, skipping individual files.
    pub dirs_only: bool,
    /// Print only each target's own aggregate size.
    pub summary: bool,
    /// Terminal columns available to the bar graph.
    pub width: u16,
}

impl RenderOptions {
    /// Columns the size field is right-aligned to.
    pub fn size_field_width(&self) -> usize {
        if self.bytes { 12 } else { 6 }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            metric: Metric::Actual,
            sort: SortOrder::Size,
            levels: 4,
            recursive: false,
            ascii: false,
            bytes: false,
            classify: false,
            color: false,
            graph: false,
            full_path: false,
            dirs_only: false,
            summary: false,
            width: crate::terminal::FALLBACK_WIDTH,
        }
    }
}
