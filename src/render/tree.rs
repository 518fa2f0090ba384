//! Recursive tree renderer over an opened size index.
//!
//! One renderer handles one invocation: it walks each command-line target in
//! turn, draws its listing, and queues unresolved targets for the deferred
//! diagnostics written after the last target. All per-render state (the
//! connector code array, the accumulated path) lives on the renderer, so
//! independent renders never share buffers.

use std::io::{self, Write};

use log::debug;
use thiserror::Error;

use crate::index::{DirCursor, Entry, IndexError, SizeIndex};

use super::RenderOptions;
use super::connector::{Connector, MAX_DEPTH};
use super::entry::write_line;
use super::missing::{MissingTargets, is_regular_file};
use super::path::PathAccumulator;
use super::width::{Measure, measure};

/// Errors that abort a whole render run.
///
/// Per-target "not found" conditions never surface here; they go through the
/// deferred queue instead.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A target exists on the filesystem but its parent directory has no
    /// usable record, which points at a stale or corrupt index.
    #[error("index is inconsistent: {0}")]
    InconsistentIndex(String),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Renders listings for a sequence of targets against one index.
pub struct Renderer<'a, W: Write> {
    index: &'a dyn SizeIndex,
    opts: RenderOptions,
    out: W,
    prefix: [Connector; MAX_DEPTH + 1],
    path: PathAccumulator,
    missing: MissingTargets,
}

impl<'a, W: Write> Renderer<'a, W> {
    pub fn new(index: &'a dyn SizeIndex, opts: RenderOptions, out: W) -> Self {
        Renderer {
            index,
            opts,
            out,
            prefix: [Connector::None; MAX_DEPTH + 1],
            path: PathAccumulator::new(),
            missing: MissingTargets::new(),
        }
    }

    /// Render every target in order, then drain the queued diagnostics.
    /// Returns the number of targets that were left unresolved.
    pub fn run(&mut self, targets: &[String]) -> Result<usize, RenderError> {
        for target in targets {
            self.render_target(target)?;
        }
        let unresolved = self.missing.report(&mut self.out)?;
        Ok(unresolved)
    }

    /// Render one command-line target.
    ///
    /// Targets naming a regular file on disk go through single-entry lookup
    /// against their parent directory; everything else opens as a directory
    /// record. Targets absent from the index are queued, not reported here.
    fn render_target(&mut self, target: &str) -> Result<(), RenderError> {
        if is_regular_file(target) {
            return self.render_file_target(target);
        }
        match self.index.open(target) {
            Ok(mut cursor) => {
                if self.opts.summary {
                    self.render_summary(target, cursor.as_mut())?;
                } else {
                    self.render_dir(cursor.as_mut(), 0)?;
                }
                Ok(())
            }
            Err(IndexError::PathNotFound { .. } | IndexError::NotADirectory { .. }) => {
                self.missing.push(target);
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// List one directory at the given recursion level.
    ///
    /// Two passes: measure every entry, rewind, then format and recurse.
    /// Child cursors open and close in strict stack order.
    fn render_dir(&mut self, cursor: &mut dyn DirCursor, level: usize) -> Result<(), RenderError> {
        if level > self.opts.levels {
            return Ok(());
        }

        let measure = measure(cursor, &self.opts);
        cursor.rewind();

        let mut n = 0usize;
        while let Some(entry) = cursor.read(self.opts.metric, self.opts.sort) {
            if self.opts.dirs_only && !entry.is_dir() {
                continue;
            }
            let last = n + 1 == measure.visible;

            if self.opts.recursive {
                self.prefix[level] = Connector::sibling(n, measure.visible);
            }

            self.write_entry(&entry, level, &measure, None)?;

            if self.opts.recursive && level < MAX_DEPTH && entry.is_dir() {
                self.prefix[level] = Connector::continuation(last);
                let saved = self
                    .opts
                    .full_path
                    .then(|| self.path.enter(&entry.name));
                match cursor.open_child(&entry) {
                    Ok(mut child) => self.render_dir(child.as_mut(), level + 1)?,
                    Err(err) => debug!("cannot descend into '{}': {err}", entry.name),
                }
                if let Some(saved) = saved {
                    self.path.restore(saved);
                }
            }

            n += 1;
        }

        self.prefix[level] = Connector::None;
        Ok(())
    }

    /// Print only a directory's own aggregate size and its path.
    fn render_summary(&mut self, path: &str, cursor: &mut dyn DirCursor) -> io::Result<()> {
        let size = cursor.aggregate_size();
        let formatted = crate::units::human_size(&size, self.opts.metric, self.opts.bytes);
        write!(self.out, "{formatted} {path}")?;
        if self.opts.classify {
            self.out.write_all(b"/")?;
        }
        self.out.write_all(b"\n")
    }

    /// Single-entry lookup for a target that is a regular file on disk.
    ///
    /// The parent directory must be openable; a file that exists on the
    /// filesystem beneath an unopenable parent means the index and the
    /// filesystem disagree, which is fatal rather than a queued miss.
    fn render_file_target(&mut self, target: &str) -> Result<(), RenderError> {
        let (parent, name) = split_target(target);
        let mut cursor = self.index.open(parent).map_err(|err| {
            RenderError::InconsistentIndex(format!(
                "'{target}' exists on the filesystem but its parent '{parent}' cannot be opened: {err}"
            ))
        })?;
        self.render_matches(cursor.as_mut(), parent, name, target)
    }

    /// Render every entry of `cursor` whose name equals `name` exactly.
    ///
    /// The parent is re-scanned rather than keyed: the index does not
    /// promise unique names, and duplicates each render their own line. A
    /// directory match continues tree rendering beneath it.
    fn render_matches(
        &mut self,
        cursor: &mut dyn DirCursor,
        parent: &str,
        name: &str,
        target: &str,
    ) -> Result<(), RenderError> {
        let mut measure = Measure::default();
        while let Some(entry) = cursor.read(self.opts.metric, self.opts.sort) {
            if entry.name != name {
                continue;
            }
            measure.account(&entry, self.opts.metric);
        }
        if self.opts.classify {
            measure.max_name_width += 1;
        }
        if measure.visible == 0 {
            self.missing.push(target);
            return Ok(());
        }
        cursor.rewind();

        let qualified = format!("{}/", parent.trim_end_matches('/'));
        let mut n = 0usize;
        while let Some(entry) = cursor.read(self.opts.metric, self.opts.sort) {
            if entry.name != name {
                continue;
            }
            let qualifier = self.opts.summary.then_some(qualified.as_str());
            self.write_entry(&entry, 0, &measure, qualifier)?;

            if self.opts.recursive && entry.is_dir() {
                self.prefix[0] = Connector::continuation(n + 1 == measure.visible);
                match cursor.open_child(&entry) {
                    Ok(mut child) => self.render_dir(child.as_mut(), 1)?,
                    Err(err) => debug!("cannot descend into '{}': {err}", entry.name),
                }
            }

            n += 1;
        }

        self.prefix[0] = Connector::None;
        Ok(())
    }

    /// Write one formatted line for `entry`.
    ///
    /// `qualifier` overrides the printed path prefix (used by lookup mode);
    /// otherwise full-path mode prints the accumulated ancestor path.
    fn write_entry(
        &mut self,
        entry: &Entry,
        level: usize,
        measure: &Measure,
        qualifier: Option<&str>,
    ) -> io::Result<()> {
        let prefix_path = match qualifier {
            Some(path) => path,
            None if self.opts.full_path => self.path.as_str(),
            None => "",
        };
        write_line(
            &mut self.out,
            &self.opts,
            &self.prefix,
            prefix_path,
            entry,
            level,
            measure,
        )
    }
}

/// Split a file target into its parent directory and base name.
fn split_target(target: &str) -> (&str, &str) {
    match target.rfind('/') {
        Some(0) => ("/", &target[1..]),
        Some(idx) => (&target[..idx], &target[idx + 1..]),
        None => (".", target),
    }
}
