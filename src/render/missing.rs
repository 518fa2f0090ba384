//! Deferred reporting for targets the index could not resolve.
//!
//! Unresolved top-level targets never abort processing of the remaining
//! targets; they queue up here and are reported together, in the order they
//! were given on the command line, after all valid targets have produced
//! their output.

use std::collections::VecDeque;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// FIFO of target paths awaiting a "not found" diagnostic.
#[derive(Debug, Default)]
pub struct MissingTargets {
    queue: VecDeque<String>,
}

impl MissingTargets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a target to the tail of the queue.
    pub fn push(&mut self, path: impl Into<String>) {
        self.queue.push_back(path.into());
    }

    /// Remove and return the head of the queue, or `None` when empty.
    pub fn pop(&mut self) -> Option<String> {
        self.queue.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Drain the queue in enqueue order, writing one diagnostic per target.
    ///
    /// The wording distinguishes targets that name an existing regular file
    /// on the real filesystem from everything else; the check runs at drain
    /// time, against the filesystem rather than the index. Returns how many
    /// diagnostics were written.
    pub fn report<W: Write>(&mut self, out: &mut W) -> io::Result<usize> {
        let mut reported = 0;
        while let Some(path) = self.pop() {
            let noun = if is_regular_file(&path) { "file" } else { "path" };
            writeln!(out, "The requested {noun} '{path}' was not found in the index.")?;
            reported += 1;
        }
        Ok(reported)
    }
}

/// Whether `path` names an existing regular file on the real filesystem.
pub(crate) fn is_regular_file(path: impl AsRef<Path>) -> bool {
    fs::metadata(path).map(|meta| meta.is_file()).unwrap_or(false)
}
