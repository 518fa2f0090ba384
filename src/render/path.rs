//! Accumulated ancestor path used by full-path mode.

use log::debug;

/// Default capacity of the accumulated path, in bytes.
pub const PATH_CAPACITY: usize = 4096;

/// Bounded buffer holding the `name/` segments of every ancestor of the
/// entry currently being rendered.
///
/// Appends that would exceed the capacity are skipped: deeper entries then
/// render relative to the last successfully appended ancestor. Restores are
/// byte exact regardless of whether the matching append happened.
#[derive(Debug)]
pub struct PathAccumulator {
    buf: String,
    capacity: usize,
}

impl PathAccumulator {
    pub fn new() -> Self {
        Self::with_capacity(PATH_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        PathAccumulator {
            buf: String::new(),
            capacity,
        }
    }

    /// The accumulated path so far.
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Append `name` plus a separator before recursing into it. Returns the
    /// length to hand back to [`restore`](Self::restore) afterwards.
    pub fn enter(&mut self, name: &str) -> usize {
        let saved = self.buf.len();
        if saved + name.len() + 2 <= self.capacity {
            self.buf.push_str(name);
            self.buf.push('/');
        } else {
            debug!("path accumulator full, not appending '{name}'");
        }
        saved
    }

    /// Truncate back to the length recorded by [`enter`](Self::enter).
    pub fn restore(&mut self, saved: usize) {
        self.buf.truncate(saved);
    }
}

impl Default for PathAccumulator {
    fn default() -> Self {
        Self::new()
    }
}
