//! Per-depth connector state for tree drawing.
//!
//! Each recursion level holds one code; a rendered line prints the glyphs of
//! every ancestor level followed by its own. Levels left behind by returning
//! recursion are reset to [`Connector::None`], which is also where trail
//! printing stops.

/// Hard capacity of the per-depth code array. Descent halts at this depth
/// regardless of the user-facing level cutoff.
pub const MAX_DEPTH: usize = 32;

/// Connector code for one recursion level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connector {
    /// Unused level; terminates the ancestor trail.
    #[default]
    None,
    /// First sibling of a directory.
    First,
    /// A sibling that is neither first nor last.
    Middle,
    /// Last sibling, including the single entry of a one-entry directory.
    Last,
    /// Ancestor with further siblings below it; draws a continuing bar.
    VerticalCont,
    /// Ancestor that was the last sibling; draws blank space.
    BlankCont,
}

const TREE_ASCII: [&str; 6] = ["", " `+-", "  |-", "  `-", "  | ", "    "];
const TREE_UNICODE: [&str; 6] = ["", " ╰┬─", "  ├─", "  ╰─", "  │ ", "    "];

impl Connector {
    /// Code for the sibling at position `n` out of `count` visible siblings.
    pub fn sibling(n: usize, count: usize) -> Self {
        if n + 1 == count {
            Connector::Last
        } else if n == 0 {
            Connector::First
        } else {
            Connector::Middle
        }
    }

    /// Code a level takes while recursion runs beneath one of its entries.
    pub fn continuation(last_sibling: bool) -> Self {
        if last_sibling {
            Connector::BlankCont
        } else {
            Connector::VerticalCont
        }
    }

    /// Fixed-width glyph for this code.
    pub fn glyph(self, ascii: bool) -> &'static str {
        let table = if ascii { &TREE_ASCII } else { &TREE_UNICODE };
        table[self as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_sibling_is_last() {
        assert_eq!(Connector::sibling(0, 1), Connector::Last);
    }

    #[test]
    fn positions_map_to_first_middle_last() {
        assert_eq!(Connector::sibling(0, 3), Connector::First);
        assert_eq!(Connector::sibling(1, 3), Connector::Middle);
        assert_eq!(Connector::sibling(2, 3), Connector::Last);
    }

    #[test]
    fn continuation_depends_on_last_sibling() {
        assert_eq!(Connector::continuation(false), Connector::VerticalCont);
        assert_eq!(Connector::continuation(true), Connector::BlankCont);
    }

    #[test]
    fn glyphs_are_four_columns_wide() {
        for code in [
            Connector::First,
            Connector::Middle,
            Connector::Last,
            Connector::VerticalCont,
            Connector::BlankCont,
        ] {
            assert_eq!(code.glyph(true).len(), 4);
            assert_eq!(code.glyph(false).chars().count(), 4);
        }
        assert!(Connector::None.glyph(true).is_empty());
        assert!(Connector::None.glyph(false).is_empty());
    }
}
