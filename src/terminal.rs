//! Detection of the terminal environment the listing is written to.

use std::io::{IsTerminal, stdout};

/// Column width assumed when detection fails or output is redirected.
pub const FALLBACK_WIDTH: u16 = 80;

/// What the renderer needs to know about standard output.
#[derive(Debug, Clone, Copy)]
pub struct TerminalEnv {
    /// Available columns for a rendered line.
    pub columns: u16,
    /// Whether stdout is an interactive terminal. Color and width-dependent
    /// bar sizing are disabled when it is not.
    pub interactive: bool,
}

impl TerminalEnv {
    /// Probe stdout for interactivity and width.
    pub fn detect() -> Self {
        let interactive = stdout().is_terminal();
        let columns = if interactive {
            crossterm::terminal::size()
                .map(|(columns, _rows)| columns)
                .unwrap_or(FALLBACK_WIDTH)
        } else {
            FALLBACK_WIDTH
        };
        TerminalEnv {
            columns,
            interactive,
        }
    }
}

impl Default for TerminalEnv {
    fn default() -> Self {
        TerminalEnv {
            columns: FALLBACK_WIDTH,
            interactive: false,
        }
    }
}
