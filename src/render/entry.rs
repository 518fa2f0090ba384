//! Formatting of one rendered line.

use std::io::{self, Write};

use crate::index::Entry;
use crate::units;

use super::RenderOptions;
use super::connector::Connector;
use super::width::{Measure, display_width};

pub(crate) const COLOR_RESET: &str = "\x1b[0m";
pub(crate) const COLOR_RED: &str = "\x1b[31m";
pub(crate) const COLOR_YELLOW: &str = "\x1b[33m";

/// Fixed columns consumed outside the bar itself: the space after the size
/// field plus the bar's bracket and padding overhead.
const GRAPH_MARGIN: usize = 5;

/// Color band for a size against the current directory's maximum. Warning at
/// an eighth of the maximum, critical at half.
pub(crate) fn band_color(size: u64, max_size: u64) -> &'static str {
    if size >= max_size / 2 {
        COLOR_RED
    } else if size >= max_size / 8 {
        COLOR_YELLOW
    } else {
        ""
    }
}

/// Write one entry line.
///
/// Field order: right-aligned size, connector trail (tree mode), accumulated
/// path (full-path and lookup modes), name, classification suffix, bar
/// graph. `prefix_path` is empty whenever no path is to be printed.
pub(crate) fn write_line<W: Write>(
    out: &mut W,
    opts: &RenderOptions,
    trail: &[Connector],
    prefix_path: &str,
    entry: &Entry,
    level: usize,
    measure: &Measure,
) -> io::Result<()> {
    let size = entry.size.get(opts.metric);

    let mut color_on = "";
    let mut color_off = "";
    if opts.color {
        color_on = band_color(size, measure.max_size);
        color_off = COLOR_RESET;
    }

    let formatted = units::human_size(&entry.size, opts.metric, opts.bytes);
    write!(
        out,
        "{color_on}{formatted:>width$}{color_off}",
        width = opts.size_field_width()
    )?;

    if opts.recursive && !opts.full_path {
        for code in trail {
            if *code == Connector::None {
                break;
            }
            out.write_all(code.glyph(opts.ascii).as_bytes())?;
        }
    }

    out.write_all(b" ")?;

    if !prefix_path.is_empty() {
        out.write_all(prefix_path.as_bytes())?;
    }

    out.write_all(entry.name.as_bytes())?;
    let mut used = display_width(&entry.name) + 1;

    if opts.classify {
        write!(out, "{}", units::type_char(entry.kind))?;
        used += 1;
    }

    if opts.graph {
        while used <= measure.max_name_width {
            out.write_all(b" ")?;
            used += 1;
        }
        let bar = bar_width(opts, measure, level);
        let fill = bar_fill(bar, size, measure.max_size);
        write!(out, " [{color_on}")?;
        for _ in 0..fill {
            out.write_all(b"+")?;
        }
        for _ in fill..bar {
            out.write_all(b" ")?;
        }
        write!(out, "{color_off}]")?;
    }

    out.write_all(b"\n")
}

/// Columns available for the bar at this depth.
fn bar_width(opts: &RenderOptions, measure: &Measure, level: usize) -> usize {
    let indent = (level + 1) * 4;
    (opts.width as usize)
        .saturating_sub(measure.max_name_width)
        .saturating_sub(opts.size_field_width())
        .saturating_sub(GRAPH_MARGIN)
        .saturating_sub(indent)
}

/// Filled cells for a size, proportional to the directory maximum. A zero
/// maximum yields an all-blank bar rather than a division fault.
fn bar_fill(bar: usize, size: u64, max_size: u64) -> usize {
    if max_size == 0 {
        return 0;
    }
    ((bar as u128 * size as u128) / max_size as u128) as usize
}
