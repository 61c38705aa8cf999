#![forbid(unsafe_code)]

//! Display width of characters and lines in terminal cells.
//!
//! Widths follow East Asian Width rules: zero for combining and other
//! zero-width marks (including NUL and the soft hyphen), two for wide
//! characters, one otherwise. Tabs advance to the next tab stop, counted
//! from the start of the line.

use std::borrow::Cow;

use panelkit_core::DefinedDims;
use unicode_width::UnicodeWidthChar;

use crate::width_cache::cached_line_width;

/// The single-cell ellipsis used for every kind of truncation.
pub const ELLIPSIS: char = '…';

/// Width of a single character in cells.
#[inline]
pub fn char_width(c: char) -> usize {
    match c {
        '\0' | '\u{00AD}' => 0,
        _ => c.width().unwrap_or(0).min(2),
    }
}

/// Width a tab occupies when it starts at column `column`.
#[inline]
pub fn tab_width(column: usize, tab_size: usize) -> usize {
    let tab_size = tab_size.max(1);
    tab_size - (column % tab_size)
}

/// Result of scanning a line left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineStats {
    /// Cells consumed by the scanned characters.
    pub width: usize,
    /// Number of characters scanned.
    pub char_count: usize,
    /// The scan stopped because the next character did not fit.
    pub overflow: bool,
}

/// Scan `line`, stopping before the first character that would push the
/// width past `width_limit`.
pub fn line_stats(line: &str, tab_size: usize, width_limit: Option<usize>) -> LineStats {
    if is_single_width(line) {
        return match width_limit {
            Some(limit) if line.len() > limit => LineStats {
                width: limit,
                char_count: limit,
                overflow: true,
            },
            _ => LineStats {
                width: line.len(),
                char_count: line.len(),
                overflow: false,
            },
        };
    }

    let mut stats = LineStats::default();
    for c in line.chars() {
        let w = if c == '\t' {
            tab_width(stats.width, tab_size)
        } else {
            char_width(c)
        };
        if let Some(limit) = width_limit
            && stats.width + w > limit
        {
            stats.overflow = true;
            return stats;
        }
        stats.width += w;
        stats.char_count += 1;
    }
    stats
}

/// Width of a whole line. Results are memoized per thread.
#[inline]
pub fn line_width(line: &str, tab_size: usize) -> usize {
    if is_single_width(line) {
        return line.len();
    }
    cached_line_width(line, tab_size)
}

/// Height is the number of lines, width the widest line.
pub fn measure_text<S: AsRef<str>>(lines: &[S], tab_size: usize) -> DefinedDims {
    let width = lines
        .iter()
        .map(|l| line_width(l.as_ref(), tab_size))
        .max()
        .unwrap_or(0);
    DefinedDims::new(width, lines.len())
}

/// Longest prefix of `line` that fits in `width` cells, and its width.
pub fn prefix_fitting(line: &str, width: usize, tab_size: usize) -> (&str, usize) {
    let stats = line_stats(line, tab_size, Some(width));
    (char_prefix(line, stats.char_count), stats.width)
}

/// The first `n` characters of `s`.
pub fn char_prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Replace tabs with the spaces they expand to.
pub fn expand_tabs(line: &str, tab_size: usize) -> Cow<'_, str> {
    if !line.contains('\t') {
        return Cow::Borrowed(line);
    }
    let mut out = String::with_capacity(line.len() + tab_size);
    let mut column = 0;
    for c in line.chars() {
        if c == '\t' {
            let w = tab_width(column, tab_size);
            out.extend(std::iter::repeat_n(' ', w));
            column += w;
        } else {
            out.push(c);
            column += char_width(c);
        }
    }
    Cow::Owned(out)
}

/// Printable ASCII only, so width equals byte length.
#[inline]
fn is_single_width(line: &str) -> bool {
    line.bytes().all(|b| (0x20..0x7f).contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_widths() {
        assert_eq!(char_width('a'), 1);
        assert_eq!(char_width('北'), 2);
        assert_eq!(char_width('\0'), 0);
        assert_eq!(char_width('\u{00AD}'), 0);
        assert_eq!(char_width('\u{0301}'), 0);
        assert_eq!(char_width(ELLIPSIS), 1);
    }

    #[test]
    fn tabs_advance_to_next_stop() {
        assert_eq!(line_width("\tc", 4), 5);
        assert_eq!(line_width("ab\tc", 4), 5);
        assert_eq!(line_width("abcd\t", 4), 8);
        assert_eq!(line_width("a\tb", 8), 9);
    }

    #[test]
    fn wide_characters() {
        assert_eq!(line_width("北京", 4), 4);
        assert_eq!(measure_text(&["北京"], 4), DefinedDims::new(4, 1));
    }

    #[test]
    fn measure_takes_widest_line() {
        let dims = measure_text(&["a", "abc", ""], 4);
        assert_eq!(dims, DefinedDims::new(3, 3));
        assert_eq!(measure_text::<&str>(&[], 4), DefinedDims::ZERO);
    }

    #[test]
    fn stats_stop_before_overflow() {
        let s = line_stats("北京x", 4, Some(3));
        assert_eq!(
            s,
            LineStats {
                width: 2,
                char_count: 1,
                overflow: true
            }
        );

        let s = line_stats("hello", 4, Some(3));
        assert_eq!(s.char_count, 3);
        assert!(s.overflow);

        let s = line_stats("hello", 4, Some(5));
        assert!(!s.overflow);
        assert_eq!(s.width, 5);
    }

    #[test]
    fn prefix_respects_cells() {
        assert_eq!(prefix_fitting("北京abc", 3, 4), ("北", 2));
        assert_eq!(prefix_fitting("abc", 10, 4), ("abc", 3));
        assert_eq!(char_prefix("héllo", 2), "hé");
    }

    #[test]
    fn tab_expansion() {
        assert_eq!(expand_tabs("a\tb", 4), "a   b");
        assert_eq!(expand_tabs("none", 4), "none");
        assert_eq!(line_width(&expand_tabs("x\ty\tz", 3), 3), line_width("x\ty\tz", 3));
    }
}
