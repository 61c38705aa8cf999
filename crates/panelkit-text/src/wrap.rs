#![forbid(unsafe_code)]

//! Word wrapping.
//!
//! Wrapping never breaks a word or a grapheme cluster. A word wider than
//! the limit stays on its own line and is left for horizontal cropping.
//!
//! # Example
//! ```
//! use panelkit_text::wrap::wrap_words;
//!
//! let lines = wrap_words("Some text here", 6, 4);
//! assert_eq!(lines, vec!["Some", "text", "here"]);
//! ```

use smallvec::SmallVec;
use unicode_segmentation::UnicodeSegmentation;

use crate::width::{char_width, line_width, tab_width};

type Tokens<'a> = SmallVec<[&'a str; 16]>;

/// Re-flow one line into lines of at most `width` cells.
///
/// Whitespace runs that end up at a break are dropped. Leading
/// indentation is kept on the first line when the first word still fits
/// after it. A `width` of zero disables wrapping.
pub fn wrap_words(line: &str, width: usize, tab_size: usize) -> Vec<String> {
    if width == 0 || line_width(line, tab_size) <= width {
        return vec![line.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for token in split_words(line) {
        let end = advance(current_width, token, tab_size);
        if end <= width {
            current.push_str(token);
            current_width = end;
            continue;
        }

        if !current.trim_end().is_empty() {
            lines.push(finalize_line(&current));
        }
        current.clear();
        current_width = 0;

        if is_whitespace(token) {
            continue;
        }
        current.push_str(token);
        current_width = advance(0, token, tab_size);
    }

    if !current.trim_end().is_empty() || lines.is_empty() {
        lines.push(finalize_line(&current));
    }
    lines
}

/// Greedy wrap of pre-split words, joined by single spaces.
///
/// Used for titles. A word longer than `max_width` gets a line of its own.
pub fn soft_wrap_words<S: AsRef<str>>(words: &[S], max_width: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in words {
        let word = word.as_ref();
        let word_width = line_width(word, 1);
        if current.is_empty() {
            current.push_str(word);
            current_width = word_width;
        } else if current_width + 1 + word_width > max_width {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_width;
        } else {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Split into alternating runs of whitespace and non-whitespace graphemes.
fn split_words(text: &str) -> Tokens<'_> {
    let mut tokens = Tokens::new();
    let mut start = 0;
    let mut in_whitespace = None;

    for (idx, grapheme) in text.grapheme_indices(true) {
        let ws = is_whitespace(grapheme);
        if in_whitespace.is_some_and(|prev| prev != ws) {
            tokens.push(&text[start..idx]);
            start = idx;
        }
        in_whitespace = Some(ws);
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}

/// Column reached after writing `token` starting at `column`.
fn advance(column: usize, token: &str, tab_size: usize) -> usize {
    token.chars().fold(column, |col, c| {
        col + if c == '\t' {
            tab_width(col, tab_size)
        } else {
            char_width(c)
        }
    })
}

fn is_whitespace(s: &str) -> bool {
    s.chars().all(char::is_whitespace)
}

fn finalize_line(line: &str) -> String {
    line.trim_end().to_string()
}
