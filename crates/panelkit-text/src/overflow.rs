#![forbid(unsafe_code)]

//! Vertical and horizontal overflow policies.
//!
//! Two kinds of cropping exist. Resize-time cropping runs while a panel
//! resolves its size, and only when the frame width is flexible, so that
//! freed width becomes visible to sibling panels. Stylize-time cropping
//! and padding make the final output match the frame exactly.

use panelkit_core::{Frame, HorizontalOverflow, OutputConfig, VerticalOverflow};

use crate::width::{ELLIPSIS, char_prefix, line_stats, line_width, prefix_fitting};

/// Crop `lines` to at most `height` lines.
///
/// The ellipsis modes replace the new boundary line with a single `…`.
pub fn crop_vertically(
    mut lines: Vec<String>,
    height: Option<usize>,
    mode: VerticalOverflow,
) -> Vec<String> {
    let Some(height) = height else {
        return lines;
    };
    if lines.len() <= height {
        return lines;
    }
    if height == 0 {
        return Vec::new();
    }

    let excess = lines.len() - height;
    match mode {
        VerticalOverflow::CropBottom => {
            lines.truncate(height);
        }
        VerticalOverflow::CropTop => {
            lines.drain(..excess);
        }
        VerticalOverflow::EllipsisBottom => {
            lines.truncate(height);
            lines[height - 1] = ELLIPSIS.to_string();
        }
        VerticalOverflow::EllipsisTop => {
            lines.drain(..excess);
            lines[0] = ELLIPSIS.to_string();
        }
    }
    lines
}

/// Resize-time vertical crop.
///
/// Skipped when the frame width is zero or fixed: a fixed width keeps the
/// dimensions of the uncropped content until stylizing.
pub fn crop_vertically_for_resizing(
    lines: Vec<String>,
    frame: &Frame,
    mode: VerticalOverflow,
) -> Vec<String> {
    if frame.width() == Some(0) || frame.fixed_width() {
        return lines;
    }
    crop_vertically(lines, frame.height(), mode)
}

/// Crop one line to `width` cells.
///
/// `Ellipsis` reserves the last cell for `…`. `WordWrap` leaves the line
/// alone: wrapping already happened upstream.
pub fn crop_line_horizontally(
    line: &str,
    width: Option<usize>,
    mode: HorizontalOverflow,
    tab_size: usize,
) -> String {
    let Some(width) = width else {
        return line.to_string();
    };
    if line_width(line, tab_size) <= width {
        return line.to_string();
    }

    match mode {
        HorizontalOverflow::WordWrap => line.to_string(),
        HorizontalOverflow::Crop => prefix_fitting(line, width, tab_size).0.to_string(),
        HorizontalOverflow::Ellipsis => match width {
            0 => String::new(),
            1 => ELLIPSIS.to_string(),
            _ => {
                let mut out = prefix_fitting(line, width - 1, tab_size).0.to_string();
                out.push(ELLIPSIS);
                out
            }
        },
    }
}

/// Resize-time horizontal crop of every line.
///
/// Applies when the frame width is defined, flexible and non-zero. Lines
/// are cut before the first character that would overflow, so a wide
/// character is never split. In `Ellipsis` mode a cut line ends with `…`;
/// if the kept prefix fills the frame exactly, it is shortened to make
/// room. Trailing tabs are stripped.
pub fn crop_lines_for_resizing(
    lines: Vec<String>,
    frame: &Frame,
    config: &OutputConfig,
) -> Vec<String> {
    let width = match frame.width() {
        Some(w) if w > 0 && !frame.fixed_width() => w,
        _ => return lines,
    };
    let ellipsis = config.horizontal_overflow() == HorizontalOverflow::Ellipsis;
    let tab_size = config.tab_size();

    lines
        .into_iter()
        .map(|line| {
            let stats = line_stats(&line, tab_size, Some(width));
            if !stats.overflow {
                return line.trim_end_matches('\t').to_string();
            }
            let mut cropped = if ellipsis && stats.width == width {
                prefix_fitting(&line, width - 1, tab_size).0.to_string()
            } else {
                char_prefix(&line, stats.char_count).to_string()
            };
            if ellipsis {
                cropped.push(ELLIPSIS);
            }
            let trimmed_len = cropped.trim_end_matches('\t').len();
            cropped.truncate(trimmed_len);
            cropped
        })
        .collect()
}

/// Right-pad `line` with spaces to `width` cells.
pub fn pad_line(line: &str, width: usize, tab_size: usize) -> String {
    let current = line_width(line, tab_size);
    let mut out = String::with_capacity(line.len() + width.saturating_sub(current));
    out.push_str(line);
    out.extend(std::iter::repeat_n(' ', width.saturating_sub(current)));
    out
}
