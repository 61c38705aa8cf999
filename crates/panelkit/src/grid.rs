#![forbid(unsafe_code)]

//! Bordered grid assembly for layouts.
//!
//! Sub-panels become the cells of a single row, each with one space of
//! padding on either side, inside a rounded box:
//!
//! ```text
//! ╭──────┬────────╮
//! │ Some │ (1, 2, │
//! │ text │ 3)     │
//! ╰──────┴────────╯
//! ```

use panelkit_core::{DefinedDims, Justify};
use panelkit_style::{Style, StyledLine, Theme};
use smallvec::SmallVec;

use crate::layout::Layout;
use crate::panel::{Panel, ResizedPanel, StylizedPanel, TITLE_BLANK_LINES};

/// Characters used to draw the grid border.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridChars {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
    /// Where a column separator meets the top edge.
    pub top_tee: char,
    /// Where a column separator meets the bottom edge.
    pub bottom_tee: char,
}

impl GridChars {
    /// Rounded corners.
    pub const ROUNDED: Self = Self {
        top_left: '╭',
        top_right: '╮',
        bottom_left: '╰',
        bottom_right: '╯',
        horizontal: '─',
        vertical: '│',
        top_tee: '┬',
        bottom_tee: '┴',
    };
}

/// Cells per column besides its content: a separator and two spaces.
const CELL_OVERHEAD: usize = 3;

/// Grid width for the given total cell width and cell count.
#[inline]
pub(crate) fn grid_width(total_cell_width: usize, cells: usize) -> usize {
    total_cell_width + CELL_OVERHEAD * cells + 1
}

/// Size of the grid around the resolved sub-panels of `layout`.
///
/// An empty layout is a single blank line.
pub(crate) fn grid_dims(layout: &Layout) -> DefinedDims {
    if layout.is_empty() {
        return DefinedDims::new(0, 1);
    }
    let total = layout.total_subpanel_outer_dims();
    DefinedDims::new(grid_width(total.width, layout.len()), total.height + 2)
}

type Widths = SmallVec<[usize; 8]>;

/// Shrink the widest cell one column at a time until the grid fits.
///
/// Ties go to the rightmost cell. Cells stop at zero width.
fn fit_cell_widths(mut widths: Widths, max_width: Option<usize>) -> Widths {
    let Some(max_width) = max_width else {
        return widths;
    };
    while grid_width(widths.iter().sum(), widths.len()) > max_width {
        let Some((idx, _)) = widths
            .iter()
            .enumerate()
            .filter(|(_, w)| **w > 0)
            .max_by_key(|(i, w)| (**w, *i))
        else {
            break;
        };
        widths[idx] -= 1;
    }
    widths
}

/// Lines of one cell, `width` wide and `height` tall.
fn cell_lines(
    sub: &StylizedPanel,
    width: usize,
    height: usize,
    outer: &ResizedPanel,
    theme: &Theme,
) -> Vec<StyledLine> {
    let panel = sub.resized();
    let config = outer.config();
    let justify = config.cell_justify();

    let title: Vec<StyledLine> = panel
        .shown_title()
        .iter()
        .map(|line| {
            StyledLine::styled(line.as_str(), theme.title)
                .ellipsized(width)
                .justified(width, Justify::Center, Style::PLAIN)
        })
        .collect();
    let title_height = panel.title_height_with_blank();

    let content_height = if panel.title_overlaps_panel() {
        height.saturating_sub(title_height)
    } else {
        panel.cropped_dims().height
    };
    let mut content: Vec<StyledLine> = sub
        .lines()
        .iter()
        .take(content_height)
        .map(|line| line.truncated(width).justified(width, justify, Style::PLAIN))
        .collect();
    content.resize_with(content_height, StyledLine::new);

    let mut lines = Vec::with_capacity(height);
    if title.is_empty() {
        lines.extend(content);
    } else if config.title_at_top() {
        lines.extend(title);
        lines.extend(std::iter::repeat_n(StyledLine::new(), TITLE_BLANK_LINES));
        lines.extend(content);
    } else {
        let free = height.saturating_sub(panel.cropped_dims().height);
        let extra = free.saturating_sub(title_height);
        lines.extend(content);
        lines.extend(std::iter::repeat_n(StyledLine::new(), TITLE_BLANK_LINES + extra));
        lines.extend(title);
    }

    lines.truncate(height);
    lines.resize_with(height, StyledLine::new);
    lines
        .into_iter()
        .map(|line| line.padded(width, Style::PLAIN))
        .collect()
}

/// Draw the grid of a resized layout panel.
///
/// The result may still be wider or taller than the panel frame; the
/// caller crops it.
pub(crate) fn render_grid(layout: &Layout, outer: &ResizedPanel) -> Vec<StyledLine> {
    if layout.is_empty() {
        return vec![StyledLine::new()];
    }

    let subs: Vec<StylizedPanel> = layout
        .panels()
        .filter_map(|panel| match panel {
            Panel::Stylized(stylized) => Some(stylized.clone()),
            other => other.resized().map(ResizedPanel::render_next_stage),
        })
        .collect();

    let frame = outer.frame();
    let theme = Theme::for_style(outer.config().color_style());
    let chars = GridChars::ROUNDED;

    let mut height = layout.total_subpanel_outer_dims().height;
    if let Some(h) = frame.height() {
        height = height.min(h.saturating_sub(2));
    }
    let widths = fit_cell_widths(
        subs.iter()
            .map(|sub| sub.resized().outer_dims().width)
            .collect(),
        frame.width(),
    );

    let cells: Vec<Vec<StyledLine>> = subs
        .iter()
        .zip(&widths)
        .map(|(sub, &width)| cell_lines(sub, width, height, outer, theme))
        .collect();

    let mut lines = Vec::with_capacity(height + 2);
    lines.push(edge(&widths, chars.top_left, chars.top_tee, chars.top_right, &chars, theme));
    for row in 0..height {
        let mut line = StyledLine::new();
        for cell in &cells {
            line.push(chars.vertical.to_string(), theme.border);
            line.push(" ", Style::PLAIN);
            if let Some(content) = cell.get(row) {
                line.append(content.clone());
            }
            line.push(" ", Style::PLAIN);
        }
        line.push(chars.vertical.to_string(), theme.border);
        lines.push(line);
    }
    lines.push(edge(
        &widths,
        chars.bottom_left,
        chars.bottom_tee,
        chars.bottom_right,
        &chars,
        theme,
    ));
    lines
}

fn edge(
    widths: &[usize],
    left: char,
    tee: char,
    right: char,
    chars: &GridChars,
    theme: &Theme,
) -> StyledLine {
    let mut text = String::new();
    text.push(left);
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            text.push(tee);
        }
        text.extend(std::iter::repeat_n(chars.horizontal, width + 2));
    }
    text.push(right);
    StyledLine::styled(text, theme.border)
}
