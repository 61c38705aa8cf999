#![forbid(unsafe_code)]

//! Styled text: spans of text sharing one style, grouped into lines.
//!
//! Styled lines are expected to be tab-free; tabs are expanded before
//! content is styled. Width-changing operations (cropping, padding,
//! justification) work in terminal cells and keep styles attached to the
//! characters that survive.

use panelkit_core::Justify;
use panelkit_text::width::{ELLIPSIS, char_width};
use smallvec::SmallVec;

use crate::color::Color;

bitflags::bitflags! {
    /// Text attributes, independent of color.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        const BOLD      = 0b0000_0001;
        const DIM       = 0b0000_0010;
        const ITALIC    = 0b0000_0100;
        const UNDERLINE = 0b0000_1000;
    }
}

/// Colors and attributes for a span of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub flags: StyleFlags,
}

impl Style {
    /// No color and no attributes.
    pub const PLAIN: Self = Self {
        fg: None,
        bg: None,
        flags: StyleFlags::empty(),
    };

    #[must_use]
    pub const fn fg(color: Color) -> Self {
        Self {
            fg: Some(color),
            bg: None,
            flags: StyleFlags::empty(),
        }
    }

    #[must_use]
    pub const fn with_flags(mut self, flags: StyleFlags) -> Self {
        self.flags = self.flags.union(flags);
        self
    }

    #[must_use]
    pub const fn with_bg(mut self, color: Option<Color>) -> Self {
        self.bg = color;
        self
    }

    /// The same attributes with both colors removed.
    #[must_use]
    pub const fn without_color(self) -> Self {
        Self {
            fg: None,
            bg: None,
            flags: self.flags,
        }
    }

    #[must_use]
    pub fn is_plain(&self) -> bool {
        *self == Self::PLAIN
    }
}

/// A run of text in one style.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

impl Span {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn width(&self) -> usize {
        self.text.chars().map(char_width).sum()
    }
}

/// One line of styled text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct StyledLine {
    spans: SmallVec<[Span; 4]>,
}

impl StyledLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// A single unstyled span.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::styled(text, Style::PLAIN)
    }

    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        let mut line = Self::new();
        line.push(text, style);
        line
    }

    /// Append text, merging it into the last span if the style matches.
    pub fn push(&mut self, text: impl Into<String>, style: Style) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        match self.spans.last_mut() {
            Some(last) if last.style == style => last.text.push_str(&text),
            _ => self.spans.push(Span::new(text, style)),
        }
    }

    /// Append all spans of another line.
    pub fn append(&mut self, other: StyledLine) {
        for span in other.spans {
            self.push(span.text, span.style);
        }
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Width in cells.
    pub fn width(&self) -> usize {
        self.spans.iter().map(Span::width).sum()
    }

    /// The text with all styling dropped.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Apply `f` to every span style.
    #[must_use]
    pub fn map_styles(&self, f: impl Fn(Style) -> Style) -> Self {
        let mut out = Self::new();
        for span in &self.spans {
            out.push(span.text.clone(), f(span.style));
        }
        out
    }

    /// Longest prefix that fits in `width` cells.
    #[must_use]
    pub fn truncated(&self, width: usize) -> Self {
        let mut out = Self::new();
        let mut used = 0;
        for span in &self.spans {
            let mut kept = String::new();
            for c in span.text.chars() {
                let w = char_width(c);
                if used + w > width {
                    out.push(kept, span.style);
                    return out;
                }
                used += w;
                kept.push(c);
            }
            out.push(kept, span.style);
        }
        out
    }

    /// Fit in `width` cells, ending with `…` when something was cut.
    #[must_use]
    pub fn ellipsized(&self, width: usize) -> Self {
        if self.width() <= width {
            return self.clone();
        }
        if width == 0 {
            return Self::new();
        }
        let mut out = self.truncated(width - 1);
        let style = out
            .spans
            .last()
            .or(self.spans.first())
            .map_or(Style::PLAIN, |s| s.style);
        out.push(ELLIPSIS.to_string(), style);
        out
    }

    /// Right-pad with spaces in `style` up to `width` cells.
    #[must_use]
    pub fn padded(mut self, width: usize, style: Style) -> Self {
        let missing = width.saturating_sub(self.width());
        if missing > 0 {
            self.push(" ".repeat(missing), style);
        }
        self
    }

    /// Place the line in a field of `width` cells.
    ///
    /// Lines wider than the field are returned unchanged. Centering puts
    /// the odd cell on the right.
    #[must_use]
    pub fn justified(self, width: usize, justify: Justify, style: Style) -> Self {
        let missing = width.saturating_sub(self.width());
        if missing == 0 {
            return self;
        }
        let left = match justify {
            Justify::Left => 0,
            Justify::Right => missing,
            Justify::Center => missing / 2,
        };
        let mut out = Self::new();
        if left > 0 {
            out.push(" ".repeat(left), style);
        }
        out.append(self);
        out.padded(width, style)
    }

    /// Crop to `width` cells keeping the last character.
    ///
    /// Used for grid lines, where the last character is a border glyph
    /// that must survive the crop. A `width` of 1 yields `…`.
    #[must_use]
    pub fn cropped_keeping_last(&self, width: usize) -> Self {
        if self.width() <= width {
            return self.clone();
        }
        if width == 0 {
            return Self::new();
        }
        if width == 1 {
            let style = self.spans.first().map_or(Style::PLAIN, |s| s.style);
            return Self::styled(ELLIPSIS.to_string(), style);
        }
        let Some((last_char, last_style)) = self
            .spans
            .iter()
            .rev()
            .find_map(|s| s.text.chars().next_back().map(|c| (c, s.style)))
        else {
            return Self::new();
        };
        let mut out = self.truncated(width - char_width(last_char).max(1));
        out.push(last_char.to_string(), last_style);
        out
    }
}

impl From<&str> for StyledLine {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}
