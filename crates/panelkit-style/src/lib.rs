#![forbid(unsafe_code)]

//! Styling for panelkit output.
//!
//! - [`syntax`] - line tokenizers for Python literals and JSON
//! - [`color`] - colors and downgrading to a terminal color system
//! - [`theme`] - named color styles and token highlighting
//! - [`styled`] - styled spans and lines, width-aware cropping
//! - [`export`] - ANSI and HTML emission for the three output modes
//!
//! # Example
//! ```
//! use panelkit_core::{ColorStyle, ColorSystem};
//! use panelkit_style::{OutputMode, Theme, highlight, python_tokenizer, to_terminal};
//!
//! let theme = Theme::for_style(ColorStyle::AnsiDark);
//! let line = highlight("[1, None]", &python_tokenizer(), theme);
//! let plain = to_terminal(&[line], OutputMode::Plain, ColorSystem::Ansi256);
//! assert_eq!(plain, "[1, None]\n");
//! ```

pub mod color;
pub mod export;
pub mod styled;
pub mod syntax;
pub mod theme;

pub use color::{Ansi16, Color, Rgb};
pub use export::{
    DEFAULT_HTML_BACKGROUND, DEFAULT_HTML_FOREGROUND, OutputMode, css_color_style,
    css_font_style, html_escape_into, html_page, html_tag, to_html_code, to_terminal,
};
pub use styled::{Span, Style, StyleFlags, StyledLine};
pub use syntax::{
    LiteralTokenizer, PlainTokenizer, Token, TokenKind, Tokenizer, json_tokenizer,
    python_tokenizer, tokenizer_for,
};
pub use theme::{BackgroundDetection, Theme, highlight};
