#![forbid(unsafe_code)]

//! Text measurement and overflow handling for panelkit.
//!
//! - [`width`] - cell widths of characters and lines, tab stops
//! - [`WidthCache`] - LRU cache for line widths
//! - [`overflow`] - vertical and horizontal crop policies, padding
//! - [`wrap`] - word wrapping for content and titles
//!
//! # Example
//! ```
//! use panelkit_text::{measure_text, wrap::wrap_words};
//!
//! let lines = wrap_words("Some content", 7, 4);
//! let dims = measure_text(&lines, 4);
//! assert_eq!((dims.width, dims.height), (7, 2));
//! ```

pub mod overflow;
pub mod width;
pub mod width_cache;
pub mod wrap;

pub use overflow::{
    crop_line_horizontally, crop_lines_for_resizing, crop_vertically,
    crop_vertically_for_resizing, pad_line,
};
pub use width::{ELLIPSIS, LineStats, char_width, line_stats, line_width, measure_text};
pub use width_cache::{CacheStats, WidthCache};
pub use wrap::{soft_wrap_words, wrap_words};

/// Split text into owned lines.
///
/// An empty string yields no lines and a trailing newline adds no empty
/// final line.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}
