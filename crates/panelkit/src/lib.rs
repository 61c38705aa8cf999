#![forbid(unsafe_code)]

//! Dimension-aware panel rendering.
//!
//! Content (text, structured values, or layouts of named sub-panels) is
//! rendered in three stages that fit it into an optional [`Frame`]:
//!
//! - [`panel`] - the stage types and the [`Panel`] enum over them
//! - [`layout`] - ordered collections of named sub-panels
//! - `reflow` - sharing an outer frame among sub-panels
//! - [`grid`] - bordered grid assembly for layouts
//! - [`output`] - terminal and HTML output variants
//!
//! # Example
//! ```
//! use panelkit::{DraftPanel, Frame, Layout};
//!
//! let layout = Layout::new()
//!     .with("a", DraftPanel::new("Some text here"))
//!     .with("b", DraftPanel::new("(1, 2, 3)"));
//! let panel = DraftPanel::new(layout)
//!     .with_frame(Frame::sized(19, 5))
//!     .render()
//!     .unwrap();
//! assert_eq!(
//!     panel.plain().terminal(),
//!     "╭──────┬────────╮\n\
//!      │ Some │ (1, 2, │\n\
//!      │ text │ 3)     │\n\
//!      │ here │        │\n\
//!      ╰──────┴────────╯\n"
//! );
//! ```

pub mod grid;
pub mod layout;
pub mod output;
pub mod panel;
mod reflow;

pub use grid::GridChars;
pub use layout::Layout;
pub use output::OutputVariant;
pub use panel::{Content, DraftPanel, Panel, ResizedPanel, StylizedPanel};

pub use panelkit_core::{
    ColorStyle, ColorSystem, Constraints, ConstraintsSatisfaction, DefinedDims, Dimensions,
    DimensionsFit, FontConfig, Frame, HorizontalOverflow, Justify, OutputConfig,
    Proportionality, RenderError, SyntaxLanguage, VerticalOverflow,
};
pub use panelkit_pretty::Value;
