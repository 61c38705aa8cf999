#![forbid(unsafe_code)]

//! Core value types for panelkit.
//!
//! - [`Dimensions`], [`DefinedDims`] - measured or budgeted sizes
//! - [`Frame`] - a size budget with per-axis fixed flags
//! - [`DimensionsFit`], [`Proportionality`] - how content fits a frame
//! - [`Constraints`] - formatting limits
//! - [`OutputConfig`] - rendering options
//! - [`error`] - the error taxonomy

pub mod config;
pub mod constraints;
pub mod error;
pub mod geometry;

pub use config::{
    ColorStyle, ColorSystem, FontConfig, HorizontalOverflow, Justify, OutputConfig,
    SyntaxLanguage, VerticalOverflow,
};
pub use constraints::{Constraints, ConstraintsSatisfaction};
pub use error::{
    InvalidDimensionsError, InvalidStageTransitionError, RenderError, UnsupportedContentError,
};
pub use geometry::{DefinedDims, Dimensions, DimensionsFit, Frame, Proportionality};
