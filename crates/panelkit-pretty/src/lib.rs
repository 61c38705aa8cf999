#![forbid(unsafe_code)]

//! Pretty-printing of structured values into a frame.
//!
//! - [`Value`] - the structured value model
//! - [`Formatter`] - Python-literal and JSON syntaxes
//! - [`pretty_repr`] - searches formatter limits for output that fits a frame
//!
//! # Example
//! ```
//! use panelkit_core::{Constraints, Frame, OutputConfig};
//! use panelkit_pretty::{Value, pretty_repr};
//!
//! let value = Value::from(vec![1, 2, 3]);
//! let out = pretty_repr(&value, &Frame::UNBOUNDED, &Constraints::NONE, &OutputConfig::default())
//!     .unwrap();
//! assert_eq!(out.lines, vec!["[1, 2, 3]"]);
//! ```

pub mod format;
pub mod search;
pub mod value;

pub use format::{FormatOptions, Formatter, JsonFormatter, PythonFormatter, formatter_for};
pub use search::{PrettyOutput, max_container_width, pretty_repr};
pub use value::{ContainerKind, Entry, Value};
