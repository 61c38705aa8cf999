#![forbid(unsafe_code)]

//! Error types shared across the panel pipeline.
//!
//! Every error is fatal for the call that raised it. The pipeline is pure,
//! so the same inputs always fail the same way and nothing is retried.

use thiserror::Error;

/// A dimension was constructed from a negative value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{axis} must be non-negative, got {value}")]
pub struct InvalidDimensionsError {
    /// `"width"` or `"height"`.
    pub axis: &'static str,
    /// The rejected value.
    pub value: i64,
}

/// `render_next_stage` was called on a panel that has no next stage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("a {stage} panel is fully rendered and has no next stage")]
pub struct InvalidStageTransitionError {
    pub stage: &'static str,
}

/// The configured syntax cannot express some part of the content.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("content cannot be rendered as {syntax}: {reason}")]
pub struct UnsupportedContentError {
    pub syntax: &'static str,
    pub reason: String,
}

impl UnsupportedContentError {
    pub fn new(syntax: &'static str, reason: impl Into<String>) -> Self {
        Self {
            syntax,
            reason: reason.into(),
        }
    }
}

/// Umbrella error returned by stage transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error(transparent)]
    InvalidDimensions(#[from] InvalidDimensionsError),
    #[error(transparent)]
    InvalidStageTransition(#[from] InvalidStageTransitionError),
    #[error(transparent)]
    UnsupportedContent(#[from] UnsupportedContentError),
}
