#![forbid(unsafe_code)]

//! Frame-fitting search over formatter limits.
//!
//! The first attempt uses the frame width and the caller's container
//! limit. If the result is too wide for the frame, or much wider in
//! proportion than a flexible frame, the search tightens the width and
//! the container limit by one cell at a time, re-formatting until the
//! result fits or neither limit makes progress.

use panelkit_core::{
    Constraints, DefinedDims, DimensionsFit, Frame, OutputConfig, Proportionality,
    UnsupportedContentError,
};
use panelkit_text::{line_width, measure_text};
use tracing::trace;

use crate::format::{FormatOptions, Formatter, formatter_for};
use crate::value::Value;

/// Result of [`pretty_repr`].
#[derive(Debug, Clone, PartialEq)]
pub struct PrettyOutput {
    pub lines: Vec<String>,
    pub dims: DefinedDims,
    /// Constraints the accepted candidate was formatted with.
    pub constraints: Constraints,
    pub max_container_width: usize,
}

/// Widest bracketed span on any line.
///
/// A span starts at an opening `{`, `[` or `(` and runs to the last
/// matching closing bracket on the same line. Scanning resumes after the
/// span, so nested brackets inside it are not counted separately.
pub fn max_container_width<S: AsRef<str>>(lines: &[S]) -> usize {
    lines
        .iter()
        .map(|line| max_container_width_in_line(line.as_ref()))
        .max()
        .unwrap_or(0)
}

fn max_container_width_in_line(line: &str) -> usize {
    let mut widest = 0;
    let mut pos = 0;
    while pos < line.len() {
        let rest = &line[pos..];
        let Some(offset) = rest.find(['{', '[', '(']) else {
            break;
        };
        let start = pos + offset;
        let close = match line.as_bytes()[start] {
            b'{' => '}',
            b'[' => ']',
            _ => ')',
        };
        match line[start..].rfind(close) {
            Some(end) => {
                let span = &line[start..start + end + 1];
                widest = widest.max(line_width(span, 1));
                pos = start + end + 1;
            }
            None => pos = start + 1,
        }
    }
    widest
}

#[derive(Debug, Clone)]
struct Candidate {
    lines: Vec<String>,
    dims: DefinedDims,
    fit: DimensionsFit,
    constraints: Constraints,
    max_container_width: usize,
}

impl Candidate {
    fn into_output(self) -> PrettyOutput {
        PrettyOutput {
            lines: self.lines,
            dims: self.dims,
            constraints: self.constraints,
            max_container_width: self.max_container_width,
        }
    }
}

struct Search<'a> {
    formatter: &'a dyn Formatter,
    value: &'a Value,
    frame: &'a Frame,
    config: &'a OutputConfig,
}

impl Search<'_> {
    fn candidate(
        &self,
        max_width: Option<usize>,
        constraints: Constraints,
    ) -> Result<Candidate, UnsupportedContentError> {
        let options = FormatOptions {
            max_width,
            container_width_per_line_limit: constraints.container_width_per_line_limit,
            indent_size: self.config.indent_size(),
        };
        let lines = self.formatter.format(self.value, &options)?;
        let dims = measure_text(&lines, self.config.tab_size());
        let fit = DimensionsFit::new(
            dims,
            self.frame.dims(),
            self.config.proportional_freedom(),
        );
        let max_container_width = max_container_width(&lines);
        Ok(Candidate {
            lines,
            dims,
            fit,
            constraints,
            max_container_width,
        })
    }

    fn follows_proportionality(&self, candidate: &Candidate) -> bool {
        !self.frame.fixed_width()
            && candidate.fit.proportionality == Some(Proportionality::MuchWider)
    }
}

/// Format `value` to fit `frame`.
///
/// Frames without a width get a single formatting pass. Otherwise the
/// narrowest candidate reached is returned when nothing fits.
pub fn pretty_repr(
    value: &Value,
    frame: &Frame,
    constraints: &Constraints,
    config: &OutputConfig,
) -> Result<PrettyOutput, UnsupportedContentError> {
    let formatter = formatter_for(config.syntax_language());
    let search = Search {
        formatter: formatter.as_ref(),
        value,
        frame,
        config,
    };

    let mut current = search.candidate(frame.width(), *constraints)?;
    let Some(frame_width) = frame.width() else {
        return Ok(current.into_output());
    };

    let follow = search.follows_proportionality(&current);
    if current.fit.width != Some(false) && !follow {
        return Ok(current.into_output());
    }

    let mut previous: Option<Candidate> = None;
    let mut prev_format_width = frame_width;
    let mut prev_dims_width: Option<usize> = None;
    let mut prev_limit: Option<usize> = None;
    let mut iteration = 0usize;

    loop {
        if current.fit.width == Some(true) {
            if !follow {
                break;
            }
            if current
                .fit
                .proportionality
                .is_some_and(|p| p >= Proportionality::Wider)
            {
                if current.fit.height == Some(false)
                    && let Some(prev) = previous.take_if(|p| p.fit.both() == Some(true))
                {
                    current = prev;
                }
                break;
            }
        }

        let next_width = current.dims.width.saturating_sub(1);
        let next_limit = current.max_container_width.saturating_sub(1);

        let width_reduced = next_width < prev_format_width
            && prev_dims_width.is_none_or(|w| current.dims.width < w);
        let limit_tightened = prev_limit.is_none_or(|l| current.max_container_width < l);
        prev_format_width = next_width;
        prev_dims_width = Some(current.dims.width);
        prev_limit = Some(next_limit);
        if !(width_reduced || limit_tightened) {
            break;
        }

        iteration += 1;
        trace!(
            iteration,
            width = next_width,
            container_limit = next_limit,
            "re-formatting with tighter limits"
        );
        let next = search.candidate(
            Some(next_width),
            constraints.with_container_width_per_line_limit(Some(next_limit)),
        )?;
        previous = Some(std::mem::replace(&mut current, next));
    }

    Ok(current.into_output())
}

#[cfg(test)]
mod tests {
    use super::*;
    use panelkit_core::{Dimensions, SyntaxLanguage};

    fn numbers(n: i64) -> Value {
        Value::List((0..n).map(Value::Int).collect())
    }

    // ====================================================================
    // max_container_width
    // ====================================================================

    #[test]
    fn container_width_spans() {
        assert_eq!(max_container_width(&["[1, 2, 3]"]), 9);
        assert_eq!(max_container_width(&["x = {'a': (1, 2)}"]), 13);
        assert_eq!(max_container_width(&["(a) [bb]", "{}"]), 4);
        assert_eq!(max_container_width(&["no brackets", "[ unclosed"]), 0);
        assert_eq!(max_container_width::<&str>(&[]), 0);
    }

    // ====================================================================
    // pretty_repr
    // ====================================================================

    #[test]
    fn no_frame_width_is_single_pass() {
        let out = pretty_repr(
            &numbers(3),
            &Frame::UNBOUNDED,
            &Constraints::NONE,
            &OutputConfig::default(),
        )
        .unwrap();
        assert_eq!(out.lines, vec!["[0, 1, 2]"]);
        assert_eq!(out.dims, DefinedDims::new(9, 1));
        assert_eq!(out.max_container_width, 9);
    }

    #[test]
    fn fitting_first_attempt_is_kept() {
        // 9x1 in 20x2 is only slightly thinner than the frame.
        let out = pretty_repr(
            &numbers(3),
            &Frame::sized(20, 2),
            &Constraints::NONE,
            &OutputConfig::default(),
        )
        .unwrap();
        assert_eq!(out.lines, vec!["[0, 1, 2]"]);
        assert_eq!(out.constraints, Constraints::NONE);
    }

    #[test]
    fn short_list_in_tall_frame_is_reshaped() {
        let out = pretty_repr(
            &numbers(3),
            &Frame::sized(20, 10),
            &Constraints::NONE,
            &OutputConfig::default(),
        )
        .unwrap();
        assert_eq!(out.lines, vec!["[", "  0,", "  1,", "  2", "]"]);
    }

    #[test]
    fn too_wide_content_is_broken_to_fit() {
        let value = Value::Dict(vec![
            (Value::from("first"), numbers(3)),
            (Value::from("second"), Value::from("text")),
        ]);
        let frame = Frame::new(Dimensions::width_only(20), true, false);
        let out = pretty_repr(&value, &frame, &Constraints::NONE, &OutputConfig::default())
            .unwrap();
        assert!(out.dims.width <= 20, "{:?}", out.lines);
        assert_eq!(out.lines[0], "{");
    }

    #[test]
    fn much_wider_content_is_reshaped() {
        // One line of 48 cells in a square frame is much wider in proportion.
        let frame = Frame::sized(60, 60);
        let out = pretty_repr(
            &numbers(16),
            &frame,
            &Constraints::NONE,
            &OutputConfig::default(),
        )
        .unwrap();
        assert!(out.dims.height > 1);
        let fit = DimensionsFit::new(out.dims, frame.dims(), 1.0);
        assert_ne!(fit.proportionality, Some(Proportionality::MuchWider));
    }

    #[test]
    fn fixed_width_ignores_proportions() {
        let frame = Frame::new(Dimensions::sized(60, 60), true, false);
        let out = pretty_repr(
            &numbers(16),
            &frame,
            &Constraints::NONE,
            &OutputConfig::default(),
        )
        .unwrap();
        assert_eq!(out.dims.height, 1);
    }

    #[test]
    fn json_errors_propagate() {
        let config = OutputConfig::default().with_syntax_language(SyntaxLanguage::Json);
        let err = pretty_repr(
            &Value::Float(f64::INFINITY),
            &Frame::UNBOUNDED,
            &Constraints::NONE,
            &config,
        );
        assert!(err.is_err());
    }

    #[test]
    fn unbreakable_content_terminates() {
        let value = Value::from("a string that cannot be broken at all");
        let out = pretty_repr(
            &value,
            &Frame::sized(5, 5),
            &Constraints::NONE,
            &OutputConfig::default(),
        )
        .unwrap();
        assert_eq!(out.lines.len(), 1);
    }
}
