#![forbid(unsafe_code)]

//! Size primitives: dimensions, frames, and fit analysis.

use std::cmp::Ordering;

use crate::error::InvalidDimensionsError;

/// Width and height in terminal cells, each of which may be undefined.
///
/// An undefined axis means "unmeasured" for content and "unconstrained"
/// for frames. Values are non-negative by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Dimensions {
    pub width: Option<usize>,
    pub height: Option<usize>,
}

impl Dimensions {
    /// Both axes undefined.
    pub const UNDEFINED: Self = Self::new(None, None);

    #[inline]
    pub const fn new(width: Option<usize>, height: Option<usize>) -> Self {
        Self { width, height }
    }

    /// Both axes defined.
    #[inline]
    pub const fn sized(width: usize, height: usize) -> Self {
        Self::new(Some(width), Some(height))
    }

    #[inline]
    pub const fn width_only(width: usize) -> Self {
        Self::new(Some(width), None)
    }

    #[inline]
    pub const fn height_only(height: usize) -> Self {
        Self::new(None, Some(height))
    }

    /// Build dimensions from signed input, rejecting negative values.
    pub fn try_new(width: Option<i64>, height: Option<i64>) -> Result<Self, InvalidDimensionsError> {
        fn axis(name: &'static str, v: Option<i64>) -> Result<Option<usize>, InvalidDimensionsError> {
            match v {
                None => Ok(None),
                Some(v) => usize::try_from(v)
                    .map(Some)
                    .map_err(|_| InvalidDimensionsError { axis: name, value: v }),
            }
        }
        Ok(Self::new(axis("width", width)?, axis("height", height)?))
    }

    #[inline]
    pub const fn has_width(&self) -> bool {
        self.width.is_some()
    }

    #[inline]
    pub const fn has_height(&self) -> bool {
        self.height.is_some()
    }

    #[inline]
    pub const fn has_width_and_height(&self) -> bool {
        self.has_width() && self.has_height()
    }

    /// Narrow to [`DefinedDims`] if both axes are present.
    #[inline]
    pub const fn defined(&self) -> Option<DefinedDims> {
        match (self.width, self.height) {
            (Some(width), Some(height)) => Some(DefinedDims { width, height }),
            _ => None,
        }
    }
}

/// Dimensions with both axes guaranteed, as produced by measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DefinedDims {
    pub width: usize,
    pub height: usize,
}

impl DefinedDims {
    pub const ZERO: Self = Self::new(0, 0);

    #[inline]
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

impl From<DefinedDims> for Dimensions {
    fn from(d: DefinedDims) -> Self {
        Self::sized(d.width, d.height)
    }
}

/// A size budget for a panel.
///
/// A fixed axis must not be shrunk to reclaim whitespace, even when the
/// content is smaller. An undefined axis is never fixed: the constructor
/// clears the flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Frame {
    dims: Dimensions,
    fixed_width: bool,
    fixed_height: bool,
}

impl Frame {
    /// Unconstrained on both axes.
    pub const UNBOUNDED: Self = Self::new(Dimensions::UNDEFINED, false, false);

    #[inline]
    pub const fn new(dims: Dimensions, fixed_width: bool, fixed_height: bool) -> Self {
        Self {
            dims,
            fixed_width: fixed_width && dims.width.is_some(),
            fixed_height: fixed_height && dims.height.is_some(),
        }
    }

    /// Flexible frame over the given dimensions.
    #[inline]
    pub const fn flexible(dims: Dimensions) -> Self {
        Self::new(dims, false, false)
    }

    /// Fixed on every defined axis.
    #[inline]
    pub const fn fixed(dims: Dimensions) -> Self {
        Self::new(dims, true, true)
    }

    /// Flexible frame of `width` x `height`.
    #[inline]
    pub const fn sized(width: usize, height: usize) -> Self {
        Self::flexible(Dimensions::sized(width, height))
    }

    #[inline]
    pub const fn dims(&self) -> Dimensions {
        self.dims
    }

    #[inline]
    pub const fn width(&self) -> Option<usize> {
        self.dims.width
    }

    #[inline]
    pub const fn height(&self) -> Option<usize> {
        self.dims.height
    }

    #[inline]
    pub const fn fixed_width(&self) -> bool {
        self.fixed_width
    }

    #[inline]
    pub const fn fixed_height(&self) -> bool {
        self.fixed_height
    }

    /// Width a panel of content width `width` occupies inside this frame.
    ///
    /// A fixed frame width always wins; otherwise the smaller of the two.
    pub fn crop_width(&self, width: usize) -> usize {
        crop_axis(self.dims.width, self.fixed_width, width)
    }

    /// Like [`crop_width`](Self::crop_width), treating the frame as flexible.
    pub fn crop_width_ignore_fixed(&self, width: usize) -> usize {
        crop_axis(self.dims.width, false, width)
    }

    pub fn crop_height(&self, height: usize) -> usize {
        crop_axis(self.dims.height, self.fixed_height, height)
    }

    pub fn crop_height_ignore_fixed(&self, height: usize) -> usize {
        crop_axis(self.dims.height, false, height)
    }

    pub fn crop_dims(&self, dims: DefinedDims) -> DefinedDims {
        DefinedDims::new(self.crop_width(dims.width), self.crop_height(dims.height))
    }

    pub fn crop_dims_ignore_fixed(&self, dims: DefinedDims) -> DefinedDims {
        DefinedDims::new(
            self.crop_width_ignore_fixed(dims.width),
            self.crop_height_ignore_fixed(dims.height),
        )
    }

    /// Copy with a new width, keeping the fixed flag where still meaningful.
    #[must_use]
    pub const fn with_width(self, width: Option<usize>) -> Self {
        Self::new(
            Dimensions::new(width, self.dims.height),
            self.fixed_width,
            self.fixed_height,
        )
    }

    #[must_use]
    pub const fn with_height(self, height: Option<usize>) -> Self {
        Self::new(
            Dimensions::new(self.dims.width, height),
            self.fixed_width,
            self.fixed_height,
        )
    }

    #[must_use]
    pub const fn with_fixed_width(self, fixed: bool) -> Self {
        Self::new(self.dims, fixed, self.fixed_height)
    }

    #[must_use]
    pub const fn with_fixed_height(self, fixed: bool) -> Self {
        Self::new(self.dims, self.fixed_width, fixed)
    }
}

#[inline]
fn crop_axis(frame: Option<usize>, fixed: bool, value: usize) -> usize {
    match frame {
        Some(f) if fixed => f,
        Some(f) => value.min(f),
        None => value,
    }
}

/// How content's aspect ratio compares to its frame's.
///
/// Ordered from wide to thin, so `p < Proportionality::Wider` means
/// "much wider than the frame".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Proportionality {
    MuchWider,
    Wider,
    Same,
    Thinner,
    MuchThinner,
}

impl Proportionality {
    /// Classify content of `content` dims against a frame of `frame` dims.
    ///
    /// `freedom` widens the band around an exact match that still counts as
    /// merely wider or thinner. Both frame axes must be non-zero.
    pub fn classify(content: DefinedDims, frame: DefinedDims, freedom: f64) -> Self {
        debug_assert!(frame.width > 0 && frame.height > 0);
        match (content.width, content.height) {
            (0, 0) => return Self::Same,
            (_, 0) => return Self::MuchWider,
            (0, _) => return Self::MuchThinner,
            _ => {}
        }

        let proportional_width = content.height as f64 * frame.width as f64 / frame.height as f64;
        let ratio = content.width as f64 / proportional_width;
        let band = 1.0 + freedom.max(0.0);

        match ratio.partial_cmp(&1.0) {
            Some(Ordering::Greater) if ratio > band => Self::MuchWider,
            Some(Ordering::Greater) => Self::Wider,
            Some(Ordering::Less) if ratio * band < 1.0 => Self::MuchThinner,
            Some(Ordering::Less) => Self::Thinner,
            _ => Self::Same,
        }
    }
}

/// How well content dimensions fit inside frame dimensions.
///
/// Each field is `None` when the corresponding frame axis is undefined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionsFit {
    pub width: Option<bool>,
    pub height: Option<bool>,
    pub proportionality: Option<Proportionality>,
}

impl DimensionsFit {
    pub fn new(dims: DefinedDims, frame_dims: Dimensions, proportional_freedom: f64) -> Self {
        let width = frame_dims.width.map(|w| dims.width <= w);
        let height = frame_dims.height.map(|h| dims.height <= h);
        let proportionality = match (frame_dims.width, frame_dims.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Some(Proportionality::classify(
                dims,
                DefinedDims::new(w, h),
                proportional_freedom,
            )),
            _ => None,
        };
        Self {
            width,
            height,
            proportionality,
        }
    }

    /// `Some(width && height)` when both axes were checked.
    pub fn both(&self) -> Option<bool> {
        match (self.width, self.height) {
            (Some(width), Some(height)) => Some(width && height),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ====================================================================
    // Dimensions
    // ====================================================================

    #[test]
    fn try_new_rejects_negative_axes() {
        assert_eq!(
            Dimensions::try_new(Some(3), None),
            Ok(Dimensions::width_only(3))
        );
        let err = Dimensions::try_new(Some(1), Some(-1)).unwrap_err();
        assert_eq!(err.axis, "height");
        assert_eq!(err.value, -1);
        assert_eq!(Dimensions::try_new(Some(-5), None).unwrap_err().axis, "width");
    }

    #[test]
    fn refinement_checks() {
        assert!(!Dimensions::UNDEFINED.has_width());
        assert!(Dimensions::width_only(2).has_width());
        assert!(!Dimensions::width_only(2).has_width_and_height());
        assert!(Dimensions::height_only(2).has_height());
        assert_eq!(Dimensions::sized(4, 1).defined(), Some(DefinedDims::new(4, 1)));
        assert_eq!(Dimensions::width_only(4).defined(), None);
    }

    // ====================================================================
    // Frame
    // ====================================================================

    #[test]
    fn undefined_axis_is_never_fixed() {
        let frame = Frame::fixed(Dimensions::width_only(10));
        assert!(frame.fixed_width());
        assert!(!frame.fixed_height());

        let frame = frame.with_width(None);
        assert!(!frame.fixed_width());
    }

    #[test]
    fn crop_respects_fixed_axes() {
        let flexible = Frame::sized(10, 3);
        assert_eq!(flexible.crop_width(4), 4);
        assert_eq!(flexible.crop_width(12), 10);
        assert_eq!(flexible.crop_height(5), 3);

        let fixed = Frame::fixed(Dimensions::sized(10, 3));
        assert_eq!(fixed.crop_width(4), 10);
        assert_eq!(fixed.crop_width_ignore_fixed(4), 4);
        assert_eq!(fixed.crop_dims(DefinedDims::new(2, 1)), DefinedDims::new(10, 3));
        assert_eq!(
            fixed.crop_dims_ignore_fixed(DefinedDims::new(2, 9)),
            DefinedDims::new(2, 3)
        );

        assert_eq!(Frame::UNBOUNDED.crop_width(77), 77);
    }

    #[test]
    fn frames_compare_by_value() {
        let a = Frame::sized(3, 4).with_fixed_width(true);
        let b = Frame::new(Dimensions::sized(3, 4), true, false);
        assert_eq!(a, b);
        assert_ne!(a, a.with_fixed_height(true));
    }

    // ====================================================================
    // DimensionsFit
    // ====================================================================

    #[test]
    fn fit_flags_follow_frame_axes() {
        let fit = DimensionsFit::new(DefinedDims::new(5, 2), Dimensions::sized(4, 2), 1.0);
        assert_eq!(fit.width, Some(false));
        assert_eq!(fit.height, Some(true));
        assert_eq!(fit.both(), Some(false));

        let fit = DimensionsFit::new(DefinedDims::new(5, 2), Dimensions::width_only(8), 1.0);
        assert_eq!(fit.width, Some(true));
        assert_eq!(fit.height, None);
        assert_eq!(fit.both(), None);
        assert_eq!(fit.proportionality, None);
    }

    #[test]
    fn failed_width_alone_does_not_decide_both() {
        let fit = DimensionsFit::new(DefinedDims::new(10, 1), Dimensions::width_only(5), 1.0);
        assert_eq!(fit.width, Some(false));
        assert_eq!(fit.height, None);
        assert_eq!(fit.both(), None);
    }

    #[test]
    fn proportionality_undefined_for_zero_axis() {
        let fit = DimensionsFit::new(DefinedDims::new(5, 2), Dimensions::sized(0, 8), 1.0);
        assert_eq!(fit.proportionality, None);
    }

    #[test]
    fn proportionality_bands() {
        let frame = DefinedDims::new(20, 20);
        let classify = |w, h| Proportionality::classify(DefinedDims::new(w, h), frame, 1.0);
        assert_eq!(classify(10, 10), Proportionality::Same);
        assert_eq!(classify(15, 10), Proportionality::Wider);
        assert_eq!(classify(20, 10), Proportionality::Wider);
        assert_eq!(classify(21, 10), Proportionality::MuchWider);
        assert_eq!(classify(10, 15), Proportionality::Thinner);
        assert_eq!(classify(10, 20), Proportionality::Thinner);
        assert_eq!(classify(10, 21), Proportionality::MuchThinner);
        assert_eq!(classify(0, 0), Proportionality::Same);
        assert_eq!(classify(3, 0), Proportionality::MuchWider);
        assert_eq!(classify(0, 3), Proportionality::MuchThinner);
    }

    #[test]
    fn freedom_narrows_or_widens_the_band() {
        let frame = DefinedDims::new(20, 20);
        let content = DefinedDims::new(15, 10);
        assert_eq!(
            Proportionality::classify(content, frame, 0.0),
            Proportionality::MuchWider
        );
        assert_eq!(
            Proportionality::classify(content, frame, 0.5),
            Proportionality::Wider
        );
    }

    #[test]
    fn ordering_runs_from_wide_to_thin() {
        assert!(Proportionality::MuchWider < Proportionality::Wider);
        assert!(Proportionality::Wider < Proportionality::Same);
        assert!(Proportionality::Same < Proportionality::Thinner);
        assert!(Proportionality::Thinner < Proportionality::MuchThinner);
    }
}
