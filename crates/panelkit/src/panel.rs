#![forbid(unsafe_code)]

//! Panels and their rendering stages.
//!
//! A panel moves through three stages, each a distinct immutable type:
//!
//! 1. [`DraftPanel`] holds content plus a [`Frame`], [`Constraints`] and
//!    an [`OutputConfig`].
//! 2. [`ResizedPanel`] has its content laid out for the frame: text is
//!    wrapped and cropped, values are pretty-printed, layouts are reflowed.
//!    All dimensions and fit queries are answered from here on.
//! 3. [`StylizedPanel`] holds the final styled lines and hands out the
//!    output variants.
//!
//! Derived values are computed once, when a stage is constructed.

use panelkit_core::{
    Constraints, ConstraintsSatisfaction, DefinedDims, Dimensions, DimensionsFit, Frame,
    HorizontalOverflow, InvalidStageTransitionError, OutputConfig, RenderError,
};
use panelkit_pretty::{Value, max_container_width, pretty_repr};
use panelkit_style::{OutputMode, Style, StyledLine, Theme, highlight, tokenizer_for};
use panelkit_text::{
    ELLIPSIS, crop_lines_for_resizing, crop_vertically, crop_vertically_for_resizing,
    line_width, measure_text, soft_wrap_words, split_lines, wrap_words,
};
use panelkit_text::width::expand_tabs;
use tracing::debug_span;

use crate::grid;
use crate::layout::Layout;
use crate::output::OutputVariant;
use crate::reflow;

/// Blank lines between a title and its content.
pub const TITLE_BLANK_LINES: usize = 1;
/// Most lines a title may wrap to.
pub const MAX_TITLE_LINES: usize = 2;
/// A title may take content lines only if this many remain visible.
pub const MIN_PANEL_LINES_SHOWN: usize = 3;

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

/// What a panel renders.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// Free text, highlighted with the configured syntax.
    Text(String),
    /// A structured value, pretty-printed to fit the frame.
    Value(Value),
    /// Named sub-panels in a bordered grid.
    Layout(Layout),
}

impl Content {
    fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Value(_) => "value",
            Self::Layout(_) => "layout",
        }
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Value> for Content {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Layout> for Content {
    fn from(layout: Layout) -> Self {
        Self::Layout(layout)
    }
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// Content with its rendering settings, not yet sized.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftPanel {
    content: Content,
    title: String,
    frame: Frame,
    constraints: Constraints,
    config: OutputConfig,
}

impl DraftPanel {
    /// An untitled panel with an unbounded frame and default settings.
    pub fn new(content: impl Into<Content>) -> Self {
        Self {
            content: content.into(),
            title: String::new(),
            frame: Frame::UNBOUNDED,
            constraints: Constraints::NONE,
            config: OutputConfig::default(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.frame = frame;
        self
    }

    #[must_use]
    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: OutputConfig) -> Self {
        self.config = config;
        self
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    /// Lay the content out for the frame.
    ///
    /// # Errors
    ///
    /// [`RenderError::UnsupportedContent`] when a value (possibly nested in
    /// a layout) cannot be expressed in the configured syntax.
    pub fn render_next_stage(&self) -> Result<ResizedPanel, RenderError> {
        let _span = debug_span!(
            "resize",
            kind = self.content.kind(),
            width = ?self.frame.width(),
            height = ?self.frame.height(),
        )
        .entered();

        let body = match Room::of(&self.frame) {
            Room::Nothing => Body::empty(self.constraints),
            Room::Ellipsis => Body::collapsed(self.constraints),
            Room::Content => match &self.content {
                Content::Text(text) => {
                    let lines = text_lines(text, &self.frame, &self.config);
                    Body::lines(fit_lines(lines, &self.frame, &self.config), self.constraints)
                }
                Content::Value(value) => {
                    let out = pretty_repr(value, &self.frame, &self.constraints, &self.config)?;
                    Body::Lines {
                        lines: fit_lines(out.lines, &self.frame, &self.config),
                        constraints: out.constraints,
                        max_container_width: out.max_container_width,
                    }
                }
                Content::Layout(layout) => {
                    Body::Grid(reflow::reflow(layout, &self.frame, &self.config)?)
                }
            },
        };
        Ok(ResizedPanel::new(self.clone(), body))
    }

    /// Run both remaining stages.
    ///
    /// # Errors
    ///
    /// As [`render_next_stage`](Self::render_next_stage).
    pub fn render(&self) -> Result<StylizedPanel, RenderError> {
        Ok(self.render_next_stage()?.render_next_stage())
    }
}

/// What a frame leaves room for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Room {
    /// Width or height 0.
    Nothing,
    /// Width or height 1: a single `…`.
    Ellipsis,
    Content,
}

impl Room {
    fn of(frame: &Frame) -> Self {
        match (frame.width(), frame.height()) {
            (Some(0), _) | (_, Some(0)) => Self::Nothing,
            (Some(1), _) | (_, Some(1)) => Self::Ellipsis,
            _ => Self::Content,
        }
    }
}

fn text_lines(text: &str, frame: &Frame, config: &OutputConfig) -> Vec<String> {
    let lines = split_lines(text);
    match frame.width() {
        Some(width) if config.horizontal_overflow() == HorizontalOverflow::WordWrap => lines
            .iter()
            .flat_map(|line| wrap_words(line, width, config.tab_size()))
            .collect(),
        _ => lines,
    }
}

fn fit_lines(lines: Vec<String>, frame: &Frame, config: &OutputConfig) -> Vec<String> {
    let lines = crop_vertically_for_resizing(lines, frame, config.vertical_overflow());
    crop_lines_for_resizing(lines, frame, config)
}

// ---------------------------------------------------------------------------
// Resized
// ---------------------------------------------------------------------------

/// Laid-out content of a resized panel.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Body {
    Lines {
        lines: Vec<String>,
        /// Constraints the lines were formatted with.
        constraints: Constraints,
        max_container_width: usize,
    },
    /// Reflowed sub-panels, all resized.
    Grid(Layout),
}

impl Body {
    fn lines(lines: Vec<String>, constraints: Constraints) -> Self {
        let max_container_width = max_container_width(&lines);
        Self::Lines {
            lines,
            constraints,
            max_container_width,
        }
    }

    fn empty(constraints: Constraints) -> Self {
        Self::lines(Vec::new(), constraints)
    }

    fn collapsed(constraints: Constraints) -> Self {
        Self::lines(vec![ELLIPSIS.to_string()], constraints)
    }
}

/// Title lines and the space they take.
#[derive(Debug, Clone, PartialEq, Default)]
struct TitleLayout {
    /// Wrapped title, possibly more lines than shown.
    lines: Vec<String>,
    width: usize,
    /// Lines shown.
    height: usize,
    /// Frame height left below the cropped content, if the frame has one.
    available_height: Option<usize>,
}

impl TitleLayout {
    fn new(title: &str, frame: &Frame, dims: DefinedDims, cropped: DefinedDims) -> Self {
        let available_height = frame
            .height()
            .map(|h| h.saturating_sub(cropped.height));
        let max_height = max_title_height(frame.height(), available_height);
        let lines = wrap_title(
            title,
            frame.crop_width_ignore_fixed(dims.width),
            max_height.max(1),
        );
        let width = lines.iter().map(|l| line_width(l, 1)).max().unwrap_or(0);
        let height = max_height.min(lines.len());
        Self {
            lines,
            width,
            height,
            available_height,
        }
    }

    fn height_with_blank(&self) -> usize {
        if self.height > 0 {
            self.height + TITLE_BLANK_LINES
        } else {
            0
        }
    }
}

fn max_title_height(frame_height: Option<usize>, available: Option<usize>) -> usize {
    let (Some(height), Some(available)) = (frame_height, available) else {
        return MAX_TITLE_LINES;
    };
    let full = MAX_TITLE_LINES + TITLE_BLANK_LINES;
    let single = 1 + TITLE_BLANK_LINES;
    if available >= full {
        MAX_TITLE_LINES
    } else if available == single {
        1
    } else if height.saturating_sub(full) >= MIN_PANEL_LINES_SHOWN {
        MAX_TITLE_LINES
    } else if height.saturating_sub(single) >= MIN_PANEL_LINES_SHOWN {
        1
    } else {
        0
    }
}

/// Wrap the title words, widening from `width` until at most `max_lines`
/// lines are needed.
fn wrap_title(title: &str, mut width: usize, max_lines: usize) -> Vec<String> {
    let words: Vec<&str> = title.split_whitespace().collect();
    if words.is_empty() {
        return Vec::new();
    }
    loop {
        let lines = soft_wrap_words(&words, width);
        if lines.len() <= max_lines {
            return lines;
        }
        width += 1;
    }
}

/// A panel with its content laid out for its frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizedPanel {
    draft: DraftPanel,
    /// Content as laid out, before the frame hid or collapsed it.
    source: Body,
    body: Body,
    dims: DefinedDims,
    cropped_dims: DefinedDims,
    outer_dims: DefinedDims,
    title_layout: TitleLayout,
}

impl ResizedPanel {
    pub(crate) fn new(draft: DraftPanel, source: Body) -> Self {
        let frame = draft.frame;
        let room = Room::of(&frame);
        let body = match room {
            Room::Nothing => Body::empty(draft.constraints),
            Room::Ellipsis => Body::collapsed(draft.constraints),
            Room::Content => source.clone(),
        };
        let dims = match &body {
            Body::Lines { lines, .. } => measure_text(lines, draft.config.tab_size()),
            Body::Grid(layout) => grid::grid_dims(layout),
        };
        let cropped_dims = frame.crop_dims(dims);
        let title_layout = if room == Room::Nothing {
            TitleLayout::default()
        } else {
            TitleLayout::new(&draft.title, &frame, dims, cropped_dims)
        };

        let width = if title_layout.height > 0 {
            let title_width = frame
                .width()
                .map_or(title_layout.width, |w| title_layout.width.min(w));
            cropped_dims.width.max(title_width)
        } else {
            cropped_dims.width
        };
        let height = frame.crop_height_ignore_fixed(cropped_dims.height + title_layout.height_with_blank());

        Self {
            draft,
            source,
            body,
            dims,
            cropped_dims,
            outer_dims: DefinedDims::new(width, height),
            title_layout,
        }
    }

    /// The same laid-out content in another frame.
    ///
    /// Content is not laid out again, only the derived sizes change. A
    /// frame with a zero or unit axis hides the content or shows `…`, and
    /// content laid out before that comes back in a roomier frame.
    #[must_use]
    pub fn with_frame(&self, frame: Frame) -> Self {
        Self::new(self.draft.clone().with_frame(frame), self.source.clone())
    }

    /// The draft this panel was resized from, with its current frame.
    pub fn draft(&self) -> &DraftPanel {
        &self.draft
    }

    pub fn frame(&self) -> &Frame {
        &self.draft.frame
    }

    pub fn config(&self) -> &OutputConfig {
        &self.draft.config
    }

    pub fn title(&self) -> &str {
        &self.draft.title
    }

    /// Laid-out text lines. Empty for layouts.
    pub fn lines(&self) -> &[String] {
        match &self.body {
            Body::Lines { lines, .. } => lines,
            Body::Grid(_) => &[],
        }
    }

    /// Reflowed sub-panels of a layout.
    pub fn layout(&self) -> Option<&Layout> {
        match &self.body {
            Body::Grid(layout) => Some(layout),
            Body::Lines { .. } => None,
        }
    }

    /// Size of the laid-out content.
    pub fn dims(&self) -> DefinedDims {
        self.dims
    }

    /// Size of the content once cropped to the frame.
    pub fn cropped_dims(&self) -> DefinedDims {
        self.cropped_dims
    }

    /// Size including the title and its blank line.
    pub fn outer_dims(&self) -> DefinedDims {
        self.outer_dims
    }

    /// The frame left for content once the title is placed.
    pub fn inner_frame(&self) -> Frame {
        let frame = self.draft.frame;
        match frame.height() {
            Some(h) if self.title_layout.height > 0 => {
                frame.with_height(Some(h.saturating_sub(self.title_layout.height_with_blank())))
            }
            _ => frame,
        }
    }

    /// How the content fits the inner frame.
    pub fn within_frame(&self) -> DimensionsFit {
        DimensionsFit::new(
            self.dims,
            self.inner_frame().dims(),
            self.config().proportional_freedom(),
        )
    }

    /// Widest bracketed span in the output, over all sub-panels for layouts.
    pub fn max_container_width(&self) -> usize {
        match &self.body {
            Body::Lines {
                max_container_width,
                ..
            } => *max_container_width,
            Body::Grid(layout) => layout
                .panels()
                .filter_map(Panel::resized)
                .map(ResizedPanel::max_container_width)
                .max()
                .unwrap_or(0),
        }
    }

    /// Constraints in effect for the laid-out content.
    ///
    /// For values these are the tightened constraints the accepted
    /// formatting used.
    pub fn constraints(&self) -> &Constraints {
        match &self.body {
            Body::Lines { constraints, .. } => constraints,
            Body::Grid(_) => &self.draft.constraints,
        }
    }

    pub fn satisfies(&self) -> ConstraintsSatisfaction {
        ConstraintsSatisfaction::new(&self.draft.constraints, self.max_container_width())
    }

    /// The title wrapped for this frame, including lines not shown.
    pub fn resized_title(&self) -> &[String] {
        &self.title_layout.lines
    }

    pub fn title_width(&self) -> usize {
        self.title_layout.width
    }

    /// Title lines shown.
    pub fn title_height(&self) -> usize {
        self.title_layout.height
    }

    /// Title lines shown plus the blank separator line, or 0.
    pub fn title_height_with_blank(&self) -> usize {
        self.title_layout.height_with_blank()
    }

    /// Whether the title needs space the content would otherwise use.
    pub fn title_overlaps_panel(&self) -> bool {
        self.title_layout
            .available_height
            .is_some_and(|h| h < 1 + TITLE_BLANK_LINES)
    }

    /// Title lines as shown.
    pub fn shown_title(&self) -> &[String] {
        &self.title_layout.lines[..self.title_layout.height]
    }

    /// Style the laid-out content.
    pub fn render_next_stage(&self) -> StylizedPanel {
        StylizedPanel::new(self.clone())
    }
}

// ---------------------------------------------------------------------------
// Stylized
// ---------------------------------------------------------------------------

/// A fully rendered panel.
#[derive(Debug, Clone, PartialEq)]
pub struct StylizedPanel {
    resized: ResizedPanel,
    lines: Vec<StyledLine>,
}

impl StylizedPanel {
    fn new(resized: ResizedPanel) -> Self {
        let _span = debug_span!(
            "stylize",
            width = resized.dims.width,
            height = resized.dims.height,
        )
        .entered();

        let lines = match &resized.body {
            Body::Lines { lines, .. } => stylize_lines(lines, &resized),
            Body::Grid(layout) => crop_grid(grid::render_grid(layout, &resized), &resized),
        };
        Self { resized, lines }
    }

    /// The resized panel this was rendered from.
    pub fn resized(&self) -> &ResizedPanel {
        &self.resized
    }

    pub fn dims(&self) -> DefinedDims {
        self.resized.dims
    }

    pub fn frame(&self) -> &Frame {
        self.resized.frame()
    }

    pub fn within_frame(&self) -> DimensionsFit {
        self.resized.within_frame()
    }

    /// The final lines, styled for colorized output.
    pub fn lines(&self) -> &[StyledLine] {
        &self.lines
    }

    /// Unstyled text.
    pub fn plain(&self) -> OutputVariant<'_> {
        self.variant(OutputMode::Plain)
    }

    /// Text attributes without colors.
    pub fn bw_stylized(&self) -> OutputVariant<'_> {
        self.variant(OutputMode::BwStylized)
    }

    pub fn colorized(&self) -> OutputVariant<'_> {
        self.variant(OutputMode::Colorized)
    }

    fn variant(&self, mode: OutputMode) -> OutputVariant<'_> {
        OutputVariant::new(&self.lines, mode, self.resized.config())
    }
}

/// Dimensions the final output is cropped to.
///
/// Word-wrapped content is cropped to the frame itself, anything else to
/// the cropped content size.
fn output_crop_dims(panel: &ResizedPanel) -> Dimensions {
    if panel.config().horizontal_overflow() == HorizontalOverflow::WordWrap {
        panel.frame().dims()
    } else {
        panel.cropped_dims.into()
    }
}

fn stylize_lines(lines: &[String], panel: &ResizedPanel) -> Vec<StyledLine> {
    let config = panel.config();
    let frame = panel.frame();
    let crop = output_crop_dims(panel);
    let kept = crop_vertically(lines.to_vec(), crop.height, config.vertical_overflow());

    let tokenizer = tokenizer_for(config.syntax_language());
    let theme = Theme::for_style(config.color_style());

    kept.iter()
        .map(|line| {
            let expanded = expand_tabs(line, config.tab_size());
            let styled = highlight(&expanded, tokenizer.as_ref(), theme);
            let Some(width) = crop.width else {
                return styled;
            };
            let styled = match config.horizontal_overflow() {
                HorizontalOverflow::Ellipsis => styled.ellipsized(width),
                _ => styled.truncated(width),
            };
            if frame.fixed_width() {
                styled.padded(width, Style::PLAIN)
            } else {
                styled
            }
        })
        .collect()
}

/// Crop grid lines to the output size, keeping the closing border glyphs.
fn crop_grid(mut lines: Vec<StyledLine>, panel: &ResizedPanel) -> Vec<StyledLine> {
    let crop = output_crop_dims(panel);

    if let Some(height) = crop.height
        && lines.len() > height
    {
        if height == 0 {
            return Vec::new();
        }
        let last = lines.pop().unwrap_or_default();
        lines.truncate(height - 1);
        lines.push(last);
    }

    let Some(width) = crop.width else {
        return lines;
    };
    if width == 1 || crop.height == Some(1) {
        let widest = lines.iter().map(StyledLine::width).max();
        return match widest {
            None => lines,
            Some(0) => vec![StyledLine::new()],
            Some(_) => vec![StyledLine::plain(ELLIPSIS.to_string())],
        };
    }
    lines
        .iter()
        .map(|line| line.cropped_keeping_last(width))
        .collect()
}

// ---------------------------------------------------------------------------
// Panel
// ---------------------------------------------------------------------------

/// A panel at any stage.
#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    Draft(DraftPanel),
    Resized(ResizedPanel),
    Stylized(StylizedPanel),
}

impl Panel {
    /// The panel one stage further on.
    ///
    /// # Errors
    ///
    /// [`RenderError::InvalidStageTransition`] for a stylized panel, and
    /// whatever resizing a draft fails with.
    pub fn render_next_stage(&self) -> Result<Panel, RenderError> {
        match self {
            Self::Draft(draft) => Ok(Self::Resized(draft.render_next_stage()?)),
            Self::Resized(resized) => Ok(Self::Stylized(resized.render_next_stage())),
            Self::Stylized(_) => Err(InvalidStageTransitionError { stage: self.stage() }.into()),
        }
    }

    pub fn stage(&self) -> &'static str {
        match self {
            Self::Draft(_) => "draft",
            Self::Resized(_) => "resized",
            Self::Stylized(_) => "stylized",
        }
    }

    pub fn frame(&self) -> &Frame {
        match self {
            Self::Draft(draft) => draft.frame(),
            Self::Resized(resized) => resized.frame(),
            Self::Stylized(stylized) => stylized.frame(),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Draft(draft) => draft.title(),
            Self::Resized(resized) => resized.title(),
            Self::Stylized(stylized) => stylized.resized().title(),
        }
    }

    /// The resized view of a panel whose size is resolved.
    pub fn resized(&self) -> Option<&ResizedPanel> {
        match self {
            Self::Draft(_) => None,
            Self::Resized(resized) => Some(resized),
            Self::Stylized(stylized) => Some(stylized.resized()),
        }
    }
}

impl From<DraftPanel> for Panel {
    fn from(panel: DraftPanel) -> Self {
        Self::Draft(panel)
    }
}

impl From<ResizedPanel> for Panel {
    fn from(panel: ResizedPanel) -> Self {
        Self::Resized(panel)
    }
}

impl From<StylizedPanel> for Panel {
    fn from(panel: StylizedPanel) -> Self {
        Self::Stylized(panel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panelkit_core::{Proportionality, SyntaxLanguage, VerticalOverflow};

    fn plain(panel: &StylizedPanel) -> String {
        panel.plain().terminal()
    }

    fn resize(draft: DraftPanel) -> ResizedPanel {
        draft.render_next_stage().unwrap()
    }

    // ====================================================================
    // Text content
    // ====================================================================

    #[test]
    fn text_dims_count_wide_chars_and_tabs() {
        assert_eq!(resize(DraftPanel::new("北京")).dims(), DefinedDims::new(4, 1));
        assert_eq!(resize(DraftPanel::new("\tc")).dims(), DefinedDims::new(5, 1));
        assert_eq!(resize(DraftPanel::new("")).dims(), DefinedDims::ZERO);
    }

    #[test]
    fn text_wraps_to_the_frame_width() {
        let panel = resize(DraftPanel::new("Some text here").with_frame(Frame::sized(6, 10)));
        assert_eq!(panel.lines(), ["Some", "text", "here"]);
        assert_eq!(panel.dims(), DefinedDims::new(4, 3));
    }

    #[test]
    fn crop_mode_does_not_wrap() {
        let config = OutputConfig::default().with_horizontal_overflow(HorizontalOverflow::Crop);
        let panel = resize(
            DraftPanel::new("Some text here")
                .with_frame(Frame::sized(6, 10))
                .with_config(config),
        );
        assert_eq!(panel.lines(), ["Some t"]);
        assert_eq!(plain(&panel.render_next_stage()), "Some t\n");
    }

    #[test]
    fn flexible_frame_crops_while_resizing() {
        let text = "a\nb\nc\nd";
        let panel = resize(DraftPanel::new(text).with_frame(Frame::sized(5, 3)));
        assert_eq!(panel.lines(), ["a", "b", "…"]);
        assert_eq!(panel.dims(), DefinedDims::new(1, 3));
    }

    #[test]
    fn fixed_width_crops_and_pads_only_when_stylizing() {
        let config = OutputConfig::default().with_horizontal_overflow(HorizontalOverflow::Crop);
        let frame = Frame::new(Dimensions::width_only(4), true, false);
        let panel = resize(
            DraftPanel::new("abcdef\nxy")
                .with_frame(frame)
                .with_config(config),
        );
        assert_eq!(panel.dims(), DefinedDims::new(6, 2));
        assert_eq!(panel.cropped_dims(), DefinedDims::new(4, 2));
        assert_eq!(plain(&panel.render_next_stage()), "abcd\nxy  \n");
    }

    #[test]
    fn ellipsis_mode_marks_cut_lines() {
        let config =
            OutputConfig::default().with_horizontal_overflow(HorizontalOverflow::Ellipsis);
        let panel = DraftPanel::new("abcdef")
            .with_frame(Frame::sized(4, 2))
            .with_config(config)
            .render()
            .unwrap();
        assert_eq!(plain(&panel), "abc…\n");
    }

    #[test]
    fn vertical_overflow_modes() {
        let render = |mode| {
            let config = OutputConfig::default().with_vertical_overflow(mode);
            let panel = DraftPanel::new("1\n2\n3\n4")
                .with_frame(Frame::sized(5, 2))
                .with_config(config)
                .render()
                .unwrap();
            plain(&panel)
        };
        assert_eq!(render(VerticalOverflow::CropBottom), "1\n2\n");
        assert_eq!(render(VerticalOverflow::CropTop), "3\n4\n");
        assert_eq!(render(VerticalOverflow::EllipsisBottom), "1\n…\n");
        assert_eq!(render(VerticalOverflow::EllipsisTop), "…\n4\n");
    }

    #[test]
    fn zero_frame_renders_nothing() {
        let panel = DraftPanel::new("text").with_frame(Frame::sized(0, 0)).render().unwrap();
        assert_eq!(plain(&panel), "");
    }

    // ====================================================================
    // Collapse
    // ====================================================================

    #[test]
    fn unit_frames_collapse() {
        for frame in [
            Frame::sized(1, 5),
            Frame::sized(7, 1),
            Frame::new(Dimensions::width_only(1), false, false),
        ] {
            let panel = DraftPanel::new("Some content").with_frame(frame).render().unwrap();
            assert_eq!(plain(&panel), "…\n", "{frame:?}");
            assert_eq!(panel.dims(), DefinedDims::new(1, 1));
        }
    }

    #[test]
    fn zero_axis_does_not_collapse() {
        let panel = DraftPanel::new("abc").with_frame(Frame::sized(1, 0)).render().unwrap();
        assert_eq!(plain(&panel), "");
        assert_eq!(panel.dims(), DefinedDims::ZERO);
    }

    #[test]
    fn zero_width_hides_content_and_title() {
        for frame in [
            Frame::new(Dimensions::width_only(0), false, false),
            Frame::new(Dimensions::width_only(0), true, false),
            Frame::sized(0, 5),
        ] {
            let panel = resize(DraftPanel::new("abc\ndef").with_title("T").with_frame(frame));
            assert_eq!(panel.dims(), DefinedDims::ZERO, "{frame:?}");
            assert_eq!(panel.outer_dims(), DefinedDims::ZERO, "{frame:?}");
            assert_eq!(plain(&panel.render_next_stage()), "", "{frame:?}");
        }
        let narrow = resize(
            DraftPanel::new("abc").with_frame(Frame::new(Dimensions::width_only(1), false, false)),
        );
        assert_eq!(narrow.dims(), DefinedDims::new(1, 1));
    }

    // ====================================================================
    // Values
    // ====================================================================

    #[test]
    fn values_are_pretty_printed_and_highlighted() {
        let panel = DraftPanel::new(Value::from(vec![1, 2]))
            .render()
            .unwrap();
        assert_eq!(plain(&panel), "[1, 2]\n");
        assert!(panel.colorized().terminal().contains("\x1b["));
    }

    #[test]
    fn tightened_constraints_are_reported() {
        let value = Value::from(vec![Value::from(vec![1, 2, 3]), Value::from(vec![4, 5, 6])]);
        let constraints = Constraints::NONE.with_container_width_per_line_limit(Some(10));
        let panel = resize(DraftPanel::new(value).with_constraints(constraints));
        assert!(panel.satisfies().all_satisfied());
        assert!(panel.max_container_width() <= 10);
    }

    #[test]
    fn unsupported_values_fail_to_resize() {
        let config = OutputConfig::default().with_syntax_language(SyntaxLanguage::Json);
        let err = DraftPanel::new(Value::Float(f64::NAN))
            .with_config(config)
            .render_next_stage();
        assert!(matches!(err, Err(RenderError::UnsupportedContent(_))));
    }

    // ====================================================================
    // Titles
    // ====================================================================

    #[test]
    fn title_without_frame_height_takes_two_lines() {
        let panel = resize(DraftPanel::new("abc").with_title("My title"));
        assert_eq!(panel.resized_title(), ["My", "title"]);
        assert_eq!(panel.title_height(), 2);
        assert_eq!(panel.title_width(), 5);
        assert_eq!(panel.outer_dims(), DefinedDims::new(5, 4));
        assert!(!panel.title_overlaps_panel());
    }

    #[test]
    fn title_height_follows_free_space() {
        let one_line = resize(
            DraftPanel::new("a\nb")
                .with_title("Long title here")
                .with_frame(Frame::sized(20, 4)),
        );
        assert_eq!(one_line.title_height(), 1);
        assert_eq!(one_line.resized_title(), ["Long title here"]);
        assert_eq!(one_line.outer_dims(), DefinedDims::new(15, 4));
        assert_eq!(one_line.inner_frame().height(), Some(2));

        let hidden = resize(
            DraftPanel::new("a\nb\nc")
                .with_title("T")
                .with_frame(Frame::sized(20, 3)),
        );
        assert_eq!(hidden.title_height(), 0);
        assert!(hidden.title_overlaps_panel());
        assert_eq!(hidden.outer_dims(), DefinedDims::new(1, 3));
    }

    #[test]
    fn title_takes_content_space_when_enough_remains() {
        let panel = resize(
            DraftPanel::new("1\n2\n3\n4\n5\n6\n7\n8")
                .with_title("T")
                .with_frame(Frame::sized(5, 6)),
        );
        assert!(panel.title_overlaps_panel());
        assert_eq!(panel.title_height(), 2.min(panel.resized_title().len()));
        assert_eq!(panel.inner_frame().height(), Some(4));
    }

    #[test]
    fn outer_width_caps_title_at_frame_width() {
        let panel = resize(
            DraftPanel::new("ab")
                .with_title("Wide title")
                .with_frame(Frame::sized(4, 10)),
        );
        assert_eq!(panel.title_width(), 5);
        assert_eq!(panel.outer_dims().width, 4);
    }

    #[test]
    fn hidden_titles_are_not_shown() {
        let panel = resize(
            DraftPanel::new("a\nb\nc")
                .with_title("aaa bbb")
                .with_frame(Frame::sized(5, 3)),
        );
        assert_eq!(panel.resized_title(), ["aaa bbb"]);
        assert!(panel.shown_title().is_empty());

        let panel = resize(
            DraftPanel::new("a\nb\nc\nd\ne\nf\ng")
                .with_title("aaa bbb ccc")
                .with_frame(Frame::sized(3, 7)),
        );
        assert_eq!(panel.shown_title(), ["aaa bbb", "ccc"]);
    }

    #[test]
    fn blank_titles_are_ignored() {
        let panel = resize(DraftPanel::new("x").with_title("   "));
        assert!(panel.resized_title().is_empty());
        assert_eq!(panel.title_height_with_blank(), 0);
    }

    // ====================================================================
    // Fit
    // ====================================================================

    #[test]
    fn within_frame_checks_the_inner_frame() {
        let panel = resize(DraftPanel::new("abc\ndef").with_frame(Frame::sized(3, 2)));
        let fit = panel.within_frame();
        assert_eq!(fit.width, Some(true));
        assert_eq!(fit.height, Some(true));
        assert_eq!(fit.both(), Some(true));
        assert_eq!(fit.proportionality, Some(Proportionality::Same));

        let unbounded = resize(DraftPanel::new("abc"));
        assert_eq!(unbounded.within_frame().both(), None);
    }

    #[test]
    fn with_frame_keeps_the_layout() {
        let panel = resize(DraftPanel::new("Some text here").with_frame(Frame::sized(6, 10)));
        let moved = panel.with_frame(Frame::sized(20, 2));
        assert_eq!(moved.lines(), panel.lines());
        assert_eq!(moved.cropped_dims(), DefinedDims::new(4, 2));
        assert_eq!(moved.with_frame(Frame::sized(1, 2)).lines(), ["…"]);
        assert!(moved.with_frame(Frame::sized(0, 2)).lines().is_empty());

        let restored = moved
            .with_frame(Frame::sized(0, 2))
            .with_frame(Frame::sized(1, 2))
            .with_frame(Frame::sized(20, 10));
        assert_eq!(restored.lines(), panel.lines());
        assert_eq!(restored.dims(), DefinedDims::new(4, 3));
    }

    // ====================================================================
    // Stage transitions
    // ====================================================================

    #[test]
    fn stylized_panels_have_no_next_stage() {
        let draft = Panel::from(DraftPanel::new("x"));
        let resized = draft.render_next_stage().unwrap();
        assert_eq!(resized.stage(), "resized");
        let stylized = resized.render_next_stage().unwrap();
        assert_eq!(stylized.stage(), "stylized");
        assert_eq!(
            stylized.render_next_stage(),
            Err(RenderError::InvalidStageTransition(
                InvalidStageTransitionError { stage: "stylized" }
            ))
        );
    }
}
